//! The notifications view: the list with its unread badge and the
//! mark-read action.

use colored::Colorize;
use rookery_core::notification::Notification;
use rustyline::DefaultEditor;

use crate::router::{Nav, Route};
use crate::shell::Services;
use crate::views::{read_line, render_error};

pub async fn notifications(
    services: &Services,
    editor: &mut DefaultEditor,
) -> anyhow::Result<Nav> {
    let mut unread_only = false;

    if let Err(err) = services.notifications.load(unread_only).await {
        render_error(
            "Something went wrong",
            &err.display_message("Error loading notifications"),
        );
        return Ok(Nav::Goto(Route::Feed));
    }
    render_list(services);

    loop {
        let line = match read_line(editor, "notifications> ")? {
            Some(line) => line,
            None => return Ok(Nav::Quit),
        };
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line.as_str(), ""),
        };
        match command {
            "" => continue,
            "help" => {
                println!("  read <id>   mark a notification read");
                println!("  unread      show unread only (toggle)");
                println!("  feed        back to the feed");
                println!("  quit        exit");
            }
            "list" => render_list(services),
            "read" => {
                if rest.is_empty() {
                    println!("{}", "usage: read <id>".yellow());
                    continue;
                }
                if let Err(err) = services.notifications.mark_read(rest).await {
                    println!(
                        "{}",
                        err.display_message("Error updating notification").red()
                    );
                } else {
                    render_list(services);
                }
            }
            "unread" => {
                unread_only = !unread_only;
                if let Err(err) = services.notifications.load(unread_only).await {
                    println!(
                        "{}",
                        err.display_message("Error loading notifications").red()
                    );
                } else {
                    render_list(services);
                }
            }
            "feed" => return Ok(Nav::Goto(Route::Feed)),
            "quit" => return Ok(Nav::Quit),
            _ => println!("{}", "Unknown command; type 'help'".yellow()),
        }
    }
}

fn render_list(services: &Services) {
    let unread = services.notifications.unread_count();
    if unread > 0 {
        println!(
            "{} {}",
            "Notifications".bright_white().bold(),
            format!("({} unread)", unread).bright_red(),
        );
    } else {
        println!("{}", "Notifications".bright_white().bold());
    }

    let slice = services.store.notifications();
    if slice.notifications.is_empty() {
        println!("{}", "No notifications yet".bright_black());
        return;
    }
    for notification in &slice.notifications {
        render_notification(notification);
    }
}

fn notification_line(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "*" };
    let date = notification.created_at.format("%Y-%m-%d %H:%M");
    format!(
        "{} [{}] {} {} {}",
        marker,
        notification.id,
        notification.actor.display_name,
        describe(&notification.kind),
        date,
    )
}

fn render_notification(notification: &Notification) {
    let line = notification_line(notification);
    if notification.is_read {
        println!("{}", line.bright_black());
    } else {
        println!("{}", line);
    }
    if let Some(post) = &notification.post {
        println!("      {}", post.content.bright_black());
    }
}

/// Human phrasing for the server-defined kind strings; unknown kinds
/// fall through verbatim.
fn describe(kind: &str) -> String {
    match kind {
        "follow" => "started following you".to_string(),
        "like" => "liked your post".to_string(),
        "comment" => "commented on your post".to_string(),
        other => other.to_string(),
    }
}
