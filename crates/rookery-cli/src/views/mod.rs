//! Terminal views.
//!
//! Each view owns one screen: it renders from the slices, prompts
//! through rustyline, dispatches service calls, and tells the shell
//! where to navigate next.

pub mod feed;
pub mod login;
pub mod notifications;
pub mod profile;

use colored::Colorize;
use rookery_core::post::Post;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Reads one line; `None` means the user hit Ctrl-C/Ctrl-D and the
/// shell should quit.
pub fn read_line(editor: &mut DefaultEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => {
            let line = line.trim().to_string();
            if !line.is_empty() {
                let _ = editor.add_history_entry(&line);
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// One post, feed-card style.
pub fn render_post(post: &Post) {
    let date = post.created_at.format("%Y-%m-%d %H:%M");
    println!(
        "{} {} {}",
        format!("[{}]", post.id).bright_black(),
        post.author.display_name.bright_magenta(),
        date.to_string().bright_black(),
    );
    println!("    {}", post.content);
    println!(
        "    {}  {}",
        format!("{} likes", post.like_count).red(),
        format!("{} comments", post.comment_count).blue(),
    );
}

pub fn render_error(title: &str, message: &str) {
    println!("{}", title.bright_red());
    println!("{}", message.red());
}
