//! The profile view: header card, stats, the profile's posts, and the
//! follow/unfollow toggle.

use colored::Colorize;
use rookery_core::identity::UserProfile;
use rustyline::DefaultEditor;

use crate::router::{Nav, Route};
use crate::shell::Services;
use crate::views::{read_line, render_error, render_post};

pub async fn profile(
    services: &Services,
    editor: &mut DefaultEditor,
    username: &str,
) -> anyhow::Result<Nav> {
    match services.profile.load(username).await {
        Ok(profile) => render_profile(services, &profile),
        Err(err) if err.is_not_found() => {
            render_error(
                "Profile Not Found",
                &format!(
                    "The user @{} doesn't exist or has been deleted.",
                    username
                ),
            );
            return Ok(Nav::Goto(Route::Feed));
        }
        Err(err) => {
            render_error(
                "Something went wrong",
                &err.display_message("Error loading profile"),
            );
            return Ok(Nav::Goto(Route::Feed));
        }
    }

    loop {
        let line = match read_line(editor, &format!("profile:{}> ", username))? {
            Some(line) => line,
            None => return Ok(Nav::Quit),
        };
        match line.as_str() {
            "" => continue,
            "help" => {
                println!("  follow      toggle following this user");
                println!("  feed        back to the feed");
                println!("  quit        exit");
            }
            "follow" | "unfollow" => {
                let user_id = match services.store.profile().current_profile.as_ref() {
                    Some(profile) => profile.id.clone(),
                    None => continue,
                };
                if let Err(err) = services.profile.toggle_follow(&user_id).await {
                    println!("{}", err.display_message("Error updating follow").red());
                    continue;
                }
                // refetch so the authoritative counts replace the
                // optimistic adjustment
                match services.profile.load(username).await {
                    Ok(profile) => render_profile(services, &profile),
                    Err(err) => {
                        println!("{}", err.display_message("Error loading profile").red())
                    }
                }
            }
            "feed" => return Ok(Nav::Goto(Route::Feed)),
            "quit" => return Ok(Nav::Quit),
            _ => println!("{}", "Unknown command; type 'help'".yellow()),
        }
    }
}

fn render_profile(services: &Services, profile: &UserProfile) {
    println!(
        "{}",
        profile.display_name_or_placeholder().bright_magenta().bold()
    );
    if let Some(username) = profile.username() {
        println!("@{}", username.bright_black());
    }
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{}", bio);
    }
    println!(
        "{}  {}  {}",
        format!("{} posts", profile.posts.len()).cyan(),
        format!("{} followers", profile.follower_count).cyan(),
        format!("{} following", profile.following_count).cyan(),
    );
    if services.profile.is_following() {
        println!("{}", "Following".bright_green());
    }

    if profile.posts.is_empty() {
        println!("{}", "No posts yet".bright_black());
    } else {
        for post in &profile.posts {
            render_post(post);
        }
    }
}
