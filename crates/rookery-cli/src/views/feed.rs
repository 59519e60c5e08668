//! The feed view: the post list with its local filter and search, the
//! composer, and the optimistic like/comment actions.

use colored::Colorize;
use rookery_application::{search_preview, FeedFilter};
use rookery_core::post::Visibility;
use rustyline::DefaultEditor;

use crate::router::{Nav, Route};
use crate::shell::Services;
use crate::views::{read_line, render_error, render_post};

const HELP: &str = "\
  filter <all|trending|recent>   reorder the visible posts
  following                      show posts from followed users
  top                            show the server-ranked trending posts
  search <text>                  filter posts by content or author
  search                         clear the search
  find <text>                    quick preview of the first matches
  view <post-id>                 show one post with its comments
  post [visibility] <text>       publish a post (public, followers, private)
  like <post-id>                 like a post
  comment <post-id> <text>       comment on a post
  profile <username>             open a profile
  notifications                  open notifications
  me                             show the signed-in identity
  go <path>                      navigate by path (/feed, /profile/<name>, ...)
  refresh                        evict cached posts and reload
  logout                         sign out
  quit                           exit";

pub async fn feed(services: &Services, editor: &mut DefaultEditor) -> anyhow::Result<Nav> {
    let mut filter = FeedFilter::All;
    let mut search = String::new();

    if let Err(err) = services.feed.load_posts().await {
        render_error(
            "Something went wrong",
            &err.display_message("Error loading posts"),
        );
        println!("{}", "(type 'refresh' to try again)".bright_black());
    } else {
        render_feed(services, filter, &search);
    }

    loop {
        let line = match read_line(editor, "feed> ")? {
            Some(line) => line,
            None => return Ok(Nav::Quit),
        };
        if line.is_empty() {
            continue;
        }
        let (command, rest) = split_command(&line);

        match command {
            "help" => println!("{}", HELP),
            "list" => render_feed(services, filter, &search),
            "filter" => match FeedFilter::parse(rest) {
                Some(parsed) => {
                    filter = parsed;
                    render_feed(services, filter, &search);
                }
                None => println!("{}", "usage: filter <all|trending|recent>".yellow()),
            },
            "following" => match services.feed.load_following_feed().await {
                Ok(posts) if posts.is_empty() => println!(
                    "{}",
                    "Your feed is empty. Follow some users to see their posts!".bright_black()
                ),
                Ok(posts) => {
                    println!("{}", "Following".bright_white().bold());
                    for post in &posts {
                        render_post(post);
                    }
                }
                Err(err) => println!("{}", err.display_message("Error loading feed").red()),
            },
            "top" => match services.feed.load_trending_feed().await {
                Ok(posts) if posts.is_empty() => {
                    println!("{}", "Nothing trending right now".bright_black())
                }
                Ok(posts) => {
                    println!("{}", "Trending".bright_white().bold());
                    for post in &posts {
                        render_post(post);
                    }
                }
                Err(err) => println!("{}", err.display_message("Error loading feed").red()),
            },
            "search" => {
                search = rest.to_string();
                render_feed(services, filter, &search);
            }
            "find" => {
                let posts = services.store.posts().posts.clone();
                let matches = search_preview(&posts, rest);
                if matches.is_empty() {
                    println!("{}", "No posts found".bright_black());
                } else {
                    for post in matches {
                        render_post(post);
                    }
                }
            }
            "view" => {
                if rest.is_empty() {
                    println!("{}", "usage: view <post-id>".yellow());
                    continue;
                }
                match services.feed.load_post(rest).await {
                    Ok(Some(post)) => {
                        render_post(&post);
                        for comment in &post.comments {
                            println!(
                                "      {} {}",
                                comment.author.display_name.bright_magenta(),
                                comment.content,
                            );
                        }
                    }
                    Ok(None) => println!("{}", "Post not found".bright_black()),
                    Err(err) => println!("{}", err.display_message("Error loading post").red()),
                }
            }
            "post" => {
                // optional leading visibility word: post followers <text>
                let (visibility, content) = match split_command(rest) {
                    (head, tail) if !tail.is_empty() => match Visibility::parse(head) {
                        Some(v) => (v, tail),
                        None => (Visibility::Public, rest),
                    },
                    _ => (Visibility::Public, rest),
                };
                match services.feed.create_post(content, visibility).await {
                    Ok(()) => render_feed(services, filter, &search),
                    Err(err) => println!("{}", err.display_message("Error creating post").red()),
                }
            }
            "like" => {
                if rest.is_empty() {
                    println!("{}", "usage: like <post-id>".yellow());
                } else {
                    services.feed.like_post(rest).await;
                    render_feed(services, filter, &search);
                }
            }
            "comment" => {
                let (post_id, text) = split_command(rest);
                if post_id.is_empty() {
                    println!("{}", "usage: comment <post-id> <text>".yellow());
                } else if let Err(err) = services.feed.comment_on_post(post_id, text).await {
                    println!("{}", err.display_message("Error creating comment").red());
                } else {
                    render_feed(services, filter, &search);
                }
            }
            "profile" => {
                if rest.is_empty() {
                    println!("{}", "usage: profile <username>".yellow());
                } else {
                    return Ok(Nav::Goto(Route::Profile(rest.to_string())));
                }
            }
            "notifications" => return Ok(Nav::Goto(Route::Notifications)),
            "me" => match services.auth.fetch_me().await {
                Ok(Some(me)) => render_me(&me),
                Ok(None) => println!("{}", "No session identity".bright_black()),
                Err(err) => println!("{}", err.display_message("Error loading identity").red()),
            },
            "go" => match Route::resolve(rest) {
                Some(route) => return Ok(Nav::Goto(route)),
                None => println!("{}", "Unknown path".yellow()),
            },
            "refresh" => {
                if let Err(err) = services.feed.refresh().await {
                    render_error(
                        "Something went wrong",
                        &err.display_message("Error loading posts"),
                    );
                } else {
                    render_feed(services, filter, &search);
                }
            }
            "logout" => {
                services.auth.logout().await?;
                return Ok(Nav::Goto(Route::Login));
            }
            "quit" => return Ok(Nav::Quit),
            _ => println!("{}", "Unknown command; type 'help'".yellow()),
        }
    }
}

/// Splits a line into the command word and the remainder.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    }
}

fn render_feed(services: &Services, filter: FeedFilter, search: &str) {
    let visible = services.feed.visible(filter, search);
    println!("{}", "Feed".bright_white().bold());
    if visible.is_empty() {
        if search.trim().is_empty() {
            println!(
                "{}",
                "Your feed is empty. Follow some users to see their posts!".bright_black()
            );
        } else {
            println!("{}", "No posts match your search".bright_black());
        }
        return;
    }
    for post in &visible {
        render_post(post);
    }
}

fn render_me(me: &rookery_core::identity::UserProfile) {
    println!("{}", me.display_name_or_placeholder().bright_magenta().bold());
    if let Some(username) = me.username() {
        println!("@{}", username.bright_black());
    }
    if let Some(bio) = me.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{}", bio);
    }
    println!(
        "{}  {}",
        format!("{} followers", me.follower_count).cyan(),
        format!("{} following", me.following_count).cyan(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_separates_head_and_tail() {
        assert_eq!(split_command("comment 42 nice post"), ("comment", "42 nice post"));
        assert_eq!(split_command("refresh"), ("refresh", ""));
        assert_eq!(split_command("search  rust "), ("search", "rust"));
    }
}
