//! The navigation shell.
//!
//! Owns the readline editor and the current route. Every navigation
//! passes through the authentication gate before a view renders, so a
//! protected view is never entered without a session and the auth forms
//! are skipped once signed in.

use std::sync::Arc;

use rookery_application::{
    AppStore, AuthService, FeedService, NotificationService, ProfileService,
};
use rustyline::DefaultEditor;

use crate::router::{Nav, Route};
use crate::views;

/// The store and services shared by every view.
pub struct Services {
    pub store: Arc<AppStore>,
    pub auth: AuthService,
    pub feed: FeedService,
    pub profile: ProfileService,
    pub notifications: NotificationService,
}

/// Runs the view loop until a view asks to quit.
pub async fn run(services: Services) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut route = Route::Feed.gate(services.store.session.is_authenticated());

    loop {
        let nav = match &route {
            Route::Login => views::login::login(&services, &mut editor).await?,
            Route::Register => views::login::register(&services, &mut editor).await?,
            Route::Feed => views::feed::feed(&services, &mut editor).await?,
            Route::Profile(username) => {
                views::profile::profile(&services, &mut editor, username).await?
            }
            Route::Notifications => {
                views::notifications::notifications(&services, &mut editor).await?
            }
        };
        match nav {
            Nav::Goto(next) => {
                route = next.gate(services.store.session.is_authenticated());
            }
            Nav::Quit => return Ok(()),
        }
    }
}
