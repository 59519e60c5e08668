//! The routing shell: path parsing and authentication gating.

/// Client-side routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Feed,
    Profile(String),
    Notifications,
}

impl Route {
    /// Parses a path into a route. `/` redirects to the feed; unknown
    /// paths resolve to nothing.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Route::Feed),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/feed" => Some(Route::Feed),
            "/notifications" => Some(Route::Notifications),
            _ => path
                .strip_prefix("/profile/")
                .filter(|username| !username.is_empty())
                .map(|username| Route::Profile(username.to_string())),
        }
    }

    /// Whether this route requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Feed | Route::Profile(_) | Route::Notifications
        )
    }

    /// Applies the authentication gate: protected routes fall back to
    /// the login view when unauthenticated, and an authenticated user
    /// landing on the auth forms goes straight to the feed.
    pub fn gate(self, is_authenticated: bool) -> Route {
        if self.is_protected() && !is_authenticated {
            return Route::Login;
        }
        if matches!(self, Route::Login | Route::Register) && is_authenticated {
            return Route::Feed;
        }
        self
    }
}

/// Where a view sends the shell next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Goto(Route),
    Quit,
}
