//! The application store.
//!
//! Bundles the session store and the entity slices behind one shared
//! handle, mirroring the reducer layout: auth, posts, profile,
//! notifications. The slices and the gateway's response cache are
//! intentionally separate caches; nothing reconciles them beyond the
//! explicit actions the services dispatch.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rookery_core::state::{NotificationsState, PostsState, ProfileState};

use crate::session_store::SessionStore;

/// Shared client-side state.
#[derive(Clone)]
pub struct AppStore {
    pub session: SessionStore,
    posts: Arc<RwLock<PostsState>>,
    profile: Arc<RwLock<ProfileState>>,
    notifications: Arc<RwLock<NotificationsState>>,
}

impl AppStore {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            posts: Arc::new(RwLock::new(PostsState::new())),
            profile: Arc::new(RwLock::new(ProfileState::new())),
            notifications: Arc::new(RwLock::new(NotificationsState::new())),
        }
    }

    pub fn posts(&self) -> RwLockReadGuard<'_, PostsState> {
        self.posts.read().unwrap()
    }

    pub fn posts_mut(&self) -> RwLockWriteGuard<'_, PostsState> {
        self.posts.write().unwrap()
    }

    pub fn profile(&self) -> RwLockReadGuard<'_, ProfileState> {
        self.profile.read().unwrap()
    }

    pub fn profile_mut(&self) -> RwLockWriteGuard<'_, ProfileState> {
        self.profile.write().unwrap()
    }

    pub fn notifications(&self) -> RwLockReadGuard<'_, NotificationsState> {
        self.notifications.read().unwrap()
    }

    pub fn notifications_mut(&self) -> RwLockWriteGuard<'_, NotificationsState> {
        self.notifications.write().unwrap()
    }
}
