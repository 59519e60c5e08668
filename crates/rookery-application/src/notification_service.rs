//! Notification use cases.

use std::sync::Arc;

use rookery_api::ApiGateway;
use rookery_core::Result;

use crate::store::AppStore;

/// Notification operations over the notifications slice and the gateway.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<AppStore>,
    gateway: ApiGateway,
}

impl NotificationService {
    pub fn new(store: Arc<AppStore>, gateway: ApiGateway) -> Self {
        Self { store, gateway }
    }

    /// Fetches notifications and replaces the slice wholesale.
    pub async fn load(&self, unread_only: bool) -> Result<()> {
        self.store.notifications_mut().set_loading(true);
        match self.gateway.get_my_notifications(unread_only).await {
            Ok(notifications) => {
                self.store
                    .notifications_mut()
                    .set_notifications(notifications);
                Ok(())
            }
            Err(err) => {
                self.store
                    .notifications_mut()
                    .set_error(err.display_message("Error loading notifications"));
                Err(err)
            }
        }
    }

    /// Marks one notification read on the server and in the slice.
    pub async fn mark_read(&self, id: &str) -> Result<()> {
        self.gateway.mark_notification_read(id).await?;
        self.store.notifications_mut().mark_as_read(id);
        Ok(())
    }

    /// Number of unread entries in the slice.
    pub fn unread_count(&self) -> usize {
        self.store.notifications().unread_count
    }
}
