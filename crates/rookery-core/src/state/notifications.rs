//! Notifications slice.

use crate::notification::Notification;

/// Notification list state. Replaced wholesale on fetch; the unread
/// count always equals the number of entries with `is_read == false`.
#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl NotificationsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list and recomputes the unread count.
    pub fn set_notifications(&mut self, notifications: Vec<Notification>) {
        self.unread_count = notifications.iter().filter(|n| !n.is_read).count();
        self.notifications = notifications;
        self.loading = false;
    }

    /// Inserts a new notification at the head.
    pub fn add_notification(&mut self, notification: Notification) {
        if !notification.is_read {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification);
    }

    /// Marks one entry read; a second mark on the same entry is a no-op.
    pub fn mark_as_read(&mut self, id: &str) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            if !n.is_read {
                n.is_read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for n in self.notifications.iter_mut() {
            n.is_read = true;
        }
        self.unread_count = 0;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Author;
    use chrono::Utc;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            kind: "like".to_string(),
            is_read,
            created_at: Utc::now(),
            actor: Author {
                id: "a".to_string(),
                display_name: "Alice".to_string(),
                avatar_url: None,
                user: None,
            },
            post: None,
        }
    }

    #[test]
    fn test_set_notifications_recomputes_unread() {
        let mut state = NotificationsState::new();
        state.set_notifications(vec![
            notification("1", false),
            notification("2", true),
            notification("3", false),
        ]);
        assert_eq!(state.unread_count, 2);
    }

    #[test]
    fn test_mark_as_read_is_idempotent() {
        let mut state = NotificationsState::new();
        state.set_notifications(vec![notification("1", false)]);

        state.mark_as_read("1");
        state.mark_as_read("1");

        assert!(state.notifications[0].is_read);
        assert_eq!(state.unread_count, 0);
    }

    #[test]
    fn test_add_unread_notification_goes_to_head() {
        let mut state = NotificationsState::new();
        state.set_notifications(vec![notification("1", true)]);
        state.add_notification(notification("2", false));
        assert_eq!(state.notifications[0].id, "2");
        assert_eq!(state.unread_count, 1);
    }

    #[test]
    fn test_mark_all_as_read() {
        let mut state = NotificationsState::new();
        state.set_notifications(vec![notification("1", false), notification("2", false)]);
        state.mark_all_as_read();
        assert_eq!(state.unread_count, 0);
        assert!(state.notifications.iter().all(|n| n.is_read));
    }
}
