//! Notification feed with read tracking.
//!
//! Read state is kept in memory for the lifetime of the feed. It is not
//! persisted.

use tracing::debug;

use medichain_contracts::{clinical::Notification, session::Session};

#[derive(Debug, Clone)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    /// Notifications addressed to `session`'s user, newest first.
    pub fn for_session(all: Vec<Notification>, session: &Session) -> Self {
        let mut items: Vec<Notification> = all
            .into_iter()
            .filter(|n| n.user_id == session.user_id && n.role == session.role)
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Self { items }
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|n| !n.read)
    }

    pub fn read(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|n| n.read)
    }

    pub fn unread_count(&self) -> usize {
        self.unread().count()
    }

    /// Mark one notification read. Returns false if `id` is not in the feed.
    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                debug!(notification_id = id, "notification marked read");
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
        debug!(count = self.items.len(), "all notifications marked read");
    }
}
