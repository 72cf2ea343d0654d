use std::cmp::Reverse;

use crate::models::{Notification, NotificationKind};

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|notification| !notification.read)
        .count()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

/// Client-side notification filter across title/message text, kind and
/// read state.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub search: String,
    pub kind: Option<NotificationKind>,
    pub read: ReadFilter,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || notification.title.to_lowercase().contains(&search)
            || notification.message.to_lowercase().contains(&search);

        let matches_kind = self.kind.map_or(true, |kind| notification.kind == kind);

        let matches_read = match self.read {
            ReadFilter::All => true,
            ReadFilter::Read => notification.read,
            ReadFilter::Unread => !notification.read,
        };

        matches_search && matches_kind && matches_read
    }
}

pub fn filter_notifications(
    notifications: &[Notification],
    filter: &NotificationFilter,
) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|notification| filter.matches(notification))
        .cloned()
        .collect()
}

/// Newest first.
pub fn sort_newest_first(mut notifications: Vec<Notification>) -> Vec<Notification> {
    notifications.sort_by_key(|notification| Reverse(notification.created_at));
    notifications
}
