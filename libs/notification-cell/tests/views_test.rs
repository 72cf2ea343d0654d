use chrono::NaiveDateTime;

use notification_cell::models::{Notification, NotificationKind};
use notification_cell::views::{
    filter_notifications, sort_newest_first, unread_count, NotificationFilter, ReadFilter,
};

fn datetime(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn notification(id: i64, title: &str, kind: NotificationKind, read: bool, at: &str) -> Notification {
    Notification {
        id,
        title: title.to_string(),
        message: "Revise la agenda del día".to_string(),
        kind,
        read,
        created_at: datetime(at),
        related_entity_type: None,
        related_entity_id: None,
    }
}

#[test]
fn unread_count_only_counts_unread_items() {
    let notifications = vec![
        notification(1, "Cita confirmada", NotificationKind::Success, false, "2025-03-10T08:00:00"),
        notification(2, "Turno cancelado", NotificationKind::Warning, true, "2025-03-10T09:00:00"),
        notification(3, "Nuevo triaje", NotificationKind::Info, false, "2025-03-10T10:00:00"),
    ];

    assert_eq!(unread_count(&notifications), 2);
}

#[test]
fn unread_count_is_zero_when_everything_is_read() {
    let notifications = vec![notification(
        1,
        "Cita confirmada",
        NotificationKind::Success,
        true,
        "2025-03-10T08:00:00",
    )];

    assert_eq!(unread_count(&notifications), 0);
}

#[test]
fn filters_combine_kind_read_state_and_text() {
    let notifications = vec![
        notification(1, "Cita confirmada", NotificationKind::Success, false, "2025-03-10T08:00:00"),
        notification(2, "Cita cancelada", NotificationKind::Warning, false, "2025-03-10T09:00:00"),
        notification(3, "Cita confirmada", NotificationKind::Success, true, "2025-03-10T10:00:00"),
    ];

    let filter = NotificationFilter {
        search: "cita".to_string(),
        kind: Some(NotificationKind::Success),
        read: ReadFilter::Unread,
    };
    let matched = filter_notifications(&notifications, &filter);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, 1);
}

#[test]
fn text_criterion_searches_title_and_message() {
    let notifications = vec![
        notification(1, "Cita confirmada", NotificationKind::Success, false, "2025-03-10T08:00:00"),
        notification(2, "Aviso", NotificationKind::Info, false, "2025-03-10T09:00:00"),
    ];

    let filter = NotificationFilter {
        search: "agenda".to_string(),
        ..Default::default()
    };
    let matched = filter_notifications(&notifications, &filter);

    // Both messages mention the agenda.
    assert_eq!(matched.len(), 2);
}

#[test]
fn sorts_newest_first() {
    let notifications = vec![
        notification(1, "Primera", NotificationKind::Info, false, "2025-03-10T08:00:00"),
        notification(2, "Tercera", NotificationKind::Info, false, "2025-03-10T12:00:00"),
        notification(3, "Segunda", NotificationKind::Info, false, "2025-03-10T10:00:00"),
    ];

    let sorted = sort_newest_first(notifications);

    assert_eq!(
        sorted.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![2, 3, 1]
    );
}
