//! Notification read tracking.
//!
//! Read state lives on the backend; "dismissed" is client-only and kept in
//! local storage. Other tabs learn about changes through `storage` events on
//! the two sync keys, which carry nothing but a timestamp.

use std::collections::BTreeSet;

use crate::models::Notification;
use crate::storage::{
    load_json, save_json, KeyValueStore, DISMISSED_NOTIFICATIONS_KEY, DISMISS_SYNC_KEY,
    NOTIFICATIONS_SYNC_KEY,
};

pub fn dismissed_ids(store: &dyn KeyValueStore) -> BTreeSet<i64> {
    load_json::<Vec<i64>>(store, DISMISSED_NOTIFICATIONS_KEY)
        .unwrap_or_default()
        .into_iter()
        .collect()
}

/// Hide a notification in every tab.
pub fn dismiss(store: &dyn KeyValueStore, id: i64, now_ms: i64) -> BTreeSet<i64> {
    let mut ids = dismissed_ids(store);
    if ids.insert(id) {
        let list: Vec<i64> = ids.iter().copied().collect();
        save_json(store, DISMISSED_NOTIFICATIONS_KEY, &list);
    }
    store.set(DISMISS_SYNC_KEY, &now_ms.to_string());
    ids
}

/// Tell other tabs to reload their unread badge.
pub fn signal_read(store: &dyn KeyValueStore, now_ms: i64) {
    store.set(NOTIFICATIONS_SYNC_KEY, &now_ms.to_string());
}

/// Whether a `storage` event on `key` should trigger a refresh.
pub fn is_sync_key(key: Option<&str>) -> bool {
    matches!(
        key,
        Some(NOTIFICATIONS_SYNC_KEY) | Some(DISMISS_SYNC_KEY) | Some(DISMISSED_NOTIFICATIONS_KEY)
    )
}

/// Notifications that have not been dismissed, newest first.
pub fn visible(list: &[Notification], dismissed: &BTreeSet<i64>) -> Vec<Notification> {
    let mut out: Vec<Notification> = list
        .iter()
        .filter(|n| !dismissed.contains(&n.id))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

pub fn unread_count(list: &[Notification]) -> usize {
    list.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn notification(id: i64, read: bool, at: &str) -> Notification {
        Notification {
            id,
            title: format!("Aviso {}", id),
            message: String::new(),
            is_read: read,
            created_at: at.to_string(),
        }
    }

    #[test]
    fn dismissed_ids_persist_and_signal() {
        let store = MemoryStore::new();
        dismiss(&store, 3, 1000);
        dismiss(&store, 1, 2000);
        dismiss(&store, 3, 3000);

        assert_eq!(dismissed_ids(&store).into_iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(store.get(DISMISSED_NOTIFICATIONS_KEY).as_deref(), Some("[1,3]"));
        assert_eq!(store.get(DISMISS_SYNC_KEY).as_deref(), Some("3000"));
    }

    #[test]
    fn visible_hides_dismissed_and_sorts_newest_first() {
        let list = vec![
            notification(1, false, "2025-01-01T10:00:00"),
            notification(2, true, "2025-03-01T10:00:00"),
            notification(3, false, "2025-02-01T10:00:00"),
        ];
        let dismissed: BTreeSet<i64> = [2].into_iter().collect();

        let shown = visible(&list, &dismissed);
        let ids: Vec<i64> = shown.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(unread_count(&shown), 2);
    }

    #[test]
    fn sync_keys() {
        let store = MemoryStore::new();
        signal_read(&store, 42);
        assert_eq!(store.get(NOTIFICATIONS_SYNC_KEY).as_deref(), Some("42"));
        assert!(is_sync_key(Some("actualizar_notificaciones")));
        assert!(is_sync_key(Some("noti_dismiss_sync")));
        assert!(!is_sync_key(Some("epn_cart")));
        assert!(!is_sync_key(None));
    }
}
