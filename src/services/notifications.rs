use super::ApiClient;
use crate::error::ApiResult;
use crate::models::Notification;
use crate::storage::KeyValueStore;

pub async fn fetch_notifications(api: &ApiClient) -> ApiResult<Vec<Notification>> {
    api.get("notifications", "Error al obtener notificaciones")
        .authorized()
        .fetch()
        .await
}

/// Mark as read on the backend, then nudge other tabs through `sync`.
pub async fn mark_as_read(
    api: &ApiClient,
    notification_id: i64,
    sync: &dyn KeyValueStore,
    now_ms: i64,
) -> ApiResult<()> {
    api.patch(
        &format!("notifications/mark_as_read/{}", notification_id),
        "Error al marcar la notificación como leída",
    )
    .authorized()
    .execute()
    .await?;
    crate::notifications::signal_read(sync, now_ms);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client_with_token, MockTransport};
    use crate::services::Method;
    use crate::storage::{MemoryStore, NOTIFICATIONS_SYNC_KEY};
    use std::rc::Rc;

    #[test]
    fn mark_as_read_patches_and_signals() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "{}");
        let api = client_with_token(&mock, "tok");
        let store = MemoryStore::new();

        tokio_test::block_on(mark_as_read(&api, 5, &store, 1234)).unwrap();
        let request = mock.last_request();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://api.test/notifications/mark_as_read/5");
        assert_eq!(store.get(NOTIFICATIONS_SYNC_KEY).as_deref(), Some("1234"));
    }

    #[test]
    fn failed_mark_does_not_signal() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(500, "");
        let api = client_with_token(&mock, "tok");
        let store = MemoryStore::new();

        assert!(tokio_test::block_on(mark_as_read(&api, 5, &store, 1234)).is_err());
        assert!(store.get(NOTIFICATIONS_SYNC_KEY).is_none());
    }
}
