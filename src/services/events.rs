//! Club events and event registration (participants).

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Event, EventPayload, Participant};

pub async fn create_event(api: &ApiClient, event: &EventPayload) -> ApiResult<()> {
    api.post("event/create", "Error al crear el evento")
        .authorized()
        .json(event)?
        .execute()
        .await
}

pub async fn fetch_events(api: &ApiClient) -> ApiResult<Vec<Event>> {
    api.get("event", "Error al obtener eventos")
        .authorized()
        .fetch()
        .await
}

pub async fn delete_event(api: &ApiClient, event_id: i64) -> ApiResult<()> {
    api.delete(&format!("event/delete/{}", event_id), "Error al eliminar el evento")
        .authorized()
        .execute()
        .await
}

pub async fn update_event(api: &ApiClient, event_id: i64, event: &EventPayload) -> ApiResult<()> {
    api.put(
        &format!("event/update/{}", event_id),
        "Error al actualizar el evento",
    )
    .authorized()
    .json(event)?
    .execute()
    .await
}

/// Soonest upcoming event, if any. Public.
pub async fn fetch_next_event(api: &ApiClient, include_image: bool) -> ApiResult<Option<Event>> {
    api.get("event/next", "Error al obtener el evento próximo")
        .query(&[("include_image", include_image.to_string())])
        .fetch()
        .await
}

pub async fn fetch_public_upcoming(api: &ApiClient) -> ApiResult<Vec<Event>> {
    api.get("event/public_upcoming", "Error al obtener eventos públicos")
        .fetch()
        .await
}

pub async fn fetch_participants(api: &ApiClient, event_id: i64) -> ApiResult<Vec<Participant>> {
    api.get(
        &format!("participants/event/{}", event_id),
        "Error al obtener participantes",
    )
    .authorized()
    .fetch()
    .await
}

#[derive(Serialize)]
struct Registration {
    event_id: i64,
}

pub async fn register_to_event(api: &ApiClient, event_id: i64) -> ApiResult<()> {
    api.post("participants/register_event", "Error al inscribirse")
        .authorized()
        .json(&Registration { event_id })?
        .execute()
        .await
}

pub async fn unregister_from_event(api: &ApiClient, event_id: i64) -> ApiResult<()> {
    api.delete(
        &format!("participants/unregister_event/{}", event_id),
        "Error al cancelar inscripción",
    )
    .authorized()
    .execute()
    .await
}

/// Ids of the events the signed-in member is registered for.
pub async fn fetch_my_events(api: &ApiClient) -> ApiResult<Vec<i64>> {
    api.get("participants/my_events", "Error al obtener eventos inscritos")
        .authorized()
        .fetch()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client, client_with_token, last_json, MockTransport};
    use crate::services::Method;
    use std::rc::Rc;

    #[test]
    fn next_event_may_be_null() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "null");
        let api = client(&mock);

        let next = tokio_test::block_on(fetch_next_event(&api, true)).unwrap();
        assert!(next.is_none());
        assert_eq!(
            mock.last_request().url,
            "http://api.test/event/next?include_image=true"
        );
        assert!(mock.last_request().header("authorization").is_none());
    }

    #[test]
    fn register_posts_event_id() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"message":"Inscripción exitosa"}"#);
        let api = client_with_token(&mock, "tok");

        tokio_test::block_on(register_to_event(&api, 12)).unwrap();
        assert_eq!(
            mock.last_request().url,
            "http://api.test/participants/register_event"
        );
        assert_eq!(last_json(&mock), serde_json::json!({"event_id": 12}));
    }

    #[test]
    fn unregister_is_a_delete() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "{}");
        let api = client_with_token(&mock, "tok");

        tokio_test::block_on(unregister_from_event(&api, 12)).unwrap();
        let request = mock.last_request();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(
            request.url,
            "http://api.test/participants/unregister_event/12"
        );
    }

    #[test]
    fn my_events_are_ids() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "[3, 8]");
        let api = client_with_token(&mock, "tok");
        assert_eq!(
            tokio_test::block_on(fetch_my_events(&api)).unwrap(),
            vec![3, 8]
        );
    }

    #[test]
    fn create_event_error_carries_detail() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(400, r#"{"detail":"La ruta no existe"}"#);
        let api = client_with_token(&mock, "tok");

        let err = tokio_test::block_on(create_event(&api, &EventPayload::default())).unwrap_err();
        assert_eq!(err.to_string(), "La ruta no existe");
    }
}
