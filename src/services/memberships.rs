//! Club memberships: the member's own record plus admin statistics.

use chrono::NaiveDate;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::membership::ReactivationRequest;
use crate::models::{
    MembershipForm, MembershipStats, Membership, MessageResponse, ParticipationStats,
};

/// The signed-in member's membership; `None` when they never applied.
pub async fn my_status(api: &ApiClient) -> ApiResult<Option<Membership>> {
    let result = api
        .get("memberships/my-status", "Error al consultar la membresía")
        .authorized()
        .fetch()
        .await;
    match result {
        Err(ApiError::NotFound) => Ok(None),
        Err(e) if e.status() == Some(404) => Ok(None),
        other => other,
    }
}

pub async fn create_membership(api: &ApiClient, form: &MembershipForm) -> ApiResult<()> {
    api.post("memberships/", "Error al registrar la membresía")
        .authorized()
        .json(form)?
        .execute()
        .await
}

pub async fn update_membership(
    api: &ApiClient,
    user_id: i64,
    form: &MembershipForm,
) -> ApiResult<()> {
    api.put(
        &format!("memberships/{}", user_id),
        "Error al actualizar la membresía",
    )
    .authorized()
    .json(form)?
    .execute()
    .await
}

pub async fn renew_membership(api: &ApiClient, user_id: i64) -> ApiResult<MessageResponse> {
    api.post(
        &format!("memberships/{}/renew", user_id),
        "Error al renovar membresía",
    )
    .authorized()
    .fetch()
    .await
}

pub const DEFAULT_REACTIVATION_REASON: &str = "Falta de participación en eventos";

pub async fn request_reactivation(
    api: &ApiClient,
    user_id: i64,
    today: NaiveDate,
    reason: &str,
) -> ApiResult<MessageResponse> {
    let request = ReactivationRequest {
        request_date: today,
        reason: reason.to_string(),
    };
    api.post(
        &format!("memberships/{}/request-reactivation", user_id),
        "Error al solicitar reactivación",
    )
    .authorized()
    .json(&request)?
    .fetch()
    .await
}

pub async fn participation_stats(api: &ApiClient, user_id: i64) -> ApiResult<ParticipationStats> {
    api.get(
        &format!("memberships/{}/participation-stats", user_id),
        "Error al verificar participación",
    )
    .authorized()
    .fetch()
    .await
}

pub async fn membership_stats(api: &ApiClient) -> ApiResult<MembershipStats> {
    api.get("memberships/stats", "Error al obtener estadísticas")
        .authorized()
        .fetch()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client_with_token, last_json, MockTransport};
    use std::rc::Rc;

    #[test]
    fn missing_membership_is_none() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(404, r#"{"detail":"No tienes membresía"}"#);
        let api = client_with_token(&mock, "tok");
        assert_eq!(tokio_test::block_on(my_status(&api)), Ok(None));
    }

    #[test]
    fn other_failures_propagate() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(500, "");
        let api = client_with_token(&mock, "tok");
        assert!(tokio_test::block_on(my_status(&api)).is_err());
    }

    #[test]
    fn reactivation_sends_date_and_reason() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"message":"Solicitud enviada"}"#);
        let api = client_with_token(&mock, "tok");
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let resp = tokio_test::block_on(request_reactivation(
            &api,
            4,
            today,
            DEFAULT_REACTIVATION_REASON,
        ))
        .unwrap();
        assert_eq!(resp.message.as_deref(), Some("Solicitud enviada"));
        assert_eq!(
            mock.last_request().url,
            "http://api.test/memberships/4/request-reactivation"
        );
        assert_eq!(
            last_json(&mock),
            serde_json::json!({"request_date": "2025-06-15", "reason": "Falta de participación en eventos"})
        );
    }

    #[test]
    fn renew_error_uses_error_key() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(400, r#"{"error":"La membresía aún está vigente"}"#);
        let api = client_with_token(&mock, "tok");
        let err = tokio_test::block_on(renew_membership(&api, 4)).unwrap_err();
        assert_eq!(err.to_string(), "La membresía aún está vigente");
    }

    #[test]
    fn stats_shape() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(
            200,
            r#"{"total_memberships":10,"by_status":{"ACTIVE":6,"PENDING":3,"INACTIVE":1}}"#,
        );
        let api = client_with_token(&mock, "tok");
        let stats = tokio_test::block_on(membership_stats(&api)).unwrap();
        assert_eq!(stats.percent("ACTIVE"), 60);
    }
}
