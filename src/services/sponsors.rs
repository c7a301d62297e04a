use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{MessageResponse, SponsorApplication};

/// Submit a sponsorship proposal. A 2xx answer with `success: false` is
/// still a rejection.
pub async fn apply(api: &ApiClient, application: &SponsorApplication) -> ApiResult<MessageResponse> {
    let response: MessageResponse = api
        .post("sponsors/apply", "Error al enviar la solicitud")
        .json(application)?
        .fetch()
        .await?;
    if response.success == Some(false) {
        return Err(ApiError::Server {
            status: 200,
            message: response
                .message
                .unwrap_or_else(|| "Error al enviar la solicitud".to_string()),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client, last_json, MockTransport};
    use std::rc::Rc;

    fn application() -> SponsorApplication {
        SponsorApplication {
            company_name: "Bicis del Valle".to_string(),
            contact_name: "Luis Mora".to_string(),
            position: "Gerente".to_string(),
            contact_email: "luis@bicis.ec".to_string(),
            contact_phone: "0991234567".to_string(),
            proposal_description: "Auspicio de la rodada anual".to_string(),
        }
    }

    #[test]
    fn accepted_application() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"success":true,"message":"Solicitud recibida"}"#);
        let api = client(&mock);

        let resp = tokio_test::block_on(apply(&api, &application())).unwrap();
        assert_eq!(resp.message.as_deref(), Some("Solicitud recibida"));
        assert_eq!(last_json(&mock)["company_name"], "Bicis del Valle");
    }

    #[test]
    fn success_false_is_an_error() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"success":false,"message":"Correo ya registrado"}"#);
        let api = client(&mock);

        let err = tokio_test::block_on(apply(&api, &application())).unwrap_err();
        assert_eq!(err.to_string(), "Correo ya registrado");
    }
}
