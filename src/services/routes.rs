use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{RoutePayload, RouteRecord};

pub async fn create_route(api: &ApiClient, route: &RoutePayload) -> ApiResult<()> {
    api.post("route/create", "Error al crear la ruta")
        .authorized()
        .json(route)?
        .execute()
        .await
}

pub async fn fetch_routes(api: &ApiClient) -> ApiResult<Vec<RouteRecord>> {
    api.get("route", "Error al obtener las rutas")
        .authorized()
        .fetch()
        .await
}

pub async fn delete_route(api: &ApiClient, route_id: i64) -> ApiResult<()> {
    api.delete(&format!("route/delete/{}", route_id), "Error al eliminar la ruta")
        .authorized()
        .execute()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client_with_token, last_json, MockTransport};
    use std::rc::Rc;

    #[test]
    fn create_route_posts_minutes() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(201, r#"{"id":1}"#);
        let api = client_with_token(&mock, "tok");
        let route = RoutePayload {
            name: "Ilaló".to_string(),
            start_point: "Tumbaco".to_string(),
            end_point: "La Merced".to_string(),
            duration: 150,
        };

        tokio_test::block_on(create_route(&api, &route)).unwrap();
        assert_eq!(mock.last_request().url, "http://api.test/route/create");
        assert_eq!(last_json(&mock)["duration"], 150);
    }

    #[test]
    fn routes_list() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(
            200,
            r#"[{"id":1,"name":"Ilaló","start_point":"Tumbaco","end_point":"La Merced","duration":150}]"#,
        );
        let api = client_with_token(&mock, "tok");
        let routes = tokio_test::block_on(fetch_routes(&api)).unwrap();
        assert_eq!(routes[0].name, "Ilaló");
    }
}
