//! Club inventory: sellable products and operational assets.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::resource::CommercialResource;
use crate::models::{Resource, ResourcePayload};

pub async fn fetch_resources(api: &ApiClient) -> ApiResult<Vec<Resource>> {
    api.get("recursos/", "Error al obtener los recursos")
        .bearer_if_present()
        .fetch()
        .await
}

pub async fn fetch_resource(api: &ApiClient, resource_id: i64) -> ApiResult<Resource> {
    api.get(&format!("recursos/{}", resource_id), "Recurso no encontrado")
        .bearer_if_present()
        .fetch()
        .await
}

pub async fn create_resource(api: &ApiClient, resource: &ResourcePayload) -> ApiResult<()> {
    api.post("recursos/", "Error al crear el recurso")
        .authorized()
        .json(resource)?
        .execute()
        .await
}

pub async fn update_resource(
    api: &ApiClient,
    resource_id: i64,
    resource: &ResourcePayload,
) -> ApiResult<()> {
    api.put(
        &format!("recursos/{}", resource_id),
        "Error al actualizar el recurso",
    )
    .authorized()
    .json(resource)?
    .execute()
    .await
}

pub async fn delete_resource(api: &ApiClient, resource_id: i64) -> ApiResult<()> {
    api.delete(
        &format!("recursos/{}", resource_id),
        "Error al eliminar el recurso",
    )
    .authorized()
    .execute()
    .await
}

/// Public store: commercial items with stock left.
pub async fn fetch_catalog(api: &ApiClient) -> ApiResult<Vec<CommercialResource>> {
    let resources = fetch_resources(api).await?;
    Ok(catalog(resources))
}

pub fn catalog(resources: Vec<Resource>) -> Vec<CommercialResource> {
    resources
        .into_iter()
        .filter_map(|r| match r {
            Resource::Commercial(item) if item.stock_actual > 0 => Some(item),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{client, last_json, MockTransport, client_with_token};
    use rust_decimal::Decimal;
    use std::rc::Rc;

    const LIST: &str = r#"[
        {"tipo_recurso":"COMERCIAL","id_recurso":1,"nombre":"Jersey","costo_adquisicion":"10","precio_venta":"25","stock_actual":3},
        {"tipo_recurso":"COMERCIAL","id_recurso":2,"nombre":"Gorra","costo_adquisicion":"2","precio_venta":"8","stock_actual":0},
        {"tipo_recurso":"OPERATIVO","id_recurso":3,"nombre":"Bomba","costo_adquisicion":"30","codigo_activo":"BMB-01","estado":"DISPONIBLE"}
    ]"#;

    #[test]
    fn catalog_keeps_commercial_items_in_stock() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, LIST);
        let api = client(&mock);

        let items = tokio_test::block_on(fetch_catalog(&api)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id_recurso, 1);
        assert!(mock.last_request().header("authorization").is_none());
    }

    #[test]
    fn create_sends_tagged_payload() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(201, "{}");
        let api = client_with_token(&mock, "tok");
        let payload = ResourcePayload::Commercial {
            base: crate::models::ResourceBase {
                nombre: "Jersey".to_string(),
                descripcion: None,
                imagen_url: None,
                categoria: None,
                fecha_adquisicion: None,
                costo_adquisicion: Decimal::from(10),
                observacion: None,
                tallas_disponibles: Some("S,M".to_string()),
            },
            precio_venta: Decimal::from(25),
            stock_inicial: 5,
            sku: None,
        };

        tokio_test::block_on(create_resource(&api, &payload)).unwrap();
        let body = last_json(&mock);
        assert_eq!(body["tipo_recurso"], "COMERCIAL");
        assert_eq!(body["stock_inicial"], 5);
        assert_eq!(body["nombre"], "Jersey");
    }
}
