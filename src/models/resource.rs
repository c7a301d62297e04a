use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of an operational asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    #[default]
    Disponible,
    Asignado,
    EnMantenimiento,
    DeBaja,
}

impl AssetState {
    pub const ALL: [AssetState; 4] = [
        AssetState::Disponible,
        AssetState::Asignado,
        AssetState::EnMantenimiento,
        AssetState::DeBaja,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetState::Disponible => "DISPONIBLE",
            AssetState::Asignado => "ASIGNADO",
            AssetState::EnMantenimiento => "EN_MANTENIMIENTO",
            AssetState::DeBaja => "DE_BAJA",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetState::Disponible => "Disponible",
            AssetState::Asignado => "Asignado",
            AssetState::EnMantenimiento => "En Mantenimiento",
            AssetState::DeBaja => "De Baja",
        }
    }
}

/// Fields shared by every inventory entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ResourceBase {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub fecha_adquisicion: Option<NaiveDate>,
    pub costo_adquisicion: Decimal,
    #[serde(default)]
    pub observacion: Option<String>,
    /// Comma separated, e.g. `"S, M, L"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tallas_disponibles: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CommercialResource {
    pub id_recurso: i64,
    #[serde(flatten)]
    pub base: ResourceBase,
    pub precio_venta: Decimal,
    pub stock_actual: i64,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OperationalResource {
    pub id_recurso: i64,
    #[serde(flatten)]
    pub base: ResourceBase,
    pub codigo_activo: String,
    pub estado: AssetState,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub id_usuario_responsable: Option<i64>,
}

/// Inventory entry as read from `/recursos/`, tagged by `tipo_recurso`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "tipo_recurso")]
pub enum Resource {
    #[serde(rename = "COMERCIAL")]
    Commercial(CommercialResource),
    #[serde(rename = "OPERATIVO")]
    Operational(OperationalResource),
}

impl Resource {
    pub fn id(&self) -> i64 {
        match self {
            Resource::Commercial(r) => r.id_recurso,
            Resource::Operational(r) => r.id_recurso,
        }
    }

    pub fn base(&self) -> &ResourceBase {
        match self {
            Resource::Commercial(r) => &r.base,
            Resource::Operational(r) => &r.base,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Resource::Commercial(_) => "Comercial",
            Resource::Operational(_) => "Operativo",
        }
    }

    pub fn as_commercial(&self) -> Option<&CommercialResource> {
        match self {
            Resource::Commercial(r) => Some(r),
            Resource::Operational(_) => None,
        }
    }
}

impl ResourceBase {
    /// Sizes offered for a product; empty when it has a single size.
    pub fn sizes(&self) -> Vec<String> {
        self.tallas_disponibles
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of `POST /recursos/` and `PUT /recursos/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "tipo_recurso")]
pub enum ResourcePayload {
    #[serde(rename = "COMERCIAL")]
    Commercial {
        #[serde(flatten)]
        base: ResourceBase,
        precio_venta: Decimal,
        stock_inicial: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        sku: Option<String>,
    },
    #[serde(rename = "OPERATIVO")]
    Operational {
        #[serde(flatten)]
        base: ResourceBase,
        codigo_activo: String,
        estado: AssetState,
        #[serde(skip_serializing_if = "Option::is_none")]
        ubicacion: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        id_usuario_responsable: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn reads_commercial_variant() {
        let resource: Resource = serde_json::from_value(serde_json::json!({
            "tipo_recurso": "COMERCIAL",
            "id_recurso": 4,
            "nombre": "Jersey Manga Corta",
            "costo_adquisicion": "12.00",
            "precio_venta": "25.50",
            "stock_actual": 8,
            "sku": "JER-01",
            "tallas_disponibles": "S, M ,L,"
        }))
        .unwrap();

        let product = resource.as_commercial().unwrap();
        assert_eq!(product.precio_venta, Decimal::from_str("25.50").unwrap());
        assert_eq!(resource.base().sizes(), vec!["S", "M", "L"]);
        assert_eq!(resource.kind_label(), "Comercial");
    }

    #[test]
    fn reads_operational_variant() {
        let resource: Resource = serde_json::from_value(serde_json::json!({
            "tipo_recurso": "OPERATIVO",
            "id_recurso": 9,
            "nombre": "Bomba de aire",
            "costo_adquisicion": 30,
            "codigo_activo": "BMB-001",
            "estado": "EN_MANTENIMIENTO",
            "ubicacion": "Bodega"
        }))
        .unwrap();

        assert_eq!(resource.id(), 9);
        assert!(resource.as_commercial().is_none());
        match resource {
            Resource::Operational(r) => assert_eq!(r.estado, AssetState::EnMantenimiento),
            Resource::Commercial(_) => panic!("expected operational"),
        }
    }

    #[test]
    fn payload_is_tagged() {
        let payload = ResourcePayload::Commercial {
            base: ResourceBase {
                nombre: "Buff".to_string(),
                costo_adquisicion: Decimal::new(300, 2),
                ..Default::default()
            },
            precio_venta: Decimal::new(800, 2),
            stock_inicial: 10,
            sku: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["tipo_recurso"], "COMERCIAL");
        assert_eq!(value["stock_inicial"], 10);
        assert_eq!(value["nombre"], "Buff");
        assert_eq!(value["precio_venta"], "8.00");
    }
}
