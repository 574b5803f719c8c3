//! Tariff grid endpoint

use axum::Json;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use utoipa::ToSchema;

/// A published tariff line
#[derive(Serialize, ToSchema)]
pub struct Tarif {
    #[serde(rename = "type")]
    pub type_: String,
    pub nom: String,
    pub prix: Decimal,
    pub devise: String,
    /// Eligibility conditions, when the tariff is restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    /// Proof to present at the entrance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preuve: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TarifListResponse {
    pub data: Vec<Tarif>,
}

/// Published tariff grid
#[utoipa::path(
    get,
    path = "/tarifs",
    tag = "tarifs",
    responses(
        (status = 200, description = "Tariff grid", body = TarifListResponse)
    )
)]
pub async fn list_tarifs() -> Json<TarifListResponse> {
    Json(TarifListResponse {
        data: vec![
            Tarif {
                type_: "standard".to_string(),
                nom: "Adulte".to_string(),
                prix: dec!(5000),
                devise: "FCFA".to_string(),
                conditions: None,
                preuve: None,
            },
            Tarif {
                type_: "etudiant".to_string(),
                nom: "Étudiant".to_string(),
                prix: dec!(3000),
                devise: "FCFA".to_string(),
                conditions: Some("Sur présentation de la carte étudiante".to_string()),
                preuve: Some("Carte étudiante en cours de validité".to_string()),
            },
            Tarif {
                type_: "enfant".to_string(),
                nom: "Enfant (moins de 12 ans)".to_string(),
                prix: dec!(2000),
                devise: "FCFA".to_string(),
                conditions: Some("Enfants de moins de 12 ans".to_string()),
                preuve: Some("Pièce d'identité de l'enfant".to_string()),
            },
        ],
    })
}
