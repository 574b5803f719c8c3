//! API integration tests
//!
//! These run against a live server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/v1";

/// Helper: register a fresh visitor profile and return its UUID
async fn create_visitor(client: &Client) -> String {
    let uuid = Uuid::new_v4().to_string();
    let response = client
        .post(format!("{}/visiteurs", BASE_URL))
        .json(&json!({ "uuid": uuid, "langue": "fr" }))
        .send()
        .await
        .expect("Failed to send visitor request");
    assert_eq!(response.status(), 201);
    uuid
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
#[ignore]
async fn test_availability_lists_every_slot() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/billets/disponibilites?date=2030-06-15&type=standard",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let slots = body["data"].as_array().expect("No slot array");
    assert_eq!(slots.len(), 7);
    for slot in slots {
        assert!(slot["heure"].is_string());
        assert!(slot["capacite"].is_number());
        assert!(slot["restants"].is_number());
        assert!(slot["complet"].is_boolean());
    }
}

#[tokio::test]
#[ignore]
async fn test_availability_requires_a_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/billets/disponibilites", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["date"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_closed_day_marks_every_slot_full() {
    let client = Client::new();

    // Declare a closure, check availability, then clean up
    let response = client
        .post(format!("{}/calendrier/closures", BASE_URL))
        .json(&json!({ "date": "2031-01-01", "reason": "Jour férié" }))
        .send()
        .await
        .expect("Failed to send closure request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let closure_id = body["data"]["id"].as_i64().expect("No closure ID");

    let response = client
        .get(format!(
            "{}/billets/disponibilites?date=2031-01-01",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send availability request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for slot in body["data"].as_array().expect("No slot array") {
        assert_eq!(slot["capacite"], 0);
        assert_eq!(slot["restants"], 0);
        assert_eq!(slot["complet"], true);
    }

    let response = client
        .delete(format!("{}/calendrier/closures/{}", BASE_URL, closure_id))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_ticket_lifecycle() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    // Purchase
    let response = client
        .post(format!("{}/billets", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "type": "standard",
            "prix": 5000,
            "date_visite": "2031-06-15",
            "heure_visite": "10:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let qr_code = body["data"]["qr_code"].as_str().expect("No qr_code");
    assert!(qr_code.starts_with("MCN-"));
    assert_eq!(body["data"]["statut"], "valide");

    // First scan redeems
    let response = client
        .post(format!("{}/billets/validate/{}", BASE_URL, qr_code))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["statut"], "utilise");

    // Second scan conflicts and reports the current statut
    let response = client
        .post(format!("{}/billets/validate/{}", BASE_URL, qr_code))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["statut"], "utilise");
}

#[tokio::test]
#[ignore]
async fn test_used_ticket_cannot_be_cancelled() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/billets", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "type": "standard",
            "prix": 5000
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let ticket_id = body["data"]["id"].as_i64().expect("No ticket ID");
    let qr_code = body["data"]["qr_code"].as_str().expect("No qr_code").to_string();

    let response = client
        .post(format!("{}/billets/validate/{}", BASE_URL, qr_code))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/billets/{}/cancel", BASE_URL, ticket_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_ticket_rejects_past_visit_date() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/billets", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "type": "standard",
            "prix": 5000,
            "date_visite": "2000-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["date_visite"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_order_checkout_and_listing() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/commandes", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "items": [
                { "type": "standard", "quantite": 2, "prix_unitaire": 5000 }
            ],
            "methode_paiement": "sur_place",
            "visitor": { "prenom": "Awa", "email": "" }
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let order = &body["data"];
    assert_eq!(order["montant_total"], "10000.00");
    assert_eq!(order["statut"], "en_attente");
    assert!(order["numero_commande"]
        .as_str()
        .expect("No numero_commande")
        .starts_with("CMD-"));
    // Empty billing fields are omitted, never stored as null
    assert_eq!(order["donnees_facturation"]["prenom"], "Awa");
    assert!(order["donnees_facturation"].get("email").is_none());

    let response = client
        .get(format!("{}/commandes/visiteur/{}", BASE_URL, uuid))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().expect("No order array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_cancel_pending_order_marks_payment_failed() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/commandes", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "items": [{ "type": "standard", "quantite": 1, "prix_unitaire": 5000 }],
            "methode_paiement": "stripe"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let order_id = body["data"]["id"].as_i64().expect("No order ID");
    assert_eq!(body["data"]["statut"], "en_attente");

    let response = client
        .put(format!("{}/commandes/{}/cancel", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["statut"], "annulee");
    assert_eq!(body["data"]["statut_paiement"], "echec");
}

#[tokio::test]
#[ignore]
async fn test_cancel_preserves_a_settled_payment() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/commandes", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "items": [{ "type": "standard", "quantite": 1, "prix_unitaire": 5000 }],
            "methode_paiement": "stripe"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let order_id = body["data"]["id"].as_i64().expect("No order ID");

    let response = client
        .put(format!("{}/commandes/{}/status", BASE_URL, order_id))
        .json(&json!({ "statut_paiement": "paye" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/commandes/{}/cancel", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["statut"], "annulee");
    assert_eq!(body["data"]["statut_paiement"], "paye");
}

#[tokio::test]
#[ignore]
async fn test_order_cancel_rules() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    let response = client
        .post(format!("{}/commandes", BASE_URL))
        .json(&json!({
            "visiteur_uuid": uuid,
            "items": [{ "type": "enfant", "quantite": 1, "prix_unitaire": 2000 }],
            "methode_paiement": "stripe"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let order_id = body["data"]["id"].as_i64().expect("No order ID");

    // Move past the cancellable window
    let response = client
        .put(format!("{}/commandes/{}/status", BASE_URL, order_id))
        .json(&json!({ "statut": "livree" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/commandes/{}/cancel", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["statut"], "livree");
}

#[tokio::test]
#[ignore]
async fn test_visitor_favorites_and_history() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    for oeuvre_id in [5, 3, 5] {
        let response = client
            .post(format!("{}/visiteurs/{}/historique", BASE_URL, uuid))
            .json(&json!({ "oeuvre_id": oeuvre_id }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    let response = client
        .get(format!("{}/visiteurs/{}", BASE_URL, uuid))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["historique_consultation"], json!([5, 3]));

    // Favorites reject duplicates
    for _ in 0..2 {
        let response = client
            .post(format!("{}/visiteurs/{}/favorites", BASE_URL, uuid))
            .json(&json!({ "oeuvre_id": 9 }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    let response = client
        .get(format!("{}/visiteurs/{}", BASE_URL, uuid))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["oeuvres_favorites"], json!([9]));
}

#[tokio::test]
#[ignore]
async fn test_visitor_lookup_is_idempotent() {
    let client = Client::new();
    let uuid = create_visitor(&client).await;

    // Same UUID answers 200, not a fresh profile
    let response = client
        .post(format!("{}/visiteurs", BASE_URL))
        .json(&json!({ "uuid": uuid }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_calendar_month_view() {
    let client = Client::new();

    let response = client
        .get(format!("{}/calendrier?month=2030-06", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["month"], "2030-06");
    assert!(body["data"]["closures"].is_array());
    assert!(body["data"]["events"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_tarifs_grid() {
    let client = Client::new();

    let response = client
        .get(format!("{}/tarifs", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let tarifs = body["data"].as_array().expect("No tarif array");
    assert!(!tarifs.is_empty());
    assert_eq!(tarifs[0]["devise"], "FCFA");
}

#[tokio::test]
#[ignore]
async fn test_unknown_qr_code_is_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/billets/validate/MCN-0000000000", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}
