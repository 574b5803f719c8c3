//! Email service for order confirmation messages

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::order::Order,
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the reservation confirmation for a pay-at-the-desk order.
    ///
    /// Callers treat a failure here as best-effort: log and move on.
    pub async fn send_order_confirmation(&self, to: &str, order: &Order) -> AppResult<()> {
        let subject = "Confirmation de réservation - Musée";

        let prenom = order
            .donnees_facturation
            .get("prenom")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let nom = order
            .donnees_facturation
            .get("nom")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let body = format!(
            r#"
Bonjour {prenom} {nom},

Votre réservation a été enregistrée. Vous avez choisi de payer sur place.

Numéro de commande: {numero}
Montant total: {montant} FCFA

Votre e-ticket (PDF avec QR code) vous sera envoyé après paiement à l'accueil du musée.

Merci et à bientôt,
Musée des Civilisations Noires
"#,
            prenom = prenom,
            nom = nom,
            numero = order.numero_commande,
            montant = order.montant_total.round(),
        );

        self.send_email(to, subject, &body).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Musée des Civilisations Noires");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            // STARTTLS on the configured relay
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        // The SMTP transport is blocking; keep it off the async workers
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::Internal(format!("Email task panicked: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
