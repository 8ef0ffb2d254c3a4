//! Verificador externo de preuves de pago
//!
//! El verificador (un servicio OCR) es un oráculo opaco: recibe la imagen
//! y el monto esperado, devuelve `(verifie, transaction_id)`. El core no
//! cuestiona sus internals; solo impone que transaction_id sea único entre
//! reservas y que verifie=false rechace la reserva.
//!
//! La llamada es lenta y bloqueante: el protocolo de admisión la ejecuta
//! SIEMPRE antes de abrir la transacción que bloquea el voyage.

use async_trait::async_trait;
use base64::Engine;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::errors::{AppError, AppResult};

/// Resultado del oráculo de verificación
#[derive(Debug, Clone)]
pub struct VerificationPaiement {
    pub verifie: bool,
    pub transaction_id: Option<String>,
}

#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    /// Verificar una imagen de preuve contra el monto esperado
    async fn verifier(&self, image: &[u8], montant_attendu: Decimal)
        -> AppResult<VerificationPaiement>;
}

/// Implementación HTTP contra el servicio OCR de verificación
pub struct OcrHttpVerifier {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OcrVerifyResponse {
    verified: bool,
    transaction_id: Option<String>,
}

impl OcrHttpVerifier {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl PaymentVerifier for OcrHttpVerifier {
    async fn verifier(
        &self,
        image: &[u8],
        montant_attendu: Decimal,
    ) -> AppResult<VerificationPaiement> {
        let url = format!("{}/verify", self.base_url);
        let body = serde_json::json!({
            "image_base64": base64::engine::general_purpose::STANDARD.encode(image),
            "montant_attendu": montant_attendu.to_string(),
        });

        tracing::info!("📤 Enviando preuve al verificador OCR ({} bytes)", image.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("OCR verifier unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "OCR verifier returned status {}",
                response.status()
            )));
        }

        let parsed: OcrVerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid OCR verifier response: {}", e)))?;

        tracing::info!(
            "📥 Verificador OCR: verified={} transaction_id={:?}",
            parsed.verified,
            parsed.transaction_id
        );

        Ok(VerificationPaiement {
            verifie: parsed.verified,
            transaction_id: parsed.transaction_id,
        })
    }
}

/// Verificador fijo para tests: devuelve siempre el mismo resultado
#[derive(Debug, Clone)]
pub struct StaticVerifier {
    pub verifie: bool,
    pub transaction_id: Option<String>,
}

#[async_trait]
impl PaymentVerifier for StaticVerifier {
    async fn verifier(
        &self,
        _image: &[u8],
        _montant_attendu: Decimal,
    ) -> AppResult<VerificationPaiement> {
        Ok(VerificationPaiement {
            verifie: self.verifie,
            transaction_id: self.transaction_id.clone(),
        })
    }
}
