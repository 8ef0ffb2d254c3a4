use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use sgt_backend::config::environment::EnvironmentConfig;
use sgt_backend::database::create_pool;
use sgt_backend::services::payment_verifier::OcrHttpVerifier;
use sgt_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 SGT Backend - Gestion des voyages et réservations");
    info!("====================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos (aplica migraciones pendientes)
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Verificador OCR de preuves de pago
    let ocr_url = config
        .ocr_verify_url
        .clone()
        .unwrap_or_else(|| "http://localhost:8600".to_string());
    info!("🔍 Verificador OCR: {}", ocr_url);
    let verifier = Arc::new(OcrHttpVerifier::new(ocr_url));

    let app_state = AppState::new(pool, config.clone(), verifier);
    let app = sgt_backend::build_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🗺  Endpoints - Trajet:");
    info!("   POST /api/trajet - Crear trajet");
    info!("   GET  /api/trajet - Listar trajets");
    info!("   GET  /api/trajet/:id | PUT /api/trajet/:id | DELETE /api/trajet/:id");
    info!("🚐 Endpoints - Vehicule:");
    info!("   POST /api/vehicule - Crear vehículo");
    info!("   GET  /api/vehicule - Listar vehículos");
    info!("   GET  /api/vehicule/:id | PUT /api/vehicule/:id | DELETE /api/vehicule/:id");
    info!("🧑 Endpoints - Chauffeur:");
    info!("   POST /api/chauffeur | GET /api/chauffeur | GET/PUT/DELETE /api/chauffeur/:id");
    info!("🚌 Endpoints - Voyage:");
    info!("   POST /api/voyage - Programar voyage");
    info!("   GET  /api/voyage - Listado con plazas y estado en vivo");
    info!("   GET  /api/voyage/:id | PUT /api/voyage/:id | DELETE /api/voyage/:id");
    info!("🎫 Endpoints - Reservation:");
    info!("   POST /api/reservation - Reserva staff (confirmada y pagada)");
    info!("   GET  /api/reservation - Listado (pendientes primero)");
    info!("   PUT  /api/reservation/:id/sieges - Modificar plazas");
    info!("   POST /api/reservation/:id/confirmer-paiement - Confirmar pago");
    info!("   POST /api/reservation/:id/annuler - Anular (libera plazas)");
    info!("   GET  /api/reservation/:id/ticket - Datos del ticket");
    info!("👥 Endpoints - Utilisateur:");
    info!("   GET  /api/utilisateur/clients | GET /api/utilisateur/search?q=");
    info!("   PUT  /api/utilisateur/:id/role | PUT /api/utilisateur/:id/active");
    info!("📱 Endpoints Móviles:");
    info!("   GET  /api/mobile/voyages - Voyages abiertos a reserva");
    info!("   POST /api/mobile/reservations - Reserva móvil (en_attente u OCR)");
    info!("   GET  /api/mobile/reservations/:user_id - Historial del cliente");
    info!("   GET  /api/mobile/payment-options - Canales de pago manual");
    info!("   GET  /api/mobile/chauffeur/:user_id/voyages - Voyages del chauffeur");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::anyhow!(e)
            })
    });

    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Error instalando handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("❌ Error instalando handler de SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
