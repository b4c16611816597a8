use actix_web::{web, HttpServer};
use anyhow::Context;

use tg_api::{bootstrap, create_app, telemetry, AppState};
use tg_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    let authority = bootstrap::build_authority(&config).await?;
    let state = web::Data::new(AppState::new(authority));

    let bind_address = config.server.bind_address();
    tracing::info!(
        address = %bind_address,
        issuer = %config.jwt.issuer,
        audience = %config.jwt.audience,
        "Starting Tollgate"
    );

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Tollgate stopped");
    Ok(())
}
