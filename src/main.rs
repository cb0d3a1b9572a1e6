mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    router,
    service::{
        auth::jwt::JwtCodec,
        calculation::{
            calculator::HttpCalculator, dispatcher::CalculationDispatcher, CalculationSettings,
        },
        image::LocalImageStore,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client(&config)?;
    let deny_list = startup::connect_deny_list(&config).await?;

    let jwt = JwtCodec::new(
        config.jwt_secret.as_bytes(),
        config.jwt_issuer.clone(),
        config.jwt_expires_in,
    );
    let images = Arc::new(LocalImageStore::new(
        &config.image_dir,
        config.image_base_url.clone(),
    ));
    let calculator = Arc::new(HttpCalculator::new(
        http_client,
        config.calculator_url.clone(),
        config.calculator_timeout,
    ));
    let dispatcher = CalculationDispatcher::new(calculator);
    let settings = CalculationSettings {
        callback_url: config.callback_url.clone(),
        service_token: config.calculator_service_token.clone(),
    };

    let state = AppState::new(db, jwt, deny_list, images, dispatcher.clone(), settings);
    let app = router::router(&config.image_base_url, &config.image_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let in_flight = dispatcher.in_flight().await;
    if in_flight > 0 {
        tracing::info!("Waiting for {} in-flight calculation jobs", in_flight);
    }
    if tokio::time::timeout(config.calculator_timeout, dispatcher.drain())
        .await
        .is_err()
    {
        tracing::warn!("Calculation jobs still running after timeout, aborting them");
        dispatcher.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
