use simboard::config::AppConfig;
use simboard::routes;
use simboard::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        spots = config.parking_spots,
        policy = config.parking_policy.as_str(),
        tick_scale = config.tick_scale,
        "configuration loaded"
    );

    let state = AppState::new(config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "simboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
