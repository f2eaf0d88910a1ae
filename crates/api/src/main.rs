use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use regime_core::config::Settings;
use regime_core::domain::snapshot::Snapshot;
use regime_core::render::html::HtmlSurface;
use regime_core::render::theme::Theme;
use regime_core::render::Renderer;
use regime_core::source::SnapshotSource;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let theme = Theme::from_settings(&settings)?;
    let source = regime_core::source::from_settings(&settings)?;

    tracing::info!(
        source = source.source_name(),
        theme = %theme.name,
        "snapshot renderer configured"
    );

    let state = AppState {
        source,
        renderer: Arc::new(Renderer::new(theme)),
        title: Arc::from(settings.title.as_str()),
        max_age_days: settings.snapshot_max_age_days,
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/fragment", get(get_fragment))
        .route("/data/latest.json", get(get_latest_snapshot))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    source: Arc<dyn SnapshotSource>,
    renderer: Arc<Renderer>,
    title: Arc<str>,
    max_age_days: i64,
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let surface = load_and_render(&state).await?;
    Ok(Html(surface.to_page(&state.title, state.renderer.theme())))
}

async fn get_fragment(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let surface = load_and_render(&state).await?;
    Ok(Html(surface.tbody_html()))
}

async fn get_latest_snapshot(State(state): State<AppState>) -> Result<Json<Snapshot>, StatusCode> {
    let snapshot = fetch(&state).await?;
    Ok(Json(snapshot))
}

async fn fetch(state: &AppState) -> Result<Snapshot, StatusCode> {
    let snapshot = state.source.fetch_snapshot().await.map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(source = state.source.source_name(), error = %format!("{e:#}"), "snapshot fetch failed");
        StatusCode::BAD_GATEWAY
    })?;

    let today = chrono::Utc::now().date_naive();
    regime_core::source::check_staleness(&snapshot, today, state.max_age_days);
    Ok(snapshot)
}

async fn load_and_render(state: &AppState) -> Result<HtmlSurface, StatusCode> {
    let snapshot = fetch(state).await?;

    let mut surface = HtmlSurface::new();
    let summary = state
        .renderer
        .render(&snapshot, &mut surface)
        .map_err(|e| {
            let err = anyhow::Error::new(e);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "snapshot render failed");
            StatusCode::UNPROCESSABLE_ENTITY
        })?;

    tracing::debug!(
        rows = summary.rows,
        unknown_signals = summary.unknown_signals,
        unknown_statuses = summary.unknown_statuses,
        "rendered snapshot"
    );
    Ok(surface)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
