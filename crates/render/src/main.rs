use anyhow::Context;
use clap::{Parser, ValueEnum};
use regime_core::config::Settings;
use regime_core::render::html::HtmlSurface;
use regime_core::render::text::TextSurface;
use regime_core::render::theme::Theme;
use regime_core::render::Renderer;
use regime_core::source::{FileSnapshotSource, SnapshotSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod site;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "regime_render")]
struct Args {
    /// Snapshot JSON to render. Defaults to SNAPSHOT_URL, then SNAPSHOT_PATH.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output page (html format only).
    #[arg(long, default_value = "index.html")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Built-in theme: plain, utility or bare.
    #[arg(long)]
    theme: Option<String>,

    /// JSON file overriding classes of the selected theme.
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Render everything but write nothing.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match run(args, settings).await {
        Ok(Some(text)) => {
            print!("{text}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), "render run failed");
            Err(err)
        }
    }
}

/// Returns the text to print for `--format text`.
async fn run(args: Args, mut settings: Settings) -> anyhow::Result<Option<String>> {
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(path) = &args.theme_file {
        settings.theme_file = Some(path.display().to_string());
    }

    let theme = Theme::from_settings(&settings)?;
    let source: Arc<dyn SnapshotSource> = match &args.input {
        Some(path) => Arc::new(FileSnapshotSource::new(path)),
        None => regime_core::source::from_settings(&settings)?,
    };

    let snapshot = source
        .fetch_snapshot()
        .await
        .with_context(|| format!("loading snapshot via {} source", source.source_name()))?;

    let today = chrono::Utc::now().date_naive();
    regime_core::source::check_staleness(&snapshot, today, settings.snapshot_max_age_days);

    let renderer = Renderer::new(theme);

    match args.format {
        Format::Text => {
            let mut surface = TextSurface::new();
            renderer.render(&snapshot, &mut surface)?;
            Ok(Some(surface.to_text()))
        }
        Format::Html => {
            let mut surface = HtmlSurface::new();
            let summary = renderer.render(&snapshot, &mut surface)?;
            let page = surface.to_page(&settings.title, renderer.theme());

            if args.dry_run {
                tracing::info!(
                    rows = summary.rows,
                    unknown_signals = summary.unknown_signals,
                    unknown_statuses = summary.unknown_statuses,
                    bytes = page.len(),
                    dry_run = true,
                    "rendered dashboard"
                );
                return Ok(None);
            }

            site::write_page(&args.out, &page).await?;
            tracing::info!(
                rows = summary.rows,
                out = %args.out.display(),
                theme = %renderer.theme().name,
                "wrote dashboard page"
            );
            Ok(None)
        }
    }
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
