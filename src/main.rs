use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lazy_gallery::application::{GalleryLoader, RatingSubmitter, SubmitOutcome};
use lazy_gallery::domain::entities::IntersectionBatch;
use lazy_gallery::domain::ports::{DisplayPort, ImageApiPort};
use lazy_gallery::infrastructure::{
    AppConfig, CliArgs, Command, ConfigStore, HtmlDocument, HttpImageApi, ScrollViewport,
    ViewportGeometry,
};
use lazy_gallery::presentation::{App, TerminalDisplay};

const STATUS_LINES: u16 = 2;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = ConfigStore::locate(args.config.as_deref())?.load()?;
    config.merge_with_args(args);
    Ok(config)
}

struct Gallery {
    loader: Arc<GalleryLoader>,
    submitter: Arc<RatingSubmitter>,
    viewport: Arc<ScrollViewport>,
    intersections: mpsc::UnboundedReceiver<IntersectionBatch>,
}

fn build_gallery(
    config: &AppConfig,
    display: Arc<dyn DisplayPort>,
    geometry: ViewportGeometry,
) -> Result<Gallery> {
    let api: Arc<dyn ImageApiPort> =
        Arc::new(HttpImageApi::new(&config.server_url, config.http.timeout())?);
    let (viewport, intersections) = ScrollViewport::new(geometry);
    let viewport = Arc::new(viewport);
    let retry = config.retry.policy();

    let loader = Arc::new(
        GalleryLoader::new(api.clone(), display, viewport.clone()).with_retry(retry),
    );
    let submitter = Arc::new(RatingSubmitter::new(api, loader.clone()).with_retry(retry));

    Ok(Gallery {
        loader,
        submitter,
        viewport,
        intersections,
    })
}

async fn browse(config: &AppConfig) -> Result<()> {
    let mut terminal = ratatui::init();
    let height = terminal
        .size()
        .map_or(0, |size| size.height.saturating_sub(STATUS_LINES));
    let geometry = ViewportGeometry::new(config.viewport.row_height, u32::from(height));

    let display = Arc::new(TerminalDisplay::new());
    let result = match build_gallery(config, display.clone(), geometry) {
        Ok(gallery) => {
            let app = App::new(
                gallery.loader,
                gallery.submitter,
                display,
                gallery.viewport,
                gallery.intersections,
            );
            app.run(&mut terminal).await
        }
        Err(e) => Err(e),
    };

    ratatui::restore();
    result
}

async fn export(config: &AppConfig, offset: u32, out: Option<&Path>) -> Result<()> {
    let document = Arc::new(HtmlDocument::new());
    let geometry = ViewportGeometry::new(config.viewport.row_height, config.viewport.height);
    let mut gallery = build_gallery(config, document.clone(), geometry)?;

    let outcome = gallery.loader.load().await;
    gallery.viewport.scroll_to(offset);
    gallery.viewport.flush();
    while let Ok(batch) = gallery.intersections.try_recv() {
        gallery.loader.handle_intersections(&batch).await;
    }

    let page = document.to_page("Gallery");
    match out {
        Some(path) => std::fs::write(path, page)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().lock().write_all(page.as_bytes())?,
    }

    let outcome = outcome?;
    info!(outcome = ?outcome, "Export finished");
    Ok(())
}

async fn rate(config: &AppConfig, control_id: &str) -> Result<()> {
    let document = Arc::new(HtmlDocument::new());
    let geometry = ViewportGeometry::new(config.viewport.row_height, config.viewport.height);
    let gallery = build_gallery(config, document, geometry)?;

    match gallery.submitter.submit(control_id).await? {
        SubmitOutcome::Submitted { selection, reload } => {
            println!("Rated {} with {} stars", selection.record_id, selection.star);
            info!(reload = ?reload, "Gallery reloaded after rating");
        }
        SubmitOutcome::Ignored { selection } => {
            println!("Ignored {selection}: update already in flight");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = lazy_gallery::VERSION,
        server = %config.server_url,
        "Starting {}",
        lazy_gallery::NAME
    );

    match args.command() {
        Command::Browse => browse(&config).await,
        Command::Export { offset, out } => export(&config, offset, out.as_deref()).await,
        Command::Rate { control_id } => rate(&config, &control_id).await,
    }
}
