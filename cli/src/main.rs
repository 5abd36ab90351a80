mod output;

use std::time::Duration;

use canvas::doc::{
    BackgroundType, BroadcastPatch, NewPresentation, PresentationId, SlideId, SlideTemplate, ViewerAnimation,
    ViewerSize,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use relay::config::SyncConfig;
use relay::http::HttpStore;
use relay::store::{PresentationCatalog, PresentationSource, PresentationStore, StoreError};
use relay::viewer::{ViewerScene, ViewerSync};
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("nothing to change; pass at least one broadcast flag")]
    EmptyBroadcast,
    #[error("viewer stopped unexpectedly")]
    ViewerStopped,
    #[error("signal handler failed: {0}")]
    Signal(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "slidecast-cli", about = "Slidecast presentation and broadcast CLI")]
struct Cli {
    #[arg(long, env = "SLIDECAST_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is up.
    Ping,
    /// List presentations.
    List,
    /// Create an empty presentation.
    Create {
        #[arg(long, default_value = "Untitled Presentation")]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Print a presentation and its slides.
    Show {
        presentation_id: PresentationId,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Add a slide, centered on the canvas unless a position is given.
    AddSlide(AddSlideArgs),
    /// Set the presented slide.
    Goto {
        presentation_id: PresentationId,
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        slide_id: Option<SlideId>,
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
    /// Start or stop presenting.
    Present {
        presentation_id: PresentationId,
        action: PresentAction,
    },
    /// Change what viewers see while waiting or live.
    Broadcast(BroadcastArgs),
    /// Mirror a presentation like a viewer and print every scene change.
    Watch { presentation_id: PresentationId },
}

#[derive(Args, Debug)]
struct AddSlideArgs {
    presentation_id: PresentationId,
    #[arg(long, default_value = "blank")]
    template: SlideTemplate,
    #[arg(long, requires = "y")]
    x: Option<f64>,
    #[arg(long, requires = "x")]
    y: Option<f64>,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct BroadcastArgs {
    presentation_id: PresentationId,
    #[arg(long)]
    background: Option<BackgroundType>,
    #[arg(long)]
    animation: Option<ViewerAnimation>,
    /// Seconds until the presentation starts; 0 clears the countdown.
    #[arg(long)]
    countdown: Option<u32>,
    #[arg(long)]
    ring: Option<bool>,
    #[arg(long)]
    size: Option<ViewerSize>,
}

impl BroadcastArgs {
    fn patch(&self) -> BroadcastPatch {
        BroadcastPatch {
            is_presenting: None,
            show_slide_ring: self.ring,
            viewer_size: self.size,
            background_type: self.background,
            viewer_animation: self.animation,
            viewer_countdown_seconds: self.countdown,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PresentAction {
    Start,
    Stop,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = SyncConfig::from_env();
    let store = HttpStore::new(cli.base_url.as_str(), config.http_timeout)?;

    match cli.command {
        Command::Ping => run_ping(&cli.base_url, config.http_timeout).await,
        Command::List => {
            for summary in store.list_presentations().await? {
                println!("{}", output::summary_line(&summary));
            }
            Ok(())
        }
        Command::Create { title, description } => {
            let created = store.create_presentation(NewPresentation { title, description }).await?;
            println!("{}", created.id);
            Ok(())
        }
        Command::Show { presentation_id, json } => {
            let presentation = store.get_presentation(presentation_id).await?;
            if json {
                return print_json(&presentation);
            }
            for line in output::presentation_lines(&presentation) {
                println!("{line}");
            }
            Ok(())
        }
        Command::AddSlide(args) => run_add_slide(&store, args).await,
        Command::Goto { presentation_id, slide_id, clear } => {
            let target = if clear { None } else { slide_id };
            store.set_current_slide(presentation_id, target).await?;
            Ok(())
        }
        Command::Present { presentation_id, action } => {
            let on = matches!(action, PresentAction::Start);
            let fields = store.set_broadcast_fields(presentation_id, BroadcastPatch::presenting(on)).await?;
            print_json(&fields)
        }
        Command::Broadcast(args) => {
            let patch = args.patch();
            if patch.is_empty() {
                return Err(CliError::EmptyBroadcast);
            }
            let fields = store.set_broadcast_fields(args.presentation_id, patch).await?;
            print_json(&fields)
        }
        Command::Watch { presentation_id } => run_watch(store, presentation_id, config).await,
    }
}

async fn run_ping(base_url: &str, timeout: Duration) -> Result<(), CliError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_add_slide(store: &HttpStore, args: AddSlideArgs) -> Result<(), CliError> {
    let (x, y) = match (args.x, args.y) {
        (Some(x), Some(y)) => (x, y),
        _ => output::centered_origin(args.template),
    };
    let mut new_slide = args.template.new_slide(x, y);
    if let Some(title) = args.title {
        new_slide.title = Some(title);
    }
    let slide = store.create_slide(args.presentation_id, new_slide).await?;
    print_json(&slide)
}

/// Headless viewer: poll like a browser viewer would and print each scene until
/// Ctrl-C.
async fn run_watch(store: HttpStore, presentation_id: PresentationId, config: SyncConfig) -> Result<(), CliError> {
    let (tx, mut rx) = watch::channel(ViewerScene::Loading);
    let viewer = ViewerSync::new(store, presentation_id, config);
    let handle = tokio::spawn(viewer.run(tx));
    tracing::info!(%presentation_id, "watching; press Ctrl-C to stop");

    let result = loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break Err(CliError::ViewerStopped);
                }
                println!("{}", output::scene_line(&rx.borrow_and_update()));
            }
            signal = tokio::signal::ctrl_c() => break signal.map_err(CliError::from),
        }
    };
    drop(rx);
    if let Err(e) = handle.await {
        tracing::warn!(error = %e, "viewer task ended abnormally");
    }
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
