//! Binary entrypoint: runs the invitation carousel headlessly, driven from the console.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use invitation_carousel::audio::TrackAudio;
use invitation_carousel::carousel::CarouselController;
use invitation_carousel::config::Configuration;
use invitation_carousel::events::InputEvent;
use invitation_carousel::gesture::SwipeTracker;
use invitation_carousel::invitation::Invitation;
use invitation_carousel::particles;
use invitation_carousel::render::TracingRenderer;
use invitation_carousel::tasks::{console, driver, preload, timer::TokioTimer};
use invitation_carousel::timer::TimerHandle;
use invitation_carousel::track::PaddedTrack;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::BufReader;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(
    name = "invitation-carousel",
    version,
    about = "Infinite invitation carousel driven from the console"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "invitation.yaml")]
    config: PathBuf,

    /// Override the autoplay delay (e.g. "4s", "1500ms")
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    autoplay_delay: Option<Duration>,

    /// Deterministic seed for the particle layout
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("invitation_carousel={level}")
            .parse()
            .context("invalid log directive")?,
    );
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = Configuration::from_yaml_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?
        .with_autoplay_delay(cli.autoplay_delay)
        .validated()
        .context("validating configuration")?;
    info!(
        slides = cfg.slides.len(),
        autoplay = %humantime::format_duration(cfg.autoplay_delay),
        "loaded configuration from {}",
        cli.config.display()
    );

    let track = PaddedTrack::new(cfg.slides());
    for report in preload::run(track.real_slides()).await {
        debug!(slide = report.slide, status = ?report.status, "asset");
    }

    let mut rng = match cli.seed.or(cfg.particles.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    for p in particles::scatter(cfg.particles.count, &mut rng) {
        debug!(
            left = p.left_pct,
            top = p.top_pct,
            size = p.size_px,
            delay = ?p.delay,
            duration = ?p.duration,
            "particle"
        );
    }

    let cancel = CancellationToken::new();
    let (input_tx, input_rx) = mpsc::channel::<InputEvent>(32); // Console -> Driver
    let (tick_tx, tick_rx) = mpsc::channel::<TimerHandle>(4); // Timer -> Driver

    let carousel = CarouselController::new(
        track.clone(),
        TracingRenderer::new(track, cfg.slide_width),
        TokioTimer::new(tick_tx, cancel.child_token()),
        cfg.autoplay_delay,
    );
    let invitation = Invitation::new(
        carousel,
        SwipeTracker::new(cfg.swipe_threshold_px),
        TrackAudio::new(cfg.audio.as_ref().map(|a| a.track.clone())),
    );
    let (status_tx, status_rx) = watch::channel(invitation.status());

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            console::run(
                BufReader::new(tokio::io::stdin()),
                input_tx,
                status_rx,
                cancel,
            )
            .await
            .context("console task failed")
        }
    });

    tasks.spawn({
        let cancel = cancel.clone();
        let transition = cfg.transition;
        async move {
            let status = driver::run(
                invitation,
                input_rx,
                tick_rx,
                status_tx,
                transition,
                cancel.clone(),
            )
            .await
            .context("driver task failed");
            // The console blocks on stdin; stop it once the carousel is gone.
            cancel.cancel();
            status.map(|_| ())
        }
    });

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                cancel.cancel();
                return Err(err);
            }
            Err(join_err) => {
                cancel.cancel();
                return Err(join_err).context("task panicked");
            }
        }
    }
    Ok(())
}
