use std::time::Duration;

use anyhow::{Context, Result};
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::audio::AudioOutput;
use crate::error::Error;
use crate::events::InputEvent;
use crate::invitation::{Invitation, Status};
use crate::render::Renderer;
use crate::timer::{Timer, TimerHandle};

/// Owns the invitation and feeds it every event, one at a time.
///
/// Rules:
/// - Input events, autoplay ticks and transition completions are handled
///   strictly in arrival order; each handler runs to completion.
/// - Every animated render (re)arms a deadline `transition` from now; when it
///   elapses the carousel is told the transition finished.
/// - A request for a slide that does not exist is logged and dropped; render,
///   timer and audio failures end the task.
/// - The latest [`Status`] is published on `status_tx` after every event.
pub async fn run<R, T, A>(
    mut invitation: Invitation<R, T, A>,
    mut input_rx: Receiver<InputEvent>,
    mut tick_rx: Receiver<TimerHandle>,
    status_tx: watch::Sender<Status>,
    transition: Duration,
    cancel: CancellationToken,
) -> Result<Status>
where
    R: Renderer,
    T: Timer,
    A: AudioOutput,
{
    invitation.start().context("failed to start carousel")?;
    status_tx.send_replace(invitation.status());
    let mut seen_frame = invitation.carousel().frame();
    let mut deadline: Option<Instant> = None;

    loop {
        let event = select! {
            _ = cancel.cancelled() => break,

            maybe_input = input_rx.recv() => match maybe_input {
                Some(input) => input,
                None => {
                    info!("input closed; stopping carousel");
                    break;
                }
            },

            Some(handle) = tick_rx.recv() => InputEvent::AutoplayTick(handle),

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                InputEvent::TransitionFinished
            }
        };

        match invitation.handle(event) {
            Ok(response) => {
                if response.prevent_default {
                    debug!(?event, "default action suppressed");
                }
            }
            Err(Error::InvalidSlide { index, count }) => {
                warn!(index, count, "ignoring request for missing slide");
            }
            Err(err) => return Err(err).context("carousel event failed"),
        }

        let carousel = invitation.carousel();
        if carousel.frame() != seen_frame {
            seen_frame = carousel.frame();
            deadline = carousel
                .transition_pending()
                .then(|| Instant::now() + transition);
        }
        status_tx.send_replace(invitation.status());
    }

    invitation.carousel_mut().pause_autoplay();
    let status = invitation.status();
    status_tx.send_replace(status);
    info!(
        current = status.current_slide,
        total = status.total_slides,
        audio = status.audio.glyph(),
        "carousel stopped"
    );
    Ok(status)
}
