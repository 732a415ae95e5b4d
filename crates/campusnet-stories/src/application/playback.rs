//! Async playback driver.
//!
//! A [`PlaybackSession`] runs one [`StorySequencer`] on a dedicated tokio
//! task. The task owns at most one `Interval`: the one armed for the image
//! currently on screen. Navigation, media reports and close requests are
//! serialized through a channel and take priority over pending ticks, so a
//! close is always handled before any tick that was due behind it.

use std::sync::Arc;
use std::time::Duration;

use campusnet_core::repository::StoryRepository;
use campusnet_core::story::{MediaKind, StoryItem};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, interval_at};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::command_handlers::handle_mark_story_viewed;
use crate::domain::commands::MarkStoryViewed;
use crate::domain::playback::{
    PlaybackConfig, PlaybackEffect, PlaybackInput, SourceId, StorySequencer,
};

/// What the presentation layer is told.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A new item is on screen. For videos, media reports must carry
    /// `source`.
    Showing {
        /// Position in the item sequence.
        index: usize,
        /// The story shown.
        story_id: Uuid,
        /// Its media kind.
        media_kind: MediaKind,
        /// The progress source for this item.
        source: SourceId,
    },
    /// Progress of the current item, as a percentage.
    Progress {
        /// Position in the item sequence.
        index: usize,
        /// Percentage in `[0, 100]`.
        percent: f64,
    },
    /// The session ended; dismiss the viewer.
    Closed,
}

/// Handle to a running playback session.
///
/// Dropping the handle aborts the session task, which releases its timer.
#[derive(Debug)]
pub struct PlaybackSession {
    inputs: mpsc::UnboundedSender<PlaybackInput>,
    events: mpsc::UnboundedReceiver<PlaybackEvent>,
    task: JoinHandle<()>,
}

impl PlaybackSession {
    /// Starts playing `items` for `viewer_id` from `initial_index`.
    ///
    /// View marks are written through `repository` without being awaited;
    /// failures are logged and otherwise ignored.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        items: Vec<StoryItem>,
        initial_index: usize,
        viewer_id: Uuid,
        config: PlaybackConfig,
        repository: Arc<dyn StoryRepository>,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let sequencer = StorySequencer::new(items, viewer_id, config);
        let task = tokio::spawn(run(
            sequencer,
            initial_index,
            input_rx,
            event_tx,
            repository,
        ));
        Self {
            inputs: input_tx,
            events: event_rx,
            task,
        }
    }

    /// Skips to the next item, closing after the last.
    pub fn next(&self) {
        self.send(PlaybackInput::Next);
    }

    /// Goes back one item. Ignored on the first.
    pub fn previous(&self) {
        self.send(PlaybackInput::Previous);
    }

    /// Ends the session.
    pub fn close(&self) {
        self.send(PlaybackInput::Close);
    }

    /// Forwards the video clock for the item playing under `source`.
    pub fn report_media_progress(
        &self,
        source: SourceId,
        position: Duration,
        duration: Option<Duration>,
    ) {
        self.send(PlaybackInput::MediaProgress {
            source,
            position,
            duration,
        });
    }

    /// Reports that the video under `source` finished.
    pub fn report_media_ended(&self, source: SourceId) {
        self.send(PlaybackInput::MediaEnded(source));
    }

    /// Reports that the video under `source` could not be loaded.
    pub fn report_media_failed(&self, source: SourceId) {
        self.send(PlaybackInput::MediaFailed(source));
    }

    /// Waits for the next event. Returns `None` once the session has closed
    /// and every event has been received.
    pub async fn next_event(&mut self) -> Option<PlaybackEvent> {
        self.events.recv().await
    }

    /// Returns `true` once the session task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn send(&self, input: PlaybackInput) {
        if self.inputs.send(input).is_err() {
            debug!(?input, "playback session already closed");
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The single timer a session may hold.
struct ArmedTimer {
    source: SourceId,
    interval: Interval,
}

impl ArmedTimer {
    fn new(source: SourceId, period: Duration) -> Self {
        Self {
            source,
            interval: interval_at(Instant::now() + period, period),
        }
    }
}

async fn next_tick(timer: &mut Option<ArmedTimer>) -> SourceId {
    match timer {
        Some(armed) => {
            armed.interval.tick().await;
            armed.source
        }
        None => std::future::pending().await,
    }
}

async fn run(
    mut sequencer: StorySequencer,
    initial_index: usize,
    mut inputs: mpsc::UnboundedReceiver<PlaybackInput>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
    repository: Arc<dyn StoryRepository>,
) {
    let mut timer: Option<ArmedTimer> = None;
    let mut closed = carry_out(
        sequencer.start(initial_index),
        &mut timer,
        &events,
        &repository,
    );

    while !closed {
        let input = tokio::select! {
            biased;
            received = inputs.recv() => received.unwrap_or(PlaybackInput::Close),
            source = next_tick(&mut timer) => PlaybackInput::Tick(source),
        };
        closed = carry_out(sequencer.handle(input), &mut timer, &events, &repository);
    }

    debug!("playback session finished");
}

/// Applies effects in order. Returns `true` once the session has closed.
fn carry_out(
    effects: Vec<PlaybackEffect>,
    timer: &mut Option<ArmedTimer>,
    events: &mpsc::UnboundedSender<PlaybackEvent>,
    repository: &Arc<dyn StoryRepository>,
) -> bool {
    for effect in effects {
        match effect {
            PlaybackEffect::StartTimer { source, period } => {
                debug_assert!(timer.is_none(), "timer armed twice");
                *timer = Some(ArmedTimer::new(source, period));
            }
            PlaybackEffect::SubscribeMedia { source, story_id } => {
                debug!(?source, %story_id, "awaiting media clock reports");
            }
            PlaybackEffect::Cancel(source) => {
                if timer.as_ref().is_some_and(|armed| armed.source == source) {
                    *timer = None;
                }
            }
            PlaybackEffect::Showing {
                index,
                story_id,
                media_kind,
                source,
            } => emit(
                events,
                PlaybackEvent::Showing {
                    index,
                    story_id,
                    media_kind,
                    source,
                },
            ),
            PlaybackEffect::MarkViewed {
                story_id,
                viewer_id,
            } => dispatch_mark_viewed(Arc::clone(repository), story_id, viewer_id),
            PlaybackEffect::Progress { index, percent } => {
                emit(events, PlaybackEvent::Progress { index, percent });
            }
            PlaybackEffect::Closed => {
                *timer = None;
                emit(events, PlaybackEvent::Closed);
                return true;
            }
        }
    }
    false
}

fn emit(events: &mpsc::UnboundedSender<PlaybackEvent>, event: PlaybackEvent) {
    if events.send(event).is_err() {
        debug!("playback listener dropped");
    }
}

fn dispatch_mark_viewed(repository: Arc<dyn StoryRepository>, story_id: Uuid, viewer_id: Uuid) {
    tokio::spawn(async move {
        let command = MarkStoryViewed {
            correlation_id: Uuid::new_v4(),
            story_id,
            viewer_id,
        };
        if let Err(e) = handle_mark_story_viewed(&command, repository.as_ref()).await {
            warn!(error = %e, %story_id, %viewer_id, "failed to record story view");
        }
    });
}
