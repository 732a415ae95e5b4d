//! Story playback sequencing.
//!
//! [`StorySequencer`] is a synchronous state machine. It never touches a
//! clock or a network: callers feed it [`PlaybackInput`]s (timer ticks,
//! media progress reports, user navigation) and carry out the
//! [`PlaybackEffect`]s it returns. The async driver lives in
//! `application::playback`.
//!
//! While `Playing`, the state owns exactly one [`ProgressSource`]. Leaving
//! the state always emits [`PlaybackEffect::Cancel`] for that source before
//! a new one is armed, and inputs addressed to any other source are
//! dropped, so a stale timer can never move the session.

use std::collections::HashSet;
use std::time::Duration;

use campusnet_core::error::DomainError;
use campusnet_core::story::{MediaKind, StoryItem};
use tracing::debug;
use uuid::Uuid;

/// How long an image stays on screen.
pub const DEFAULT_IMAGE_DURATION: Duration = Duration::from_secs(5);

/// Sampling period of the image progress timer.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Timing rules for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    image_duration: Duration,
    tick_interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            image_duration: DEFAULT_IMAGE_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl PlaybackConfig {
    /// Creates a playback configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either duration is zero or the
    /// tick is longer than the image duration.
    pub fn new(image_duration: Duration, tick_interval: Duration) -> Result<Self, DomainError> {
        if image_duration.is_zero() || tick_interval.is_zero() {
            return Err(DomainError::Validation(
                "playback durations must be positive".to_owned(),
            ));
        }
        if tick_interval > image_duration {
            return Err(DomainError::Validation(
                "tick interval cannot exceed the image duration".to_owned(),
            ));
        }
        Ok(Self {
            image_duration,
            tick_interval,
        })
    }

    /// How long an image stays on screen.
    #[must_use]
    pub fn image_duration(&self) -> Duration {
        self.image_duration
    }

    /// Sampling period of the image progress timer.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

/// Identifies one armed timer or media subscription. Never reused within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

/// What drives progress for the item on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    /// A periodic timer (image items).
    Timer(SourceId),
    /// The media element's own playback clock (video items).
    Media(SourceId),
}

impl ProgressSource {
    /// The identifier inputs must carry to be accepted.
    #[must_use]
    pub fn id(self) -> SourceId {
        match self {
            Self::Timer(id) | Self::Media(id) => id,
        }
    }
}

/// Sequencer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// Created but not started.
    Idle,
    /// Showing `index`.
    Playing {
        /// Position in the item sequence.
        index: usize,
        /// Time spent on this item so far.
        elapsed: Duration,
        /// Total length of this item, once known.
        length: Option<Duration>,
        /// The one timer or subscription live for this item.
        source: ProgressSource,
    },
    /// Terminal.
    Closed,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackInput {
    /// The image timer fired.
    Tick(SourceId),
    /// The video reported its playback position.
    MediaProgress {
        /// The subscription reporting.
        source: SourceId,
        /// Current playback position.
        position: Duration,
        /// Total length, if the media could determine it.
        duration: Option<Duration>,
    },
    /// The video played to the end.
    MediaEnded(SourceId),
    /// The video could not be loaded.
    MediaFailed(SourceId),
    /// User asked for the next item.
    Next,
    /// User asked for the previous item.
    Previous,
    /// User dismissed the viewer.
    Close,
}

/// Work the caller must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEffect {
    /// Arm a periodic timer that reports `Tick(source)` every `period`.
    StartTimer {
        /// Identifier the ticks must carry.
        source: SourceId,
        /// Tick period.
        period: Duration,
    },
    /// Start forwarding the media clock of `story_id` as `source`.
    SubscribeMedia {
        /// Identifier the reports must carry.
        source: SourceId,
        /// The video being played.
        story_id: Uuid,
    },
    /// Tear down the timer or subscription `source`.
    Cancel(SourceId),
    /// A new item is on screen.
    Showing {
        /// Position in the item sequence.
        index: usize,
        /// The story now shown.
        story_id: Uuid,
        /// Its media kind.
        media_kind: MediaKind,
        /// The source driving its progress.
        source: SourceId,
    },
    /// Record the viewer in the story's viewed-by set. Fire and forget.
    MarkViewed {
        /// The story shown.
        story_id: Uuid,
        /// The viewer.
        viewer_id: Uuid,
    },
    /// Progress of the current item changed.
    Progress {
        /// Position in the item sequence.
        index: usize,
        /// Percentage in `[0, 100]`.
        percent: f64,
    },
    /// The session ended; the viewer should be dismissed.
    Closed,
}

/// Plays an ordered, caller-supplied list of stories for one viewer.
#[derive(Debug)]
pub struct StorySequencer {
    items: Vec<StoryItem>,
    viewer_id: Uuid,
    config: PlaybackConfig,
    state: PlaybackState,
    next_source: u64,
    marked: HashSet<Uuid>,
}

impl StorySequencer {
    /// Creates an idle sequencer.
    #[must_use]
    pub fn new(items: Vec<StoryItem>, viewer_id: Uuid, config: PlaybackConfig) -> Self {
        Self {
            items,
            viewer_id,
            config,
            state: PlaybackState::Idle,
            next_source: 0,
            marked: HashSet::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Index on screen, if playing.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Playing { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Progress of the item on screen as a percentage, if playing.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self.state {
            PlaybackState::Playing {
                elapsed, length, ..
            } => Some(percent(elapsed, length)),
            _ => None,
        }
    }

    /// Returns `true` once the session has ended.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == PlaybackState::Closed
    }

    /// Starts playback at `initial_index`, clamped into range. An empty
    /// sequence closes immediately. Has no effect unless idle.
    pub fn start(&mut self, initial_index: usize) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if self.state != PlaybackState::Idle {
            return effects;
        }
        let Some(last) = self.items.len().checked_sub(1) else {
            self.close_into(&mut effects);
            return effects;
        };
        if initial_index > last {
            debug!(initial_index, last, "clamping out-of-range start index");
        }
        self.enter(initial_index.min(last), &mut effects);
        effects
    }

    /// Feeds one input to the state machine.
    pub fn handle(&mut self, input: PlaybackInput) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        match self.state {
            PlaybackState::Closed => {}
            PlaybackState::Idle => {
                if input == PlaybackInput::Close {
                    self.close_into(&mut effects);
                }
            }
            PlaybackState::Playing { index, source, .. } => match input {
                PlaybackInput::Next => self.advance(index, &mut effects),
                PlaybackInput::Previous => {
                    if index > 0 {
                        self.leave(&mut effects);
                        self.enter(index - 1, &mut effects);
                    }
                }
                PlaybackInput::Close => self.close_into(&mut effects),
                PlaybackInput::Tick(id) if source == ProgressSource::Timer(id) => {
                    self.on_tick(index, &mut effects);
                }
                PlaybackInput::MediaProgress {
                    source: id,
                    position,
                    duration,
                } if source == ProgressSource::Media(id) => {
                    self.on_media_progress(index, position, duration, &mut effects);
                }
                PlaybackInput::MediaEnded(id) if source == ProgressSource::Media(id) => {
                    self.advance(index, &mut effects);
                }
                PlaybackInput::MediaFailed(id) if source == ProgressSource::Media(id) => {
                    debug!(index, "media failed to load, skipping item");
                    self.advance(index, &mut effects);
                }
                stale => debug!(?stale, "dropping input for a cancelled source"),
            },
        }
        effects
    }

    fn on_tick(&mut self, index: usize, effects: &mut Vec<PlaybackEffect>) {
        let image_duration = self.config.image_duration;
        let tick = self.config.tick_interval;
        let PlaybackState::Playing { elapsed, .. } = &mut self.state else {
            return;
        };
        *elapsed = (*elapsed + tick).min(image_duration);
        let done = *elapsed >= image_duration;
        effects.push(PlaybackEffect::Progress {
            index,
            percent: percent(*elapsed, Some(image_duration)),
        });
        if done {
            self.advance(index, effects);
        }
    }

    fn on_media_progress(
        &mut self,
        index: usize,
        position: Duration,
        duration: Option<Duration>,
        effects: &mut Vec<PlaybackEffect>,
    ) {
        // Zero or unknown length counts as a load failure.
        let Some(total) = duration.filter(|d| !d.is_zero()) else {
            debug!(index, "media reported no duration, skipping item");
            self.advance(index, effects);
            return;
        };
        let PlaybackState::Playing {
            elapsed, length, ..
        } = &mut self.state
        else {
            return;
        };
        *elapsed = position.min(total);
        *length = Some(total);
        effects.push(PlaybackEffect::Progress {
            index,
            percent: percent(*elapsed, *length),
        });
        if position >= total {
            self.advance(index, effects);
        }
    }

    fn advance(&mut self, index: usize, effects: &mut Vec<PlaybackEffect>) {
        if index + 1 >= self.items.len() {
            self.close_into(effects);
        } else {
            self.leave(effects);
            self.enter(index + 1, effects);
        }
    }

    fn enter(&mut self, index: usize, effects: &mut Vec<PlaybackEffect>) {
        let id = SourceId(self.next_source);
        self.next_source += 1;

        let item = &self.items[index];
        let (source, length) = match item.media_kind {
            MediaKind::Image => {
                effects.push(PlaybackEffect::StartTimer {
                    source: id,
                    period: self.config.tick_interval,
                });
                (ProgressSource::Timer(id), Some(self.config.image_duration))
            }
            MediaKind::Video => {
                effects.push(PlaybackEffect::SubscribeMedia {
                    source: id,
                    story_id: item.id,
                });
                (ProgressSource::Media(id), None)
            }
        };
        effects.push(PlaybackEffect::Showing {
            index,
            story_id: item.id,
            media_kind: item.media_kind,
            source: id,
        });
        if !item.has_been_viewed_by(self.viewer_id) && self.marked.insert(item.id) {
            effects.push(PlaybackEffect::MarkViewed {
                story_id: item.id,
                viewer_id: self.viewer_id,
            });
        }
        effects.push(PlaybackEffect::Progress {
            index,
            percent: 0.0,
        });

        self.state = PlaybackState::Playing {
            index,
            elapsed: Duration::ZERO,
            length,
            source,
        };
    }

    fn leave(&mut self, effects: &mut Vec<PlaybackEffect>) {
        if let PlaybackState::Playing { source, .. } = self.state {
            effects.push(PlaybackEffect::Cancel(source.id()));
        }
    }

    fn close_into(&mut self, effects: &mut Vec<PlaybackEffect>) {
        self.leave(effects);
        self.state = PlaybackState::Closed;
        effects.push(PlaybackEffect::Closed);
    }
}

fn percent(elapsed: Duration, length: Option<Duration>) -> f64 {
    match length {
        Some(total) if !total.is_zero() => {
            (elapsed.as_secs_f64() / total.as_secs_f64() * 100.0).min(100.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusnet_test_support::{fixed_now, image_story, video_story};

    fn images(count: usize) -> Vec<StoryItem> {
        let owner = Uuid::new_v4();
        (0..count).map(|_| image_story(owner, fixed_now())).collect()
    }

    fn started(items: Vec<StoryItem>, at: usize) -> (StorySequencer, Vec<PlaybackEffect>) {
        let mut sequencer = StorySequencer::new(items, Uuid::new_v4(), PlaybackConfig::default());
        let effects = sequencer.start(at);
        (sequencer, effects)
    }

    fn progress(index: usize, percent: f64) -> PlaybackEffect {
        PlaybackEffect::Progress { index, percent }
    }

    fn current_source(sequencer: &StorySequencer) -> SourceId {
        match sequencer.state() {
            PlaybackState::Playing { source, .. } => source.id(),
            other => panic!("expected Playing, got {other:?}"),
        }
    }

    fn marked(effects: &[PlaybackEffect]) -> Vec<Uuid> {
        effects
            .iter()
            .filter_map(|e| match e {
                PlaybackEffect::MarkViewed { story_id, .. } => Some(*story_id),
                _ => None,
            })
            .collect()
    }

    /// Replays effects against a model of live timers/subscriptions and
    /// fails if two are ever live at once or a cancel targets nothing.
    fn track_live(live: &mut HashSet<SourceId>, effects: &[PlaybackEffect]) {
        for effect in effects {
            match effect {
                PlaybackEffect::StartTimer { source, .. }
                | PlaybackEffect::SubscribeMedia { source, .. } => {
                    assert!(live.is_empty(), "armed {source:?} while {live:?} live");
                    live.insert(*source);
                }
                PlaybackEffect::Cancel(source) => {
                    assert!(live.remove(source), "cancelled unknown {source:?}");
                }
                PlaybackEffect::Closed => assert!(live.is_empty()),
                _ => {}
            }
        }
    }

    fn run_ticks(sequencer: &mut StorySequencer, count: usize) -> Vec<PlaybackEffect> {
        let mut all = Vec::new();
        for _ in 0..count {
            let source = current_source(sequencer);
            all.extend(sequencer.handle(PlaybackInput::Tick(source)));
        }
        all
    }

    #[test]
    fn test_start_marks_initial_item_viewed_once() {
        // Arrange
        let items = images(3);
        let expected = items[1].id;

        // Act
        let (sequencer, effects) = started(items, 1);

        // Assert
        assert_eq!(sequencer.current_index(), Some(1));
        assert_eq!(marked(&effects), vec![expected]);
        assert_eq!(sequencer.progress(), Some(0.0));
    }

    #[test]
    fn test_start_skips_mark_when_viewer_already_listed() {
        // Arrange
        let viewer = Uuid::new_v4();
        let mut items = images(1);
        items[0].viewed_by.insert(viewer);
        let mut sequencer = StorySequencer::new(items, viewer, PlaybackConfig::default());

        // Act
        let effects = sequencer.start(0);

        // Assert
        assert!(marked(&effects).is_empty());
    }

    #[test]
    fn test_revisiting_item_does_not_mark_again() {
        // Arrange
        let (mut sequencer, first) = started(images(2), 0);

        // Act
        let forward = sequencer.handle(PlaybackInput::Next);
        let back = sequencer.handle(PlaybackInput::Previous);

        // Assert
        assert_eq!(marked(&first).len(), 1);
        assert_eq!(marked(&forward).len(), 1);
        assert!(marked(&back).is_empty());
    }

    #[test]
    fn test_empty_sequence_closes_without_playing() {
        // Act
        let (sequencer, effects) = started(Vec::new(), 0);

        // Assert
        assert_eq!(effects, vec![PlaybackEffect::Closed]);
        assert!(sequencer.is_closed());
    }

    #[test]
    fn test_out_of_range_start_clamps_to_last_item() {
        // Act
        let (sequencer, _) = started(images(3), 42);

        // Assert
        assert_eq!(sequencer.current_index(), Some(2));
    }

    #[test]
    fn test_start_twice_is_ignored() {
        // Arrange
        let (mut sequencer, _) = started(images(3), 0);

        // Act
        let effects = sequencer.start(2);

        // Assert
        assert!(effects.is_empty());
        assert_eq!(sequencer.current_index(), Some(0));
    }

    #[test]
    fn test_image_progress_reaches_exactly_100_at_five_seconds() {
        // Arrange
        let (mut sequencer, _) = started(images(2), 0);
        let ticks = 5000 / 50;

        // Act
        let effects = run_ticks(&mut sequencer, ticks);

        // Assert
        let percents: Vec<f64> = effects
            .iter()
            .filter_map(|e| match e {
                PlaybackEffect::Progress { index: 0, percent } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents.len(), ticks);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert!((percents[ticks - 2] - 99.0).abs() < 1e-9);
        assert!((percents[ticks - 1] - 100.0).abs() < f64::EPSILON);
        assert_eq!(sequencer.current_index(), Some(1));
        assert_eq!(sequencer.progress(), Some(0.0));
    }

    #[test]
    fn test_image_does_not_advance_before_duration() {
        // Arrange
        let (mut sequencer, _) = started(images(2), 0);

        // Act
        run_ticks(&mut sequencer, 99);

        // Assert
        assert_eq!(sequencer.current_index(), Some(0));
    }

    #[test]
    fn test_progress_clamps_when_duration_is_not_a_tick_multiple() {
        // Arrange
        let image_duration = Duration::from_millis(120);
        let config = PlaybackConfig::new(image_duration, DEFAULT_TICK_INTERVAL).unwrap();
        let mut sequencer = StorySequencer::new(images(1), Uuid::new_v4(), config);
        sequencer.start(0);

        // Act
        let effects = run_ticks(&mut sequencer, 3);

        // Assert
        assert!(effects.contains(&progress(0, 100.0)));
        assert!(sequencer.is_closed());
    }

    #[test]
    fn test_three_images_auto_advance_then_close() {
        // Arrange
        let (mut sequencer, first) = started(images(3), 0);
        let mut live = HashSet::new();
        track_live(&mut live, &first);
        let mut visited = vec![0];

        // Act
        while !sequencer.is_closed() {
            let source = current_source(&sequencer);
            let effects = sequencer.handle(PlaybackInput::Tick(source));
            track_live(&mut live, &effects);
            for effect in &effects {
                if let PlaybackEffect::Showing { index, .. } = effect {
                    visited.push(*index);
                }
            }
        }

        // Assert
        assert_eq!(visited, vec![0, 1, 2]);
        assert!(live.is_empty());
    }

    #[test]
    fn test_next_on_last_item_closes() {
        // Arrange
        let (mut sequencer, _) = started(images(2), 1);
        let source = current_source(&sequencer);

        // Act
        let effects = sequencer.handle(PlaybackInput::Next);

        // Assert
        assert_eq!(
            effects,
            vec![PlaybackEffect::Cancel(source), PlaybackEffect::Closed]
        );
    }

    #[test]
    fn test_previous_on_first_item_is_noop() {
        // Arrange
        let (mut sequencer, _) = started(images(2), 0);
        run_ticks(&mut sequencer, 10);
        let before = sequencer.state().clone();

        // Act
        let effects = sequencer.handle(PlaybackInput::Previous);

        // Assert
        assert!(effects.is_empty());
        assert_eq!(sequencer.state(), &before);
    }

    #[test]
    fn test_previous_resets_progress() {
        // Arrange
        let (mut sequencer, _) = started(images(3), 2);
        run_ticks(&mut sequencer, 40);
        let old = current_source(&sequencer);

        // Act
        let effects = sequencer.handle(PlaybackInput::Previous);

        // Assert
        assert_eq!(effects[0], PlaybackEffect::Cancel(old));
        assert_eq!(sequencer.current_index(), Some(1));
        assert_eq!(sequencer.progress(), Some(0.0));
    }

    #[test]
    fn test_stale_tick_after_navigation_is_ignored() {
        // Arrange
        let (mut sequencer, _) = started(images(3), 0);
        let stale = current_source(&sequencer);
        sequencer.handle(PlaybackInput::Next);

        // Act
        let effects = sequencer.handle(PlaybackInput::Tick(stale));

        // Assert
        assert!(effects.is_empty());
        assert_eq!(sequencer.current_index(), Some(1));
        assert_eq!(sequencer.progress(), Some(0.0));
    }

    #[test]
    fn test_rapid_navigation_keeps_one_live_source() {
        // Arrange
        let (mut sequencer, first) = started(images(4), 0);
        let mut live = HashSet::new();
        track_live(&mut live, &first);
        let inputs = [
            PlaybackInput::Next,
            PlaybackInput::Next,
            PlaybackInput::Previous,
            PlaybackInput::Next,
            PlaybackInput::Previous,
            PlaybackInput::Previous,
            PlaybackInput::Previous,
            PlaybackInput::Next,
            PlaybackInput::Close,
        ];

        // Act + Assert
        for input in inputs {
            let effects = sequencer.handle(input);
            track_live(&mut live, &effects);
            assert!(live.len() <= 1);
        }
        assert!(live.is_empty());
        assert!(sequencer.is_closed());
    }

    #[test]
    fn test_nothing_happens_after_close() {
        // Arrange
        let (mut sequencer, _) = started(images(2), 0);
        let source = current_source(&sequencer);
        let close = sequencer.handle(PlaybackInput::Close);

        let inputs = [
            PlaybackInput::Tick(source),
            PlaybackInput::Next,
            PlaybackInput::Previous,
            PlaybackInput::Close,
        ];

        // Act
        let after: Vec<PlaybackEffect> = inputs
            .into_iter()
            .flat_map(|input| sequencer.handle(input))
            .collect();

        // Assert
        assert_eq!(
            close,
            vec![PlaybackEffect::Cancel(source), PlaybackEffect::Closed]
        );
        assert!(after.is_empty());
    }

    #[test]
    fn test_close_from_idle() {
        // Arrange
        let items = images(2);
        let mut sequencer = StorySequencer::new(items, Uuid::new_v4(), PlaybackConfig::default());

        // Act
        let effects = sequencer.handle(PlaybackInput::Close);

        // Assert
        assert_eq!(effects, vec![PlaybackEffect::Closed]);
        assert!(sequencer.start(0).is_empty());
    }

    #[test]
    fn test_video_progress_follows_media_clock() {
        // Arrange
        let owner = Uuid::new_v4();
        let items = vec![
            video_story(owner, fixed_now()),
            image_story(owner, fixed_now()),
        ];
        let story_id = items[0].id;
        let (mut sequencer, effects) = started(items, 0);
        let source = current_source(&sequencer);
        let subscribe = PlaybackEffect::SubscribeMedia { source, story_id };
        assert!(effects.contains(&subscribe));

        // Act
        let halfway = sequencer.handle(PlaybackInput::MediaProgress {
            source,
            position: Duration::from_secs(3),
            duration: Some(Duration::from_secs(6)),
        });
        let tick = sequencer.handle(PlaybackInput::Tick(source));
        let done = sequencer.handle(PlaybackInput::MediaProgress {
            source,
            position: Duration::from_secs(6),
            duration: Some(Duration::from_secs(6)),
        });

        // Assert
        assert_eq!(halfway, vec![progress(0, 50.0)]);
        assert!(tick.is_empty());
        assert_eq!(done[1], PlaybackEffect::Cancel(source));
        assert_eq!(sequencer.current_index(), Some(1));
    }

    #[test]
    fn test_video_without_duration_advances_immediately() {
        // Arrange
        let owner = Uuid::new_v4();
        let items = vec![
            video_story(owner, fixed_now()),
            video_story(owner, fixed_now()),
        ];
        let (mut sequencer, _) = started(items, 0);
        let source = current_source(&sequencer);

        // Act
        sequencer.handle(PlaybackInput::MediaProgress {
            source,
            position: Duration::ZERO,
            duration: None,
        });

        // Assert
        assert_eq!(sequencer.current_index(), Some(1));
    }

    #[test]
    fn test_video_load_failure_on_last_item_closes() {
        // Arrange
        let items = vec![video_story(Uuid::new_v4(), fixed_now())];
        let (mut sequencer, _) = started(items, 0);
        let source = current_source(&sequencer);

        // Act
        let effects = sequencer.handle(PlaybackInput::MediaFailed(source));

        // Assert
        assert_eq!(effects.last(), Some(&PlaybackEffect::Closed));
        assert!(sequencer.is_closed());
    }

    #[test]
    fn test_media_ended_advances() {
        // Arrange
        let owner = Uuid::new_v4();
        let items = vec![
            video_story(owner, fixed_now()),
            image_story(owner, fixed_now()),
        ];
        let (mut sequencer, _) = started(items, 0);
        let source = current_source(&sequencer);

        // Act
        sequencer.handle(PlaybackInput::MediaEnded(source));

        // Assert
        assert_eq!(sequencer.current_index(), Some(1));
    }

    #[test]
    fn test_config_rejects_zero_and_oversized_tick() {
        // Arrange
        let short_image = Duration::from_millis(40);

        // Act
        let zero_image = PlaybackConfig::new(Duration::ZERO, DEFAULT_TICK_INTERVAL);
        let zero_tick = PlaybackConfig::new(DEFAULT_IMAGE_DURATION, Duration::ZERO);
        let oversized_tick = PlaybackConfig::new(short_image, DEFAULT_TICK_INTERVAL);

        // Assert
        assert!(zero_image.is_err());
        assert!(zero_tick.is_err());
        assert!(oversized_tick.is_err());
    }
}
