use std::time::Duration;

use super::easing::Easing;
use super::timing::{is_complete, lerp, progress};

/// What happens when a timeline reaches its end value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Stop at the end value and report [`TimelineEvent::Completed`]
    Once,
    /// Wrap back to the start value and report [`TimelineEvent::Repeated`]
    InfiniteRestart,
}

/// Notification produced by a timeline transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// One iteration of an infinite timeline finished
    Repeated,
    /// A one-shot timeline reached its end value
    Completed,
    /// The timeline was stopped before finishing
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Paused,
}

/// Tickable value animation
///
/// Owners advance it with `tick()` once per frame and read `value()`. The
/// return value of `tick()` and `cancel()` stands in for completion, repeat and
/// cancellation callbacks, so an owner can drive a state machine off it
/// without holding closures that borrow back into itself.
#[derive(Debug, Clone)]
pub struct Timeline {
    duration: Duration,
    from: f64,
    to: f64,
    repeat: RepeatPolicy,
    easing: Easing,
    elapsed: Duration,
    state: RunState,
    value: f64,
}

impl Timeline {
    pub fn new(
        duration: Duration,
        from: f64,
        to: f64,
        repeat: RepeatPolicy,
        easing: impl Into<Easing>,
    ) -> Self {
        Self {
            duration,
            from,
            to,
            repeat,
            easing: easing.into(),
            elapsed: Duration::ZERO,
            state: RunState::Idle,
            value: from,
        }
    }

    /// Change the start and end values used by the next `start()`
    pub fn set_range(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn range(&self) -> (f64, f64) {
        (self.from, self.to)
    }

    /// Start from the beginning, discarding any run in progress
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = RunState::Running;
        self.value = self.from;
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
        }
    }

    /// Stop without reaching the end value
    ///
    /// Returns `Some(Cancelled)` only if the timeline was running or paused.
    pub fn cancel(&mut self) -> Option<TimelineEvent> {
        if self.state == RunState::Idle {
            return None;
        }
        self.state = RunState::Idle;
        Some(TimelineEvent::Cancelled)
    }

    /// Jump straight to the end value as if the remaining time had elapsed
    pub fn finish(&mut self) -> Option<TimelineEvent> {
        if self.state == RunState::Idle {
            return None;
        }
        self.state = RunState::Running;
        let remaining = self.duration.saturating_sub(self.elapsed);
        self.tick(remaining)
    }

    /// Started and not yet ended; paused timelines count as running
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state != RunState::Idle
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Most recent interpolated value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by `dt` and update the current value
    pub fn tick(&mut self, dt: Duration) -> Option<TimelineEvent> {
        if self.state != RunState::Running {
            return None;
        }

        self.elapsed += dt;

        if is_complete(self.elapsed, self.duration) {
            self.value = self.to;
            match self.repeat {
                RepeatPolicy::Once => {
                    self.state = RunState::Idle;
                    Some(TimelineEvent::Completed)
                }
                RepeatPolicy::InfiniteRestart => {
                    self.elapsed = if self.duration.is_zero() {
                        Duration::ZERO
                    } else {
                        let over = self.elapsed - self.duration;
                        Duration::from_nanos(
                            (over.as_nanos() % self.duration.as_nanos()) as u64,
                        )
                    };
                    Some(TimelineEvent::Repeated)
                }
            }
        } else {
            let t = progress(self.elapsed, self.duration);
            self.value = lerp(self.from, self.to, self.easing.apply(t));
            None
        }
    }
}
