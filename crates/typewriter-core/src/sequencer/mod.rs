//! Typewriter animation sequencer
//!
//! Three timelines drive the refresh indicator:
//!
//! 1. page turn: the page slides into the carriage when a refresh starts
//! 2. carriage return: the carriage snaps back to its origin
//! 3. carriage sweep: an endless key-step cycle, one repeat per typed line
//!
//! They chain page turn → return → sweep, and every finished sweep runs the
//! return again before the sweep resumes. The chain is an explicit [`Stage`]
//! advanced by [`Sequencer::advance`]; the timelines never call back into the
//! sequencer.

pub mod keys;
pub mod phase;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::composer::{self, Geometry, PartMeasure, PartMetrics, Renderer};
use crate::config::{AnimationConfig, EasingType};
use crate::timeline::{Easing, RepeatPolicy, Timeline, TimelineEvent};

pub use keys::KeySlot;
pub use phase::{AnimationPhase, LineTypography, PageTypography, FIRST_STEP, LAST_STEP};

/// Full scale of a page level
pub const MAX_LEVEL: u16 = 10_000;

/// Return-snap start value for the first activation (carriage at its centre)
const FIRST_RETURN_FROM: f64 = 0.5;
/// Return-snap start value after a sweep (carriage at its far end)
const SWEEP_RETURN_FROM: f64 = 1.0;
const RETURN_TO: f64 = 0.01;
const PAGE_TURN_TO: f64 = 0.6;
/// Deceleration of the return snap and the page turn
const SNAP_DECELERATION: f32 = 2.0;
/// Divisor mapping a key step onto the carriage travel
const STEP_SPAN: f32 = 16.6;

/// Which timeline the sequencer is currently advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    TurningPage,
    ReturningCarriage,
    Typing,
}

/// Capability the refresh layout needs from its indicator
pub trait RefreshIndicator {
    fn set_bounds(&mut self, geometry: Geometry);
    fn draw(&mut self, measure: &dyn PartMeasure, renderer: &mut dyn Renderer);
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Typewriter animation state machine
#[derive(Debug)]
pub struct Sequencer {
    config: AnimationConfig,
    metrics: PartMetrics,
    geometry: Option<Geometry>,
    carriage: Timeline,
    carriage_return: Timeline,
    page_turn: Timeline,
    stage: Stage,
    phase: AnimationPhase,
    typography: PageTypography,
    /// Drag percent as last pushed; may exceed 1 or go negative
    percent: f32,
    /// Vertical offset of the indicator relative to the container top
    top: f32,
    carriage_x: f32,
    page_percent: f32,
    page_level: u16,
    page_back_level: u16,
    rng: StdRng,
    dirty: bool,
}

impl Sequencer {
    /// Create a sequencer, seeding the key picker from config when a seed is set
    pub fn new(config: AnimationConfig, metrics: PartMetrics) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, metrics, rng)
    }

    pub fn with_rng(config: AnimationConfig, metrics: PartMetrics, rng: StdRng) -> Self {
        let page_cycles = config.page_cycles.max(1) as usize;
        let carriage = Timeline::new(
            Duration::from_millis(config.carriage_duration_ms),
            FIRST_STEP as f64,
            LAST_STEP as f64,
            RepeatPolicy::InfiniteRestart,
            EasingType::Linear,
        );
        let carriage_return = Timeline::new(
            Duration::from_millis(config.carriage_return_duration_ms),
            FIRST_RETURN_FROM,
            RETURN_TO,
            RepeatPolicy::Once,
            Easing::decelerate(SNAP_DECELERATION),
        );
        let page_turn = Timeline::new(
            Duration::from_millis(config.page_turn_duration_ms),
            0.0,
            PAGE_TURN_TO,
            RepeatPolicy::Once,
            Easing::decelerate(SNAP_DECELERATION),
        );

        Self {
            config,
            metrics,
            geometry: None,
            carriage,
            carriage_return,
            page_turn,
            stage: Stage::Idle,
            phase: AnimationPhase::default(),
            typography: PageTypography::new(page_cycles),
            percent: 0.0,
            top: 0.0,
            carriage_x: 0.0,
            page_percent: 0.0,
            page_level: MAX_LEVEL,
            page_back_level: 0,
            rng,
            dirty: true,
        }
    }

    /// Start the refresh animation from a closed page
    pub fn start(&mut self) {
        self.cancel_all();
        self.phase.has_cycle_started = false;
        self.reset_origins();
        self.page_turn.start();
        self.phase.has_page_animation_started = true;
        self.stage = Stage::TurningPage;
        self.dirty = true;
        debug!("typewriter: page turn started");
    }

    /// Cancel everything and return to the origin state; safe from any stage
    pub fn stop(&mut self) {
        self.phase.has_cycle_started = false;
        self.phase.skip_animation = false;
        self.cancel_all();
        self.reset_origins();
        self.dirty = true;
        debug!("typewriter: stopped");
    }

    /// Whether the typing cycle has been started and not stopped
    pub fn is_running(&self) -> bool {
        self.phase.has_cycle_started
    }

    /// Store the drag percent; 0 while the sweep runs cancels it
    pub fn set_percent(&mut self, percent: f32, redraw: bool) {
        self.percent = percent;
        if percent == 0.0 && self.carriage.is_running() {
            self.cancel_animation();
        }
        if redraw {
            self.dirty = true;
        }
    }

    /// Move the indicator by `delta`
    pub fn offset_top_and_bottom(&mut self, delta: f32) {
        self.top += delta;
        self.dirty = true;
    }

    /// Place the indicator at an absolute vertical offset
    pub fn set_offset_top(&mut self, top: f32) {
        self.top = top;
        self.dirty = true;
    }

    pub fn set_skip_animation(&mut self, skip: bool) {
        self.phase.skip_animation = skip;
    }

    pub fn is_skip_animation(&self) -> bool {
        self.phase.skip_animation
    }

    /// Advance the active timeline by `dt` and follow the stage chain
    pub fn advance(&mut self, dt: Duration) {
        let skip = self.phase.skip_animation;
        match self.stage {
            Stage::Idle => return,
            Stage::TurningPage => {
                let event = if skip {
                    self.page_turn.finish()
                } else {
                    self.page_turn.tick(dt)
                };
                self.page_percent = if skip { 0.0 } else { self.page_turn.value() as f32 };
                self.page_back_level = (2000.0 + self.page_percent * 9000.0).round() as u16;
                self.page_level =
                    (MAX_LEVEL as f32 * (1.0 - self.page_percent)).round() as u16;
                if event == Some(TimelineEvent::Completed) {
                    self.phase.has_page_animation_started = false;
                    self.carriage_return.start();
                    self.stage = Stage::ReturningCarriage;
                    debug!("typewriter: page turned, returning carriage");
                }
            }
            Stage::ReturningCarriage => {
                let event = if skip {
                    self.carriage_return.finish()
                } else {
                    self.carriage_return.tick(dt)
                };
                let value = self.carriage_return.value() as f32;
                let offset = self.metrics.carriage_offset;
                self.carriage_x = -offset + offset * 2.0 * value;
                if event == Some(TimelineEvent::Completed) {
                    self.on_return_completed();
                }
            }
            Stage::Typing => {
                let event = self.carriage.tick(dt);
                let step = self.carriage.value().floor() as u8;
                self.phase.current_step = step.clamp(FIRST_STEP, LAST_STEP);
                if event == Some(TimelineEvent::Repeated) {
                    self.on_sweep_completed();
                }
            }
        }
        self.dirty = true;
    }

    /// Frame-advance: decide whether a key is typed this frame and move the carriage
    ///
    /// Called once per rendered frame, before composing it.
    pub fn advance_frame(&mut self) {
        let is_new_step = self.phase.current_step != self.phase.last_typed_step;
        self.phase.last_typed_step = self.phase.current_step;
        let should_type =
            self.phase.has_cycle_started && is_new_step && !self.carriage_return.is_running();

        if should_type {
            let previous = self.phase.pressed_key;
            self.phase.pressed_key = KeySlot::random_key(&mut self.rng);
            if self.should_press_space(previous) {
                self.phase.pressed_key = KeySlot::Space;
            }
        }

        let offset = self.metrics.carriage_offset;
        let mut target_x = -offset;
        if self.phase.has_cycle_started {
            target_x += offset * 2.0 * (self.phase.current_step as f32 / STEP_SPAN);
        }

        if should_type {
            let cycle = self.phase.page_cycle as usize;
            let space = self.phase.pressed_key.is_space();
            let motion = target_x - self.carriage_x;
            let first_step = self.phase.current_step == FIRST_STEP;
            if let Some(line) = self.typography.line_mut(cycle) {
                if !first_step {
                    line.record(motion, space);
                }
                line.letters += 1;
            }
            self.carriage_x = target_x;
        }
    }

    fn should_press_space(&mut self, previous: KeySlot) -> bool {
        !previous.is_space() && self.rng.gen_bool(self.config.space_probability.clamp(0.0, 1.0))
    }

    fn on_return_completed(&mut self) {
        if !self.phase.has_cycle_started {
            self.phase.has_cycle_started = true;
            self.carriage_x = -self.metrics.carriage_offset;
            self.carriage.start();
            self.carriage_return.set_range(SWEEP_RETURN_FROM, RETURN_TO);
            debug!("typewriter: typing started");
        } else {
            self.carriage.resume();
        }
        self.stage = Stage::Typing;
    }

    fn on_sweep_completed(&mut self) {
        self.carriage.pause();
        self.carriage_return.start();
        self.stage = Stage::ReturningCarriage;
        if self.phase.page_cycle + 1 < self.page_cycles() {
            self.phase.page_cycle += 1;
            self.phase.current_step = FIRST_STEP;
            self.phase.pressed_key = KeySlot::Empty;
            debug!(line = self.phase.page_cycle, "typewriter: next line");
        } else {
            self.reset_animation();
            debug!("typewriter: page full, starting a new page");
        }
    }

    /// Cancel the sweep and the return; the sweep's cancellation resets the phase
    fn cancel_animation(&mut self) {
        if self.carriage.cancel() == Some(TimelineEvent::Cancelled) {
            self.reset_animation();
        }
        self.carriage_return.cancel();
        if self.stage != Stage::TurningPage {
            self.stage = Stage::Idle;
        }
    }

    fn cancel_all(&mut self) {
        self.cancel_animation();
        self.page_turn.cancel();
        self.phase.has_page_animation_started = false;
        self.stage = Stage::Idle;
    }

    fn reset_origins(&mut self) {
        self.set_percent(0.0, false);
        self.carriage_x = 0.0;
        self.page_percent = 0.0;
        self.page_level = MAX_LEVEL;
        self.page_back_level = 0;
        self.carriage_return.set_range(FIRST_RETURN_FROM, RETURN_TO);
    }

    fn reset_animation(&mut self) {
        self.phase.reset_cycle();
        self.typography.clear();
    }

    fn page_cycles(&self) -> u8 {
        self.config.page_cycles.max(1)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn phase(&self) -> &AnimationPhase {
        &self.phase
    }

    pub fn typography(&self) -> &PageTypography {
        &self.typography
    }

    pub fn metrics(&self) -> &PartMetrics {
        &self.metrics
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Drag percent clamped to [0, 1] for use as a visual scale
    pub fn bounded_percent(&self) -> f32 {
        self.percent.clamp(0.0, 1.0)
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn carriage_x(&self) -> f32 {
        self.carriage_x
    }

    pub fn page_percent(&self) -> f32 {
        self.page_percent
    }

    pub fn page_level(&self) -> u16 {
        self.page_level
    }

    pub fn page_back_level(&self) -> u16 {
        self.page_back_level
    }

    pub fn is_returning(&self) -> bool {
        self.carriage_return.is_running()
    }

    /// Page is sliding in: the page turn or the first return is in flight
    pub fn is_page_sliding(&self) -> bool {
        self.phase.has_page_animation_started || self.carriage_return.is_running()
    }

    /// Whether a timeline is running, so the host should keep producing frames
    pub fn is_animating(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Returns and clears the pending redraw request
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl RefreshIndicator for Sequencer {
    /// Geometry changes restart the phase from a blank page
    fn set_bounds(&mut self, geometry: Geometry) {
        if self.geometry == Some(geometry) {
            return;
        }
        debug!(
            width = geometry.width,
            background_height = geometry.background_height,
            "typewriter: geometry updated"
        );
        if self.geometry.is_none() {
            self.top = -geometry.total_drag_distance;
        }
        self.geometry = Some(geometry);
        self.reset_animation();
        self.dirty = true;
    }

    fn draw(&mut self, measure: &dyn PartMeasure, renderer: &mut dyn Renderer) {
        self.advance_frame();
        if let Some(frame) = composer::compose(self, measure) {
            frame.render(renderer);
        }
    }

    fn start(&mut self) {
        Sequencer::start(self);
    }

    fn stop(&mut self) {
        Sequencer::stop(self);
    }

    fn is_running(&self) -> bool {
        Sequencer::is_running(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(125);

    fn metrics() -> PartMetrics {
        PartMetrics {
            carriage_offset: 40.0,
            page_offset: 10.0,
            offset: 0.0,
            typewriter_padding: 0.0,
        }
    }

    fn sequencer(seed: u64) -> Sequencer {
        let config = AnimationConfig {
            seed: Some(seed),
            ..Default::default()
        };
        Sequencer::new(config, metrics())
    }

    /// Tick and render like a host frame loop
    fn frame(seq: &mut Sequencer, dt: Duration) {
        seq.advance(dt);
        seq.advance_frame();
    }

    /// Drive through the page turn and the first return until typing
    fn run_to_typing(seq: &mut Sequencer) {
        seq.start();
        for _ in 0..50 {
            if seq.stage() == Stage::Typing {
                return;
            }
            frame(seq, FRAME);
        }
        panic!("sequencer never reached typing");
    }

    /// Run a whole sweep, returning the number of carriage returns started
    fn run_sweep(seq: &mut Sequencer) -> usize {
        let mut returns = 0;
        for _ in 0..16 {
            let was_returning = seq.is_returning();
            frame(seq, FRAME);
            if !was_returning && seq.is_returning() {
                returns += 1;
            }
        }
        returns
    }

    #[test]
    fn test_start_chains_page_turn_return_and_typing() {
        let mut seq = sequencer(1);
        seq.start();
        assert_eq!(seq.stage(), Stage::TurningPage);
        assert!(seq.phase().has_page_animation_started);

        for _ in 0..4 {
            frame(&mut seq, FRAME);
        }
        assert_eq!(seq.stage(), Stage::ReturningCarriage);
        assert!(!seq.phase().has_page_animation_started);
        assert!(!seq.is_running());

        for _ in 0..4 {
            frame(&mut seq, FRAME);
        }
        assert_eq!(seq.stage(), Stage::Typing);
        assert!(seq.is_running());
        assert_eq!(seq.carriage_return.range(), (SWEEP_RETURN_FROM, RETURN_TO));
    }

    #[test]
    fn test_page_turn_sets_levels() {
        let mut seq = sequencer(1);
        seq.start();
        assert_eq!(seq.page_level(), MAX_LEVEL);
        assert_eq!(seq.page_back_level(), 0);
        for _ in 0..4 {
            frame(&mut seq, FRAME);
        }
        assert!((seq.page_percent() - 0.6).abs() < 1e-6);
        assert_eq!(seq.page_level(), 4000);
        assert_eq!(seq.page_back_level(), 7400);
    }

    #[test]
    fn test_page_turn_decelerates() {
        let mut seq = sequencer(1);
        seq.start();
        seq.advance(FRAME);
        // A quarter of the turn: 1 - 0.75^4 of the way to 0.6
        let expected = 0.6 * (1.0 - 0.75f32.powi(4));
        assert!((seq.page_percent() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_wrap_runs_one_return_and_advances_line() {
        let mut seq = sequencer(2);
        run_to_typing(&mut seq);
        assert_eq!(seq.phase().page_cycle, 0);

        let returns = run_sweep(&mut seq);
        assert_eq!(returns, 1);
        assert_eq!(seq.stage(), Stage::ReturningCarriage);
        assert_eq!(seq.phase().page_cycle, 1);
        assert_eq!(seq.phase().current_step, FIRST_STEP);
        assert_eq!(seq.phase().pressed_key, KeySlot::Empty);
        assert!(seq.carriage.is_paused());
    }

    #[test]
    fn test_third_sweep_resets_instead_of_fourth_line() {
        let mut seq = sequencer(3);
        run_to_typing(&mut seq);

        for expected in [1, 2] {
            run_sweep(&mut seq);
            assert_eq!(seq.phase().page_cycle, expected);
            while seq.stage() != Stage::Typing {
                frame(&mut seq, FRAME);
            }
        }
        assert!(seq.typography().line(0).unwrap().letters > 0);

        run_sweep(&mut seq);
        assert_eq!(seq.phase().page_cycle, 0);
        assert!(seq.typography().is_empty());
        assert!(seq.phase().page_cycle < 3);
    }

    #[test]
    fn test_steps_only_increase_within_a_sweep() {
        let mut seq = sequencer(4);
        run_to_typing(&mut seq);
        let mut last = seq.phase().current_step;
        for _ in 0..15 {
            frame(&mut seq, FRAME);
            let step = seq.phase().current_step;
            assert!(step >= last, "step went from {} to {}", last, step);
            last = step;
        }
        assert_eq!(last, 16);
    }

    #[test]
    fn test_letters_recorded_only_on_step_change() {
        let mut seq = sequencer(5);
        run_to_typing(&mut seq);
        frame(&mut seq, FRAME);
        let recorded = seq.typography().line(0).unwrap().offsets.len();

        // Extra frames with no time passing must not type again
        for _ in 0..5 {
            seq.advance_frame();
        }
        assert_eq!(seq.typography().line(0).unwrap().offsets.len(), recorded);
    }

    #[test]
    fn test_no_consecutive_spaces() {
        let config = AnimationConfig {
            seed: Some(6),
            space_probability: 1.0,
            ..Default::default()
        };
        let mut seq = Sequencer::new(config, metrics());
        run_to_typing(&mut seq);
        let mut previous = seq.phase().pressed_key;
        for _ in 0..15 {
            frame(&mut seq, FRAME);
            let current = seq.phase().pressed_key;
            assert!(!(previous.is_space() && current.is_space()));
            previous = current;
        }
    }

    #[test]
    fn test_same_seed_types_same_keys() {
        let collect = |seed| {
            let mut seq = sequencer(seed);
            run_to_typing(&mut seq);
            (0..15)
                .map(|_| {
                    frame(&mut seq, FRAME);
                    seq.phase().pressed_key
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(collect(42), collect(42));
    }

    #[test]
    fn test_zero_percent_cancels_sweep_and_resets_phase() {
        let mut seq = sequencer(7);
        run_to_typing(&mut seq);
        for _ in 0..8 {
            frame(&mut seq, FRAME);
        }
        assert_eq!(seq.phase().current_step, 9);

        seq.set_percent(0.0, true);
        assert_eq!(seq.phase().current_step, FIRST_STEP);
        assert_eq!(seq.phase().page_cycle, 0);
        assert!(seq.typography().is_empty());
        assert!(!seq.is_animating());
    }

    #[test]
    fn test_stop_mid_sweep_then_start_begins_fresh() {
        let mut seq = sequencer(8);
        run_to_typing(&mut seq);
        run_sweep(&mut seq);
        while seq.stage() != Stage::Typing {
            frame(&mut seq, FRAME);
        }
        for _ in 0..8 {
            frame(&mut seq, FRAME);
        }
        assert_eq!(seq.phase().current_step, 9);
        assert_eq!(seq.phase().page_cycle, 1);

        seq.stop();
        assert!(!seq.is_running());
        assert_eq!(seq.stage(), Stage::Idle);

        seq.start();
        assert_eq!(seq.phase().current_step, FIRST_STEP);
        assert_eq!(seq.phase().page_cycle, 0);
        assert_eq!(seq.carriage_x(), 0.0);
    }

    #[test]
    fn test_stop_during_page_turn_does_not_start_typing() {
        let mut seq = sequencer(9);
        seq.start();
        frame(&mut seq, FRAME);
        seq.stop();
        for _ in 0..20 {
            frame(&mut seq, FRAME);
        }
        assert_eq!(seq.stage(), Stage::Idle);
        assert!(!seq.is_running());
    }

    #[test]
    fn test_skip_animation_jumps_one_shot_timelines() {
        let mut seq = sequencer(10);
        seq.set_skip_animation(true);
        seq.start();
        frame(&mut seq, Duration::ZERO);
        assert_eq!(seq.stage(), Stage::ReturningCarriage);
        assert_eq!(seq.page_percent(), 0.0);
        frame(&mut seq, Duration::ZERO);
        assert_eq!(seq.stage(), Stage::Typing);
        assert!(seq.is_running());
        assert!(seq.is_skip_animation());

        seq.stop();
        assert!(!seq.is_skip_animation());
    }

    #[test]
    fn test_offsets_accumulate() {
        let mut seq = sequencer(11);
        seq.set_offset_top(-140.0);
        seq.offset_top_and_bottom(30.0);
        seq.offset_top_and_bottom(10.0);
        assert_eq!(seq.top(), -100.0);
    }

    #[test]
    fn test_bounded_percent_clamps() {
        let mut seq = sequencer(12);
        seq.set_percent(1.7, false);
        assert_eq!(seq.bounded_percent(), 1.0);
        seq.set_percent(-0.3, false);
        assert_eq!(seq.bounded_percent(), 0.0);
        assert_eq!(seq.percent(), -0.3);
    }

    #[test]
    fn test_set_bounds_places_indicator_above_container() {
        let mut seq = sequencer(13);
        let geometry = Geometry::new(200.0, 400.0, 140.0);
        seq.set_bounds(geometry);
        assert_eq!(seq.top(), -140.0);
        assert_eq!(seq.geometry().unwrap().background_height, 100.0);
    }
}
