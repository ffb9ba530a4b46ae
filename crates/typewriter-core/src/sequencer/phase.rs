//! Animation-phase state owned by the sequencer

use super::keys::KeySlot;

/// First value of the key-step cycle
pub const FIRST_STEP: u8 = 1;
/// Last value of the key-step cycle
pub const LAST_STEP: u8 = 17;

/// Where the typing animation currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPhase {
    /// Key step within the current sweep, `FIRST_STEP..=LAST_STEP`
    pub current_step: u8,
    /// Step seen by the previous frame; a key is typed only when this changes
    pub last_typed_step: u8,
    /// Zero-based page line being typed
    pub page_cycle: u8,
    pub pressed_key: KeySlot,
    /// The cyclic carriage timeline has been started at least once since `start`
    pub has_cycle_started: bool,
    pub has_page_animation_started: bool,
    /// Forces one-shot timelines to their end value; cleared by `stop`
    pub skip_animation: bool,
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self {
            current_step: FIRST_STEP,
            last_typed_step: 0,
            page_cycle: 0,
            pressed_key: KeySlot::Empty,
            has_cycle_started: false,
            has_page_animation_started: false,
            skip_animation: false,
        }
    }
}

impl AnimationPhase {
    /// Back to the first step of the first page line
    pub fn reset_cycle(&mut self) {
        self.pressed_key = KeySlot::Empty;
        self.current_step = FIRST_STEP;
        self.page_cycle = 0;
    }
}

/// Letters typed onto one page line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTypography {
    /// Horizontal advance recorded for each keystroke
    pub offsets: Vec<f32>,
    /// Running letter count; space presses do not add to it
    pub letters: usize,
}

impl LineTypography {
    /// Record a keystroke that moved the carriage by `motion`
    ///
    /// A space doubles the advance and leaves the letter count unchanged.
    pub fn record(&mut self, motion: f32, space: bool) {
        if space {
            self.letters = self.letters.saturating_sub(1);
            self.offsets.push(motion * 2.0);
        } else {
            self.offsets.push(motion);
        }
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.letters = 0;
    }

    /// Letters to draw; the newest keystroke is still under the type bar
    pub fn visible_letters(&self) -> usize {
        self.letters.saturating_sub(1)
    }
}

/// Per-line typography for every line of a page
#[derive(Debug, Clone, PartialEq)]
pub struct PageTypography {
    lines: Vec<LineTypography>,
}

impl PageTypography {
    pub fn new(lines: usize) -> Self {
        Self {
            lines: vec![LineTypography::default(); lines.max(1)],
        }
    }

    pub fn line(&self, index: usize) -> Option<&LineTypography> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut LineTypography> {
        self.lines.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.offsets.is_empty() && line.letters == 0)
    }

    pub fn clear(&mut self) {
        self.lines.iter_mut().for_each(LineTypography::clear);
    }
}
