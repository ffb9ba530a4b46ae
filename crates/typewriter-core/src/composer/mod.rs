//! Frame composition for the typewriter indicator
//!
//! Turns the sequencer's phase state into an ordered list of placed parts.
//! Every part goes through [`FrameBuilder::place`], so centring and the
//! indicator's vertical offset are applied in exactly one spot.

mod parts;

pub use parts::{Part, PartMeasure, PartMetrics, Point, Rect, Renderer, Size};

use crate::sequencer::keys::{
    is_under_space_bar, KeyRow, BOTTOM_ROW_POSITIONS, MIDDLE_ROW_KEYS, TOP_ROW_KEYS,
};
use crate::sequencer::{Sequencer, MAX_LEVEL};

/// Height of the typewriter background relative to the container width
pub const BACKGROUND_RATIO: f32 = 0.5;

/// Container measurements the indicator is laid out against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub background_height: f32,
    pub total_drag_distance: f32,
}

impl Geometry {
    pub fn new(width: f32, height: f32, total_drag_distance: f32) -> Self {
        Self {
            width,
            height,
            background_height: (BACKGROUND_RATIO * width).floor(),
            total_drag_distance,
        }
    }
}

/// A part with its screen-space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPart {
    pub part: Part,
    pub bounds: Rect,
}

/// Everything needed to draw one frame of the indicator
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFrame {
    /// Visible region: from the container top down to the moved content
    pub clip: Rect,
    /// Uniform scale; always the bounded drag percent
    pub scale: f32,
    pub pivot: Point,
    pub parts: Vec<PlacedPart>,
}

impl ComposedFrame {
    /// Issue the frame's draw calls in order
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.set_clip(self.clip);
        renderer.set_scale(self.scale, self.scale, self.pivot);
        for placed in &self.parts {
            renderer.draw_part(placed.part, placed.bounds);
        }
    }

    /// Parts of one kind, in draw order
    pub fn parts_of(&self, matches: impl Fn(&Part) -> bool) -> impl Iterator<Item = &PlacedPart> {
        self.parts.iter().filter(move |placed| matches(&placed.part))
    }
}

/// Compose the current frame; `None` until the container has a width
pub fn compose(seq: &Sequencer, measure: &dyn PartMeasure) -> Option<ComposedFrame> {
    let geometry = *seq.geometry()?;
    if geometry.width <= 0.0 {
        return None;
    }

    let top = seq.top();
    let clip = Rect::new(0.0, 0.0, geometry.width, (top + geometry.total_drag_distance).max(0.0));
    let mut builder = FrameBuilder {
        geometry,
        measure,
        metrics: *seq.metrics(),
        top,
        parts: Vec::with_capacity(48),
    };

    builder.carriage(seq);
    builder.typewriter();
    builder.keyboard(seq);

    Some(ComposedFrame {
        clip,
        scale: seq.bounded_percent(),
        pivot: Point::new(geometry.width / 2.0, top),
        parts: builder.parts,
    })
}

struct FrameBuilder<'a> {
    geometry: Geometry,
    measure: &'a dyn PartMeasure,
    metrics: PartMetrics,
    top: f32,
    parts: Vec<PlacedPart>,
}

impl FrameBuilder<'_> {
    fn size(&self, part: Part) -> Size {
        self.measure.intrinsic_size(part)
    }

    /// Place `part` centred in the indicator, shifted by an anchor
    ///
    /// Anchors grow leftwards and upwards and move the part by half their
    /// value, so `position = center - size / 2 - anchor / 2`.
    fn place(&mut self, part: Part, anchor_x: f32, anchor_y: f32) {
        let size = self.size(part);
        let bounds = self.bounds(size, anchor_x, anchor_y);
        self.parts.push(PlacedPart { part, bounds });
    }

    /// Place a level-scaled page: the drawn height shrinks towards its top edge
    fn place_leveled(&mut self, part: Part, level: u16, anchor_x: f32, anchor_y: f32) {
        if level == 0 {
            return;
        }
        let size = self.size(part);
        let mut bounds = self.bounds(size, anchor_x, anchor_y);
        bounds.height = size.height * level.min(MAX_LEVEL) as f32 / MAX_LEVEL as f32;
        self.parts.push(PlacedPart { part, bounds });
    }

    fn bounds(&self, size: Size, anchor_x: f32, anchor_y: f32) -> Rect {
        let center_x = self.geometry.width / 2.0;
        let center_y = self.geometry.total_drag_distance / 2.0;
        let x = center_x - size.width / 2.0 - anchor_x / 2.0;
        let y = center_y - size.height / 2.0 - anchor_y / 2.0 + self.metrics.offset + self.top;
        Rect::new(x.trunc(), y.trunc(), size.width, size.height)
    }

    fn carriage(&mut self, seq: &Sequencer) {
        let carriage_x = seq.carriage_x();
        let body_height = self.size(Part::Typewriter).height;
        let carriage_y = (body_height / 1.1).trunc();

        self.page_back(seq);
        self.place(Part::CarriageTop, carriage_x, carriage_y);
        self.place(Part::CarriageMiddle, carriage_x, carriage_y);

        if let Some(page_y) = self.page_y(seq) {
            let level = if seq.phase().has_cycle_started {
                typed_front_level(seq.phase().page_cycle)
            } else {
                seq.page_level()
            };
            let page_offset = self.metrics.page_offset;
            self.place_leveled(Part::PageFront, level, carriage_x, page_offset + page_y);
            self.letters(seq, page_y);
        }

        let bottom_height = self.size(Part::CarriageBottom).height;
        self.place(Part::CarriageBottom, carriage_x, carriage_y - bottom_height * 2.0);
    }

    /// Vertical anchor of the front page, `None` while it is fully hidden
    fn page_y(&self, seq: &Sequencer) -> Option<f32> {
        let page_offset = self.metrics.page_offset;
        let phase = seq.phase();
        if phase.has_cycle_started {
            return Some(page_offset + page_offset * phase.page_cycle as f32);
        }

        let percent = seq.bounded_percent();
        if percent <= 0.0 {
            return None;
        }
        // The page hangs above the carriage and drops in as the drag grows
        let mut page_y = (self.size(Part::PageFront).height / percent).trunc() + page_offset;
        if seq.is_page_sliding() {
            page_y *= 1.0 - seq.page_percent() * 1.15;
        }
        Some(page_y.trunc())
    }

    fn page_back(&mut self, seq: &Sequencer) {
        let page_offset = self.metrics.page_offset;
        let phase = seq.phase();
        let mut back_y = page_offset * 3.0;
        let level = if phase.has_cycle_started {
            back_y -= page_offset * phase.page_cycle as f32;
            typed_back_level(phase.page_cycle)
        } else {
            if seq.is_page_sliding() {
                back_y = (back_y * seq.page_percent() * 1.65).trunc();
            }
            seq.page_back_level()
        };
        self.place_leveled(
            Part::PageBack,
            level,
            page_offset + seq.carriage_x(),
            page_offset + back_y,
        );
    }

    fn letters(&mut self, seq: &Sequencer, page_y: f32) {
        let letter = self.size(Part::Letter).height;
        let page_width = self.size(Part::PageFront).width;
        let page_offset = self.metrics.page_offset;
        let typography = seq.typography();

        for line_index in 0..=seq.phase().page_cycle as usize {
            let Some(line) = typography.line(line_index) else {
                break;
            };
            let line_y = page_offset * 2.0 - (letter * 3.5).trunc() * line_index as f32 + page_y;
            let mut x = seq.carriage_x() + page_width - letter * 2.0;
            for i in 0..line.visible_letters() {
                x -= line.offsets.get(i).copied().unwrap_or(0.0);
                self.place(Part::Letter, x, line_y);
            }
        }
    }

    fn typewriter(&mut self) {
        self.place(Part::Typewriter, 0.0, self.metrics.typewriter_padding);
    }

    fn keyboard(&mut self, seq: &Sequencer) {
        let pressed = seq.phase().pressed_key;
        let keyboard_width = self.size(Part::Keyboard).width;
        let button = self.size(Part::Key { pressed: false }).width;

        self.place(Part::Keyboard, 0.0, 0.0);

        let mut x = keyboard_width;
        for column in 0..TOP_ROW_KEYS {
            x -= button * 3.0;
            let part = Part::Key {
                pressed: pressed.is_at(KeyRow::Top, column),
            };
            self.place(part, x - button, button * 3.0);
        }

        let mut x = keyboard_width;
        for column in 0..MIDDLE_ROW_KEYS {
            x -= button * 3.0;
            let part = Part::Key {
                pressed: pressed.is_at(KeyRow::Middle, column),
            };
            self.place(part, x + (button * 0.5).trunc(), 0.0);
        }

        let mut x = keyboard_width;
        for column in 0..BOTTOM_ROW_POSITIONS {
            x -= button * 3.0;
            if !is_under_space_bar(column) {
                let part = Part::Key {
                    pressed: pressed.is_at(KeyRow::Bottom, column),
                };
                self.place(part, x - button, -(button * 3.0));
            }
        }

        let space = Part::Space {
            pressed: pressed.is_space(),
        };
        self.place(space, 0.0, -(button * 3.0));
    }
}

/// Front page level while typing: each finished line reveals more of the page
fn typed_front_level(page_cycle: u8) -> u16 {
    let level = 5000 + 2000 * u32::from(page_cycle);
    level.min(u32::from(MAX_LEVEL)) as u16
}

/// Back page level while typing: it shrinks as the front page grows
fn typed_back_level(page_cycle: u8) -> u16 {
    u32::from(MAX_LEVEL).saturating_sub(3333 * u32::from(page_cycle)) as u16
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fixed-size parts for layout tests
    pub struct UniformMeasure;

    impl PartMeasure for UniformMeasure {
        fn intrinsic_size(&self, part: Part) -> Size {
            match part {
                Part::Typewriter => Size::new(120.0, 60.0),
                Part::Keyboard => Size::new(100.0, 30.0),
                Part::CarriageTop | Part::CarriageMiddle => Size::new(140.0, 10.0),
                Part::CarriageBottom => Size::new(140.0, 6.0),
                Part::PageFront | Part::PageBack => Size::new(80.0, 40.0),
                Part::Letter => Size::new(2.0, 2.0),
                Part::Key { .. } => Size::new(4.0, 4.0),
                Part::Space { .. } => Size::new(30.0, 4.0),
            }
        }

        fn metrics(&self) -> PartMetrics {
            PartMetrics {
                carriage_offset: 40.0,
                page_offset: 10.0,
                offset: 0.0,
                typewriter_padding: 0.0,
            }
        }
    }

    /// Renderer double that records every call
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub clips: Vec<Rect>,
        pub scales: Vec<(f32, f32, Point)>,
        pub drawn: Vec<(Part, Rect)>,
    }

    impl Renderer for RecordingRenderer {
        fn set_clip(&mut self, clip: Rect) {
            self.clips.push(clip);
        }

        fn set_scale(&mut self, sx: f32, sy: f32, pivot: Point) {
            self.scales.push((sx, sy, pivot));
        }

        fn draw_part(&mut self, part: Part, bounds: Rect) {
            self.drawn.push((part, bounds));
        }
    }
}
