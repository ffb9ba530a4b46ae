//! Visual parts and the rendering capabilities they are drawn through

/// A drawable piece of the typewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Machine body
    Typewriter,
    /// Keyboard background
    Keyboard,
    CarriageTop,
    CarriageMiddle,
    /// Drawn after the page so it covers the page's lower edge
    CarriageBottom,
    /// Page in the carriage; scaled by its level
    PageFront,
    /// Reverse side of the page sticking out behind the carriage
    PageBack,
    Letter,
    Key { pressed: bool },
    Space { pressed: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap of two rectangles, `None` when they do not touch
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

/// Fixed distances the layout is built from, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartMetrics {
    /// Half-travel of the carriage
    pub carriage_offset: f32,
    /// Vertical step between page lines
    pub page_offset: f32,
    /// Shift applied to every part
    pub offset: f32,
    /// Vertical anchor of the machine body
    pub typewriter_padding: f32,
}

/// Supplies the intrinsic size of each part
pub trait PartMeasure {
    fn intrinsic_size(&self, part: Part) -> Size;
    fn metrics(&self) -> PartMetrics;
}

/// Draws parts; implemented by the host's graphics layer
pub trait Renderer {
    fn set_clip(&mut self, clip: Rect);
    fn set_scale(&mut self, sx: f32, sy: f32, pivot: Point);
    fn draw_part(&mut self, part: Part, bounds: Rect);
}
