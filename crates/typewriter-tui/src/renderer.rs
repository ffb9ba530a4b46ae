use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use typewriter_core::{Part, Point, Rect as PartRect, Renderer};

use crate::atlas::{self, Role, CELL_HEIGHT, CELL_WIDTH};
use crate::theme::Theme;

const LETTERS: &[char] = &[
    'l', 'o', 'r', 'e', 'm', 'i', 'p', 's', 'u', 'd', 'a', 't', 'c', 'n', 'g',
];

/// Paints composed parts into a ratatui buffer
///
/// A cell is painted when its centre falls inside the part's scaled and
/// clipped bounds; the sprite is sampled at that centre.
pub struct BufferRenderer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    theme: &'a Theme,
    clip: Option<PartRect>,
    scale: (f32, f32),
    pivot: Point,
}

impl<'a> BufferRenderer<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, theme: &'a Theme) -> Self {
        Self {
            buf,
            area,
            theme,
            clip: None,
            scale: (1.0, 1.0),
            pivot: Point::default(),
        }
    }

    fn transform(&self, bounds: PartRect) -> PartRect {
        let (sx, sy) = self.scale;
        PartRect::new(
            self.pivot.x + (bounds.x - self.pivot.x) * sx,
            self.pivot.y + (bounds.y - self.pivot.y) * sy,
            bounds.width * sx,
            bounds.height * sy,
        )
    }

    fn style_for(&self, role: Role) -> Style {
        let theme = self.theme;
        match role {
            Role::Body => Style::default().fg(theme.body).bg(theme.body_bg),
            Role::Keyboard => Style::default().fg(theme.keyboard).bg(theme.keyboard_bg),
            Role::Carriage => Style::default().fg(theme.carriage),
            Role::Paper => Style::default().fg(theme.paper_edge).bg(theme.paper),
            Role::PaperBack => Style::default().fg(theme.keyboard).bg(theme.paper_back),
            Role::Ink => Style::default()
                .fg(theme.ink)
                .bg(theme.paper)
                .add_modifier(Modifier::BOLD),
            Role::Key => Style::default().fg(theme.key).bg(theme.key_bg),
            Role::KeyPressed => Style::default()
                .fg(theme.background)
                .bg(theme.key_pressed)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// First and one-past-last cell whose centre lies in `[start, end)`
fn cell_span(start: f32, end: f32, cell: f32) -> (i32, i32) {
    let first = ((start - cell / 2.0) / cell).ceil() as i32;
    let last = ((end - cell / 2.0) / cell).ceil() as i32;
    (first, last)
}

fn letter_glyph(column: i32) -> char {
    LETTERS[column.rem_euclid(LETTERS.len() as i32) as usize]
}

impl Renderer for BufferRenderer<'_> {
    fn set_clip(&mut self, clip: PartRect) {
        self.clip = Some(clip);
    }

    fn set_scale(&mut self, sx: f32, sy: f32, pivot: Point) {
        self.scale = (sx, sy);
        self.pivot = pivot;
    }

    fn draw_part(&mut self, part: Part, bounds: PartRect) {
        let bounds = self.transform(bounds);
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let visible = match self.clip {
            Some(clip) => match bounds.intersect(&clip) {
                Some(visible) => visible,
                None => return,
            },
            None => bounds,
        };

        let sprite = atlas::sprite(part);
        let style = self.style_for(sprite.role);
        let (col_start, col_end) = cell_span(visible.x, visible.right(), CELL_WIDTH);
        let (row_start, row_end) = cell_span(visible.y, visible.bottom(), CELL_HEIGHT);

        for row in row_start.max(0)..row_end.min(self.area.height as i32) {
            let center_y = row as f32 * CELL_HEIGHT + CELL_HEIGHT / 2.0;
            for col in col_start.max(0)..col_end.min(self.area.width as i32) {
                let center_x = col as f32 * CELL_WIDTH + CELL_WIDTH / 2.0;
                let glyph = match part {
                    Part::Letter => Some(letter_glyph(col)),
                    _ => sprite.glyph(
                        (center_x - bounds.x) / bounds.width,
                        (center_y - bounds.y) / bounds.height,
                    ),
                };
                let Some(glyph) = glyph else {
                    continue;
                };
                let position = (self.area.x + col as u16, self.area.y + row as u16);
                if let Some(cell) = self.buf.cell_mut(position) {
                    cell.set_char(glyph).set_style(style);
                }
            }
        }
    }
}
