//! Character sprites for the typewriter parts
//!
//! Layout runs in sub-cell units: one terminal cell is [`CELL_WIDTH`] units
//! wide and [`CELL_HEIGHT`] units tall. Sprite sizes are derived from their
//! art so that an unscaled sprite maps one character onto one cell.

use typewriter_core::{Part, PartMeasure, PartMetrics, Size};

pub const CELL_WIDTH: f32 = 4.0;
pub const CELL_HEIGHT: f32 = 12.0;

/// Colour group a sprite is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Body,
    Keyboard,
    Carriage,
    Paper,
    PaperBack,
    Ink,
    Key,
    KeyPressed,
}

#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub rows: &'static [&'static str],
    /// Height in units; may differ from the row count times [`CELL_HEIGHT`]
    pub height: f32,
    /// Opaque sprites paint their blanks, others let lower parts show through
    pub opaque: bool,
    pub role: Role,
}

impl Sprite {
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.columns() as f32 * CELL_WIDTH, self.height)
    }

    /// Character at a normalised position inside the sprite, `None` where
    /// nothing should be painted
    pub fn glyph(&self, u: f32, v: f32) -> Option<char> {
        if self.rows.is_empty() || !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        let row = ((v * self.rows.len() as f32) as usize).min(self.rows.len() - 1);
        let column = (u * self.columns() as f32) as usize;
        let ch = self.rows[row].chars().nth(column).unwrap_or(' ');
        if ch == ' ' && !self.opaque {
            None
        } else {
            Some(ch)
        }
    }
}

static TYPEWRITER: Sprite = Sprite {
    rows: &[
        " .----------------------------------------. ",
        " |                                        | ",
        " |                                        | ",
        " |                                        | ",
        " |                                        | ",
        "/|________________________________________|\\",
        "|                                          |",
        "'------------------------------------------'",
    ],
    height: 102.0,
    opaque: true,
    role: Role::Body,
};

static KEYBOARD: Sprite = Sprite {
    rows: &[
        "/                              \\",
        "|                              |",
        "\\______________________________/",
    ],
    height: 36.0,
    opaque: true,
    role: Role::Keyboard,
};

static CARRIAGE_TOP: Sprite = Sprite {
    rows: &["  (==============================================)  "],
    height: 12.0,
    opaque: false,
    role: Role::Carriage,
};

static CARRIAGE_MIDDLE: Sprite = Sprite {
    rows: &["[]                                                []"],
    height: 12.0,
    opaque: false,
    role: Role::Carriage,
};

static CARRIAGE_BOTTOM: Sprite = Sprite {
    rows: &[" \\________________________________________________/ "],
    height: 12.0,
    opaque: false,
    role: Role::Carriage,
};

static PAGE_FRONT: Sprite = Sprite {
    rows: &[
        ".----------------------.",
        "|                      |",
        "|                      |",
        "|                      |",
        "|                      |",
    ],
    height: 60.0,
    opaque: true,
    role: Role::Paper,
};

static PAGE_BACK: Sprite = Sprite {
    rows: &[
        "/::::::::::::::::::::::\\",
        "|::::::::::::::::::::::|",
        "|::::::::::::::::::::::|",
        "|::::::::::::::::::::::|",
        "|::::::::::::::::::::::|",
    ],
    height: 60.0,
    opaque: true,
    role: Role::PaperBack,
};

static LETTER: Sprite = Sprite {
    rows: &["x"],
    height: 12.0,
    opaque: false,
    role: Role::Ink,
};

static KEY: Sprite = Sprite {
    rows: &["[]"],
    height: 12.0,
    opaque: true,
    role: Role::Key,
};

static KEY_PRESSED: Sprite = Sprite {
    rows: &["[]"],
    height: 12.0,
    opaque: true,
    role: Role::KeyPressed,
};

static SPACE: Sprite = Sprite {
    rows: &["[____________]"],
    height: 12.0,
    opaque: true,
    role: Role::Key,
};

static SPACE_PRESSED: Sprite = Sprite {
    rows: &["[____________]"],
    height: 12.0,
    opaque: true,
    role: Role::KeyPressed,
};

pub fn sprite(part: Part) -> &'static Sprite {
    match part {
        Part::Typewriter => &TYPEWRITER,
        Part::Keyboard => &KEYBOARD,
        Part::CarriageTop => &CARRIAGE_TOP,
        Part::CarriageMiddle => &CARRIAGE_MIDDLE,
        Part::CarriageBottom => &CARRIAGE_BOTTOM,
        Part::PageFront => &PAGE_FRONT,
        Part::PageBack => &PAGE_BACK,
        Part::Letter => &LETTER,
        Part::Key { pressed: false } => &KEY,
        Part::Key { pressed: true } => &KEY_PRESSED,
        Part::Space { pressed: false } => &SPACE,
        Part::Space { pressed: true } => &SPACE_PRESSED,
    }
}

/// Part sizes and distances for a character-cell display
///
/// The page step equals three and a half letter heights so the line being
/// typed stays level with the carriage while older lines move up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAtlas;

impl PartMeasure for TerminalAtlas {
    fn intrinsic_size(&self, part: Part) -> Size {
        sprite(part).size()
    }

    fn metrics(&self) -> PartMetrics {
        PartMetrics {
            carriage_offset: 68.0,
            page_offset: 42.0,
            offset: 0.0,
            typewriter_padding: -34.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PARTS: [Part; 12] = [
        Part::Typewriter,
        Part::Keyboard,
        Part::CarriageTop,
        Part::CarriageMiddle,
        Part::CarriageBottom,
        Part::PageFront,
        Part::PageBack,
        Part::Letter,
        Part::Key { pressed: false },
        Part::Key { pressed: true },
        Part::Space { pressed: false },
        Part::Space { pressed: true },
    ];

    #[test]
    fn test_sprite_rows_have_equal_width() {
        for part in ALL_PARTS {
            let sprite = sprite(part);
            let columns = sprite.columns();
            for row in sprite.rows {
                assert_eq!(row.chars().count(), columns, "{:?}", part);
            }
        }
    }

    #[test]
    fn test_keyboard_fits_sixteen_keys() {
        let atlas = TerminalAtlas;
        let key = atlas.intrinsic_size(Part::Key { pressed: false });
        let keyboard = atlas.intrinsic_size(Part::Keyboard);
        assert_eq!(keyboard.width, key.width * 16.0);
        // key rows sit one cell apart
        assert_eq!(key.width * 1.5, CELL_HEIGHT);
    }

    #[test]
    fn test_page_step_matches_letter_height() {
        let atlas = TerminalAtlas;
        let letter = atlas.intrinsic_size(Part::Letter);
        assert_eq!(atlas.metrics().page_offset, (letter.height * 3.5).trunc());
    }

    #[test]
    fn test_space_spans_five_key_slots() {
        let atlas = TerminalAtlas;
        let key = atlas.intrinsic_size(Part::Key { pressed: false });
        let space = atlas.intrinsic_size(Part::Space { pressed: false });
        assert_eq!(space.width, key.width * 1.5 * 4.0 + key.width);
    }

    #[test]
    fn test_glyph_transparency() {
        let middle = sprite(Part::CarriageMiddle);
        assert_eq!(middle.glyph(0.0, 0.5), Some('['));
        assert_eq!(middle.glyph(0.5, 0.5), None);
        let page = sprite(Part::PageFront);
        assert_eq!(page.glyph(0.5, 0.5), Some(' '));
    }

    #[test]
    fn test_glyph_outside_is_none() {
        let key = sprite(Part::Key { pressed: false });
        assert_eq!(key.glyph(1.0, 0.5), None);
        assert_eq!(key.glyph(0.5, -0.1), None);
    }
}
