//! Physical key layout of the typewriter keyboard

use rand::Rng;

/// Keys in the top row
pub const TOP_ROW_KEYS: u8 = 9;
/// Keys in the middle row
pub const MIDDLE_ROW_KEYS: u8 = 10;
/// Key positions in the bottom row, including those covered by the space bar
pub const BOTTOM_ROW_POSITIONS: u8 = 9;
/// First bottom-row position covered by the space bar
pub const SPACE_START_POSITION: u8 = 2;
/// Last bottom-row position covered by the space bar
pub const SPACE_END_POSITION: u8 = 6;
/// Keys that can be pressed, space bar excluded
pub const PHYSICAL_KEYS: u8 = TOP_ROW_KEYS + MIDDLE_ROW_KEYS + BOTTOM_ROW_VISIBLE_KEYS;

const BOTTOM_ROW_VISIBLE_KEYS: u8 =
    BOTTOM_ROW_POSITIONS - (SPACE_END_POSITION - SPACE_START_POSITION + 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRow {
    Top,
    Middle,
    Bottom,
}

/// The key shown as pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySlot {
    #[default]
    Empty,
    /// Index into the physical keys, `0..PHYSICAL_KEYS`
    Key(u8),
    Space,
}

impl KeySlot {
    /// Pick a uniformly random physical key
    pub fn random_key<R: Rng + ?Sized>(rng: &mut R) -> Self {
        KeySlot::Key(rng.gen_range(0..PHYSICAL_KEYS))
    }

    /// Row and position of a physical key
    ///
    /// Bottom-row keys skip the positions under the space bar.
    pub fn position(self) -> Option<(KeyRow, u8)> {
        let KeySlot::Key(index) = self else {
            return None;
        };
        if index < TOP_ROW_KEYS {
            return Some((KeyRow::Top, index));
        }
        let index = index - TOP_ROW_KEYS;
        if index < MIDDLE_ROW_KEYS {
            return Some((KeyRow::Middle, index));
        }
        let index = index - MIDDLE_ROW_KEYS;
        if index >= BOTTOM_ROW_VISIBLE_KEYS {
            return None;
        }
        let column = if index < SPACE_START_POSITION {
            index
        } else {
            index + (SPACE_END_POSITION - SPACE_START_POSITION + 1)
        };
        Some((KeyRow::Bottom, column))
    }

    /// Whether the key at `row`/`column` is this slot
    pub fn is_at(self, row: KeyRow, column: u8) -> bool {
        self.position() == Some((row, column))
    }

    pub fn is_space(self) -> bool {
        self == KeySlot::Space
    }
}

/// Whether a bottom-row position is covered by the space bar
pub fn is_under_space_bar(column: u8) -> bool {
    (SPACE_START_POSITION..=SPACE_END_POSITION).contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_physical_key_count() {
        assert_eq!(PHYSICAL_KEYS, 23);
    }

    #[test]
    fn test_every_key_maps_to_a_distinct_visible_position() {
        let positions: HashSet<_> = (0..PHYSICAL_KEYS)
            .map(|i| KeySlot::Key(i).position().unwrap())
            .collect();
        assert_eq!(positions.len(), PHYSICAL_KEYS as usize);
        for (row, column) in positions {
            if row == KeyRow::Bottom {
                assert!(!is_under_space_bar(column));
            }
        }
    }

    #[test]
    fn test_bottom_row_mapping() {
        assert_eq!(KeySlot::Key(19).position(), Some((KeyRow::Bottom, 0)));
        assert_eq!(KeySlot::Key(20).position(), Some((KeyRow::Bottom, 1)));
        assert_eq!(KeySlot::Key(21).position(), Some((KeyRow::Bottom, 7)));
        assert_eq!(KeySlot::Key(22).position(), Some((KeyRow::Bottom, 8)));
        assert_eq!(KeySlot::Key(23).position(), None);
    }

    #[test]
    fn test_empty_and_space_have_no_key_position() {
        assert_eq!(KeySlot::Empty.position(), None);
        assert_eq!(KeySlot::Space.position(), None);
        assert!(KeySlot::Space.is_space());
    }

    #[test]
    fn test_random_key_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            match KeySlot::random_key(&mut rng) {
                KeySlot::Key(i) => assert!(i < PHYSICAL_KEYS),
                other => panic!("unexpected slot {:?}", other),
            }
        }
    }
}
