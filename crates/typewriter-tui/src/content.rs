use typewriter_core::{ContentView, Padding};

/// Scrollable list of demo rows wrapped by the refresh layout
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    items: Vec<String>,
    selected: usize,
    /// Index of the first visible row
    offset: usize,
    padding: Padding,
}

impl ItemList {
    pub fn new(count: usize) -> Self {
        Self {
            items: (1..=count).map(|i| format!("Item {}", i)).collect(),
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn select_next(&mut self, viewport: usize) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
        let viewport = viewport.max(1);
        if self.selected >= self.offset + viewport {
            self.offset = self.selected + 1 - viewport;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Scroll the viewport without moving past either end
    pub fn scroll_by(&mut self, delta: isize, viewport: usize) {
        let viewport = viewport.max(1);
        let max_offset = self.items.len().saturating_sub(viewport);
        let offset = self.offset as isize + delta;
        self.offset = offset.clamp(0, max_offset as isize) as usize;
        let last_visible = (self.offset + viewport - 1).min(self.items.len().saturating_sub(1));
        self.selected = self.selected.clamp(self.offset, last_visible);
    }

    /// Put a row at the top, as a completed refresh does
    pub fn prepend(&mut self, item: String) {
        self.items.insert(0, item);
    }
}

impl ContentView for ItemList {
    fn padding(&self) -> Padding {
        self.padding
    }

    fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list() {
        let list = ItemList::new(3);
        assert_eq!(list.items(), &["Item 1", "Item 2", "Item 3"]);
        assert!(!list.can_scroll_up());
    }

    #[test]
    fn test_select_next_scrolls_viewport() {
        let mut list = ItemList::new(10);
        for _ in 0..4 {
            list.select_next(3);
        }
        assert_eq!(list.selected(), 4);
        assert_eq!(list.offset(), 2);
        assert!(list.can_scroll_up());
    }

    #[test]
    fn test_select_prev_back_to_top() {
        let mut list = ItemList::new(10);
        for _ in 0..4 {
            list.select_next(3);
        }
        for _ in 0..10 {
            list.select_prev();
        }
        assert_eq!(list.selected(), 0);
        assert!(!list.can_scroll_up());
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut list = ItemList::new(10);
        list.scroll_by(100, 4);
        assert_eq!(list.offset(), 6);
        assert_eq!(list.selected(), 6);
        list.scroll_by(-100, 4);
        assert_eq!(list.offset(), 0);
        assert_eq!(list.selected(), 3);
    }

    #[test]
    fn test_padding_round_trip() {
        let mut list = ItemList::new(1);
        list.set_padding(Padding::new(0.0, 0.0, 0.0, 24.0));
        assert_eq!(list.padding().bottom, 24.0);
    }
}
