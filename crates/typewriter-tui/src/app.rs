use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use typewriter_core::{AppConfig, GestureState, PointerEvent, RefreshLayout, SavedState};

use crate::atlas::{TerminalAtlas, CELL_HEIGHT, CELL_WIDTH};
use crate::content::ItemList;
use crate::theme::Theme;

/// Main application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub layout: RefreshLayout<ItemList>,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub last_refreshed: Option<DateTime<Local>>,
    pub completed_refreshes: u32,
    /// Area the refresh layout occupies, as of the last draw
    pub content_area: Rect,
    /// Bumped whenever a refresh starts so stale completions can be dropped
    refresh_generation: u64,
    /// Refreshes committed by a drag and not yet handed to the runner
    requested: Rc<Cell<u32>>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> typewriter_core::Result<Self> {
        let content = ItemList::new(config.ui.item_count);
        let mut layout = RefreshLayout::new(
            config.refresh.clone(),
            config.animation.clone(),
            Box::new(TerminalAtlas),
            vec![content],
        )?;

        let requested = Rc::new(Cell::new(0));
        let pending = Rc::clone(&requested);
        layout.set_on_refresh_listener(move || pending.set(pending.get() + 1));

        Ok(Self {
            config,
            layout,
            theme: Theme::default(),
            should_quit: false,
            status_message: None,
            last_refreshed: None,
            completed_refreshes: 0,
            content_area: Rect::default(),
            refresh_generation: 0,
            requested,
        })
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Record the area the layout is drawn into and forward its size
    pub fn on_resize(&mut self, area: Rect) {
        self.content_area = area;
        self.layout.on_layout(
            f32::from(area.width) * CELL_WIDTH,
            f32::from(area.height) * CELL_HEIGHT,
        );
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.layout.handle_pointer(event)
    }

    /// A refresh committed by a drag, as a generation to complete later
    pub fn take_refresh_request(&mut self) -> Option<u64> {
        if self.requested.replace(0) == 0 {
            return None;
        }
        self.set_status("Refreshing...");
        Some(self.next_generation())
    }

    /// Start a refresh from the keyboard
    pub fn start_refresh(&mut self) -> Option<u64> {
        if self.layout.is_refreshing() {
            self.set_status("Refresh already in progress...");
            return None;
        }
        self.layout.set_refreshing(true);
        self.set_status("Refreshing...");
        Some(self.next_generation())
    }

    /// Resume a refresh saved by a previous run
    pub fn restore(&mut self, state: SavedState) -> Option<u64> {
        if !state.was_refreshing {
            return None;
        }
        self.layout.restore_state(state);
        self.set_status("Resumed refresh");
        Some(self.next_generation())
    }

    pub fn finish_refresh(&mut self, generation: u64) {
        if generation != self.refresh_generation || !self.layout.is_refreshing() {
            tracing::debug!(generation, "ignoring stale refresh completion");
            return;
        }
        let now = Local::now();
        self.layout.set_refreshing(false);
        if let Some(list) = self.layout.content_mut() {
            list.prepend(format!("Refreshed at {}", now.format("%H:%M:%S")));
        }
        self.last_refreshed = Some(now);
        self.completed_refreshes += 1;
        self.set_status(format!("Refreshed at {}", now.format("%H:%M:%S")));
    }

    pub fn cancel_refresh(&mut self) {
        if !self.layout.is_refreshing() {
            return;
        }
        self.refresh_generation += 1;
        self.layout.set_refreshing(false);
        self.set_status("Refresh cancelled");
    }

    pub fn toggle_enabled(&mut self) {
        let enabled = !self.layout.is_enabled();
        self.layout.set_enabled(enabled);
        self.set_status(if enabled {
            "Pull to refresh enabled"
        } else {
            "Pull to refresh disabled"
        });
    }

    fn next_generation(&mut self) -> u64 {
        self.refresh_generation += 1;
        self.refresh_generation
    }

    /// Rows of the list below the content offset
    pub fn list_viewport(&self) -> usize {
        usize::from(self.content_area.height.saturating_sub(self.content_rows_offset()))
    }

    pub fn move_down(&mut self) {
        let viewport = self.list_viewport();
        if let Some(list) = self.layout.content_mut() {
            list.select_next(viewport);
        }
    }

    pub fn move_up(&mut self) {
        if let Some(list) = self.layout.content_mut() {
            list.select_prev();
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        let viewport = self.list_viewport();
        if let Some(list) = self.layout.content_mut() {
            list.scroll_by(delta, viewport);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.layout.tick(dt);
    }

    pub fn needs_animation(&self) -> bool {
        self.layout.is_animating()
    }

    /// Whether the indicator changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        self.layout.take_redraw()
    }

    /// Content offset rounded to whole terminal rows
    pub fn content_rows_offset(&self) -> u16 {
        (self.layout.content_offset() / CELL_HEIGHT).round().max(0.0) as u16
    }

    pub fn state_label(&self) -> &'static str {
        match self.layout.gesture_state() {
            GestureState::Idle => "IDLE",
            GestureState::Dragging => "PULLING",
            GestureState::SettlingToTarget => "SETTLING",
            GestureState::Refreshing => "REFRESHING",
            GestureState::Returning => "RETURNING",
        }
    }
}
