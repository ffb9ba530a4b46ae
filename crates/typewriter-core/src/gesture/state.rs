use std::path::Path;

use serde::{Deserialize, Serialize};

use super::pointer::PointerId;

/// Content padding in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn with_bottom(self, bottom: f32) -> Self {
        Self { bottom, ..self }
    }
}

/// Pointer tracking and offsets owned by the refresh layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub active_pointer: Option<PointerId>,
    pub initial_y: f32,
    /// Damped drag ratio; negative while moving upwards, unbounded above 1
    pub current_drag_percent: f32,
    /// Content offset from its resting position
    pub current_offset_top: f32,
    pub is_being_dragged: bool,
    pub is_refreshing: bool,
}

impl DragState {
    /// Drag percent clamped for use as a visual scale
    pub fn bounded_percent(&self) -> f32 {
        self.current_drag_percent.clamp(0.0, 1.0)
    }
}

/// Coarse state of the refresh layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    /// Moving to the refresh offset after a commit
    SettlingToTarget,
    Refreshing,
    /// Springing back to the resting offset
    Returning,
}

/// What survives a suspend/resume cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub was_refreshing: bool,
}

impl SavedState {
    /// Load from a JSON file; a missing file yields the default state
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
