//! Pull-to-refresh control with a typewriter loading animation
//!
//! - [`gesture`]: the refresh layout turning drags into offsets and refreshes
//! - [`sequencer`]: the typewriter animation state machine
//! - [`composer`]: per-frame placement of every visual part
//! - [`timeline`]: tickable interpolation primitive shared by both

pub mod composer;
pub mod config;
pub mod error;
pub mod gesture;
pub mod sequencer;
pub mod timeline;

pub use composer::{
    ComposedFrame, Geometry, Part, PartMeasure, PartMetrics, PlacedPart, Point, Rect, Renderer, Size,
};
pub use config::{AnimationConfig, AppConfig, EasingType, RefreshConfig};
pub use error::{Error, Result};
pub use gesture::{
    ContentView, DragState, GestureState, Padding, PointerEvent, PointerId, PointerPhase, RefreshLayout,
    SavedState,
};
pub use sequencer::{KeySlot, Sequencer, Stage};
pub use timeline::{RepeatPolicy, Timeline, TimelineEvent};
