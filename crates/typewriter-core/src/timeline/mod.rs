//! Interpolation primitives for the refresh animations
//!
//! # Layers
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `timeline` - A tickable value animation with repeat, pause and cancel
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use typewriter_core::timeline::{RepeatPolicy, Timeline, TimelineEvent};
//! use typewriter_core::EasingType;
//!
//! let mut snap = Timeline::new(
//!     Duration::from_millis(500),
//!     0.5,
//!     0.01,
//!     RepeatPolicy::Once,
//!     EasingType::Decelerate,
//! );
//! snap.start();
//!
//! // Each frame, advance by the time since the previous frame
//! if let Some(TimelineEvent::Completed) = snap.tick(frame_dt) {
//!     // chain the next stage
//! }
//! let value = snap.value();
//! ```

pub mod easing;
pub mod timing;

mod timeline;

pub use easing::Easing;
pub use timeline::{RepeatPolicy, Timeline, TimelineEvent};
