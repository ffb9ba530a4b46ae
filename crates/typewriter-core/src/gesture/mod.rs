//! Pull-to-refresh gesture controller
//!
//! [`RefreshLayout`] wraps at most one content view, turns vertical drags
//! into an offset and a drag percent, and decides on release whether to
//! commit to a refresh or spring back. It feeds the typewriter
//! [`Sequencer`](crate::sequencer::Sequencer) through its setters only.

mod layout;
mod pointer;
mod state;

pub use layout::{ContentView, RefreshLayout, ScrollUpCallback};
pub use pointer::{PointerEvent, PointerId, PointerPhase};
pub use state::{DragState, GestureState, Padding, SavedState};
