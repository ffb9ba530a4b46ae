pub mod app;
pub mod atlas;
pub mod content;
pub mod event;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use atlas::{TerminalAtlas, CELL_HEIGHT, CELL_WIDTH};
pub use renderer::BufferRenderer;
pub use theme::Theme;
