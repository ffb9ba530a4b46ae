mod item_list;
mod refresh_indicator;
mod status_bar;

pub use item_list::ItemListWidget;
pub use refresh_indicator::RefreshIndicatorWidget;
pub use status_bar::StatusBarWidget;
