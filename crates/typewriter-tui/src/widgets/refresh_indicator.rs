use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::renderer::BufferRenderer;

/// Draws the typewriter above the list
///
/// The whole area is handed to the renderer; the composed clip keeps the
/// drawing inside the gap the content has been pulled away from.
pub struct RefreshIndicatorWidget;

impl RefreshIndicatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let App { layout, theme, .. } = app;
        let mut renderer = BufferRenderer::new(frame.buffer_mut(), area, theme);
        layout.draw(&mut renderer);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use typewriter_core::AppConfig;

    use super::*;
    use crate::widgets::ItemListWidget;

    fn app(width: u16, height: u16) -> App {
        let mut config = AppConfig::default();
        config.animation.seed = Some(3);
        let mut app = App::new(Arc::new(config)).unwrap();
        app.on_resize(Rect::new(0, 0, width, height));
        app
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) {
        terminal
            .draw(|frame| {
                let area = frame.area();
                RefreshIndicatorWidget::render(frame, area, app);
                ItemListWidget::render(frame, area, app);
            })
            .unwrap();
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_idle_indicator_is_hidden() {
        let mut app = app(80, 24);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        draw(&mut terminal, &mut app);
        let buffer = terminal.backend().buffer();
        assert!(row(buffer, 0).contains("Item 1"));
        assert!(!row(buffer, 3).contains("-----"));
    }

    #[test]
    fn test_refreshing_machine_sits_above_list() {
        let mut app = app(80, 24);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        app.start_refresh();
        for _ in 0..80 {
            app.tick(Duration::from_millis(16));
        }
        draw(&mut terminal, &mut app);
        let buffer = terminal.backend().buffer();
        // body top edge, the middle key row, then the list below the offset
        assert!(row(buffer, 3).contains("-----"));
        assert!(row(buffer, 5).contains("[]"));
        assert!(row(buffer, 12).contains("Item 1"));
    }
}
