use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState, Padding},
    Frame,
};
use typewriter_core::ContentView;

use crate::app::App;
use crate::atlas::CELL_HEIGHT;

pub struct ItemListWidget;

impl ItemListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let offset = app.content_rows_offset().min(area.height);
        let list_area = Rect {
            y: area.y + offset,
            height: area.height - offset,
            ..area
        };
        if list_area.height == 0 {
            return;
        }
        let Some(list) = app.layout.content() else {
            return;
        };

        let padding = list.padding();
        let top = (padding.top / CELL_HEIGHT).round() as u16;
        // the part of the bottom padding matching the offset lies below the screen
        let bottom = ((padding.bottom / CELL_HEIGHT).round() as u16).saturating_sub(offset);

        let theme = &app.theme;
        let items: Vec<ListItem> = list
            .items()
            .iter()
            .map(|item| ListItem::new(Line::from(item.as_str())))
            .collect();

        let widget = List::new(items)
            .block(Block::default().padding(Padding::new(1, 1, top, bottom)))
            .style(Style::default().fg(theme.text).bg(theme.background))
            .highlight_style(
                Style::default()
                    .bg(theme.selection)
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default()
            .with_offset(list.offset())
            .with_selected(Some(list.selected()));
        frame.render_stateful_widget(widget, list_area, &mut state);
    }
}
