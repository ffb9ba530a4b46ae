use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let item_count = app.layout.content().map_or(0, |list| list.len());
        let last_refresh = app
            .last_refreshed
            .map(|time| time.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", app.state_label(), msg)
        } else {
            format!(
                " {} | Items: {} | Refreshes: {} | Last: {}",
                app.state_label(),
                item_count,
                app.completed_refreshes,
                last_refresh
            )
        };

        let help_hint = " q:quit r:refresh s:stop e:enable j/k:move drag:pull ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.status_fg).bg(theme.status_bg)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.status_bg)),
            Span::styled(help_hint, Style::default().fg(theme.hint).bg(theme.status_bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
