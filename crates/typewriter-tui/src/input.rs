use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use typewriter_core::{PointerEvent, PointerPhase};

use crate::atlas::{CELL_HEIGHT, CELL_WIDTH};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,
    Refresh,
    StopRefresh,
    ToggleEnabled,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollUp,

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::StopRefresh,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::ToggleEnabled,

        _ => Action::None,
    }
}

/// Wheel events scroll the list; everything else is left to the pointer path
pub fn handle_mouse_event(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::ScrollDown => Action::ScrollDown,
        _ => Action::None,
    }
}

/// Translate a left-button mouse event into a pointer event in layout units
/// relative to `area`, aimed at the centre of the cell under the cursor
pub fn pointer_event(mouse: &MouseEvent, area: Rect) -> Option<PointerEvent> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
        _ => return None,
    };
    let col = i32::from(mouse.column) - i32::from(area.x);
    let row = i32::from(mouse.row) - i32::from(area.y);
    let x = col as f32 * CELL_WIDTH + CELL_WIDTH / 2.0;
    let y = row as f32 * CELL_HEIGHT + CELL_HEIGHT / 2.0;
    Some(PointerEvent::new(0, phase, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('r'), KeyModifiers::NONE)), Action::Refresh);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s'), KeyModifiers::NONE)),
            Action::StopRefresh
        );
        assert_eq!(handle_key_event(key(KeyCode::Down, KeyModifiers::NONE)), Action::MoveDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Action::None);
    }

    #[test]
    fn test_left_button_maps_to_pointer_phases() {
        let area = Rect::new(0, 2, 80, 20);
        let down = pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), area);
        let drag = pointer_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5), area);
        let up = pointer_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 5), area);
        assert_eq!(down.map(|e| e.phase), Some(PointerPhase::Down));
        assert_eq!(drag.map(|e| e.phase), Some(PointerPhase::Move));
        assert_eq!(up.map(|e| e.phase), Some(PointerPhase::Up));
    }

    #[test]
    fn test_pointer_coordinates_are_cell_centres() {
        let area = Rect::new(0, 2, 80, 20);
        let event = pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), area);
        let event = event.unwrap();
        assert_eq!(event.x, 42.0);
        assert_eq!(event.y, 42.0);
    }

    #[test]
    fn test_drag_above_area_gives_negative_y() {
        let area = Rect::new(0, 2, 80, 20);
        let event = pointer_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), area);
        assert_eq!(event.unwrap().y, -18.0);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let area = Rect::new(0, 0, 80, 20);
        let right = mouse(MouseEventKind::Down(MouseButton::Right), 1, 1);
        assert!(pointer_event(&right, area).is_none());
        let wheel = mouse(MouseEventKind::ScrollDown, 1, 1);
        assert!(pointer_event(&wheel, area).is_none());
        assert_eq!(handle_mouse_event(&wheel), Action::ScrollDown);
    }
}
