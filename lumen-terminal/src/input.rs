/// Maps terminal events onto the camera state
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use lumen_core::{CameraState, PanDirection, ProjectionMode};

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Viewport size in square "pixels" for a terminal of `columns` x `rows` cells
pub fn viewport(columns: u16, rows: u16) -> (f32, f32) {
    (columns as f32, rows as f32 * CELL_ASPECT)
}

/// Apply one event. Returns [`Action::Quit`] when the user asked to exit.
pub fn apply(event: &Event, camera: &mut CameraState, mode: &mut ProjectionMode) -> Action {
    match event {
        Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Left => camera.pan(PanDirection::Left),
            KeyCode::Right => camera.pan(PanDirection::Right),
            KeyCode::Up => camera.pan(PanDirection::Up),
            KeyCode::Down => camera.pan(PanDirection::Down),
            KeyCode::Char('p') => {
                *mode = mode.toggled();
                log::debug!("projection mode: {mode:?}");
            }
            _ => {}
        },
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => match kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                camera.drag_to(*column as f32 + 0.5, (*row as f32 + 0.5) * CELL_ASPECT);
            }
            MouseEventKind::ScrollUp => camera.scroll(1.0),
            MouseEventKind::ScrollDown => camera.scroll(-1.0),
            _ => {}
        },
        Event::Resize(columns, rows) => {
            let (width, height) = viewport(*columns, *rows);
            camera.resize(width, height);
            log::debug!("resized to {columns}x{rows} cells");
        }
        _ => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut camera = CameraState::default();
        let mut mode = ProjectionMode::Perspective;
        assert_eq!(apply(&key(KeyCode::Esc), &mut camera, &mut mode), Action::Quit);
        assert_eq!(apply(&key(KeyCode::Char('q')), &mut camera, &mut mode), Action::Quit);
        assert_eq!(apply(&key(KeyCode::Char('x')), &mut camera, &mut mode), Action::Continue);
    }

    #[test]
    fn test_arrows_pan() {
        let (w, h) = viewport(100, 25);
        let mut camera = CameraState::new(w, h);
        let mut mode = ProjectionMode::Perspective;
        apply(&key(KeyCode::Right), &mut camera, &mut mode);
        apply(&key(KeyCode::Up), &mut camera, &mut mode);
        assert!((camera.location()[0] - 0.02).abs() < 1e-6);
        assert!((camera.location()[1] - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut camera = CameraState::default();
        let mut mode = ProjectionMode::Perspective;
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        apply(&release, &mut camera, &mut mode);
        assert_eq!(camera.location(), [0.0, 0.0]);
    }

    #[test]
    fn test_toggle_projection() {
        let mut camera = CameraState::default();
        let mut mode = ProjectionMode::Perspective;
        apply(&key(KeyCode::Char('p')), &mut camera, &mut mode);
        assert_eq!(mode, ProjectionMode::Orthographic);
        apply(&key(KeyCode::Char('p')), &mut camera, &mut mode);
        assert_eq!(mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_mouse_drag_and_scroll() {
        let (w, h) = viewport(80, 24);
        let mut camera = CameraState::new(w, h);
        let mut mode = ProjectionMode::Perspective;

        apply(&mouse(MouseEventKind::Drag(MouseButton::Left), 39, 11), &mut camera, &mut mode);
        assert!((camera.location()[0] + 0.0125).abs() < 1e-6);
        assert!((camera.location()[1] - 1.0 / 24.0).abs() < 1e-6);

        apply(&mouse(MouseEventKind::Drag(MouseButton::Right), 0, 0), &mut camera, &mut mode);
        assert!((camera.location()[0] + 0.0125).abs() < 1e-6);

        apply(&mouse(MouseEventKind::ScrollUp, 0, 0), &mut camera, &mut mode);
        apply(&mouse(MouseEventKind::ScrollUp, 0, 0), &mut camera, &mut mode);
        apply(&mouse(MouseEventKind::ScrollDown, 0, 0), &mut camera, &mut mode);
        assert_eq!(camera.scale(), 101.0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut camera = CameraState::default();
        let mut mode = ProjectionMode::Perspective;
        apply(&Event::Resize(120, 30), &mut camera, &mut mode);
        assert_eq!(camera.size(), [120.0, 60.0]);
    }
}
