use egui::{Context, Key, Pos2, Rect, Response};

/// A pointer event on the canvas, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed: a gesture begins. The press position follows
    /// as the first sampled move.
    Down,
    /// Pointer moved. `sample` is true while the button is held, so the
    /// position belongs to the gesture; otherwise it only drives the cursor
    /// overlay.
    Move { pos: Pos2, sample: bool },
    /// Primary button released: the gesture commits.
    Up,
}

/// History navigation requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Translates this frame's canvas interaction into pointer events.
///
/// Built on the drag cycle of the allocated canvas response: press yields
/// `Down` plus an immediate sampled `Move`, held movement yields sampled
/// moves (following the pointer even outside the canvas rect), release
/// yields `Up`. Plain hovering yields unsampled moves.
pub fn pointer_events(response: &Response, canvas_rect: Rect) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let to_canvas = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

    if response.drag_started() {
        events.push(PointerEvent::Down);
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Move {
                pos: to_canvas(pos),
                sample: true,
            });
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Move {
                pos: to_canvas(pos),
                sample: true,
            });
        }
    } else if let Some(pos) = response.hover_pos() {
        events.push(PointerEvent::Move {
            pos: to_canvas(pos),
            sample: false,
        });
    }

    if response.drag_stopped() {
        events.push(PointerEvent::Up);
    }

    events
}

/// Keyboard mapping for history navigation: left/right arrows, with
/// Ctrl+Z / Ctrl+Shift+Z / Ctrl+Y as aliases.
///
/// Returns nothing while a text field has focus, so typing in the console
/// never walks history.
pub fn history_action(ctx: &Context) -> Option<HistoryAction> {
    if ctx.wants_keyboard_input() {
        return None;
    }
    ctx.input(|input| {
        let undo = input.key_pressed(Key::ArrowLeft)
            || (input.modifiers.command && !input.modifiers.shift && input.key_pressed(Key::Z));
        let redo = input.key_pressed(Key::ArrowRight)
            || (input.modifiers.command && input.modifiers.shift && input.key_pressed(Key::Z))
            || (input.modifiers.command && input.key_pressed(Key::Y));
        if undo {
            Some(HistoryAction::Undo)
        } else if redo {
            Some(HistoryAction::Redo)
        } else {
            None
        }
    })
}
