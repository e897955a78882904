use egui::pos2;
use paintlog::command::Command;
use paintlog::history::{fold_state, CommandHistory};
use paintlog::state::{DrawState, ShapeMode};
use paintlog::stroke::Stroke;

// Helper to build a stroke entry with a single sample
fn stroke_at(x: f32, y: f32) -> Command {
    Command::AddStroke(Stroke::new(vec![pos2(x, y)], DrawState::default()))
}

fn state_with_pen_size(pen_size: f32) -> Command {
    Command::SetState(DrawState {
        pen_size,
        ..DrawState::default()
    })
}

#[test]
fn test_push_advances_cursor_to_end() {
    let mut history = CommandHistory::new();
    assert!(history.is_empty());

    history.push(stroke_at(0.0, 0.0));
    history.push(stroke_at(1.0, 1.0));

    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 2);
    assert!(!history.can_redo());
}

#[test]
fn test_undo_redo_move_cursor_without_touching_entries() {
    let mut history = CommandHistory::new();
    history.push(stroke_at(0.0, 0.0));
    history.push(stroke_at(1.0, 1.0));
    history.push(stroke_at(2.0, 2.0));

    history.undo();
    history.undo();
    assert_eq!(history.cursor(), 1);
    assert_eq!(history.len(), 3, "undo must not discard entries");
    assert_eq!(history.visible().len(), 1);

    history.redo();
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.visible().len(), 2);
}

#[test]
fn test_undo_stops_at_floor() {
    let mut history = CommandHistory::new();
    history.push(Command::SetState(DrawState::default()));
    history.push(Command::Clear);
    history.pin_floor();
    history.push(stroke_at(0.0, 0.0));

    history.undo();
    assert_eq!(history.cursor(), 2);
    assert!(!history.can_undo());

    // further undos are no-ops
    history.undo();
    history.undo();
    assert_eq!(history.cursor(), 2);
}

#[test]
fn test_redo_stops_at_end() {
    let mut history = CommandHistory::new();
    history.push(stroke_at(0.0, 0.0));

    history.redo();
    assert_eq!(history.cursor(), 1);
    assert!(!history.can_redo());
}

#[test]
fn test_push_after_undo_truncates_future() {
    let mut history = CommandHistory::new();
    history.push(stroke_at(0.0, 0.0));
    history.push(stroke_at(1.0, 1.0));
    history.push(stroke_at(2.0, 2.0));

    history.undo();
    history.undo();
    assert!(history.can_redo());

    history.push(stroke_at(9.0, 9.0));

    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 2);
    assert!(!history.can_redo(), "push must destroy the undone future");

    // the replacement entry is the one just pushed
    match &history.entries()[1] {
        Command::AddStroke(stroke) => assert_eq!(stroke.points()[0], pos2(9.0, 9.0)),
        other => panic!("unexpected entry {other:?}"),
    }
}

#[test]
fn test_push_without_undo_never_truncates() {
    let mut history = CommandHistory::new();
    for i in 0..20 {
        history.push(stroke_at(i as f32, 0.0));
        assert_eq!(history.len(), i + 1);
        assert_eq!(history.cursor(), history.len());
    }
}

#[test]
fn test_cursor_and_floor_invariant_under_interleaving() {
    let mut history = CommandHistory::new();
    history.push(Command::Clear);
    history.pin_floor();

    // deterministic mix of operations; the invariant must hold throughout
    for step in 0..200 {
        match step % 5 {
            0 | 1 => history.push(stroke_at(step as f32, 0.0)),
            2 => history.undo(),
            3 => history.redo(),
            _ => history.undo(),
        }
        assert!(history.floor() <= history.cursor());
        assert!(history.cursor() <= history.len());
        assert_eq!(history.visible().len(), history.cursor());
    }
}

#[test]
fn test_fold_state_last_write_wins() {
    let entries = vec![
        state_with_pen_size(3.0),
        stroke_at(0.0, 0.0),
        state_with_pen_size(7.0),
        Command::Clear,
        stroke_at(1.0, 1.0),
    ];

    let folded = fold_state(&entries, DrawState::default());
    assert_eq!(folded.pen_size, 7.0);
}

#[test]
fn test_fold_state_of_empty_prefix_is_seed() {
    let seed = DrawState {
        eraser: true,
        mode: ShapeMode::Path,
        ..DrawState::default()
    };
    let folded = fold_state(&[], seed);
    assert_eq!(folded, seed);
}

#[test]
fn test_fold_visible_tracks_cursor() {
    let mut history = CommandHistory::new();
    history.push(state_with_pen_size(5.0));
    history.push(state_with_pen_size(11.0));

    assert_eq!(history.fold_visible().pen_size, 11.0);

    history.undo();
    assert_eq!(
        history.fold_visible().pen_size,
        5.0,
        "folding must only see the visible prefix"
    );

    history.undo();
    assert_eq!(history.fold_visible(), DrawState::default());
}

#[test]
fn test_clear_marker_does_not_move_floor() {
    let mut history = CommandHistory::new();
    history.push(Command::SetState(DrawState::default()));
    history.push(Command::Clear);
    history.pin_floor();

    history.push(stroke_at(0.0, 0.0));
    history.push(Command::Clear);
    history.push(stroke_at(1.0, 1.0));

    // undo can walk back through the later clear
    history.undo();
    history.undo();
    history.undo();
    assert_eq!(history.cursor(), history.floor());
    assert_eq!(history.floor(), 2);
}
