use egui::{pos2, vec2, Color32, Pos2, Rect};
use paintlog::backend::{FillRule, PaintBackend};
use paintlog::editor::Editor;
use paintlog::image::{ImageId, PlacedImage};
use paintlog::renderer::{paint_preview, replay};
use paintlog::state::ShapeMode;

/// Backend that records every paint call instead of drawing.
#[derive(Debug, Clone, PartialEq)]
enum DrawCall {
    Clear(Color32),
    Polyline(Vec<Pos2>, Color32),
    Disc {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Path {
        len: usize,
        rule: FillRule,
        color: Color32,
    },
    Blit {
        id: ImageId,
        rect: Rect,
    },
}

#[derive(Default)]
struct RecordBackend {
    calls: Vec<DrawCall>,
}

impl PaintBackend for RecordBackend {
    fn clear(&mut self, color: Color32) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn polyline(&mut self, points: &[Pos2], color: Color32, _width: f32) {
        self.calls.push(DrawCall::Polyline(points.to_vec(), color));
    }

    fn filled_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.calls.push(DrawCall::Disc {
            center,
            radius,
            color,
        });
    }

    fn filled_path(&mut self, points: &[Pos2], rule: FillRule, color: Color32) {
        self.calls.push(DrawCall::Path {
            len: points.len(),
            rule,
            color,
        });
    }

    fn blit_image(&mut self, image: &PlacedImage, rect: Rect) {
        self.calls.push(DrawCall::Blit {
            id: image.id(),
            rect,
        });
    }
}

fn record(editor: &Editor) -> Vec<DrawCall> {
    let mut backend = RecordBackend::default();
    replay(editor.history(), &mut backend);
    backend.calls
}

fn drag(editor: &mut Editor, points: &[(f32, f32)]) {
    editor.begin_stroke();
    for &(x, y) in points {
        editor.add_point(pos2(x, y));
    }
    editor.commit_stroke();
}

#[test]
fn test_replay_starts_with_background_clear() {
    let editor = Editor::new(Color32::from_rgb(40, 0, 0));
    let calls = record(&editor);
    assert_eq!(calls, vec![DrawCall::Clear(Color32::from_rgb(40, 0, 0))]);
}

#[test]
fn test_replay_is_deterministic() {
    let mut editor = Editor::default();
    drag(&mut editor, &[(1.0, 1.0), (2.0, 2.0)]);
    editor.set_mode(ShapeMode::Path);
    drag(&mut editor, &[(0.0, 0.0), (9.0, 0.0), (4.0, 8.0)]);

    let first = record(&editor);
    let second = record(&editor);
    assert_eq!(first, second, "replay must not mutate the log");
}

#[test]
fn test_freehand_stroke_becomes_one_disc_per_sample() {
    let mut editor = Editor::default();
    editor.set_pen_size(6.0);
    drag(&mut editor, &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);

    let discs: Vec<_> = record(&editor)
        .into_iter()
        .filter_map(|call| match call {
            DrawCall::Disc { center, radius, color } => Some((center, radius, color)),
            _ => None,
        })
        .collect();

    assert_eq!(discs.len(), 3);
    for (i, &(center, radius, color)) in discs.iter().enumerate() {
        assert_eq!(center, pos2((i + 1) as f32, (i + 1) as f32));
        assert_eq!(radius, 6.0);
        assert_eq!(color, Color32::WHITE);
    }
}

#[test]
fn test_path_stroke_fills_nonzero() {
    let mut editor = Editor::default();
    editor.set_mode(ShapeMode::Path);
    drag(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);

    let calls = record(&editor);
    assert!(calls.contains(&DrawCall::Path {
        len: 3,
        rule: FillRule::NonZero,
        color: Color32::WHITE,
    }));
}

#[test]
fn test_clear_skips_earlier_strokes() {
    let mut editor = Editor::default();
    drag(&mut editor, &[(1.0, 1.0)]);
    editor.clear();
    drag(&mut editor, &[(7.0, 7.0)]);

    let calls = record(&editor);
    assert_eq!(
        calls,
        vec![
            DrawCall::Clear(Color32::BLACK),
            DrawCall::Disc {
                center: pos2(7.0, 7.0),
                radius: 10.0,
                color: Color32::WHITE,
            },
        ]
    );
}

#[test]
fn test_undoing_clear_revives_earlier_strokes() {
    let mut editor = Editor::default();
    drag(&mut editor, &[(1.0, 1.0)]);
    editor.clear();

    assert_eq!(record(&editor).len(), 1, "only the background clear remains");

    editor.undo();
    let calls = record(&editor);
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[1], DrawCall::Disc { center, .. } if center == pos2(1.0, 1.0)));
}

#[test]
fn test_background_comes_from_folded_state() {
    let mut editor = Editor::default();
    drag(&mut editor, &[(1.0, 1.0)]);
    editor.set_background(Color32::from_rgb(0, 80, 0));

    let calls = record(&editor);
    assert_eq!(calls[0], DrawCall::Clear(Color32::from_rgb(0, 80, 0)));
}

#[test]
fn test_eraser_paints_with_frozen_background() {
    let blue = Color32::from_rgb(0, 0, 200);
    let red = Color32::from_rgb(200, 0, 0);

    let mut editor = Editor::new(blue);
    editor.set_eraser(true);
    drag(&mut editor, &[(5.0, 5.0)]);

    // later background change must not recolor the recorded eraser stroke
    editor.set_eraser(false);
    editor.set_background(red);

    let calls = record(&editor);
    assert_eq!(calls[0], DrawCall::Clear(red));
    assert!(
        matches!(calls[1], DrawCall::Disc { color, .. } if color == blue),
        "eraser stroke keeps the background it was recorded with"
    );
}

#[test]
fn test_undone_entries_are_not_painted() {
    let mut editor = Editor::default();
    drag(&mut editor, &[(1.0, 1.0)]);
    drag(&mut editor, &[(2.0, 2.0)]);

    editor.undo();
    let calls = record(&editor);

    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[1], DrawCall::Disc { center, .. } if center == pos2(1.0, 1.0)));
}

#[test]
fn test_image_entry_blits_into_its_rect() {
    let mut editor = Editor::default();
    let target = std::env::temp_dir().join("paintlog_blit_test.png");
    image::RgbaImage::from_pixel(4, 2, image::Rgba([1, 2, 3, 255]))
        .save(&target)
        .unwrap();

    editor.load_image(&target);
    std::fs::remove_file(&target).ok();

    let calls = record(&editor);
    assert_eq!(calls.len(), 2);
    match calls[1] {
        DrawCall::Blit { rect, .. } => {
            assert_eq!(rect, Rect::from_min_size(pos2(0.0, 0.0), vec2(4.0, 2.0)));
        }
        ref other => panic!("expected a blit, got {other:?}"),
    }
}

#[test]
fn test_preview_is_translucent_and_unlogged() {
    let mut editor = Editor::default();
    editor.begin_stroke();
    editor.add_point(pos2(3.0, 3.0));

    let mut backend = RecordBackend::default();
    paint_preview(editor.pending().points(), editor.state(), &mut backend);

    match backend.calls[0] {
        DrawCall::Disc { color, .. } => {
            assert!(color.a() < 255, "preview must not be fully opaque");
        }
        ref other => panic!("expected a disc, got {other:?}"),
    }

    // previewing leaves the log untouched
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_export_matches_replay_pixels() {
    let mut editor = Editor::new(Color32::from_rgb(10, 10, 10));
    editor.set_pen_size(3.0);
    editor.set_brush_color(Color32::from_rgb(250, 250, 0));
    drag(&mut editor, &[(16.0, 16.0)]);

    let rendered = editor.render_to_image(32, 32);

    assert_eq!(rendered.dimensions(), (32, 32));
    assert_eq!(rendered.get_pixel(0, 0).0, [10, 10, 10, 255]);
    assert_eq!(rendered.get_pixel(16, 16).0, [250, 250, 0, 255]);
}

#[test]
fn test_export_erased_region_matches_background() {
    let bg = Color32::from_rgb(30, 30, 30);
    let mut editor = Editor::new(bg);
    editor.set_pen_size(8.0);
    drag(&mut editor, &[(16.0, 16.0)]);

    editor.set_eraser(true);
    drag(&mut editor, &[(16.0, 16.0)]);

    let rendered = editor.render_to_image(32, 32);
    assert_eq!(rendered.get_pixel(16, 16).0, [30, 30, 30, 255]);
}

#[test]
fn test_export_with_oversized_pen_covers_canvas() {
    // a pen far wider than the target must cost one buffer pass, not one
    // iteration per brush pixel
    let mut editor = Editor::default();
    editor.set_pen_size(1_000_000.0);
    editor.set_brush_color(Color32::from_rgb(0, 200, 0));
    drag(&mut editor, &[(8.0, 8.0)]);

    let rendered = editor.render_to_image(16, 16);
    assert!(rendered.pixels().all(|p| p.0 == [0, 200, 0, 255]));
}

#[test]
fn test_path_export_fills_self_intersecting_outline() {
    // five-point star drawn in path mode: the center must fill
    let mut editor = Editor::new(Color32::BLACK);
    editor.set_mode(ShapeMode::Path);

    let center = pos2(20.0, 20.0);
    let radius = 15.0;
    editor.begin_stroke();
    for i in 0..5 {
        let angle =
            std::f32::consts::TAU * (2.0 * i as f32) / 5.0 - std::f32::consts::FRAC_PI_2;
        editor.add_point(pos2(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    editor.commit_stroke();

    let rendered = editor.render_to_image(40, 40);
    assert_eq!(rendered.get_pixel(20, 20).0, [255, 255, 255, 255]);
}
