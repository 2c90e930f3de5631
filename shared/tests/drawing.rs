//! Integration tests: pointer state machine and stroke configuration.

use pretty_assertions::assert_eq;
use whiteboard_shared::{
    BoardConfig, Point, Rgb, StrokeConfig, Surface, Tool, Whiteboard, EXPORT_FILE_NAME,
};

const RED: Rgb = Rgb::new(0xff, 0, 0);

fn make_board() -> Whiteboard {
    Whiteboard::new(200, 100, BoardConfig::default()).unwrap()
}

fn horizontal(board: &mut Whiteboard, y: f32) {
    assert!(board.pointer_down(Point::new(20.0, y)));
    board.pointer_move(Point::new(180.0, y));
    board.pointer_up().unwrap();
}

// ─── Eraser ─────────────────────────────────────────────────────────────

#[test]
fn eraser_paints_background_at_double_width() {
    let mut board = make_board();
    board.set_color(RED);
    board.set_width(10);
    horizontal(&mut board, 25.0);
    assert_eq!(board.surface().pixel(100, 26), Some(RED));

    board.set_tool(Tool::Eraser);
    board.set_width(2);
    horizontal(&mut board, 25.0);

    let surface = board.surface();
    // width 2 doubled covers rows 23..27
    assert_eq!(surface.pixel(100, 23), Some(Rgb::WHITE));
    assert_eq!(surface.pixel(100, 26), Some(Rgb::WHITE));
    assert_eq!(surface.pixel(100, 28), Some(RED));
    assert_eq!(surface.pixel(100, 21), Some(RED));
}

#[test]
fn eraser_keeps_stored_color() {
    let mut board = make_board();
    board.set_color(RED);
    board.set_tool(Tool::Eraser);
    horizontal(&mut board, 50.0);
    assert_eq!(
        board.config(),
        StrokeConfig {
            tool: Tool::Eraser,
            color: RED,
            width: 2,
        }
    );
}

// ─── Configuration timing ───────────────────────────────────────────────

#[test]
fn config_changes_apply_to_next_stroke_only() {
    let mut board = make_board();
    board.set_width(6);
    assert!(board.pointer_down(Point::new(20.0, 30.0)));
    board.set_color(RED);
    board.set_tool(Tool::Eraser);
    board.pointer_move(Point::new(180.0, 30.0));
    board.pointer_up().unwrap();
    assert_eq!(board.surface().pixel(100, 30), Some(Rgb::BLACK));

    board.set_tool(Tool::Pen);
    horizontal(&mut board, 70.0);
    assert_eq!(board.surface().pixel(100, 70), Some(RED));
}

#[test]
fn config_changes_do_not_touch_history() {
    let mut board = make_board();
    let before = board.surface().data().to_vec();
    board.set_color(RED);
    board.set_width(15);
    board.set_tool(Tool::Eraser);
    assert_eq!(board.history_len(), 1);
    assert!(board.surface().data() == before.as_slice());
}

// ─── Session lifecycle ──────────────────────────────────────────────────

#[test]
fn pointer_down_paints_nothing_until_moved() {
    let mut board = make_board();
    let before = board.surface().data().to_vec();
    assert!(board.pointer_down(Point::new(50.0, 50.0)));
    assert!(board.surface().data() == before.as_slice());

    // a tap still commits, with an unchanged surface
    assert!(board.pointer_up().unwrap());
    assert_eq!(board.history_len(), 2);
}

#[test]
fn move_returns_dirty_rect_only_while_drawing() {
    let mut board = make_board();
    assert_eq!(board.pointer_move(Point::new(10.0, 10.0)), None);

    board.pointer_down(Point::new(10.0, 10.0));
    let rect = board.pointer_move(Point::new(40.0, 10.0)).unwrap();
    assert!(rect.x <= 10 && rect.x + rect.width >= 40);
    assert_eq!(board.pointer_move(Point::new(f32::NAN, 1.0)), None);

    board.pointer_up().unwrap();
    assert_eq!(board.pointer_move(Point::new(60.0, 10.0)), None);
}

#[test]
fn stroke_may_wander_off_surface_after_starting() {
    let mut board = make_board();
    board.pointer_down(Point::new(190.0, 50.0));
    board.pointer_move(Point::new(250.0, 50.0));
    assert!(board.pointer_up().unwrap());
    assert_ne!(board.surface().pixel(195, 50), Some(Rgb::WHITE));
}

// ─── Export ─────────────────────────────────────────────────────────────

#[test]
fn export_decodes_to_surface() {
    let mut board = make_board();
    horizontal(&mut board, 50.0);
    let export = board.export_png().unwrap();
    assert_eq!(export.file_name, EXPORT_FILE_NAME);

    let mut decoded = Surface::new(200, 100, Rgb::WHITE).unwrap();
    decoded.restore_png(&export.bytes).unwrap();
    assert!(decoded.data() == board.surface().data());
}

#[test]
fn rejects_unallocatable_board() {
    assert!(Whiteboard::new(0, 0, BoardConfig::default()).is_err());
}
