use log::debug;

use crate::color::Rgb;
use crate::config::{BoardConfig, StrokeConfig, StrokeStyle, Tool};
use crate::error::WhiteboardError;
use crate::history::{History, Snapshot};
use crate::surface::{DirtyRect, Surface};
use crate::Point;

pub const EXPORT_FILE_NAME: &str = "whiteboard.png";

#[derive(Clone, Copy, Debug, PartialEq)]
enum DrawMode {
    Idle,
    Drawing { last: Point, style: StrokeStyle },
}

/// Encoded surface handed to the host for saving.
#[derive(Clone, Debug)]
pub struct PngExport {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Freehand whiteboard: one raster surface, its snapshot history and the
/// pointer state machine driving strokes onto it.
///
/// Every mutating call takes `&mut self` and finishes its pixel work before
/// returning. An undo or redo has therefore fully replaced the surface before
/// the next `pointer_down` can be observed.
#[derive(Debug)]
pub struct Whiteboard {
    surface: Surface,
    history: History,
    board: BoardConfig,
    stroke: StrokeConfig,
    mode: DrawMode,
}

impl Whiteboard {
    /// Creates a blank board and records it as the first history entry.
    pub fn new(width: u32, height: u32, board: BoardConfig) -> Result<Self, WhiteboardError> {
        let surface = Surface::new(width, height, board.background)?;
        let history = History::new(Snapshot::capture(&surface)?, board.max_history);
        let stroke = StrokeConfig {
            width: board.clamp_width(StrokeConfig::default().width),
            ..StrokeConfig::default()
        };
        debug!("whiteboard mounted at {width}x{height}");
        Ok(Self {
            surface,
            history,
            board,
            stroke,
            mode: DrawMode::Idle,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn config(&self) -> StrokeConfig {
        self.stroke
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.mode, DrawMode::Drawing { .. })
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.stroke.tool = tool;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.stroke.color = color;
    }

    pub fn set_color_hex(&mut self, color: &str) -> Result<(), WhiteboardError> {
        self.stroke.color = color.parse()?;
        Ok(())
    }

    pub fn set_width(&mut self, width: u32) -> u32 {
        self.stroke.width = self.board.clamp_width(width);
        self.stroke.width
    }

    /// Starts a stroke at a canvas-local point. Ignored while a stroke is
    /// already active or when the point is not on the surface.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.is_drawing() {
            return false;
        }
        let Some(point) = point.normalized() else {
            return false;
        };
        if !self.surface.contains(point) {
            return false;
        }
        let style = self.stroke.resolve(self.board.background);
        self.mode = DrawMode::Drawing { last: point, style };
        true
    }

    /// Returns the repainted area.
    pub fn pointer_move(&mut self, point: Point) -> Option<DirtyRect> {
        let DrawMode::Drawing { last, style } = self.mode else {
            return None;
        };
        let point = point.normalized()?;
        self.mode = DrawMode::Drawing { last: point, style };
        self.surface.stroke_segment(last, point, style)
    }

    pub fn pointer_up(&mut self) -> Result<bool, WhiteboardError> {
        self.finish_stroke()
    }

    /// Leaving the canvas commits the stroke the same way a release does.
    pub fn pointer_leave(&mut self) -> Result<bool, WhiteboardError> {
        self.finish_stroke()
    }

    fn finish_stroke(&mut self) -> Result<bool, WhiteboardError> {
        if !self.is_drawing() {
            return Ok(false);
        }
        self.mode = DrawMode::Idle;
        self.commit()?;
        Ok(true)
    }

    pub fn commit(&mut self) -> Result<(), WhiteboardError> {
        let snapshot = Snapshot::capture(&self.surface)?;
        self.history.push(snapshot);
        debug!(
            "committed snapshot, history={} redo={}",
            self.history.len(),
            self.history.redo_len()
        );
        Ok(())
    }

    /// Restores the previous snapshot. Returns `false` when only the
    /// initial snapshot is left.
    pub fn undo(&mut self) -> Result<bool, WhiteboardError> {
        self.finish_stroke()?;
        let Some(snapshot) = self.history.undo_target() else {
            return Ok(false);
        };
        // stacks only move once the pixels are back
        self.surface.restore_png(snapshot.bytes())?;
        self.history.undo();
        debug!(
            "undo, history={} redo={}",
            self.history.len(),
            self.history.redo_len()
        );
        Ok(true)
    }

    pub fn redo(&mut self) -> Result<bool, WhiteboardError> {
        self.finish_stroke()?;
        let Some(snapshot) = self.history.redo_target() else {
            return Ok(false);
        };
        self.surface.restore_png(snapshot.bytes())?;
        self.history.redo();
        debug!(
            "redo, history={} redo={}",
            self.history.len(),
            self.history.redo_len()
        );
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), WhiteboardError> {
        self.finish_stroke()?;
        self.surface.fill(self.board.background);
        debug!("cleared board");
        self.commit()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn export_png(&self) -> Result<PngExport, WhiteboardError> {
        Ok(PngExport {
            file_name: EXPORT_FILE_NAME,
            bytes: self.surface.encode_png()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Whiteboard {
        Whiteboard::new(64, 48, BoardConfig::default()).unwrap()
    }

    #[test]
    fn new_board_has_one_snapshot() {
        let board = board();
        assert_eq!(board.history_len(), 1);
        assert_eq!(board.redo_len(), 0);
        assert!(!board.can_undo());
        assert!(!board.is_drawing());
    }

    #[test]
    fn moves_before_pointer_down_are_ignored() {
        let mut board = board();
        assert_eq!(board.pointer_move(Point::new(10.0, 10.0)), None);
        assert!(!board.pointer_up().unwrap());
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn pointer_down_outside_surface_is_rejected() {
        let mut board = board();
        assert!(!board.pointer_down(Point::new(-1.0, 5.0)));
        assert!(!board.pointer_down(Point::new(64.0, 5.0)));
        assert!(!board.pointer_down(Point::new(f32::NAN, 5.0)));
        assert!(!board.is_drawing());
    }

    #[test]
    fn second_pointer_down_does_not_restart_stroke() {
        let mut board = board();
        assert!(board.pointer_down(Point::new(1.0, 1.0)));
        assert!(!board.pointer_down(Point::new(30.0, 30.0)));
        assert!(board.is_drawing());
    }

    #[test]
    fn pointer_leave_commits_like_pointer_up() {
        let mut board = board();
        board.pointer_down(Point::new(5.0, 5.0));
        board.pointer_move(Point::new(20.0, 20.0));
        assert!(board.pointer_leave().unwrap());
        assert!(!board.pointer_leave().unwrap());
        assert_eq!(board.history_len(), 2);
    }

    #[test]
    fn undo_during_stroke_commits_it_first() {
        let mut board = board();
        board.pointer_down(Point::new(5.0, 5.0));
        board.pointer_move(Point::new(20.0, 20.0));
        assert!(board.undo().unwrap());
        assert!(!board.is_drawing());
        assert_eq!(board.history_len(), 1);
        assert_eq!(board.redo_len(), 1);
    }

    #[test]
    fn failed_undo_leaves_history_and_pixels_alone() {
        let mut board = board();
        board.history.push(Snapshot::from_png(b"not a png".to_vec()));
        board.pointer_down(Point::new(5.0, 5.0));
        board.pointer_move(Point::new(20.0, 20.0));
        board.pointer_up().unwrap();
        let drawn = board.surface().data().to_vec();

        assert!(matches!(board.undo(), Err(WhiteboardError::Decode(_))));
        assert_eq!(board.history_len(), 3);
        assert_eq!(board.redo_len(), 0);
        assert!(board.surface().data() == drawn.as_slice());
    }

    #[test]
    fn failed_redo_leaves_history_and_pixels_alone() {
        let mut board = board();
        board.history.push(Snapshot::from_png(b"not a png".to_vec()));
        assert!(board.undo().unwrap());
        let blank = board.surface().data().to_vec();

        assert!(matches!(board.redo(), Err(WhiteboardError::Decode(_))));
        assert_eq!(board.history_len(), 1);
        assert_eq!(board.redo_len(), 1);
        assert!(board.can_redo());
        assert!(board.surface().data() == blank.as_slice());
    }

    #[test]
    fn width_is_clamped() {
        let mut board = board();
        assert_eq!(board.set_width(0), 1);
        assert_eq!(board.set_width(99), 20);
        assert_eq!(board.config().width, 20);
    }

    #[test]
    fn bad_hex_leaves_color_unchanged() {
        let mut board = board();
        board.set_color_hex("#ff0000").unwrap();
        assert!(matches!(
            board.set_color_hex("ff0000"),
            Err(WhiteboardError::Color(_))
        ));
        assert_eq!(board.config().color, Rgb::new(0xff, 0, 0));
    }

    #[test]
    fn export_uses_fixed_file_name() {
        let export = board().export_png().unwrap();
        assert_eq!(export.file_name, "whiteboard.png");
        assert!(export.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
