use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use whiteboard_shared::Whiteboard;

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub board: Whiteboard,
    /// Pointer that owns the stroke in progress. Other pointers are ignored
    /// until it is released.
    pub active_pointer: Option<i32>,
}

impl State {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, board: Whiteboard) -> Self {
        Self {
            canvas,
            ctx,
            board,
            active_pointer: None,
        }
    }
}
