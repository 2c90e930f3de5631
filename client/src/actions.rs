use web_sys::PointerEvent;

use whiteboard_shared::Tool;

use crate::dom::event_to_point;
use crate::render::{blit_region, redraw};
use crate::state::State;

pub fn start_stroke(state: &mut State, event: &PointerEvent) -> bool {
    if state.active_pointer.is_some() {
        return false;
    }
    let Some(point) = event_to_point(&state.canvas, event) else {
        return false;
    };
    if !state.board.pointer_down(point) {
        return false;
    }
    state.active_pointer = Some(event.pointer_id());
    true
}

pub fn move_stroke(state: &mut State, event: &PointerEvent) {
    if state.active_pointer != Some(event.pointer_id()) {
        return;
    }
    let Some(point) = event_to_point(&state.canvas, event) else {
        return;
    };
    if let Some(rect) = state.board.pointer_move(point) {
        blit_region(state, rect);
    }
}

/// Ends the stroke owned by `pointer_id`. Returns whether history changed.
pub fn end_stroke(state: &mut State, pointer_id: i32, left_canvas: bool) -> bool {
    if state.active_pointer != Some(pointer_id) {
        return false;
    }
    state.active_pointer = None;
    let result = if left_canvas {
        state.board.pointer_leave()
    } else {
        state.board.pointer_up()
    };
    match result {
        Ok(committed) => committed,
        Err(error) => {
            log::error!("Failed to commit stroke: {error}");
            false
        }
    }
}

pub fn undo(state: &mut State) {
    state.active_pointer = None;
    match state.board.undo() {
        Ok(true) => redraw(state),
        Ok(false) => {}
        Err(error) => log::error!("Undo failed: {error}"),
    }
}

pub fn redo(state: &mut State) {
    state.active_pointer = None;
    match state.board.redo() {
        Ok(true) => redraw(state),
        Ok(false) => {}
        Err(error) => log::error!("Redo failed: {error}"),
    }
}

pub fn clear_board(state: &mut State) {
    state.active_pointer = None;
    if let Err(error) = state.board.clear() {
        log::error!("Clear failed: {error}");
    }
    redraw(state);
}

pub fn apply_color(state: &mut State, value: &str) {
    if let Err(error) = state.board.set_color_hex(value) {
        log::warn!("Ignoring color {value:?}: {error}");
    }
}

/// Applies the width slider value and returns the width actually stored.
pub fn apply_width(state: &mut State, value: f64) -> u32 {
    if !value.is_finite() {
        return state.board.config().width;
    }
    state.board.set_width(value.max(0.0).round() as u32)
}

pub fn apply_tool(state: &mut State, tool: Tool) {
    state.board.set_tool(tool);
}
