use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, HtmlSpanElement,
    PointerEvent, Window,
};

use whiteboard_shared::{BoardConfig, Point, Tool, Whiteboard};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

pub fn update_size_label(value: &HtmlSpanElement, width: u32) {
    value.set_text_content(Some(&format!("{width}px")));
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn sync_tool_buttons(pen: &HtmlButtonElement, eraser: &HtmlButtonElement, tool: Tool) {
    set_tool_button(pen, tool == Tool::Pen);
    set_tool_button(eraser, tool == Tool::Eraser);
}

pub fn sync_history_buttons(
    undo: &HtmlButtonElement,
    redo: &HtmlButtonElement,
    board: &Whiteboard,
) {
    undo.set_disabled(!board.can_undo());
    redo.set_disabled(!board.can_redo());
}

pub fn sync_width_input(input: &HtmlInputElement, board: &BoardConfig, width: u32) {
    input.set_min(&board.min_width.to_string());
    input.set_max(&board.max_width.to_string());
    input.set_value(&width.to_string());
}

/// Sizes the canvas backing store to its laid-out size. Done once at mount.
pub fn mount_canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = canvas.offset_width().max(0) as u32;
    let height = canvas.offset_height().max(0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

/// Reads optional board options from the canvas `data-config` attribute.
pub fn read_board_config(canvas: &HtmlCanvasElement) -> BoardConfig {
    let Some(raw) = canvas.get_attribute("data-config") else {
        return BoardConfig::default();
    };
    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(error) => {
            log::warn!("Ignoring invalid data-config: {error}");
            BoardConfig::default()
        }
    }
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let origin = Point::new(rect.left() as f32, rect.top() as f32);
    Point::new(event.client_x() as f32, event.client_y() as f32)
        .relative_to(origin)
        .normalized()
}
