use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement,
    HtmlSpanElement, KeyboardEvent, PointerEvent,
};

use whiteboard_shared::{Tool, Whiteboard};

use crate::actions::{
    apply_color, apply_tool, apply_width, clear_board, end_stroke, move_stroke, redo, start_stroke,
    undo,
};
use crate::dom::{
    debug_enabled, get_element, mount_canvas_size, read_board_config,
    sync_history_buttons, sync_tool_buttons, sync_width_input, update_size_label,
};
use crate::export::download_png;
use crate::render::redraw;
use crate::state::State;

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let level = if debug_enabled(&window) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger already set: {err}")));
    }
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            log::error!("Whiteboard failed to start: {err:?}");
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let pen_button: HtmlButtonElement = get_element(&document, "pen")?;
    let eraser_button: HtmlButtonElement = get_element(&document, "eraser")?;
    let color_input: HtmlInputElement = get_element(&document, "color")?;
    let size_input: HtmlInputElement = get_element(&document, "size")?;
    let size_value: HtmlSpanElement = get_element(&document, "sizeValue")?;
    let undo_button: HtmlButtonElement = get_element(&document, "undo")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redo")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let download_button: HtmlButtonElement = get_element(&document, "download")?;

    let (width, height) = mount_canvas_size(&canvas);
    let config = read_board_config(&canvas);
    let board = Whiteboard::new(width, height, config)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    log::debug!("Whiteboard ready at {width}x{height}");

    let state = Rc::new(RefCell::new(State::new(canvas.clone(), ctx, board)));

    {
        let state = state.borrow();
        let stroke = state.board.config();
        color_input.set_value(&stroke.color.to_hex());
        sync_width_input(&size_input, state.board.board(), stroke.width);
        update_size_label(&size_value, stroke.width);
        sync_tool_buttons(&pen_button, &eraser_button, stroke.tool);
        sync_history_buttons(&undo_button, &redo_button, &state.board);
        redraw(&state);
    }

    {
        let color_state = state.clone();
        let color_input_cb = color_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = color_state.borrow_mut();
            apply_color(&mut state, &color_input_cb.value());
        });
        color_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let size_state = state.clone();
        let size_input_cb = size_input.clone();
        let size_value_cb = size_value.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = size_state.borrow_mut();
            let width = apply_width(&mut state, size_input_cb.value_as_number());
            update_size_label(&size_value_cb, width);
        });
        size_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    for (button, tool) in [
        (pen_button.clone(), Tool::Pen),
        (eraser_button.clone(), Tool::Eraser),
    ] {
        let tool_state = state.clone();
        let pen_button = pen_button.clone();
        let eraser_button = eraser_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = tool_state.borrow_mut();
            apply_tool(&mut state, tool);
            sync_tool_buttons(&pen_button, &eraser_button, tool);
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let undo_state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = undo_state.borrow_mut();
            undo(&mut state);
            sync_history_buttons(&undo_button_cb, &redo_button_cb, &state.board);
        });
        undo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let redo_state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = redo_state.borrow_mut();
            redo(&mut state);
            sync_history_buttons(&undo_button_cb, &redo_button_cb, &state.board);
        });
        redo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let clear_state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = clear_state.borrow_mut();
            clear_board(&mut state);
            sync_history_buttons(&undo_button_cb, &redo_button_cb, &state.board);
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let download_state = state.clone();
        let document = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let export = match download_state.borrow().board.export_png() {
                Ok(export) => export,
                Err(error) => {
                    log::error!("Failed to encode PNG: {error}");
                    return;
                }
            };
            if let Err(err) = download_png(&document, &export) {
                log::error!("Download failed: {err:?}");
            }
        });
        download_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let key_state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if !(event.meta_key() || event.ctrl_key()) {
                return;
            }
            let key = event.key();
            let mut state = key_state.borrow_mut();
            if event.shift_key() && key.eq_ignore_ascii_case("z") {
                event.prevent_default();
                redo(&mut state);
            } else if key.eq_ignore_ascii_case("z") {
                event.prevent_default();
                undo(&mut state);
            } else if key.eq_ignore_ascii_case("y") {
                event.prevent_default();
                redo(&mut state);
            } else {
                return;
            }
            sync_history_buttons(&undo_button_cb, &redo_button_cb, &state.board);
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let down_state = state.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let mut state = down_state.borrow_mut();
            if start_stroke(&mut state, &event) {
                event.prevent_default();
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            move_stroke(&mut state, &event);
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let stop_state = state.clone();
        let undo_button_cb = undo_button.clone();
        let redo_button_cb = redo_button.clone();
        let onstop = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let left_canvas = event.type_() != "pointerup";
            let mut state = stop_state.borrow_mut();
            if end_stroke(&mut state, event.pointer_id(), left_canvas) {
                sync_history_buttons(&undo_button_cb, &redo_button_cb, &state.board);
            }
        });
        canvas.add_event_listener_with_callback("pointerup", onstop.as_ref().unchecked_ref())?;
        canvas
            .add_event_listener_with_callback("pointercancel", onstop.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("pointerleave", onstop.as_ref().unchecked_ref())?;
        onstop.forget();
    }

    Ok(())
}
