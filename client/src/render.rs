use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

use whiteboard_shared::{DirtyRect, Surface};

use crate::state::State;

pub fn blit(
    ctx: &CanvasRenderingContext2d,
    surface: &Surface,
    rect: DirtyRect,
) -> Result<(), JsValue> {
    if rect.width == 0 || rect.height == 0 {
        return Ok(());
    }
    let bytes = surface.rgba(rect);
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(bytes.as_slice()),
        rect.width,
        rect.height,
    )?;
    ctx.put_image_data(&image, rect.x as f64, rect.y as f64)
}

pub fn blit_region(state: &State, rect: DirtyRect) {
    if let Err(err) = blit(&state.ctx, state.board.surface(), rect) {
        log::warn!("blit failed: {err:?}");
    }
}

pub fn redraw(state: &State) {
    blit_region(state, state.board.surface().full_rect());
}
