use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use whiteboard_shared::PngExport;

/// Hands the PNG to the browser as a file download. The object URL is
/// revoked once the click has been dispatched.
pub fn download_png(document: &Document, export: &PngExport) -> Result<(), JsValue> {
    let parts = Array::of1(&Uint8Array::from(export.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let href = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&href);
    anchor.set_download(export.file_name);
    anchor.click();

    Url::revoke_object_url(&href)
}
