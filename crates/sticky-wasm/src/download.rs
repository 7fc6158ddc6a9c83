//! Browser file download of exported note text.

use js_sys::Array;
use sticky_core::ExportFile;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// Offer `file` to the user as a UTF-8 plain-text download.
pub fn save_text_as_file(file: &ExportFile) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document to download from"))?;

    let parts = Array::new();
    parts.push(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(TEXT_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
