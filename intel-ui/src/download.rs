use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Hands bytes to the browser as a named file download via a synthetic
/// anchor click.
pub fn save_blob(bytes: &[u8], mime: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document not available".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body not available".to_string())?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "failed to build blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "failed to create object url".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "failed to create anchor".to_string())?
        .unchecked_into::<HtmlAnchorElement>();
    anchor.set_href(&url);
    anchor.set_download(filename);
    body.append_child(&anchor)
        .map_err(|_| "failed to attach anchor".to_string())?;
    anchor.click();
    anchor.remove();
    let _ = Url::revoke_object_url(&url);
    Ok(())
}
