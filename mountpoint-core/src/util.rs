use std::thread_local;

thread_local! {
    static DOCUMENT: Option<web_sys::Document> = if cfg!(target_family = "wasm") {
        web_sys::window().and_then(|window| window.document())
    } else {
        None
    };
}

pub(crate) fn global_document() -> Option<web_sys::Document> {
    DOCUMENT.with(Clone::clone)
}

/// The global document, for native node creation.
///
/// Only called in the browser environment, which is never entered without a window.
pub(crate) fn document() -> web_sys::Document {
    global_document().expect("JavaScript window.document undefined")
}
