use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum MountError {
    /// The hosting environment cannot host the application. Fatal at startup.
    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),
    #[error("application already mounted")]
    AlreadyMounted,
    #[error("native DOM call failed: {0}")]
    Native(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Error, Debug)]
pub enum Precondition {
    #[error("no global document is available")]
    MissingDocument,
    #[error("document cannot be viewed as an HTML document")]
    NotHtmlDocument,
    #[error("document body is missing")]
    MissingBody,
}

impl MountError {
    pub(crate) fn native(value: JsValue) -> Self {
        let message = if let Some(error) = value.dyn_ref::<js_sys::Error>() {
            String::from(error.message())
        } else if let Some(message) = value.as_string() {
            message
        } else {
            format!("{value:?}")
        };
        Self::Native(message)
    }
}

#[cfg(target_family = "wasm")]
impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
