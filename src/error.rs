use wasm_bindgen::JsValue;

/// Startup failures. Nothing after startup is fatal; runtime host errors are logged.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("canvas has no 2d context")]
    NoCanvasContext,
    #[error("speech synthesis is unavailable")]
    SpeechUnavailable,
    #[error("word list is empty")]
    EmptyWordList,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
