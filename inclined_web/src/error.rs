// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failures inside the browser binding.
///
/// The DOM host absorbs these (they are logged and the operation is skipped);
/// only construction of a tour hands them to the caller.
#[derive(Debug, Error)]
pub enum DomError {
    /// A browser global such as `window` or `document` is missing.
    #[error("no global `{0}` in this context")]
    MissingGlobal(&'static str),
    /// An element the overlay needs is not in the document.
    #[error("element `{0}` not found")]
    MissingElement(String),
    /// A node did not have the expected element type.
    #[error("unexpected node type, wanted {0}")]
    WrongType(&'static str),
    /// A DOM call threw.
    #[error("DOM call failed: {0}")]
    Js(String),
    /// The tour configuration is not valid JSON for `TourOptions`.
    #[error("invalid tour configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DomError> for wasm_bindgen::JsValue {
    fn from(error: DomError) -> Self {
        Self::from_str(&error.to_string())
    }
}
