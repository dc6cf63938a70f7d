//! Score sharing
//!
//! The clipboard is an outside service; copying is fire-and-forget and a
//! failure only ever reaches the log.

use thiserror::Error;

use crate::sim::GameState;

/// Why a copy did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard API in this environment
    #[error("clipboard is not available")]
    Unavailable,
    /// The API refused the write
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Something that can take text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Text shared at the end of a run
pub fn summary_text(score: u32, bot: bool) -> String {
    let noun = if score == 1 { "rooftop" } else { "rooftops" };
    let mut text = format!("I geocoded {score} {noun} in Geocode Jumper!");
    if bot {
        text.push_str(" (with a little help from Smarty)");
    }
    text
}

/// Copy the session's summary. Returns whether the copy went through.
pub fn share_score(state: &GameState, clipboard: &mut impl Clipboard) -> bool {
    let text = summary_text(state.score, state.bot);
    match clipboard.write_text(&text) {
        Ok(()) => {
            log::info!("Copied score summary to clipboard");
            true
        }
        Err(err) => {
            log::warn!("Could not share score: {err}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::BrowserClipboard;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::{Clipboard, ClipboardError};

    // navigator.clipboard is promise based; rejections are reported from JS
    #[wasm_bindgen(inline_js = "
        export function write_clipboard(text) {
            if (!navigator.clipboard || !navigator.clipboard.writeText) {
                throw new Error('unavailable');
            }
            navigator.clipboard.writeText(text).catch(e => console.warn('Clipboard write failed:', e));
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn write_clipboard(text: &str) -> Result<(), JsValue>;
    }

    /// `navigator.clipboard` in the browser
    #[derive(Debug, Default)]
    pub struct BrowserClipboard;

    impl Clipboard for BrowserClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            write_clipboard(text).map_err(|err| match err.as_string() {
                Some(reason) => ClipboardError::Rejected(reason),
                None => ClipboardError::Unavailable,
            })
        }
    }
}
