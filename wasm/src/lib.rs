//! WebAssembly module for the Umuhinzi dashboard
//!
//! Provides client-side state and computation for the browser dashboard:
//! - session lifecycle (token + prediction history)
//! - prediction form validation
//!
//! HTTP calls stay in the page; this layer never talks to the network. The
//! prediction history lives inside one `Session` value (created at login,
//! cleared on logout or an explicit clear), never in process-wide state.

use wasm_bindgen::prelude::*;

use shared::districts::district_names;
use shared::models::{HistoryEntry, YieldEstimate, DEFAULT_CROP};
use shared::validation::{parse_planting_date, validate_crop, validate_district};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"umuhinzi dashboard helpers loaded".into());
}

/// Dashboard session: token plus session-local prediction history
#[wasm_bindgen]
pub struct Session {
    token: Option<String>,
    history: Vec<HistoryEntry>,
}

#[wasm_bindgen]
impl Session {
    /// Create a session from a freshly issued login token.
    #[wasm_bindgen(constructor)]
    pub fn new(token: String) -> Session {
        Session {
            token: Some(token),
            history: Vec::new(),
        }
    }

    /// Whether the session still holds a token.
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// The session token, if the session is active.
    pub fn token(&self) -> Option<String> {
        self.token.clone()
    }

    /// Append a prediction response to the history.
    ///
    /// `estimate_json` is the raw `POST /predict` response body;
    /// `timestamp` is the page's wall-clock label for the entry.
    pub fn record_prediction(
        &mut self,
        timestamp: String,
        estimate_json: &str,
    ) -> Result<(), JsValue> {
        let estimate: YieldEstimate = serde_json::from_str(estimate_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid prediction JSON: {}", e)))?;
        self.history
            .push(HistoryEntry::from_estimate(timestamp, &estimate));
        Ok(())
    }

    /// Snapshot of the history as JSON, newest entry last.
    pub fn history_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.history)
            .map_err(|e| JsValue::from_str(&format!("History serialization failed: {}", e)))
    }

    /// Number of predictions recorded this session.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear the history without ending the session.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// End the session: drops the token and the history together.
    pub fn logout(&mut self) {
        self.token = None;
        self.history.clear();
    }
}

/// District names for the dashboard selector, as a JSON array.
#[wasm_bindgen]
pub fn district_names_json() -> String {
    let names: Vec<&str> = district_names().collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// Validate the prediction form; returns an error message or null.
///
/// The future-date rule is enforced server-side against the server clock;
/// this only catches inputs that cannot possibly be accepted.
#[wasm_bindgen]
pub fn validate_predict_form(district: &str, planting_date: &str) -> Option<String> {
    if let Err(msg) = validate_district(district) {
        return Some(format!("{}: {}", msg, district));
    }
    if let Err(msg) = parse_planting_date(planting_date) {
        return Some(msg.to_string());
    }
    None
}

/// Normalize the crop field: trimmed input, or the default when empty.
#[wasm_bindgen]
pub fn normalize_crop(crop: &str) -> String {
    let trimmed = crop.trim();
    if trimmed.is_empty() || validate_crop(trimmed).is_err() {
        DEFAULT_CROP.to_string()
    } else {
        trimmed.to_string()
    }
}
