//! Cloud score sync
//!
//! Uploads are fire-and-forget: `push` returns immediately, and a failed
//! request is only logged.

use serde::{Deserialize, Serialize};

use crate::sim::GameKind;

/// Body posted for a new record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpload {
    pub game: GameKind,
    /// `YYYY-MM-DD`
    pub date: String,
    pub score: u64,
}

pub trait CloudSync {
    fn push(&self, upload: ScoreUpload);
}

/// Offline / native: uploads are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSync;

impl CloudSync for NullSync {
    fn push(&self, upload: ScoreUpload) {
        log::trace!(
            "cloud sync disabled, dropping {} score {}",
            upload.game,
            upload.score
        );
    }
}

/// POSTs JSON to a score endpoint with `fetch`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HttpSync {
    endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpSync {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(url: String, body: String) -> Result<(), wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::JsValue;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl CloudSync for HttpSync {
    fn push(&self, upload: ScoreUpload) {
        let body = match serde_json::to_string(&upload) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to encode score upload: {}", e);
                return;
            }
        };
        let url = self.endpoint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = Self::post(url, body).await {
                log::warn!("Score upload failed: {:?}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_json_shape() {
        let upload = ScoreUpload {
            game: GameKind::PolypSniper,
            date: "2026-01-05".to_string(),
            score: 1250,
        };
        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["game"], "polyp_sniper");
        assert_eq!(json["score"], 1250);
        NullSync.push(upload);
    }
}
