use shuttle_axum::axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::GateHandle;

/// Hard cap on submitted text length, in characters. Anything longer is
/// rejected before analysis.
pub const MAX_TEXT_LEN: usize = 4000;

#[derive(Clone)]
pub struct AppState {
    pub gate: GateHandle,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/validate", post(validate_text))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
pub struct ValidateReq {
    pub text: String,
    /// Per-request threshold override; clamped to 0..=100.
    #[serde(default)]
    pub min_score: Option<f32>,
}

#[derive(serde::Serialize)]
pub struct ValidateResp {
    pub accepted: bool,
    pub message: String,
}

async fn validate_text(
    State(state): State<AppState>,
    Json(body): Json<ValidateReq>,
) -> Json<ValidateResp> {
    let text = body.text.trim();

    if text.chars().count() > MAX_TEXT_LEN {
        metrics::counter!("gate_rejected_total").increment(1);
        return Json(ValidateResp {
            accepted: false,
            message: format!("Text is too long (max {MAX_TEXT_LEN} characters)."),
        });
    }

    let result = state.gate.validate(text, body.min_score);
    if result.accepted {
        metrics::counter!("gate_accepted_total").increment(1);
    } else {
        metrics::counter!("gate_rejected_total").increment(1);
    }

    Json(ValidateResp {
        accepted: result.accepted,
        message: result.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;

    fn state() -> AppState {
        AppState {
            gate: GateHandle::new(GateConfig::default()),
        }
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_before_analysis() {
        let long = "word ".repeat(1000); // 5000 chars
        let resp = validate_text(
            State(state()),
            Json(ValidateReq {
                text: long,
                min_score: None,
            }),
        )
        .await;
        assert!(!resp.0.accepted);
        assert!(resp.0.message.contains("too long"), "got: {}", resp.0.message);
    }

    #[tokio::test]
    async fn handler_trims_before_length_checks() {
        // 15 meaningful chars wrapped in whitespace: the short-text branch
        // must see the trimmed length.
        let resp = validate_text(
            State(state()),
            Json(ValidateReq {
                text: "   be kind here   ".to_string(),
                min_score: None,
            }),
        )
        .await;
        assert!(resp.0.accepted, "got: {}", resp.0.message);
    }
}
