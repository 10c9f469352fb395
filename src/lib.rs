// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyze;
pub mod api;
pub mod config;
pub mod links;
pub mod metrics;
pub mod scoring;
pub mod validator;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::{GateConfig, GateHandle};
pub use crate::links::{check_links_and_mentions, LinkCheck};
pub use crate::scoring::{score_text, QualityReport};
pub use crate::validator::{validate, validate_with_threshold, ValidationResult};
