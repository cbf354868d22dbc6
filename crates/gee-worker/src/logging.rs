//! Tracing setup and structured request logging.

use tracing::{info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` drives filtering on top of a `gee=info` default. Output is JSON
/// when `LOG_FORMAT=json`, colored text otherwise.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "gee=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    // Logs go to stderr so stdout stays clean for JSON results
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Request logger for structured logging with consistent formatting.
///
/// Every line carries the shot id and frame offset of the retrieval.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    shot_id: String,
    frame_offset: u64,
}

impl RequestLogger {
    pub fn new(shot_id: &str, frame_offset: u64) -> Self {
        Self {
            shot_id: shot_id.to_string(),
            frame_offset,
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            shot_id = %self.shot_id,
            frame_offset = self.frame_offset,
            "Retrieval started: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            shot_id = %self.shot_id,
            frame_offset = self.frame_offset,
            "Retrieval warning: {}", message
        );
    }

    pub fn log_failure(&self, message: &str) {
        warn!(
            shot_id = %self.shot_id,
            frame_offset = self.frame_offset,
            "Retrieval failed: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            shot_id = %self.shot_id,
            frame_offset = self.frame_offset,
            "Retrieval completed: {}", message
        );
    }

    pub fn shot_id(&self) -> &str {
        &self.shot_id
    }

    pub fn frame_offset(&self) -> u64 {
        self.frame_offset
    }

    /// Create a tracing span for this request.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "retrieval",
            shot_id = %self.shot_id,
            frame_offset = self.frame_offset
        )
    }
}
