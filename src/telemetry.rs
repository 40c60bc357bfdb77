//! Tracing setup for the quiz service.
//!
//! Three log targets matter here:
//!   - `surah_quiz`: service plumbing (startup, content API calls, WebSocket lifecycle)
//!   - `quiz`: game events (questions served, answers graded, achievements, evictions)
//!   - `surah_quiz_backend::*`: spans from `#[instrument]`ed handlers and state methods
//!
//! `LOG_LEVEL` replaces the default directives entirely; `LOG_FORMAT=json` switches
//! the output to one JSON object per line, with the current span attached.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str =
    "info,surah_quiz_backend=debug,surah_quiz=debug,quiz=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Anything other than "json" (any case) means pretty output.
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
    });
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(filter_from(level.as_deref()))
        .with(json)
        .with(pretty)
        .init();

    tracing::info!(target: "surah_quiz", ?format, filter = level.as_deref().unwrap_or(DEFAULT_FILTER), "Tracing initialized");
}
