//! Tracing subscriber setup for hosts embedding the client.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Added on top of `RUST_LOG`. `montage` matches every `montage_*` target.
const DEFAULT_DIRECTIVES: [&str; 2] = ["montage=info", "reqwest=warn"];

/// Install the global subscriber: JSON when `LOG_FORMAT=json`, colored text
/// otherwise. Later calls are no-ops.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in DEFAULT_DIRECTIVES {
        if let Ok(d) = directive.parse::<Directive>() {
            env_filter = env_filter.add_directive(d);
        }
    }

    let result = if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json = use_json, "Tracing initialized");
    }
}
