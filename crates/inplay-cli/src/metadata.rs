use std::time::Instant;

use inplay_core::EnvelopeMeta;
use uuid::Uuid;

/// One CLI invocation: its identifiers and when it started.
///
/// `request_id` is a hyphenated UUID v4; `trace_id` is the same kind of
/// UUID in its 32-hex simple form so it can be handed to W3C tracing.
#[derive(Debug)]
pub struct Invocation {
    request_id: Uuid,
    trace_id: Uuid,
    started: Instant,
}

impl Invocation {
    pub fn start() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            trace_id: Uuid::new_v4(),
            started: Instant::now(),
        }
    }

    pub fn request_id(&self) -> String {
        self.request_id.hyphenated().to_string()
    }

    /// Stops the clock and builds the envelope meta.
    pub fn finish(self, warnings: Vec<String>) -> EnvelopeMeta {
        let latency_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        EnvelopeMeta::new(
            self.request_id(),
            self.trace_id.simple().to_string(),
            latency_ms,
        )
        .with_warnings(warnings)
    }
}
