//! Terminal notification step.

use tracing::info;

/// Message returned once every stage has run.
pub const COMPLETION_MESSAGE: &str = "Pipeline completed";

/// Reports that the forecast and cache are fresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompletionNotifier;

impl CompletionNotifier {
    /// Log completion. `upstream_ok` only orders this step after the refresh.
    pub fn notify(&self, upstream_ok: bool) -> String {
        info!(upstream_ok, "Forecast and analytics cache are up to date");
        COMPLETION_MESSAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_returns_completion_message() {
        assert_eq!(CompletionNotifier.notify(true), COMPLETION_MESSAGE);
        assert_eq!(CompletionNotifier.notify(false), COMPLETION_MESSAGE);
    }
}
