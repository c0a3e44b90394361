//! Scripted [`CacheRefresher`] that records every request.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::outbound::cache::{CacheRefresher, RefreshRequest};

#[derive(Debug, Clone)]
enum Script {
    Respond(u16),
    Fail(String),
}

/// Refresher double returning a fixed status or a fixed connection error.
#[derive(Debug)]
pub struct RecordingRefresher {
    script: Script,
    requests: Mutex<Vec<RefreshRequest>>,
}

impl RecordingRefresher {
    /// Answer every request with `status`.
    #[must_use]
    pub fn responding(status: u16) -> Self {
        Self {
            script: Script::Respond(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with a connection error carrying `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RefreshRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CacheRefresher for RecordingRefresher {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn refresh(&self, request: &RefreshRequest) -> Result<u16> {
        self.requests.lock().push(request.clone());
        match &self.script {
            Script::Respond(status) => Ok(*status),
            Script::Fail(message) => Err(Error::Connection(message.clone())),
        }
    }
}
