//! View identifiers and per-view state.

use crate::api::FetchError;
use serde_json::Value;

/// Views the shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    About,
}

/// State of one Home view activation.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeState {
    Loading,
    Loaded(Value),
    Errored(String),
}

impl HomeState {
    pub fn is_loading(&self) -> bool {
        matches!(self, HomeState::Loading)
    }

    /// Apply the fetch outcome. Only a `Loading` state transitions; returns
    /// false if the state was already terminal.
    pub fn complete(&mut self, outcome: Result<Value, FetchError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match outcome {
            Ok(value) => HomeState::Loaded(value),
            Err(err) => HomeState::Errored(err.to_string()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn loading_completes_exactly_once() {
        let mut state = HomeState::Loading;
        assert!(state.complete(Ok(json!({"status": "ok"}))));
        assert_eq!(state, HomeState::Loaded(json!({"status": "ok"})));

        let late = Err(FetchError::Status { status: StatusCode::BAD_GATEWAY, body: String::new() });
        assert!(!state.complete(late));
        assert_eq!(state, HomeState::Loaded(json!({"status": "ok"})));
    }

    #[test]
    fn failure_keeps_a_readable_message() {
        let mut state = HomeState::Loading;
        let err = FetchError::Status { status: StatusCode::SERVICE_UNAVAILABLE, body: String::new() };
        assert!(state.complete(Err(err)));
        match state {
            HomeState::Errored(message) => assert_eq!(message, "Backend responded with HTTP 503 Service Unavailable"),
            other => panic!("unexpected state: {other:?}"),
        }
    }
}
