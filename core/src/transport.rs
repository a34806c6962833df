//! The one place where requests meet the network.
//!
//! # Design
//! `DayOffClient` is generic over `Transport` so tests and embedders can swap
//! in whatever executes a GET. Implementations must hand back non-2xx
//! responses as data; status interpretation belongs to the decoder. Timeouts
//! and cancellation are the transport's concern, never the client's.

use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single GET round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::time::Duration;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking transport backed by a pooled `ureq::Agent`.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl std::fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UreqTransport").finish_non_exhaustive()
        }
    }

    impl UreqTransport {
        /// Agent with no timeout of its own.
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        /// Agent that gives up on a whole request after `timeout`.
        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }

        /// Use a caller-configured agent. It must be built with
        /// `http_status_as_error(false)` or error bodies never reach the decoder.
        pub fn from_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = self.agent.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let mut response = builder
                .call()
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::Body(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Transport for Fixed {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, "1"))
        }
    }

    fn request() -> HttpRequest {
        HttpRequest {
            url: "https://isdayoff.ru/today".to_string(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn shared_and_boxed_transports_delegate() {
        let by_ref = &Fixed;
        assert_eq!(by_ref.execute(&request()).unwrap().body, "1");

        let boxed: Box<dyn Transport> = Box::new(Fixed);
        assert_eq!(boxed.execute(&request()).unwrap().body, "1");

        let shared = Arc::new(Fixed);
        assert_eq!(shared.execute(&request()).unwrap().status, 200);
    }

    #[cfg(feature = "ureq")]
    #[test]
    fn unreachable_host_is_a_transport_error() {
        let transport = UreqTransport::with_timeout(std::time::Duration::from_secs(2));
        let req = HttpRequest {
            url: "http://127.0.0.1:1/today".to_string(),
            headers: Vec::new(),
        };
        let err = transport.execute(&req).unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
