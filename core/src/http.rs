//! HTTP transport types for the host-does-IO pattern.
//!
//! These types describe upstream requests and responses as plain data. The
//! upstream contract is GET-only, so a request is just a URL plus headers.

/// An outbound request described as plain data.
///
/// Built by `UpstreamClient::build_*` methods and executed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An upstream response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
