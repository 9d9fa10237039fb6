//! Request correlation data carried explicitly from the transport layer to
//! every call site that wants enriched logs.

/// Attribute key for the request correlation id.
pub const REQUEST_ID_KEY: &str = "request_id";

/// Attribute key for the authenticated principal.
pub const USERNAME_KEY: &str = "username";

/// Per-request correlation data.
///
/// Built by the request-id middleware and completed by authentication;
/// handlers receive it as a request extension and pass it on by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Option<String>,
    username: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach the authenticated principal.
    #[allow(dead_code)]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Correlation id, or `""` when none was assigned.
    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or_default()
    }

    /// Authenticated principal, or `""` for anonymous requests.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}
