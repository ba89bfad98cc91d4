//! Request context attached to handler log events

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri},
    http::{header, request::Parts, HeaderMap, Method},
};

use crate::Error;

static REDACTED_HEADERS: [header::HeaderName; 3] = [
    header::AUTHORIZATION,
    header::COOKIE,
    header::PROXY_AUTHORIZATION,
];

/// Method, path, query and headers of the request being handled
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `parts.uri`
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());

        Ok(Self {
            method: parts.method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: parts.headers.clone(),
        })
    }
}

impl RequestContext {
    /// Headers rendered for logging, credentials redacted
    pub fn header_fields(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| {
                let value = if REDACTED_HEADERS.contains(name) {
                    "<redacted>".to_string()
                } else {
                    value.to_str().unwrap_or("<binary>").to_string()
                };
                (name.as_str().to_string(), value)
            })
            .collect()
    }

    /// Expected outcome worth recording: bad input, unknown planet
    pub fn log_info(&self, message: &str) {
        tracing::info!(
            method = %self.method,
            path = %self.path,
            query = ?self.query,
            headers = ?self.header_fields(),
            "{}",
            message
        );
    }

    /// Same as [`Self::log_info`] with the planet name attached
    pub fn log_planet_info(&self, planet: &str, message: &str) {
        tracing::info!(
            method = %self.method,
            path = %self.path,
            query = ?self.query,
            headers = ?self.header_fields(),
            planet,
            "{}",
            message
        );
    }

    /// Collaborator failure
    pub fn log_error(&self, error: &Error, message: &str) {
        tracing::error!(
            method = %self.method,
            path = %self.path,
            query = ?self.query,
            headers = ?self.header_fields(),
            error = %error,
            "{}",
            message
        );
    }
}
