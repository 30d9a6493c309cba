//! Shared REST client: request model, transport seam, and middleware chain.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page and the session store issue requests through one `ApiClient`.
//! The client resolves paths against `ApiConfig`, runs registered middleware
//! around the transport, and turns non-success statuses into `ApiError`.
//!
//! DESIGN
//! ======
//! `Transport` is the only platform-specific piece: the browser build sends
//! through `gloo-net`, tests script responses in memory. Middleware request
//! hooks run in registration order and response hooks in reverse, so the
//! outermost layer sees the response last.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::future::Future;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::middleware::Middleware;
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Content type applied to JSON bodies unless a request overrides it.
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
        }
    }

    fn encode(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Json(value) => Some(value.to_string()),
            Self::Form(fields) => Some(
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                    .finish(),
            ),
        }
    }
}

/// A request before middleware and URL resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach `payload` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` if `payload` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach form-encoded fields as the body.
    pub fn form<K: Into<String>, V: Into<String>>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self {
        self.body = RequestBody::Form(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Add a query pair only when `value` is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Header lookup, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value under the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }
}

/// A fully resolved request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl WireRequest {
    fn resolve(config: &ApiConfig, mut request: ApiRequest) -> Self {
        if let Some(content_type) = request.body.content_type() {
            if request.header("Content-Type").is_none() {
                request.set_header("Content-Type", content_type);
            }
        }
        Self {
            method: request.method,
            url: config.url_for(&request.path, &request.query),
            body: request.body.encode(),
            headers: request.headers,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP answer: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends a resolved request and returns whatever status came back.
///
/// Only network-level failures are errors here; status classification is
/// the client's job.
pub trait Transport {
    fn send(&self, request: WireRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// The configured request sender shared across the app.
pub struct ApiClient<T> {
    config: ApiConfig,
    transport: Rc<T>,
    middleware: Vec<Rc<dyn Middleware>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Rc::clone(&self.transport),
            middleware: self.middleware.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport: Rc::new(transport), middleware: Vec::new() }
    }

    /// Register a middleware layer.
    #[must_use]
    pub fn with(mut self, layer: impl Middleware + 'static) -> Self {
        self.middleware.push(Rc::new(layer));
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` through the middleware chain.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or the classified status error for any
    /// non-2xx response.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        for layer in &self.middleware {
            layer.on_request(&mut request);
        }
        let wire = WireRequest::resolve(&self.config, request);
        log::debug!("{} {}", wire.method.as_str(), wire.url);

        let response = self.transport.send(wire).await.inspect_err(|e| {
            log::warn!("request failed before a response: {e}");
        })?;
        for layer in self.middleware.iter().rev() {
            layer.on_response(&response);
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    /// Send `request` and decode a JSON answer.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also fails with `ApiError::Decode`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.send(request).await?.json()
    }

    /// Send `request` and discard the body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}
