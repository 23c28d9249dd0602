//! Request Pipeline
//!
//! `HttpClient` runs every call through the same two interceptors:
//! - request side: base URL, auth header, content type, timeout
//! - response side: token refresh, envelope unwrap, toasts, session expiry
//!
//! The browser fetch lives behind `Transport`, toasts behind `Notifier`.

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::Envelope;
use super::error::{ApiError, TransportError};
use super::request::{HttpRequest, HttpResponse, Method, RequestOptions};
use crate::config::ClientConfig;
use crate::session::{ExpiryOutcome, Session, SessionExpiry};

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Sends one prepared request
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// User-facing feedback
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str, description: Option<&str>);
    /// Open the re-login dialog
    fn session_expired(&self);
}

/// Current page path, used to tell auth pages apart
pub type LocationFn = Rc<dyn Fn() -> String>;

pub struct HttpClient {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    session: Rc<Session>,
    expiry: Rc<SessionExpiry>,
    notifier: Rc<dyn Notifier>,
    location: LocationFn,
}

impl HttpClient {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        session: Rc<Session>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let expiry = Rc::new(SessionExpiry::new(&config));
        Self {
            config,
            transport,
            session,
            expiry,
            notifier,
            location: Rc::new(|| "/".to_string()),
        }
    }

    pub fn with_location(mut self, location: LocationFn) -> Self {
        self.location = location;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    pub fn expiry(&self) -> &Rc<SessionExpiry> {
        &self.expiry
    }

    pub fn notifier(&self) -> &Rc<dyn Notifier> {
        &self.notifier
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: Option<Value>) -> Result<T, ApiError> {
        self.call(with_payload(HttpRequest::new(Method::Get, path), params)).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        self.call(with_payload(HttpRequest::new(Method::Post, path), body)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        self.call(with_payload(HttpRequest::new(Method::Put, path), body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, params: Option<Value>) -> Result<T, ApiError> {
        self.call(with_payload(HttpRequest::new(Method::Delete, path), params)).await
    }

    /// POST with the long upload timeout
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        let mut request = HttpRequest::new(Method::Post, path).body(body);
        request.options.is_upload = true;
        self.call(request).await
    }

    /// Raw bytes, no envelope
    pub async fn download(&self, path: &str, params: Option<Value>) -> Result<Vec<u8>, ApiError> {
        let mut request = with_payload(HttpRequest::new(Method::Get, path), params);
        request.options.binary = true;
        let url = request.url.clone();
        let options = request.options;
        let response = self.dispatch(request).await;
        match response {
            Ok(response) => Ok(response.body),
            Err(e) => Err(self.report(e, &url, options)),
        }
    }

    /// Run a request and decode the envelope's data into `T`
    pub async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let url = request.url.clone();
        let options = request.options;
        let data = self.execute(request).await?;
        serde_json::from_value(data).map_err(|e| {
            log::error!("[HTTP] {} decode failed: {}", url, e);
            self.report(ApiError::Decode(e.to_string()), &url, options)
        })
    }

    /// Run a request and return the envelope's data untouched
    pub async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let url = request.url.clone();
        let options = request.options;
        let outcome = match self.dispatch(request).await {
            Ok(response) => self.unwrap_envelope(&response, options),
            Err(e) => Err(e),
        };
        outcome.map_err(|e| self.report(e, &url, options))
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.prepare(request);
        log::debug!("[HTTP] {} {}", request.method.as_str(), request.full_url());
        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            log::warn!("[HTTP] {} -> {}", request.url, response.status);
            return Err(ApiError::from_status(response.status));
        }
        Ok(response)
    }

    /// Request interceptor
    fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            request.url = join_url(&self.config.base_url, &request.url);
        }
        let token = self.session.access_token();
        if !token.is_empty() {
            request.set_header("Authorization", &token);
        }
        if request.header("Content-Type").is_none() && !request.options.is_upload {
            request.set_header("Content-Type", JSON_CONTENT_TYPE);
        }
        request.timeout_ms = if request.options.is_upload {
            self.config.upload_timeout_ms
        } else {
            self.config.timeout_ms
        };
        request
    }

    /// Response interceptor for 2xx bodies
    fn unwrap_envelope(&self, response: &HttpResponse, options: RequestOptions) -> Result<Value, ApiError> {
        let body: Value = serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let envelope = Envelope::parse(&body);

        if let Some(token) = envelope.refreshed_token() {
            log::info!("[HTTP] access token refreshed");
            self.session.set_access_token(token);
        }

        if envelope.is_success() {
            if options.show_success_message {
                self.notifier.success(&envelope.success_message());
            }
            return Ok(envelope.data);
        }
        Err(ApiError::from_business(envelope.code, envelope.failure_message()))
    }

    /// Surface a failure to the user and hand it back
    fn report(&self, error: ApiError, url: &str, options: RequestOptions) -> ApiError {
        if error == ApiError::SessionExpired {
            self.on_session_expired();
            return error;
        }
        log::error!("[HTTP] {}: {}", url, error);
        if options.show_error_message {
            if let Some(notice) = error.notice(url) {
                self.notifier.error(&notice.message, notice.description.as_deref());
            }
        }
        error
    }

    fn on_session_expired(&self) {
        let path = (self.location)();
        match self.expiry.trigger(&path, &self.session) {
            ExpiryOutcome::ShowDialog => {
                log::warn!("[HTTP] session expired on {}", path);
                self.notifier.session_expired();
            }
            ExpiryOutcome::AlreadyOpen => {}
            ExpiryOutcome::TokenCleared => log::info!("[HTTP] stale token dropped on {}", path),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) if !path.is_empty() => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// GET and DELETE take their payload as query parameters, the rest as a JSON body
fn with_payload(request: HttpRequest, payload: Option<Value>) -> HttpRequest {
    let Some(payload) = payload else {
        return request;
    };
    if !request.method.payload_in_query() {
        return request.body(payload);
    }
    match payload {
        Value::Object(map) => map.into_iter().fold(request, |req, (key, value)| match value {
            Value::Null => req,
            Value::String(s) => req.query(&key, s),
            other => req.query(&key, other),
        }),
        other => {
            log::warn!("[HTTP] ignoring non-object query payload: {}", other);
            request
        }
    }
}
