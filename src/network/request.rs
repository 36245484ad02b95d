//! HTTP request description and the builder producing it

use std::collections::HashMap;
use std::fmt;
use std::mem;

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Method, Response};
use url::Url;

use super::http_client::HttpClient;
use crate::error::{ConstructionError, Result};
use crate::form_data::FormData;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Credentials for the HTTP Basic authentication scheme
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    user: String,
    password: String,
}

impl BasicAuth {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Basic <base64(user:password)>`
    pub fn header_value(&self) -> String {
        let credentials = format!("{}:{}", self.user, self.password);
        format!("Basic {}", general_purpose::STANDARD.encode(credentials))
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// A finished HTTP request, produced by [`RequestBuilder::build`].
///
/// Nothing is validated until [`Request::prepare`] or [`Request::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    base_url: String,
    path: String,
    method: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    basic_auth: Option<BasicAuth>,
}

impl Request {
    fn empty() -> Self {
        Self {
            base_url: String::new(),
            path: String::new(),
            method: String::new(),
            headers: HashMap::new(),
            body: Vec::new(),
            basic_auth: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL, i.e. the base URL followed by the suffix given to
    /// [`RequestBuilder::set_path`]. Empty when no path was set.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// Materialize this description into a `reqwest` request.
    ///
    /// Headers overwrite whatever default the client would set for the same
    /// name. Basic credentials are applied last and replace any
    /// `Authorization` header from the header map. An empty body is not sent;
    /// `POST`, `PUT` and `PATCH` then carry `Content-Length: 0` unless the
    /// header map sets it.
    pub fn prepare(&self) -> Result<reqwest::Request, ConstructionError> {
        let method = Method::from_bytes(self.method.as_bytes()).map_err(|source| {
            ConstructionError::InvalidMethod {
                method: self.method.clone(),
                source,
            }
        })?;

        let url = Url::parse(&self.path).map_err(|source| ConstructionError::InvalidUrl {
            url: self.path.clone(),
            source,
        })?;

        let mut request = reqwest::Request::new(method, url);

        // Sorted so that names equal up to case resolve the same way every time.
        let mut headers: Vec<_> = self.headers.iter().collect();
        headers.sort();

        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|source| {
                ConstructionError::InvalidHeaderName {
                    name: key.clone(),
                    source,
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|source| {
                ConstructionError::InvalidHeaderValue {
                    name: key.clone(),
                    source,
                }
            })?;
            request.headers_mut().insert(name, value);
        }

        if let Some(auth) = &self.basic_auth {
            let mut value = HeaderValue::from_str(&auth.header_value()).map_err(|source| {
                ConstructionError::InvalidHeaderValue {
                    name: AUTHORIZATION.to_string(),
                    source,
                }
            })?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        if !self.body.is_empty() {
            *request.body_mut() = Some(self.body.clone().into());
        } else if expects_body(request.method())
            && !request.headers().contains_key(CONTENT_LENGTH)
        {
            request
                .headers_mut()
                .insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        }

        log::debug!(
            "Prepared {} {}: {} header(s), {} byte body",
            request.method(),
            redacted(request.url()),
            request.headers().len(),
            self.body.len()
        );

        Ok(request)
    }

    /// Send this request through `client` and return the raw response.
    ///
    /// Exactly one call is made. Any status, 4xx and 5xx included, is
    /// returned as `Ok`; the response body is left for the caller to read.
    pub async fn execute<C: HttpClient + ?Sized>(&self, client: &C) -> Result<Response> {
        let request = self.prepare()?;
        let method = request.method().clone();
        let target = redacted(request.url());

        log::info!("🌐 {} request to: {}", method, target);

        match client.send(request).await {
            Ok(response) => {
                log::info!("✅ Response received: status {}", response.status());
                Ok(response)
            }
            Err(e) => {
                log::warn!("❌ {} {} failed: {}", method, target, e);
                Err(e.into())
            }
        }
    }
}

fn expects_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Copy of `url` safe to log: the password of any userinfo is dropped.
fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    // Fails only for URLs that cannot carry credentials in the first place.
    let _ = url.set_password(None);
    url
}

/// Accumulates request configuration through chained calls.
///
/// [`build`](Self::build) hands out the accumulated [`Request`] and resets
/// the builder, so the same instance can be reused for an unrelated request.
/// Mutators take `&mut self`; sharing one builder between tasks needs
/// external synchronization.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    request: Request,
}

impl RequestBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request: Request::empty(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the method verbatim. It is only checked when the request is executed.
    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.request.method = method.into();
        self
    }

    /// Set the request URL to the base URL followed by `path`.
    ///
    /// Plain concatenation: no escaping, no slash handling.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.request.path = format!("{}{}", self.base_url, path);
        self
    }

    /// Insert one header. Header names are case-insensitive, so an existing
    /// entry whose name differs only by case is replaced.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.request
            .headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        self.request.headers.insert(key, value.into());
        self
    }

    /// Replace every header set so far.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) -> &mut Self {
        self.request.headers = headers;
        self
    }

    pub fn set_content_type_json(&mut self) -> &mut Self {
        self.add_header(CONTENT_TYPE, APPLICATION_JSON)
    }

    pub fn set_content_url_encoded(&mut self) -> &mut Self {
        self.add_header(CONTENT_TYPE, APPLICATION_FORM_URLENCODED)
    }

    pub fn set_basic_auth(
        &mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.request.basic_auth = Some(BasicAuth::new(user, password));
        self
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.request.body = body.into();
        self
    }

    /// Use the encoded form as body and mark it as form-urlencoded.
    pub fn set_form_body(&mut self, form: &FormData) -> &mut Self {
        self.set_content_url_encoded().set_body(form.to_bytes())
    }

    /// Take the accumulated request, leaving a fresh empty one behind.
    pub fn build(&mut self) -> Request {
        let mut request = mem::replace(&mut self.request, Request::empty());
        request.base_url = self.base_url.clone();
        request
    }
}
