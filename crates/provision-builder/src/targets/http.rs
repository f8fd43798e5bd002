//! HTTP request value

use crate::builder::{BuildError, Buildable, BuiltFields};
use crate::field::{FieldKind, FieldSpec, Schema};
use serde::Serialize;
use std::collections::BTreeMap;

const METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// An immutable HTTP request description
///
/// Fields: `url` (required), `method` (default `GET`), `headers` (default
/// empty), `body` (optional).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpRequest {
    url: String,
    method: String,
    headers: BTreeMap<String, String>,
    body: Option<String>,
}

impl HttpRequest {
    /// Target URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP method
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request headers
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Request body
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Dispatch the request
    #[must_use]
    pub fn send(&self) -> RequestSummary {
        tracing::info!(method = %self.method, url = %self.url, "sending request");
        RequestSummary {
            line: format!("{} {}", self.method, self.url),
            header_count: self.headers.len(),
            body_len: self.body.as_ref().map_or(0, String::len),
        }
    }
}

impl Buildable for HttpRequest {
    fn schema() -> Schema {
        Schema::new("HttpRequest")
            .field(FieldSpec::required("url", FieldKind::Text))
            .field(FieldSpec::with_default("method", "GET"))
            .field(FieldSpec::with_default("headers", BTreeMap::new()))
            .field(FieldSpec::optional("body", FieldKind::Text))
    }

    fn assemble(mut fields: BuiltFields) -> Result<Self, BuildError> {
        let url = fields.take_text("url")?;
        if url.trim().is_empty() {
            return Err(fields.invalid("url", "must not be empty"));
        }

        let method = fields.take_text("method")?.to_ascii_uppercase();
        if !METHODS.contains(&method.as_str()) {
            return Err(fields.invalid("method", format!("unsupported method {method}")));
        }

        Ok(Self {
            url,
            method,
            headers: fields.take_text_map("headers")?,
            body: fields.take_opt_text("body")?,
        })
    }
}

/// What [`HttpRequest::send`] dispatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    /// `METHOD url`
    pub line: String,
    /// Number of headers sent
    pub header_count: usize,
    /// Body length in bytes
    pub body_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_get_without_headers() {
        let request = HttpRequest::builder()
            .set("url", "https://api.example.com/resource")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method(), "GET");
        assert!(request.headers().is_empty());
        assert_eq!(request.body(), None);
    }

    #[test]
    fn headers_accumulate() {
        let mut builder = HttpRequest::builder();
        builder
            .set("url", "https://api.example.com/resource")
            .unwrap()
            .set("body", "body")
            .unwrap()
            .insert_entry("headers", "Content-Type", "application/json")
            .unwrap()
            .insert_entry("headers", "Accept", "application/json")
            .unwrap();

        let request = builder.build().unwrap();
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()["Content-Type"], "application/json");

        let summary = request.send();
        assert_eq!(summary.line, "GET https://api.example.com/resource");
        assert_eq!(summary.header_count, 2);
        assert_eq!(summary.body_len, 4);
    }

    #[test]
    fn method_is_normalised_and_checked() {
        let mut builder = HttpRequest::builder();
        builder.set("url", "https://x").unwrap().set("method", "post").unwrap();
        assert_eq!(builder.build().unwrap().method(), "POST");

        builder.set("method", "FETCH").unwrap();
        assert!(matches!(
            builder.build(),
            Err(BuildError::InvalidFieldValue { field: "method", .. })
        ));
    }

    #[test]
    fn missing_url() {
        let err = HttpRequest::builder().build().unwrap_err();
        assert!(matches!(err, BuildError::Incomplete { ref missing, .. } if missing == &vec!["url"]));
    }
}
