//! `reqwest`-backed [`HttpTransport`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use anykv_core::{HttpRequest, HttpResponse, HttpTransport, KvError, KvResult, Method};

/// Default transport: one shared `reqwest::Client` per adapter.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, ...).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_header_map(headers: &[(String, String)]) -> KvResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|e| KvError::Config(format!("invalid header name {name:?}: {e}")))?;
        let mut header_value = HeaderValue::try_from(value.as_str())
            .map_err(|e| KvError::Config(format!("invalid characters in header {name}: {e}")))?;
        if header_name == reqwest::header::AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> KvResult<HttpResponse> {
        let headers = to_header_map(&request.headers)?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| KvError::Connection(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| KvError::Connection(e.to_string()))?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_marked_sensitive() {
        let map = to_header_map(&[
            ("authorization".into(), "Bearer t".into()),
            ("ns".into(), "anykv".into()),
        ])
        .unwrap();
        assert!(map.get("authorization").unwrap().is_sensitive());
        assert!(!map.get("ns").unwrap().is_sensitive());
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let err = to_header_map(&[("authorization".into(), "Bearer bad\nkey".into())])
            .unwrap_err();
        assert!(matches!(err, KvError::Config(ref m) if m.contains("invalid characters")));
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_connection_error() {
        let request = HttpRequest {
            method: Method::Get,
            url: "http://127.0.0.1:1/key/user".into(),
            headers: Vec::new(),
            body: None,
        };
        let err = ReqwestTransport::new().send(request).await.unwrap_err();
        assert!(matches!(err, KvError::Connection(_)));
    }
}
