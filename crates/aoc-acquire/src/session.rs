//! Authenticated HTTP access to the puzzle site.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::{Config, Error, Result};

/// A response reduced to what the puzzle workflow looks at.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two requests the tool makes. One attempt each, no retries.
#[async_trait]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// HTTP client sending the session cookie with every request.
pub struct AuthSession {
    client: reqwest::Client,
}

impl AuthSession {
    pub fn new(token: &str, config: &Config) -> Result<Self> {
        let mut cookie = HeaderValue::from_str(&format!("session={token}"))
            .map_err(|_| Error::InvalidCookie)?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(status, url = %url, bytes = body.len(), "Received response");
        Ok(HttpResponse { status, url, body })
    }
}

#[async_trait]
impl Transport for AuthSession {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        tracing::debug!(url = %url, "POST");
        let response = self.client.post(url).form(form).send().await?;
        Self::read(response).await
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod mock {
    //! In-memory transport for tests.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Get(String),
        Post(String, Vec<(String, String)>),
    }

    /// Replays queued responses and records every call.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, url: &str, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                url: url.to_string(),
                body: body.to_string(),
            });
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next(&self) -> HttpResponse {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request: no response queued")
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.calls.lock().unwrap().push(Call::Get(url.to_string()));
            Ok(self.next())
        }

        async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
            let form = form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.calls
                .lock()
                .unwrap()
                .push(Call::Post(url.to_string(), form));
            Ok(self.next())
        }
    }
}
