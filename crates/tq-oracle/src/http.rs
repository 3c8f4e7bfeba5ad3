//! HTTP transport for the oracle.
//!
//! Posts [`OracleRequest`] bodies as JSON to a single endpoint (typically a
//! thin proxy in front of a language model) and decodes the reply strictly.

use std::time::{Duration, Instant};

use reqwest::Url;

use crate::error::{OracleError, OracleResult};
use crate::oracle::{DEFAULT_TIMEOUT, Oracle};
use crate::verdict::Evaluation;
use crate::wire::{OracleRequest, decode_evaluation, decode_item};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// An [`Oracle`] reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
    timeout: Duration,
}

impl HttpOracle {
    /// Create a client for `endpoint` with the default timeout.
    pub fn new(endpoint: &str) -> OracleResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a client for `endpoint` whose requests give up after `timeout`.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> OracleResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| OracleError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(OracleError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            token: None,
            timeout,
        })
    }

    /// Send `token` as a bearer credential with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn call(&self, request: &OracleRequest) -> OracleResult<Vec<u8>> {
        let started = Instant::now();
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let result = self.exchange(builder).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(action = request.action(), elapsed_ms, "oracle call finished"),
            Err(e) => tracing::warn!(action = request.action(), elapsed_ms, %e, "oracle call failed"),
        }
        result
    }

    async fn exchange(&self, builder: reqwest::RequestBuilder) -> OracleResult<Vec<u8>> {
        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(bytes.to_vec())
    }

    fn classify(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.timeout)
        } else {
            OracleError::from(err)
        }
    }
}

impl Oracle for HttpOracle {
    async fn select_secret_item(&self) -> OracleResult<String> {
        let bytes = self.call(&OracleRequest::SelectSecretItem).await?;
        decode_item(&bytes)
    }

    async fn evaluate(
        &self,
        secret_item: &str,
        user_text: &str,
        question_index: u32,
    ) -> OracleResult<Evaluation> {
        let request = OracleRequest::EvaluateInput {
            user_input: user_text.to_string(),
            question_count: question_index,
            secret_item: secret_item.to_string(),
        };
        let bytes = self.call(&request).await?;
        decode_evaluation(&bytes)
    }
}
