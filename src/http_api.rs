pub mod http_auth_driven_ports;
pub mod http_todo_driven_ports;

use crate::domain::{ErrorBody, RequestError};
use crate::external_connections;
use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;

/// Data structure which owns the client for talking to the task API.
/// Allows business logic to be agnostic of how requests are sent, so driven adapters
/// can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ApiConnectivity {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl ApiConnectivity {
    /// Builds a client for the API at [base_url]. The client keeps a cookie store so the
    /// session cookie set by login rides along on every later request.
    pub fn new(base_url: &str) -> Result<Self, anyhow::Error> {
        let base_client = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(true)
            .build()
            .context("building the HTTP client")?;
        let http_client = ClientBuilder::new(base_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(ApiConnectivity {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }
}

impl external_connections::ExternalConnectivity for ApiConnectivity {
    fn http_client(&self) -> &ClientWithMiddleware {
        &self.http_client
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Sends [request] and turns any non-2xx answer into [RequestError::Rejected] carrying the
/// decoded response body
async fn send(request: RequestBuilder, action: &str) -> Result<reqwest::Response, RequestError> {
    let response = request
        .send()
        .await
        .with_context(|| format!("trying to {action}"))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw_body = response
        .bytes()
        .await
        .with_context(|| format!("reading the error body after failing to {action}"))?;
    Err(RequestError::Rejected {
        status: status.as_u16(),
        body: ErrorBody::decode(&raw_body),
    })
}
