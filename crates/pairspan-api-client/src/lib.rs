//! HTTP client for the work-log processing service.
//!
//! Provides one explicitly constructed client with the transport policy every call shares
//! (JSON `Accept` header, empty bodies on reads, no retries), generic GET and multipart
//! POST helpers, and the attachment domain methods in [`api`].

pub mod api;

use pairspan_core::{ClientConfig, FetchError, TransferError};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ApiError> for TransferError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Request(source)
                if source.is_connect() || source.is_timeout() || source.is_request() =>
            {
                TransferError::Network(err.to_string())
            }
            ApiError::Status { status, body } => match *status {
                400 | 413 | 415 | 422 => TransferError::Validation(body.clone()),
                500..=599 => TransferError::Server {
                    status: *status,
                    message: body.clone(),
                },
                _ => TransferError::Unknown(err.to_string()),
            },
            ApiError::Io { .. } | ApiError::InvalidInput(_) => {
                TransferError::Validation(err.to_string())
            }
            _ => TransferError::Unknown(err.to_string()),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        FetchError::Other(anyhow::Error::new(err))
    }
}

/// HTTP client for the processing service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    attachments_path: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            attachments_path: config.attachments_path,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.send(request).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// POST multipart form. The response body is not interpreted, only its status.
    pub async fn post_multipart(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: reqwest::multipart::Form,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.build_url(path))
            .query(query)
            .multipart(form);

        self.send(request).await?;
        Ok(())
    }

    /// Build, normalize and execute a request, turning non-2xx responses into errors.
    ///
    /// Reads never carry a body, whatever the builder was given. The body headers go too,
    /// otherwise the server waits for a payload that is never sent.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let mut request = request.build().map_err(ApiError::Request)?;
        if *request.method() == Method::GET {
            *request.body_mut() = None;
            let headers = request.headers_mut();
            headers.remove(CONTENT_LENGTH);
            headers.remove(CONTENT_TYPE);
            headers.remove(TRANSFER_ENCODING);
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn attachments_url_path(&self, suffix: &str) -> String {
        format!("{}{}", self.attachments_path, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> ApiError {
        ApiError::Status {
            status,
            body: "rejected".to_string(),
        }
    }

    #[test]
    fn client_rejections_are_validation_failures() {
        for code in [400, 413, 415, 422] {
            assert_eq!(
                TransferError::from(status(code)),
                TransferError::Validation("rejected".to_string())
            );
        }
    }

    #[test]
    fn server_statuses_keep_their_code() {
        assert_eq!(
            TransferError::from(status(503)),
            TransferError::Server {
                status: 503,
                message: "rejected".to_string()
            }
        );
    }

    #[test]
    fn other_statuses_are_unknown() {
        assert!(matches!(
            TransferError::from(status(404)),
            TransferError::Unknown(_)
        ));
    }

    #[test]
    fn local_input_problems_are_validation_failures() {
        let err = ApiError::InvalidInput("no file name".to_string());
        assert!(matches!(
            TransferError::from(err),
            TransferError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn get_with_attached_form_goes_out_empty() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/attachments/log.csv")
            .match_body("")
            .match_header("content-type", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let config = ClientConfig {
            timeout: Some(std::time::Duration::from_secs(5)),
            ..ClientConfig::default().with_base_url(server.url())
        };
        let client = ApiClient::new(config).unwrap();
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(b"1, P1, 2020-01-01, NULL".to_vec())
                .file_name("log.csv"),
        );
        let request = client
            .client
            .get(client.build_url("/api/attachments/log.csv"))
            .multipart(form);

        let response = client.send(request).await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        mock.assert_async().await;
    }

    #[test]
    fn build_url_joins_base_and_path() {
        let client =
            ApiClient::new(ClientConfig::default().with_base_url("http://svc:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://svc:8080");
        assert_eq!(
            client.build_url("/api/attachments/log.csv"),
            "http://svc:8080/api/attachments/log.csv"
        );
    }
}
