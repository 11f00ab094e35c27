use crate::protocol::ClientError;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Low level transport bound to one record store endpoint, e.g.
/// `http://localhost:8081/api/flight`. Operations are addressed as
/// `{base_url}/{op}`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, op: &str) -> String {
        format!("{}/{}", self.base_url, op)
    }

    fn request(&self, method: Method, op: &str) -> RequestBuilder {
        let url = self.url(op);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Single suspension point for every call. Success is decided by the
    /// status code alone; the body of a failed call is kept for the message.
    async fn send(&self, op: &str, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status,
                path: format!("/{}", op),
                body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(op: &str, response: Response) -> Result<T, ClientError> {
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Protocol(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            ClientError::Protocol(format!("Failed to parse /{} response: {} - Text: {}", op, e, text))
        })
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        op: &str,
        fields: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let response = self.send(op, self.request(Method::POST, op).form(fields)).await?;
        Self::decode(op, response).await
    }

    /// POST whose reply body is ignored.
    pub async fn post_form_discard(
        &self,
        op: &str,
        fields: &[(&'static str, String)],
    ) -> Result<(), ClientError> {
        self.send(op, self.request(Method::POST, op).form(fields)).await?;
        Ok(())
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, op: &str) -> Result<T, ClientError> {
        let response = self.send(op, self.request(Method::POST, op)).await?;
        Self::decode(op, response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, op: &str) -> Result<T, ClientError> {
        let response = self.send(op, self.request(Method::GET, op)).await?;
        Self::decode(op, response).await
    }

    pub async fn get_bytes(&self, op: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.send(op, self.request(Method::GET, op)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Protocol(format!("Failed to read payload: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// Uploads `data` as the multipart field `field`; the reply body is ignored.
    pub async fn post_file(
        &self,
        op: &str,
        field: &'static str,
        file_name: &str,
        mime: &str,
        data: Vec<u8>,
    ) -> Result<(), ClientError> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid mime: {}", e)))?;
        let form = reqwest::multipart::Form::new().part(field, part);

        self.send(op, self.request(Method::POST, op).multipart(form)).await?;
        Ok(())
    }
}
