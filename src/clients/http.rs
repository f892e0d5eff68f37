use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use rquest::{Client, RequestBuilder, Response};
use rquest_util::Emulation;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::services::ProductSource;

pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
    products_url: String,
}

impl HttpClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        Self::with_emulation(api, Emulation::Chrome133)
    }

    pub fn with_emulation(api: &ApiConfig, emulation: Emulation) -> Result<Self> {
        let mut headers = HeaderMap::new();

        // Add configured headers, skipping any that aren't valid HTTP
        for (key, value) in api.headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(header_name, header_value);
                debug!(header_key = key, header_value = value, "Adding header");
            } else {
                error!(header_key = key, header_value = value, "Invalid header value");
            }
        }

        debug!(emulation = ?emulation, "Creating client with emulation");

        // Browser-like TLS and header fingerprint
        let client = Client::builder().emulation(emulation).build()?;

        Ok(Self {
            client,
            headers,
            products_url: api.products_url(),
        })
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url);

        // Apply headers to each request
        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        debug!(url = url, headers = ?self.headers, "Creating GET request with headers");

        request
    }

    /// Sends the request; any non-success status is an error.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "Response received"
        );

        // Only 2xx bodies are worth decoding
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status(status))
        }
    }
}

#[async_trait]
impl ProductSource for HttpClient {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let request = self.get(&self.products_url);
        let response = self.send(request).await?;
        // Decoding is left to the caller, which knows the record type
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
