use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::core::{parse_content_type, WgetError, WgetOptions, WgetResult};
use crate::utils::url::Url;

/// A fully read HTML document together with the URL it ended up at
#[derive(Debug)]
pub struct Document {
    pub data: Vec<u8>,
    /// URL after redirects; references inside the document resolve against it
    pub final_url: Url,
    /// From `Content-Type`; empty when the server didn't name one
    pub charset: String,
}

/// HTTP session shared by every request of one run
///
/// Wraps a blocking client configured with the run's timeouts and user agent.
/// Requests are issued strictly one after another.
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(options: WgetOptions) -> WgetResult<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent)
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .build()
            .map_err(|e| WgetError::transport("<client>", e))?;

        Ok(Session { client })
    }

    /// Sends a GET request and returns the response whatever its status
    pub fn get(&self, url: &Url) -> WgetResult<Response> {
        debug!("GET {url}");
        self.client
            .get(url.as_str())
            .send()
            .map_err(|e| WgetError::transport(url.as_str(), e))
    }

    /// Sends a GET request; any non-2xx status becomes `WgetError::Status`
    pub fn get_success(&self, url: &Url) -> WgetResult<Response> {
        let response = self.get(url)?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            Err(WgetError::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    /// Fetches a page and reads its whole body into memory
    pub fn retrieve_document(&self, url: &Url) -> WgetResult<Document> {
        let response = self.get_success(url)?;
        let final_url = response.url().clone();

        let (_, charset) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(parse_content_type)
            .unwrap_or_default();

        let data = response
            .bytes()
            .map_err(|e| WgetError::transport(url.as_str(), e))?
            .to_vec();

        Ok(Document {
            data,
            final_url,
            charset,
        })
    }
}
