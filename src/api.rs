// API client module: a small blocking HTTP client that talks to the
// classification service. The `Classifier` trait is the seam the
// submission handler depends on, so tests can swap in a fake.

use crate::config::Config;
use crate::error::SubmitError;
use crate::submission::Document;
use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Something that can classify text or a document and answer with an
/// opaque JSON value.
pub trait Classifier {
    fn classify_text(&self, text: &str) -> Result<Value, SubmitError>;
    fn classify_document(&self, doc: &Document) -> Result<Value, SubmitError>;
}

/// Blocking client for the classification service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

/// Body of the text classification request.
#[derive(Serialize, Debug)]
struct TextRequest<'a> {
    text: &'a str,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, config })
    }

    /// Probe `GET /health` and return whatever JSON the service reports.
    pub fn health(&self) -> Result<Value, SubmitError> {
        let url = self.config.health_url();
        debug!(%url, "checking service health");
        let res = self.client.get(&url).send().map_err(SubmitError::unexpected)?;
        read_json(res)
    }
}

impl Classifier for ApiClient {
    /// POST `{"text": ...}` as JSON to the text endpoint.
    fn classify_text(&self, text: &str) -> Result<Value, SubmitError> {
        let url = self.config.text_url();
        debug!(%url, "posting text for classification");
        let res = self
            .client
            .post(&url)
            .json(&TextRequest { text })
            .send()
            .map_err(SubmitError::unexpected)?;
        read_json(res)
    }

    /// POST the document as multipart/form-data under the `file` field.
    /// The multipart encoder sets the request Content-Type.
    fn classify_document(&self, doc: &Document) -> Result<Value, SubmitError> {
        let url = self.config.pdf_url();
        debug!(%url, file = %doc.file_name, "uploading document for classification");

        let part = multipart::Part::bytes(doc.bytes.clone())
            .file_name(doc.file_name.clone())
            .mime_str(&doc.mime)
            .map_err(SubmitError::unexpected)?;
        let form = multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(SubmitError::unexpected)?;
        read_json(res)
    }
}

/// Turn a response into JSON, or into a `Service` error carrying the body
/// when the status is not a success.
fn read_json(res: Response) -> Result<Value, SubmitError> {
    let status = res.status();
    if !status.is_success() {
        // Best-effort: an unreadable body counts as empty.
        let body = res.text().unwrap_or_default();
        debug!(%status, body_len = body.len(), "service returned a failure status");
        return Err(SubmitError::service(body));
    }
    res.json::<Value>().map_err(SubmitError::unexpected)
}
