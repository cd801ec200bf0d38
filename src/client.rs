use reqwest::Response;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Value, json};

use crate::AnvilError;
use crate::config::ClientConfig;
use crate::etch::CreateEtchPacket;
use crate::graphql::{
    CREATE_CAST_MUTATION, CREATE_ETCH_PACKET_MUTATION, GENERATE_EMBED_URL_MUTATION, GraphqlResponse, GraphqlUpload,
};
use crate::payload::{CreateCastRequest, EmbedUrlRequest, FillPdfPayload, GeneratePdfPayload};

/// Latest version of a template, drafts included.
pub const VERSION_LATEST: i32 = -1;
/// Latest published version. The server uses this when no version is given.
pub const VERSION_LATEST_PUBLISHED: i32 = -2;

/// Thin client over the REST and GraphQL endpoints of the hosted API.
///
/// Every call is a single request: no retries, no caching.
#[derive(Clone, Debug)]
pub struct AnvilClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl AnvilClient {
    pub fn new(config: ClientConfig) -> Result<Self, AnvilError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if config.is_loopback() {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fills a PDF template and returns the PDF bytes.
    pub async fn fill_pdf(&self, template_id: &str, payload: &FillPdfPayload) -> Result<Vec<u8>, AnvilError> {
        let url = self.config.rest_endpoint(&format!("fill/{template_id}.pdf"));
        log::info!("Filling PDF template {}", template_id);
        let response = self.post_json(&url, payload).await?;
        read_binary(response).await
    }

    /// Like [`fill_pdf`](Self::fill_pdf), pinned to a template version.
    pub async fn fill_pdf_version(
        &self,
        template_id: &str,
        payload: &FillPdfPayload,
        version_number: i32,
    ) -> Result<Vec<u8>, AnvilError> {
        let url = format!(
            "{}?versionNumber={}",
            self.config.rest_endpoint(&format!("fill/{template_id}.pdf")),
            version_number
        );
        log::info!("Filling PDF template {} at version {}", template_id, version_number);
        let response = self.post_json(&url, payload).await?;
        read_binary(response).await
    }

    /// Renders HTML/CSS or markdown blocks to a PDF.
    pub async fn generate_pdf(&self, payload: &GeneratePdfPayload) -> Result<Vec<u8>, AnvilError> {
        let url = self.config.rest_endpoint("generate-pdf");
        log::info!("Generating PDF");
        let response = self.post_json(&url, payload).await?;
        read_binary(response).await
    }

    pub async fn create_etch_packet(&self, packet: &CreateEtchPacket) -> Result<GraphqlResponse, AnvilError> {
        log::info!("Creating e-sign packet '{}'", packet.name);
        self.query(CREATE_ETCH_PACKET_MUTATION, Some(serde_json::to_value(packet)?))
            .await
    }

    pub async fn generate_embed_url(&self, request: &EmbedUrlRequest) -> Result<GraphqlResponse, AnvilError> {
        log::info!("Generating {} embed URL for {}", request.kind, request.eid);
        self.query(GENERATE_EMBED_URL_MUTATION, Some(serde_json::to_value(request)?))
            .await
    }

    /// Uploads a PDF as a new template ("cast"). The file travels as a GraphQL
    /// multipart request bound to `$file`.
    pub async fn create_cast(
        &self,
        request: &CreateCastRequest,
        file: GraphqlUpload,
    ) -> Result<GraphqlResponse, AnvilError> {
        let mut variables = serde_json::to_value(request)?;
        if let Value::Object(fields) = &mut variables {
            fields.insert("file".to_string(), Value::Null);
        }
        let operations = json!({ "query": CREATE_CAST_MUTATION, "variables": variables });
        log::info!("Uploading {} as a new PDF template", file.filename);
        self.query_multipart(&operations, "variables.file", file).await
    }

    /// Downloads every document of a completed packet as a zip archive.
    pub async fn download_documents(&self, document_group_eid: &str) -> Result<Vec<u8>, AnvilError> {
        let api_key = self.api_key()?;
        let url = self
            .config
            .api_endpoint(&format!("document-group/{document_group_eid}.zip"));
        log::info!("Downloading document group {}", document_group_eid);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .basic_auth(api_key, None::<&str>)
            .send()
            .await?;
        read_binary(response).await
    }

    /// Runs a GraphQL query or mutation.
    ///
    /// The parsed body is returned even on a non-2xx status so the caller can
    /// inspect `errors`. Only a body that is not JSON fails.
    pub async fn query(&self, query: &str, variables: Option<Value>) -> Result<GraphqlResponse, AnvilError> {
        let body = json!({ "query": query, "variables": variables });
        let response = self.post_json(&self.config.graphql_endpoint(), &body).await?;
        read_graphql(response).await
    }

    /// `operations` + `map` + one file part, per the GraphQL multipart request
    /// convention. `variable_path` is where the file lands, e.g. `variables.file`.
    async fn query_multipart(
        &self,
        operations: &Value,
        variable_path: &str,
        file: GraphqlUpload,
    ) -> Result<GraphqlResponse, AnvilError> {
        let api_key = self.api_key()?;
        let url = self.config.graphql_endpoint();
        log::debug!("POST {} (multipart, {} byte file)", url, file.data.len());

        let part = Part::bytes(file.data)
            .file_name(file.filename)
            .mime_str(&file.mimetype)?;
        let form = Form::new()
            .text("operations", serde_json::to_string(operations)?)
            .text("map", json!({ "0": [variable_path] }).to_string())
            .part("0", part);

        let response = self
            .http
            .post(&url)
            .basic_auth(api_key, None::<&str>)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;
        read_graphql(response).await
    }

    fn api_key(&self) -> Result<&str, AnvilError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AnvilError::MissingApiKey),
        }
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Response, AnvilError> {
        let api_key = self.api_key()?;
        let body = serde_json::to_vec(body)?;
        log::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .http
            .post(url)
            .basic_auth(api_key, None::<&str>)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, application/pdf")
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

async fn read_graphql(response: Response) -> Result<GraphqlResponse, AnvilError> {
    let status = response.status();
    let text = response.text().await?;
    match serde_json::from_str::<GraphqlResponse>(&text) {
        Ok(parsed) => {
            if let Some(errors) = parsed.errors() {
                log::debug!("GraphQL responded {} with errors: {}", status, errors);
            }
            Ok(parsed)
        }
        Err(_) if !status.is_success() => Err(AnvilError::Api {
            status: status.as_u16(),
            body: text,
        }),
        Err(e) => Err(e.into()),
    }
}

async fn read_binary(response: Response) -> Result<Vec<u8>, AnvilError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnvilError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_missing() {
        let client = AnvilClient::new(ClientConfig::new("   ")).unwrap();
        assert!(matches!(client.api_key(), Err(AnvilError::MissingApiKey)));

        let client = AnvilClient::new(ClientConfig::new("k").with_api_key(None)).unwrap();
        assert!(matches!(client.api_key(), Err(AnvilError::MissingApiKey)));
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        // Nothing listens on this port; reaching the network would be an Http error.
        let config = ClientConfig::new("").with_base_url("http://127.0.0.1:9");
        let client = AnvilClient::new(config).unwrap();

        let err = client.query("{ currentUser { eid } }", None).await.unwrap_err();
        assert!(matches!(err, AnvilError::MissingApiKey));
    }

    #[tokio::test]
    async fn upload_without_key_fails_before_sending() {
        let config = ClientConfig::new("").with_base_url("http://127.0.0.1:9");
        let client = AnvilClient::new(config).unwrap();

        let file = GraphqlUpload::new(b"%PDF".to_vec(), "t.pdf", "application/pdf");
        let err = client
            .create_cast(&CreateCastRequest::default(), file)
            .await
            .unwrap_err();
        assert!(matches!(err, AnvilError::MissingApiKey));
    }
}
