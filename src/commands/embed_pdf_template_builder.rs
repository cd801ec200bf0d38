//! Uploads a PDF as a new template, then generates a URL that opens the
//! template editor in an iframe, preset with the fields the user should draw.
//!
//! The iframe only loads on domains trusted in the organization's embedding
//! settings.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::{Value, json};

use crate::AnvilClient;
use crate::graphql::GraphqlUpload;
use crate::payload::{CreateCastRequest, EmbedUrlRequest};

pub const TEMPLATE_TITLE: &str = "Test Upload";
pub const UPLOAD_FILENAME: &str = "Test Embedded Upload.pdf";

/// 10 minutes.
const VALID_FOR_SECONDS: u32 = 10 * 60;

const DEFAULT_PDF_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static/test-pdf-nda.pdf");

#[derive(Debug, Args)]
pub struct EmbedPdfTemplateBuilderArgs {
    /// PDF to upload as the new template
    #[arg(long, default_value = DEFAULT_PDF_PATH)]
    pub pdf_file: PathBuf,
}

pub fn cast_request() -> CreateCastRequest {
    CreateCastRequest {
        title: Some(TEMPLATE_TITLE.to_string()),
        is_template: Some(true),
        ..Default::default()
    }
}

/// `aliasId`s are the ids later used to fill the template and assign signers.
fn preset_fields() -> Value {
    json!([
        { "name": "Full name", "type": "fullName", "aliasId": "name", "required": true },
        { "name": "Email", "type": "email", "aliasId": "email", "required": true },
        {
            "name": "Date of birth",
            "type": "date",
            "aliasId": "dob",
            "required": false,
            "format": "MMMM Do YYYY",
        },
        { "name": "Client signature", "type": "signature", "aliasId": "clientSignature", "required": false },
        { "name": "Client initials", "type": "initial", "aliasId": "clientInitials", "required": false },
        {
            "name": "Client signature date",
            "type": "signatureDate",
            "aliasId": "clientSignatureDate",
            "required": false,
        },
    ])
}

pub fn embed_request(cast_eid: &str) -> EmbedUrlRequest {
    EmbedUrlRequest {
        eid: cast_eid.to_string(),
        kind: "edit-pdf-template".to_string(),
        valid_for_seconds: Some(VALID_FOR_SECONDS),
        metadata: Some(json!({
            "myUserId": "1234",
            "anythingElse": "you want",
        })),
        options: Some(json!({
            "pageTitle": "Title of the page",
            "mode": "preset-fields",
            "title": "Welcome",
            "description": "Please draw fields indicated below.",
            "selectionDescription": "Select the field that best represents the box drawn.",
            "fields": preset_fields(),
        })),
    }
}

pub async fn execute(client: &AnvilClient, args: EmbedPdfTemplateBuilderArgs) -> anyhow::Result<()> {
    let file = GraphqlUpload::pdf_from_path(&args.pdf_file, UPLOAD_FILENAME)
        .with_context(|| format!("Failed to read PDF {}", args.pdf_file.display()))?;

    let response = client.create_cast(&cast_request(), file).await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    let cast = response.operation("createCast")?;
    println!("createCast response {}", serde_json::to_string_pretty(cast)?);
    let cast_eid = cast
        .get("eid")
        .and_then(Value::as_str)
        .context("createCast response has no eid")?;

    let response = client.generate_embed_url(&embed_request(cast_eid)).await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    let generated = response.operation("generateEmbedURL")?;
    println!("generateEmbedURL response {}", serde_json::to_string_pretty(generated)?);
    if let Some(url) = generated.get("url").and_then(Value::as_str) {
        println!("Open the embedded PDF template builder at: {}", url);
    }
    Ok(())
}
