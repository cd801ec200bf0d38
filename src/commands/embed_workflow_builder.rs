use clap::Args;
use serde_json::json;

use crate::AnvilClient;
use crate::payload::EmbedUrlRequest;

pub const EXISTING_WELD_EID: &str = "ABsfXg56ShtfGlVbwEEP";

/// 90 minutes.
const VALID_FOR_SECONDS: u32 = 90 * 60;

#[derive(Debug, Args)]
pub struct EmbedWorkflowBuilderArgs {
    /// Workflow to open in the embedded builder
    #[arg(default_value = EXISTING_WELD_EID)]
    pub weld_eid: String,
}

pub fn embed_request(weld_eid: &str) -> EmbedUrlRequest {
    EmbedUrlRequest {
        eid: weld_eid.to_string(),
        kind: "edit-workflow".to_string(),
        valid_for_seconds: Some(VALID_FOR_SECONDS),
        metadata: Some(json!({
            "myUserId": "1234",
            "anythingElse": "you want",
        })),
        options: Some(json!({
            "showSettingsPage": false,
            "showWebformOptions": false,
        })),
    }
}

pub async fn execute(client: &AnvilClient, args: EmbedWorkflowBuilderArgs) -> anyhow::Result<()> {
    let response = client.generate_embed_url(&embed_request(&args.weld_eid)).await?;

    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    let generated = response.operation("generateEmbedURL")?;
    println!("generateEmbedURL response {}", serde_json::to_string_pretty(generated)?);
    if let Some(url) = generated.get("url").and_then(|url| url.as_str()) {
        println!("Open the embedded workflow builder at: {}", url);
    }
    Ok(())
}
