use std::path::Path;

use anyhow::Context;
use clap::Args;

use crate::AnvilClient;
use crate::output::write_output;

#[derive(Debug, Args)]
pub struct DownloadDocumentsArgs {
    /// `documentGroup.eid` of a completed e-sign packet
    pub document_group_eid: Option<String>,
}

const USAGE: &str = "download-documents <documentGroupEid>";

/// The eid becomes both a URL segment and a file name.
fn is_valid_eid(eid: &str) -> bool {
    !eid.contains(['/', '\\']) && !eid.contains("..")
}

pub async fn execute(
    client: &AnvilClient,
    output_dir: Option<&Path>,
    args: DownloadDocumentsArgs,
) -> anyhow::Result<()> {
    let Some(eid) = super::require_arg(
        args.document_group_eid.as_deref(),
        "Enter the document group eid of a completed packet.",
        USAGE,
    ) else {
        return Ok(());
    };
    if !is_valid_eid(eid) {
        super::print_usage(&format!("Not a document group eid: {eid}"), USAGE);
        return Ok(());
    }

    let output = super::output_path(output_dir, &format!("{eid}.zip"));

    println!("Downloading documents for {}...", eid);
    let archive = client.download_documents(eid).await?;

    write_output(&output, &archive).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved to {}", output.display());
    Ok(())
}
