//! One module per runnable example. Each `execute` is a straight line: check
//! the argument, build the payload, call the API, print or save the result.

pub mod create_etch_packet;
pub mod download_documents;
pub mod embed_pdf_template_builder;
pub mod embed_workflow_builder;
pub mod fill_pdf;
pub mod generate_html_to_pdf;
pub mod generate_markdown_to_pdf;
pub mod make_graphql_request;
pub mod workflow_submission;

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::AnvilClient;
use crate::output::output_file_path;

/// Anchor for default output paths: files land in `<crate>/output/`.
const SOURCE_ANCHOR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/main.rs");

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill a sample PDF template with data
    FillPdf(fill_pdf::FillPdfArgs),

    /// Generate a PDF from HTML and CSS
    GenerateHtmlToPdf,

    /// Generate a PDF from markdown blocks
    GenerateMarkdownToPdf,

    /// Create an e-sign packet and email the signature request
    CreateEtchPacket(create_etch_packet::CreateEtchPacketArgs),

    /// Start a workflow by submitting a webform, then update the submission
    CreateUpdateWorkflowSubmission(workflow_submission::WorkflowSubmissionArgs),

    /// Query the current user and the first workflow
    MakeGraphqlRequest,

    /// Generate an embeddable workflow builder URL
    EmbedWorkflowBuilder(embed_workflow_builder::EmbedWorkflowBuilderArgs),

    /// Upload a PDF template and generate an embeddable template editor URL
    EmbedPdfTemplateBuilder(embed_pdf_template_builder::EmbedPdfTemplateBuilderArgs),

    /// Download the documents of a completed e-sign packet
    DownloadDocuments(download_documents::DownloadDocumentsArgs),
}

pub async fn run(command: Commands, client: &AnvilClient, output_dir: Option<&Path>) -> anyhow::Result<()> {
    match command {
        Commands::FillPdf(args) => fill_pdf::execute(client, output_dir, args).await,
        Commands::GenerateHtmlToPdf => generate_html_to_pdf::execute(client, output_dir).await,
        Commands::GenerateMarkdownToPdf => generate_markdown_to_pdf::execute(client, output_dir).await,
        Commands::CreateEtchPacket(args) => create_etch_packet::execute(client, args).await,
        Commands::CreateUpdateWorkflowSubmission(args) => workflow_submission::execute(client, args).await,
        Commands::MakeGraphqlRequest => make_graphql_request::execute(client).await,
        Commands::EmbedWorkflowBuilder(args) => embed_workflow_builder::execute(client, args).await,
        Commands::EmbedPdfTemplateBuilder(args) => embed_pdf_template_builder::execute(client, args).await,
        Commands::DownloadDocuments(args) => download_documents::execute(client, output_dir, args).await,
    }
}

/// `output_dir/name`, or `<crate>/output/name` by default.
pub fn output_path(output_dir: Option<&Path>, name: &str) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(name),
        None => output_file_path(SOURCE_ANCHOR, name),
    }
}

/// Returns the argument, or prints usage and returns `None`.
pub(crate) fn require_arg<'a>(arg: Option<&'a str>, prompt: &str, usage: &str) -> Option<&'a str> {
    match arg.map(str::trim) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            print_usage(prompt, usage);
            None
        }
    }
}

pub(crate) fn print_usage(prompt: &str, usage: &str) {
    let program = std::env::args().next().unwrap_or_else(|| "anvil_examples".to_string());
    println!("{}", prompt);
    println!("Usage: {} {}", program, usage);
}
