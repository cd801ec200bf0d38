//! Creates an e-sign packet with one signer and two documents: the sample
//! template, and an NDA uploaded with the request. Both get filled with the
//! signer's details before the signature request is emailed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::AnvilClient;
use crate::etch::{Base64Upload, CreateEtchPacket, DocumentUpload, EtchCastRef, EtchSigner, Rect, SignatureField};
use crate::payload::FillPdfPayload;

pub const PDF_TEMPLATE_EID: &str = "05xXsZko33JIO6aq5Pnr";
pub const SAMPLE_TEMPLATE_ID: &str = "sampleTemplate";
pub const NDA_FILE_ID: &str = "fileUploadNDA";
pub const SIGNER_NAME: &str = "Testy Signer";

const DEFAULT_NDA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static/test-pdf-nda.pdf");

#[derive(Debug, Args)]
pub struct CreateEtchPacketArgs {
    /// Real address that receives the signature request
    pub signer_email: Option<String>,

    /// PDF to upload as the NDA
    #[arg(long, default_value = DEFAULT_NDA_PATH)]
    pub nda_file: PathBuf,
}

fn nda_fields() -> Vec<SignatureField> {
    let field = |id: &str, kind: &str, page_num: u32, x: u32, y: u32, width: u32, height: u32| {
        SignatureField::new(id, kind, page_num, Rect { x, y, width, height })
    };
    vec![
        field("recipientName", "fullName", 0, 223, 120, 140, 12),
        field("recipientEmail", "email", 0, 367, 120, 166, 12),
        field("recipientSignatureName", "fullName", 1, 107, 374, 157, 22),
        field("recipientSignature", "signature", 1, 270, 374, 142, 22),
        field("recipientSignatureDate", "signatureDate", 1, 419, 374, 80, 22),
    ]
}

/// Fields are presented to the signer in the order they are added here.
pub fn signer(signer_name: &str, signer_email: &str) -> EtchSigner {
    EtchSigner::new("signer1", signer_name, signer_email)
        .add_field(SAMPLE_TEMPLATE_ID, "signature")
        .add_field(SAMPLE_TEMPLATE_ID, "signatureInitial")
        .add_field(SAMPLE_TEMPLATE_ID, "signatureDate")
        .add_field(SAMPLE_TEMPLATE_ID, "signerName")
        .add_field(SAMPLE_TEMPLATE_ID, "signerEmail")
        .add_field(NDA_FILE_ID, "recipientSignature")
        .add_field(NDA_FILE_ID, "recipientSignatureDate")
}

pub fn build_packet_payload(
    nda_path: &Path,
    signer_name: &str,
    signer_email: &str,
) -> anyhow::Result<CreateEtchPacket> {
    let upload = Base64Upload::from_path(nda_path, "fileUploadNDA.pdf")
        .with_context(|| format!("Failed to read NDA file {}", nda_path.display()))?;

    let mut packet = CreateEtchPacket::new(format!("Test Docs - {signer_name}"))
        .draft(false)
        .test(true)
        .email("Custom email subject", "Custom please sign these documents....");

    packet
        .add_file(DocumentUpload {
            id: NDA_FILE_ID.to_string(),
            title: "Demo NDA".to_string(),
            file: upload,
            fields: nda_fields(),
        })
        .add_file(EtchCastRef::new(SAMPLE_TEMPLATE_ID, PDF_TEMPLATE_EID))
        .add_signer(signer(signer_name, signer_email));

    let template_data = json!({
        "name": signer_name,
        "email": signer_email,
        "ssn": "456454567",
        "ein": "897654321",
        "usAddress": {
            "street1": "123 Main St #234",
            "city": "San Francisco",
            "state": "CA",
            "zip": "94106",
            "country": "US"
        }
    });
    let nda_data = json!({
        "recipientName": signer_name,
        "recipientSignatureName": signer_name,
        "recipientEmail": signer_email
    });

    packet
        .add_file_payload(
            SAMPLE_TEMPLATE_ID,
            FillPdfPayload::new(template_data.as_object().cloned().unwrap_or_default()),
        )
        .add_file_payload(
            NDA_FILE_ID,
            FillPdfPayload::new(nda_data.as_object().cloned().unwrap_or_default())
                .font_size(8)
                .text_color("#0000CC"),
        );

    Ok(packet)
}

pub async fn execute(client: &AnvilClient, args: CreateEtchPacketArgs) -> anyhow::Result<()> {
    let Some(signer_email) = super::require_arg(
        args.signer_email.as_deref(),
        "Please provide a signer email",
        "create-etch-packet your.real.email@example.com",
    ) else {
        return Ok(());
    };

    let packet = build_packet_payload(&args.nda_file, SIGNER_NAME, signer_email)?;

    println!("Creating Etch e-sign packet...");
    let response = client.create_etch_packet(&packet).await?;

    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    let details = response.operation("createEtchPacket")?;
    println!(
        "Visit the new packet on your dashboard: {}",
        details.get("detailsURL").and_then(|url| url.as_str()).unwrap_or("<none>")
    );
    println!("{}", serde_json::to_string_pretty(details)?);
    Ok(())
}
