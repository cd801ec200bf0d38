use std::path::Path;

use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::AnvilClient;
use crate::output::write_output;
use crate::payload::FillPdfPayload;

/// Sample template available to every account.
pub const PDF_TEMPLATE_EID: &str = "05xXsZko33JIO6aq5Pnr";
pub const OUTPUT_NAME: &str = "fill-output.pdf";

#[derive(Debug, Args)]
pub struct FillPdfArgs {
    /// Template version to fill (-1 latest including drafts, -2 latest published)
    #[arg(long, allow_negative_numbers = true)]
    pub version_number: Option<i32>,
}

/// Keys in `data` must match the field ids on the template.
pub fn fill_data() -> FillPdfPayload {
    let data = json!({
        "shortText": "HELLOOW",
        "date": "2022-07-08",
        "name": {
            "firstName": "Robin",
            "mi": "W",
            "lastName": "Smith"
        },
        "email": "testy@example.com",
        "phone": {
            "num": "5554443333",
            "region": "US",
            "baseRegion": "US"
        },
        "usAddress": {
            "street1": "123 Main St #234",
            "city": "San Francisco",
            "state": "CA",
            "zip": "94106",
            "country": "US"
        },
        "ssn": "456454567",
        "ein": "897654321",
        "checkbox": true,
        "radioGroup": "cast68d7e540afba11ecaf289fa5a354293a",
        "decimalNumber": 12345.67,
        "dollar": 123.45,
        "integer": 12345,
        "percent": 50.3,
        "longText": "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor.",
        "textPerLine": "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor.",
        "textPerLetter": "taH9QGigei6G5BtTUA4",
        "image": "https://placekitten.com/800/495"
    });

    FillPdfPayload::new(data.as_object().cloned().unwrap_or_default())
        .title("My PDF Title")
        .font_size(10)
        .text_color("#333333")
}

pub async fn execute(client: &AnvilClient, output_dir: Option<&Path>, args: FillPdfArgs) -> anyhow::Result<()> {
    let output = super::output_path(output_dir, OUTPUT_NAME);
    let payload = fill_data();

    println!("Making fill request...");
    let pdf = match args.version_number {
        Some(version) => client.fill_pdf_version(PDF_TEMPLATE_EID, &payload, version).await?,
        None => client.fill_pdf(PDF_TEMPLATE_EID, &payload).await?,
    };

    write_output(&output, &pdf).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Filled PDF saved to {}", output.display());
    Ok(())
}
