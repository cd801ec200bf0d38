use std::path::Path;

use anyhow::Context;

use crate::AnvilClient;
use crate::output::write_output;
use crate::payload::{GeneratePdfPayload, MarkdownBlock, MarkdownTable};

pub const OUTPUT_NAME: &str = "generate-markdown-output.pdf";

const BODY: &str = "
Lorem **ipsum** dolor sit _amet_, consectetur adipiscing elit, sed [do eiusmod](https://www.useanvil.com/docs) tempor incididunt ut labore et dolore magna aliqua. Ut placerat orci nulla pellentesque dignissim enim sit amet venenatis.


Mi eget mauris pharetra et ultrices neque ornare aenean.


* Sagittis eu volutpat odio facilisis.


* Erat nam at lectus urna.
";

pub fn markdown_payload() -> GeneratePdfPayload {
    let rows: Vec<Vec<String>> = [
        ["Description", "Quantity", "Price"],
        ["4x Large Widgets", "4", "$40.00"],
        ["10x Medium Sized Widgets in dark blue", "10", "$100.00"],
        ["10x Small Widgets in white", "6", "$60.00"],
    ]
    .iter()
    .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>())
    .collect();

    GeneratePdfPayload::markdown(
        "Example Invoice",
        vec![
            MarkdownBlock::labeled("Name", "Sally Jones"),
            MarkdownBlock::text(BODY),
            MarkdownBlock::table(MarkdownTable {
                first_row_headers: true,
                rows,
                column_options: None,
            }),
        ],
    )
}

pub async fn execute(client: &AnvilClient, output_dir: Option<&Path>) -> anyhow::Result<()> {
    let output = super::output_path(output_dir, OUTPUT_NAME);

    println!("Making Markdown PDF generation request...");
    let pdf = client.generate_pdf(&markdown_payload()).await?;

    write_output(&output, &pdf).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Finished! Saved to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::GenerateData;

    #[test]
    fn invoice_table_has_header_row() {
        let payload = markdown_payload();
        let GenerateData::Markdown(blocks) = payload.data else {
            panic!("expected markdown blocks");
        };
        let table = blocks[2].table.as_ref().unwrap();
        assert!(table.first_row_headers);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], vec!["Description", "Quantity", "Price"]);
        assert!(payload.kind.is_none());
    }
}
