use std::path::Path;

use anyhow::Context;

use crate::AnvilClient;
use crate::output::write_output;
use crate::payload::GeneratePdfPayload;

pub const OUTPUT_NAME: &str = "generate-html-output.pdf";

const HTML: &str = r#"
    <h1 class='header-one'>What is Lorem Ipsum?</h1>
    <p>
        Lorem Ipsum is simply dummy text of the printing and typesetting
        industry. Lorem Ipsum has been the industry's standard dummy text
        ever since the <strong>1500s</strong>, when an unknown printer took
        a galley of type and scrambled it to make a type specimen book.
    </p>
    <h3 class='header-two'>Where does it come from?</h3>
    <p>
        Contrary to popular belief, Lorem Ipsum is not simply random text.
        It has roots in a piece of classical Latin literature from
        <i>45 BC</i>, making it over <strong>2000</strong> years old.
    </p>
"#;

const CSS: &str = r#"
    body { font-size: 14px; color: #171717; }
    .header-one { text-decoration: underline; }
    .header-two { font-style: underline; }
"#;

pub fn html_payload() -> GeneratePdfPayload {
    GeneratePdfPayload::html("Example HTML to PDF", HTML, CSS)
}

pub async fn execute(client: &AnvilClient, output_dir: Option<&Path>) -> anyhow::Result<()> {
    let output = super::output_path(output_dir, OUTPUT_NAME);

    println!("Making HTML PDF generation request...");
    let pdf = client.generate_pdf(&html_payload()).await?;

    write_output(&output, &pdf).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Finished! Saved to {}", output.display());
    Ok(())
}
