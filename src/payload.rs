use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a `fill/{template}.pdf` request.
///
/// Keys in `data` must match the field ids on the PDF template and are sent
/// verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FillPdfPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    pub data: Map<String, Value>,
}

impl FillPdfPayload {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn text_color(mut self, text_color: impl Into<String>) -> Self {
        self.text_color = Some(text_color.into());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerateKind {
    Html,
    Markdown,
}

/// Body of a `generate-pdf` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratePdfPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Absent means markdown on the server side.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<GenerateKind>,
    pub data: GenerateData,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum GenerateData {
    Html(HtmlContent),
    Markdown(Vec<MarkdownBlock>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HtmlContent {
    pub html: String,
    pub css: String,
}

/// One block of a markdown document: a labeled value, free markdown text, a
/// heading or a table. Unset parts are omitted from the request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MarkdownBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<MarkdownTable>,
}

impl MarkdownBlock {
    pub fn labeled(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn heading(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            ..Self::default()
        }
    }

    pub fn table(table: MarkdownTable) -> Self {
        Self {
            table: Some(table),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownTable {
    pub first_row_headers: bool,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_options: Option<Vec<ColumnOptions>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ColumnOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl GeneratePdfPayload {
    pub fn html(title: impl Into<String>, html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            kind: Some(GenerateKind::Html),
            data: GenerateData::Html(HtmlContent {
                html: html.into(),
                css: css.into(),
            }),
        }
    }

    pub fn markdown(title: impl Into<String>, blocks: Vec<MarkdownBlock>) -> Self {
        Self {
            title: Some(title.into()),
            kind: None,
            data: GenerateData::Markdown(blocks),
        }
    }
}

/// Variables of the `generateEmbedURL` mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbedUrlRequest {
    pub eid: String,
    /// `edit-workflow`, `edit-pdf-template`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_for_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Variables of the `createCast` mutation, minus the uploaded file.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCastRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect_fields: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_alias_ids: Option<Vec<String>>,
}
