//! E-sign ("Etch") packet payloads.
//!
//! A packet bundles the documents to sign, the signers, and fill data for each
//! document. Signers sign in the order they were added, and each signer
//! clicks through their fields in the order the fields were added.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::AnvilError;
use crate::payload::FillPdfPayload;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEtchPacket {
    /// `false` sends the packet to the first signer right away.
    pub is_draft: bool,
    /// Test packets use development signatures and are not billed.
    pub is_test: bool,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_email_body: Option<String>,
    #[serde(rename = "mergePDFs", skip_serializing_if = "Option::is_none")]
    pub merge_pdfs: Option<bool>,
    pub files: Vec<EtchFile>,
    pub signers: Vec<EtchSigner>,
    #[serde(skip_serializing_if = "PacketData::is_empty")]
    pub data: PacketData,
}

/// Fill data keyed by the `id` of a file in the packet.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PacketData {
    pub payloads: BTreeMap<String, FillPdfPayload>,
}

impl PacketData {
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl CreateEtchPacket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            is_draft: false,
            is_test: true,
            name: name.into(),
            signature_email_subject: None,
            signature_email_body: None,
            merge_pdfs: None,
            files: Vec::new(),
            signers: Vec::new(),
            data: PacketData::default(),
        }
    }

    pub fn draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    pub fn test(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    pub fn email(mut self, subject: impl Into<String>, body: impl Into<String>) -> Self {
        self.signature_email_subject = Some(subject.into());
        self.signature_email_body = Some(body.into());
        self
    }

    pub fn merge_pdfs(mut self, merge: bool) -> Self {
        self.merge_pdfs = Some(merge);
        self
    }

    pub fn add_file(&mut self, file: impl Into<EtchFile>) -> &mut Self {
        self.files.push(file.into());
        self
    }

    pub fn add_signer(&mut self, signer: EtchSigner) -> &mut Self {
        self.signers.push(signer);
        self
    }

    /// Replaces any payload already registered for `file_id`.
    pub fn add_file_payload(&mut self, file_id: impl Into<String>, payload: FillPdfPayload) -> &mut Self {
        self.data.payloads.insert(file_id.into(), payload);
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum EtchFile {
    Upload(DocumentUpload),
    Template(EtchCastRef),
}

impl From<DocumentUpload> for EtchFile {
    fn from(upload: DocumentUpload) -> Self {
        EtchFile::Upload(upload)
    }
}

impl From<EtchCastRef> for EtchFile {
    fn from(cast_ref: EtchCastRef) -> Self {
        EtchFile::Template(cast_ref)
    }
}

/// An existing PDF template on the server, referenced by its eid.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EtchCastRef {
    /// Packet-local id; any string.
    pub id: String,
    pub cast_eid: String,
}

impl EtchCastRef {
    pub fn new(id: impl Into<String>, cast_eid: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cast_eid: cast_eid.into(),
        }
    }
}

/// A PDF uploaded with the packet along with the fields to place on it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub id: String,
    pub title: String,
    pub file: Base64Upload,
    pub fields: Vec<SignatureField>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Base64Upload {
    pub data: String,
    pub filename: String,
    pub mimetype: String,
}

impl Base64Upload {
    pub fn from_bytes(bytes: &[u8], filename: impl Into<String>) -> Self {
        Self {
            data: BASE64.encode(bytes),
            filename: filename.into(),
            mimetype: "application/pdf".to_string(),
        }
    }

    pub fn from_path(path: &Path, filename: impl Into<String>) -> Result<Self, AnvilError> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(AnvilError::EmptyFile(path.display().to_string()));
        }
        Ok(Self::from_bytes(&bytes, filename))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureField {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Zero-based.
    pub page_num: u32,
    pub rect: Rect,
}

impl SignatureField {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, page_num: u32, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            page_num,
            rect,
        }
    }
}

/// PDF points from the top-left corner of the page.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EtchSigner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub signer_type: String,
    pub fields: Vec<SignerField>,
}

impl EtchSigner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            signer_type: "email".to_string(),
            fields: Vec::new(),
        }
    }

    /// Appends a field to this signer's click-through order.
    pub fn add_field(mut self, file_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        self.fields.push(SignerField {
            file_id: file_id.into(),
            field_id: field_id.into(),
        });
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignerField {
    pub file_id: String,
    pub field_id: String,
}
