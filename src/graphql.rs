//! GraphQL documents sent to the `/graphql` endpoint and the response envelope
//! they come back in.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AnvilError;

/// `{ "data": ..., "errors": [...] }` as returned by the GraphQL endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl GraphqlResponse {
    /// The `errors` member, if present and non-empty.
    pub fn errors(&self) -> Option<&Value> {
        match &self.errors {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(errors) => Some(errors),
        }
    }

    /// `data.<operation>`, e.g. `data.createEtchPacket`.
    pub fn operation(&self, name: &str) -> Result<&Value, AnvilError> {
        self.data
            .as_ref()
            .and_then(|data| data.get(name))
            .filter(|value| !value.is_null())
            .ok_or_else(|| AnvilError::MissingField(format!("data.{name}")))
    }
}

/// A file sent next to a GraphQL operation as a multipart part. The variable
/// it binds to goes out as `null` and is filled in by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlUpload {
    pub data: Vec<u8>,
    pub filename: String,
    pub mimetype: String,
}

impl GraphqlUpload {
    pub fn new(data: Vec<u8>, filename: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            data,
            filename: filename.into(),
            mimetype: mimetype.into(),
        }
    }

    pub fn pdf_from_path(path: &Path, filename: impl Into<String>) -> Result<Self, AnvilError> {
        let data = fs::read(path)?;
        if data.is_empty() {
            return Err(AnvilError::EmptyFile(path.display().to_string()));
        }
        Ok(Self::new(data, filename, "application/pdf"))
    }
}

pub const CURRENT_USER_QUERY: &str = r#"
    query CurrentUser {
      currentUser {
        eid
        name
        organizations {
          eid
          slug
          name
          casts {
            eid
            name
          }
          welds {
            eid
            name
          }
        }
      }
    }
"#;

pub const WELD_QUERY: &str = r#"
    query WeldQuery (
      $eid: String,
    ) {
      weld (
        eid: $eid,
      ) {
        eid
        name
        forges {
          eid
          slug
          name
        }
      }
    }
"#;

pub const WELD_BY_SLUG_QUERY: &str = r#"
    query WeldQuery (
      $eid: String,
      $organizationSlug: String,
      $slug: String
    ) {
      weld (
        eid: $eid,
        organizationSlug: $organizationSlug,
        slug: $slug
      ) {
        eid
        name
        forges {
          eid
          slug
          name
        }
      }
    }
"#;

pub const FORGE_SUBMIT_RESPONSE_QUERY: &str = r#"
{
  id
  eid
  payloadValue
  currentStep
  completedAt
  createdAt
  updatedAt
  signer {
    name
    email
    status
    routingOrder
  }
  weldData {
    id
    eid
    isTest
    isComplete
    agents
  }
}
"#;

/// `forgeSubmit` with the given selection set appended to the operation.
pub fn forge_submit_mutation(response_query: &str) -> String {
    format!(
        r#"
    mutation ForgeSubmit(
        $forgeEid: String!,
        $weldDataEid: String,
        $submissionEid: String,
        $payload: JSON!,
        $currentStep: Int,
        $complete: Boolean,
        $isTest: Boolean,
        $timezone: String,
        $groupArrayId: String,
        $groupArrayIndex: Int,
        $errorType: String,
        $webhookURL: String,
    ) {{
        forgeSubmit (
            forgeEid: $forgeEid,
            weldDataEid: $weldDataEid,
            submissionEid: $submissionEid,
            payload: $payload,
            currentStep: $currentStep,
            complete: $complete,
            isTest: $isTest,
            timezone: $timezone,
            groupArrayId: $groupArrayId,
            groupArrayIndex: $groupArrayIndex,
            errorType: $errorType,
            webhookURL: $webhookURL
        ) {response_query}
    }}
"#
    )
}

pub const CREATE_ETCH_PACKET_MUTATION: &str = r#"
    mutation CreateEtchPacket (
      $name: String,
      $files: [EtchFile!],
      $isDraft: Boolean,
      $isTest: Boolean,
      $mergePDFs: Boolean,
      $signatureEmailSubject: String,
      $signatureEmailBody: String,
      $signers: [JSON!],
      $data: JSON
    ) {
      createEtchPacket (
        name: $name,
        files: $files,
        isDraft: $isDraft,
        isTest: $isTest,
        mergePDFs: $mergePDFs,
        signatureEmailSubject: $signatureEmailSubject,
        signatureEmailBody: $signatureEmailBody,
        signers: $signers,
        data: $data
      ) {
        eid
        name
        detailsURL
        documentGroup {
          eid
          status
          files
          signers {
            eid
            aliasId
            routingOrder
            name
            email
            status
            signActionType
          }
        }
      }
    }
"#;

pub const GENERATE_EMBED_URL_MUTATION: &str = r#"
    mutation GenerateEmbedURL(
      $eid: String!,
      $type: String!,
      $validForSeconds: Int,
      $metadata: JSON,
      $options: JSON,
    ) {
      generateEmbedURL(
        eid: $eid
        type: $type
        validForSeconds: $validForSeconds
        metadata: $metadata
        options: $options
      ) {
        url,
        requestTokenEid
      }
    }
"#;

pub const CREATE_CAST_MUTATION: &str = r#"
    mutation CreateCast(
      $title: String,
      $file: Upload!,
      $isTemplate: Boolean,
      $detectFields: Boolean,
      $allowedAliasIds: [String],
    ) {
      createCast (
        title: $title,
        file: $file,
        isTemplate: $isTemplate,
        allowedAliasIds: $allowedAliasIds,
        detectFields: $detectFields,
      ) {
        eid
        name
        title
        isTemplate
      }
    }
"#;
