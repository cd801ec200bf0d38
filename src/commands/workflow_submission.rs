//! Starts a workflow ("weld") by submitting data to its first webform
//! ("forge"), then updates the new submission with more data.
//!
//! Relies on the sample workflow every organization gets on sign-up and its
//! field aliases (`shortText`, `name`, `email`).

use anyhow::{Context, bail};
use clap::Args;
use serde_json::{Value, json};

use crate::AnvilClient;
use crate::graphql::{FORGE_SUBMIT_RESPONSE_QUERY, GraphqlResponse, WELD_BY_SLUG_QUERY, forge_submit_mutation};

pub const WELD_SLUG: &str = "sample-workflow";

#[derive(Debug, Args)]
pub struct WorkflowSubmissionArgs {
    /// Organization slug, as in app.useanvil.com/org/<slug>
    pub org_slug: Option<String>,

    /// Workflow to start
    #[arg(long, default_value = WELD_SLUG)]
    pub weld_slug: String,
}

/// Fetches the workflow and its webforms. Fails on GraphQL errors or a
/// workflow without webforms.
pub async fn get_weld(client: &AnvilClient, weld_slug: &str, org_slug: &str) -> anyhow::Result<Value> {
    let variables = json!({ "slug": weld_slug, "organizationSlug": org_slug });
    let response = client.query(WELD_BY_SLUG_QUERY, Some(variables)).await?;

    if let Some(errors) = response.errors() {
        bail!("GraphQL Error: {}", errors);
    }

    let weld = response.operation("weld")?.clone();
    let has_forges = weld
        .get("forges")
        .and_then(Value::as_array)
        .is_some_and(|forges| !forges.is_empty());
    if !has_forges {
        bail!("Weld {}/{} has no webforms!", org_slug, weld_slug);
    }

    Ok(weld)
}

/// Runs `forgeSubmit`. Without `weldDataEid`/`submissionEid` this creates a
/// new submission; with them it updates that submission.
pub async fn submit_to_workflow_webform(client: &AnvilClient, variables: Value) -> anyhow::Result<GraphqlResponse> {
    let mutation = forge_submit_mutation(FORGE_SUBMIT_RESPONSE_QUERY);
    Ok(client.query(&mutation, Some(variables)).await?)
}

pub fn build_workflow_submission_details_url(org_slug: &str, weld_slug: &str, weld_data_eid: &str) -> String {
    format!("https://app.useanvil.com/org/{org_slug}/w/{weld_slug}/{weld_data_eid}")
}

fn eid_of<'a>(value: &'a Value, pointer: &str) -> anyhow::Result<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .with_context(|| format!("forgeSubmit response has no `{pointer}`"))
}

pub async fn execute(client: &AnvilClient, args: WorkflowSubmissionArgs) -> anyhow::Result<()> {
    let Some(org_slug) = super::require_arg(
        args.org_slug.as_deref(),
        "Enter your organization's slug as a command-line argument.",
        "create-update-workflow-submission my-org",
    ) else {
        return Ok(());
    };
    let weld_slug = args.weld_slug.as_str();

    let creation_payload = json!({
        "shortText": format!("Workflow start! {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f")),
    });
    let update_payload = json!({
        "name": { "firstName": "Sally", "lastName": "Jones" },
        "email": "sally@example.com",
    });

    println!(">>> Fetching Weld {}/{}", org_slug, weld_slug);
    let weld = get_weld(client, weld_slug, org_slug).await?;

    let start_forge = &weld["forges"][0];
    let forge_eid = start_forge
        .get("eid")
        .and_then(Value::as_str)
        .context("First webform has no eid")?;
    println!(">>> Starting workflow with webform {}", start_forge);

    let response = submit_to_workflow_webform(
        client,
        json!({
            "isTest": true,
            "forgeEid": forge_eid,
            "payload": creation_payload,
        }),
    )
    .await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    let submission = response.operation("forgeSubmit")?;
    let submission_eid = eid_of(submission, "/eid")?;
    let weld_data_eid = eid_of(submission, "/weldData/eid")?;

    println!("Workflow started");
    println!(
        "View on your dashboard: {}",
        build_workflow_submission_details_url(org_slug, weld_slug, weld_data_eid)
    );
    println!("Submission eid: {}, WeldData eid {}", submission_eid, weld_data_eid);
    println!("{}", submission);

    println!(">>> Updating the submission...");
    let response = submit_to_workflow_webform(
        client,
        json!({
            "forgeEid": forge_eid,
            "weldDataEid": weld_data_eid,
            "submissionEid": submission_eid,
            "payload": update_payload,
        }),
    )
    .await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(());
    }

    println!("Submission updated!");
    println!("{}", response.operation("forgeSubmit")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_url_points_at_weld_data() {
        assert_eq!(
            build_workflow_submission_details_url("my-org", "sample-workflow", "wd123"),
            "https://app.useanvil.com/org/my-org/w/sample-workflow/wd123"
        );
    }

    #[test]
    fn eid_lookup_reports_missing_path() {
        let submission = json!({ "eid": "s1", "weldData": {} });
        assert_eq!(eid_of(&submission, "/eid").unwrap(), "s1");
        let err = eid_of(&submission, "/weldData/eid").unwrap_err();
        assert!(err.to_string().contains("/weldData/eid"));
    }
}
