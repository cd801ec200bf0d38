use anyhow::Context;
use serde_json::{Value, json};

use crate::AnvilClient;
use crate::graphql::{CURRENT_USER_QUERY, WELD_QUERY};

/// The user attached to the API key, with organizations, templates and workflows.
pub async fn call_current_user_query(client: &AnvilClient) -> anyhow::Result<Option<Value>> {
    let response = client.query(CURRENT_USER_QUERY, None).await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(None);
    }
    Ok(Some(response.operation("currentUser")?.clone()))
}

pub async fn call_weld_query(client: &AnvilClient, weld_eid: &str) -> anyhow::Result<Option<Value>> {
    let response = client.query(WELD_QUERY, Some(json!({ "eid": weld_eid }))).await?;
    if let Some(errors) = response.errors() {
        println!("There were errors!");
        println!("{}", serde_json::to_string_pretty(errors)?);
        return Ok(None);
    }
    Ok(Some(response.operation("weld")?.clone()))
}

pub async fn execute(client: &AnvilClient) -> anyhow::Result<()> {
    let Some(current_user) = call_current_user_query(client).await? else {
        return Ok(());
    };

    let first_weld_eid = current_user
        .pointer("/organizations/0/welds/0/eid")
        .and_then(Value::as_str)
        .context("The current user has no workflows in their first organization")?;

    let Some(weld) = call_weld_query(client, first_weld_eid).await? else {
        return Ok(());
    };

    println!("currentUser: {}", current_user);
    println!("First weld details: {}", weld);
    Ok(())
}
