//! Resource Fetcher
//!
//! Fetches ARM and Graph collections, following `nextLink` until the
//! listing is exhausted. Server order is preserved.

use crate::arm::client::{ArmClient, RESOURCE_MANAGER_AUDIENCE};
use crate::error::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Result of paginated fetch
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub next_link: Option<String>,
}

/// Fetch all ARM resources from a collection URL (auto-paginate)
pub async fn fetch_all<T: DeserializeOwned>(client: &ArmClient, url: &str) -> Result<Vec<T>> {
    fetch_all_from(client, RESOURCE_MANAGER_AUDIENCE, url).await
}

/// Fetch all items from a collection URL using a token for `audience`
pub async fn fetch_all_from<T: DeserializeOwned>(
    client: &ArmClient,
    audience: &str,
    url: &str,
) -> Result<Vec<T>> {
    let mut all_items = Vec::new();
    let mut next = Some(url.to_string());
    let mut pages = 0usize;

    while let Some(page_url) = next {
        let page = fetch_page(client, audience, &page_url).await?;
        all_items.extend(page.items);
        pages += 1;
        next = page.next_link;
    }

    tracing::debug!("Fetched {} items in {} pages", all_items.len(), pages);
    Ok(all_items)
}

/// Fetch one page of a collection
pub async fn fetch_page<T: DeserializeOwned>(
    client: &ArmClient,
    audience: &str,
    url: &str,
) -> Result<PaginatedResult<T>> {
    let response = client
        .send_with_audience(audience, Method::GET, url, None)
        .await?
        .body;

    let items = extract_items(&response)?;

    let next_link = ["nextLink", "@odata.nextLink"]
        .iter()
        .find_map(|key| response.get(*key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(PaginatedResult { items, next_link })
}

/// Extract items from the `value` array of a list response
fn extract_items<T: DeserializeOwned>(response: &Value) -> Result<Vec<T>> {
    let Some(raw_items) = response.get("value").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    raw_items
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(Into::into))
        .collect()
}
