// Shared reqwest plumbing for the upstream feeds
use crate::application::feeds::FetchError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("pws-dashboard/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).user_agent(USER_AGENT).build()
}

/// Plain GET + JSON parse. Any non-2xx status is a failure.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
