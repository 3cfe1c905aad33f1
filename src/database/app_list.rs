use serde::{Deserialize, Serialize};

use crate::library::GameId;

/// Endpoint serving the full app list as JSON.
pub const APP_LIST_URL: &str =
    "https://api.steampowered.com/ISteamApps/GetAppList/v2/?format=json";

/// One row of the remote app list: id and display name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListEntry {
    pub appid: GameId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct AppListPayload {
    applist: AppListApps,
}

#[derive(Debug, Deserialize)]
struct AppListApps {
    apps: Vec<AppListEntry>,
}

/// Parse a `GetAppList` response body into its entries.
pub fn parse_app_list(body: &str) -> Result<Vec<AppListEntry>, serde_json::Error> {
    let payload: AppListPayload = serde_json::from_str(body)?;
    Ok(payload.applist.apps)
}

#[cfg(feature = "fetch")]
#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Parse(serde_json::Error),
}

#[cfg(feature = "fetch")]
impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "app list request failed: {}", err),
            FetchError::Parse(err) => write!(f, "app list payload malformed: {}", err),
        }
    }
}

#[cfg(feature = "fetch")]
impl std::error::Error for FetchError {}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

#[cfg(feature = "fetch")]
impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err)
    }
}

/// Download and parse the app list from the given endpoint.
#[cfg(feature = "fetch")]
pub async fn fetch_app_list(url: &str) -> Result<Vec<AppListEntry>, FetchError> {
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    let entries = parse_app_list(&body)?;
    log::debug!("fetched app list: {} entries", entries.len());
    Ok(entries)
}
