//! Release check against the project's GitHub "latest release" redirect.
//!
//! GitHub answers `/releases/latest` with a redirect to `/releases/tag/<tag>`;
//! the version is read from that final URL, no API token or JSON involved.

use semver::Version;
use thiserror::Error;
use tokio::sync::oneshot;

pub const LATEST_RELEASE_URL: &str = "https://github.com/oop7/Android-debloater/releases/latest";
pub const RELEASES_PAGE_URL: &str = "https://github.com/oop7/Android-debloater/releases";

/// Errors that can occur while checking for a newer release.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status code: {0}")]
    Status(u16),

    #[error("Could not determine latest version")]
    UnrecognizedUrl(String),
}

/// Terminal result of one update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Found(String),
    NotFound(String),
    Error(String),
}

/// Extracts the version token from a `.../releases/tag/<tag>` URL, minus a leading `v`.
pub fn version_from_release_url(url: &str) -> Result<String, UpdateError> {
    if !url.contains("releases/tag") {
        return Err(UpdateError::UnrecognizedUrl(url.to_string()));
    }
    let parsed =
        reqwest::Url::parse(url).map_err(|_| UpdateError::UnrecognizedUrl(url.to_string()))?;
    let tag = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| UpdateError::UnrecognizedUrl(url.to_string()))?;
    Ok(tag.strip_prefix('v').unwrap_or(tag).to_string())
}

/// True when `latest` is strictly newer than `current`.
///
/// Both sides are compared as semantic versions when they parse, so "10.0.0"
/// beats "9.0.0". Anything else falls back to plain string ordering.
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (Version::parse(latest), Version::parse(current)) {
        (Ok(latest), Ok(current)) => latest > current,
        _ => latest > current,
    }
}

/// Turns the final (post-redirect) URL into a status for `current`.
pub fn evaluate_release_url(final_url: &str, current: &str) -> UpdateStatus {
    match version_from_release_url(final_url) {
        Ok(latest) if is_newer(&latest, current) => UpdateStatus::Found(latest),
        Ok(_) => UpdateStatus::NotFound("You are using the latest version".to_string()),
        Err(e) => UpdateStatus::Error(e.to_string()),
    }
}

pub struct UpdateChecker {
    client: reqwest::Client,
    url: String,
    current_version: String,
}

impl UpdateChecker {
    pub fn new(current_version: impl Into<String>) -> Result<Self, UpdateError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("android-debloater/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: LATEST_RELEASE_URL.to_string(),
            current_version: current_version.into(),
        })
    }

    /// Replaces the HTTP client, e.g. one with proxies disabled.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Points the checker at a different "latest release" URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// One GET, redirects followed; returns where it ended up.
    pub async fn resolve_latest_url(&self) -> Result<String, UpdateError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(UpdateError::Status(status.as_u16()));
        }
        Ok(response.url().to_string())
    }

    pub async fn check(&self) -> UpdateStatus {
        let status = match self.resolve_latest_url().await {
            Ok(final_url) => {
                log::debug!("Latest release resolved to {final_url}");
                evaluate_release_url(&final_url, &self.current_version)
            }
            Err(e) => UpdateStatus::Error(e.to_string()),
        };
        match &status {
            UpdateStatus::Found(v) => log::info!("New version {v} available"),
            UpdateStatus::NotFound(msg) => log::info!("Update check: {msg}"),
            UpdateStatus::Error(msg) => log::warn!("Update check failed: {msg}"),
        }
        status
    }
}

/// Runs one check on its own task; the receiver yields exactly one status.
pub fn spawn_update_check(current_version: String) -> oneshot::Receiver<UpdateStatus> {
    match UpdateChecker::new(current_version) {
        Ok(checker) => spawn_check(checker),
        Err(e) => {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(UpdateStatus::Error(e.to_string()));
            rx
        }
    }
}

pub fn spawn_check(checker: UpdateChecker) -> oneshot::Receiver<UpdateStatus> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let status = checker.check().await;
        // receiver gone means the window closed; nothing to report to
        let _ = tx.send(status);
    });
    rx
}
