use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use serde::Deserialize;
use tracing::debug;

use crate::config::RemoteSettings;
use crate::error::ListingError;

use super::model::{DirectoryListing, EntryKind};
use super::source::ListingSource;

/// Wire shape of one item returned by `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl From<ContentItem> for DirectoryListing {
    fn from(item: ContentItem) -> Self {
        let kind = match item.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Directory,
            _ => EntryKind::Other,
        };
        let fetch_locator = match kind {
            EntryKind::File => item.download_url,
            _ => None,
        };
        Self {
            kind,
            name: item.name,
            path: item.path,
            fetch_locator,
        }
    }
}

/// Lists a GitHub repository through the contents API.
#[derive(Debug)]
pub struct GithubContents {
    client: reqwest::Client,
    api_base: Url,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubContents {
    pub fn new(settings: &RemoteSettings) -> Result<Self, ListingError> {
        let api_base = Url::parse(settings.api_base.trim())
            .map_err(|e| ListingError::InvalidUrl(format!("{}: {e}", settings.api_base)))?;
        if api_base.cannot_be_a_base() {
            return Err(ListingError::InvalidUrl(settings.api_base.clone()));
        }

        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        // No timeout unless configured: a hung request hangs the walk.
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ListingError::Client)?;

        Ok(Self {
            client,
            api_base,
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            token: settings.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// `owner/repo`.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Build the contents URL for `path`, percent-encoding each segment.
    pub(crate) fn contents_url(&self, path: &str) -> Result<Url, ListingError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ListingError::InvalidUrl(self.api_base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    async fn fetch_page(
        &self,
        path: &str,
        url: Url,
    ) -> Result<(Vec<ContentItem>, Option<Url>), ListingError> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|source| ListingError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_link)
            .and_then(|link| Url::parse(&link).ok());

        let body = response.text().await.map_err(|source| ListingError::Transport {
            path: path.to_string(),
            source,
        })?;

        let items = parse_listing(path, &body)?;
        Ok((items, next))
    }
}

impl ListingSource for GithubContents {
    async fn list(&self, path: &str) -> Result<Vec<DirectoryListing>, ListingError> {
        let mut url = Some(self.contents_url(path)?);
        let mut entries = Vec::new();

        while let Some(page) = url.take() {
            debug!(%page, "fetching listing");
            let (items, next) = self.fetch_page(path, page).await?;
            entries.extend(items.into_iter().map(DirectoryListing::from));
            url = next;
        }

        Ok(entries)
    }
}

/// Decode a contents response. A single JSON object means `path` is a file.
pub(crate) fn parse_listing(path: &str, body: &str) -> Result<Vec<ContentItem>, ListingError> {
    match serde_json::from_str::<Vec<ContentItem>>(body) {
        Ok(items) => Ok(items),
        Err(e) => {
            let message = if body.trim_start().starts_with('{') {
                "expected a directory, got a single object".to_string()
            } else {
                e.to_string()
            };
            Err(ListingError::Decode {
                path: path.to_string(),
                message,
            })
        }
    }
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub(crate) fn next_page_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| {
            let p = p.trim();
            p == r#"rel="next""# || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
