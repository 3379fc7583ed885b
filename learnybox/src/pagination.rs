//! Cached scan of paginated list routes.
//!
//! Every non-empty page fetched from a list route is appended to a per-route cache entry. A
//! later scan replays the cached pages instead of requesting them again, except the most
//! recently cached one which may have grown since and is always fetched anew. The scan ends on
//! the first page with no entries.

use std::time::Duration;

use futures::{stream, Stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    client::{Client, Envelope},
    error::Error,
};

/// Number of entries requested per page.
pub const PAGE_SIZE: usize = 500;

/// How long fetched pages stay cached.
pub const PAGE_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

const PAGE_CACHE_PREFIX: &str = "learnyboxmap_api_pages:";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CachedPage {
    pub offset: usize,
    pub data: Vec<Value>,
}

pub(crate) fn cache_key(route: &str) -> String {
    format!("{PAGE_CACHE_PREFIX}{route}")
}

struct PageScan {
    client: Client,
    route: String,
    cache_key: String,
    pages: Vec<CachedPage>,
    replayed: usize,
    replayable: usize,
    offset: usize,
}

impl PageScan {
    async fn start(client: Client, route: String) -> Result<Self, Error> {
        let cache_key = cache_key(&route);

        let mut pages: Vec<CachedPage> = match client.store().get(&cache_key).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(route = %route, "Discarding unreadable cached pages: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        // The newest cached page may be incomplete, fetch it again.
        pages.pop();

        tracing::debug!(
            route = %route,
            cached_pages = pages.len(),
            "Starting LearnyBox list scan"
        );

        Ok(Self {
            client,
            route,
            cache_key,
            replayable: pages.len(),
            pages,
            replayed: 0,
            offset: 0,
        })
    }

    async fn next_page(&mut self) -> Result<Option<Vec<Value>>, Error> {
        if self.replayed < self.replayable {
            let page = self.pages[self.replayed].data.clone();
            self.replayed += 1;
            self.offset += PAGE_SIZE;

            return Ok(Some(page));
        }

        let query = [
            ("limit", PAGE_SIZE.to_string()),
            ("offset", self.offset.to_string()),
        ];
        let page: Envelope<Vec<Value>> = self.client.get(&self.route, &query).await?;

        if page.data.is_empty() {
            return Ok(None);
        }

        self.pages.push(CachedPage {
            offset: self.offset,
            data: page.data.clone(),
        });
        self.offset += PAGE_SIZE;

        self.client
            .store()
            .set(
                &self.cache_key,
                serde_json::to_string(&self.pages)?,
                PAGE_CACHE_TTL,
            )
            .await?;

        Ok(Some(page.data))
    }
}

enum ScanState {
    Pending { client: Client, route: String },
    Running(PageScan),
}

/// Lazily scans every page of `route`, yielding the raw entries of each page in order.
pub(crate) fn scan_pages(
    client: Client,
    route: String,
) -> impl Stream<Item = Result<Vec<Value>, Error>> + Send + 'static {
    stream::try_unfold(
        ScanState::Pending { client, route },
        |state| async move {
            let mut scan = match state {
                ScanState::Pending { client, route } => PageScan::start(client, route).await?,
                ScanState::Running(scan) => scan,
            };

            let page = scan.next_page().await?;

            Ok::<_, Error>(page.map(|page| (page, ScanState::Running(scan))))
        },
    )
}
