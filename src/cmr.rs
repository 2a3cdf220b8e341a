use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{GRANULE_UR_COLUMN, ONLINE_ACCESS_URLS_COLUMN, Settings};
use crate::error::HarvestError;
use crate::page::PageWalker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub short_name: String,
    pub version_id: String,
}

impl Collection {
    /// Human-readable composite key, used for output file naming.
    pub fn readable_id(&self) -> String {
        format!("{}.{}", self.short_name, self.version_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Granule {
    pub id: String,
    pub url: String,
}

pub trait CatalogClient: Send + Sync {
    fn list_collections(&self) -> Result<Vec<Collection>, HarvestError>;
    fn list_granules(&self, collection: &Collection) -> Result<Vec<Granule>, HarvestError>;
}

#[derive(Debug, Deserialize)]
struct CollectionEnvelope {
    feed: CollectionFeed,
}

#[derive(Debug, Deserialize)]
struct CollectionFeed {
    #[serde(default)]
    entry: Vec<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
struct CollectionEntry {
    id: String,
    short_name: String,
    version_id: String,
}

#[derive(Clone)]
pub struct CmrHttpClient {
    client: Client,
    settings: Settings,
}

impl CmrHttpClient {
    pub fn new(settings: Settings) -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("cmr-harvester/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HarvestError::CatalogHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|err| HarvestError::CatalogHttp(err.to_string()))?;
        Ok(Self { client, settings })
    }
}

impl CatalogClient for CmrHttpClient {
    fn list_collections(&self) -> Result<Vec<Collection>, HarvestError> {
        // Single non-paginated request: the page size is the hard ceiling on
        // how many collections one run can discover.
        // TODO: route this through PageWalker once the provider holds more
        // collections than one page.
        let response = self
            .client
            .get(self.settings.collections_url())
            .query(&[
                ("page_size", self.settings.page_size.to_string()),
                ("provider", self.settings.provider.clone()),
            ])
            .send()
            .map_err(|err| HarvestError::CatalogHttp(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "collection listing failed".to_string());
            return Err(HarvestError::CatalogStatus {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CollectionEnvelope = response
            .json()
            .map_err(|err| HarvestError::CollectionParse(err.to_string()))?;
        let collections: Vec<Collection> = envelope
            .feed
            .entry
            .into_iter()
            .map(|entry| Collection {
                id: entry.id,
                short_name: entry.short_name,
                version_id: entry.version_id,
            })
            .collect();

        info!(
            count = collections.len(),
            provider = %self.settings.provider,
            "discovered collections"
        );
        Ok(collections)
    }

    fn list_granules(&self, collection: &Collection) -> Result<Vec<Granule>, HarvestError> {
        let params = vec![
            ("page_size".to_string(), self.settings.page_size.to_string()),
            ("collection_concept_id".to_string(), collection.id.clone()),
        ];
        let walker = PageWalker::new(self.client.clone(), self.settings.granules_url(), params);

        let mut granules = Vec::new();
        for page in walker {
            granules.extend(parse_granule_page(&page?)?);
        }
        Ok(granules)
    }
}

/// Parses one CSV page of granule search results.
///
/// Rows without an access URL are dropped; the URL cell is carried as one
/// opaque string even when it may hold several URLs behind an unspecified
/// delimiter.
pub fn parse_granule_page(page: &str) -> Result<Vec<Granule>, HarvestError> {
    if page.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_reader(page.as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| HarvestError::GranulePage(err.to_string()))?
        .clone();
    let id_index = column_index(&headers, GRANULE_UR_COLUMN)?;
    let url_index = column_index(&headers, ONLINE_ACCESS_URLS_COLUMN)?;

    let mut granules = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| HarvestError::GranulePage(err.to_string()))?;
        let id = record.get(id_index).unwrap_or("");
        let url = record.get(url_index).unwrap_or("");
        if url.is_empty() {
            debug!(granule = id, "dropping granule without an access url");
            continue;
        }
        granules.push(Granule {
            id: id.to_string(),
            url: url.to_string(),
        });
    }
    Ok(granules)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, HarvestError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| HarvestError::GranulePage(format!("missing column: {name}")))
}
