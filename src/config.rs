use std::time::Duration;

use camino::Utf8PathBuf;

pub const CMR_BASE_URL: &str = "https://cmr.earthdata.nasa.gov/search";
pub const CMR_PAGE_SIZE: u32 = 2000;
pub const CMR_PROVIDER_ID: &str = "NSIDC_ECS";

pub const CMR_SEARCH_AFTER_HEADER: &str = "CMR-Search-After";
pub const CMR_HITS_HEADER: &str = "CMR-Hits";

pub const GRANULE_UR_COLUMN: &str = "Granule UR";
pub const ONLINE_ACCESS_URLS_COLUMN: &str = "Online Access URLs";

pub const STORAGE_DIR: &str = "/tmp/cryo-data-ingest";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub page_size: u32,
    pub provider: String,
    pub storage_dir: Utf8PathBuf,
    pub timeout: Duration,
}

impl Settings {
    pub fn collections_url(&self) -> String {
        format!("{}/collections.json", self.base_url)
    }

    pub fn granules_url(&self) -> String {
        format!("{}/granules.csv", self.base_url)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: CMR_BASE_URL.to_string(),
            page_size: CMR_PAGE_SIZE,
            provider: CMR_PROVIDER_ID.to_string(),
            storage_dir: Utf8PathBuf::from(STORAGE_DIR),
            timeout: REQUEST_TIMEOUT,
        }
    }
}
