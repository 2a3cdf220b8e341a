use std::fs;

use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::info;

use crate::cmr::{CatalogClient, Collection, Granule};
use crate::error::HarvestError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub who: String,
    pub link: String,
}

pub struct CollectionWriter<'a, C: CatalogClient> {
    catalog: &'a C,
    storage_dir: Utf8PathBuf,
}

impl<'a, C: CatalogClient> CollectionWriter<'a, C> {
    pub fn new(catalog: &'a C, storage_dir: Utf8PathBuf) -> Self {
        Self {
            catalog,
            storage_dir,
        }
    }

    /// Drains the granule search for one collection and persists the link
    /// list as `<storage_dir>/<short_name>.<version_id>.json`. A collection
    /// with no surviving granules produces no file.
    pub fn write(&self, collection: &Collection) -> Result<Option<Utf8PathBuf>, HarvestError> {
        let readable = collection.readable_id();
        let granules = self.catalog.list_granules(collection)?;
        if granules.is_empty() {
            info!(collection = %readable, "no granules with access urls, skipping");
            return Ok(None);
        }

        let records = link_records(collection, &granules);
        fs::create_dir_all(self.storage_dir.as_std_path())
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        let path = self.storage_dir.join(format!("{readable}.json"));
        let content = serde_json::to_vec_pretty(&records)
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        fs::write(path.as_std_path(), &content)
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;

        info!(collection = %readable, links = records.len(), path = %path, "wrote link file");
        Ok(Some(path))
    }
}

pub fn link_records(collection: &Collection, granules: &[Granule]) -> Vec<LinkRecord> {
    let readable = collection.readable_id();
    granules
        .iter()
        .map(|granule| LinkRecord {
            who: readable.clone(),
            link: granule.url.clone(),
        })
        .collect()
}
