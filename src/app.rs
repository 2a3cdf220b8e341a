use tracing::info;

use crate::cmr::CatalogClient;
use crate::config::Settings;
use crate::error::HarvestError;
use crate::writer::CollectionWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub collections: usize,
    pub files_written: usize,
}

pub struct Harvester<C: CatalogClient> {
    catalog: C,
    settings: Settings,
}

impl<C: CatalogClient> Harvester<C> {
    pub fn new(catalog: C, settings: Settings) -> Self {
        Self { catalog, settings }
    }

    /// Runs one full ingest: enumerate collections, then write the link file
    /// for each collection in turn. The first fatal error halts the run.
    pub fn run(&self) -> Result<RunSummary, HarvestError> {
        let collections = self.catalog.list_collections()?;
        let writer = CollectionWriter::new(&self.catalog, self.settings.storage_dir.clone());

        let mut summary = RunSummary {
            collections: collections.len(),
            files_written: 0,
        };
        for collection in &collections {
            if writer.write(collection)?.is_some() {
                summary.files_written += 1;
            }
        }

        info!(
            collections = summary.collections,
            files = summary.files_written,
            "harvest complete"
        );
        Ok(summary)
    }
}
