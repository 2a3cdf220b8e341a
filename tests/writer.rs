use std::fs;

use camino::Utf8PathBuf;

use cmr_harvester::cmr::{CatalogClient, Collection, Granule};
use cmr_harvester::error::HarvestError;
use cmr_harvester::writer::CollectionWriter;

struct FixedGranules(Vec<Granule>);

impl CatalogClient for FixedGranules {
    fn list_collections(&self) -> Result<Vec<Collection>, HarvestError> {
        Ok(Vec::new())
    }

    fn list_granules(&self, _collection: &Collection) -> Result<Vec<Granule>, HarvestError> {
        Ok(self.0.clone())
    }
}

fn collection() -> Collection {
    Collection {
        id: "C1".to_string(),
        short_name: "FOO".to_string(),
        version_id: "1".to_string(),
    }
}

fn storage_dir(temp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("links")).unwrap()
}

#[test]
fn writes_link_file_named_by_readable_id() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = FixedGranules(vec![
        Granule {
            id: "G1".to_string(),
            url: "http://x/1".to_string(),
        },
        Granule {
            id: "G2".to_string(),
            url: "http://x/2".to_string(),
        },
    ]);
    let writer = CollectionWriter::new(&catalog, storage_dir(&temp));

    let path = writer.write(&collection()).unwrap().unwrap();
    assert!(path.ends_with("FOO.1.json"));

    let content = fs::read_to_string(path.as_std_path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            { "who": "FOO.1", "link": "http://x/1" },
            { "who": "FOO.1", "link": "http://x/2" }
        ])
    );
}

#[test]
fn zero_granules_produces_no_file() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = FixedGranules(Vec::new());
    let writer = CollectionWriter::new(&catalog, storage_dir(&temp));

    let path = writer.write(&collection()).unwrap();
    assert!(path.is_none());
    assert!(!storage_dir(&temp).as_std_path().exists());
}

#[test]
fn rewriting_unchanged_input_is_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = FixedGranules(vec![Granule {
        id: "G1".to_string(),
        url: "http://x/1".to_string(),
    }]);
    let writer = CollectionWriter::new(&catalog, storage_dir(&temp));

    let path = writer.write(&collection()).unwrap().unwrap();
    let first = fs::read(path.as_std_path()).unwrap();
    let path = writer.write(&collection()).unwrap().unwrap();
    let second = fs::read(path.as_std_path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn overwrites_stale_content_wholesale() {
    let temp = tempfile::tempdir().unwrap();
    let dir = storage_dir(&temp);
    fs::create_dir_all(dir.as_std_path()).unwrap();
    fs::write(dir.join("FOO.1.json").as_std_path(), b"stale").unwrap();

    let catalog = FixedGranules(vec![Granule {
        id: "G1".to_string(),
        url: "http://x/1".to_string(),
    }]);
    let writer = CollectionWriter::new(&catalog, dir.clone());
    writer.write(&collection()).unwrap();

    let content = fs::read_to_string(dir.join("FOO.1.json").as_std_path()).unwrap();
    assert!(content.contains("http://x/1"));
    assert!(!content.contains("stale"));
}
