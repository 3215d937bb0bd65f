//! Verdict storage keyed by dna fingerprint.
//!
//! The [`VerdictStore`] trait decouples the service from the persistence
//! backend. [`JsonFileStore`] keeps every record in one JSON document on disk;
//! [`MemoryStore`] backs tests and `--no-store` runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::fingerprint::Fingerprint;
use crate::core::types::{Verdict, VerdictCounts};
use crate::io::config::{StoreConfig, StoreKind};
use crate::io::write_atomic;

/// Abstraction over verdict persistence backends.
pub trait VerdictStore: Send + Sync {
    /// Stored verdict for `fingerprint`, if any.
    fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Verdict>>;

    /// Record a verdict. The first record for a fingerprint wins; later calls
    /// for the same fingerprint are no-ops.
    fn record(&self, fingerprint: &Fingerprint, verdict: Verdict) -> Result<()>;

    /// Count of distinct fingerprints per verdict.
    fn counts(&self) -> Result<VerdictCounts>;
}

/// One analyzed sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaRecord {
    pub mutant: bool,
    /// RFC 3339 timestamp of the first analysis.
    pub created_at: String,
}

impl DnaRecord {
    fn new(verdict: Verdict) -> Self {
        Self {
            mutant: verdict.is_mutant(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from(self.mutant)
    }
}

/// On-disk layout of [`JsonFileStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoreDocument {
    records: BTreeMap<Fingerprint, DnaRecord>,
}

impl StoreDocument {
    fn lookup(&self, fingerprint: &Fingerprint) -> Option<Verdict> {
        self.records.get(fingerprint).map(DnaRecord::verdict)
    }

    /// Insert unless present. Returns true if a new record was added.
    fn insert(&mut self, fingerprint: &Fingerprint, verdict: Verdict) -> bool {
        if self.records.contains_key(fingerprint) {
            return false;
        }
        self.records
            .insert(fingerprint.clone(), DnaRecord::new(verdict));
        true
    }

    fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for record in self.records.values() {
            counts.add(record.verdict());
        }
        counts
    }
}

fn lock(document: &Mutex<StoreDocument>) -> Result<MutexGuard<'_, StoreDocument>> {
    document
        .lock()
        .map_err(|_| anyhow!("verdict store lock poisoned"))
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerdictStore for MemoryStore {
    fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Verdict>> {
        Ok(lock(&self.document)?.lookup(fingerprint))
    }

    fn record(&self, fingerprint: &Fingerprint, verdict: Verdict) -> Result<()> {
        lock(&self.document)?.insert(fingerprint, verdict);
        Ok(())
    }

    fn counts(&self) -> Result<VerdictCounts> {
        Ok(lock(&self.document)?.counts())
    }
}

/// Store persisted as a single JSON document, rewritten atomically on each
/// new record.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store; the
    /// file is created on the first record.
    pub fn open(path: &Path) -> Result<Self> {
        let document = if path.exists() {
            debug!(path = %path.display(), "loading verdict store");
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read verdict store {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parse verdict store {}", path.display()))?
        } else {
            debug!(path = %path.display(), "verdict store missing, starting empty");
            StoreDocument::default()
        };
        debug!(records = document.records.len(), "verdict store loaded");
        Ok(Self {
            path: path.to_path_buf(),
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &StoreDocument) -> Result<()> {
        debug!(path = %self.path.display(), records = document.records.len(), "writing verdict store");
        let mut buf = serde_json::to_string_pretty(document).context("serialize verdict store")?;
        buf.push('\n');
        write_atomic(&self.path, &buf)
    }
}

impl VerdictStore for JsonFileStore {
    fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Verdict>> {
        Ok(lock(&self.document)?.lookup(fingerprint))
    }

    fn record(&self, fingerprint: &Fingerprint, verdict: Verdict) -> Result<()> {
        let mut document = lock(&self.document)?;
        if !document.insert(fingerprint, verdict) {
            return Ok(());
        }
        if let Err(err) = self.persist(&document) {
            // Keep memory consistent with disk.
            document.records.remove(fingerprint);
            return Err(err);
        }
        Ok(())
    }

    fn counts(&self) -> Result<VerdictCounts> {
        Ok(lock(&self.document)?.counts())
    }
}

/// Build the store selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn VerdictStore>> {
    match config.kind {
        StoreKind::File => {
            let store = JsonFileStore::open(&config.path)?;
            debug!(path = %store.path().display(), "opened file verdict store");
            Ok(Box::new(store))
        }
        StoreKind::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(rows: &[&str]) -> Fingerprint {
        Fingerprint::of_rows(rows)
    }

    #[test]
    fn memory_store_counts_distinct_fingerprints() {
        let store = MemoryStore::new();
        let mutant = fingerprint(&["AAAA", "TTTT", "CCCC", "GGGG"]);
        let human = fingerprint(&["ACGT", "TGCA", "ACGT", "TGCA"]);

        store.record(&mutant, Verdict::Mutant).expect("record");
        store.record(&mutant, Verdict::Mutant).expect("record again");
        store.record(&human, Verdict::Human).expect("record");

        assert_eq!(
            store.counts().expect("counts"),
            VerdictCounts {
                human: 1,
                mutant: 1
            }
        );
        assert_eq!(store.lookup(&mutant).expect("lookup"), Some(Verdict::Mutant));
    }

    #[test]
    fn first_record_wins() {
        let store = MemoryStore::new();
        let fp = fingerprint(&["ACGT", "TGCA", "ACGT", "TGCA"]);
        store.record(&fp, Verdict::Human).expect("record");
        store.record(&fp, Verdict::Mutant).expect("record");
        assert_eq!(store.lookup(&fp).expect("lookup"), Some(Verdict::Human));
    }

    #[test]
    fn lookup_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.lookup(&fingerprint(&["A"])).expect("lookup"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("state").join("verdicts.json");
        let fp = fingerprint(&["AAAA", "TTTT", "CCCC", "GGGG"]);

        {
            let store = JsonFileStore::open(&path).expect("open");
            assert_eq!(store.counts().expect("counts"), VerdictCounts::default());
            store.record(&fp, Verdict::Mutant).expect("record");
        }
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.lookup(&fp).expect("lookup"), Some(Verdict::Mutant));
        assert_eq!(
            reopened.counts().expect("counts"),
            VerdictCounts {
                human: 0,
                mutant: 1
            }
        );
    }

    #[test]
    fn file_store_document_is_keyed_by_fingerprint() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("verdicts.json");
        let fp = fingerprint(&["ACGT", "TGCA", "ACGT", "TGCA"]);

        let store = JsonFileStore::open(&path).expect("open");
        store.record(&fp, Verdict::Human).expect("record");

        let raw = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value["records"][fp.as_str()]["mutant"], false);
        assert!(value["records"][fp.as_str()]["created_at"].is_string());
    }

    #[test]
    fn file_store_rejects_corrupt_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("verdicts.json");
        fs::write(&path, "not json").expect("write");
        let err = JsonFileStore::open(&path).expect_err("open should fail");
        assert!(format!("{err:#}").contains("parse verdict store"));
    }

    #[test]
    fn open_store_honors_kind() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = StoreConfig {
            kind: StoreKind::Memory,
            path: temp.path().join("unused.json"),
        };
        let store = open_store(&config).expect("open");
        store
            .record(&fingerprint(&["A"]), Verdict::Human)
            .expect("record");
        assert!(!config.path.exists());
    }
}
