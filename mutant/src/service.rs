//! Memoized classification and aggregate stats.
//!
//! Coordinates the pure core ([`validate`], [`classify`]) with a [`VerdictStore`]
//! so each distinct sample is scanned once and counted once.

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::detector::classify;
use crate::core::fingerprint::Fingerprint;
use crate::core::types::{Stats, Verdict};
use crate::core::validate::{ValidationError, validate};
use crate::io::config::MutantConfig;
use crate::io::store::{VerdictStore, open_store};

/// Why a sample could not be classified.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("dna has {rows} rows, exceeding the limit of {max}")]
    TooLarge { rows: usize, max: usize },
    #[error("verdict store failed: {0:#}")]
    Store(anyhow::Error),
}

impl CheckError {
    /// True for errors caused by the submitted sample rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CheckError::Invalid(_) | CheckError::TooLarge { .. })
    }
}

/// Outcome of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub verdict: Verdict,
    pub fingerprint: Fingerprint,
    /// True if the verdict came from the store instead of a fresh scan.
    pub cached: bool,
}

pub struct MutantService {
    store: Box<dyn VerdictStore>,
    max_dimension: usize,
}

impl MutantService {
    pub fn new(store: Box<dyn VerdictStore>, max_dimension: usize) -> Self {
        Self {
            store,
            max_dimension,
        }
    }

    /// Build a service from config, opening the configured store.
    pub fn from_config(config: &MutantConfig) -> anyhow::Result<Self> {
        let store = open_store(&config.store)?;
        Ok(Self::new(store, config.max_dimension))
    }

    /// Classify `rows`, reusing a stored verdict when the sample was seen before.
    ///
    /// Order: size ceiling, validation, fingerprint, store lookup, scan, record.
    /// Invalid samples are never fingerprinted or stored.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn check<S: AsRef<str>>(&self, rows: &[S]) -> Result<Checked, CheckError> {
        if rows.len() > self.max_dimension {
            return Err(CheckError::TooLarge {
                rows: rows.len(),
                max: self.max_dimension,
            });
        }
        let grid = validate(rows)?;
        let fingerprint = Fingerprint::of_grid(&grid);

        if let Some(verdict) = self
            .store
            .lookup(&fingerprint)
            .map_err(CheckError::Store)?
        {
            debug!(%fingerprint, verdict = verdict.label(), "verdict cache hit");
            return Ok(Checked {
                verdict,
                fingerprint,
                cached: true,
            });
        }

        debug!(%fingerprint, n = grid.size(), "verdict cache miss, scanning");
        let verdict = classify(&grid);
        self.store
            .record(&fingerprint, verdict)
            .map_err(CheckError::Store)?;
        info!(%fingerprint, verdict = verdict.label(), "recorded new verdict");

        Ok(Checked {
            verdict,
            fingerprint,
            cached: false,
        })
    }

    /// Aggregate counts and the mutant/human ratio.
    pub fn stats(&self) -> anyhow::Result<Stats> {
        let counts = self.store.counts()?;
        debug!(human = counts.human, mutant = counts.mutant, "stats computed");
        Ok(Stats::from(counts))
    }
}
