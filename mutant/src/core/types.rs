//! Shared deterministic types for verdicts and aggregate counts.

use serde::{Deserialize, Serialize};

/// Classification of a dna sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Human,
    Mutant,
}

impl Verdict {
    pub fn is_mutant(self) -> bool {
        matches!(self, Verdict::Mutant)
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Human => "human",
            Verdict::Mutant => "mutant",
        }
    }
}

impl From<bool> for Verdict {
    fn from(mutant: bool) -> Self {
        if mutant {
            Verdict::Mutant
        } else {
            Verdict::Human
        }
    }
}

/// Number of distinct samples recorded per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub human: u64,
    pub mutant: u64,
}

impl VerdictCounts {
    pub fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Human => self.human += 1,
            Verdict::Mutant => self.mutant += 1,
        }
    }

    /// `mutant / human`, or `None` while no human has been recorded.
    pub fn ratio(&self) -> Option<f64> {
        if self.human == 0 {
            return None;
        }
        Some(self.mutant as f64 / self.human as f64)
    }
}

/// Aggregate stats as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    pub ratio: Option<f64>,
}

impl From<VerdictCounts> for Stats {
    fn from(counts: VerdictCounts) -> Self {
        Self {
            count_mutant_dna: counts.mutant,
            count_human_dna: counts.human,
            ratio: counts.ratio(),
        }
    }
}
