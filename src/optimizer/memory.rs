use crate::codec;
use crate::params::{Candidate, Configuration, ScoredConfig};
use std::collections::HashSet;

/// Codes of every configuration already queued in the current search.
/// Only grows.
#[derive(Debug, Default, Clone)]
pub struct TabuSet {
    codes: HashSet<String>,
}

impl TabuSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `config` and admits it unless its code was seen before.
    pub fn admit(&mut self, config: Configuration) -> Option<Candidate> {
        let code = codec::encode(&config);
        if self.codes.contains(&code) {
            return None;
        }
        self.codes.insert(code.clone());
        Some(Candidate {
            params: config,
            code,
        })
    }

    pub fn admit_all<I>(&mut self, configs: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = Configuration>,
    {
        configs
            .into_iter()
            .filter_map(|config| self.admit(config))
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// All scored configurations so far, best first.
/// Equal scores keep the order in which they were merged.
#[derive(Debug, Default, Clone)]
pub struct BestList {
    entries: Vec<ScoredConfig>,
}

impl BestList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, mut batch: Vec<ScoredConfig>) {
        sort_desc(&mut batch);
        self.entries.extend(batch);
        sort_desc(&mut self.entries);
    }

    pub fn top(&self) -> Option<&ScoredConfig> {
        self.entries.first()
    }

    pub fn top_score(&self) -> Option<f64> {
        self.top().map(ScoredConfig::score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ScoredConfig] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<ScoredConfig> {
        self.entries
    }
}

fn sort_desc(entries: &mut [ScoredConfig]) {
    // Stable sort
    entries.sort_by(|a, b| b.score().total_cmp(&a.score()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamValue, ScoreMetadata};

    fn scored(code: &str, score: f64) -> ScoredConfig {
        ScoredConfig {
            params: Configuration::new(),
            code: code.to_string(),
            metrics: ScoreMetadata {
                score,
                macro_f1: score,
                weighted_f1: score,
                accuracy: score,
                time: 0.0,
            },
        }
    }

    #[test]
    fn test_tabu_rejects_repeated_codes() {
        let mut tabu = TabuSet::new();
        let mut c = Configuration::new();
        c.insert("lc", ParamValue::Bool(true));

        assert!(tabu.admit(c.clone()).is_some());
        assert!(tabu.admit(c.clone()).is_none());
        assert_eq!(tabu.len(), 1);

        let batch = tabu.admit_all(vec![c.clone(), c.with("lc", ParamValue::Bool(false))]);
        assert_eq!(batch.len(), 1);
        assert_eq!(tabu.len(), 2);
    }

    #[test]
    fn test_best_list_is_stable_on_ties() {
        let mut best = BestList::new();
        best.merge(vec![scored("a", 0.5), scored("b", 0.7)]);
        best.merge(vec![scored("c", 0.7), scored("d", 0.1)]);

        let codes: Vec<&str> = best.as_slice().iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["b", "c", "a", "d"]);
        assert_eq!(best.top_score(), Some(0.7));
    }
}
