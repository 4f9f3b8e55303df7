#![allow(dead_code)]

use paramforge::error::{PfError, PfResult};
use paramforge::optimizer::{CandidateScorer, ProgressCallback};
use paramforge::params::{Candidate, Configuration, ParamValue, ScoreMetadata, ScoredConfig};
use paramforge::scorer::Dataset;
use paramforge::space::{TextOption, TOKEN_LIST};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Deterministic scorer backed by a closure. Records every code it sees.
pub struct FnScorer<F> {
    f: F,
    pub seen: Mutex<Vec<String>>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl<F> FnScorer<F>
where
    F: Fn(&Configuration) -> f64 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            seen: Mutex::new(Vec::new()),
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn seen_codes(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl<F> CandidateScorer for FnScorer<F>
where
    F: Fn(&Configuration) -> f64 + Send + Sync,
{
    fn score(&self, candidate: &Candidate) -> PfResult<ScoredConfig> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| n >= limit) {
            return Err(PfError::Classifier("classifier crashed".to_string()));
        }
        self.seen.lock().unwrap().push(candidate.code.clone());

        let s = (self.f)(&candidate.params);
        Ok(ScoredConfig {
            params: candidate.params.clone(),
            code: candidate.code.clone(),
            metrics: ScoreMetadata {
                score: s,
                macro_f1: s,
                weighted_f1: s,
                accuracy: s,
                time: 0.0,
            },
        })
    }
}

/// Records the best score reported after every batch.
#[derive(Default)]
pub struct RecordingProgress {
    pub best: Mutex<Vec<f64>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_batch(&self, _round: usize, _batch_len: usize, _evaluated: usize, best_score: f64) {
        self.best.lock().unwrap().push(best_score);
    }
}

pub fn target() -> Configuration {
    let mut c = Configuration::new();
    c.insert("del_dup1", ParamValue::Bool(false));
    c.insert("lc", ParamValue::Bool(true));
    c.insert("num_option", ParamValue::Category(TextOption::Group));
    c.insert("strip_diac", ParamValue::Bool(true));
    c.insert(TOKEN_LIST, ParamValue::Subset(vec![-1, 2, 3]));
    c.insert("url_option", ParamValue::Category(TextOption::None));
    c.insert("usr_option", ParamValue::Category(TextOption::Delete));
    c
}

/// Fraction of parameters matching `target()`, with the token list scored
/// by Jaccard similarity. Single changes can always climb to 1.0.
pub fn closeness(config: &Configuration) -> f64 {
    let goal = target();
    let mut total = 0.0;
    for (name, want) in goal.iter() {
        let got = match config.get(name) {
            Some(v) => v,
            None => continue,
        };
        total += match (want, got) {
            (ParamValue::Subset(a), ParamValue::Subset(b)) => {
                let inter = a.iter().filter(|x| b.contains(x)).count() as f64;
                let union = (a.len() + b.len()) as f64 - inter;
                if union == 0.0 {
                    1.0
                } else {
                    inter / union
                }
            }
            _ if want == got => 1.0,
            _ => 0.0,
        };
    }
    total / goal.len() as f64
}

/// Two-class sentiment corpus with distinctive vocabulary per class.
pub fn sentiment_dataset(per_class: usize) -> Dataset {
    let pos = ["great", "wonderful", "loved", "excellent", "happy"];
    let neg = ["awful", "terrible", "hated", "boring", "sad"];
    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for i in 0..per_class {
        texts.push(format!(
            "I {} this movie, {} acting @user{} http://t.co/{}",
            pos[i % pos.len()],
            pos[(i + 1) % pos.len()],
            i,
            i
        ));
        labels.push("pos".to_string());
        texts.push(format!(
            "What an {} film, {} plot and {} minutes",
            neg[i % neg.len()],
            neg[(i + 2) % neg.len()],
            90 + i
        ));
        labels.push("neg".to_string());
    }
    Dataset { texts, labels }
}
