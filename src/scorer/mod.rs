pub mod folds;
pub mod loader;
pub mod metrics;

pub use self::folds::{Fold, LabelEncoder};
pub use self::loader::Dataset;

use crate::error::{PfError, PfResult};
use crate::optimizer::CandidateScorer;
use crate::params::{Candidate, Configuration, ScoreMetadata, ScoredConfig};
use rayon::ThreadPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Text classifier able to produce out-of-fold predictions for a fixed
/// partition. Must be deterministic for equal folds and parameters.
pub trait KFoldClassifier: Send + Sync {
    fn predict_kfold(
        &self,
        texts: &[String],
        labels: &[usize],
        n_folds: usize,
        params: &Configuration,
        folds: &[Fold],
        pool: Option<&ThreadPool>,
    ) -> PfResult<Vec<usize>>;
}

/// Scores configurations by k-fold cross-validation on one fixed partition.
pub struct CrossValScorer<C> {
    texts: Vec<String>,
    labels: Vec<usize>,
    encoder: LabelEncoder,
    n_folds: usize,
    folds: Vec<Fold>,
    classifier: C,
    pool: Option<Arc<ThreadPool>>,
}

impl<C: KFoldClassifier> CrossValScorer<C> {
    pub fn new(
        dataset: Dataset,
        n_folds: usize,
        classifier: C,
        seed: u64,
        pool: Option<Arc<ThreadPool>>,
    ) -> PfResult<Self> {
        if dataset.is_empty() {
            return Err(PfError::Validation("Training set is empty".to_string()));
        }

        let encoder = LabelEncoder::fit(&dataset.labels);
        let labels = encoder.transform(&dataset.labels)?;
        let folds = folds::stratified_kfold(&labels, n_folds, seed)?;

        info!(
            "Cross-validation ready: {} examples, {} classes, {} folds",
            labels.len(),
            encoder.n_classes(),
            n_folds
        );

        Ok(Self {
            texts: dataset.texts,
            labels,
            encoder,
            n_folds,
            folds,
            classifier,
            pool,
        })
    }

    /// Out-of-fold predictions for `params`, one class id per example.
    pub fn predict(&self, params: &Configuration) -> PfResult<Vec<usize>> {
        let hy = self.classifier.predict_kfold(
            &self.texts,
            &self.labels,
            self.n_folds,
            params,
            &self.folds,
            self.pool.as_deref(),
        )?;
        if hy.len() != self.labels.len() {
            return Err(PfError::Classifier(format!(
                "expected {} predictions, got {}",
                self.labels.len(),
                hy.len()
            )));
        }
        Ok(hy)
    }

    pub fn evaluate_params(&self, params: &Configuration) -> PfResult<ScoreMetadata> {
        let start = Instant::now();
        let hy = self.predict(params)?;
        let elapsed = start.elapsed().as_secs_f64();

        let macro_f1 = metrics::f1_macro(&self.labels, &hy);
        Ok(ScoreMetadata {
            score: macro_f1,
            macro_f1,
            weighted_f1: metrics::f1_weighted(&self.labels, &hy),
            accuracy: metrics::accuracy(&self.labels, &hy),
            time: elapsed / self.n_folds as f64,
        })
    }

    pub fn decode(&self, ids: &[usize]) -> PfResult<Vec<String>> {
        self.encoder.inverse_transform(ids)
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }

    pub fn n_folds(&self) -> usize {
        self.n_folds
    }
}

impl<C: KFoldClassifier> CandidateScorer for CrossValScorer<C> {
    fn score(&self, candidate: &Candidate) -> PfResult<ScoredConfig> {
        let metrics = self.evaluate_params(&candidate.params)?;
        debug!(
            "{:.4} macro-F1 ({:.3}s/fold) {}",
            metrics.macro_f1, metrics.time, candidate.code
        );
        Ok(ScoredConfig {
            params: candidate.params.clone(),
            code: candidate.code.clone(),
            metrics,
        })
    }
}
