pub mod tokenizer;

pub use self::tokenizer::{Language, TextPipeline};

use crate::error::{PfError, PfResult};
use crate::params::Configuration;
use crate::scorer::{Fold, KFoldClassifier};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::collections::HashMap;

/// Multinomial Naive Bayes over the tokens of a [`TextPipeline`].
#[derive(Debug, Clone)]
pub struct NaiveBayesText {
    lang: Option<Language>,
    alpha: f64,
}

impl Default for NaiveBayesText {
    fn default() -> Self {
        Self {
            lang: None,
            alpha: 1.0,
        }
    }
}

impl NaiveBayesText {
    pub fn new(lang: Option<Language>) -> Self {
        Self {
            lang,
            ..Default::default()
        }
    }

    /// Laplace smoothing constant.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

struct NbModel<'a> {
    class_log_prior: Vec<f64>,
    token_counts: HashMap<&'a str, Vec<f64>>,
    class_totals: Vec<f64>,
    alpha: f64,
}

impl<'a> NbModel<'a> {
    fn fit(
        docs: &'a [Vec<String>],
        labels: &[usize],
        idx: &[usize],
        n_classes: usize,
        alpha: f64,
    ) -> Self {
        let mut class_docs = vec![0.0; n_classes];
        let mut class_totals = vec![0.0; n_classes];
        let mut token_counts: HashMap<&'a str, Vec<f64>> = HashMap::new();

        for &i in idx {
            let c = labels[i];
            class_docs[c] += 1.0;
            for tok in &docs[i] {
                token_counts
                    .entry(tok.as_str())
                    .or_insert_with(|| vec![0.0; n_classes])[c] += 1.0;
                class_totals[c] += 1.0;
            }
        }

        let n_docs = idx.len() as f64;
        let class_log_prior = class_docs
            .iter()
            .map(|&n| ((n + 1.0) / (n_docs + n_classes as f64)).ln())
            .collect();

        Self {
            class_log_prior,
            token_counts,
            class_totals,
            alpha,
        }
    }

    fn predict(&self, doc: &[String]) -> usize {
        let vocab = self.token_counts.len() as f64;
        let denoms: Vec<f64> = self
            .class_totals
            .iter()
            .map(|t| (t + self.alpha * vocab).ln())
            .collect();

        let mut log_probs = self.class_log_prior.clone();
        for tok in doc {
            if let Some(counts) = self.token_counts.get(tok.as_str()) {
                for (c, lp) in log_probs.iter_mut().enumerate() {
                    *lp += (counts[c] + self.alpha).ln() - denoms[c];
                }
            }
        }

        // First maximum wins ties.
        let mut best = 0;
        for (c, &lp) in log_probs.iter().enumerate() {
            if lp > log_probs[best] {
                best = c;
            }
        }
        best
    }
}

impl KFoldClassifier for NaiveBayesText {
    fn predict_kfold(
        &self,
        texts: &[String],
        labels: &[usize],
        n_folds: usize,
        params: &Configuration,
        folds: &[Fold],
        pool: Option<&ThreadPool>,
    ) -> PfResult<Vec<usize>> {
        if texts.len() != labels.len() {
            return Err(PfError::Classifier(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        if folds.len() != n_folds {
            return Err(PfError::Classifier(format!(
                "expected {} folds, got {}",
                n_folds,
                folds.len()
            )));
        }
        for (f, fold) in folds.iter().enumerate() {
            let bad = fold
                .train
                .iter()
                .chain(fold.test.iter())
                .find(|&&i| i >= texts.len());
            if let Some(&i) = bad {
                return Err(PfError::Classifier(format!(
                    "fold {} index {} out of range",
                    f, i
                )));
            }
        }

        let pipeline = TextPipeline::from_params(params, self.lang);
        let n_classes = labels.iter().max().map(|m| m + 1).unwrap_or(0);
        let alpha = self.alpha;

        let tokenize_all = || -> Vec<Vec<String>> {
            texts.par_iter().map(|t| pipeline.tokenize(t)).collect()
        };
        let docs: Vec<Vec<String>> = match pool {
            Some(p) => p.install(tokenize_all),
            None => texts.iter().map(|t| pipeline.tokenize(t)).collect(),
        };

        let run_fold = |fold: &Fold| -> Vec<(usize, usize)> {
            let model = NbModel::fit(&docs, labels, &fold.train, n_classes, alpha);
            fold.test
                .iter()
                .map(|&i| (i, model.predict(&docs[i])))
                .collect()
        };

        let per_fold: Vec<Vec<(usize, usize)>> = match pool {
            Some(p) => p.install(|| folds.par_iter().map(run_fold).collect()),
            None => folds.iter().map(run_fold).collect(),
        };

        let mut hy = vec![usize::MAX; texts.len()];
        // Indices were range-checked above.
        for (i, pred) in per_fold.into_iter().flatten() {
            hy[i] = pred;
        }
        if let Some(missing) = hy.iter().position(|&p| p == usize::MAX) {
            return Err(PfError::Classifier(format!(
                "example {} is not in any test fold",
                missing
            )));
        }

        Ok(hy)
    }
}
