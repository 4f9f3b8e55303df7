use crate::error::{PfError, PfResult};
use fastrand::Rng;
use tracing::warn;

/// One train/test split, indices sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Maps label strings onto `0..n_classes`, classes in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit(labels: &[String]) -> Self {
        let mut classes = labels.to_vec();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn transform(&self, labels: &[String]) -> PfResult<Vec<usize>> {
        labels
            .iter()
            .map(|l| {
                self.classes
                    .binary_search(l)
                    .map_err(|_| PfError::Validation(format!("Unknown label '{}'", l)))
            })
            .collect()
    }

    pub fn inverse_transform(&self, ids: &[usize]) -> PfResult<Vec<String>> {
        ids.iter()
            .map(|&i| {
                self.classes.get(i).cloned().ok_or_else(|| {
                    PfError::Validation(format!("Class id {} out of range", i))
                })
            })
            .collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Shuffled stratified k-fold partition.
///
/// Each class is shuffled on its own and dealt round-robin over the folds,
/// continuing where the previous class stopped, so fold sizes differ by at
/// most one and every class is spread as evenly as its size allows.
pub fn stratified_kfold(labels: &[usize], n_folds: usize, seed: u64) -> PfResult<Vec<Fold>> {
    if n_folds < 2 {
        return Err(PfError::Validation(format!(
            "n_folds must be at least 2 (got {})",
            n_folds
        )));
    }
    if labels.len() < n_folds {
        return Err(PfError::Validation(format!(
            "n_samples ({}) must be >= n_folds ({})",
            labels.len(),
            n_folds
        )));
    }

    let n_classes = labels.iter().max().map(|m| m + 1).unwrap_or(0);
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (idx, &class) in labels.iter().enumerate() {
        by_class[class].push(idx);
    }

    let smallest = by_class.iter().map(Vec::len).filter(|&n| n > 0).min();
    if let Some(n) = smallest.filter(|&n| n < n_folds) {
        warn!(
            "The least populated class has {} members, fewer than n_folds={}",
            n, n_folds
        );
    }

    let mut rng = Rng::with_seed(seed);
    let mut tests: Vec<Vec<usize>> = vec![Vec::new(); n_folds];
    let mut cursor = 0;
    for members in by_class.iter_mut() {
        rng.shuffle(members);
        for &idx in members.iter() {
            tests[cursor % n_folds].push(idx);
            cursor += 1;
        }
    }

    let folds = tests
        .into_iter()
        .map(|mut test| {
            test.sort_unstable();
            let mut in_test = vec![false; labels.len()];
            for &i in &test {
                in_test[i] = true;
            }
            let train = (0..labels.len()).filter(|&i| !in_test[i]).collect();
            Fold { train, test }
        })
        .collect();

    Ok(folds)
}
