//! Classification quality metrics over dense class ids.

#[derive(Debug, Clone, Copy, Default)]
struct ClassCounts {
    tp: usize,
    fp: usize,
    fn_: usize,
    support: usize,
    seen: bool,
}

impl ClassCounts {
    fn f1(&self) -> f64 {
        let denom = 2 * self.tp + self.fp + self.fn_;
        if denom == 0 {
            0.0
        } else {
            (2 * self.tp) as f64 / denom as f64
        }
    }
}

fn tally(y_true: &[usize], y_pred: &[usize]) -> Vec<ClassCounts> {
    debug_assert_eq!(y_true.len(), y_pred.len());
    let n = y_true
        .iter()
        .chain(y_pred.iter())
        .max()
        .map(|m| m + 1)
        .unwrap_or(0);
    let mut counts = vec![ClassCounts::default(); n];

    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        counts[t].support += 1;
        counts[t].seen = true;
        counts[p].seen = true;
        if t == p {
            counts[t].tp += 1;
        } else {
            counts[t].fn_ += 1;
            counts[p].fp += 1;
        }
    }
    counts
}

pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    hits as f64 / y_true.len() as f64
}

/// Unweighted mean of per-class F1 over every class present in truth or prediction.
pub fn f1_macro(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let counts = tally(y_true, y_pred);
    let present: Vec<&ClassCounts> = counts.iter().filter(|c| c.seen).collect();
    if present.is_empty() {
        return 0.0;
    }
    present.iter().map(|c| c.f1()).sum::<f64>() / present.len() as f64
}

/// Per-class F1 weighted by true support.
pub fn f1_weighted(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let counts = tally(y_true, y_pred);
    let total: usize = counts.iter().map(|c| c.support).sum();
    if total == 0 {
        return 0.0;
    }
    counts
        .iter()
        .map(|c| c.f1() * c.support as f64)
        .sum::<f64>()
        / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_known_values() {
        let y_true = [0, 0, 0, 1];
        let y_pred = [0, 0, 1, 1];
        // class 0: f1 = 0.8, class 1: f1 = 2/3
        assert!((accuracy(&y_true, &y_pred) - 0.75).abs() < EPS);
        assert!((f1_macro(&y_true, &y_pred) - (0.8 + 2.0 / 3.0) / 2.0).abs() < EPS);
        assert!((f1_weighted(&y_true, &y_pred) - (3.0 * 0.8 + 2.0 / 3.0) / 4.0).abs() < EPS);
    }

    #[test]
    fn test_predicted_only_class_counts_in_macro() {
        let y_true = [0, 0];
        let y_pred = [0, 2];
        // class 0: 2/3, class 2: 0 (never true), class 1 absent
        assert!((f1_macro(&y_true, &y_pred) - 1.0 / 3.0).abs() < EPS);
        assert!((f1_weighted(&y_true, &y_pred) - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_perfect_and_empty() {
        let y = [2, 0, 1, 1];
        assert_eq!(accuracy(&y, &y), 1.0);
        assert_eq!(f1_macro(&y, &y), 1.0);
        assert_eq!(f1_weighted(&y, &y), 1.0);
        assert_eq!(accuracy(&[], &[]), 0.0);
        assert_eq!(f1_macro(&[], &[]), 0.0);
    }
}
