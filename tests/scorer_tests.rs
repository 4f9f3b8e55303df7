mod common;

use common::sentiment_dataset;
use paramforge::error::{PfError, PfResult};
use paramforge::optimizer::CandidateScorer;
use paramforge::params::{Candidate, Configuration, ParamValue};
use paramforge::scorer::folds::stratified_kfold;
use paramforge::scorer::loader::read_dataset;
use paramforge::scorer::{CrossValScorer, Dataset, Fold, KFoldClassifier};
use paramforge::space::{TextOption, TOKEN_LIST};
use paramforge::textmodel::NaiveBayesText;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rstest::rstest;
use std::io::Cursor;
use std::sync::Arc;

/// Predicts the same class for everything.
struct Constant(usize);

impl KFoldClassifier for Constant {
    fn predict_kfold(
        &self,
        texts: &[String],
        _labels: &[usize],
        _n_folds: usize,
        _params: &Configuration,
        _folds: &[Fold],
        _pool: Option<&ThreadPool>,
    ) -> PfResult<Vec<usize>> {
        Ok(vec![self.0; texts.len()])
    }
}

struct Broken;

impl KFoldClassifier for Broken {
    fn predict_kfold(
        &self,
        _texts: &[String],
        _labels: &[usize],
        _n_folds: usize,
        _params: &Configuration,
        _folds: &[Fold],
        _pool: Option<&ThreadPool>,
    ) -> PfResult<Vec<usize>> {
        Ok(vec![0])
    }
}

fn labels(counts: &[usize]) -> Vec<usize> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(class, &n)| std::iter::repeat(class).take(n))
        .collect()
}

#[rstest]
#[case(&[10, 10], 5)]
#[case(&[7, 3, 12], 3)]
#[case(&[4, 4, 4, 4], 4)]
fn test_folds_partition_examples(#[case] counts: &[usize], #[case] k: usize) {
    let y = labels(counts);
    let folds = stratified_kfold(&y, k, 17).unwrap();
    assert_eq!(folds.len(), k);

    let mut seen = vec![0; y.len()];
    for fold in &folds {
        assert_eq!(fold.train.len() + fold.test.len(), y.len());
        for &i in &fold.test {
            seen[i] += 1;
            assert!(!fold.train.contains(&i));
        }
        assert!(fold.test.windows(2).all(|w| w[0] < w[1]));
    }
    assert!(seen.iter().all(|&n| n == 1));

    let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
    let (lo, hi) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
    assert!(hi - lo <= 1, "unbalanced fold sizes {:?}", sizes);
}

#[test]
fn test_folds_are_stratified() {
    let y = labels(&[20, 10]);
    let folds = stratified_kfold(&y, 5, 1).unwrap();
    for fold in &folds {
        let minority = fold.test.iter().filter(|&&i| y[i] == 1).count();
        assert_eq!(minority, 2);
        assert_eq!(fold.test.len(), 6);
    }
}

#[test]
fn test_folds_depend_only_on_seed() {
    let y = labels(&[15, 15]);
    assert_eq!(
        stratified_kfold(&y, 3, 5).unwrap(),
        stratified_kfold(&y, 3, 5).unwrap()
    );
}

#[rstest]
#[case(1, 10)]
#[case(0, 10)]
#[case(11, 10)]
fn test_invalid_fold_counts(#[case] k: usize, #[case] n: usize) {
    let y = labels(&[n / 2, n - n / 2]);
    assert!(matches!(
        stratified_kfold(&y, k, 0),
        Err(PfError::Validation(_))
    ));
}

#[test]
fn test_empty_training_set_is_rejected() {
    let result = CrossValScorer::new(Dataset::default(), 3, NaiveBayesText::default(), 0, None);
    assert!(matches!(result, Err(PfError::Validation(_))));
}

#[test]
fn test_constant_classifier_metrics() {
    // 6 "neg" (class 0), 6 "pos" (class 1); always predicting neg.
    let scorer = CrossValScorer::new(sentiment_dataset(6), 3, Constant(0), 0, None).unwrap();
    let m = scorer.evaluate_params(&Configuration::new()).unwrap();

    assert!((m.accuracy - 0.5).abs() < 1e-12);
    // F1 for neg = 2*0.5*1/(1.5) = 2/3, pos = 0.
    assert!((m.macro_f1 - 1.0 / 3.0).abs() < 1e-12);
    assert!((m.weighted_f1 - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(m.score, m.macro_f1);
}

#[test]
fn test_wrong_prediction_length_is_a_classifier_error() {
    let scorer = CrossValScorer::new(sentiment_dataset(5), 2, Broken, 0, None).unwrap();
    assert!(matches!(
        scorer.evaluate_params(&Configuration::new()),
        Err(PfError::Classifier(_))
    ));
}

#[test]
fn test_repeated_scoring_is_deterministic() {
    let scorer = CrossValScorer::new(
        sentiment_dataset(12),
        4,
        NaiveBayesText::default(),
        3,
        None,
    )
    .unwrap();
    let mut params = Configuration::new();
    params.insert("lc", ParamValue::Bool(true));
    params.insert("usr_option", ParamValue::Category(TextOption::Group));
    params.insert(TOKEN_LIST, ParamValue::Subset(vec![-1, 3]));
    let candidate = Candidate {
        code: paramforge::codec::encode(&params),
        params,
    };

    let a = scorer.score(&candidate).unwrap();
    let b = scorer.score(&candidate).unwrap();
    assert_eq!(a.code, candidate.code);
    assert_eq!(a.metrics.macro_f1, b.metrics.macro_f1);
    assert_eq!(a.metrics.accuracy, b.metrics.accuracy);
    assert!(a.metrics.macro_f1 > 0.9, "macro-F1 {}", a.metrics.macro_f1);
}

#[test]
fn test_pool_does_not_change_predictions() {
    let pool = Arc::new(ThreadPoolBuilder::new().num_threads(3).build().unwrap());
    let plain = CrossValScorer::new(sentiment_dataset(10), 5, NaiveBayesText::default(), 2, None)
        .unwrap();
    let pooled = CrossValScorer::new(
        sentiment_dataset(10),
        5,
        NaiveBayesText::default(),
        2,
        Some(pool),
    )
    .unwrap();

    let params = Configuration::new().with(TOKEN_LIST, ParamValue::Subset(vec![-2, -1, 4]));
    assert_eq!(plain.folds(), pooled.folds());
    assert_eq!(plain.predict(&params).unwrap(), pooled.predict(&params).unwrap());
}

#[test]
fn test_decode_round_trips_class_ids() {
    let scorer =
        CrossValScorer::new(sentiment_dataset(4), 2, Constant(1), 0, None).unwrap();
    assert_eq!(scorer.classes(), &["neg".to_string(), "pos".to_string()]);
    assert_eq!(scorer.decode(&[1, 0]).unwrap(), vec!["pos", "neg"]);
    assert!(scorer.decode(&[7]).is_err());
}

#[test]
fn test_read_dataset_from_csv() {
    let csv = "id,Text,label\n1,\"good, very good\",pos\n2,bad,neg\n3,no label here,\n4,fine, pos \n";
    let ds = read_dataset(Cursor::new(csv)).unwrap();

    assert_eq!(ds.len(), 3);
    assert_eq!(ds.texts[0], "good, very good");
    assert_eq!(ds.labels, vec!["pos", "neg", "pos"]);
}

#[test]
fn test_read_dataset_requires_columns() {
    let csv = "sentence,label\nhello,pos\n";
    assert!(matches!(
        read_dataset(Cursor::new(csv)),
        Err(PfError::Validation(_))
    ));
}

#[test]
fn test_mismatched_dataset_lengths() {
    let result = Dataset::new(vec!["a".to_string()], vec![]);
    assert!(result.is_err());
}
