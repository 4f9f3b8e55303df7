use crate::cmd::parse_language;
use clap::Args;
use paramforge::error::{PfError, PfResult};
use paramforge::params::Configuration;
use paramforge::scorer::{loader, CrossValScorer};
use paramforge::textmodel::NaiveBayesText;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// File containing the training set on csv
    pub training_set: Option<String>,

    /// Predict the training set using stratified k-fold
    #[arg(short = 'k', long = "kfolds")]
    pub n_folds: Option<usize>,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long)]
    pub lang: Option<String>,
}

/// Out-of-fold predictions with default preprocessing, one label per line.
pub fn run(args: PredictArgs) -> PfResult<()> {
    let n_folds = match args.n_folds {
        Some(k) => k,
        None => {
            warn!("Nothing to do: pass -k/--kfolds to predict the training set");
            return Ok(());
        }
    };
    let path = args
        .training_set
        .as_deref()
        .ok_or_else(|| PfError::Config("A training set is required with --kfolds".to_string()))?;

    let lang = parse_language(args.lang.as_deref())?;
    let dataset = loader::load_dataset(path)?;
    let scorer = CrossValScorer::new(
        dataset,
        n_folds,
        NaiveBayesText::new(lang),
        args.seed,
        None,
    )?;

    let hy = scorer.predict(&Configuration::new())?;
    info!("Predicted {} examples with {} folds", hy.len(), n_folds);

    for label in scorer.decode(&hy)? {
        println!("{}", label);
    }
    Ok(())
}
