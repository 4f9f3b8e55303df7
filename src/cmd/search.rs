use crate::cmd::parse_language;
use crate::reports;
use clap::Args;
use paramforge::config::Config;
use paramforge::error::PfResult;
use paramforge::optimizer::{
    Evaluator, ParameterSearch, PooledEvaluator, ProgressCallback, SearchOptions,
    SequentialEvaluator,
};
use paramforge::params::ScoredConfig;
use paramforge::scorer::{loader, CrossValScorer};
use paramforge::textmodel::NaiveBayesText;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// CSV training set with `text` and `label` columns
    pub training_set: String,

    #[command(flatten)]
    pub config: Config,

    /// Write the full ranking as JSON
    #[arg(short, long)]
    pub output: Option<String>,

    /// Rows shown in the ranking table
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

struct CliLogger;
impl ProgressCallback for CliLogger {
    fn on_batch(&self, round: usize, batch_len: usize, evaluated: usize, best_score: f64) {
        info!(
            "Round {:3} | {:4} scored | {:5} total | Best macro-F1: {:.4}",
            round, batch_len, evaluated, best_score
        );
    }
}

pub fn run(args: SearchArgs) -> PfResult<()> {
    let lang = parse_language(args.config.search.lang.as_deref())?;
    let dataset = loader::load_dataset(&args.training_set)?;

    let scorer = CrossValScorer::new(
        dataset,
        args.config.eval.n_folds,
        NaiveBayesText::new(lang),
        args.config.eval.fold_seed,
        None,
    )?;

    let threads = args.config.eval.resolved_threads();
    let evaluator: Box<dyn Evaluator> = if threads > 1 {
        info!("🔥 Evaluating candidates on {} threads", threads);
        Box::new(PooledEvaluator::new(scorer, threads)?)
    } else {
        Box::new(SequentialEvaluator::new(scorer))
    };

    let search = ParameterSearch::new(SearchOptions::from(&args.config));
    let report = search.run(evaluator.as_ref(), &CliLogger)?;

    info!(
        "Evaluated {} configurations in {} climbing rounds{}",
        report.evaluated,
        report.rounds,
        if report.capped { " (round cap hit)" } else { "" }
    );

    reports::print_ranking(&report.ranked, args.top);
    if let Some(best) = report.best() {
        reports::print_params("BEST", best);
        println!("Score: {:.4}", best.score());
        println!("Code: {}", best.code);
    }

    if let Some(path) = &args.output {
        save_ranking(path, &report.ranked)?;
        info!("💾 Ranking written to {}", path);
    }

    Ok(())
}

fn save_ranking(path: &str, ranked: &[ScoredConfig]) -> PfResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, ranked)?;
    Ok(())
}
