use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub eval: EvalParams,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Random candidates drawn before hill climbing
    #[arg(short = 'b', long, default_value_t = 32)]
    pub batch_size: usize,

    /// Mean size of a sampled token list
    #[arg(short = 'q', long, default_value_t = 3.0)]
    pub qsize: f64,

    #[arg(long, default_value_t = false)]
    pub no_hill_climbing: bool,

    /// Enables the language-dependent options (negation, stemming, stopwords)
    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, default_value_t = 1000)]
    pub max_rounds: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            batch_size: 32,
            qsize: 3.0,
            no_hill_climbing: false,
            lang: None,
            max_rounds: 1000,
            seed: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvalParams {
    #[arg(long, default_value_t = 5)]
    pub n_folds: usize,

    /// Seed of the shared stratified fold partition
    #[arg(long, default_value_t = 0)]
    pub fold_seed: u64,

    /// Worker threads for candidate evaluation (1 = sequential)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            n_folds: 5,
            fold_seed: 0,
            threads: None,
        }
    }
}

impl EvalParams {
    /// Requested thread count, or every available core.
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}
