use crate::config::Config;
use crate::error::PfResult;
use crate::optimizer::evaluator::Evaluator;
use crate::optimizer::memory::{BestList, TabuSet};
use crate::optimizer::neighbors;
use crate::optimizer::sampler::Sampler;
use crate::params::{Candidate, ScoredConfig};
use crate::space::ParameterSpace;
use std::mem;
use strum_macros::Display;
use tracing::{debug, info};

pub struct SearchOptions {
    /// Number of random candidates drawn before climbing.
    pub batch_size: usize,
    /// Mean token-list size for random candidates.
    pub subset_size_hint: f64,
    pub hill_climbing: bool,
    /// Selects the registry with language-dependent options.
    pub language: bool,
    /// Hard cap on hill-climbing rounds.
    pub max_rounds: usize,
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            batch_size: 32,
            subset_size_hint: 3.0,
            hill_climbing: true,
            language: false,
            max_rounds: 1000,
            seed: None,
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            batch_size: cfg.search.batch_size,
            subset_size_hint: cfg.search.qsize,
            hill_climbing: !cfg.search.no_hill_climbing,
            language: cfg.search.lang.is_some(),
            max_rounds: cfg.search.max_rounds,
            seed: cfg.search.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchPhase {
    Init,
    Sampling,
    Ranking,
    HillClimbing,
    Done,
}

/// Observes the search after every ranked batch.
pub trait ProgressCallback: Send + Sync {
    fn on_batch(&self, round: usize, batch_len: usize, evaluated: usize, best_score: f64);
}

pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_batch(&self, _round: usize, _batch_len: usize, _evaluated: usize, _best_score: f64) {}
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every evaluated configuration, best first.
    pub ranked: Vec<ScoredConfig>,
    /// Hill-climbing rounds executed.
    pub rounds: usize,
    pub evaluated: usize,
    /// True when the round cap stopped the climb.
    pub capped: bool,
}

impl SearchReport {
    pub fn best(&self) -> Option<&ScoredConfig> {
        self.ranked.first()
    }
}

/// Random sampling followed by tabu-guarded hill climbing.
pub struct ParameterSearch {
    options: SearchOptions,
    space: ParameterSpace,
}

impl ParameterSearch {
    pub fn new(options: SearchOptions) -> Self {
        let space = ParameterSpace::for_language(options.language);
        Self { options, space }
    }

    /// Searches a caller-supplied registry instead of the built-in one.
    pub fn with_space(options: SearchOptions, space: ParameterSpace) -> Self {
        Self { options, space }
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    pub fn run<E, CB>(&self, evaluator: &E, callback: &CB) -> PfResult<SearchReport>
    where
        E: Evaluator + ?Sized,
        CB: ProgressCallback + ?Sized,
    {
        let opts = &self.options;

        let mut tabu = TabuSet::new();
        let mut best = BestList::new();
        let mut sampler = Sampler::new(&self.space, opts.seed);

        let mut pending: Vec<Candidate> = Vec::new();
        let mut phase = SearchPhase::Init;
        let mut rounds = 0;
        let mut evaluated = 0;
        let mut capped = false;
        let mut round_start_score: Option<f64> = None;

        loop {
            debug!("Search phase: {}", phase);
            phase = match phase {
                SearchPhase::Init => {
                    info!(
                        "Searching {} parameters (batch {}, climbing {})",
                        self.space.len(),
                        opts.batch_size,
                        opts.hill_climbing
                    );
                    SearchPhase::Sampling
                }

                SearchPhase::Sampling => {
                    let drawn = sampler.sample(opts.batch_size, opts.subset_size_hint);
                    pending = tabu.admit_all(drawn);
                    debug!(
                        "Sampled {} unique candidates out of {}",
                        pending.len(),
                        opts.batch_size
                    );
                    SearchPhase::Ranking
                }

                SearchPhase::Ranking => {
                    let batch = mem::take(&mut pending);
                    let batch_len = batch.len();
                    let scored = evaluator.evaluate(batch)?;
                    evaluated += scored.len();
                    best.merge(scored);

                    let top = best.top_score().unwrap_or(f64::NEG_INFINITY);
                    callback.on_batch(rounds, batch_len, evaluated, top);

                    if rounds == 0 {
                        if !opts.hill_climbing || best.is_empty() {
                            SearchPhase::Done
                        } else if opts.max_rounds == 0 {
                            capped = true;
                            SearchPhase::Done
                        } else {
                            SearchPhase::HillClimbing
                        }
                    } else if !improved(round_start_score, best.top_score()) {
                        // Equal top score halts even if other configs tie it.
                        info!("No improvement after round {}, best {:.4}", rounds, top);
                        SearchPhase::Done
                    } else if rounds >= opts.max_rounds {
                        info!("Round cap {} reached, best {:.4}", opts.max_rounds, top);
                        capped = true;
                        SearchPhase::Done
                    } else {
                        SearchPhase::HillClimbing
                    }
                }

                SearchPhase::HillClimbing => {
                    rounds += 1;
                    round_start_score = best.top_score();

                    let center = match best.top() {
                        Some(top) => top.params.clone(),
                        None => break,
                    };
                    pending = tabu.admit_all(neighbors::expand(&self.space, &center));
                    debug!(
                        "Round {}: {} unvisited neighbors of {}",
                        rounds,
                        pending.len(),
                        best.top().map(|t| t.code.as_str()).unwrap_or("")
                    );

                    if pending.is_empty() {
                        info!("Neighborhood exhausted after round {}", rounds);
                        SearchPhase::Done
                    } else {
                        SearchPhase::Ranking
                    }
                }

                SearchPhase::Done => break,
            };
        }

        Ok(SearchReport {
            ranked: best.into_vec(),
            rounds,
            evaluated,
            capped,
        })
    }
}

fn improved(before: Option<f64>, after: Option<f64>) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => a > b,
        (None, Some(_)) => true,
        _ => false,
    }
}
