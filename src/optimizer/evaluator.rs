use crate::error::{PfError, PfResult};
use crate::params::{Candidate, ScoredConfig};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use tracing::debug;

/// Turns one candidate into a scored configuration.
/// Implementations must be shareable across worker threads.
pub trait CandidateScorer: Send + Sync {
    fn score(&self, candidate: &Candidate) -> PfResult<ScoredConfig>;
}

impl<S: CandidateScorer + ?Sized> CandidateScorer for Arc<S> {
    fn score(&self, candidate: &Candidate) -> PfResult<ScoredConfig> {
        (**self).score(candidate)
    }
}

/// Scores a whole batch. Output order is unspecified; callers rank it.
/// A single failure fails the batch.
pub trait Evaluator {
    fn evaluate(&self, batch: Vec<Candidate>) -> PfResult<Vec<ScoredConfig>>;
}

pub struct SequentialEvaluator<S> {
    scorer: S,
}

impl<S: CandidateScorer> SequentialEvaluator<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}

impl<S: CandidateScorer> Evaluator for SequentialEvaluator<S> {
    fn evaluate(&self, batch: Vec<Candidate>) -> PfResult<Vec<ScoredConfig>> {
        batch.iter().map(|c| self.scorer.score(c)).collect()
    }
}

/// Fans a batch out over a dedicated rayon pool.
pub struct PooledEvaluator<S> {
    scorer: S,
    pool: ThreadPool,
}

impl<S: CandidateScorer> PooledEvaluator<S> {
    pub fn new(scorer: S, num_threads: usize) -> PfResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("pf-eval-{}", i))
            .build()
            .map_err(|e| PfError::Config(format!("Could not build worker pool: {}", e)))?;
        debug!("Evaluator pool ready with {} threads", pool.current_num_threads());
        Ok(Self { scorer, pool })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}

impl<S: CandidateScorer> Evaluator for PooledEvaluator<S> {
    fn evaluate(&self, batch: Vec<Candidate>) -> PfResult<Vec<ScoredConfig>> {
        let scorer = &self.scorer;
        self.pool
            .install(|| batch.par_iter().map(|c| scorer.score(c)).collect())
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, batch: Vec<Candidate>) -> PfResult<Vec<ScoredConfig>> {
        (**self).evaluate(batch)
    }
}
