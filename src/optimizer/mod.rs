pub mod evaluator;
pub mod memory;
pub mod neighbors;
pub mod runner;
pub mod sampler;

pub use self::evaluator::{CandidateScorer, Evaluator, PooledEvaluator, SequentialEvaluator};
pub use self::memory::{BestList, TabuSet};
pub use self::runner::{
    ParameterSearch, ProgressCallback, SearchOptions, SearchPhase, SearchReport, SilentProgress,
};
pub use self::sampler::Sampler;
