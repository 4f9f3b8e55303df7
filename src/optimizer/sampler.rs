use crate::params::{Configuration, ParamValue};
use crate::space::{sort_by_universe, Domain, ParameterSpace};
use fastrand::Rng;
use std::f64::consts::TAU;
use tracing::debug;

/// Draws independent random configurations from a parameter space.
pub struct Sampler {
    space: ParameterSpace,
    rng: Rng,
}

impl Sampler {
    pub fn new(space: &ParameterSpace, seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self::from_rng(space, rng)
    }

    pub fn from_rng(space: &ParameterSpace, rng: Rng) -> Self {
        Self {
            space: space.clone(),
            rng,
        }
    }

    /// Exactly `count` i.i.d. configurations. `subset_size_hint` is the mean
    /// size of the token list.
    pub fn sample(
        &mut self,
        count: usize,
        subset_size_hint: f64,
    ) -> impl Iterator<Item = Configuration> + '_ {
        (0..count).map(move |_| self.draw(subset_size_hint))
    }

    pub fn draw(&mut self, subset_size_hint: f64) -> Configuration {
        let mut config = Configuration::new();

        for (name, domain) in self.space.iter() {
            if domain.is_empty() {
                debug!("Skipping parameter '{}' with an empty domain", name);
                continue;
            }

            let value = match domain {
                Domain::Boolean => ParamValue::Bool(self.rng.bool()),
                Domain::Category(tags) => ParamValue::Category(tags[self.rng.usize(..tags.len())]),
                Domain::Subset(universe) => {
                    ParamValue::Subset(draw_subset(&mut self.rng, universe, subset_size_hint))
                }
            };
            config.insert(name, value);
        }

        config
    }
}

/// Random permutation of the universe truncated to a normally distributed
/// length, then put back into universe order.
pub fn draw_subset(rng: &mut Rng, universe: &[i32], mean: f64) -> Vec<i32> {
    let mut pool = universe.to_vec();
    rng.shuffle(&mut pool);

    let q = (universe.len() as f64)
        .min(standard_normal(rng) + mean)
        .max(1.0)
        .round() as usize;
    pool.truncate(q.clamp(1, universe.len()));
    sort_by_universe(universe, &mut pool);
    pool
}

/// Box-Muller draw from N(0, 1).
fn standard_normal(rng: &mut Rng) -> f64 {
    let u1 = 1.0 - rng.f64(); // (0, 1]
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
