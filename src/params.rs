use crate::space::TextOption;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Category(TextOption),
    /// Duplicate-free, in universe order.
    Subset(Vec<i32>),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<TextOption> {
        match self {
            ParamValue::Category(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_subset(&self) -> Option<&[i32]> {
        match self {
            ParamValue::Subset(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Category(t) => write!(f, "{}", t),
            ParamValue::Subset(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(","))
            }
        }
    }
}

/// One assignment of values to parameters. Holds parameters only, never metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: BTreeMap<String, ParamValue>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.values.insert(name.into(), value)
    }

    /// Copy of `self` with one parameter replaced.
    pub fn with(&self, name: &str, value: ParamValue) -> Self {
        let mut next = self.clone();
        next.values.insert(name.to_string(), value);
        next
    }

    /// Parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(default)
    }

    pub fn option_or(&self, name: &str, default: TextOption) -> TextOption {
        self.get(name)
            .and_then(ParamValue::as_category)
            .unwrap_or(default)
    }
}

impl FromIterator<(String, ParamValue)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Quality figures attached to a configuration after cross-validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    /// Ranking key. Equal to `macro_f1`.
    pub score: f64,
    pub macro_f1: f64,
    pub weighted_f1: f64,
    pub accuracy: f64,
    /// Seconds per fold.
    pub time: f64,
}

/// A configuration admitted through the tabu set, waiting for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub params: Configuration,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredConfig {
    pub params: Configuration,
    pub code: String,
    pub metrics: ScoreMetadata,
}

impl ScoredConfig {
    pub fn score(&self) -> f64 {
        self.metrics.score
    }
}
