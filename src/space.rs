use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Name of the single ordered-subset parameter.
pub const TOKEN_LIST: &str = "token_list";

/// Token-list universe: negative entries are word n-grams, positive are char q-grams.
pub const TOKEN_UNIVERSE: [i32; 9] = [-2, -1, 1, 2, 3, 4, 5, 6, 7];

/// How a class of special tokens (numbers, users, urls, stopwords) is treated.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TextOption {
    Delete,
    Group,
    None,
}

impl TextOption {
    /// Domain order used by the registries: delete, group, none.
    pub fn all() -> Vec<TextOption> {
        TextOption::iter().collect()
    }
}

/// Puts `items` back into the order they appear in `universe`. Items outside
/// the universe go last.
pub fn sort_by_universe(universe: &[i32], items: &mut [i32]) {
    items.sort_unstable_by_key(|v| {
        universe
            .iter()
            .position(|u| u == v)
            .unwrap_or(usize::MAX)
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    Boolean,
    Category(Vec<TextOption>),
    /// Ordered universe; chosen subsets keep this order.
    Subset(Vec<i32>),
}

impl Domain {
    pub fn len(&self) -> usize {
        match self {
            Domain::Boolean => 2,
            Domain::Category(tags) => tags.len(),
            Domain::Subset(universe) => universe.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable name -> domain registry, iterated in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpace {
    entries: BTreeMap<String, Domain>,
    language: bool,
}

impl ParameterSpace {
    /// Language-independent preprocessing switches plus the token list.
    pub fn base() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("strip_diac".to_string(), Domain::Boolean);
        entries.insert(
            "num_option".to_string(),
            Domain::Category(TextOption::all()),
        );
        entries.insert(
            "usr_option".to_string(),
            Domain::Category(TextOption::all()),
        );
        entries.insert(
            "url_option".to_string(),
            Domain::Category(TextOption::all()),
        );
        entries.insert("lc".to_string(), Domain::Boolean);
        entries.insert("del_dup1".to_string(), Domain::Boolean);
        entries.insert(
            TOKEN_LIST.to_string(),
            Domain::Subset(TOKEN_UNIVERSE.to_vec()),
        );
        Self {
            entries,
            language: false,
        }
    }

    /// Base space plus negation, stemming and stopword handling.
    pub fn with_language() -> Self {
        let mut space = Self::base();
        space
            .entries
            .insert("negation".to_string(), Domain::Boolean);
        space
            .entries
            .insert("stemming".to_string(), Domain::Boolean);
        space.entries.insert(
            "stopwords".to_string(),
            Domain::Category(TextOption::all()),
        );
        space.language = true;
        space
    }

    pub fn for_language(language: bool) -> Self {
        if language {
            Self::with_language()
        } else {
            Self::base()
        }
    }

    /// Builds a custom registry. Used for narrowed searches and tests.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Domain)>,
    {
        let entries: BTreeMap<String, Domain> = entries.into_iter().collect();
        let language = ["negation", "stemming", "stopwords"]
            .iter()
            .any(|k| entries.contains_key(*k));
        Self { entries, language }
    }

    pub fn domain_for(&self, name: &str) -> Option<&Domain> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Domain)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_language(&self) -> bool {
        self.language
    }
}
