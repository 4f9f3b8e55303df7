//! Canonical textual codes for configurations.
//!
//! A code is `name1=value1-name2=value2-...` with names in sorted order and
//! whitespace removed. It is write-only: used as a set key and as a filename
//! stem, never parsed back.

use crate::params::Configuration;

pub const SEPARATOR: &str = "-";

pub fn encode(config: &Configuration) -> String {
    encode_with_basename(config, None)
}

pub fn encode_with_basename(config: &Configuration, basename: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(config.len() + 1);
    if let Some(base) = basename.filter(|b| !b.is_empty()) {
        parts.push(base.to_string());
    }

    // Configuration iterates in name order.
    for (name, value) in config.iter() {
        let pair: String = format!("{}={}", name, value)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        parts.push(pair);
    }

    parts.join(SEPARATOR)
}
