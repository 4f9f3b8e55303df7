use crate::params::{Configuration, ParamValue};
use crate::space::{sort_by_universe, Domain, ParameterSpace};

/// Every configuration one atomic change away from `config`.
///
/// Parameters are visited in name order, so equal inputs give equal
/// sequences. Parameters the space does not declare are never touched.
pub fn expand(space: &ParameterSpace, config: &Configuration) -> Vec<Configuration> {
    let mut out = Vec::new();
    for (name, value) in config.iter() {
        if let Some(domain) = space.domain_for(name) {
            expand_param(config, name, value, domain, &mut out);
        }
    }
    out
}

/// Number of neighbors `expand` would return, without building them.
pub fn count(space: &ParameterSpace, config: &Configuration) -> usize {
    config
        .iter()
        .filter_map(|(name, value)| {
            let domain = space.domain_for(name)?;
            Some(match (domain, value) {
                (Domain::Boolean, ParamValue::Bool(_)) => 1,
                (Domain::Category(tags), ParamValue::Category(v)) => {
                    tags.iter().filter(|t| *t != v).count()
                }
                (Domain::Subset(universe), ParamValue::Subset(current)) => {
                    current.len() + universe.iter().filter(|u| !current.contains(u)).count()
                }
                _ => 0,
            })
        })
        .sum()
}

fn expand_param(
    config: &Configuration,
    name: &str,
    value: &ParamValue,
    domain: &Domain,
    out: &mut Vec<Configuration>,
) {
    match (domain, value) {
        (Domain::Boolean, ParamValue::Bool(b)) => {
            out.push(config.with(name, ParamValue::Bool(!b)));
        }
        (Domain::Category(tags), ParamValue::Category(current)) => {
            for tag in tags.iter().filter(|t| *t != current) {
                out.push(config.with(name, ParamValue::Category(*tag)));
            }
        }
        (Domain::Subset(universe), ParamValue::Subset(current)) => {
            // Removals, left to right
            for i in 0..current.len() {
                let mut next = current.clone();
                next.remove(i);
                out.push(config.with(name, ParamValue::Subset(next)));
            }

            // Additions, in universe order; the result keeps universe order too
            for &item in universe.iter().filter(|u| !current.contains(u)) {
                let mut next = current.clone();
                next.push(item);
                sort_by_universe(universe, &mut next);
                out.push(config.with(name, ParamValue::Subset(next)));
            }
        }
        // Value does not match its declared domain kind.
        _ => {}
    }
}
