pub mod predict;
pub mod search;

use paramforge::error::{PfError, PfResult};
use paramforge::textmodel::Language;

pub fn parse_language(name: Option<&str>) -> PfResult<Option<Language>> {
    name.map(|n| {
        n.parse::<Language>()
            .map_err(|_| PfError::Config(format!("Unknown language '{}'", n)))
    })
    .transpose()
}
