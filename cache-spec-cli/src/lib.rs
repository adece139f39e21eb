// Cache specification command-line support library

pub mod input;
pub mod report;

use cache_spec::CacheSpec;

use crate::input::SpecLine;
use crate::report::CheckOutcome;

/// Parses every specification, keeping going after failures.
pub fn check_all(specs: &[SpecLine]) -> Vec<CheckOutcome> {
    specs
        .iter()
        .map(|line| CheckOutcome {
            origin: line.origin.clone(),
            result: CacheSpec::parse(&line.text),
        })
        .collect()
}
