pub mod aggregator;
pub mod donors;
#[allow(clippy::module_inception)]
pub mod engine;
