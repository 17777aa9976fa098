pub mod collector;
pub mod fields;
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
pub mod normalize;
pub mod planner;
pub mod report;
pub mod run_log;
pub mod sink;
