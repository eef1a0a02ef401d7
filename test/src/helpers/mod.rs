pub mod recorder;

pub use recorder::Recorder;
pub use test_harness::{init_logging, TestHarness};
