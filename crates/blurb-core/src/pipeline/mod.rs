//! Product copy pipeline.
//!
//! Stages run strictly in sequence:
//! load records, build queries, batch, complete, merge, postprocess, report.

pub mod processor;

pub use processor::{ProcessOutput, ProductProcessor, RunOutput};
