//! Text postprocessing: sentence splitting and bullet extraction.

mod postprocess;
mod sentences;

pub use postprocess::Postprocessor;
pub use sentences::{SentenceLanguage, SentenceSplitter};
