// TOS Analyzer Core Services

pub mod analysis;
pub mod config_store;
pub mod input;
pub mod report;
pub mod sentence_segmenter;
pub mod text_processor;

pub use analysis::{analyze, RiskAnalyzer};
pub use config_store::*;
pub use input::*;
pub use report::*;
pub use sentence_segmenter::*;
pub use text_processor::*;
