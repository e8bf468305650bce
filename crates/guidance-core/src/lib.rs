//! Guidance Core Library
//!
//! Selection, compression and versioned-output pipeline for keeping a corpus
//! of guidance documents under a size budget.

pub mod compressor;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod header;
pub mod logging;
pub mod orchestrator;
pub mod pipeline;
pub mod report;
pub mod select;
pub mod versioned;
