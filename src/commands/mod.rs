//! CLI commands for guidance-compress

pub mod compress;
pub mod config;
pub mod dispatch;
pub mod hook;
pub mod interrupt;
pub mod single;
