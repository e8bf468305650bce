pub mod compress;
pub mod hook;
pub mod single;
pub mod support;
