// Library exports for the binary and integration tests

pub mod catalog;
pub mod config;
pub mod matching;
pub mod pipeline;
pub mod scan;
