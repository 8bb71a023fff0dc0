pub mod analyzers;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod output;
pub mod report;
pub mod runner;
