pub mod age;
pub mod cohort;
pub mod config;
pub mod domain;
pub mod output;
pub mod scoring;
pub mod tables;
pub mod types;
