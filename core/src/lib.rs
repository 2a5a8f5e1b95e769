pub mod case;
pub mod config;
pub mod report;

pub mod error;
