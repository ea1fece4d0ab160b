pub mod export;
pub mod report;
