pub mod api;
pub mod complexity;
pub mod config;
pub mod error;
pub mod job;
pub mod metrics;
pub mod productivity;
pub mod quote;
pub mod rates;
pub mod stitch;
