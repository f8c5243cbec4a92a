pub mod analyze;
pub mod quote;
pub mod rates;
