pub mod registry;
pub mod traits;

// API provider implementations
pub mod rter;
pub mod twse;
pub mod yahoo_finance;
