pub mod analytics;
pub mod cash;
pub mod chart;
pub mod portfolio;
pub mod settings;
pub mod stock;
