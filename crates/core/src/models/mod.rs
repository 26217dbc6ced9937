pub mod analytics;
pub mod budget;
pub mod chart;
pub mod forum;
pub mod goal;
pub mod insights;
pub mod lenient;
pub mod settings;
pub mod transaction;
pub mod user;
pub mod view;
