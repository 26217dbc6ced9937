pub mod analytics_service;
pub mod chart_service;
pub mod export;
pub mod insights_engine;
pub mod user_directory;
