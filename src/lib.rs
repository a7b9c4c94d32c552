pub mod app;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod external;
pub mod onboarding;
pub mod state;
pub mod store;
pub mod tracker;
