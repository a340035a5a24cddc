pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;
