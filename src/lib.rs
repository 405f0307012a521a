pub mod config;
pub mod logging;
pub mod model;
pub mod output;
pub mod store;
pub mod tui;
pub mod validate;
