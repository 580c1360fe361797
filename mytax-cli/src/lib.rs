pub mod claims;
pub mod cmd;
pub mod config;
pub mod form;
pub mod logging;
pub mod report;
pub mod utils;
