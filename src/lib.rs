pub mod cleaner;
pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod session;
