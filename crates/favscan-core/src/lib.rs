pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod extract;
pub mod favicon_db;
pub mod fetch;
pub mod input;
pub mod resolver;
pub mod scan;
