//! Persistent favicon store (SQLite via sqlx).
//!
//! Append-only and unique by resolved favicon URL.

pub mod db;
mod records;
pub mod types;

pub use db::*;
pub use types::*;

#[cfg(test)]
mod tests;
