//! Storefront Kernel Library
//!
//! This library exposes kernel internals for integration testing.
//! The main entry point for running the server is the `storefront` binary.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::AppState;
