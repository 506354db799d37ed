//! cookbook-index: Client for a remote cookbook index service
//!
//! This crate provides:
//! - Named cookbook lookup against the index HTTP API
//! - Classification of "not found" versus genuine service failures
//! - Lazy, memoized resolution of individual cookbook versions
//! - Normalization of version locators into canonical version strings

pub mod cache;
pub mod client;
pub mod config;
pub mod cookbook;
pub mod error;
pub mod locator;
pub mod payload;
pub mod session;
pub mod version;

pub use client::CookbookClient;
pub use config::ClientConfig;
pub use cookbook::Cookbook;
pub use error::{Error, Result};
pub use version::Version;
