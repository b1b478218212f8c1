//! assetctl - command-line client for a remote asset repository
//!
//! This library provides the command dispatch, delete/find/list
//! workflows, report formatting, and the repository connection
//! capability used by the `assetctl` binary.

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod prompt;
pub mod report;
pub mod repository;

pub use client::App;
pub use error::{ClientError, Result};
