//! Library crate for member-admin.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, keymap and update loop (`app`)
//! - Command line options and logging setup (`cli`)
//! - Error and result types (`error`)
//! - Member records and the data source (`members`)
//! - Page arithmetic (`pagination`)
//! - In-memory search helpers (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `member-admin` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod members;
pub mod pagination;
pub mod search;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
