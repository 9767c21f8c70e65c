//! AIM command line front end
//!
//! Library half of the `aim` binary: option loading, document file I/O and
//! the subcommands, kept here so they can be tested without a process.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;

pub use commands::{check, migrate, schema, CheckReport, MigrateRequest, SchemaKind};
pub use config::{load_options, OptionOverrides};
