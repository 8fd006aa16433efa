//! Ingrid - map INI files line by line from the command line.
//!
//! This crate provides the `ingrid` binary. The parsing itself lives in the
//! [`ingrid`] library.

#![forbid(unsafe_code)]

pub mod cli;
pub mod output;
