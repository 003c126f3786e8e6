//! mkt is a line-oriented template language for scaffolding file trees.
//! A template describes macro substitutions, user-selectable command blocks
//! ("options"), and source to destination path mappings; it is parsed once
//! into an immutable model, then interpreted to copy files into a
//! destination tree and run the selected options.

/// Command-line interface module for the mkt application
pub mod cli;

/// Error types and handling for the mkt application
pub mod error;

/// Logger initialization
pub mod logger;

/// Preprocessing: comment stripping, macro extraction and expansion
pub mod macros;

/// Record classification of preprocessed lines into the parsed Template
pub mod parser;

/// Destination-tree population: glob expansion and idempotent copying
pub mod populate;

/// Shell dispatch of selected option scripts
pub mod runner;

/// Escape-aware text scanning primitives
pub mod scanner;

/// The parsed template read model
pub mod template;
