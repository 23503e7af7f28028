//! Core types, traits, and utilities for ghrepo.
//!
//! This crate provides the foundational abstractions used across all ghrepo crates:
//! - [`IOStreams`] for terminal I/O handling
//! - [`config::Settings`] and the [`config::Config`] trait for configuration
//! - [`credentials::resolve_token`] for locating the GitHub token
//! - [`prompter::Prompter`] trait for interactive prompts
//! - [`RepoRef`] for naming a repository

pub mod cmdutil;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod iostreams;
pub mod prompter;
pub mod repo;

pub use errors::CoreError;
pub use iostreams::IOStreams;
pub use repo::RepoRef;
