//! Git command wrapper for ghrepo.

pub mod client;
pub mod errors;
pub mod local;
pub mod stub;

pub use client::GitClient;
pub use errors::GitError;
pub use local::LocalRepo;
pub use stub::{GitCall, StubLocalRepo};
