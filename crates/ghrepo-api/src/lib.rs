//! GitHub REST client and repository endpoints for ghrepo.

pub mod client;
pub mod errors;
pub mod http;
pub mod repos;

pub use client::Client;
pub use errors::ApiError;
