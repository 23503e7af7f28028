//! Command implementations for ghrepo.
//!
//! One module per mode plus the shared factory and owner lookup.

pub mod create;
pub mod delete;
pub mod factory;
pub mod owner;
pub mod request;

#[cfg(test)]
pub mod test_helpers;

pub use request::Request;
