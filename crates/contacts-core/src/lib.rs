//! Core types and trait definitions for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod id;
pub mod store;

pub use contact::{Contact, ContactBody, ContactFields};
pub use error::{Error, Result};
pub use id::ContactId;
