//! Business logic for campus-rs.
//!
//! Services own repositories and enforce the role model: every mutating
//! operation loads the acting user and checks an [`authorization`] predicate
//! before touching the database.

pub mod authorization;
pub mod services;

pub use services::*;
