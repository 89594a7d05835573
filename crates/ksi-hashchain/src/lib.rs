//! Hash chain recomputation for keyless timestamp signatures
//!
//! This crate recomputes aggregation and calendar hash chains and checks
//! that the pieces of a signature fit together: the aggregation root feeds
//! the calendar chain, and the calendar root equals a published hash.

pub mod chain;
pub mod error;
pub mod step;

pub use chain::{
    aggregation_root, calendar_root, compute_chain, verify_calendar_input,
    verify_calendar_publication,
};
pub use error::{Error, Result};
pub use step::{hash_pair, hash_step};
