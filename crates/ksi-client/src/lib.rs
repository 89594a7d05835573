//! Service clients for keyless timestamp signatures
//!
//! This crate talks to the two remote services the verification and
//! extension procedures need:
//!
//! - the extender, which returns a calendar hash chain from a signature's
//!   aggregation time to a later publication time
//! - the publications file endpoint, which serves the operator-signed list
//!   of publications
//!
//! Both are reached through traits so callers can substitute in-process
//! implementations.

pub mod config;
pub mod error;
pub mod extender;
pub mod publications;

pub use config::{ServiceEndpoints, ServiceSettings};
pub use error::{Error, Result};
pub use extender::{
    ExtendRequest, ExtendResponse, ExtendService, ExtenderClient, UnconfiguredExtender,
};
pub use publications::{
    trusted_key, LocalPublications, PublicationsClient, PublicationsSource, RemotePublications,
    UnconfiguredPublications,
};

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the service traits
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
