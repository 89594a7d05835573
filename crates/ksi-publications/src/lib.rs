//! Publications file handling for keyless timestamp signatures
//!
//! A publications file is the operator-signed list of every publication the
//! calendar has made. It is the trust root used to extend and verify
//! signatures offline.
//!
//! # Example
//!
//! ```no_run
//! use ksi_publications::PublicationsFile;
//!
//! let file = PublicationsFile::from_file("publications.json").unwrap();
//! if let Some(latest) = file.latest() {
//!     println!("latest publication: {}", latest.published_data);
//! }
//! ```

pub mod cache;
pub mod error;
pub mod file;
pub mod resolve;

pub use cache::{default_cache_dir, PublicationsCache, DEFAULT_TTL};
pub use error::{Error, Result};
pub use file::{FileSignature, PublicationsFile};
pub use resolve::{
    anchor_for_reference, is_extended, resolve_by_reference, resolve_by_time, TrustAnchor,
};
