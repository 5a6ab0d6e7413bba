#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Classification, normalization and relativization of URI references
//! as defined in IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! **Examples:** [Parsing](UriRef#examples). [Classification](kind::classify).
//! [Normalization](normalize::Normalizer#examples). [Relativization](relativize::Relativizer#examples).
//! [Resolution](resolve::resolve#examples).
//!
//! Every operation reads a reference through the [`ReferenceSource`] trait,
//! which is implemented for the crate's own [`UriRef`], for the plain
//! [`Components`] record and, with the `url` feature, for `url::Url`.
//!
//! # Crate features
//!
//! - `std` (default): Enables `std` support. Implies `impl-error`.
//!
//! - `impl-error` (default): Implements [`Error`] for error types.
//!
//! - `serde`: Implements [`Serialize`] and [`Deserialize`] for
//!   [`UriRef`], [`HierarchicalPath`] and [`PortTable`].
//!
//! - `tracing`: Emits [`tracing`] events when an operation rejects an
//!   input or falls back to the original reference.
//!
//! - `url`: Implements [`ReferenceSource`] for `url::Url`.
//!
//! [`Error`]: core::error::Error
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [`tracing`]: https://docs.rs/tracing
//! [`ReferenceSource`]: component::ReferenceSource
//! [`Components`]: component::Components
//! [`HierarchicalPath`]: path::HierarchicalPath
//! [`PortTable`]: port::PortTable

extern crate alloc;

#[cfg(feature = "impl-error")]
use core::error::Error;

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

pub mod base;
pub mod component;
pub mod kind;
pub mod normalize;
pub mod path;
pub mod pct_enc;
pub mod port;
pub mod relativize;
pub mod resolve;

mod parse;
mod ri;

pub use parse::{ParseError, ParseErrorKind};
pub use ri::UriRef;
