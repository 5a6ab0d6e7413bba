//! Module for base URLs.

use crate::{component::ReferenceSource, ri::UriRef};
use alloc::string::String;
use core::fmt;

/// An error occurred when deriving a base URL from a reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BaseError {
    /// The reference cannot serve as a base URL.
    NotAValidBase,
}

impl fmt::Display for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotAValidBase => "reference is not a valid base URL",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for BaseError {}

/// Checks whether the reference can serve as a base URL.
///
/// This is the case when a scheme and a host are present, and the host is
/// either non-empty or followed by an absolute path.
///
/// # Examples
///
/// ```
/// use refuri::{base::is_valid_for_base, UriRef};
///
/// assert!(is_valid_for_base(&UriRef::parse("https://example.com")?));
/// assert!(is_valid_for_base(&UriRef::parse("file:///etc/hosts")?));
/// assert!(!is_valid_for_base(&UriRef::parse("file://")?));
/// assert!(!is_valid_for_base(&UriRef::parse("mailto:user@example.com")?));
/// assert!(!is_valid_for_base(&UriRef::parse("//example.com/")?));
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[must_use]
pub fn is_valid_for_base<R: ReferenceSource + ?Sized>(r: &R) -> bool {
    let has_scheme = r.scheme().is_some_and(|s| !s.is_empty());
    match r.percent_encoded_host() {
        Some(host) => has_scheme && (!host.is_empty() || r.percent_encoded_path().starts_with('/')),
        None => false,
    }
}

/// Derives a base URL from the reference.
///
/// The fragment is removed and an empty path is replaced with `"/"`.
///
/// # Errors
///
/// Returns `Err` if the reference is not [valid for a base](is_valid_for_base).
///
/// # Examples
///
/// ```
/// use refuri::{base::{as_base, BaseError}, UriRef};
///
/// let base = as_base(&UriRef::parse("https://example.com?q=1#frag")?);
/// assert_eq!(base.unwrap(), "https://example.com/?q=1");
///
/// let base = as_base(&UriRef::parse("a/b")?);
/// assert_eq!(base.unwrap_err(), BaseError::NotAValidBase);
/// # Ok::<_, refuri::ParseError>(())
/// ```
pub fn as_base<R: ReferenceSource + ?Sized>(r: &R) -> Result<UriRef<String>, BaseError> {
    if !is_valid_for_base(r) {
        trace!("rejected base URL without scheme or host");
        return Err(BaseError::NotAValidBase);
    }

    let mut c = r.to_components();
    c.fragment = None;
    if c.path.is_empty() {
        c.path.push('/');
    }
    c.to_uri_ref().map_err(|e| {
        trace!("rejected malformed base URL: {e}");
        BaseError::NotAValidBase
    })
}
