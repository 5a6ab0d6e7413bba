//! Module for relativization.

use crate::{
    base::as_base,
    component::{BuildError, Components, ReferenceSource},
    path::HierarchicalPath,
    ri::UriRef,
};
use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::fmt;

/// An error occurred when relativizing a reference against a base.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelativizeError {
    /// The base is not [valid for a base](crate::base::is_valid_for_base).
    InvalidBase,
    /// The scheme, user, password, host or port of the reference
    /// differs from that of the base.
    UnrelatedReference,
    /// The reference lies outside the directory of the base,
    /// but ascending was not allowed.
    AscentNotAllowed,
    /// The reference has an empty host and an empty path, which no
    /// relative reference resolves to.
    UnreachablePath,
    /// The relative components do not form a legal reference.
    Build(BuildError),
}

impl fmt::Display for RelativizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidBase => "base is not a valid base URL",
            Self::UnrelatedReference => "reference does not share scheme and authority with base",
            Self::AscentNotAllowed => "reference is outside the base directory",
            Self::UnreachablePath => "reference path is unreachable from base",
            Self::Build(e) => return write!(f, "relative reference is invalid: {e}"),
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for RelativizeError {}

/// A configurable relativizer against a fixed base.
///
/// Path components are compared exactly, without any normalization.
/// Normalize both the reference and the base first if equivalent
/// spellings should be treated as equal.
///
/// # Examples
///
/// ```
/// use refuri::{relativize::{Relativizer, RelativizeError}, UriRef};
///
/// let base = UriRef::parse("https://github.com/apple/")?;
/// let r = UriRef::parse("https://github.com/microsoft/")?;
///
/// let relativizer = Relativizer::with_base(&base);
/// assert_eq!(relativizer.relativize(&r).unwrap_err(), RelativizeError::AscentNotAllowed);
///
/// let relativizer = relativizer.allow_ascending(true);
/// assert_eq!(relativizer.relativize(&r).unwrap(), "../microsoft/");
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Relativizer<'a, B: ?Sized> {
    base: &'a B,
    allow_ascending: bool,
}

impl<'a, B: ReferenceSource + ?Sized> Relativizer<'a, B> {
    /// Creates a new `Relativizer` with the given base.
    pub fn with_base(base: &'a B) -> Self {
        Self {
            base,
            allow_ascending: false,
        }
    }

    /// Sets whether the relative reference may start with `".."` components.
    ///
    /// This defaults to `false`.
    pub fn allow_ascending(mut self, value: bool) -> Self {
        self.allow_ascending = value;
        self
    }

    /// Computes the relative reference that resolves against the base to
    /// the given reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base is not valid, if the reference does not share
    /// the scheme and authority of the base, if ascending is needed but
    /// not allowed, or if the reference has an empty host and an empty path.
    pub fn relativize<R: ReferenceSource + ?Sized>(
        &self,
        r: &R,
    ) -> Result<UriRef<String>, RelativizeError> {
        let base = as_base(self.base).map_err(|_| RelativizeError::InvalidBase)?;
        if !is_relative_of(r, &base) {
            trace!("rejected reference unrelated to base {base}");
            return Err(RelativizeError::UnrelatedReference);
        }

        // The base path is never empty, so an empty path is only
        // reachable when a non-empty host makes it equivalent to "/".
        let r_path = match r.percent_encoded_path() {
            "" if base.host().is_some_and(|host| !host.is_empty()) => "/",
            "" => {
                trace!("rejected empty path unreachable from base {base}");
                return Err(RelativizeError::UnreachablePath);
            }
            path => path,
        };
        let base_path = base.path().as_str();

        let path = HierarchicalPath::new(r_path);
        let base_dir = HierarchicalPath::new(base_path).remove_non_directory_component();

        let is_root = path.is_root();
        let has_directory_path = is_root || path.has_directory_path();
        let components = path.into_components();

        let dir_len = if has_directory_path {
            components.len()
        } else {
            components.len().saturating_sub(1)
        };
        let common = components[..dir_len]
            .iter()
            .zip(base_dir.components())
            .take_while(|(a, b)| a == b)
            .count();
        let ascend = base_dir.components().len() - common;

        if ascend > 0 && !self.allow_ascending {
            trace!("rejected reference outside the directory of base {base}");
            return Err(RelativizeError::AscentNotAllowed);
        }

        let mut out: Vec<String> = Vec::with_capacity(ascend + components.len() - common);
        out.resize(ascend, "..".to_owned());
        out.extend(components.into_iter().skip(common));

        let query = r.percent_encoded_query();
        let fragment = r.percent_encoded_fragment();

        if out.is_empty() {
            // An empty path only resolves to the reference if it keeps the base path and query.
            let keep_empty = (query.is_some() || fragment.is_some())
                && r_path == base_path
                && (query.is_some() || base.query().is_none());
            if !keep_empty {
                out.push(".".to_owned());
            }
        }

        let path = HierarchicalPath::from_parts(false, out, has_directory_path)
            .normalize_relative_path_reference();

        Components {
            path: path.to_string(),
            query: query.map(ToOwned::to_owned),
            fragment: fragment.map(ToOwned::to_owned),
            ..Components::default()
        }
        .to_uri_ref()
        .map_err(RelativizeError::Build)
    }
}

/// Computes the relative reference that resolves against `base` to `r`.
///
/// This is a shorthand for [`Relativizer`].
///
/// # Errors
///
/// Returns `Err` on the same conditions as [`Relativizer::relativize`].
///
/// # Examples
///
/// ```
/// use refuri::{relativize::relativize, UriRef};
///
/// let base = UriRef::parse("https://github.com/apple/swift/")?;
/// let r = UriRef::parse("https://github.com/apple/swift/README.md")?;
/// assert_eq!(relativize(&r, &base, false).unwrap(), "README.md");
/// # Ok::<_, refuri::ParseError>(())
/// ```
pub fn relativize<R, B>(r: &R, base: &B, allow_ascending: bool) -> Result<UriRef<String>, RelativizeError>
where
    R: ReferenceSource + ?Sized,
    B: ReferenceSource + ?Sized,
{
    Relativizer::with_base(base)
        .allow_ascending(allow_ascending)
        .relativize(r)
}

/// Checks whether the reference shares scheme, user, password, host and port with the base.
///
/// Schemes are compared case-insensitively, everything else exactly.
fn is_relative_of<R, B>(r: &R, base: &B) -> bool
where
    R: ReferenceSource + ?Sized,
    B: ReferenceSource + ?Sized,
{
    let scheme_eq = match (r.scheme(), base.scheme()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (a, b) => a == b,
    };
    scheme_eq
        && r.percent_encoded_user() == base.percent_encoded_user()
        && r.percent_encoded_password() == base.percent_encoded_password()
        && r.percent_encoded_host() == base.percent_encoded_host()
        && r.port() == base.port()
}
