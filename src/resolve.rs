//! Module for reference resolution.

use crate::{
    component::{BuildError, Components, ReferenceSource},
    ri::UriRef,
};
use alloc::{borrow::ToOwned, string::String};
use core::fmt;

/// An error occurred when resolving a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The base has no scheme.
    BaseWithoutScheme,
    /// The base has a fragment.
    BaseWithFragment,
    /// The base has no authority and its path is rootless, but the reference
    /// is relative and is neither empty nor a bare fragment.
    InvalidReferenceAgainstOpaqueBase,
    /// The resolved components do not form a legal reference.
    Build(BuildError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::BaseWithoutScheme => "base has no scheme",
            Self::BaseWithFragment => "base has a fragment",
            Self::InvalidReferenceAgainstOpaqueBase => {
                "relative reference must be empty or a bare fragment against an opaque base"
            }
            Self::Build(e) => return write!(f, "resolved reference is invalid: {e}"),
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ResolveError {}

/// Resolves the reference against the base as described in
/// [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2).
///
/// An underflowing `".."` is dropped. A resolved path starting with `"//"`
/// without an authority is prefixed with `"/."`, so that it does not read as one.
///
/// # Errors
///
/// Returns `Err` if the base has no scheme, if the base has a fragment,
/// or if the base is opaque and the reference is a non-empty relative
/// reference other than a bare fragment.
///
/// # Examples
///
/// ```
/// use refuri::{resolve::resolve, UriRef};
///
/// let base = UriRef::parse("http://example.com/foo/bar")?;
///
/// assert_eq!(resolve(&UriRef::parse("baz")?, &base).unwrap(), "http://example.com/foo/baz");
/// assert_eq!(resolve(&UriRef::parse("../baz")?, &base).unwrap(), "http://example.com/baz");
/// assert_eq!(resolve(&UriRef::parse("?baz")?, &base).unwrap(), "http://example.com/foo/bar?baz");
/// # Ok::<_, refuri::ParseError>(())
/// ```
pub fn resolve<R, B>(r: &R, base: &B) -> Result<UriRef<String>, ResolveError>
where
    R: ReferenceSource + ?Sized,
    B: ReferenceSource + ?Sized,
{
    let Some(base_scheme) = base.scheme().filter(|s| !s.is_empty()) else {
        return Err(ResolveError::BaseWithoutScheme);
    };
    if base.percent_encoded_fragment().is_some() {
        return Err(ResolveError::BaseWithFragment);
    }

    let r_scheme = r.scheme().filter(|s| !s.is_empty());
    let r_host = r.percent_encoded_host();
    let r_path = r.percent_encoded_path();
    let r_query = r.percent_encoded_query();

    let base_host = base.percent_encoded_host();
    let base_path = base.percent_encoded_path();

    if base_host.is_none()
        && !base_path.starts_with('/')
        && r_scheme.is_none()
        && !(r_host.is_none() && r_path.is_empty() && r_query.is_none())
    {
        return Err(ResolveError::InvalidReferenceAgainstOpaqueBase);
    }

    let mut t = Components {
        fragment: r.percent_encoded_fragment().map(ToOwned::to_owned),
        ..Components::default()
    };
    let mut buf = String::new();

    if let Some(r_scheme) = r_scheme {
        t.scheme = Some(r_scheme.to_owned());
        copy_authority(&mut t, r);
        t.path = if r_path.starts_with('/') {
            remove_dot_segments(&mut buf, r_path).to_owned()
        } else {
            r_path.to_owned()
        };
        t.query = r_query.map(ToOwned::to_owned);
    } else {
        if r_host.is_some() {
            copy_authority(&mut t, r);
            t.path = remove_dot_segments(&mut buf, r_path).to_owned();
            t.query = r_query.map(ToOwned::to_owned);
        } else {
            if r_path.is_empty() {
                t.path = if base_path.starts_with('/') {
                    remove_dot_segments(&mut buf, base_path).to_owned()
                } else {
                    base_path.to_owned()
                };
                t.query = r_query
                    .or_else(|| base.percent_encoded_query())
                    .map(ToOwned::to_owned);
            } else {
                if r_path.starts_with('/') {
                    t.path = remove_dot_segments(&mut buf, r_path).to_owned();
                } else {
                    // Instead of merging the paths, remove dot segments incrementally.
                    match base_path.rfind('/') {
                        Some(i) => {
                            // Swapping the order of resolution and normalization
                            // must not change the result.
                            let stripped = match classify_segment(&base_path[i + 1..]) {
                                SegKind::DoubleDot => base_path,
                                _ => &base_path[..=i],
                            };
                            remove_dot_segments(&mut buf, stripped);
                        }
                        None => buf.push('/'),
                    }
                    t.path = remove_dot_segments(&mut buf, r_path).to_owned();
                }
                t.query = r_query.map(ToOwned::to_owned);
            }
            copy_authority(&mut t, base);
        }
        t.scheme = Some(base_scheme.to_owned());
    }

    // Close the loophole in the original algorithm.
    if t.host.is_none() && t.path.starts_with("//") {
        t.path.insert_str(0, "/.");
    }

    t.to_uri_ref().map_err(ResolveError::Build)
}

fn copy_authority<S: ReferenceSource + ?Sized>(t: &mut Components, s: &S) {
    t.user = s.percent_encoded_user().map(ToOwned::to_owned);
    t.password = s.percent_encoded_password().map(ToOwned::to_owned);
    t.host = s.percent_encoded_host().map(ToOwned::to_owned);
    t.port = s.port();
}

/// Appends the path to the buffer, removing dot segments as it goes.
///
/// The buffer must be empty or end with `'/'`. A `".."` with nothing
/// to remove is dropped.
pub(crate) fn remove_dot_segments<'a>(buf: &'a mut String, path: &str) -> &'a str {
    for seg in path.split_inclusive('/') {
        let seg_stripped = seg.strip_suffix('/').unwrap_or(seg);
        match classify_segment(seg_stripped) {
            SegKind::Dot => truncate_to_last_slash(buf),
            SegKind::DoubleDot => {
                if buf.len() > 1 {
                    buf.pop();
                    truncate_to_last_slash(buf);
                }
            }
            SegKind::Normal => buf.push_str(seg),
        }
    }
    buf
}

fn truncate_to_last_slash(buf: &mut String) {
    let len = buf.rfind('/').map_or(0, |i| i + 1);
    buf.truncate(len);
}

enum SegKind {
    Dot,
    DoubleDot,
    Normal,
}

fn classify_segment(mut seg: &str) -> SegKind {
    if seg.is_empty() {
        return SegKind::Normal;
    }
    if let Some(rem) = seg.strip_prefix('.') {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2E") {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2e") {
        seg = rem;
    }
    if seg.is_empty() {
        SegKind::Dot
    } else if seg == "." || seg == "%2E" || seg == "%2e" {
        SegKind::DoubleDot
    } else {
        SegKind::Normal
    }
}
