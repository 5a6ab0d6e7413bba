//! Module for reference classification.

/// The kind of a URI reference, as defined in
/// [Section 4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A URI, i.e. a reference with a scheme.
    Uri(UriKind),
    /// A relative reference, i.e. a reference without a scheme.
    Relative(RelativeKind),
}

/// The kind of a URI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UriKind {
    /// A URI with a fragment.
    Generic,
    /// An [absolute URI](https://datatracker.ietf.org/doc/html/rfc3986/#section-4.3),
    /// i.e. a URI without a fragment.
    Absolute,
}

/// The kind of a [relative reference](https://datatracker.ietf.org/doc/html/rfc3986/#section-4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelativeKind {
    /// A reference that begins with two slashes, e.g. `//example.com/a`.
    NetworkPath,
    /// A reference that begins with a single slash, e.g. `/a/b`.
    AbsolutePath,
    /// A reference that does not begin with a slash, e.g. `a/b` or `?q`.
    RelativePath,
    /// A [same-document reference](https://datatracker.ietf.org/doc/html/rfc3986/#section-4.4),
    /// i.e. an empty reference or a bare fragment.
    SameDocument,
}

impl ReferenceKind {
    /// Checks whether this is a URI.
    #[must_use]
    pub fn is_uri(self) -> bool {
        matches!(self, Self::Uri(_))
    }

    /// Checks whether this is a relative reference.
    #[must_use]
    pub fn is_relative(self) -> bool {
        matches!(self, Self::Relative(_))
    }
}

/// Classifies a reference by its components.
///
/// The rules are evaluated in order:
///
/// 1. A non-empty scheme makes a URI, generic if a fragment is present.
/// 2. A present host, even an empty one, makes a network-path reference.
/// 3. A path starting with `'/'` makes an absolute-path reference.
/// 4. An empty path with no query makes a same-document reference.
/// 5. Anything else is a relative-path reference.
///
/// A suffix reference such as `"example.com/a"` is not disambiguated
/// and classifies as whatever its components say.
///
/// # Examples
///
/// ```
/// use refuri::kind::{classify, ReferenceKind, RelativeKind};
///
/// assert_eq!(
///     classify(None, Some("x"), "", None, None),
///     ReferenceKind::Relative(RelativeKind::NetworkPath)
/// );
/// assert_eq!(
///     classify(None, None, "example.com/a", None, None),
///     ReferenceKind::Relative(RelativeKind::RelativePath)
/// );
/// ```
#[must_use]
pub fn classify(
    scheme: Option<&str>,
    host: Option<&str>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> ReferenceKind {
    if scheme.is_some_and(|s| !s.is_empty()) {
        if fragment.is_some() {
            ReferenceKind::Uri(UriKind::Generic)
        } else {
            ReferenceKind::Uri(UriKind::Absolute)
        }
    } else if host.is_some() {
        ReferenceKind::Relative(RelativeKind::NetworkPath)
    } else if path.starts_with('/') {
        ReferenceKind::Relative(RelativeKind::AbsolutePath)
    } else if path.is_empty() && query.is_none() {
        ReferenceKind::Relative(RelativeKind::SameDocument)
    } else {
        ReferenceKind::Relative(RelativeKind::RelativePath)
    }
}
