//! Reference components and the adapter interface for URL types.

use crate::{
    kind::{self, ReferenceKind},
    pct_enc::{table::*, Decode},
    ri::UriRef,
    ParseError,
};
use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
};
use core::fmt;

/// An error occurred when materializing [`Components`] into a [`UriRef`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The scheme does not match the `scheme` ABNF rule.
    InvalidScheme,
    /// The user or password contains a character not allowed in userinfo,
    /// or the user contains a colon.
    InvalidUserinfo,
    /// The host is neither a registered name nor an IP literal.
    InvalidHost,
    /// The path contains a character not allowed in a path.
    InvalidPath,
    /// The query contains a character not allowed in a query.
    InvalidQuery,
    /// The fragment contains a character not allowed in a fragment.
    InvalidFragment,
    /// A user, password, or port is present without a host.
    MissingHost,
    /// Host is present, but the path is not empty and does not start with `'/'`.
    NonemptyRootlessPath,
    /// Host is not present, but the path starts with `"//"`.
    PathStartsWithDoubleSlash,
    /// Neither scheme nor host is present, but the first path segment contains `':'`.
    FirstPathSegmentContainsColon,
    /// The serialized reference failed to parse.
    Unparseable(ParseError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidUserinfo => "invalid user or password",
            Self::InvalidHost => "invalid host",
            Self::InvalidPath => "invalid path",
            Self::InvalidQuery => "invalid query",
            Self::InvalidFragment => "invalid fragment",
            Self::MissingHost => "user, password or port present without host",
            Self::NonemptyRootlessPath => {
                "when host is present, path should either be empty or start with '/'"
            }
            Self::PathStartsWithDoubleSlash => {
                "when host is not present, path should not start with \"//\""
            }
            Self::FirstPathSegmentContainsColon => {
                "when neither scheme nor host is present, first path segment should not contain ':'"
            }
            Self::Unparseable(e) => return write!(f, "serialized reference is invalid: {e}"),
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for BuildError {}

/// A snapshot of the components of a URI reference.
///
/// Every textual field holds the *percent-encoded* form of its component.
/// The `decoded_*` methods give the decoded view.
///
/// A `Components` is a plain value: it may describe something that is not a
/// legal reference, in which case [`to_uri_ref`](Self::to_uri_ref) fails.
///
/// # Examples
///
/// ```
/// use refuri::{component::Components, UriRef};
///
/// let c = Components {
///     scheme: Some("https".into()),
///     host: Some("example.com".into()),
///     path: "/caf%C3%A9".into(),
///     query: Some("q=1".into()),
///     ..Default::default()
/// };
/// assert_eq!(c.decoded_path(), "/café");
/// assert_eq!(c.to_uri_ref().unwrap(), "https://example.com/caf%C3%A9?q=1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Components {
    /// The scheme. An empty scheme counts as absent.
    pub scheme: Option<String>,
    /// The user name, i.e. the userinfo before its first colon.
    pub user: Option<String>,
    /// The password, i.e. the userinfo after its first colon.
    pub password: Option<String>,
    /// The host. `Some("")` denotes an empty authority such as in `file:///`.
    pub host: Option<String>,
    /// The port.
    pub port: Option<u16>,
    /// The path.
    pub path: String,
    /// The query.
    pub query: Option<String>,
    /// The fragment.
    pub fragment: Option<String>,
}

fn decoded(s: &str) -> Cow<'_, str> {
    Decode::new(s).to_string_lossy()
}

impl Components {
    /// Returns the decoded user name.
    #[must_use]
    pub fn decoded_user(&self) -> Option<Cow<'_, str>> {
        self.user.as_deref().map(decoded)
    }

    /// Returns the decoded password.
    #[must_use]
    pub fn decoded_password(&self) -> Option<Cow<'_, str>> {
        self.password.as_deref().map(decoded)
    }

    /// Returns the decoded host.
    #[must_use]
    pub fn decoded_host(&self) -> Option<Cow<'_, str>> {
        self.host.as_deref().map(decoded)
    }

    /// Returns the decoded path.
    #[must_use]
    pub fn decoded_path(&self) -> Cow<'_, str> {
        decoded(&self.path)
    }

    /// Returns the decoded query.
    #[must_use]
    pub fn decoded_query(&self) -> Option<Cow<'_, str>> {
        self.query.as_deref().map(decoded)
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn decoded_fragment(&self) -> Option<Cow<'_, str>> {
        self.fragment.as_deref().map(decoded)
    }

    /// Checks whether a non-empty scheme is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.scheme.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Materializes the components into a [`UriRef`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if any component is improperly encoded or if the
    /// components cannot be combined into a legal URI reference.
    pub fn to_uri_ref(&self) -> Result<UriRef<String>, BuildError> {
        let scheme = self.scheme.as_deref().filter(|s| !s.is_empty());
        let host = self.host.as_deref();

        if let Some(scheme) = scheme {
            if !scheme.as_bytes()[0].is_ascii_alphabetic() || !SCHEME.validate(scheme.as_bytes())
            {
                return Err(BuildError::InvalidScheme);
            }
        }

        if host.is_none() && (self.user.is_some() || self.password.is_some() || self.port.is_some())
        {
            return Err(BuildError::MissingHost);
        }
        if let Some(user) = &self.user {
            if !USER.validate(user.as_bytes()) {
                return Err(BuildError::InvalidUserinfo);
            }
        }
        if let Some(password) = &self.password {
            if !USERINFO.validate(password.as_bytes()) {
                return Err(BuildError::InvalidUserinfo);
            }
        }
        if let Some(host) = host {
            if !is_valid_host(host) {
                return Err(BuildError::InvalidHost);
            }
        }

        let path = self.path.as_str();
        if !PATH.validate(path.as_bytes()) {
            return Err(BuildError::InvalidPath);
        }
        if let Some(query) = &self.query {
            if !QUERY.validate(query.as_bytes()) {
                return Err(BuildError::InvalidQuery);
            }
        }
        if let Some(fragment) = &self.fragment {
            if !FRAGMENT.validate(fragment.as_bytes()) {
                return Err(BuildError::InvalidFragment);
            }
        }

        if host.is_some() {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(BuildError::NonemptyRootlessPath);
            }
        } else if path.starts_with("//") {
            return Err(BuildError::PathStartsWithDoubleSlash);
        } else if scheme.is_none() && path.split('/').next().is_some_and(|s| s.contains(':')) {
            return Err(BuildError::FirstPathSegmentContainsColon);
        }

        let mut buf = String::new();
        if let Some(scheme) = scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        if let Some(host) = host {
            buf.push_str("//");
            if self.user.is_some() || self.password.is_some() {
                buf.push_str(self.user.as_deref().unwrap_or_default());
                if let Some(password) = &self.password {
                    buf.push(':');
                    buf.push_str(password);
                }
                buf.push('@');
            }
            buf.push_str(host);
            if let Some(port) = self.port {
                use core::fmt::Write;
                let _ = write!(buf, ":{port}");
            }
        }
        buf.push_str(path);
        if let Some(query) = &self.query {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }

        UriRef::parse_from(buf).map_err(|(_, e)| BuildError::Unparseable(e))
    }
}

fn is_valid_host(host: &str) -> bool {
    match host.strip_prefix('[') {
        Some(rem) => rem
            .strip_suffix(']')
            .is_some_and(|inner| !inner.is_empty() && IP_LITERAL.validate(inner.as_bytes())),
        None => REG_NAME.validate(host.as_bytes()),
    }
}

/// A read-only view of the components of a URI reference.
///
/// This is the only interface through which the operations of this crate
/// read a reference, so that any URL type can take part in them by
/// implementing one accessor per component. Implementations are provided
/// for [`Components`], [`UriRef`], and, with the `url` feature, `url::Url`.
///
/// Every textual accessor returns the percent-encoded form of its component.
pub trait ReferenceSource {
    /// Returns the scheme.
    fn scheme(&self) -> Option<&str>;

    /// Returns the percent-encoded user name.
    fn percent_encoded_user(&self) -> Option<&str>;

    /// Returns the percent-encoded password.
    fn percent_encoded_password(&self) -> Option<&str>;

    /// Returns the percent-encoded host, `Some("")` for an empty authority.
    fn percent_encoded_host(&self) -> Option<&str>;

    /// Returns the port.
    fn port(&self) -> Option<u16>;

    /// Returns the percent-encoded path.
    fn percent_encoded_path(&self) -> &str;

    /// Returns the percent-encoded query.
    fn percent_encoded_query(&self) -> Option<&str>;

    /// Returns the percent-encoded fragment.
    fn percent_encoded_fragment(&self) -> Option<&str>;

    /// Takes a [`Components`] snapshot of the reference.
    fn to_components(&self) -> Components {
        Components {
            scheme: self.scheme().map(ToOwned::to_owned),
            user: self.percent_encoded_user().map(ToOwned::to_owned),
            password: self.percent_encoded_password().map(ToOwned::to_owned),
            host: self.percent_encoded_host().map(ToOwned::to_owned),
            port: self.port(),
            path: self.percent_encoded_path().to_owned(),
            query: self.percent_encoded_query().map(ToOwned::to_owned),
            fragment: self.percent_encoded_fragment().map(ToOwned::to_owned),
        }
    }

    /// Classifies the reference with [`kind::classify`].
    fn kind(&self) -> ReferenceKind {
        kind::classify(
            self.scheme(),
            self.percent_encoded_host(),
            self.percent_encoded_path(),
            self.percent_encoded_query(),
            self.percent_encoded_fragment(),
        )
    }

    /// Checks whether the reference can serve as a base URL.
    ///
    /// See [`base::is_valid_for_base`](crate::base::is_valid_for_base).
    fn is_valid_for_base(&self) -> bool {
        crate::base::is_valid_for_base(self)
    }
}

impl ReferenceSource for Components {
    fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    fn percent_encoded_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn percent_encoded_password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn percent_encoded_host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn percent_encoded_path(&self) -> &str {
        &self.path
    }

    fn percent_encoded_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn percent_encoded_fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    fn to_components(&self) -> Components {
        self.clone()
    }
}

#[cfg(feature = "url")]
impl ReferenceSource for url::Url {
    fn scheme(&self) -> Option<&str> {
        Some(url::Url::scheme(self))
    }

    fn percent_encoded_user(&self) -> Option<&str> {
        if !self.has_authority() {
            return None;
        }
        let user = self.username();
        (!user.is_empty() || self.password().is_some()).then_some(user)
    }

    fn percent_encoded_password(&self) -> Option<&str> {
        self.password()
    }

    fn percent_encoded_host(&self) -> Option<&str> {
        self.has_authority().then(|| self.host_str().unwrap_or_default())
    }

    fn port(&self) -> Option<u16> {
        url::Url::port(self)
    }

    fn percent_encoded_path(&self) -> &str {
        url::Url::path(self)
    }

    fn percent_encoded_query(&self) -> Option<&str> {
        url::Url::query(self)
    }

    fn percent_encoded_fragment(&self) -> Option<&str> {
        url::Url::fragment(self)
    }
}
