use crate::{
    component::{Components, ReferenceSource},
    kind::ReferenceKind,
    parse::{self, AuthMeta, Meta, ParseError},
    pct_enc::{
        encoder::{Fragment, Path, Query, RegName, User, Userinfo},
        EStr,
    },
    resolve,
};
use alloc::{borrow::ToOwned, string::String};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{borrow::Borrow, cmp::Ordering, fmt, hash, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [URI reference] defined in RFC 3986.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// This is the concrete reference type of this crate. It is either borrowed
/// (`UriRef<&str>`) or owned (`UriRef<String>`), and lifetimes are handled
/// so that a `UriRef<&'a str>` outputs references with lifetime `'a`
/// (thanks to [`borrow-or-share`](borrow_or_share)).
///
/// # Examples
///
/// ```
/// use refuri::{kind::{ReferenceKind, UriKind}, UriRef};
///
/// let r = UriRef::parse("https://user:pw@example.com:8080/a/b?q#f")?;
/// assert_eq!(r.scheme(), Some("https"));
/// assert_eq!(r.user().unwrap(), "user");
/// assert_eq!(r.password().unwrap(), "pw");
/// assert_eq!(r.host().unwrap(), "example.com");
/// assert_eq!(r.port(), Some(8080));
/// assert_eq!(r.path(), "/a/b");
/// assert_eq!(r.query().unwrap(), "q");
/// assert_eq!(r.fragment().unwrap(), "f");
/// assert_eq!(r.kind(), ReferenceKind::Uri(UriKind::Generic));
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[derive(Clone, Copy, Default)]
pub struct UriRef<T> {
    val: T,
    meta: Meta,
}

impl<'a> UriRef<&'a str> {
    /// Parses a URI reference from a string slice.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`URI-reference`] ABNF rule from RFC 3986.
    ///
    /// [`URI-reference`]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
    pub fn parse(s: &'a str) -> Result<Self, ParseError> {
        parse::parse(s.as_bytes()).map(|meta| UriRef { val: s, meta })
    }

    /// Creates a new `UriRef<String>` by cloning the contents of this `UriRef<&str>`.
    #[must_use]
    pub fn to_owned(&self) -> UriRef<String> {
        UriRef {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl UriRef<String> {
    /// Parses a URI reference from an owned string.
    ///
    /// # Errors
    ///
    /// Returns `Err` along with the input if the string does not match the
    /// [`URI-reference`] ABNF rule from RFC 3986.
    ///
    /// [`URI-reference`]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
    pub fn parse_from(s: String) -> Result<Self, (String, ParseError)> {
        match parse::parse(s.as_bytes()) {
            Ok(meta) => Ok(UriRef { val: s, meta }),
            Err(e) => Err((s, e)),
        }
    }

    /// Consumes this `UriRef<String>` and yields the underlying [`String`].
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }

    /// Borrows this `UriRef<String>` as a `UriRef<&str>`.
    #[must_use]
    pub fn borrow(&self) -> UriRef<&str> {
        UriRef {
            val: &self.val,
            meta: self.meta,
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> UriRef<T> {
    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// Returns the optional [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o str> {
        let end = self.meta.scheme_end?.get();
        Some(&self.as_str()[..end])
    }

    fn auth_start(&self) -> usize {
        self.meta.scheme_end.map_or(0, |i| i.get() + 1) + 2
    }

    /// Returns the optional [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Option<&'o str> {
        self.meta.auth_meta?;
        Some(&self.as_str()[self.auth_start()..self.meta.path_bounds.0])
    }

    fn auth_meta(&self) -> Option<AuthMeta> {
        self.meta.auth_meta
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn userinfo(&'i self) -> Option<&'o EStr<Userinfo>> {
        let end = self.auth_meta()?.userinfo_end?;
        Some(EStr::new_validated(&self.as_str()[self.auth_start()..end]))
    }

    /// Returns the user name, i.e. the userinfo before its first colon.
    #[must_use]
    pub fn user(&'i self) -> Option<&'o EStr<User>> {
        let userinfo = self.userinfo()?;
        let user = userinfo.split_once(':').map_or(userinfo, |(user, _)| user);
        Some(EStr::new_validated(user.as_str()))
    }

    /// Returns the password, i.e. the userinfo after its first colon.
    #[must_use]
    pub fn password(&'i self) -> Option<&'o EStr<Userinfo>> {
        self.userinfo()?.split_once(':').map(|(_, password)| password)
    }

    /// Returns the optional [host] subcomponent.
    ///
    /// An IP literal is returned with its brackets.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    #[must_use]
    pub fn host(&'i self) -> Option<&'o EStr<RegName>> {
        let (start, end) = self.auth_meta()?.host_bounds;
        Some(EStr::new_validated(&self.as_str()[start..end]))
    }

    /// Returns the raw [port] subcomponent, which may be empty.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    #[must_use]
    pub fn port_str(&'i self) -> Option<&'o str> {
        let host_end = self.auth_meta()?.host_bounds.1;
        self.as_str()[host_end..self.meta.path_bounds.0].strip_prefix(':')
    }

    /// Returns the port as `u16`, or `None` if it is absent or empty.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.meta.auth_meta?.port
    }

    /// Returns the [path] component.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    #[must_use]
    pub fn path(&'i self) -> &'o EStr<Path> {
        let (start, end) = self.meta.path_bounds;
        EStr::new_validated(&self.as_str()[start..end])
    }

    /// Returns the optional [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    #[must_use]
    pub fn query(&'i self) -> Option<&'o EStr<Query>> {
        let end = self.meta.query_end?.get();
        Some(EStr::new_validated(
            &self.as_str()[self.meta.path_bounds.1 + 1..end],
        ))
    }

    /// Returns the optional [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o EStr<Fragment>> {
        let s = self.as_str();
        let end = self.meta.query_end.map_or(self.meta.path_bounds.1, |i| i.get());
        if end < s.len() {
            Some(EStr::new_validated(&s[end + 1..]))
        } else {
            None
        }
    }
}

impl<T: Bos<str>> UriRef<T> {
    /// Checks whether a scheme component is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether an authority component is present.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.meta.auth_meta.is_some()
    }

    pub(crate) fn to_owned_ref(&self) -> UriRef<String> {
        UriRef {
            val: self.as_str().to_owned(),
            meta: self.meta,
        }
    }

    /// Classifies the URI reference.
    ///
    /// See [`kind::classify`](crate::kind::classify) for the exact rules.
    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        ReferenceSource::kind(self)
    }

    /// Normalizes the URI reference with the default [`Normalizer`].
    ///
    /// [`Normalizer`]: crate::normalize::Normalizer
    ///
    /// # Examples
    ///
    /// ```
    /// use refuri::UriRef;
    ///
    /// let r = UriRef::parse("HTTP://www.EXAMPLE.com:80/a/./b/../%7Ec")?;
    /// assert_eq!(r.normalize(), "http://www.example.com/a/~c");
    /// # Ok::<_, refuri::ParseError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> UriRef<String> {
        crate::normalize::Normalizer::new().normalize_uri_ref(self)
    }

    /// Resolves the URI reference against the given base.
    ///
    /// See [`resolve::resolve`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`resolve::resolve`].
    ///
    /// # Examples
    ///
    /// ```
    /// use refuri::UriRef;
    ///
    /// let base = UriRef::parse("http://example.com/foo/bar")?;
    /// let r = UriRef::parse("../baz?q")?;
    /// assert_eq!(r.resolve_against(&base).unwrap(), "http://example.com/baz?q");
    /// # Ok::<_, refuri::ParseError>(())
    /// ```
    pub fn resolve_against<U: Bos<str>>(
        &self,
        base: &UriRef<U>,
    ) -> Result<UriRef<String>, resolve::ResolveError> {
        resolve::resolve(self, base)
    }
}

impl<T: Bos<str>> ReferenceSource for UriRef<T> {
    fn scheme(&self) -> Option<&str> {
        UriRef::scheme(self)
    }

    fn percent_encoded_user(&self) -> Option<&str> {
        UriRef::user(self).map(EStr::as_str)
    }

    fn percent_encoded_password(&self) -> Option<&str> {
        UriRef::password(self).map(EStr::as_str)
    }

    fn percent_encoded_host(&self) -> Option<&str> {
        UriRef::host(self).map(EStr::as_str)
    }

    fn port(&self) -> Option<u16> {
        UriRef::port(self)
    }

    fn percent_encoded_path(&self) -> &str {
        UriRef::path(self).as_str()
    }

    fn percent_encoded_query(&self) -> Option<&str> {
        UriRef::query(self).map(EStr::as_str)
    }

    fn percent_encoded_fragment(&self) -> Option<&str> {
        UriRef::fragment(self).map(EStr::as_str)
    }
}

impl<T: Bos<str>> From<&UriRef<T>> for Components {
    fn from(r: &UriRef<T>) -> Self {
        r.to_components()
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<UriRef<U>> for UriRef<T> {
    fn eq(&self, other: &UriRef<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for UriRef<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<&str> for UriRef<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<UriRef<T>> for &str {
    fn eq(&self, other: &UriRef<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for UriRef<T> {}

impl<T: Bos<str>> hash::Hash for UriRef<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for UriRef<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for UriRef<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for UriRef<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for UriRef<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for UriRef<&'a str> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Self::parse).
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        UriRef::parse(value)
    }
}

impl TryFrom<String> for UriRef<String> {
    type Error = (String, ParseError);

    /// Equivalent to [`parse_from`](Self::parse_from).
    fn try_from(value: String) -> Result<Self, Self::Error> {
        UriRef::parse_from(value)
    }
}

impl From<UriRef<String>> for String {
    fn from(value: UriRef<String>) -> String {
        value.val
    }
}

impl From<UriRef<&str>> for UriRef<String> {
    fn from(value: UriRef<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for UriRef<String> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriRef::parse(s).map(|r| r.to_owned())
    }
}

impl<T: Bos<str>> fmt::Debug for UriRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriRef")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for UriRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for UriRef<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UriRef<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        UriRef::parse(s).map_err(|e| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UriRef<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UriRef::parse_from(s).map_err(|(s, e)| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}
