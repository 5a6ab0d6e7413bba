//! Module for normalization.

use crate::{
    component::{Components, ReferenceSource},
    path::HierarchicalPath,
    pct_enc::{self, table::*, Decode, DecodedChunk, Table},
    port::{normalize_port, PortTable},
    ri::UriRef,
};
use alloc::{borrow::ToOwned, string::String, vec};
use borrow_or_share::Bos;

/// A configurable URI reference normalizer.
///
/// Normalization applies, in order:
///
/// 1. Case folding of the scheme and the host, and of the path
///    if [`lowercase_path`] is set.
/// 2. Percent-encoding normalization of every other component, see
///    [`normalize_percent_encoding`].
/// 3. Removal of a port equal to the default port of the scheme.
/// 4. Lexical normalization of the path, with empty components removed
///    first if [`remove_empty_path_components`] is set.
/// 5. Replacement of an empty path with `"/"` when a non-empty host is present.
///
/// If the normalized components do not form a legal reference,
/// the original components are returned unchanged.
///
/// [`lowercase_path`]: Self::lowercase_path
/// [`remove_empty_path_components`]: Self::remove_empty_path_components
///
/// # Examples
///
/// ```
/// use refuri::{normalize::Normalizer, port::PortTable, UriRef};
///
/// let normalizer = Normalizer::new()
///     .lowercase_path(true)
///     .remove_empty_path_components(true)
///     .default_ports(PortTable::default().with("foo", 4673));
///
/// let r = UriRef::parse("FOO://Example.COM:4673/A//B/./C")?;
/// assert_eq!(normalizer.normalize_uri_ref(&r), "foo://example.com/a/b/c");
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Normalizer {
    lowercase_path: bool,
    remove_empty_path_components: bool,
    default_ports: PortTable,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            lowercase_path: false,
            remove_empty_path_components: false,
            default_ports: PortTable::default(),
        }
    }

    /// Sets whether to fold the path to lowercase.
    ///
    /// This defaults to `false`.
    pub fn lowercase_path(mut self, value: bool) -> Self {
        self.lowercase_path = value;
        self
    }

    /// Sets whether to remove empty path components, so that `"/a//b"` becomes `"/a/b"`.
    ///
    /// This defaults to `false`.
    pub fn remove_empty_path_components(mut self, value: bool) -> Self {
        self.remove_empty_path_components = value;
        self
    }

    /// Sets the table with which to look up default ports.
    ///
    /// This defaults to [`PortTable::default`].
    pub fn default_ports(mut self, table: PortTable) -> Self {
        self.default_ports = table;
        self
    }

    /// Normalizes the components of the given reference.
    #[must_use]
    pub fn normalize<R: ReferenceSource + ?Sized>(&self, r: &R) -> Components {
        let original = r.to_components();
        let mut c = original.clone();

        if let Some(scheme) = &mut c.scheme {
            scheme.make_ascii_lowercase();
        }
        c.host = c.host.as_deref().map(fold_host);
        if self.lowercase_path {
            let mut path = String::with_capacity(c.path.len());
            normalize_estr(&mut path, &c.path, true, PATH);
            c.path = path;
        }

        let c = normalize_percent_encoding(&c, true);
        let mut c = normalize_port(&c, &self.default_ports);

        c.path = self.normalize_path(&c);
        if c.path.is_empty() && c.host.as_deref().is_some_and(|host| !host.is_empty()) {
            c.path.push('/');
        }

        match c.to_uri_ref() {
            Ok(_) => c,
            Err(e) => {
                debug!("normalization fell back to the original reference: {e}");
                original
            }
        }
    }

    /// Normalizes the given `UriRef`.
    ///
    /// This is [`normalize`](Self::normalize) followed by materialization.
    #[must_use]
    pub fn normalize_uri_ref<T: Bos<str>>(&self, r: &UriRef<T>) -> UriRef<String> {
        match self.normalize(r).to_uri_ref() {
            Ok(normalized) => normalized,
            Err(_) => r.to_owned_ref(),
        }
    }

    fn normalize_path(&self, c: &Components) -> String {
        let path = HierarchicalPath::new(&c.path);
        let was_empty = path.is_empty();

        let path = if self.remove_empty_path_components {
            path.remove_empty_components()
        } else {
            path
        };
        let mut path = path.lexically_normalize();

        if path.is_absolute() {
            // "//" would read as an authority.
            if c.host.is_none() && path.components().first().is_some_and(String::is_empty) {
                let has_directory_path = path.has_directory_path();
                let mut components = path.into_components();
                components.insert(0, ".".to_owned());
                path = HierarchicalPath::from_parts(true, components, has_directory_path);
            }
        } else {
            if path.components().is_empty() && !was_empty {
                path = HierarchicalPath::from_parts(false, vec![".".to_owned()], true);
            }
            path = path.guard_first_component(!c.has_scheme());
        }
        path.to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes the percent-encoding of every component except the scheme.
///
/// Within each component, a percent-encoded octet is decoded if and only if
/// it decodes to an unreserved character, every other octet is kept encoded
/// with uppercase hexadecimal digits, and every character not allowed in the
/// component is encoded. This is idempotent and preserves the decoded form
/// of each component.
///
/// Octets outside `unreserved` are never decoded, even where the component
/// would allow them literally, so `%21` in a path stays `%21`.
///
/// An encoded colon in the user or the password is kept encoded and a literal
/// colon is kept literal, since the first literal colon delimits the password.
///
/// The host is skipped if `skip_host` is `true`, which is useful after the host
/// has already been case folded.
///
/// # Examples
///
/// ```
/// use refuri::{normalize::normalize_percent_encoding, UriRef};
///
/// let r = UriRef::parse("http://us%65r%3ax@example.com/%7euser/caf%c3%a9?a=%41%2f")?;
/// let c = normalize_percent_encoding(&r, false);
/// assert_eq!(c.user.as_deref(), Some("user%3Ax"));
/// assert_eq!(c.path, "/~user/caf%C3%A9");
/// assert_eq!(c.query.as_deref(), Some("a=A%2F"));
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[must_use]
pub fn normalize_percent_encoding<R: ReferenceSource + ?Sized>(
    r: &R,
    skip_host: bool,
) -> Components {
    let mut c = r.to_components();

    c.user = c.user.as_deref().map(|s| normalize_userinfo_part(s, USER));
    c.password = c
        .password
        .as_deref()
        .map(|s| normalize_userinfo_part(s, USERINFO));
    if !skip_host {
        c.host = c.host.as_deref().map(|host| {
            if host.starts_with('[') {
                host.to_owned()
            } else {
                normalized(host, REG_NAME)
            }
        });
    }
    c.path = normalized(&c.path, PATH);
    c.query = c.query.as_deref().map(|s| normalized(s, QUERY));
    c.fragment = c.fragment.as_deref().map(|s| normalized(s, FRAGMENT));
    c
}

fn normalized(s: &str, table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    normalize_estr(&mut buf, s, false, table);
    buf
}

fn normalize_userinfo_part(s: &str, table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = find_encoded_colon(rest) {
        normalize_estr(&mut buf, &rest[..i], false, table);
        buf.push_str("%3A");
        rest = &rest[i + 3..];
    }
    normalize_estr(&mut buf, rest, false, table);
    buf
}

fn find_encoded_colon(s: &str) -> Option<usize> {
    s.as_bytes()
        .windows(3)
        .position(|w| w[0] == b'%' && w[1] == b'3' && (w[2] == b'A' || w[2] == b'a'))
}

fn fold_host(host: &str) -> String {
    if host.starts_with('[') {
        host.to_ascii_lowercase()
    } else {
        let mut buf = String::with_capacity(host.len());
        normalize_estr(&mut buf, host, true, REG_NAME);
        buf
    }
}

fn normalize_estr(buf: &mut String, s: &str, to_ascii_lowercase: bool, table: Table) {
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => {
                for ch in s.chars() {
                    if table.allows(ch) {
                        buf.push(if to_ascii_lowercase {
                            ch.to_ascii_lowercase()
                        } else {
                            ch
                        });
                    } else {
                        let mut bytes = [0; 4];
                        for &x in ch.encode_utf8(&mut bytes).as_bytes() {
                            buf.push_str(pct_enc::encode_byte(x));
                        }
                    }
                }
            }
            DecodedChunk::PctDecoded(mut x) => {
                if UNRESERVED.allows_ascii(x) {
                    if to_ascii_lowercase {
                        x.make_ascii_lowercase();
                    }
                    buf.push(x as char);
                } else {
                    buf.push_str(pct_enc::encode_byte(x));
                }
            }
        }
    }
}
