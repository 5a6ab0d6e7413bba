//! Module for default ports.

use crate::component::{Components, ReferenceSource};
use alloc::{collections::BTreeMap, string::String};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable mapping from schemes to their default ports.
///
/// Schemes are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use refuri::port::PortTable;
///
/// let table = PortTable::default().with("FOO", 4673);
/// assert_eq!(table.get("https"), Some(443));
/// assert_eq!(table.get("foo"), Some(4673));
/// assert_eq!(table.get("gopher"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct PortTable {
    entries: BTreeMap<String, u16>,
}

impl PortTable {
    /// Creates a table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns a copy of the table with the given entry added or replaced.
    pub fn with(mut self, scheme: &str, port: u16) -> Self {
        self.entries.insert(scheme.to_ascii_lowercase(), port);
        self
    }

    /// Returns the default port of the given scheme.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<u16> {
        if scheme.bytes().any(|x| x.is_ascii_uppercase()) {
            self.entries.get(&scheme.to_ascii_lowercase()).copied()
        } else {
            self.entries.get(scheme).copied()
        }
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries, ordered by scheme.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for PortTable {
    /// Creates the table `{ftp: 21, ssh: 22, http: 80, https: 443}`.
    fn default() -> Self {
        Self::empty()
            .with("ftp", 21)
            .with("ssh", 22)
            .with("http", 80)
            .with("https", 443)
    }
}

impl<'a> FromIterator<(&'a str, u16)> for PortTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u16)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |table, (scheme, port)| table.with(scheme, port))
    }
}

/// Removes the port if it equals the default port of the scheme.
///
/// # Examples
///
/// ```
/// use refuri::{port::{normalize_port, PortTable}, UriRef};
///
/// let r = UriRef::parse("https://example.com:443/")?;
/// let c = normalize_port(&r, &PortTable::default());
/// assert_eq!(c.port, None);
///
/// let r = UriRef::parse("https://example.com:8443/")?;
/// let c = normalize_port(&r, &PortTable::default());
/// assert_eq!(c.port, Some(8443));
/// # Ok::<_, refuri::ParseError>(())
/// ```
#[must_use]
pub fn normalize_port<R: ReferenceSource + ?Sized>(r: &R, table: &PortTable) -> Components {
    let mut c = r.to_components();
    if let (Some(scheme), Some(port)) = (c.scheme.as_deref(), c.port) {
        if table.get(scheme) == Some(port) {
            c.port = None;
        }
    }
    c
}

#[cfg(feature = "serde")]
impl Serialize for PortTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PortTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<String, u16>::deserialize(deserializer)?;
        Ok(entries
            .iter()
            .fold(Self::empty(), |table, (scheme, port)| table.with(scheme, *port)))
    }
}
