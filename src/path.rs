//! Module for hierarchical paths.

use alloc::{
    borrow::ToOwned,
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, hash, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SEPARATOR: char = '/';

/// The path of a reference, as slash-delimited components plus flags.
///
/// - `is_absolute`: whether the path starts with a slash.
/// - `components`: the segments between slashes. Empty components are kept,
///   so `"a//b"` has three of them.
/// - `has_directory_path`: whether the path ends with a slash.
///
/// A path parsed from a string always serializes back to that string.
/// Equality and hashing follow the serialized form, so the directory flag
/// of a path without components is irrelevant.
///
/// # Examples
///
/// ```
/// use refuri::path::HierarchicalPath;
///
/// let path = HierarchicalPath::new("/a/./b/../c/");
/// assert!(path.is_absolute());
/// assert_eq!(path.components(), ["a", ".", "b", "..", "c"]);
/// assert!(path.has_directory_path());
///
/// let path = path.lexically_normalize();
/// assert_eq!(path.to_string(), "/a/c/");
/// ```
#[derive(Clone, Default)]
pub struct HierarchicalPath {
    is_absolute: bool,
    components: Vec<String>,
    has_directory_path: bool,
}

impl HierarchicalPath {
    /// Parses a path string.
    ///
    /// This never fails: every string is a sequence of segments.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let (is_absolute, rem) = match path.strip_prefix(SEPARATOR) {
            Some(rem) => (true, rem),
            None => (false, path),
        };

        if rem.is_empty() {
            return Self {
                is_absolute,
                components: Vec::new(),
                has_directory_path: false,
            };
        }
        // A lone separator left is one empty component, so that "//" round-trips.
        if rem == "/" {
            return Self {
                is_absolute,
                components: alloc::vec![String::new()],
                has_directory_path: true,
            };
        }

        let (has_directory_path, rem) = match rem.strip_suffix(SEPARATOR) {
            Some(rem) => (true, rem),
            None => (false, rem),
        };

        Self {
            is_absolute,
            components: rem.split(SEPARATOR).map(ToOwned::to_owned).collect(),
            has_directory_path,
        }
    }

    /// Creates a path from its parts.
    #[must_use]
    pub fn from_parts(is_absolute: bool, components: Vec<String>, has_directory_path: bool) -> Self {
        Self {
            is_absolute,
            components,
            has_directory_path,
        }
    }

    /// Checks whether the path starts with a slash.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    /// Returns the components of the path.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Consumes the path and returns its components.
    #[must_use]
    pub fn into_components(self) -> Vec<String> {
        self.components
    }

    /// Checks whether the path is marked as a directory.
    #[must_use]
    pub fn has_directory_path(&self) -> bool {
        self.has_directory_path
    }

    /// Checks whether the path is `"/"`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_absolute && self.components.is_empty()
    }

    /// Checks whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_absolute && self.components.is_empty()
    }

    /// Returns a copy of the path with the directory flag set to the given value.
    #[must_use]
    pub fn with_directory_path(mut self, value: bool) -> Self {
        self.has_directory_path = value;
        self
    }

    /// Removes every empty component, leaving the flags unchanged.
    ///
    /// ```
    /// use refuri::path::HierarchicalPath;
    ///
    /// let path = HierarchicalPath::new("/a//b///c/").remove_empty_components();
    /// assert_eq!(path.to_string(), "/a/b/c/");
    /// ```
    #[must_use]
    pub fn remove_empty_components(mut self) -> Self {
        self.components.retain(|c| !c.is_empty());
        self
    }

    /// Removes the last component unless the path is already a directory,
    /// so that the path denotes its containing directory.
    ///
    /// ```
    /// use refuri::path::HierarchicalPath;
    ///
    /// let path = HierarchicalPath::new("/a/b").remove_non_directory_component();
    /// assert_eq!(path.to_string(), "/a/");
    /// let path = HierarchicalPath::new("/a/b/").remove_non_directory_component();
    /// assert_eq!(path.to_string(), "/a/b/");
    /// ```
    #[must_use]
    pub fn remove_non_directory_component(mut self) -> Self {
        if !self.has_directory_path && !self.components.is_empty() {
            self.components.pop();
            self.has_directory_path = true;
        }
        self
    }

    /// Removes `"."` and `".."` components as described in
    /// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
    ///
    /// A `".."` with nothing to remove is kept in a relative path, where it
    /// may still be resolved against a base, and dropped in an absolute one.
    /// A path ending in a dot segment becomes a directory.
    ///
    /// ```
    /// use refuri::path::HierarchicalPath;
    ///
    /// let path = HierarchicalPath::new("a/../../b").lexically_normalize();
    /// assert_eq!(path.to_string(), "../b");
    /// let path = HierarchicalPath::new("/../b").lexically_normalize();
    /// assert_eq!(path.to_string(), "/b");
    /// ```
    #[must_use]
    pub fn lexically_normalize(self) -> Self {
        let Self {
            is_absolute,
            components,
            mut has_directory_path,
        } = self;

        let len = components.len();
        let mut out: Vec<String> = Vec::with_capacity(len);

        for (i, component) in components.into_iter().enumerate() {
            let is_last = i + 1 == len;
            match component.as_str() {
                "." => {
                    if is_last && !(is_absolute && out.is_empty()) {
                        has_directory_path = true;
                    }
                }
                ".." => {
                    if out.last().is_some_and(|c| c != "..") {
                        out.pop();
                        if is_last {
                            has_directory_path = true;
                        }
                    } else if !is_absolute {
                        out.push(component);
                    }
                }
                _ => out.push(component),
            }
        }

        Self {
            is_absolute,
            components: out,
            has_directory_path,
        }
    }

    /// Guards a relative path against being misread when serialized,
    /// as described in [Section 4.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-4.2).
    ///
    /// A `"."` component is prepended when the first component contains a
    /// colon, which would read as a scheme, or is empty, which would make the
    /// path absolute or a network-path reference.
    ///
    /// ```
    /// use refuri::path::HierarchicalPath;
    ///
    /// let path = HierarchicalPath::new("a:b/c").normalize_relative_path_reference();
    /// assert_eq!(path.to_string(), "./a:b/c");
    /// ```
    #[must_use]
    pub fn normalize_relative_path_reference(self) -> Self {
        self.guard_first_component(true)
    }

    pub(crate) fn guard_first_component(mut self, colon_sensitive: bool) -> Self {
        if self.is_absolute {
            return self;
        }
        if let Some(first) = self.components.first() {
            if first.is_empty() || (colon_sensitive && first.contains(':')) {
                self.components.insert(0, ".".to_owned());
            }
        }
        self
    }

    fn effective_directory_flag(&self) -> bool {
        self.has_directory_path && !self.components.is_empty()
    }
}

impl fmt::Display for HierarchicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute {
            f.write_str("/")?;
        }
        for (i, component) in self.components.iter().enumerate() {
            if i != 0 {
                f.write_str("/")?;
            }
            f.write_str(component)?;
        }
        if self.effective_directory_flag() {
            f.write_str("/")?;
        }
        Ok(())
    }
}

impl fmt::Debug for HierarchicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchicalPath")
            .field("is_absolute", &self.is_absolute)
            .field("components", &self.components)
            .field("has_directory_path", &self.has_directory_path)
            .finish()
    }
}

impl PartialEq for HierarchicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.is_absolute == other.is_absolute
            && self.components == other.components
            && self.effective_directory_flag() == other.effective_directory_flag()
    }
}

impl Eq for HierarchicalPath {}

impl hash::Hash for HierarchicalPath {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.is_absolute.hash(state);
        self.components.hash(state);
        self.effective_directory_flag().hash(state);
    }
}

impl From<&str> for HierarchicalPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl FromStr for HierarchicalPath {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<HierarchicalPath> for String {
    fn from(path: HierarchicalPath) -> String {
        path.to_string()
    }
}

#[cfg(feature = "serde")]
impl Serialize for HierarchicalPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for HierarchicalPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}
