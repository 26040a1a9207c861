//! Paths locating values inside nested input.
//!
//! Every validation error is tagged with a [`JsonPath`] describing where in
//! the original input the offending value sits. Paths are immutable: descending
//! into a field or index derives a new path, leaving the parent untouched.

use std::fmt::{self, Display};

/// A single step of a path: a named field or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object property access (e.g. `user`, `email`).
    Field(String),
    /// An array element access (e.g. element `0`).
    Index(usize),
}

/// A path to a value in a nested structure, rendered dot-joined.
///
/// ```rust
/// use distrust::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, naming the root value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True if this path names the root value.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the root outward.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}
