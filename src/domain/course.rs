use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// The identifier of a course (for example `CSCI200`).
///
/// Identifiers are compared byte-wise, so `CS101` and `cs101` are distinct
/// keys. No normalization is applied on construction; callers that want
/// case-insensitive behaviour should use [`CourseId::to_uppercase`] on both
/// the stored and the queried identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseId(NonEmptyString);

impl CourseId {
    /// Creates a new `CourseId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `EmptyIdError` if the string is empty.
    pub fn new(s: String) -> Result<Self, EmptyIdError> {
        NonEmptyString::new(s).map(Self).map_err(|_| EmptyIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns a copy of this identifier with every character uppercased.
    #[must_use]
    pub fn to_uppercase(&self) -> Self {
        // Uppercasing never yields an empty string from a non-empty one.
        Self::new(self.as_str().to_uppercase()).unwrap_or_else(|_| self.clone())
    }
}

impl TryFrom<String> for CourseId {
    type Error = EmptyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CourseId {
    type Error = EmptyIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for CourseId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for CourseId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a course identifier is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("course identifier must not be empty")]
pub struct EmptyIdError;

/// A single course record.
///
/// Records are immutable once constructed. The prerequisites are expected to
/// name other courses, but this is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    prerequisites: Vec<CourseId>,
}

impl Course {
    /// Creates a new course record.
    #[must_use]
    pub const fn new(id: CourseId, title: String, prerequisites: Vec<CourseId>) -> Self {
        Self {
            id,
            title,
            prerequisites,
        }
    }

    /// The course identifier; this is the key used by the index.
    #[must_use]
    pub const fn id(&self) -> &CourseId {
        &self.id
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The prerequisite identifiers, in the order they were supplied.
    #[must_use]
    pub fn prerequisites(&self) -> &[CourseId] {
        &self.prerequisites
    }

    /// Returns `true` if the course lists at least one prerequisite.
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Returns a copy of this record with the identifier and every
    /// prerequisite uppercased.
    #[must_use]
    pub fn to_uppercase(&self) -> Self {
        Self {
            id: self.id.to_uppercase(),
            title: self.title.clone(),
            prerequisites: self.prerequisites.iter().map(CourseId::to_uppercase).collect(),
        }
    }
}
