//! Location value object
//!
//! A named place (usually a city) that weather data is requested for.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Location;
//!
//! let loc = Location::new("  London ").expect("valid location");
//! assert_eq!(loc.as_str(), "London");
//!
//! assert!(Location::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A trimmed, non-empty location name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Create a location from user input
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` if nothing is left after trimming.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidLocation(
                "location name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the location name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether two locations name the same place
    ///
    /// The weather API resolves names case-insensitively, so "london" and
    /// "London" track the same series.
    #[must_use]
    pub fn is_same_place(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Location {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Custom deserialization that validates location names
impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let loc = Location::new("  Paris\n").unwrap();
        assert_eq!(loc.as_str(), "Paris");
    }

    #[test]
    fn new_rejects_empty() {
        assert!(Location::new("").is_err());
        assert!(Location::new(" \t ").is_err());
    }

    #[test]
    fn keeps_inner_whitespace() {
        let loc = Location::new("New York").unwrap();
        assert_eq!(loc.as_str(), "New York");
    }

    #[test]
    fn same_place_ignores_case() {
        let a = Location::new("london").unwrap();
        let b = Location::new("London").unwrap();
        assert!(a.is_same_place(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn different_places() {
        let a = Location::new("Berlin").unwrap();
        let b = Location::new("Bern").unwrap();
        assert!(!a.is_same_place(&b));
    }

    #[test]
    fn display_shows_name() {
        let loc = Location::new("Tokyo").unwrap();
        assert_eq!(loc.to_string(), "Tokyo");
    }

    #[test]
    fn serializes_as_plain_string() {
        let loc = Location::new("Oslo").unwrap();
        assert_eq!(serde_json::to_string(&loc).unwrap(), "\"Oslo\"");
    }

    #[test]
    fn deserialization_validates() {
        let loc: Location = serde_json::from_str("\" Rome \"").unwrap();
        assert_eq!(loc.as_str(), "Rome");

        let result: Result<Location, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[test]
    fn try_from_str() {
        assert!(Location::try_from("Madrid").is_ok());
        assert!(Location::try_from(String::new()).is_err());
    }
}
