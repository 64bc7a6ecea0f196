/// Errors that can occur when creating validated primitive types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The score was outside the closed interval [0, 1]
    #[error("Confidence must be within [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),
    /// The score was NaN
    #[error("Confidence cannot be NaN")]
    ConfidenceNan,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A match-confidence score guaranteed to lie in the closed interval [0, 1].
///
/// Higher values mean the candidate is more likely to be the same person.
/// Construction rejects NaN and out-of-range values rather than clamping,
/// so a malformed score from a collaborator service is surfaced at the
/// boundary instead of being silently normalised.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a new `Confidence` from a raw score.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::ConfidenceNan` for NaN and
    /// `TypeError::ConfidenceOutOfRange` for values outside [0, 1].
    pub fn new(score: f64) -> Result<Self, TypeError> {
        if score.is_nan() {
            return Err(TypeError::ConfidenceNan);
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(TypeError::ConfidenceOutOfRange(score));
        }
        Ok(Self(score))
    }

    /// Returns the raw score.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the score as a whole percentage, rounded.
    pub fn as_percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

impl serde::Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let score = f64::deserialize(deserializer)?;
        Confidence::new(score).map_err(serde::de::Error::custom)
    }
}
