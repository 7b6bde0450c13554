//! Proof types for validated values.
//!
//! These types enforce invariants at construction time. Once you hold a value,
//! you know it satisfies all required constraints.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A string that is never empty (or whitespace-only) after trimming.
///
/// # Serde
///
/// Serializes as a plain JSON string. Deserialization rejects empty and
/// whitespace-only strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("content must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    /// Build a `NonEmptyString` from a static lead and arbitrary trailing content.
    ///
    /// Infallible: the lead is non-empty by construction.
    #[must_use]
    pub fn prefixed(lead: NonEmptyStaticStr, rest: &str) -> Self {
        let mut value = String::with_capacity(lead.as_str().len() + rest.len());
        value.push_str(lead.as_str());
        value.push_str(rest);
        Self(value)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compile-time checked non-empty, non-blank static string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonEmptyStaticStr(&'static str);

impl NonEmptyStaticStr {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "NonEmptyStaticStr must not be empty");
        assert!(
            !value.as_bytes()[0].is_ascii_whitespace(),
            "NonEmptyStaticStr must not start with whitespace"
        );
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("score {value} outside [{min}, {max}]")]
pub struct ScoreRangeError {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// A score in `[0, 1]`.
///
/// The only constructor clamps, so every held value is in range and finite.
/// Deserialization validates instead of clamping: an out-of-range wire value
/// is reported, not silently repaired.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitScore(f64);

impl UnitScore {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`. Non-finite input maps to zero.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UnitScore {
    type Error = ScoreRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreRangeError {
                value,
                min: 0.0,
                max: 1.0,
            })
        }
    }
}

impl From<UnitScore> for f64 {
    fn from(value: UnitScore) -> Self {
        value.0
    }
}

/// Signed fire/water balance in `[-1, 1]`.
///
/// Positive leans fire (hi), negative leans water (mi), zero is centered.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Centerline(f64);

impl Centerline {
    pub const CENTERED: Self = Self(0.0);

    /// Clamp `value` into `[-1, 1]`. Non-finite input maps to centered.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::CENTERED;
        }
        Self(value.clamp(-1.0, 1.0))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Distance from center, in `[0, 1]`.
    #[must_use]
    pub fn magnitude(self) -> UnitScore {
        UnitScore::clamped(self.0.abs())
    }
}

impl TryFrom<f64> for Centerline {
    type Error = ScoreRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (-1.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreRangeError {
                value,
                min: -1.0,
                max: 1.0,
            })
        }
    }
}

impl From<Centerline> for f64 {
    fn from(value: Centerline) -> Self {
        value.0
    }
}

/// Marker carried by every plan: no output is final.
///
/// There is no `false` state. On the wire it is the literal `true`, and a
/// payload claiming `false` does not deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Provisional;

impl Provisional {
    #[must_use]
    pub const fn is_provisional(self) -> bool {
        true
    }
}

impl Serialize for Provisional {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for Provisional {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(Self)
        } else {
            Err(serde::de::Error::custom("plans are always provisional"))
        }
    }
}
