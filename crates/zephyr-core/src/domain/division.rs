use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// UIL athletic division of the coach's school. Optional on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UilDivision {
    #[default]
    NotApplicable,
    OneA,
    TwoA,
    ThreeA,
    FourA,
    FiveA,
    SixA,
}

impl UilDivision {
    /// Selector options, in display order.
    pub const ALL: [UilDivision; 7] = [
        UilDivision::NotApplicable,
        UilDivision::OneA,
        UilDivision::TwoA,
        UilDivision::ThreeA,
        UilDivision::FourA,
        UilDivision::FiveA,
        UilDivision::SixA,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UilDivision::NotApplicable => "N/A",
            UilDivision::OneA => "1A",
            UilDivision::TwoA => "2A",
            UilDivision::ThreeA => "3A",
            UilDivision::FourA => "4A",
            UilDivision::FiveA => "5A",
            UilDivision::SixA => "6A",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UilDivision::NotApplicable => "Not Applicable",
            other => other.as_str(),
        }
    }

    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|division| *division == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for UilDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UilDivision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("n/a") {
            return Ok(UilDivision::NotApplicable);
        }
        Self::ALL
            .into_iter()
            .find(|division| division.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::InvalidDivision(trimmed.to_string()))
    }
}

impl Serialize for UilDivision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UilDivision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
