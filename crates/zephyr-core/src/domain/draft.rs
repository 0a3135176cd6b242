use crate::domain::division::UilDivision;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five text inputs of the signup form. All of them are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    School,
}

impl SignupField {
    pub const REQUIRED: [SignupField; 5] = [
        SignupField::FirstName,
        SignupField::LastName,
        SignupField::PhoneNumber,
        SignupField::Email,
        SignupField::School,
    ];

    /// Name used on the wire and in stored documents.
    pub fn wire_name(self) -> &'static str {
        match self {
            SignupField::FirstName => "firstName",
            SignupField::LastName => "lastName",
            SignupField::PhoneNumber => "phoneNumber",
            SignupField::Email => "email",
            SignupField::School => "school",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignupField::FirstName => "First Name",
            SignupField::LastName => "Last Name",
            SignupField::PhoneNumber => "Phone Number",
            SignupField::Email => "Email",
            SignupField::School => "School",
        }
    }
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SignupField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(SignupField::FirstName),
            "lastName" | "last_name" => Ok(SignupField::LastName),
            "phoneNumber" | "phone_number" | "phone" => Ok(SignupField::PhoneNumber),
            "email" => Ok(SignupField::Email),
            "school" => Ok(SignupField::School),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub school: String,
    pub uil_division: UilDivision,
}

impl SignupDraft {
    pub fn field(&self, field: SignupField) -> &str {
        match field {
            SignupField::FirstName => &self.first_name,
            SignupField::LastName => &self.last_name,
            SignupField::PhoneNumber => &self.phone_number,
            SignupField::Email => &self.email,
            SignupField::School => &self.school,
        }
    }

    pub(crate) fn field_mut(&mut self, field: SignupField) -> &mut String {
        match field {
            SignupField::FirstName => &mut self.first_name,
            SignupField::LastName => &mut self.last_name,
            SignupField::PhoneNumber => &mut self.phone_number,
            SignupField::Email => &mut self.email,
            SignupField::School => &mut self.school,
        }
    }

    /// Required fields holding the empty string. Whitespace counts as a value.
    pub fn missing_fields(&self) -> Vec<SignupField> {
        SignupField::REQUIRED
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        SignupField::REQUIRED
            .into_iter()
            .all(|field| !self.field(field).is_empty())
    }
}
