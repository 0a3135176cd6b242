use crate::domain::{format_phone_number, SignupDraft, SignupField, UilDivision};
use crate::error::CoreError;

/// Owns the in-progress signup draft and keeps the validity flag in step with
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: SignupDraft,
    valid: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &SignupDraft {
        &self.draft
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn field_value(&self, field: SignupField) -> &str {
        self.draft.field(field)
    }

    pub fn division(&self) -> UilDivision {
        self.draft.uil_division
    }

    /// Stores `raw` as typed, except the phone field which is reformatted.
    pub fn update_field(&mut self, field: SignupField, raw: &str) {
        let value = match field {
            SignupField::PhoneNumber => format_phone_number(raw),
            _ => raw.to_string(),
        };
        *self.draft.field_mut(field) = value;
        self.revalidate();
    }

    /// Same as [`FormState::update_field`] for adapters that only have the
    /// input's name.
    pub fn update_field_named(&mut self, name: &str, raw: &str) -> Result<(), CoreError> {
        let field = name.parse::<SignupField>()?;
        self.update_field(field, raw);
        Ok(())
    }

    pub fn update_division(&mut self, division: UilDivision) {
        self.draft.uil_division = division;
        self.revalidate();
    }

    pub fn reset(&mut self) {
        self.draft = SignupDraft::default();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.valid = self.draft.is_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::FormState;
    use crate::domain::{SignupField, UilDivision};

    fn filled() -> FormState {
        let mut form = FormState::new();
        form.update_field(SignupField::FirstName, "Jimmy");
        form.update_field(SignupField::LastName, "Krueger");
        form.update_field(SignupField::PhoneNumber, "(555) 123-4567");
        form.update_field(SignupField::Email, "jimmy@example.com");
        form.update_field(SignupField::School, "Westlake High");
        form
    }

    #[test]
    fn new_form_is_empty_and_invalid() {
        let form = FormState::new();
        assert!(!form.is_valid());
        assert_eq!(form.division(), UilDivision::NotApplicable);
        for field in SignupField::REQUIRED {
            assert_eq!(form.field_value(field), "");
        }
    }

    #[test]
    fn validity_tracks_every_mutation() {
        let mut form = FormState::new();
        for (index, field) in SignupField::REQUIRED.into_iter().enumerate() {
            assert!(!form.is_valid(), "valid too early at field {index}");
            form.update_field(field, "x");
        }
        assert!(form.is_valid());

        form.update_field(SignupField::Email, "");
        assert!(!form.is_valid());
    }

    #[test]
    fn whitespace_only_values_are_accepted() {
        let mut form = FormState::new();
        for field in SignupField::REQUIRED {
            form.update_field(field, " ");
        }
        assert!(form.is_valid());
    }

    #[test]
    fn phone_input_is_reformatted_on_update() {
        let mut form = FormState::new();
        form.update_field(SignupField::PhoneNumber, "5551234567");
        assert_eq!(form.field_value(SignupField::PhoneNumber), "+15551234567");
        form.update_field(SignupField::PhoneNumber, "15551234567");
        assert_eq!(form.field_value(SignupField::PhoneNumber), "+15551234567");
        form.update_field(SignupField::PhoneNumber, "(555) 123-4567");
        assert_eq!(form.field_value(SignupField::PhoneNumber), "+15551234567");
    }

    #[test]
    fn cleared_phone_still_holds_country_prefix() {
        let mut form = FormState::new();
        form.update_field(SignupField::PhoneNumber, "");
        assert_eq!(form.field_value(SignupField::PhoneNumber), "+1");
    }

    #[test]
    fn other_fields_are_stored_verbatim() {
        let mut form = FormState::new();
        form.update_field(SignupField::Email, "  Not An Email ");
        assert_eq!(form.field_value(SignupField::Email), "  Not An Email ");
    }

    #[test]
    fn update_field_named_rejects_unknown_inputs() {
        let mut form = FormState::new();
        form.update_field_named("school", "Lake Travis").expect("known field");
        assert_eq!(form.field_value(SignupField::School), "Lake Travis");
        assert!(form.update_field_named("nickname", "Coach").is_err());
    }

    #[test]
    fn division_does_not_affect_validity() {
        let mut form = filled();
        form.update_division(UilDivision::FourA);
        assert!(form.is_valid());
        assert_eq!(form.division(), UilDivision::FourA);

        let mut empty = FormState::new();
        empty.update_division(UilDivision::TwoA);
        assert!(!empty.is_valid());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = filled();
        form.update_division(UilDivision::ThreeA);
        form.reset();
        assert_eq!(form, FormState::new());
        assert_eq!(form.division(), UilDivision::NotApplicable);
        assert!(!form.is_valid());
    }
}
