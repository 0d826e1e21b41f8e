//! The only place a select's string becomes a boolean.
//!
//! A three-option control emits `""`, `"true"` or `"false"`. The empty string
//! keeps the field unset so "not chosen yet" never reads as `false`.

use crate::core::form_state::{FieldChange, FormState};
use crate::error::FormError;

pub const TRI_STATE_OPTIONS: [&str; 3] = ["", "true", "false"];

pub fn parse_tri_state(field: &str, raw: &str) -> Result<Option<bool>, FormError> {
    match raw {
        "" => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        other => Err(FormError::InvalidChoice {
            field: field.to_string(),
            raw: other.to_string(),
        }),
    }
}

pub fn tri_state_label(value: Option<bool>) -> &'static str {
    match value {
        None => "",
        Some(true) => "true",
        Some(false) => "false",
    }
}

impl FormState {
    pub fn select_tri_state(&self, field: &str, raw: &str) -> Result<Self, FormError> {
        let flag = parse_tri_state(field, raw)?;
        self.apply(FieldChange::boolean(field, flag))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tri_state, tri_state_label, TRI_STATE_OPTIONS};
    use crate::core::form_state::FormState;
    use crate::core::schema::FormSchema;
    use crate::core::value::Value;
    use crate::error::FormError;

    #[test]
    fn empty_selection_is_unset_not_false() {
        let state = FormState::from_schema(FormSchema::preference())
            .select_tri_state("smoking_preference", "false")
            .and_then(|state| state.select_tri_state("smoking_preference", ""))
            .expect("select");
        assert_eq!(state.get("smoking_preference"), Some(&Value::None));
    }

    #[test]
    fn literal_selections_store_exact_booleans() {
        let state = FormState::from_schema(FormSchema::preference());
        let yes = state
            .select_tri_state("drinking_preference", "true")
            .expect("select");
        let no = state
            .select_tri_state("drinking_preference", "false")
            .expect("select");
        assert_eq!(yes.get("drinking_preference"), Some(&Value::Bool(true)));
        assert_eq!(no.get("drinking_preference"), Some(&Value::Bool(false)));
    }

    #[test]
    fn other_strings_are_rejected() {
        assert!(matches!(
            parse_tri_state("smoking_preference", "yes"),
            Err(FormError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for raw in TRI_STATE_OPTIONS {
            let parsed = parse_tri_state("f", raw).expect("parse");
            assert_eq!(tri_state_label(parsed), raw);
        }
    }
}
