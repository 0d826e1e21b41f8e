use crate::core::form_state::FormState;
use crate::core::schema::FieldKind;
use crate::core::value::Value;
use crate::error::FormError;

/// Removes `item` when present, otherwise appends it. Insertion order of the
/// remaining items is kept for display.
pub fn toggle(selection: &[String], item: &str) -> Vec<String> {
    if selection.iter().any(|selected| selected == item) {
        selection
            .iter()
            .filter(|selected| selected.as_str() != item)
            .cloned()
            .collect()
    } else {
        let mut next = selection.to_vec();
        next.push(item.to_string());
        next
    }
}

impl FormState {
    pub fn toggle_item(&self, field: &str, item: &str) -> Result<Self, FormError> {
        let spec = self.spec(field)?;
        let FieldKind::MultiSelect(options) = &spec.kind else {
            return Err(FormError::KindMismatch {
                field: field.to_string(),
                payload: "toggle",
            });
        };
        if !options.iter().any(|option| option == item) {
            return Err(FormError::UnknownOption {
                field: field.to_string(),
                option: item.to_string(),
            });
        }

        let current = self
            .get(field)
            .and_then(Value::as_list)
            .unwrap_or_default();
        Ok(self.with_value(field, Value::List(toggle(current, item))))
    }

    pub fn is_selected(&self, field: &str, item: &str) -> bool {
        self.get(field)
            .and_then(Value::as_list)
            .is_some_and(|items| items.iter().any(|selected| selected == item))
    }
}

#[cfg(test)]
mod tests {
    use super::toggle;
    use crate::core::form_state::FormState;
    use crate::core::schema::FormSchema;
    use crate::core::value::Value;
    use crate::error::FormError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn toggle_appends_missing_item() {
        assert_eq!(
            toggle(&strings(&["Art"]), "Music"),
            strings(&["Art", "Music"])
        );
    }

    #[test]
    fn toggle_removes_present_item_and_keeps_order() {
        assert_eq!(
            toggle(&strings(&["Art", "Music", "Sports"]), "Music"),
            strings(&["Art", "Sports"])
        );
    }

    #[test]
    fn double_toggle_restores_selection() {
        let original = strings(&["Reading", "Gaming"]);
        for item in ["Reading", "Cooking"] {
            let once = toggle(&original, item);
            let twice = toggle(&once, item);
            let mut restored = twice.clone();
            restored.sort();
            let mut expected = original.clone();
            expected.sort();
            assert_eq!(restored, expected, "double toggle of {item}");
        }
    }

    #[test]
    fn items_appear_at_most_once() {
        let selection = toggle(&toggle(&[], "Art"), "Art");
        assert!(selection.is_empty());
        let selection = toggle(&toggle(&[], "Art"), "Music");
        assert_eq!(selection.iter().filter(|item| *item == "Art").count(), 1);
    }

    #[test]
    fn form_toggle_updates_hobbies_only() {
        let state = FormState::from_schema(FormSchema::preference());
        let next = state
            .toggle_item("preferred_hobbies", "Cooking")
            .expect("toggle");
        assert!(next.is_selected("preferred_hobbies", "Cooking"));
        assert_eq!(
            next.get("preferred_hobbies"),
            Some(&Value::List(strings(&["Cooking"])))
        );
        assert_eq!(next.get("occupation"), state.get("occupation"));
    }

    #[test]
    fn form_toggle_rejects_unknown_hobby_and_plain_fields() {
        let state = FormState::from_schema(FormSchema::preference());
        assert!(matches!(
            state.toggle_item("preferred_hobbies", "Skydiving"),
            Err(FormError::UnknownOption { .. })
        ));
        assert!(matches!(
            state.toggle_item("occupation", "Art"),
            Err(FormError::KindMismatch { .. })
        ));
    }
}
