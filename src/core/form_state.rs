use crate::core::schema::{FieldKind, FieldSpec, FormSchema};
use crate::core::value::Value;
use crate::error::FormError;
use indexmap::IndexMap;
use std::sync::Arc;

/// What a control reports when it changes. The kind is carried explicitly so
/// the reducer never guesses from the shape of the value.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangePayload {
    Text(String),
    /// Checkbox state, or a coerced tri-state selection (`None` = unset).
    Boolean(Option<bool>),
}

impl ChangePayload {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub payload: ChangePayload,
}

impl FieldChange {
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            payload: ChangePayload::Text(value.into()),
        }
    }

    /// A checkbox commits its checked state, not its text value.
    pub fn checkbox(field: impl Into<String>, checked: bool) -> Self {
        Self {
            field: field.into(),
            payload: ChangePayload::Boolean(Some(checked)),
        }
    }

    pub fn boolean(field: impl Into<String>, value: Option<bool>) -> Self {
        Self {
            field: field.into(),
            payload: ChangePayload::Boolean(value),
        }
    }
}

/// Ordered field values of one form instance.
///
/// Every mutation returns a new state; the receiver is never modified, so a
/// rejected change leaves the caller holding the previous state.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Arc<FormSchema>,
    values: IndexMap<String, Value>,
}

impl FormState {
    pub fn from_schema(schema: FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|spec| (spec.id.clone(), spec.kind.default_value()))
            .collect();
        Self {
            schema: Arc::new(schema),
            values,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field mutation reducer: the named field replaced, everything else equal.
    pub fn apply(&self, change: FieldChange) -> Result<Self, FormError> {
        let spec = self.spec(&change.field)?;
        let value = match (&spec.kind, change.payload) {
            (kind, ChangePayload::Text(text)) if kind.accepts_text() => {
                if let FieldKind::Choice(options) = kind
                    && !options.iter().any(|option| option == &text)
                {
                    return Err(FormError::UnknownOption {
                        field: change.field,
                        option: text,
                    });
                }
                Value::Text(text)
            }
            (FieldKind::TriState, ChangePayload::Boolean(flag)) => Value::from(flag),
            (_, payload) => {
                return Err(FormError::KindMismatch {
                    field: change.field,
                    payload: payload.kind_name(),
                });
            }
        };
        Ok(self.with_value(change.field.as_str(), value))
    }

    /// Equal to `initial` field for field, keeping this instance's schema.
    pub fn reset_to(&self, initial: &FormState) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            values: initial.values.clone(),
        }
    }

    pub fn defaults(&self) -> Self {
        Self::from_schema((*self.schema).clone())
    }

    /// Required fields whose current value is empty, in schema order.
    pub fn missing_required(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| self.values.get(&spec.id).is_none_or(Value::is_empty))
            .map(|spec| spec.id.as_str())
            .collect()
    }

    /// All fields in schema order, empty and unset ones included.
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }

    pub(crate) fn spec(&self, field: &str) -> Result<&FieldSpec, FormError> {
        self.schema
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    pub(crate) fn with_value(&self, field: &str, value: Value) -> Self {
        let mut values = self.values.clone();
        if let Some(slot) = values.get_mut(field) {
            *slot = value;
        }
        Self {
            schema: Arc::clone(&self.schema),
            values,
        }
    }
}

impl PartialEq for FormState {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}
