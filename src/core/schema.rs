use crate::core::value::Value;

pub const HOBBIES: &[&str] = &[
    "Reading",
    "Traveling",
    "Cooking",
    "Music",
    "Sports",
    "Gaming",
    "Art",
];

pub const GENDER_OPTIONS: &[&str] = &["", "Male", "Female", "Non-Binary"];

pub const EDUCATION_OPTIONS: &[&str] = &[
    "",
    "High School",
    "Bachelor's Degree",
    "Master's Degree",
    "PhD",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text that is masked when drawn.
    Secret,
    /// Numeric input kept as the raw text the user typed.
    Number,
    /// Single choice; the empty string is the "not chosen" option.
    Choice(Vec<String>),
    /// Unset, `true` or `false`.
    TriState,
    MultiSelect(Vec<String>),
}

impl FieldKind {
    pub fn default_value(&self) -> Value {
        match self {
            Self::Text | Self::Secret | Self::Number | Self::Choice(_) => {
                Value::Text(String::new())
            }
            // Unset, never `false`; a post-success reset comes back here too.
            Self::TriState => Value::None,
            Self::MultiSelect(_) => Value::List(Vec::new()),
        }
    }

    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Secret | Self::Number | Self::Choice(_)
        )
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::Choice(options) | Self::MultiSelect(options) => options.as_slice(),
            _ => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: String,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.fields.as_slice()
    }

    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.id == id)
    }

    pub fn registration() -> Self {
        Self::new()
            .field(
                FieldSpec::new("username", "Username", FieldKind::Text)
                    .required()
                    .with_placeholder("Enter your username"),
            )
            .field(
                FieldSpec::new("email", "Email", FieldKind::Text)
                    .required()
                    .with_placeholder("info@yourmail.com"),
            )
            .field(
                FieldSpec::new("password", "Password", FieldKind::Secret)
                    .required()
                    .with_placeholder("Enter your password"),
            )
            .field(
                FieldSpec::new("confirmPassword", "Confirm Password", FieldKind::Secret)
                    .required()
                    .with_placeholder("Confirm your password"),
            )
            .field(
                FieldSpec::new("bio", "Bio", FieldKind::Text)
                    .with_placeholder("Write a short bio about yourself"),
            )
    }

    pub fn preference() -> Self {
        Self::new()
            .field(
                FieldSpec::new(
                    "gender_preference",
                    "Gender Preference",
                    FieldKind::Choice(owned(GENDER_OPTIONS)),
                )
                .required()
                .with_placeholder("Select Gender Preference"),
            )
            .field(FieldSpec::new("age_min", "Min Age", FieldKind::Number).required())
            .field(FieldSpec::new("age_max", "Max Age", FieldKind::Number).required())
            .field(FieldSpec::new("radius_km", "Radius (km)", FieldKind::Number).required())
            .field(FieldSpec::new(
                "preferred_hobbies",
                "Preferred Hobbies",
                FieldKind::MultiSelect(owned(HOBBIES)),
            ))
            .field(FieldSpec::new(
                "preferred_habitat",
                "Preferred Habitat",
                FieldKind::Text,
            ))
            .field(
                FieldSpec::new("smoking_preference", "Smoking Preference", FieldKind::TriState)
                    .with_placeholder("Select Smoking Preference"),
            )
            .field(
                FieldSpec::new(
                    "drinking_preference",
                    "Drinking Preference",
                    FieldKind::TriState,
                )
                .with_placeholder("Select Drinking Preference"),
            )
            .field(
                FieldSpec::new(
                    "education_level",
                    "Education Level",
                    FieldKind::Choice(owned(EDUCATION_OPTIONS)),
                )
                .with_placeholder("Select Education Level"),
            )
            .field(FieldSpec::new("occupation", "Occupation", FieldKind::Text))
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
