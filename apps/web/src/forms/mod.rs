// Form validation
// Each form turns raw submitted fields into either normalized values or a
// bound form carrying the submission and its field errors

pub mod category_form;
pub mod page_form;
pub mod user_form;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub use category_form::CategoryForm;
pub use page_form::PageForm;
pub use user_form::{Upload, UserForm, UserInput, UserProfileForm, UserProfileInput};

/// Raw submitted fields, keyed by field name
pub type FormData = HashMap<String, String>;

pub(crate) const REQUIRED: &str = "This field is required.";

/// Outcome of validating a submission
#[derive(Debug)]
pub enum Validated<T> {
    Valid(T),
    Invalid(BoundForm),
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }
}

/// Submitted data plus field errors, ready to re-render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundForm {
    pub data: BTreeMap<String, String>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl BoundForm {
    /// An unbound form with no data and no errors
    pub fn empty() -> Self {
        Self::default()
    }

    /// Binds the submitted values of `fields`; other keys are ignored
    pub fn bind(data: &FormData, fields: &[&str]) -> Self {
        Self {
            data: fields
                .iter()
                .filter_map(|f| data.get(*f).map(|v| (f.to_string(), v.clone())))
                .collect(),
            errors: BTreeMap::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn with_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.add_error(field, message);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Trimmed value of a field, empty when absent
pub(crate) fn field<'a>(data: &'a FormData, name: &str) -> &'a str {
    data.get(name).map(|v| v.trim()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_keeps_only_named_fields() {
        let mut data = FormData::new();
        data.insert("username".to_string(), "jill".to_string());
        data.insert("password".to_string(), "secret".to_string());

        let form = BoundForm::bind(&data, &["username", "email"]);

        assert_eq!(form.data.get("username").map(String::as_str), Some("jill"));
        assert!(!form.data.contains_key("password"));
        assert!(!form.data.contains_key("email"));
        assert!(!form.has_errors());
    }

    #[test]
    fn errors_accumulate_per_field() {
        let form = BoundForm::empty()
            .with_error("name", "first")
            .with_error("name", "second");

        assert_eq!(form.errors["name"], vec!["first", "second"]);
    }
}
