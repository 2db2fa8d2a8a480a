use super::{field, BoundForm, FormData, Validated};
use crate::domain::category::Category;
use crate::domain::repositories::RepositoryError;

/// Category submission: a single required `name`
pub struct CategoryForm;

impl CategoryForm {
    pub fn bind(data: &FormData) -> BoundForm {
        BoundForm::bind(data, &["name"])
    }

    pub fn validate(data: &FormData) -> Validated<Category> {
        match Category::new(field(data, "name")) {
            Ok(category) => Validated::Valid(category),
            Err(message) => {
                Validated::Invalid(CategoryForm::bind(data).with_error("name", message))
            }
        }
    }

    /// Re-binds a submission rejected by the store
    ///
    /// Name and slug collisions are both reported against `name`, the only
    /// field the user controls.
    pub fn conflict(data: &FormData, err: &RepositoryError) -> Option<BoundForm> {
        match err {
            RepositoryError::Conflict { .. } => Some(
                CategoryForm::bind(data)
                    .with_error("name", "Category with this name already exists."),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> FormData {
        FormData::from([("name".to_string(), name.to_string())])
    }

    #[test]
    fn valid_name() {
        match CategoryForm::validate(&data("Django")) {
            Validated::Valid(category) => assert_eq!(category.slug(), "django"),
            Validated::Invalid(form) => panic!("unexpected errors: {:?}", form.errors),
        }
    }

    #[test]
    fn missing_name_is_required() {
        match CategoryForm::validate(&FormData::new()) {
            Validated::Invalid(form) => assert_eq!(form.errors["name"], vec![super::super::REQUIRED]),
            Validated::Valid(_) => panic!("expected invalid form"),
        }
    }

    #[test]
    fn conflict_keeps_submission() {
        let err = RepositoryError::Conflict {
            field: "slug",
            value: "django".to_string(),
        };

        let form = CategoryForm::conflict(&data("DJANGO"), &err).unwrap();

        assert_eq!(form.data["name"], "DJANGO");
        assert!(form.errors["name"][0].contains("already exists"));
    }

    #[test]
    fn non_conflict_errors_are_not_form_errors() {
        let err = RepositoryError::CorruptRow("x".to_string());
        assert!(CategoryForm::conflict(&data("Django"), &err).is_none());
    }
}
