use super::page_form::normalize_url;
use super::{field, BoundForm, FormData, Validated, REQUIRED};
use crate::domain::repositories::RepositoryError;
use crate::domain::user::{Email, Username};

/// Fields echoed back into a re-rendered account form; never the password
const USER_FIELDS: &[&str] = &["username", "email"];

/// An uploaded file from a multipart submission
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Browsers send an empty part when no file was chosen
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().unwrap_or_default().is_empty()
    }
}

/// Validated account fields; the password is still plaintext here
#[derive(Debug)]
pub struct UserInput {
    pub username: Username,
    pub email: Option<Email>,
    pub password: String,
}

/// Validated profile fields
#[derive(Debug)]
pub struct UserProfileInput {
    pub website: Option<String>,
    pub picture: Option<Upload>,
}

/// Account form: `username`, `email` (optional), `password`
pub struct UserForm;

impl UserForm {
    pub fn bind(data: &FormData) -> BoundForm {
        BoundForm::bind(data, USER_FIELDS)
    }

    pub fn validate(data: &FormData) -> Validated<UserInput> {
        let mut form = UserForm::bind(data);

        let username = Username::new(field(data, "username"))
            .map_err(|e| form.add_error("username", e))
            .ok();

        let email = match field(data, "email") {
            "" => Some(None),
            raw => Email::new(raw)
                .map(Some)
                .map_err(|e| form.add_error("email", e))
                .ok(),
        };

        // Passwords are taken verbatim, surrounding whitespace included
        let password = data.get("password").cloned().unwrap_or_default();
        if password.is_empty() {
            form.add_error("password", REQUIRED);
        }

        match (username, email) {
            (Some(username), Some(email)) if !form.has_errors() => Validated::Valid(UserInput {
                username,
                email,
                password,
            }),
            _ => Validated::Invalid(form),
        }
    }

    /// Re-binds a submission whose username was taken
    pub fn conflict(data: &FormData, err: &RepositoryError) -> Option<BoundForm> {
        match err {
            RepositoryError::Conflict { field: "username", .. } => Some(
                UserForm::bind(data)
                    .with_error("username", "A user with that username already exists."),
            ),
            _ => None,
        }
    }
}

/// Profile form: `website` and `picture`, both optional
pub struct UserProfileForm;

impl UserProfileForm {
    pub fn bind(data: &FormData) -> BoundForm {
        BoundForm::bind(data, &["website"])
    }

    pub fn validate(data: &FormData, picture: Option<Upload>) -> Validated<UserProfileInput> {
        let mut form = UserProfileForm::bind(data);

        let website = match field(data, "website") {
            "" => None,
            raw => normalize_url(raw)
                .map(String::from)
                .map_err(|e| form.add_error("website", e))
                .ok(),
        };

        let picture = picture.filter(|upload| !upload.is_empty());
        if let Some(upload) = &picture {
            let is_image = upload
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.starts_with("image/"));
            if !is_image {
                form.add_error(
                    "picture",
                    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
                );
            }
        }

        if form.has_errors() {
            Validated::Invalid(form)
        } else {
            Validated::Valid(UserProfileInput { website, picture })
        }
    }
}
