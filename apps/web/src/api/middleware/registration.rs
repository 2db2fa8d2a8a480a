use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::api::errors::AppError;
use crate::forms::{FormData, Upload};

/// Name of the multipart field carrying the profile picture
const PICTURE_FIELD: &str = "picture";

/// A registration submission, from either a multipart or urlencoded body
pub struct RegistrationSubmission {
    pub fields: FormData,
    pub picture: Option<Upload>,
}

#[async_trait]
impl<S> FromRequest<S> for RegistrationSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<FormData>::from_request(req, state)
                .await
                .map_err(|e| AppError::new(e.status(), e.body_text()))?;
            return Ok(Self {
                fields,
                picture: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::new(e.status(), e.body_text()))?;

        let mut fields = FormData::new();
        let mut picture = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == PICTURE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::new(e.status(), e.body_text()))?;
                picture = Some(Upload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::new(e.status(), e.body_text()))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, picture })
    }
}
