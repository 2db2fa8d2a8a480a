use url::Url;

use super::{field, BoundForm, FormData, Validated, REQUIRED};
use crate::domain::category::Category;
use crate::domain::page::{Page, TITLE_MAX_LENGTH, URL_MAX_LENGTH};

/// Page submission: `title` and `url`, both required
pub struct PageForm;

impl PageForm {
    /// Validates a page for `category`
    ///
    /// A URL without a scheme is treated as `http://`.
    pub fn validate(data: &FormData, category: &Category) -> Validated<Page> {
        let mut form = BoundForm::bind(data, &["title", "url"]);

        let title = field(data, "title");
        if title.is_empty() {
            form.add_error("title", REQUIRED);
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            form.add_error(
                "title",
                format!("Ensure this value has at most {} characters.", TITLE_MAX_LENGTH),
            );
        }

        let url = match normalize_url(field(data, "url")) {
            Ok(url) => Some(url),
            Err(message) => {
                form.add_error("url", message);
                None
            }
        };

        match url {
            Some(url) if !form.has_errors() => Validated::Valid(Page::new(category, title, url)),
            _ => Validated::Invalid(form),
        }
    }
}

pub(crate) fn normalize_url(raw: &str) -> Result<Url, String> {
    if raw.is_empty() {
        return Err(REQUIRED.to_string());
    }

    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let too_long = || {
        format!(
            "Ensure this value has at most {} characters.",
            URL_MAX_LENGTH
        )
    };

    if candidate.chars().count() > URL_MAX_LENGTH {
        return Err(too_long());
    }

    let url = match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => url,
        _ => return Err("Enter a valid URL.".to_string()),
    };

    // Parsing percent-encodes, so the stored form can outgrow the input
    if url.as_str().len() > URL_MAX_LENGTH {
        return Err(too_long());
    }

    Ok(url)
}
