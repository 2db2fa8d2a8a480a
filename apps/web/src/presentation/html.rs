use serde_json::Value;

use super::templates;
use super::{RenderError, Renderer};

/// Built-in HTML templates
///
/// Every value taken from the context is HTML-escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        let (title, body) = match template {
            templates::INDEX => ("Index", index(context)),
            templates::ABOUT => ("About", about(context)),
            templates::CATEGORY => ("Category", category(context)),
            templates::ADD_CATEGORY => ("Add a Category", add_category(context)),
            templates::ADD_PAGE => ("Add a Page", add_page(context)),
            templates::REGISTER => ("Register", register(context)),
            templates::LOGIN => ("Login", login()),
            templates::RESTRICTED => ("Restricted", restricted(context)),
            other => return Err(RenderError::UnknownTemplate(other.to_string())),
        };

        Ok(layout(title, &context["user"], &body))
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped string value of `key`, empty when missing
fn text(value: &Value, key: &str) -> String {
    escape(value[key].as_str().unwrap_or_default())
}

fn layout(title: &str, user: &Value, body: &str) -> String {
    let nav = if user.is_null() {
        r#"<a href="/register/">Sign Up</a> | <a href="/login/">Login</a>"#.to_string()
    } else {
        format!(
            r#"Hello {}! | <a href="/restricted/">Restricted Page</a> | <a href="/logout/">Logout</a>"#,
            text(user, "username")
        )
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>Rango - {title}</title>\n</head>\n<body>\n",
            "<nav><a href=\"/\">Home</a> | <a href=\"/about/\">About</a> | ",
            "<a href=\"/category/add/\">Add a New Category</a> | {nav}</nav>\n",
            "{body}\n</body>\n</html>\n"
        ),
        title = title,
        nav = nav,
        body = body
    )
}

fn index(ctx: &Value) -> String {
    let mut out = format!(
        "<h1>Rango says...</h1>\n<p>hey there partner!</p>\n<strong>{}</strong>\n",
        text(ctx, "boldmessage")
    );

    out.push_str("<h2>Most Liked Categories</h2>\n");
    match ctx["categories"].as_array().filter(|c| !c.is_empty()) {
        Some(categories) => {
            out.push_str("<ul>\n");
            for c in categories {
                out.push_str(&format!(
                    "<li><a href=\"/category/{}/\">{}</a></li>\n",
                    text(c, "slug"),
                    text(c, "name")
                ));
            }
            out.push_str("</ul>\n");
        }
        None => out.push_str("<strong>There are no categories present.</strong>\n"),
    }

    out.push_str("<h2>Most Viewed Pages</h2>\n");
    match ctx["pages"].as_array().filter(|p| !p.is_empty()) {
        Some(pages) => out.push_str(&page_list(pages)),
        None => out.push_str("<strong>There are no pages present.</strong>\n"),
    }

    out
}

fn page_list(pages: &[Value]) -> String {
    let mut out = String::from("<ul>\n");
    for p in pages {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            text(p, "url"),
            text(p, "title")
        ));
    }
    out.push_str("</ul>\n");
    out
}

fn about(ctx: &Value) -> String {
    format!(
        "<h1>Rango says...</h1>\n<p>here is the about page.</p>\n<strong>{}</strong>\n",
        text(ctx, "boldmessage")
    )
}

fn category(ctx: &Value) -> String {
    let category = &ctx["category"];
    if category.is_null() {
        return "<strong>The specified category does not exist.</strong>\n".to_string();
    }

    let mut out = format!("<h1>{}</h1>\n", text(category, "name"));
    match ctx["pages"].as_array().filter(|p| !p.is_empty()) {
        Some(pages) => out.push_str(&page_list(pages)),
        None => out.push_str("<strong>No pages currently in category.</strong>\n"),
    }
    out.push_str(&format!(
        "<a href=\"/category/{}/page/add/\">Add a Page</a>\n",
        text(category, "slug")
    ));
    out
}

/// One labelled input bound to `form.data[name]`, followed by its errors
fn field(form: &Value, name: &str, label: &str, kind: &str) -> String {
    let mut out = String::new();

    if let Some(errors) = form["errors"][name].as_array() {
        out.push_str("<ul class=\"errorlist\">");
        for e in errors {
            out.push_str(&format!("<li>{}</li>", escape(e.as_str().unwrap_or_default())));
        }
        out.push_str("</ul>\n");
    }

    let value = match kind {
        "password" | "file" => String::new(),
        _ => format!(r#" value="{}""#, text(&form["data"], name)),
    };

    out.push_str(&format!(
        "<label for=\"id_{name}\">{label}</label> <input type=\"{kind}\" name=\"{name}\" id=\"id_{name}\"{value}><br>\n",
        name = name,
        label = label,
        kind = kind,
        value = value
    ));
    out
}

fn add_category(ctx: &Value) -> String {
    let form = &ctx["form"];
    format!(
        concat!(
            "<h1>Add a Category</h1>\n",
            "<form id=\"category_form\" method=\"post\" action=\"/category/add/\">\n",
            "{}<input type=\"submit\" name=\"submit\" value=\"Create Category\">\n</form>\n"
        ),
        field(form, "name", "Please enter the category name.", "text")
    )
}

fn add_page(ctx: &Value) -> String {
    let form = &ctx["form"];
    let category = &ctx["category"];
    format!(
        concat!(
            "<h1>Add a Page to {name}</h1>\n",
            "<form id=\"page_form\" method=\"post\" action=\"/category/{slug}/page/add/\">\n",
            "{title}{url}<input type=\"submit\" name=\"submit\" value=\"Add Page\">\n</form>\n"
        ),
        name = text(category, "name"),
        slug = text(category, "slug"),
        title = field(form, "title", "Please enter the title of the page.", "text"),
        url = field(form, "url", "Please enter the URL of the page.", "url")
    )
}

fn register(ctx: &Value) -> String {
    if ctx["registered"].as_bool().unwrap_or(false) {
        return concat!(
            "<h1>Register for Rango</h1>\n",
            "<strong>Rango says: <strong>thank you for registering!</strong></strong>\n",
            "<a href=\"/\">Return to the homepage.</a>\n"
        )
        .to_string();
    }

    let user_form = &ctx["user_form"];
    let profile_form = &ctx["profile_form"];
    format!(
        concat!(
            "<h1>Register for Rango</h1>\n",
            "<form id=\"user_form\" method=\"post\" action=\"/register/\" enctype=\"multipart/form-data\">\n",
            "{}{}{}{}{}",
            "<input type=\"submit\" name=\"submit\" value=\"Register\">\n</form>\n"
        ),
        field(user_form, "username", "Username", "text"),
        field(user_form, "email", "Email", "email"),
        field(user_form, "password", "Password", "password"),
        field(profile_form, "website", "Website", "url"),
        field(profile_form, "picture", "Picture", "file")
    )
}

fn login() -> String {
    concat!(
        "<h1>Login to Rango</h1>\n",
        "<form id=\"login_form\" method=\"post\" action=\"/login/\">\n",
        "Username: <input type=\"text\" name=\"username\" value=\"\" size=\"50\"><br>\n",
        "Password: <input type=\"password\" name=\"password\" value=\"\" size=\"50\"><br>\n",
        "<input type=\"submit\" value=\"submit\">\n</form>\n"
    )
    .to_string()
}

fn restricted(ctx: &Value) -> String {
    format!(
        "<h1>Restricted page</h1>\n<strong>Since you're logged in, {}, you can see this text!</strong>\n",
        text(&ctx["user"], "username")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_lists_categories_with_escaping() {
        let ctx = json!({
            "boldmessage": "Crunchy",
            "categories": [{ "name": "C & <C++>", "slug": "c-c" }],
            "pages": [],
            "user": null
        });

        let html = HtmlRenderer.render(templates::INDEX, &ctx).unwrap();

        assert!(html.contains(r#"<a href="/category/c-c/">C &amp; &lt;C++&gt;</a>"#));
        assert!(html.contains("There are no pages present."));
        assert!(html.contains("Sign Up"));
    }

    #[test]
    fn missing_category_renders_empty_state() {
        let ctx = json!({ "category": null, "pages": null, "user": null });
        let html = HtmlRenderer.render(templates::CATEGORY, &ctx).unwrap();
        assert!(html.contains("The specified category does not exist."));
    }

    #[test]
    fn category_lists_pages_and_add_link() {
        let ctx = json!({
            "category": { "name": "Python", "slug": "python" },
            "pages": [{ "title": "Docs", "url": "https://docs.python.org/?a=1&b=2" }],
            "user": null
        });

        let html = HtmlRenderer.render(templates::CATEGORY, &ctx).unwrap();

        assert!(html.contains("<li><a href=\"https://docs.python.org/?a=1&amp;b=2\">Docs</a></li>\n"));
        assert!(html.contains("<a href=\"/category/python/page/add/\">Add a Page</a>\n"));
    }

    #[test]
    fn bound_form_shows_errors_and_values() {
        let ctx = json!({
            "form": {
                "data": { "name": "Py\"thon" },
                "errors": { "name": ["Category with this name already exists."] }
            },
            "user": { "username": "leifos" }
        });

        let html = HtmlRenderer.render(templates::ADD_CATEGORY, &ctx).unwrap();

        assert!(html.contains(r#"value="Py&quot;thon""#));
        assert!(html.contains("<li>Category with this name already exists.</li>"));
        assert!(html.contains("Hello leifos!"));
    }

    #[test]
    fn password_is_never_echoed() {
        let ctx = json!({
            "user_form": { "data": { "username": "jill", "password": "secret" }, "errors": {} },
            "profile_form": { "data": {}, "errors": {} },
            "registered": false,
            "user": null
        });

        let html = HtmlRenderer.render(templates::REGISTER, &ctx).unwrap();
        assert!(!html.contains("secret"));
        assert!(html.contains(r#"value="jill""#));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let result = HtmlRenderer.render("rango/missing.html", &json!({}));
        assert!(matches!(result, Err(RenderError::UnknownTemplate(_))));
    }
}
