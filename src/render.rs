//! Serving views for a built schema: the CoreJSON document, a `schema.js` script that
//! loads it into a CoreAPI JavaScript client, and an HTML documentation page.

use crate::apischema::render_form;
use crate::codec;
use crate::coreapi::{Document, Link, Location};
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

const SCHEMA_JS_TEMPLATE: &str = "apistar/schema.js";
const DOCS_TEMPLATE: &str = "apistar/docs/index.html";

pub const JAVASCRIPT_MEDIA_TYPE: &str = "application/javascript";
pub const HTML_MEDIA_TYPE: &str = "text/html; charset=utf-8";

/// Rendered content together with its media type
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub content: String,
    pub content_type: &'static str,
}

/// Settings of the documentation page
#[derive(Debug, Clone)]
pub struct DocsOptions {
    /// Prefix of static asset URLs
    pub static_url: String,
    /// Client languages shown in code samples
    pub langs: Vec<String>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            static_url: "/static/".to_string(),
            langs: vec![
                "python".to_string(),
                "javascript".to_string(),
                "shell".to_string(),
            ],
        }
    }
}

/// The built-in templates, loaded into a [`Tera`] instance
pub struct Templates {
    tera: Tera,
    options: DocsOptions,
}

impl Templates {
    pub fn new(options: DocsOptions) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (SCHEMA_JS_TEMPLATE, include_str!("../templates/schema.js")),
            (DOCS_TEMPLATE, include_str!("../templates/docs/index.html")),
        ])?;

        tera.register_function(
            "static",
            StaticUrl {
                prefix: options.static_url.clone(),
            },
        );

        Ok(Self { tera, options })
    }

    pub fn options(&self) -> &DocsOptions {
        &self.options
    }
}

/// `static(path=..)`: URL of a static asset
struct StaticUrl {
    prefix: String,
}

impl tera::Function for StaticUrl {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        match args.get("path").and_then(tera::Value::as_str) {
            Some(path) => Ok(tera::Value::String(format!("{}{}", self.prefix, path))),
            None => Err(tera::Error::msg("static() takes a `path` argument")),
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct DocumentView<'a> {
    url: &'a str,
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct LinkView<'a> {
    name: &'a str,
    anchor: String,
    url: &'a str,
    action: &'a str,
    title: &'a str,
    description: &'a str,
    fields: Vec<FieldView<'a>>,
    locations: Vec<LocationView<'a>>,
    form: String,
}

#[derive(Serialize)]
struct LocationView<'a> {
    location: &'static str,
    label: &'static str,
    fields: Vec<FieldView<'a>>,
}

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'a str,
    required: bool,
    location: &'static str,
    schema_type: &'static str,
    description: &'a str,
}

impl<'a> LinkView<'a> {
    fn new(name: &'a str, link: &'a Link) -> Self {
        let locations = Location::ALL
            .into_iter()
            .filter_map(|location| {
                let fields: Vec<_> = link
                    .fields_in(location)
                    .into_iter()
                    .map(FieldView::new)
                    .collect();
                (!fields.is_empty()).then(|| LocationView {
                    location: location.as_str(),
                    label: location_label(location),
                    fields,
                })
            })
            .collect();

        Self {
            name,
            anchor: name.replace(|c: char| !c.is_ascii_alphanumeric() && c != '_', "-"),
            url: &link.url,
            action: &link.action,
            title: &link.title,
            description: &link.description,
            fields: link.fields.iter().map(FieldView::new).collect(),
            locations,
            form: render_form(link),
        }
    }
}

impl<'a> FieldView<'a> {
    fn new(field: &'a crate::coreapi::Field) -> Self {
        Self {
            name: &field.name,
            required: field.required,
            location: field.location.as_str(),
            schema_type: field.schema.as_ref().map_or("string", |schema| schema.type_id()),
            description: &field.description,
        }
    }
}

fn location_label(location: Location) -> &'static str {
    match location {
        Location::Path => "Path Parameters",
        Location::Query => "Query Parameters",
        Location::Form => "Form Parameters",
        Location::Body => "Request Body",
        Location::Header => "Header Parameters",
    }
}

/// The schema as CoreJSON
pub fn serve_schema(document: &Document) -> Result<Rendered> {
    let bytes = codec::encode(document)?;
    Ok(Rendered {
        content: String::from_utf8_lossy(&bytes).into_owned(),
        content_type: codec::MEDIA_TYPE,
    })
}

/// A script that decodes the embedded CoreJSON schema into `window.schema`
pub fn serve_schema_js(document: &Document, templates: &Templates) -> Result<Rendered> {
    let base64_schema = STANDARD.encode(codec::encode(document)?);
    debug!("Embedding {} bytes of base64 schema", base64_schema.len());

    let mut context = Context::new();
    context.insert("base64_schema", &base64_schema);

    Ok(Rendered {
        content: templates.tera.render(SCHEMA_JS_TEMPLATE, &context)?,
        content_type: JAVASCRIPT_MEDIA_TYPE,
    })
}

/// HTML documentation listing every link with code samples and an interaction form
pub fn serve_docs(document: &Document, templates: &Templates) -> Result<Rendered> {
    let links: Vec<_> = document
        .links()
        .map(|(name, link)| LinkView::new(name, link))
        .collect();

    let mut context = Context::new();
    context.insert(
        "document",
        &DocumentView {
            url: document.url.as_deref().unwrap_or_default(),
            title: &document.title,
            description: &document.description,
        },
    );
    context.insert("links", &links);
    context.insert("langs", &templates.options.langs);

    Ok(Rendered {
        content: templates.tera.render(DOCS_TEMPLATE, &context)?,
        content_type: HTML_MEDIA_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coreapi::{Field, Schema};
    use indexmap::IndexMap;

    fn document() -> Document {
        let mut content = IndexMap::new();
        let mut get_user = Link::new(
            "/users/{id}",
            "GET",
            vec![
                Field::new("id", Location::Path, true).with_schema(Schema::integer()),
                Field::new("verbose", Location::Query, false)
                    .with_schema(Schema::boolean())
                    .with_description("Include <details>"),
            ],
        );
        get_user.title = "Fetch a user".to_string();
        content.insert("get_user".to_string(), get_user);
        content.insert("health".to_string(), Link::new("/health", "GET", vec![]));

        Document::new(Some("/schema/".to_string()), content).with_title("Users & Co")
    }

    #[test]
    fn test_serve_schema() {
        let rendered = serve_schema(&document()).unwrap();

        assert_eq!(rendered.content_type, "application/coreapi+json");
        assert!(rendered.content.starts_with(r#"{"_type":"document""#));
    }

    #[test]
    fn test_serve_schema_js_embeds_base64() {
        let document = document();
        let templates = Templates::new(DocsOptions::default()).unwrap();

        let rendered = serve_schema_js(&document, &templates).unwrap();

        let expected = STANDARD.encode(codec::encode(&document).unwrap());
        assert_eq!(rendered.content_type, "application/javascript");
        assert!(rendered.content.contains(&format!("atob('{}')", expected)));
    }

    #[test]
    fn test_serve_docs_lists_links() {
        let templates = Templates::new(DocsOptions::default()).unwrap();

        let rendered = serve_docs(&document(), &templates).unwrap();
        let html = &rendered.content;

        assert_eq!(rendered.content_type, "text/html; charset=utf-8");
        assert!(html.contains("<title>Users &amp; Co</title>"));
        assert!(html.contains("id=\"get_user\""));
        assert!(html.contains("id=\"health\""));
        assert!(html.contains("Fetch a user"));
        assert!(html.contains("Path Parameters"));
        assert!(html.contains("Query Parameters"));
        assert!(!html.contains("Form Parameters"));
        assert!(html.contains("Include &lt;details&gt;"));
        assert!(html.contains("data-language=\"shell\""));
        assert!(html.contains("coreapi action get_user -p id=... -p verbose=..."));
    }

    #[test]
    fn test_docs_forms_are_not_escaped() {
        let templates = Templates::new(DocsOptions::default()).unwrap();
        let html = serve_docs(&document(), &templates).unwrap().content;

        assert!(html.contains("<div class=\"form-group\">"));
        assert!(html.contains("type=\"checkbox\" name=\"verbose\""));
    }

    #[test]
    fn test_static_prefix() {
        let options = DocsOptions {
            static_url: "https://cdn.example.com/assets/".to_string(),
            ..Default::default()
        };
        let templates = Templates::new(options).unwrap();

        let html = serve_docs(&document(), &templates).unwrap().content;

        assert!(html.contains("href=\"https://cdn.example.com/assets/css/docs.css\""));
        assert!(!html.contains("/static/"));
    }

    #[test]
    fn test_custom_langs() {
        let options = DocsOptions {
            langs: vec!["shell".to_string()],
            ..Default::default()
        };
        let templates = Templates::new(options).unwrap();

        let html = serve_docs(&document(), &templates).unwrap().content;

        assert!(!html.contains("data-language=\"python\""));
        // autoescaping turns `/` into `&#x2F;`
        assert!(html.contains("$ coreapi get &#x2F;schema&#x2F;"));
    }

    #[test]
    fn test_template_names() {
        let templates = Templates::new(DocsOptions::default()).unwrap();
        let mut names: Vec<_> = templates.tera.get_template_names().collect();
        names.sort_unstable();

        assert_eq!(names, vec!["apistar/docs/index.html", "apistar/schema.js"]);
    }
}
