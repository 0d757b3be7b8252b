//! CoreAPI value objects describing an API: [`Document`], [`Link`] and [`Field`], plus the
//! coreschema-style [`Schema`] used for field types and HTML form rendering.
//!
//! These types only describe routes. Nothing here performs requests or validates data.

use indexmap::IndexMap;
use std::fmt;

/// A CoreAPI document: the top level of an API schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Where the schema itself is served, if known
    pub url: Option<String>,
    pub title: String,
    pub description: String,
    /// Links keyed by handler name, in route order
    pub content: IndexMap<String, Link>,
}

impl Document {
    pub fn new(url: Option<String>, content: IndexMap<String, Link>) -> Self {
        Self {
            url,
            content,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Iterate over `(name, link)` pairs in document order
    pub fn links(&self) -> impl Iterator<Item = (&String, &Link)> {
        self.content.iter()
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    /// URI template of the operation
    pub url: String,
    /// HTTP method
    pub action: String,
    /// Request body media type, empty when not known
    pub encoding: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<Field>,
}

impl Link {
    pub fn new(url: impl Into<String>, action: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            url: url.into(),
            action: action.into(),
            fields,
            ..Default::default()
        }
    }

    /// Fields of this link found in `location`
    pub fn fields_in(&self, location: Location) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|field| field.location == location)
            .collect()
    }
}

/// A parameter of a [`Link`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub required: bool,
    pub location: Location,
    pub schema: Option<Schema>,
    pub description: String,
}

impl Field {
    pub fn new(name: impl Into<String>, location: Location, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            location,
            schema: None,
            description: String::new(),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Where a field is sent in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Path,
    Query,
    Form,
    Body,
    Header,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Path,
        Location::Query,
        Location::Form,
        Location::Body,
        Location::Header,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Form => "form",
            Location::Body => "body",
            Location::Header => "header",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.as_str() == name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coreschema-style type description.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Enum(Vec<String>),
    Array(Box<Schema>),
    Object {
        properties: IndexMap<String, Schema>,
        required: Vec<String>,
    },
    Anything,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: String::new(),
            description: String::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    pub fn anything() -> Self {
        Self::of(SchemaKind::Anything)
    }

    pub fn enumeration(values: Vec<String>) -> Self {
        Self::of(SchemaKind::Enum(values))
    }

    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array(Box::new(items)))
    }

    pub fn object(properties: IndexMap<String, Schema>, required: Vec<String>) -> Self {
        Self::of(SchemaKind::Object {
            properties,
            required,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The CoreJSON `_type` of this schema
    pub fn type_id(&self) -> &'static str {
        match self.kind {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::Array(_) => "array",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Anything => "anything",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }
}

/// Render an object schema as the inputs of an HTML form.
///
/// Each property becomes a `form-group` with a label and an input suited to its type.
/// Non-object schemas render a single input named `value`.
pub fn render_to_form(schema: &Schema) -> String {
    let mut html = String::new();

    match &schema.kind {
        SchemaKind::Object {
            properties,
            required,
        } => {
            for (name, property) in properties {
                render_form_group(&mut html, name, property, required.contains(name));
            }
        }
        _ => render_form_group(&mut html, "value", schema, false),
    }

    html
}

fn render_form_group(html: &mut String, name: &str, schema: &Schema, required: bool) {
    let name = tera::escape_html(name);
    let label = if schema.title.is_empty() {
        name.clone()
    } else {
        tera::escape_html(&schema.title)
    };
    let required_attr = if required { " required" } else { "" };

    html.push_str("<div class=\"form-group\">\n");

    match &schema.kind {
        SchemaKind::Boolean => {
            html.push_str(&format!(
                "  <div class=\"checkbox\"><label><input type=\"checkbox\" name=\"{}\"{}> {}</label></div>\n",
                name, required_attr, label
            ));
        }
        SchemaKind::Enum(values) => {
            html.push_str(&format!("  <label for=\"{}\">{}</label>\n", name, label));
            html.push_str(&format!(
                "  <select class=\"form-control\" name=\"{}\"{}>\n",
                name, required_attr
            ));
            for value in values {
                let value = tera::escape_html(value);
                html.push_str(&format!("    <option value=\"{}\">{}</option>\n", value, value));
            }
            html.push_str("  </select>\n");
        }
        SchemaKind::Integer | SchemaKind::Number => {
            let step = if matches!(schema.kind, SchemaKind::Integer) { "1" } else { "any" };
            html.push_str(&format!("  <label for=\"{}\">{}</label>\n", name, label));
            html.push_str(&format!(
                "  <input type=\"number\" step=\"{}\" class=\"form-control\" name=\"{}\"{}>\n",
                step, name, required_attr
            ));
        }
        SchemaKind::Array(_) | SchemaKind::Object { .. } | SchemaKind::Anything => {
            html.push_str(&format!("  <label for=\"{}\">{}</label>\n", name, label));
            html.push_str(&format!(
                "  <textarea class=\"form-control\" name=\"{}\" data-type=\"json\"{}></textarea>\n",
                name, required_attr
            ));
        }
        SchemaKind::String => {
            html.push_str(&format!("  <label for=\"{}\">{}</label>\n", name, label));
            html.push_str(&format!(
                "  <input type=\"text\" class=\"form-control\" name=\"{}\"{}>\n",
                name, required_attr
            ));
        }
    }

    if !schema.description.is_empty() {
        html.push_str(&format!(
            "  <p class=\"help-block\">{}</p>\n",
            tera::escape_html(&schema.description)
        ));
    }
    html.push_str("</div>\n");
}
