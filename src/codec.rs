//! CoreJSON encoding of CoreAPI documents.

use crate::coreapi::{Document, Field, Link, Schema, SchemaKind};
use crate::error::Result;
use serde_json::{Map, Value};

/// Media type of CoreJSON documents
pub const MEDIA_TYPE: &str = "application/coreapi+json";

/// Encode a document as compact CoreJSON bytes
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&to_value(document))?)
}

/// The CoreJSON representation of a document as a JSON value
pub fn to_value(document: &Document) -> Value {
    let mut object = Map::new();
    object.insert("_type".to_string(), Value::from("document"));

    let mut meta = Map::new();
    if let Some(url) = document.url.as_deref().filter(|url| !url.is_empty()) {
        meta.insert("url".to_string(), Value::from(url));
    }
    insert_non_empty(&mut meta, "title", &document.title);
    insert_non_empty(&mut meta, "description", &document.description);
    if !meta.is_empty() {
        object.insert("_meta".to_string(), Value::Object(meta));
    }

    for (key, link) in document.links() {
        object.insert(escape_key(key), encode_link(link));
    }

    Value::Object(object)
}

/// Keys starting with `_` are reserved for CoreJSON metadata
fn escape_key(key: &str) -> String {
    if key.starts_with('_') {
        format!("_{}", key)
    } else {
        key.to_string()
    }
}

fn insert_non_empty(object: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        object.insert(key.to_string(), Value::from(value));
    }
}

fn encode_link(link: &Link) -> Value {
    let mut object = Map::new();
    object.insert("_type".to_string(), Value::from("link"));
    insert_non_empty(&mut object, "url", &link.url);
    insert_non_empty(&mut object, "action", &link.action);
    insert_non_empty(&mut object, "encoding", &link.encoding);
    insert_non_empty(&mut object, "title", &link.title);
    insert_non_empty(&mut object, "description", &link.description);
    if !link.fields.is_empty() {
        object.insert(
            "fields".to_string(),
            Value::Array(link.fields.iter().map(encode_field).collect()),
        );
    }
    Value::Object(object)
}

fn encode_field(field: &Field) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), Value::from(field.name.as_str()));
    if field.required {
        object.insert("required".to_string(), Value::Bool(true));
    }
    object.insert("location".to_string(), Value::from(field.location.as_str()));
    if let Some(schema) = &field.schema {
        object.insert("schema".to_string(), encode_schema(schema));
    }
    insert_non_empty(&mut object, "description", &field.description);
    Value::Object(object)
}

fn encode_schema(schema: &Schema) -> Value {
    let mut object = Map::new();
    object.insert("_type".to_string(), Value::from(schema.type_id()));
    object.insert("title".to_string(), Value::from(schema.title.as_str()));
    object.insert("description".to_string(), Value::from(schema.description.as_str()));

    match &schema.kind {
        SchemaKind::Enum(values) => {
            object.insert(
                "enum".to_string(),
                Value::Array(values.iter().map(|v| Value::from(v.as_str())).collect()),
            );
        }
        SchemaKind::Array(items) => {
            object.insert("items".to_string(), encode_schema(items));
        }
        SchemaKind::Object { properties, .. } => {
            let properties = properties
                .iter()
                .map(|(name, property)| (name.clone(), encode_schema(property)))
                .collect();
            object.insert("properties".to_string(), Value::Object(properties));
        }
        _ => {}
    }

    Value::Object(object)
}
