use crate::coreapi::Schema;
use crate::extractor::TypeInfo;
use crate::type_resolver::{FieldDef, PrimitiveType, TypeKind, TypeResolver};
use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;

/// Schema generator - converts Rust types to coreschema-style schemas
pub struct SchemaGenerator {
    /// Type resolver for looking up type definitions
    type_resolver: TypeResolver,
    /// Generated schemas of named project types
    schemas: HashMap<String, Schema>,
    /// Types whose schema is being generated, to stop on recursive types
    in_progress: Vec<String>,
}

/// How a handler parameter type takes part in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// A scalar: integers, floats, `bool`, `char`, strings
    Primitive,
    /// A deserializable project type, or a collection of values
    Schema,
    /// Anything else, typically injected by the framework
    Unsupported,
}

impl SchemaGenerator {
    /// Create a new SchemaGenerator with a TypeResolver
    pub fn new(type_resolver: TypeResolver) -> Self {
        debug!("Initializing SchemaGenerator");
        Self {
            type_resolver,
            schemas: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn type_resolver(&mut self) -> &mut TypeResolver {
        &mut self.type_resolver
    }

    /// Classify a parameter type
    pub fn classify(&mut self, type_info: &TypeInfo) -> TypeClass {
        if TypeResolver::is_primitive(type_info) {
            TypeClass::Primitive
        } else if self.type_resolver.is_schema_type(type_info) {
            TypeClass::Schema
        } else {
            TypeClass::Unsupported
        }
    }

    /// Generate a schema for a type
    pub fn generate_schema(&mut self, type_info: &TypeInfo) -> Schema {
        let type_info = type_info.unwrap_option();

        if type_info.is_vec {
            let items = match type_info.generic_args.first() {
                Some(item) => self.generate_schema(item),
                None => Schema::anything(),
            };
            return Schema::array(items);
        }
        if type_info.is_tuple {
            return Schema::anything();
        }

        let type_name = type_info.name.clone();
        if let Some(cached) = self.schemas.get(&type_name) {
            return cached.clone();
        }
        if self.in_progress.contains(&type_name) {
            debug!("Recursive type {}, emitting an open schema", type_name);
            return Schema::anything().with_title(type_name);
        }

        let Some(resolved) = self.type_resolver.resolve_type(&type_name) else {
            debug!("Unknown type {}, falling back to string", type_name);
            return Schema::string();
        };

        let schema = match resolved.kind {
            TypeKind::Primitive(primitive) => return Self::primitive_to_schema(primitive),
            TypeKind::Newtype(inner) => {
                self.in_progress.push(type_name.clone());
                let schema = self.generate_schema(&inner);
                self.in_progress.pop();
                schema
            }
            TypeKind::Enum(enum_def) if enum_def.unit_only => {
                Schema::enumeration(enum_def.variants).with_title(&type_name)
            }
            TypeKind::Enum(_) => Schema::anything().with_title(&type_name),
            TypeKind::Struct(_) => {
                self.in_progress.push(type_name.clone());
                let fields = self.type_resolver.struct_fields(&type_name).unwrap_or_default();
                let schema = self.generate_object_schema(&fields).with_title(&type_name);
                self.in_progress.pop();
                schema
            }
        };

        let schema = schema.with_description(resolved.docs.join(" "));
        // Nested schemas may hold placeholders for types still being generated
        if self.in_progress.is_empty() {
            self.schemas.insert(type_name, schema.clone());
        }
        schema
    }

    /// Schema of one struct field, described by its doc comment
    pub fn field_schema(&mut self, field: &FieldDef) -> Schema {
        let mut schema = self.generate_schema(&field.type_info);
        if !field.description.is_empty() {
            schema.description = field.description.clone();
        }
        schema
    }

    fn generate_object_schema(&mut self, fields: &[FieldDef]) -> Schema {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for field in fields {
            properties.insert(field.name.clone(), self.field_schema(field));
            if !field.optional {
                required.push(field.name.clone());
            }
        }

        Schema::object(properties, required)
    }

    fn primitive_to_schema(primitive: PrimitiveType) -> Schema {
        match primitive {
            PrimitiveType::String => Schema::string(),
            PrimitiveType::Integer => Schema::integer(),
            PrimitiveType::Number => Schema::number(),
            PrimitiveType::Boolean => Schema::boolean(),
        }
    }
}
