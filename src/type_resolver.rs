use crate::extractor::{doc_lines, TypeInfo};
use crate::parser::ParsedFile;
use convert_case::{Case, Casing};
use log::{debug, warn};
use std::collections::HashMap;
use syn::meta::ParseNestedMeta;

/// Type resolver - looks up the struct and enum definitions of a project by name
pub struct TypeResolver {
    /// All parsed files of the project
    parsed_files: Vec<ParsedFile>,
    /// Cache of resolved types to avoid redundant parsing
    type_cache: HashMap<String, ResolvedType>,
}

/// Resolved type information
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// The type name
    pub name: String,
    /// The kind of type (struct, enum, primitive, etc.)
    pub kind: TypeKind,
    /// Doc comment lines of the type definition
    pub docs: Vec<String>,
    /// Whether the type derives `Deserialize`
    pub deserializable: bool,
}

/// Type kind - represents different categories of types
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A struct with named fields
    Struct(StructDef),
    /// A tuple struct wrapping a single value
    Newtype(TypeInfo),
    /// An enum type with variants
    Enum(EnumDef),
    /// A primitive type (String, i32, etc.)
    Primitive(PrimitiveType),
}

/// Struct definition with fields
#[derive(Debug, Clone)]
pub struct StructDef {
    /// The fields of the struct, skipped fields excluded
    pub fields: Vec<FieldDef>,
}

/// Field definition in a struct
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name as it appears on the wire, after serde renaming
    pub name: String,
    /// Field identifier in the Rust source
    pub ident: String,
    /// Type information for the field
    pub type_info: TypeInfo,
    /// Whether the field may be absent (`Option<T>` or `#[serde(default)]`)
    pub optional: bool,
    /// Serde attributes applied to this field
    pub serde_attrs: SerdeAttributes,
    /// Doc comment of the field, lines joined by spaces
    pub description: String,
}

/// Enum definition with variants
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Variant names as they appear on the wire
    pub variants: Vec<String>,
    /// Whether every variant is a unit variant
    pub unit_only: bool,
}

/// Primitive types, grouped by the schema type they map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

/// Serde attributes of a container, field or variant
#[derive(Debug, Clone, Default)]
pub struct SerdeAttributes {
    /// Renamed name, from `rename` or `rename(deserialize = ..)`
    pub rename: Option<String>,
    /// Container-level renaming rule
    pub rename_all: Option<String>,
    /// Whether the item is skipped during deserialization
    pub skip: bool,
    /// Whether to flatten this field
    pub flatten: bool,
    /// Whether a missing field falls back to its default
    pub default: bool,
}

impl TypeResolver {
    /// Create a new TypeResolver with parsed files
    pub fn new(parsed_files: Vec<ParsedFile>) -> Self {
        debug!("Initializing TypeResolver with {} files", parsed_files.len());
        Self {
            parsed_files,
            type_cache: HashMap::new(),
        }
    }

    /// The files this resolver searches
    pub fn parsed_files(&self) -> &[ParsedFile] {
        &self.parsed_files
    }

    /// Resolve a type by name
    pub fn resolve_type(&mut self, type_name: &str) -> Option<ResolvedType> {
        if let Some(cached) = self.type_cache.get(type_name) {
            return Some(cached.clone());
        }

        let resolved = if let Some(primitive) = Self::parse_primitive_type(type_name) {
            ResolvedType {
                name: type_name.to_string(),
                kind: TypeKind::Primitive(primitive),
                docs: Vec::new(),
                deserializable: true,
            }
        } else {
            match self.find_definition(type_name) {
                Some(Definition::Struct(item_struct)) => Self::parse_struct_definition(item_struct),
                Some(Definition::Enum(item_enum)) => Self::parse_enum_definition(item_enum),
                None => {
                    debug!("Could not resolve type: {}", type_name);
                    return None;
                }
            }
        };

        self.type_cache.insert(type_name.to_string(), resolved.clone());
        Some(resolved)
    }

    /// Whether `type_info` names a project type that can be deserialized from a request:
    /// a struct or enum deriving `Deserialize`, or a `Vec`/`Option` of one
    pub fn is_schema_type(&mut self, type_info: &TypeInfo) -> bool {
        let inner = type_info.unwrap_option();
        if inner.is_vec {
            return inner
                .generic_args
                .first()
                .is_some_and(|item| self.is_schema_type(item) || Self::is_primitive(item));
        }

        match self.resolve_type(&inner.name) {
            Some(ResolvedType {
                kind: TypeKind::Primitive(_),
                ..
            }) => false,
            Some(resolved) => {
                if !resolved.deserializable {
                    warn!("Type {} does not derive Deserialize", resolved.name);
                }
                resolved.deserializable
            }
            None => false,
        }
    }

    /// Whether `type_info` is a primitive, looking through `Option`
    pub fn is_primitive(type_info: &TypeInfo) -> bool {
        let inner = type_info.unwrap_option();
        !inner.is_vec && !inner.is_tuple && Self::parse_primitive_type(&inner.name).is_some()
    }

    /// The fields a struct type contributes when deserialized, with flattened fields inlined
    pub fn struct_fields(&mut self, type_name: &str) -> Option<Vec<FieldDef>> {
        self.collect_fields(type_name, &mut Vec::new())
    }

    fn collect_fields(&mut self, type_name: &str, visiting: &mut Vec<String>) -> Option<Vec<FieldDef>> {
        if visiting.iter().any(|name| name == type_name) {
            warn!("Circular flatten detected for type: {}", type_name);
            return Some(Vec::new());
        }

        let TypeKind::Struct(struct_def) = self.resolve_type(type_name)?.kind else {
            return None;
        };

        visiting.push(type_name.to_string());
        let mut fields = Vec::new();
        for field in struct_def.fields {
            if field.serde_attrs.flatten {
                let flattened = field.type_info.unwrap_option().name.clone();
                match self.collect_fields(&flattened, visiting) {
                    Some(inner) => fields.extend(inner),
                    None => debug!("Cannot flatten unresolved type {}", flattened),
                }
            } else {
                fields.push(field);
            }
        }
        visiting.pop();

        Some(fields)
    }

    fn find_definition(&self, name: &str) -> Option<Definition<'_>> {
        for parsed_file in &self.parsed_files {
            if let Some(found) = find_in_items(&parsed_file.syntax_tree.items, name) {
                debug!("Found type {} in {}", name, parsed_file.path.display());
                return Some(found);
            }
        }
        None
    }

    /// Parse a struct definition into a ResolvedType
    fn parse_struct_definition(item_struct: &syn::ItemStruct) -> ResolvedType {
        let struct_name = item_struct.ident.to_string();
        debug!("Parsing struct definition: {}", struct_name);

        let container = Self::parse_serde_attributes(&item_struct.attrs);
        let kind = match &item_struct.fields {
            syn::Fields::Named(named_fields) => TypeKind::Struct(StructDef {
                fields: named_fields
                    .named
                    .iter()
                    .filter_map(|field| Self::parse_field(field, container.rename_all.as_deref()))
                    .collect(),
            }),
            syn::Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
                TypeKind::Newtype(TypeInfo::from_type(&unnamed.unnamed[0].ty))
            }
            _ => TypeKind::Struct(StructDef { fields: Vec::new() }),
        };

        ResolvedType {
            name: struct_name,
            kind,
            docs: doc_lines(&item_struct.attrs),
            deserializable: derives_deserialize(&item_struct.attrs),
        }
    }

    /// Parse an enum definition into a ResolvedType
    fn parse_enum_definition(item_enum: &syn::ItemEnum) -> ResolvedType {
        let enum_name = item_enum.ident.to_string();
        debug!("Parsing enum definition: {}", enum_name);

        let container = Self::parse_serde_attributes(&item_enum.attrs);
        let mut variants = Vec::new();
        let mut unit_only = true;

        for variant in &item_enum.variants {
            let attrs = Self::parse_serde_attributes(&variant.attrs);
            if attrs.skip {
                continue;
            }
            unit_only &= matches!(variant.fields, syn::Fields::Unit);
            variants.push(serialized_name(
                &variant.ident.to_string(),
                &attrs,
                container.rename_all.as_deref(),
            ));
        }

        ResolvedType {
            name: enum_name,
            kind: TypeKind::Enum(EnumDef { variants, unit_only }),
            docs: doc_lines(&item_enum.attrs),
            deserializable: derives_deserialize(&item_enum.attrs),
        }
    }

    /// Parse a single field; skipped fields yield `None`
    fn parse_field(field: &syn::Field, rename_all: Option<&str>) -> Option<FieldDef> {
        let ident = field.ident.as_ref()?.to_string();
        let ident = ident.strip_prefix("r#").unwrap_or(&ident).to_string();
        let serde_attrs = Self::parse_serde_attributes(&field.attrs);
        if serde_attrs.skip {
            debug!("Skipping field {}", ident);
            return None;
        }

        let type_info = TypeInfo::from_type(&field.ty);
        Some(FieldDef {
            name: serialized_name(&ident, &serde_attrs, rename_all),
            optional: type_info.is_option || serde_attrs.default,
            ident,
            type_info,
            description: doc_lines(&field.attrs).join(" "),
            serde_attrs,
        })
    }

    /// Parse `#[serde(...)]` attributes
    fn parse_serde_attributes(attrs: &[syn::Attribute]) -> SerdeAttributes {
        let mut serde_attrs = SerdeAttributes::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            let result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(value) = parse_rename_value(&meta)? {
                        serde_attrs.rename = Some(value);
                    }
                } else if meta.path.is_ident("rename_all") {
                    if let Some(value) = parse_rename_value(&meta)? {
                        serde_attrs.rename_all = Some(value);
                    }
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    serde_attrs.skip = true;
                } else if meta.path.is_ident("flatten") {
                    serde_attrs.flatten = true;
                } else if meta.path.is_ident("default") {
                    serde_attrs.default = true;
                    skip_meta_value(&meta)?;
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            });

            if let Err(err) = result {
                debug!("Ignoring unparsable serde attribute: {}", err);
            }
        }

        serde_attrs
    }

    /// Parse a primitive type name
    fn parse_primitive_type(type_name: &str) -> Option<PrimitiveType> {
        match type_name {
            "String" | "str" | "char" => Some(PrimitiveType::String),
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => Some(PrimitiveType::Integer),
            "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => Some(PrimitiveType::Integer),
            "f32" | "f64" => Some(PrimitiveType::Number),
            "bool" => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }
}

enum Definition<'a> {
    Struct(&'a syn::ItemStruct),
    Enum(&'a syn::ItemEnum),
}

fn find_in_items<'a>(items: &'a [syn::Item], name: &str) -> Option<Definition<'a>> {
    for item in items {
        match item {
            syn::Item::Struct(item_struct) if item_struct.ident == name => {
                return Some(Definition::Struct(item_struct));
            }
            syn::Item::Enum(item_enum) if item_enum.ident == name => {
                return Some(Definition::Enum(item_enum));
            }
            syn::Item::Mod(item_mod) => {
                if let Some((_, inner)) = &item_mod.content {
                    if let Some(found) = find_in_items(inner, name) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn derives_deserialize(attrs: &[syn::Attribute]) -> bool {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Deserialize")
            {
                found = true;
            }
            Ok(())
        });
    }
    found
}

/// Name of a field or variant after applying `rename` and the container's `rename_all`
fn serialized_name(ident: &str, attrs: &SerdeAttributes, rename_all: Option<&str>) -> String {
    if let Some(rename) = &attrs.rename {
        return rename.clone();
    }
    match rename_all {
        Some(rule) => apply_rename_rule(ident, rule),
        None => ident.to_string(),
    }
}

fn apply_rename_rule(name: &str, rule: &str) -> String {
    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "camelCase" => name.to_case(Case::Camel),
        "PascalCase" => name.to_case(Case::Pascal),
        "snake_case" => name.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => name.to_case(Case::Constant),
        "kebab-case" => name.to_case(Case::Kebab),
        "SCREAMING-KEBAB-CASE" => name.to_case(Case::Cobol),
        other => {
            warn!("Unknown serde rename rule: {}", other);
            name.to_string()
        }
    }
}

/// Value of `rename = ".."`, or the deserialize side of `rename(serialize = .., deserialize = ..)`
fn parse_rename_value(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let value: syn::LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }

    let mut deserialize = None;
    meta.parse_nested_meta(|inner| {
        let value: syn::LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("deserialize") {
            deserialize = Some(value.value());
        }
        Ok(())
    })?;
    Ok(deserialize)
}

/// Consume the value of a serde attribute we don't interpret
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta_value(&inner))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AstParser;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    /// Helper function to parse files and create a TypeResolver
    fn create_resolver_from_code(code: &str) -> TypeResolver {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "test.rs", code);
        let parsed = AstParser::parse_file(&file_path).unwrap();
        TypeResolver::new(vec![parsed])
    }

    fn fields_of(resolver: &mut TypeResolver, name: &str) -> Vec<FieldDef> {
        match resolver.resolve_type(name).map(|resolved| resolved.kind) {
            Some(TypeKind::Struct(struct_def)) => struct_def.fields,
            other => panic!("Expected struct type, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_primitive_types() {
        let mut resolver = create_resolver_from_code("");

        let primitives = vec![
            ("String", PrimitiveType::String),
            ("char", PrimitiveType::String),
            ("i32", PrimitiveType::Integer),
            ("u64", PrimitiveType::Integer),
            ("f32", PrimitiveType::Number),
            ("bool", PrimitiveType::Boolean),
        ];

        for (type_name, expected_primitive) in primitives {
            let resolved = resolver.resolve_type(type_name).unwrap();
            assert_eq!(resolved.name, type_name);

            if let TypeKind::Primitive(prim) = resolved.kind {
                assert_eq!(prim, expected_primitive);
            } else {
                panic!("Expected primitive type for {}", type_name);
            }
        }
    }

    #[test]
    fn test_resolve_simple_struct() {
        let code = r#"
            /// A registered user
            #[derive(Deserialize)]
            pub struct User {
                /// Unique identifier
                pub id: u32,
                pub name: String,
                pub active: bool,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let resolved = resolver.resolve_type("User").unwrap();
        assert_eq!(resolved.name, "User");
        assert_eq!(resolved.docs, vec!["A registered user"]);
        assert!(resolved.deserializable);

        let fields = fields_of(&mut resolver, "User");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "active"]);
        assert_eq!(fields[0].type_info.name, "u32");
        assert_eq!(fields[0].description, "Unique identifier");
        assert_eq!(fields[1].description, "");
    }

    #[test]
    fn test_resolve_struct_with_option_and_default() {
        let code = r#"
            pub struct Filter {
                pub email: Option<String>,
                #[serde(default)]
                pub page: u32,
                #[serde(default = "default_limit")]
                pub limit: u32,
                pub sort: String,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let fields = fields_of(&mut resolver, "Filter");

        assert!(fields[0].type_info.is_option);
        assert!(fields[0].optional);
        assert!(fields[1].optional);
        assert!(fields[2].optional);
        assert!(!fields[3].optional);
    }

    #[test]
    fn test_serde_rename_and_skip() {
        let code = r#"
            #[derive(Serialize, Deserialize)]
            pub struct User {
                pub id: u32,
                #[serde(rename = "userName")]
                pub name: String,
                #[serde(skip)]
                pub password: String,
                #[serde(skip_serializing_if = "Option::is_none")]
                pub nickname: Option<String>,
                #[serde(rename(serialize = "out", deserialize = "in"))]
                pub direction: String,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let fields = fields_of(&mut resolver, "User");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["id", "userName", "nickname", "in"]);
        assert_eq!(fields[1].ident, "name");
    }

    #[test]
    fn test_serde_rename_all() {
        let code = r#"
            #[derive(Deserialize)]
            #[serde(rename_all = "camelCase")]
            pub struct Query {
                pub page_size: u32,
                #[serde(rename = "q")]
                pub search_term: String,
            }

            #[derive(Deserialize)]
            #[serde(rename_all = "snake_case")]
            pub enum Status {
                InProgress,
                Done,
                #[serde(skip)]
                Internal,
            }

            #[derive(Deserialize)]
            #[serde(rename_all = "kebab-case", deny_unknown_fields)]
            pub struct Options {
                pub dry_run: bool,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);

        let fields = fields_of(&mut resolver, "Query");
        assert_eq!(fields[0].name, "pageSize");
        assert_eq!(fields[1].name, "q");

        let fields = fields_of(&mut resolver, "Options");
        assert_eq!(fields[0].name, "dry-run");

        match resolver.resolve_type("Status").unwrap().kind {
            TypeKind::Enum(enum_def) => {
                assert_eq!(enum_def.variants, vec!["in_progress", "done"]);
                assert!(enum_def.unit_only);
            }
            other => panic!("Expected enum type, got {:?}", other),
        }
    }

    #[test]
    fn test_rename_rules() {
        assert_eq!(apply_rename_rule("user_id", "UPPERCASE"), "USER_ID");
        assert_eq!(apply_rename_rule("UserId", "lowercase"), "userid");
        assert_eq!(apply_rename_rule("user_id", "PascalCase"), "UserId");
        assert_eq!(apply_rename_rule("user_id", "SCREAMING_SNAKE_CASE"), "USER_ID");
        assert_eq!(apply_rename_rule("user_id", "SCREAMING-KEBAB-CASE"), "USER-ID");
        assert_eq!(apply_rename_rule("user_id", "unknown"), "user_id");
    }

    #[test]
    fn test_struct_fields_flatten() {
        let code = r#"
            #[derive(Deserialize)]
            pub struct ListParams {
                pub search: Option<String>,
                #[serde(flatten)]
                pub pagination: Pagination,
            }

            #[derive(Deserialize)]
            pub struct Pagination {
                pub page: u32,
                pub per_page: u32,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);

        let raw = fields_of(&mut resolver, "ListParams");
        assert!(raw[1].serde_attrs.flatten);

        let fields = resolver.struct_fields("ListParams").unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["search", "page", "per_page"]);
    }

    #[test]
    fn test_struct_fields_flatten_cycle() {
        let code = r#"
            pub struct Loop {
                pub id: u32,
                #[serde(flatten)]
                pub again: Box<Loop>,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let fields = resolver.struct_fields("Loop").unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_resolve_enum_with_data() {
        let code = r#"
            pub enum Shape {
                Circle { radius: f64 },
                Square(f64),
                Empty,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let resolved = resolver.resolve_type("Shape").unwrap();
        assert!(!resolved.deserializable);

        if let TypeKind::Enum(enum_def) = resolved.kind {
            assert_eq!(enum_def.variants, vec!["Circle", "Square", "Empty"]);
            assert!(!enum_def.unit_only);
        } else {
            panic!("Expected enum type");
        }
    }

    #[test]
    fn test_resolve_newtype_and_inline_module() {
        let code = r#"
            mod ids {
                #[derive(serde::Deserialize)]
                pub struct UserId(pub u64);
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let resolved = resolver.resolve_type("UserId").unwrap();
        assert!(resolved.deserializable);

        match resolved.kind {
            TypeKind::Newtype(inner) => assert_eq!(inner.name, "u64"),
            other => panic!("Expected newtype, got {:?}", other),
        }
    }

    #[test]
    fn test_is_schema_type() {
        let code = r#"
            #[derive(Deserialize)]
            pub struct CreateUser {
                pub name: String,
            }

            pub struct NotDeserialized {
                pub name: String,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);

        assert!(resolver.is_schema_type(&TypeInfo::new("CreateUser")));
        assert!(resolver.is_schema_type(&TypeInfo::option(TypeInfo::new("CreateUser"))));
        assert!(resolver.is_schema_type(&TypeInfo::vec(TypeInfo::new("CreateUser"))));
        assert!(resolver.is_schema_type(&TypeInfo::vec(TypeInfo::new("u32"))));
        assert!(!resolver.is_schema_type(&TypeInfo::new("NotDeserialized")));
        assert!(!resolver.is_schema_type(&TypeInfo::new("String")));
        assert!(!resolver.is_schema_type(&TypeInfo::new("HeaderMap")));
    }

    #[test]
    fn test_is_primitive() {
        assert!(TypeResolver::is_primitive(&TypeInfo::new("i64")));
        assert!(TypeResolver::is_primitive(&TypeInfo::option(TypeInfo::new("bool"))));
        assert!(!TypeResolver::is_primitive(&TypeInfo::vec(TypeInfo::new("bool"))));
        assert!(!TypeResolver::is_primitive(&TypeInfo::new("User")));
    }

    #[test]
    fn test_type_caching() {
        let code = r#"
            pub struct User {
                pub id: u32,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);

        let r1 = resolver.resolve_type("User").unwrap();
        let r2 = resolver.resolve_type("User").unwrap();
        assert_eq!(r1.name, r2.name);
        assert_eq!(resolver.type_cache.len(), 1);
    }

    #[test]
    fn test_recursive_struct_field() {
        let code = r#"
            pub struct Node {
                pub value: i32,
                pub next: Option<Box<Node>>,
            }
        "#;

        let mut resolver = create_resolver_from_code(code);
        let fields = fields_of(&mut resolver, "Node");
        assert_eq!(fields[1].type_info.unwrap_option().name, "Node");
    }

    #[test]
    fn test_resolve_nonexistent_type() {
        let mut resolver = create_resolver_from_code("pub struct User { pub id: u32 }");
        assert!(resolver.resolve_type("NonExistent").is_none());
        assert!(resolver.struct_fields("NonExistent").is_none());
    }
}
