//! Route extraction module for recovering the route table of a web project.
//!
//! This module provides a unified interface for extracting route information from different
//! web frameworks. Each framework has its own extractor implementation that knows how to
//! find route registrations, while the handler signature parsing and the resolution of
//! nested routers (mounts) are shared here.
//!
//! # Supported Frameworks
//!
//! - **Axum**: See [`axum::AxumExtractor`]
//! - **Actix-Web**: See [`actix::ActixExtractor`]
//!
//! # Example
//!
//! ```no_run
//! use coreapi_from_source::extractor::{RouteExtractor, axum::AxumExtractor};
//! use coreapi_from_source::parser::AstParser;
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/main.rs")).unwrap();
//! let extractor = AxumExtractor;
//! let routes = extractor.extract_routes(&[parsed]);
//! println!("Found {} routes", routes.len());
//! ```

pub mod axum;
pub mod actix;

use crate::parser::ParsedFile;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Trait for extracting the route table from parsed Rust files.
///
/// Implementations of this trait know how to analyze the AST of a specific web framework
/// and extract route definitions together with the signature of each route's handler.
pub trait RouteExtractor {
    /// Extracts all routes from parsed Rust files.
    ///
    /// # Arguments
    ///
    /// * `parsed_files` - All successfully parsed Rust source files in the project
    ///
    /// # Returns
    ///
    /// Returns a vector of `Route` structs in registration order. Paths are normalized
    /// URI templates with all router prefixes applied.
    fn extract_routes(&self, parsed_files: &[ParsedFile]) -> Vec<Route>;
}

/// A single entry of the application's route table.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// The URI template of the route (e.g., "/users/{id}")
    pub path: String,
    /// The HTTP method for this route
    pub method: HttpMethod,
    /// The handler serving this route
    pub handler: HandlerSignature,
}

impl Route {
    /// Create a new Route
    pub fn new(path: impl Into<String>, method: HttpMethod, handler: HandlerSignature) -> Self {
        Self {
            path: path.into(),
            method,
            handler,
        }
    }
}

/// HTTP methods supported by route extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Parse an HTTP method from a routing function or attribute name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// The uppercase method name used as a link action
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Whether requests with this method carry their parameters in the request body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is known about a route handler from its function definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandlerSignature {
    /// The function name; closures get a name synthesized from method and path
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<HandlerParam>,
    /// Doc comment lines of the handler
    pub docs: Vec<String>,
    /// Marked with `#[exclude_from_schema]` or `#[doc(hidden)]`
    pub excluded: bool,
}

impl HandlerSignature {
    /// A handler known only by name (closure, or a function we could not find)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a handler signature for a closure handler; only typed arguments are visible
    pub fn from_closure(name: impl Into<String>, closure: &syn::ExprClosure) -> Self {
        Self {
            name: name.into(),
            params: params_from_typed(closure.inputs.iter().filter_map(|pat| match pat {
                syn::Pat::Type(pat_type) => Some(pat_type),
                _ => None,
            })),
            docs: Vec::new(),
            excluded: false,
        }
    }

    /// Build a handler signature from a function's attributes and signature
    pub fn from_fn(attrs: &[syn::Attribute], sig: &syn::Signature) -> Self {
        Self {
            name: sig.ident.to_string(),
            params: parse_params(sig),
            docs: doc_lines(attrs),
            excluded: is_excluded(attrs),
        }
    }
}

/// A single handler parameter as bound by its pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerParam {
    /// Name bound by the argument pattern (`_` when the pattern binds nothing)
    pub name: String,
    /// The annotated type with any extractor wrapper removed
    pub annotation: Option<TypeInfo>,
    /// The extractor wrapper that bound this parameter
    pub source: ParamSource,
}

impl HandlerParam {
    pub fn new(name: impl Into<String>, annotation: Option<TypeInfo>, source: ParamSource) -> Self {
        Self {
            name: name.into(),
            annotation,
            source,
        }
    }
}

/// The extractor a handler parameter was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// A plain argument (`id: u32`, `state: State<App>`)
    Bare,
    /// `Path<T>` / `web::Path<T>`
    Path,
    /// `Query<T>` / `web::Query<T>`
    Query,
    /// `Json<T>` / `web::Json<T>`
    Json,
    /// `Form<T>` / `web::Form<T>`
    Form,
}

impl ParamSource {
    fn from_extractor(name: &str) -> Option<Self> {
        match name {
            "Path" => Some(ParamSource::Path),
            "Query" => Some(ParamSource::Query),
            "Json" => Some(ParamSource::Json),
            "Form" => Some(ParamSource::Form),
            _ => None,
        }
    }
}

/// Type information extracted from a Rust type annotation.
///
/// Captures the base name of the type and its generic arguments, with `Option<T>`, `Vec<T>`
/// and tuples marked explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// The base type name (e.g., "String", "User", "i32")
    pub name: String,
    /// Generic type arguments, or tuple elements for tuple types
    pub generic_args: Vec<TypeInfo>,
    /// Whether this type is wrapped in `Option<T>`
    pub is_option: bool,
    /// Whether this type is a `Vec<T>`, slice or array
    pub is_vec: bool,
    /// Whether this type is a tuple
    pub is_tuple: bool,
}

impl TypeInfo {
    /// Create a new TypeInfo for a simple type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: Vec::new(),
            is_option: false,
            is_vec: false,
            is_tuple: false,
        }
    }

    /// Create a TypeInfo for an `Option<T>` type
    pub fn option(inner: TypeInfo) -> Self {
        Self {
            name: inner.name.clone(),
            generic_args: vec![inner],
            is_option: true,
            is_vec: false,
            is_tuple: false,
        }
    }

    /// Create a TypeInfo for a `Vec<T>` type
    pub fn vec(inner: TypeInfo) -> Self {
        Self {
            name: inner.name.clone(),
            generic_args: vec![inner],
            is_option: false,
            is_vec: true,
            is_tuple: false,
        }
    }

    /// Create a TypeInfo for a tuple type
    pub fn tuple(elems: Vec<TypeInfo>) -> Self {
        Self {
            name: "tuple".to_string(),
            generic_args: elems,
            is_option: false,
            is_vec: false,
            is_tuple: true,
        }
    }

    /// The type inside `Option<T>`, or the type itself
    pub fn unwrap_option(&self) -> &TypeInfo {
        if self.is_option {
            self.generic_args.first().unwrap_or(self)
        } else {
            self
        }
    }

    /// Extract TypeInfo from a syn::Type
    pub fn from_type(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(type_path) => Self::from_path(&type_path.path),
            syn::Type::Reference(type_ref) => Self::from_type(&type_ref.elem),
            syn::Type::Paren(paren) => Self::from_type(&paren.elem),
            syn::Type::Group(group) => Self::from_type(&group.elem),
            syn::Type::Slice(slice) => Self::vec(Self::from_type(&slice.elem)),
            syn::Type::Array(array) => Self::vec(Self::from_type(&array.elem)),
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => Self::new("unit"),
            syn::Type::Tuple(tuple) => Self::tuple(tuple.elems.iter().map(Self::from_type).collect()),
            _ => Self::new("unknown"),
        }
    }

    fn from_path(path: &syn::Path) -> Self {
        let Some(segment) = path.segments.last() else {
            return Self::new("unknown");
        };
        let type_name = segment.ident.to_string();
        let args = generic_type_args(segment);

        if let Some(inner) = args.first() {
            match type_name.as_str() {
                "Option" => return Self::option(Self::from_type(inner)),
                "Box" | "Arc" | "Rc" | "Cow" => return Self::from_type(inner),
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => return Self::vec(Self::from_type(inner)),
                _ => {}
            }
        }

        Self {
            name: type_name,
            generic_args: args.into_iter().map(Self::from_type).collect(),
            is_option: false,
            is_vec: false,
            is_tuple: false,
        }
    }
}

/// Generic type arguments of a path segment (`Json<T>` -> `[T]`)
fn generic_type_args(segment: &syn::PathSegment) -> Vec<&syn::Type> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse the parameters of a handler signature.
///
/// Extractor wrappers (`Path`, `Query`, `Json`, `Form`, with or without a `web::` prefix) are
/// removed from the annotation and recorded as the parameter source. Destructuring patterns
/// (`Path((user_id, post_id)): Path<(u32, u32)>`) produce one parameter per bound name.
pub fn parse_params(sig: &syn::Signature) -> Vec<HandlerParam> {
    let params = params_from_typed(sig.inputs.iter().filter_map(|input| match input {
        syn::FnArg::Typed(pat_type) => Some(pat_type),
        syn::FnArg::Receiver(_) => None,
    }));
    debug!("Parsed {} parameters for {}", params.len(), sig.ident);
    params
}

pub(crate) fn params_from_typed<'a>(
    inputs: impl IntoIterator<Item = &'a syn::PatType>,
) -> Vec<HandlerParam> {
    let mut params = Vec::new();

    for pat_type in inputs {
        match extractor_of(&pat_type.ty) {
            Some((source, inner_ty)) => {
                let inner_pat = strip_tuple_struct(&pat_type.pat);
                bind_pattern(inner_pat, inner_ty.map(TypeInfo::from_type), source, &mut params);
            }
            None => {
                let name = binding_name(&pat_type.pat).unwrap_or_else(|| "_".to_string());
                params.push(HandlerParam::new(
                    name,
                    Some(TypeInfo::from_type(&pat_type.ty)),
                    ParamSource::Bare,
                ));
            }
        }
    }

    params
}

/// Recognize an extractor type, returning its source and inner type
fn extractor_of(ty: &syn::Type) -> Option<(ParamSource, Option<&syn::Type>)> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let source = ParamSource::from_extractor(&segment.ident.to_string())?;
    Some((source, generic_type_args(segment).first().copied()))
}

/// `Path(inner)` -> `inner`; any other pattern is returned unchanged
fn strip_tuple_struct(pat: &syn::Pat) -> &syn::Pat {
    match pat {
        syn::Pat::TupleStruct(tuple_struct) if tuple_struct.elems.len() == 1 => &tuple_struct.elems[0],
        _ => pat,
    }
}

fn bind_pattern(
    pat: &syn::Pat,
    annotation: Option<TypeInfo>,
    source: ParamSource,
    params: &mut Vec<HandlerParam>,
) {
    match pat {
        syn::Pat::Tuple(tuple) => {
            let elem_types = annotation
                .as_ref()
                .filter(|ty| ty.is_tuple)
                .map(|ty| ty.generic_args.clone())
                .unwrap_or_default();
            for (idx, elem) in tuple.elems.iter().enumerate() {
                let name = binding_name(elem).unwrap_or_else(|| "_".to_string());
                params.push(HandlerParam::new(name, elem_types.get(idx).cloned(), source));
            }
        }
        _ => {
            let name = binding_name(pat).unwrap_or_else(|| "_".to_string());
            params.push(HandlerParam::new(name, annotation, source));
        }
    }
}

/// The identifier bound by a simple pattern (`id`, `mut id`, `ref id`)
fn binding_name(pat: &syn::Pat) -> Option<String> {
    match pat {
        syn::Pat::Ident(pat_ident) => Some(pat_ident.ident.to_string()),
        syn::Pat::Type(pat_type) => binding_name(&pat_type.pat),
        syn::Pat::Reference(reference) => binding_name(&reference.pat),
        syn::Pat::Paren(paren) => binding_name(&paren.pat),
        syn::Pat::TupleStruct(tuple_struct) if tuple_struct.elems.len() == 1 => {
            binding_name(&tuple_struct.elems[0])
        }
        syn::Pat::Struct(pat_struct) => pat_struct
            .path
            .segments
            .last()
            .map(|s| s.ident.to_string().to_lowercase()),
        _ => None,
    }
}

/// Collect `///` doc comment lines from attributes
pub fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Whether a handler opted out of the schema
fn is_excluded(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        let is_marker = attr
            .path()
            .segments
            .last()
            .is_some_and(|s| s.ident == "exclude_from_schema");
        let is_doc_hidden = attr.path().is_ident("doc")
            && matches!(&attr.meta, syn::Meta::List(list) if list.tokens.to_string().trim() == "hidden");
        is_marker || is_doc_hidden
    })
}

/// Extract a string literal from an expression
pub(crate) fn extract_string_literal(expr: &syn::Expr) -> Option<String> {
    match expr {
        syn::Expr::Lit(expr_lit) => match &expr_lit.lit {
            syn::Lit::Str(lit_str) => Some(lit_str.value()),
            _ => None,
        },
        syn::Expr::Paren(paren) => extract_string_literal(&paren.expr),
        syn::Expr::Reference(reference) => extract_string_literal(&reference.expr),
        _ => None,
    }
}

/// The last identifier of a path expression (`handlers::list_users` -> `list_users`)
pub(crate) fn path_expr_ident(expr: &syn::Expr) -> Option<String> {
    match expr {
        syn::Expr::Path(path_expr) => path_expr.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// The qualifying segments of a path expression (`crate::users::show` -> `["crate", "users"]`)
pub(crate) fn path_expr_qualifier(expr: &syn::Expr) -> Vec<String> {
    match expr {
        syn::Expr::Path(path_expr) => {
            let segments = &path_expr.path.segments;
            segments
                .iter()
                .take(segments.len().saturating_sub(1))
                .map(|s| s.ident.to_string())
                .collect()
        }
        _ => Vec::new(),
    }
}

/// The last identifier of the function being called (`web::scope("/x")` -> `scope`)
pub(crate) fn called_fn_ident(call: &syn::ExprCall) -> Option<String> {
    path_expr_ident(&call.func)
}

/// Combine a prefix and path, handling slashes correctly
pub fn combine_paths(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }

    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// Name for a handler that is not a named function (e.g., a closure)
pub(crate) fn synthesized_handler_name(method: HttpMethod, path: &str) -> String {
    let slug: Vec<String> = path
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();
    if slug.is_empty() {
        format!("{}_root", method.as_str().to_lowercase())
    } else {
        format!("{}_{}", method.as_str().to_lowercase(), slug.join("_"))
    }
}

/// Where in the source a router or service is defined.
///
/// Routes and mounts remember their origin so that the prefixes of the routers they end up
/// mounted into can be applied after all files have been visited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Defined in the body of (or, for route macros, attached to) a function
    Function(String),
    /// Defined in the initializer of a `let` binding inside a function
    Local { function: String, binding: String },
}

/// A router, scope or service mounted under a prefix.
#[derive(Debug, Clone)]
pub struct Mount {
    /// Prefix the target is mounted under, including any inline prefixes at the mount site
    pub prefix: String,
    /// What gets mounted
    pub target: Origin,
    /// Where the mount itself happens
    pub origin: Option<Origin>,
}

/// A route whose handler and mount prefixes are not resolved yet
#[derive(Debug, Clone)]
pub(crate) struct PendingRoute {
    pub path: String,
    pub method: HttpMethod,
    pub handler_name: String,
    /// Path segments written before the handler name (`users::show` -> `["users"]`)
    pub handler_qualifier: Vec<String>,
    /// Module the route is registered in
    pub module: Vec<String>,
    /// Signature known at the registration site (closure handlers)
    pub inline_handler: Option<HandlerSignature>,
    pub origin: Option<Origin>,
}

/// Module path of a source file, relative to its crate's `src` directory.
///
/// `src/main.rs`, `src/lib.rs` and `src/api/mod.rs` name their directory's module;
/// `src/api/users.rs` is `api::users`.
pub(crate) fn module_path_of(file: &Path) -> Vec<String> {
    let components: Vec<String> = file
        .components()
        .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect();
    let start = components
        .iter()
        .rposition(|c| c == "src")
        .map_or(components.len().saturating_sub(1), |i| i + 1);

    let mut module: Vec<String> = components[start.min(components.len())..].to_vec();
    if let Some(last) = module.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(&last);
        if !matches!(stem, "mod" | "lib" | "main") {
            module.push(stem.to_string());
        }
    }
    module
}

#[derive(Debug, Clone)]
struct FunctionEntry {
    module: Vec<String>,
    signature: HandlerSignature,
}

/// Function signatures of the project, keyed by name and told apart by module
#[derive(Debug, Default)]
pub(crate) struct FunctionTable {
    functions: HashMap<String, Vec<FunctionEntry>>,
}

impl FunctionTable {
    pub fn insert(&mut self, module: &[String], signature: HandlerSignature) {
        self.functions
            .entry(signature.name.clone())
            .or_default()
            .push(FunctionEntry {
                module: module.to_vec(),
                signature,
            });
    }

    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    /// Find the function a handler reference points at.
    ///
    /// A qualified reference (`users::show`) picks the function whose module path ends with
    /// the qualifier; an unqualified one prefers the module the route is registered in.
    pub fn resolve(&self, name: &str, qualifier: &[String], module: &[String]) -> Option<&HandlerSignature> {
        let candidates = self.functions.get(name)?;
        if let [only] = candidates.as_slice() {
            return Some(&only.signature);
        }

        let qualifier: Vec<String> = qualifier
            .iter()
            .filter(|s| !matches!(s.as_str(), "crate" | "self" | "super"))
            .cloned()
            .collect();
        let matching: Vec<&FunctionEntry> = candidates
            .iter()
            .filter(|entry| {
                if qualifier.is_empty() {
                    entry.module == module
                } else {
                    entry.module.ends_with(&qualifier)
                }
            })
            .collect();

        match matching.as_slice() {
            [only] => Some(&only.signature),
            [] => {
                warn!(
                    "Handler {} is defined in {} modules, none matching {:?}; using the first",
                    name,
                    candidates.len(),
                    qualifier
                );
                candidates.first().map(|entry| &entry.signature)
            }
            [first, ..] => {
                warn!("Handler {} is ambiguous, using the one in {:?}", name, first.module);
                Some(&first.signature)
            }
        }
    }
}

/// Collects mounts and resolves the full set of prefixes for an origin.
#[derive(Debug, Default)]
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mount: Mount) {
        debug!("Mount {:?} under '{}'", mount.target, mount.prefix);
        self.mounts.push(mount);
    }

    /// All prefixes the routes of `origin` are reachable under.
    ///
    /// Unmounted origins are served at the root. A `let`-bound router that is never mounted
    /// falls back to the prefixes of its enclosing function.
    pub fn prefixes_for(&self, origin: Option<&Origin>) -> Vec<String> {
        match origin {
            Some(origin) => self.resolve(origin, &mut HashSet::new()),
            None => vec![String::new()],
        }
    }

    fn resolve(&self, origin: &Origin, visiting: &mut HashSet<Origin>) -> Vec<String> {
        if !visiting.insert(origin.clone()) {
            warn!("Cyclic router mount detected at {:?}", origin);
            return vec![String::new()];
        }

        let targeting: Vec<&Mount> = self.mounts.iter().filter(|m| &m.target == origin).collect();

        let prefixes = if targeting.is_empty() {
            match origin {
                Origin::Local { function, .. } => {
                    self.resolve(&Origin::Function(function.clone()), visiting)
                }
                Origin::Function(_) => vec![String::new()],
            }
        } else {
            let mut prefixes = Vec::new();
            for mount in targeting {
                let outer = match &mount.origin {
                    Some(parent) => self.resolve(parent, visiting),
                    None => vec![String::new()],
                };
                for outer_prefix in outer {
                    let full = combine_paths(&outer_prefix, &mount.prefix);
                    if !prefixes.contains(&full) {
                        prefixes.push(full);
                    }
                }
            }
            prefixes
        };

        visiting.remove(origin);
        prefixes
    }
}

/// Turn pending routes into routes: apply mount prefixes, normalize paths, attach handlers
pub(crate) fn finalize_routes(
    pending: Vec<PendingRoute>,
    mounts: &MountTable,
    functions: &FunctionTable,
) -> Vec<Route> {
    let mut routes = Vec::new();

    for route in pending {
        let handler = match route.inline_handler.or_else(|| {
            functions
                .resolve(&route.handler_name, &route.handler_qualifier, &route.module)
                .cloned()
        }) {
            Some(signature) => signature,
            None => {
                warn!("Unknown handler: {}", route.handler_name);
                HandlerSignature::named(route.handler_name.clone())
            }
        };

        for prefix in mounts.prefixes_for(route.origin.as_ref()) {
            let full_path = crate::uri_template::normalize_path(&combine_paths(&prefix, &route.path));
            debug!("Route {} {} -> {}", route.method, full_path, handler.name);
            routes.push(Route::new(full_path, route.method, handler.clone()));
        }
    }

    routes
}
