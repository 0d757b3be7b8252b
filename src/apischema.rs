//! Builds a CoreAPI [`Document`] from an extracted route table.
//!
//! Every route becomes a [`Link`] keyed by its handler name. Handler parameters become
//! [`Field`]s whose location follows these rules:
//!
//! 1. a parameter named after a URI template variable is a required `path` field;
//! 2. otherwise a primitive or schema typed parameter goes to `query` for methods without a
//!    request body, and to `body` (object schemas, required) or `form` for POST, PUT and PATCH;
//! 3. anything else, such as framework state or raw requests, is left out.
//!
//! Extractor wrappers refine this: `Path<T>` binds template variables, `Query<T>` and
//! `Form<T>` of a struct contribute one field per struct field, and `Json<T>` is the body.

use crate::coreapi::{render_to_form, Document, Field, Link, Location, Schema};
use crate::error::{Error, Result};
use crate::extractor::{HandlerParam, HttpMethod, ParamSource, Route, TypeInfo};
use crate::schema_generator::{SchemaGenerator, TypeClass};
use crate::uri_template::variable_names;
use indexmap::IndexMap;
use log::{debug, info, warn};
use url::Url;

/// Handler that serves the CoreJSON schema
pub const DEFAULT_SCHEMA_HANDLER: &str = "serve_schema";

/// Handlers serving the schema and its documentation, never listed in the schema itself
pub const DEFAULT_EXCLUDED_HANDLERS: [&str; 3] = ["serve_schema", "serve_schema_js", "serve_docs"];

const JSON_ENCODING: &str = "application/json";
const FORM_ENCODING: &str = "application/x-www-form-urlencoded";

/// Options controlling which routes end up in the schema and how it is titled
#[derive(Debug, Clone)]
pub struct SchemaOptions {
    /// Handler name whose route is the schema URL
    pub schema_handler: String,
    /// Handler names left out of the schema content
    pub exclude: Vec<String>,
    pub title: String,
    pub description: String,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            schema_handler: DEFAULT_SCHEMA_HANDLER.to_string(),
            exclude: DEFAULT_EXCLUDED_HANDLERS.iter().map(|s| s.to_string()).collect(),
            title: String::new(),
            description: String::new(),
        }
    }
}

/// Builds the API document for a route table
pub struct ApiSchema {
    generator: SchemaGenerator,
    options: SchemaOptions,
}

/// A handler parameter after extractor normalization
#[derive(Debug)]
struct LinkParam {
    name: String,
    annotation: TypeInfo,
    source: ParamSource,
    /// Requiredness decided by a struct field, for expanded extractors
    required: Option<bool>,
    schema: Option<Schema>,
    description: String,
}

impl LinkParam {
    fn from_handler_param(param: &HandlerParam, name: String) -> Self {
        Self {
            name,
            annotation: param
                .annotation
                .clone()
                .unwrap_or_else(|| TypeInfo::new("String")),
            source: param.source,
            required: None,
            schema: None,
            description: String::new(),
        }
    }
}

impl ApiSchema {
    pub fn new(generator: SchemaGenerator, options: SchemaOptions) -> Self {
        Self { generator, options }
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Build the document: schema URL, titled content
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if `base_url` cannot be parsed or joined.
    pub fn build(&mut self, routes: &[Route], base_url: Option<&str>) -> Result<Document> {
        let url = self.get_schema_url(routes, base_url)?;
        let content = self.get_schema_content(routes);
        info!("Built schema with {} links", content.len());

        Ok(Document::new(url, content)
            .with_title(self.options.title.clone())
            .with_description(self.options.description.clone()))
    }

    /// URL of the first route served by the schema handler, joined against `base_url`
    pub fn get_schema_url(&self, routes: &[Route], base_url: Option<&str>) -> Result<Option<String>> {
        let Some(route) = routes
            .iter()
            .find(|route| route.handler.name == self.options.schema_handler)
        else {
            debug!("No route served by {}", self.options.schema_handler);
            return Ok(None);
        };

        match base_url {
            Some(base) => {
                let base = Url::parse(base)
                    .map_err(|err| Error::InvalidBaseUrl(format!("{}: {}", base, err)))?;
                Ok(Some(base.join(&route.path)?.to_string()))
            }
            None => Ok(Some(route.path.clone())),
        }
    }

    /// Links keyed by handler name, in route order
    ///
    /// A later route with an already seen handler name replaces the earlier link in place.
    pub fn get_schema_content(&mut self, routes: &[Route]) -> IndexMap<String, Link> {
        let mut content = IndexMap::new();

        for route in routes {
            let name = &route.handler.name;
            if route.handler.excluded || self.options.exclude.contains(name) {
                debug!("Excluding {} from the schema", name);
                continue;
            }

            let link = self.get_link(route);
            if content.insert(name.clone(), link).is_some() {
                debug!("Handler {} is routed more than once, keeping the last route", name);
            }
        }

        content
    }

    /// Describe one route as a link
    pub fn get_link(&mut self, route: &Route) -> Link {
        let variables = variable_names(&route.path).unwrap_or_else(|err| {
            warn!("{}", err);
            Vec::new()
        });

        let mut fields = Vec::new();
        let mut encoding = "";
        for param in self.normalize_params(&route.handler.params, &variables) {
            let source = param.source;
            let Some(field) = self.classify(param, route.method, &variables) else {
                continue;
            };

            match (source, field.location) {
                (ParamSource::Form, Location::Form) => encoding = FORM_ENCODING,
                (_, Location::Body) => encoding = JSON_ENCODING,
                _ => {}
            }
            fields.push(field);
        }

        let mut link = Link::new(route.path.clone(), route.method.as_str(), fields);
        link.encoding = encoding.to_string();
        (link.title, link.description) = split_docs(&route.handler.docs);
        link
    }

    /// Unwrap extractors into the parameters the request actually carries
    fn normalize_params(&mut self, params: &[HandlerParam], variables: &[String]) -> Vec<LinkParam> {
        let mut normalized = Vec::new();
        let mut path_index = 0;

        for param in params {
            match param.source {
                ParamSource::Path => {
                    self.normalize_path_param(param, variables, &mut path_index, &mut normalized)
                }
                ParamSource::Query | ParamSource::Form => {
                    match self.expand_struct(param) {
                        Some(expanded) => normalized.extend(expanded),
                        None => normalized.push(LinkParam::from_handler_param(param, param.name.clone())),
                    }
                }
                ParamSource::Json | ParamSource::Bare => {
                    normalized.push(LinkParam::from_handler_param(param, param.name.clone()))
                }
            }
        }

        normalized
    }

    fn normalize_path_param(
        &mut self,
        param: &HandlerParam,
        variables: &[String],
        path_index: &mut usize,
        normalized: &mut Vec<LinkParam>,
    ) {
        if let Some(annotation) = param.annotation.as_ref().filter(|ty| ty.is_tuple) {
            for elem in &annotation.generic_args {
                let Some(variable) = variables.get(*path_index) else {
                    warn!("Path tuple of {} has more elements than the route has variables", param.name);
                    return;
                };
                let mut link_param = LinkParam::from_handler_param(param, variable.clone());
                link_param.annotation = elem.clone();
                normalized.push(link_param);
                *path_index += 1;
            }
            return;
        }

        if let Some(expanded) = self.expand_struct(param) {
            *path_index += expanded.len();
            normalized.extend(expanded);
            return;
        }

        let name = if variables.contains(&param.name) {
            param.name.clone()
        } else {
            variables
                .get(*path_index)
                .cloned()
                .unwrap_or_else(|| param.name.clone())
        };
        *path_index += 1;
        normalized.push(LinkParam::from_handler_param(param, name));
    }

    /// One parameter per field when the extractor wraps a project struct
    fn expand_struct(&mut self, param: &HandlerParam) -> Option<Vec<LinkParam>> {
        let annotation = param.annotation.as_ref()?;
        if annotation.is_vec || annotation.is_tuple {
            return None;
        }
        let fields = self
            .generator
            .type_resolver()
            .struct_fields(&annotation.unwrap_option().name)?;

        debug!("Expanding {} into {} fields", annotation.name, fields.len());
        Some(
            fields
                .iter()
                .map(|field| LinkParam {
                    name: field.name.clone(),
                    annotation: field.type_info.clone(),
                    source: param.source,
                    required: Some(!field.optional),
                    schema: Some(self.generator.field_schema(field)),
                    description: field.description.clone(),
                })
                .collect(),
        )
    }

    /// Decide location and requiredness of a normalized parameter
    fn classify(&mut self, param: LinkParam, method: HttpMethod, variables: &[String]) -> Option<Field> {
        let class = self.generator.classify(&param.annotation);
        let schema = match param.schema {
            Some(schema) => schema,
            None if class == TypeClass::Unsupported => Schema::anything(),
            None => self.generator.generate_schema(&param.annotation),
        };

        let (location, required) = if variables.contains(&param.name) {
            (Location::Path, true)
        } else {
            match param.source {
                ParamSource::Path => (Location::Path, true),
                ParamSource::Json => (Location::Body, true),
                ParamSource::Query => (Location::Query, param.required.unwrap_or(false)),
                ParamSource::Form => (Location::Form, param.required.unwrap_or(false)),
                ParamSource::Bare => match class {
                    TypeClass::Unsupported => {
                        debug!("Parameter {} is not part of the request", param.name);
                        return None;
                    }
                    _ if method.has_body() && schema.is_object() => (Location::Body, true),
                    _ if method.has_body() => (Location::Form, false),
                    _ => (Location::Query, false),
                },
            }
        };

        Some(
            Field::new(param.name, location, required)
                .with_schema(schema)
                .with_description(param.description),
        )
    }
}

/// Title is the first line of the doc comment, description the rest
fn split_docs(docs: &[String]) -> (String, String) {
    let mut lines = docs.iter().map(String::as_str).skip_while(|line| line.is_empty());
    let title = lines.next().unwrap_or_default().to_string();
    let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    (title, description)
}

/// Render the fields of a link as an HTML form
pub fn render_form(link: &Link) -> String {
    let properties = link
        .fields
        .iter()
        .map(|field| {
            let schema = field.schema.clone().unwrap_or_else(Schema::string);
            (field.name.clone(), schema)
        })
        .collect();
    render_to_form(&Schema::object(properties, Vec::new()))
}
