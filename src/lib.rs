//! CoreAPI schema generator - describe the routes of a Rust web project as a CoreAPI document.
//!
//! The route table of an Axum or Actix-Web project is recovered by static analysis of its
//! source. Each route becomes a [`coreapi::Link`] whose fields are the handler's parameters,
//! classified as path, query, form or body parameters. The resulting [`coreapi::Document`]
//! can be served as CoreJSON, as a `schema.js` script or as HTML documentation.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Recursively scans project directories for Rust files
//! 2. [`parser`] - Parses Rust source files into syntax trees
//! 3. [`detector`] - Detects which web frameworks are used
//! 4. [`extractor`] - Extracts the route table, with nested router prefixes applied
//! 5. [`type_resolver`] - Looks up struct and enum definitions and their serde attributes
//! 6. [`schema_generator`] - Converts Rust types to field schemas
//! 7. [`apischema`] - Builds the document: schema URL and one link per handler
//! 8. [`codec`], [`render`], [`serializer`] - CoreJSON, schema.js, HTML docs, YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use coreapi_from_source::{
//!     apischema::{ApiSchema, SchemaOptions},
//!     extractor::{axum::AxumExtractor, RouteExtractor},
//!     parser::AstParser,
//!     render::serve_schema,
//!     scanner::FileScanner,
//!     schema_generator::SchemaGenerator,
//!     type_resolver::TypeResolver,
//! };
//! use std::path::PathBuf;
//!
//! let scan_result = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
//! let parsed_files = AstParser::parse_valid_files(&scan_result.rust_files);
//! let routes = AxumExtractor.extract_routes(&parsed_files);
//!
//! let generator = SchemaGenerator::new(TypeResolver::new(parsed_files));
//! let mut api_schema = ApiSchema::new(generator, SchemaOptions::default());
//! let document = api_schema.build(&routes, Some("https://api.example.com/")).unwrap();
//!
//! println!("{}", serve_schema(&document).unwrap().content);
//! ```
//!
//! For command-line usage, see the [`cli`] module.

pub mod apischema;
pub mod cli;
pub mod codec;
pub mod coreapi;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod render;
pub mod scanner;
pub mod schema_generator;
pub mod serializer;
pub mod type_resolver;
pub mod uri_template;
