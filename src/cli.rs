use crate::apischema::{SchemaOptions, DEFAULT_EXCLUDED_HANDLERS, DEFAULT_SCHEMA_HANDLER};
use crate::render::DocsOptions;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// CoreAPI schema generator - describe the routes of a Rust web project as a CoreAPI document
#[derive(Parser, Debug)]
#[command(name = "coreapi-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Rust project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "corejson")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Specify the web framework to parse (if not specified, auto-detect)
    #[arg(short = 'w', long = "framework", value_enum)]
    pub framework: Option<Framework>,

    /// Base URL the schema URL is resolved against
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Document title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Document description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Name of the handler serving the schema
    #[arg(long = "schema-handler", value_name = "NAME", default_value = DEFAULT_SCHEMA_HANDLER)]
    pub schema_handler: String,

    /// Handler to leave out of the schema (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// URL prefix of static assets in the HTML docs
    #[arg(long = "static-url", value_name = "PREFIX", default_value = "/static/")]
    pub static_url: String,

    /// Directory name to skip while scanning (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact CoreJSON, as served by the schema endpoint
    Corejson,
    /// Indented CoreJSON
    Json,
    /// CoreJSON structure as YAML
    Yaml,
    /// JavaScript that loads the schema into a CoreAPI client
    Js,
    /// HTML documentation
    Html,
}

/// Supported web frameworks
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Framework {
    /// Axum framework
    Axum,
    /// Actix-Web framework
    #[value(name = "actix-web")]
    ActixWeb,
}

impl CliArgs {
    /// Schema options with the default exclusions plus any `--exclude` handlers
    pub fn schema_options(&self) -> SchemaOptions {
        let mut exclude: Vec<String> = DEFAULT_EXCLUDED_HANDLERS.iter().map(|s| s.to_string()).collect();
        for name in &self.exclude {
            if !exclude.contains(name) {
                exclude.push(name.clone());
            }
        }

        SchemaOptions {
            schema_handler: self.schema_handler.clone(),
            exclude,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    pub fn docs_options(&self) -> DocsOptions {
        DocsOptions {
            static_url: self.static_url.clone(),
            ..Default::default()
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }

    if !args.project_path.is_dir() {
        bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    if let Some(base_url) = &args.base_url {
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
    }

    if args.schema_handler.trim().is_empty() {
        bail!("Schema handler name must not be empty");
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    if let Some(ref framework) = args.framework {
        info!("Framework: {:?}", framework);
    } else {
        info!("Framework: auto-detect");
    }

    Ok(args)
}

/// Run the whole pipeline and return the rendered output
pub fn generate(args: &CliArgs) -> Result<String> {
    use crate::apischema::ApiSchema;
    use crate::detector::FrameworkDetector;
    use crate::extractor::actix::ActixExtractor;
    use crate::extractor::axum::AxumExtractor;
    use crate::extractor::{Route, RouteExtractor};
    use crate::parser::AstParser;
    use crate::render::{serve_docs, serve_schema, serve_schema_js, Templates};
    use crate::scanner::FileScanner;
    use crate::schema_generator::SchemaGenerator;
    use crate::serializer::{serialize_json, serialize_yaml};
    use crate::type_resolver::TypeResolver;

    // Step 1: Scan directory for Rust files
    info!("Scanning project directory...");
    let scanner = FileScanner::new(args.project_path.clone()).exclude_dirs(args.exclude_dirs.iter().cloned());
    let scan_result = scanner.scan()?;
    info!("Found {} Rust files", scan_result.rust_files.len());

    if scan_result.rust_files.is_empty() {
        bail!("No Rust files found in the project directory");
    }

    // Step 2: Parse files into AST
    info!("Parsing Rust files...");
    let parsed_files = AstParser::parse_valid_files(&scan_result.rust_files);
    info!("Successfully parsed {} files", parsed_files.len());

    if parsed_files.is_empty() {
        bail!("No files could be parsed successfully");
    }

    // Step 3: Detect framework (or use user-specified framework)
    let frameworks = if let Some(framework) = args.framework {
        info!("Using user-specified framework: {:?}", framework);
        vec![framework]
    } else {
        let detection_result = FrameworkDetector::detect(&parsed_files);
        if detection_result.frameworks.is_empty() {
            bail!(
                "No supported web framework detected. Please specify a framework using --framework option.\n\
                 Supported frameworks: axum, actix-web"
            );
        }
        info!("Detected frameworks: {:?}", detection_result.frameworks);
        detection_result.frameworks
    };

    // Step 4: Extract routes using appropriate extractors
    let mut routes: Vec<Route> = Vec::new();
    for framework in &frameworks {
        let extractor: Box<dyn RouteExtractor> = match framework {
            Framework::Axum => Box::new(AxumExtractor),
            Framework::ActixWeb => Box::new(ActixExtractor),
        };
        let extracted = extractor.extract_routes(&parsed_files);
        debug!("Extracted {} routes for {:?}", extracted.len(), framework);
        routes.extend(extracted);
    }
    info!("Extracted {} total routes", routes.len());

    if routes.is_empty() {
        warn!("No routes found in the project");
    }

    // Step 5: Build the schema document
    let generator = SchemaGenerator::new(TypeResolver::new(parsed_files));
    let mut api_schema = ApiSchema::new(generator, args.schema_options());
    let document = api_schema.build(&routes, args.base_url.as_deref())?;

    // Step 6: Render the requested format
    info!("Rendering {:?} output...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Corejson => serve_schema(&document)?.content,
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Js => serve_schema_js(&document, &Templates::new(args.docs_options())?)?.content,
        OutputFormat::Html => serve_docs(&document, &Templates::new(args.docs_options())?)?.content,
    };

    info!("Summary:");
    info!("  - Files scanned: {}", scan_result.rust_files.len());
    info!("  - Routes found: {}", routes.len());
    info!("  - Links: {}", document.content.len());
    info!("  - Frameworks: {:?}", frameworks);

    Ok(content)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::write_to_file;

    let content = generate(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    Ok(())
}
