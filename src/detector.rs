use crate::cli::Framework;
use crate::parser::ParsedFile;
use log::debug;
use std::collections::BTreeSet;
use syn::visit::{self, Visit};
use syn::UseTree;

/// Crate names identifying each supported framework
const FRAMEWORK_CRATES: &[(&str, Framework)] = &[
    ("axum", Framework::Axum),
    ("actix_web", Framework::ActixWeb),
];

/// Framework detector for identifying web frameworks used in a Rust project.
///
/// A framework counts as used when one of its crates appears in a `use` declaration, at any
/// nesting level, or as the first segment of a fully qualified path such as
/// `actix_web::web::scope`.
pub struct FrameworkDetector;

/// Result of framework detection.
pub struct DetectionResult {
    /// Detected frameworks, in a stable order
    pub frameworks: Vec<Framework>,
}

impl FrameworkDetector {
    /// Detects web frameworks used in the provided parsed files.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coreapi_from_source::detector::FrameworkDetector;
    /// use coreapi_from_source::parser::AstParser;
    /// use std::path::Path;
    ///
    /// let parsed = AstParser::parse_file(Path::new("src/main.rs")).unwrap();
    /// let result = FrameworkDetector::detect(&[parsed]);
    /// println!("Detected {} framework(s)", result.frameworks.len());
    /// ```
    pub fn detect(parsed_files: &[ParsedFile]) -> DetectionResult {
        debug!("Detecting frameworks in {} files", parsed_files.len());

        let mut visitor = DetectVisitor::default();
        for parsed_file in parsed_files {
            visitor.visit_file(&parsed_file.syntax_tree);
        }

        let frameworks: Vec<Framework> = visitor.detected.into_iter().collect();
        debug!("Detected frameworks: {:?}", frameworks);

        DetectionResult { frameworks }
    }
}

fn framework_for(ident: &syn::Ident) -> Option<Framework> {
    FRAMEWORK_CRATES
        .iter()
        .find(|(name, _)| ident == name)
        .map(|(_, framework)| *framework)
}

#[derive(Default)]
struct DetectVisitor {
    detected: BTreeSet<Framework>,
}

impl DetectVisitor {
    fn check_use_tree(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => {
                self.record(&path.ident);
                self.check_use_tree(&path.tree);
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.check_use_tree(item);
                }
            }
            UseTree::Rename(rename) => self.record(&rename.ident),
            UseTree::Name(name) => self.record(&name.ident),
            UseTree::Glob(_) => {}
        }
    }

    fn record(&mut self, ident: &syn::Ident) {
        if let Some(framework) = framework_for(ident) {
            self.detected.insert(framework);
        }
    }
}

impl<'ast> Visit<'ast> for DetectVisitor {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.check_use_tree(&node.tree);
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        if let Some(first) = node.segments.first() {
            self.record(&first.ident);
        }
        visit::visit_path(self, node);
    }
}
