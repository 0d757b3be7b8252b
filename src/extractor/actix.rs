use crate::extractor::{
    called_fn_ident, combine_paths, extract_string_literal, finalize_routes, module_path_of,
    path_expr_ident, path_expr_qualifier, synthesized_handler_name, FunctionTable,
    HandlerSignature, HttpMethod, Mount, MountTable, Origin, PendingRoute, Route, RouteExtractor,
};
use crate::parser::ParsedFile;
use log::debug;
use syn::punctuated::Punctuated;
use syn::{visit::Visit, Attribute, Expr, ExprMethodCall, Token};

/// Actix-Web route extractor
pub struct ActixExtractor;

impl RouteExtractor for ActixExtractor {
    fn extract_routes(&self, parsed_files: &[ParsedFile]) -> Vec<Route> {
        let mut visitor = ActixVisitor::new();

        for parsed_file in parsed_files {
            visitor.module = module_path_of(&parsed_file.path);
            visitor.visit_file(&parsed_file.syntax_tree);
        }

        debug!(
            "Found {} functions and {} routes",
            visitor.functions.len(),
            visitor.routes.len()
        );

        finalize_routes(visitor.routes, &visitor.mounts, &visitor.functions)
    }
}

/// Visitor for traversing the AST and finding Actix-Web routes
struct ActixVisitor {
    routes: Vec<PendingRoute>,
    mounts: MountTable,
    current_scope: String,
    current_fn: Option<String>,
    functions: FunctionTable,
    module: Vec<String>,
}

impl ActixVisitor {
    fn new() -> Self {
        Self {
            routes: Vec::new(),
            mounts: MountTable::new(),
            current_scope: String::new(),
            current_fn: None,
            functions: FunctionTable::default(),
            module: Vec::new(),
        }
    }

    fn origin(&self) -> Option<Origin> {
        self.current_fn.clone().map(Origin::Function)
    }

    /// Find and parse route macros (#[get], #[post], #[route], ...)
    fn find_route_macros(&mut self, item_fn: &syn::ItemFn) {
        let fn_name = item_fn.sig.ident.to_string();

        for attr in &item_fn.attrs {
            for (method, path) in self.parse_route_macro(attr) {
                debug!("Found route macro {} {} on {}", method, path, fn_name);
                // Macro routes belong to the handler itself; `.service(handler)` mounts them
                self.routes.push(PendingRoute {
                    path,
                    method,
                    handler_name: fn_name.clone(),
                    handler_qualifier: Vec::new(),
                    module: self.module.clone(),
                    inline_handler: None,
                    origin: Some(Origin::Function(fn_name.clone())),
                });
            }
        }
    }

    /// Parse a route macro attribute into (method, path) pairs.
    ///
    /// `#[get("/path")]` yields one pair; `#[route("/path", method = "GET", method = "HEAD")]`
    /// yields one per listed method.
    fn parse_route_macro(&self, attr: &Attribute) -> Vec<(HttpMethod, String)> {
        let Some(attr_name) = attr.path().segments.last().map(|s| s.ident.to_string()) else {
            return Vec::new();
        };
        let single_method = HttpMethod::from_name(&attr_name);
        if single_method.is_none() && attr_name != "route" {
            return Vec::new();
        }

        let Ok(args) = attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated) else {
            return Vec::new();
        };
        let Some(path) = args.first().and_then(extract_string_literal) else {
            return Vec::new();
        };

        if let Some(method) = single_method {
            return vec![(method, path)];
        }

        args.iter()
            .skip(1)
            .filter_map(|arg| match arg {
                Expr::Assign(assign) if path_expr_ident(&assign.left).as_deref() == Some("method") => {
                    extract_string_literal(&assign.right).and_then(|m| HttpMethod::from_name(&m))
                }
                _ => None,
            })
            .map(|method| (method, path.clone()))
            .collect()
    }

    /// Handle a builder chain such as `web::scope("/api").service(a).route("/b", web::get().to(b))`
    fn parse_chain(&mut self, node: &ExprMethodCall) {
        let mut calls = vec![node];
        let mut current = node;
        while let Expr::MethodCall(inner) = &*current.receiver {
            calls.push(inner);
            current = inner;
        }
        calls.reverse();
        let root = &*current.receiver;

        let mut chain_prefix = self.current_scope.clone();
        let mut resource_path = None;
        match root {
            Expr::Call(call) => match called_fn_ident(call).as_deref() {
                Some("scope") => {
                    if let Some(prefix) = call.args.first().and_then(extract_string_literal) {
                        chain_prefix = combine_paths(&chain_prefix, &prefix);
                    }
                }
                Some("resource") => {
                    resource_path = call.args.first().and_then(extract_string_literal);
                }
                _ => self.visit_expr(root),
            },
            _ => self.visit_expr(root),
        }

        for call in calls {
            let method_name = call.method.to_string();
            match (method_name.as_str(), call.args.len()) {
                ("service", 1) => self.parse_service(&call.args[0], &chain_prefix),
                ("configure", 1) => {
                    if let Some(name) = path_expr_ident(&call.args[0]) {
                        self.mounts.add(Mount {
                            prefix: chain_prefix.clone(),
                            target: Origin::Function(name),
                            origin: self.origin(),
                        });
                    }
                }
                ("route", 2) => match extract_string_literal(&call.args[0]) {
                    Some(path) => {
                        let full_path = combine_paths(&chain_prefix, &path);
                        self.parse_route_target(&call.args[1], &full_path);
                    }
                    None => self.visit_call_args(call),
                },
                ("route", 1) if resource_path.is_some() => {
                    let path = resource_path.clone().unwrap_or_default();
                    let full_path = combine_paths(&chain_prefix, &path);
                    self.parse_route_target(&call.args[0], &full_path);
                }
                _ => self.visit_call_args(call),
            }
        }
    }

    fn visit_call_args(&mut self, call: &ExprMethodCall) {
        for arg in &call.args {
            self.visit_expr(arg);
        }
    }

    /// `.service(handler)` mounts a macro-routed handler; `.service(web::scope(..)...)` is
    /// visited under the chain's prefix
    fn parse_service(&mut self, arg: &Expr, prefix: &str) {
        match arg {
            Expr::Path(_) => {
                if let Some(name) = path_expr_ident(arg) {
                    self.mounts.add(Mount {
                        prefix: prefix.to_string(),
                        target: Origin::Function(name),
                        origin: self.origin(),
                    });
                }
            }
            Expr::Call(call)
                if !matches!(called_fn_ident(call).as_deref(), Some("scope" | "resource")) =>
            {
                // a function building a scope, e.g. `.service(user_scope())`
                if let Some(name) = called_fn_ident(call) {
                    self.mounts.add(Mount {
                        prefix: prefix.to_string(),
                        target: Origin::Function(name),
                        origin: self.origin(),
                    });
                }
            }
            _ => {
                let old_scope = std::mem::replace(&mut self.current_scope, prefix.to_string());
                self.visit_expr(arg);
                self.current_scope = old_scope;
            }
        }
    }

    /// Parse `web::get().to(handler)` into a route at `path`
    fn parse_route_target(&mut self, expr: &Expr, path: &str) {
        let Expr::MethodCall(to_call) = expr else {
            return;
        };
        if to_call.method != "to" || to_call.args.len() != 1 {
            return;
        }
        let Some(method) = route_method(&to_call.receiver) else {
            debug!("Skipping route {} without a single HTTP method", path);
            return;
        };

        let handler = &to_call.args[0];
        let (handler_name, inline_handler) = match handler {
            Expr::Closure(closure) => {
                let name = synthesized_handler_name(method, path);
                let signature = HandlerSignature::from_closure(name.clone(), closure);
                (name, Some(signature))
            }
            _ => (
                path_expr_ident(handler).unwrap_or_else(|| synthesized_handler_name(method, path)),
                None,
            ),
        };

        self.routes.push(PendingRoute {
            path: path.to_string(),
            method,
            handler_name,
            handler_qualifier: path_expr_qualifier(handler),
            module: self.module.clone(),
            inline_handler,
            origin: self.origin(),
        });
    }
}

/// The method of a route builder: `web::get()` or `web::method(Method::GET)`
fn route_method(expr: &Expr) -> Option<HttpMethod> {
    match expr {
        Expr::Call(call) => match called_fn_ident(call)?.as_str() {
            "method" => call
                .args
                .first()
                .and_then(path_expr_ident)
                .and_then(|name| HttpMethod::from_name(&name)),
            name => HttpMethod::from_name(name),
        },
        // `web::get().guard(...)`
        Expr::MethodCall(method_call) if method_call.method != "method" => {
            route_method(&method_call.receiver)
        }
        Expr::MethodCall(method_call) => method_call
            .args
            .first()
            .and_then(path_expr_ident)
            .and_then(|name| HttpMethod::from_name(&name)),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for ActixVisitor {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        let fn_name = node.sig.ident.to_string();
        self.functions
            .insert(&self.module, HandlerSignature::from_fn(&node.attrs, &node.sig));

        // Look for route macros on this function
        self.find_route_macros(node);

        let old_fn = self.current_fn.replace(fn_name);
        syn::visit::visit_item_fn(self, node);
        self.current_fn = old_fn;
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        let fn_name = node.sig.ident.to_string();
        self.functions
            .insert(&self.module, HandlerSignature::from_fn(&node.attrs, &node.sig));

        let old_fn = self.current_fn.replace(fn_name);
        syn::visit::visit_impl_item_fn(self, node);
        self.current_fn = old_fn;
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.module.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.module.pop();
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        // Builder chains are handled as a whole from their outermost call
        self.parse_chain(node);
    }
}
