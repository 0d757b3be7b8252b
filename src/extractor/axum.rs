use crate::extractor::{
    called_fn_ident, combine_paths, extract_string_literal, finalize_routes, module_path_of,
    path_expr_ident, path_expr_qualifier, synthesized_handler_name, FunctionTable,
    HandlerSignature, HttpMethod, Mount, MountTable, Origin, PendingRoute, Route, RouteExtractor,
};
use crate::parser::ParsedFile;
use syn::{visit::Visit, Expr, ExprMethodCall};

use log::debug;

/// Axum route extractor
pub struct AxumExtractor;

impl RouteExtractor for AxumExtractor {
    fn extract_routes(&self, parsed_files: &[ParsedFile]) -> Vec<Route> {
        let mut visitor = AxumVisitor::new();

        // Routers are often assembled from functions in other files, so collect everything
        // before resolving handlers and prefixes.
        for parsed_file in parsed_files {
            visitor.module = module_path_of(&parsed_file.path);
            visitor.visit_file(&parsed_file.syntax_tree);
        }

        debug!(
            "Found {} functions, {} routes and {} mounts",
            visitor.functions.len(),
            visitor.routes.len(),
            visitor.mount_count
        );

        finalize_routes(visitor.routes, &visitor.mounts, &visitor.functions)
    }
}

/// A handler reference found in a method router: `get(handler)`
struct MethodHandler {
    method: HttpMethod,
    name: Option<String>,
    qualifier: Vec<String>,
    closure: Option<syn::ExprClosure>,
}

/// Visitor for traversing the AST and finding Axum routes
struct AxumVisitor {
    routes: Vec<PendingRoute>,
    mounts: MountTable,
    mount_count: usize,
    functions: FunctionTable,
    module: Vec<String>,
    current_prefix: String,
    current_fn: Option<String>,
    current_local: Option<String>,
}

impl AxumVisitor {
    fn new() -> Self {
        Self {
            routes: Vec::new(),
            mounts: MountTable::new(),
            mount_count: 0,
            functions: FunctionTable::default(),
            module: Vec::new(),
            current_prefix: String::new(),
            current_fn: None,
            current_local: None,
        }
    }

    /// Where the expression currently being visited lives
    fn origin(&self) -> Option<Origin> {
        let function = self.current_fn.clone()?;
        Some(match &self.current_local {
            Some(binding) => Origin::Local {
                function,
                binding: binding.clone(),
            },
            None => Origin::Function(function),
        })
    }

    /// Parse a `.route(path, method_router)` call
    fn parse_route_method(&mut self, expr: &ExprMethodCall) {
        if expr.args.len() < 2 {
            return;
        }
        let Some(path) = extract_string_literal(&expr.args[0]) else {
            debug!("Skipping route with non-literal path");
            return;
        };
        let full_path = combine_paths(&self.current_prefix, &path);

        let mut handlers = Vec::new();
        collect_method_router(&expr.args[1], &mut handlers);

        for handler in handlers {
            let handler_name = handler
                .name
                .unwrap_or_else(|| synthesized_handler_name(handler.method, &full_path));
            let inline_handler = handler
                .closure
                .as_ref()
                .map(|closure| HandlerSignature::from_closure(handler_name.clone(), closure));

            self.routes.push(PendingRoute {
                path: full_path.clone(),
                method: handler.method,
                handler_name,
                handler_qualifier: handler.qualifier,
                module: self.module.clone(),
                inline_handler,
                origin: self.origin(),
            });
        }
    }

    /// Record a router mounted by `.nest(prefix, router)` or `.merge(router)`.
    ///
    /// Returns `true` when the mounted router is an inline expression that was visited here
    /// under the new prefix.
    fn parse_mount(&mut self, expr: &ExprMethodCall, prefix: &str, router: &Expr) -> bool {
        let nested_prefix = combine_paths(&self.current_prefix, prefix);

        if let Some(target) = self.router_target(router) {
            self.mounts.add(Mount {
                prefix: nested_prefix.clone(),
                target,
                origin: self.origin(),
            });
            self.mount_count += 1;
        }

        if matches!(router, Expr::MethodCall(_)) {
            // Inline router: the receiver stays under the current prefix, the nested router
            // gets the combined one
            self.visit_expr(&expr.receiver);
            let old_prefix = std::mem::replace(&mut self.current_prefix, nested_prefix);
            self.visit_expr(router);
            self.current_prefix = old_prefix;
            return true;
        }

        false
    }

    /// Resolve which router a mounted expression refers to
    fn router_target(&self, expr: &Expr) -> Option<Origin> {
        match expr {
            // `users_router()` or `routes::users()`, but not `Router::new()`
            Expr::Call(call) => {
                let name = called_fn_ident(call)?;
                (name != "new" && name != "default").then_some(Origin::Function(name))
            }
            // a local binding
            Expr::Path(path_expr) if path_expr.path.segments.len() == 1 => {
                let binding = path_expr_ident(expr)?;
                let function = self.current_fn.clone()?;
                Some(Origin::Local { function, binding })
            }
            Expr::MethodCall(method_call) => self.router_target(&method_call.receiver),
            Expr::Paren(paren) => self.router_target(&paren.expr),
            _ => None,
        }
    }
}

/// Collect `get(a).post(b)` style method routers in declaration order
fn collect_method_router(expr: &Expr, out: &mut Vec<MethodHandler>) {
    match expr {
        Expr::Call(call) => {
            let method = called_fn_ident(call).and_then(|name| HttpMethod::from_name(&name));
            if let (Some(method), Some(handler)) = (method, call.args.first()) {
                out.push(method_handler(method, handler));
            }
        }
        Expr::MethodCall(method_call) => {
            collect_method_router(&method_call.receiver, out);
            let method = HttpMethod::from_name(&method_call.method.to_string());
            if let (Some(method), Some(handler)) = (method, method_call.args.first()) {
                out.push(method_handler(method, handler));
            }
        }
        Expr::Paren(paren) => collect_method_router(&paren.expr, out),
        _ => {}
    }
}

fn method_handler(method: HttpMethod, expr: &Expr) -> MethodHandler {
    match expr {
        Expr::Closure(closure) => MethodHandler {
            method,
            name: None,
            qualifier: Vec::new(),
            closure: Some(closure.clone()),
        },
        _ => MethodHandler {
            method,
            name: handler_ident(expr),
            qualifier: handler_path(expr).map(path_expr_qualifier).unwrap_or_default(),
            closure: None,
        },
    }
}

/// Extract the handler function name from a handler expression
fn handler_ident(expr: &Expr) -> Option<String> {
    handler_path(expr).and_then(path_expr_ident)
}

/// The path expression naming the handler
fn handler_path(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Path(_) => Some(expr),
        // `handler.layer(...)`, `handler.with_state(...)`
        Expr::MethodCall(method_call) => handler_path(&method_call.receiver),
        Expr::Paren(paren) => handler_path(&paren.expr),
        Expr::Reference(reference) => handler_path(&reference.expr),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for AxumVisitor {
    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        let method_name = node.method.to_string();

        match method_name.as_str() {
            "route" => {
                // Earlier calls of the chain are receivers; record them first
                self.visit_expr(&node.receiver);
                self.parse_route_method(node);
                for arg in &node.args {
                    self.visit_expr(arg);
                }
                return;
            }
            "nest" if node.args.len() == 2 => {
                if let Some(prefix) = extract_string_literal(&node.args[0]) {
                    if self.parse_mount(node, &prefix, &node.args[1]) {
                        return;
                    }
                }
            }
            "merge" if node.args.len() == 1 => {
                if self.parse_mount(node, "", &node.args[0]) {
                    return;
                }
            }
            _ => {}
        }

        syn::visit::visit_expr_method_call(self, node);
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        let fn_name = node.sig.ident.to_string();
        debug!("Found function: {}", fn_name);
        self.functions
            .insert(&self.module, HandlerSignature::from_fn(&node.attrs, &node.sig));

        let old_fn = self.current_fn.replace(fn_name);
        let old_local = self.current_local.take();
        syn::visit::visit_item_fn(self, node);
        self.current_fn = old_fn;
        self.current_local = old_local;
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        let fn_name = node.sig.ident.to_string();
        debug!("Found associated function: {}", fn_name);
        self.functions
            .insert(&self.module, HandlerSignature::from_fn(&node.attrs, &node.sig));

        let old_fn = self.current_fn.replace(fn_name);
        let old_local = self.current_local.take();
        syn::visit::visit_impl_item_fn(self, node);
        self.current_fn = old_fn;
        self.current_local = old_local;
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.module.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.module.pop();
    }

    fn visit_local(&mut self, node: &'ast syn::Local) {
        let binding = match &node.pat {
            syn::Pat::Ident(pat_ident) => Some(pat_ident.ident.to_string()),
            syn::Pat::Type(pat_type) => match &*pat_type.pat {
                syn::Pat::Ident(pat_ident) => Some(pat_ident.ident.to_string()),
                _ => None,
            },
            _ => None,
        };

        match (binding, &node.init) {
            (Some(binding), Some(init)) => {
                let old_local = self.current_local.replace(binding);
                self.visit_expr(&init.expr);
                if let Some((_, diverge)) = &init.diverge {
                    self.visit_expr(diverge);
                }
                self.current_local = old_local;
            }
            _ => syn::visit::visit_local(self, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apischema::{ApiSchema, SchemaOptions};
    use crate::extractor::ParamSource;
    use crate::schema_generator::SchemaGenerator;
    use crate::type_resolver::TypeResolver;
    use std::path::PathBuf;

    fn parse_code(code: &str) -> ParsedFile {
        let syntax_tree = syn::parse_file(code).expect("Failed to parse test code");
        ParsedFile {
            path: PathBuf::from("test.rs"),
            syntax_tree,
        }
    }

    fn extract(code: &str) -> Vec<Route> {
        AxumExtractor.extract_routes(&[parse_code(code)])
    }

    #[test]
    fn test_simple_route_extraction() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn handler() -> &'static str {
                "Hello, World!"
            }

            fn app() -> Router {
                Router::new().route("/hello", get(handler))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/hello");
        assert_eq!(routes[0].method, HttpMethod::Get);
        assert_eq!(routes[0].handler.name, "handler");
    }

    #[test]
    fn test_chained_method_router() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn list_users() {}
            async fn create_user() {}
            async fn delete_users() {}

            fn app() -> Router {
                Router::new()
                    .route("/users", get(list_users).post(create_user).delete(delete_users))
            }
        "#,
        );

        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].method, HttpMethod::Get);
        assert_eq!(routes[0].handler.name, "list_users");
        assert_eq!(routes[1].method, HttpMethod::Post);
        assert_eq!(routes[1].handler.name, "create_user");
        assert_eq!(routes[2].method, HttpMethod::Delete);
        assert!(routes.iter().all(|r| r.path == "/users"));
    }

    #[test]
    fn test_multiple_http_methods() {
        let routes = extract(
            r#"
            use axum::{Router, routing::{get, post, put, delete, patch}};

            async fn get_handler() {}
            async fn post_handler() {}
            async fn put_handler() {}
            async fn delete_handler() {}
            async fn patch_handler() {}

            fn app() -> Router {
                Router::new()
                    .route("/resource", get(get_handler))
                    .route("/resource", post(post_handler))
                    .route("/resource", put(put_handler))
                    .route("/resource", delete(delete_handler))
                    .route("/resource", patch(patch_handler))
            }
        "#,
        );

        assert_eq!(routes.len(), 5);
        let methods: Vec<_> = routes.iter().map(|r| r.method).collect();
        assert!(methods.contains(&HttpMethod::Get));
        assert!(methods.contains(&HttpMethod::Post));
        assert!(methods.contains(&HttpMethod::Put));
        assert!(methods.contains(&HttpMethod::Delete));
        assert!(methods.contains(&HttpMethod::Patch));
    }

    #[test]
    fn test_path_syntax_is_normalized() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn get_comment() {}
            async fn get_file() {}

            fn app() -> Router {
                Router::new()
                    .route("/posts/:post_id/comments/:comment_id", get(get_comment))
                    .route("/files/{*path}", get(get_file))
            }
        "#,
        );

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path, "/posts/{post_id}/comments/{comment_id}");
        assert_eq!(routes[1].path, "/files/{path}");
    }

    #[test]
    fn test_handler_signature_is_attached() {
        let routes = extract(
            r#"
            use axum::{Router, routing::post, Json, extract::Path};
            use serde::Deserialize;

            #[derive(Deserialize)]
            struct CreateUser {
                name: String,
            }

            /// Create a user.
            async fn create_user(
                Path(id): Path<u32>,
                Json(payload): Json<CreateUser>,
            ) -> String {
                format!("Created user {} with id {}", payload.name, id)
            }

            fn app() -> Router {
                Router::new().route("/users/{id}", post(create_user))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        let handler = &routes[0].handler;
        assert_eq!(handler.name, "create_user");
        assert_eq!(handler.docs, vec!["Create a user."]);
        assert_eq!(handler.params.len(), 2);
        assert_eq!(handler.params[0].source, ParamSource::Path);
        assert_eq!(handler.params[1].source, ParamSource::Json);
        assert_eq!(handler.params[1].annotation.as_ref().unwrap().name, "CreateUser");
    }

    #[test]
    fn test_nest_inline_router() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn health() {}
            async fn list_users() {}

            fn app() -> Router {
                Router::new()
                    .route("/health", get(health))
                    .nest("/api/users", Router::new().route("/", get(list_users)))
            }
        "#,
        );

        assert_eq!(routes.len(), 2);
        let health = routes.iter().find(|r| r.handler.name == "health").unwrap();
        assert_eq!(health.path, "/health");
        let users = routes.iter().find(|r| r.handler.name == "list_users").unwrap();
        assert_eq!(users.path, "/api/users");
    }

    #[test]
    fn test_nest_router_function() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn list_users() {}
            async fn get_user() {}

            fn users_router() -> Router {
                Router::new()
                    .route("/", get(list_users))
                    .route("/:id", get(get_user))
            }

            fn app() -> Router {
                Router::new().nest("/api/users", users_router())
            }
        "#,
        );

        assert_eq!(routes.len(), 2);
        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert!(paths.contains(&"/api/users"));
        assert!(paths.contains(&"/api/users/{id}"));
    }

    #[test]
    fn test_nest_local_binding() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn get_users() {}
            async fn health_check() {}

            pub fn create_api_router() -> Router {
                let user_routes = Router::new()
                    .route("/", get(get_users))
                    .route("/:id", get(get_users));

                Router::new()
                    .nest("/api/v1/users", user_routes)
                    .route("/api/v1/health", get(health_check))
            }
        "#,
        );

        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(routes.len(), 3, "found: {:?}", paths);
        assert!(paths.contains(&"/api/v1/users"));
        assert!(paths.contains(&"/api/v1/users/{id}"));
        assert!(paths.contains(&"/api/v1/health"));
    }

    #[test]
    fn test_merge_router_function() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            async fn status() {}

            fn status_routes() -> Router {
                Router::new().route("/status", get(status))
            }

            fn api() -> Router {
                Router::new().merge(status_routes())
            }

            fn app() -> Router {
                Router::new().nest("/api", api())
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/api/status");
    }

    #[test]
    fn test_closure_handler() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get, extract::Path};

            fn app() -> Router {
                Router::new().route("/echo/:word", get(|Path(word): Path<String>| async move { word }))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].handler.name, "get_echo_word");
        assert_eq!(routes[0].handler.params.len(), 1);
        assert_eq!(routes[0].handler.params[0].name, "word");
    }

    #[test]
    fn test_handler_from_module_path() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            mod handlers {
                pub async fn list_users() {}
            }

            fn app() -> Router {
                Router::new().route("/users", get(handlers::list_users))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].handler.name, "list_users");
    }

    #[test]
    fn test_unknown_handler_is_kept_by_name() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            fn app() -> Router {
                Router::new().route("/missing", get(external::handler))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].handler.name, "handler");
        assert!(routes[0].handler.params.is_empty());
    }

    #[test]
    fn test_chained_routes_keep_registration_order() {
        let code = r#"
            use axum::{Router, routing::get};

            async fn list_users() {}
            async fn health() {}

            fn app() -> Router {
                Router::new()
                    .route("/users", get(list_users))
                    .route("/health", get(health))
                    .route("/v2/users", get(list_users))
            }
        "#;
        let routes = extract(code);

        let table: Vec<_> = routes
            .iter()
            .map(|r| (r.path.as_str(), r.handler.name.as_str()))
            .collect();
        assert_eq!(
            table,
            vec![("/users", "list_users"), ("/health", "health"), ("/v2/users", "list_users")]
        );

        // a later route of the same handler replaces the earlier link in place
        let generator = SchemaGenerator::new(TypeResolver::new(vec![parse_code(code)]));
        let content = ApiSchema::new(generator, SchemaOptions::default()).get_schema_content(&routes);
        let links: Vec<_> = content.iter().map(|(name, link)| (name.as_str(), link.url.as_str())).collect();
        assert_eq!(links, vec![("list_users", "/v2/users"), ("health", "/health")]);
    }

    #[test]
    fn test_same_handler_name_in_different_modules() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get, extract::Path};

            mod users {
                pub async fn show(Path(id): Path<u32>) {}
            }

            mod search {
                pub async fn show(q: String, page: u32) {}
            }

            fn app() -> Router {
                Router::new()
                    .route("/users/{id}", get(users::show))
                    .route("/search", get(crate::search::show))
            }
        "#,
        );

        assert_eq!(routes.len(), 2);
        let users: Vec<_> = routes[0].handler.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(users, vec!["id"]);
        assert_eq!(routes[0].handler.params[0].source, ParamSource::Path);
        let search: Vec<_> = routes[1].handler.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(search, vec!["q", "page"]);
    }

    #[test]
    fn test_unqualified_handler_prefers_its_own_module() {
        let routes = extract(
            r#"
            use axum::{Router, routing::get};

            mod admin {
                pub async fn index(token: String) {}
            }

            async fn index() {}

            fn app() -> Router {
                Router::new().route("/", get(index))
            }
        "#,
        );

        assert_eq!(routes.len(), 1);
        assert!(routes[0].handler.params.is_empty());
    }
}
