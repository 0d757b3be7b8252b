//! URI template handling for route paths.
//!
//! Route paths are stored as RFC 6570 URI templates (`/users/{id}`). Web frameworks use their
//! own placeholder syntax, so [`normalize_path`] rewrites framework paths into templates and
//! [`variable_names`] reads the variables back out of a template.

use crate::error::{Error, Result};
use log::debug;

/// Characters that can prefix the variable list of an RFC 6570 expression.
const OPERATORS: &[char] = &['+', '#', '.', '/', ';', '?', '&'];

/// Returns the variable names referenced by a URI template, in order of first appearance.
///
/// Supports the RFC 6570 operators, comma separated variable lists, the explode modifier
/// (`{list*}`) and prefix modifiers (`{var:3}`).
///
/// # Errors
///
/// Returns [`Error::InvalidUriTemplate`] if an expression is not terminated or empty.
///
/// # Example
///
/// ```
/// use coreapi_from_source::uri_template::variable_names;
///
/// let names = variable_names("/users/{user_id}/posts{?page,limit}").unwrap();
/// assert_eq!(names, vec!["user_id", "page", "limit"]);
/// ```
pub fn variable_names(template: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| Error::InvalidUriTemplate {
            template: template.to_string(),
            message: "unterminated expression".to_string(),
        })?;

        let expression = after[..end].trim_start_matches(OPERATORS);
        if expression.is_empty() {
            return Err(Error::InvalidUriTemplate {
                template: template.to_string(),
                message: "empty expression".to_string(),
            });
        }

        for varspec in expression.split(',') {
            let name = varspec
                .trim_end_matches('*')
                .split(':')
                .next()
                .unwrap_or_default()
                .trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        rest = &after[end + 1..];
    }

    Ok(names)
}

/// Rewrites framework-specific path syntax into a URI template.
///
/// - Axum 0.7 `:id` and `*rest` segments become `{id}` and `{rest}`
/// - Axum 0.8 `{*rest}` becomes `{rest}`
/// - Actix-Web `{id:\d+}` and `{tail}*` become `{id}` and `{tail}`
///
/// Paths that are already templates are returned unchanged.
pub fn normalize_path(path: &str) -> String {
    let normalized = path
        .split('/')
        .map(normalize_segment)
        .collect::<Vec<_>>()
        .join("/");

    if normalized != path {
        debug!("Normalized path {} -> {}", path, normalized);
    }
    normalized
}

fn normalize_segment(segment: &str) -> String {
    if let Some(name) = segment.strip_prefix(':') {
        return format!("{{{}}}", name);
    }
    if let Some(name) = segment.strip_prefix('*') {
        return format!("{{{}}}", name);
    }

    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }

        // Copy the placeholder name, dropping any `:regex` suffix and `*` markers. Regexes may
        // contain their own braces (`{id:\d{4}}`), so track nesting depth.
        let mut depth = 1;
        let mut name = String::new();
        let mut in_regex = false;
        for inner in chars.by_ref() {
            match inner {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                ':' if depth == 1 => in_regex = true,
                _ if !in_regex && inner != '*' => name.push(inner),
                _ => {}
            }
        }
        out.push('{');
        out.push_str(name.trim());
        out.push('}');

        // Actix tail match: `{tail}*`
        if chars.peek() == Some(&'*') {
            chars.next();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_variables() {
        let names = variable_names("/users/{id}").unwrap();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_no_variables() {
        assert!(variable_names("/health").unwrap().is_empty());
        assert!(variable_names("").unwrap().is_empty());
    }

    #[test]
    fn test_operators_and_modifiers() {
        let names = variable_names("/search{?q,page}{&limit}/files{/path*}{#frag}{.ext}").unwrap();
        assert_eq!(names, vec!["q", "page", "limit", "path", "frag", "ext"]);

        let names = variable_names("/users/{name:3}").unwrap();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn test_duplicate_variables_reported_once() {
        let names = variable_names("/{id}/copy/{id}").unwrap();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_unterminated_expression() {
        let err = variable_names("/users/{id").unwrap_err();
        assert!(matches!(err, Error::InvalidUriTemplate { .. }));
    }

    #[test]
    fn test_empty_expression() {
        assert!(variable_names("/users/{}").is_err());
    }

    #[test]
    fn test_normalize_axum_colon_syntax() {
        assert_eq!(
            normalize_path("/posts/:post_id/comments/:comment_id"),
            "/posts/{post_id}/comments/{comment_id}"
        );
        assert_eq!(normalize_path("/assets/*path"), "/assets/{path}");
    }

    #[test]
    fn test_normalize_axum_08_wildcard() {
        assert_eq!(normalize_path("/assets/{*path}"), "/assets/{path}");
    }

    #[test]
    fn test_normalize_actix_regex_and_tail() {
        assert_eq!(normalize_path("/users/{id:\\d+}"), "/users/{id}");
        assert_eq!(normalize_path("/years/{year:\\d{4}}"), "/years/{year}");
        assert_eq!(normalize_path("/static/{tail}*"), "/static/{tail}");
    }

    #[test]
    fn test_normalize_leaves_templates_alone() {
        assert_eq!(normalize_path("/users/{id}"), "/users/{id}");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "");
    }
}
