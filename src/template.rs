//! Endpoint path interpolation
//!
//! Stream paths carry `{placeholder}` segments filled from the active
//! partition, e.g. `/organizations/{organizationId}/users` and
//! `/forms/{formId}/submissions`. An unresolved placeholder is a fatal
//! error for the stream.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching path placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Values available to path rendering
#[derive(Debug, Clone, Default)]
pub struct PathContext {
    values: HashMap<String, String>,
}

impl PathContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Render a path template against the given context
pub fn render(template: &str, ctx: &PathContext) -> Result<String> {
    let mut result = template.to_string();

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let placeholder = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match ctx.get(name) {
            Some(value) => result = result.replace(placeholder, value),
            None => return Err(Error::undefined_var(name)),
        }
    }

    Ok(result)
}

/// List the placeholder names a template requires
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap.get(1).unwrap().as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_path() {
        let ctx = PathContext::new();
        assert_eq!(render("/forms", &ctx).unwrap(), "/forms");
    }

    #[test]
    fn test_render_organization_path() {
        let ctx = PathContext::new().with_value("organizationId", "org_42");
        assert_eq!(
            render("/organizations/{organizationId}/users", &ctx).unwrap(),
            "/organizations/org_42/users"
        );
    }

    #[test]
    fn test_render_form_path() {
        let ctx = PathContext::new().with_value("formId", "frm_7");
        assert_eq!(
            render("/forms/{formId}/submissions", &ctx).unwrap(),
            "/forms/frm_7/submissions"
        );
    }

    #[test]
    fn test_unresolved_placeholder_errors() {
        let ctx = PathContext::new();
        let err = render("/forms/{formId}/questions", &ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::UndefinedVariable { ref variable } if variable == "formId"
        ));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("/organizations/{organizationId}/users"),
            vec!["organizationId"]
        );
        assert!(placeholders("/workspaces").is_empty());
    }
}
