//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the three templates the generator renders: the SDK
//! root module, the auth error helpers, and the tagged-union JSON helper for
//! `file_properties`. Templates are either the built-in copies compiled into
//! the binary or files loaded from a directory on disk.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::template_engine::{TemplateEngine, TemplateId};
//! use sdkgen_core::{GeneratorConfig, SpecVersion};
//!
//! let engine = TemplateEngine::new().unwrap();
//! let bundle = GeneratorConfig::default().bundle(SpecVersion::new("abc123"));
//! let root = engine.render(TemplateId::Root, &bundle).unwrap();
//! assert!(root.contains("package dropbox"));
//! ```

use handlebars::Handlebars;
use sdkgen_core::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Identifies one of the generator's templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Root module of the SDK (`sdk.go`), rendered with a `ParameterBundle`.
    Root,
    /// Auth error helpers (`auth/sdk.go`), no parameters.
    Auth,
    /// Tagged-union JSON helper (`file_properties/tagged.go`), no parameters.
    TaggedUnion,
}

impl TemplateId {
    /// Every template, in registration order.
    pub const ALL: [Self; 3] = [Self::Root, Self::Auth, Self::TaggedUnion];

    /// Name the template is registered under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Auth => "auth",
            Self::TaggedUnion => "tagged_union",
        }
    }

    /// File name looked up inside a templates directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Root => "sdk.go.hbs",
            Self::Auth => "auth.go.hbs",
            Self::TaggedUnion => "file_properties.go.hbs",
        }
    }

    const fn builtin_source(self) -> &'static str {
        match self {
            Self::Root => include_str!("../templates/sdk.go.hbs"),
            Self::Auth => include_str!("../templates/auth.go.hbs"),
            Self::TaggedUnion => include_str!("../templates/file_properties.go.hbs"),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Template engine for code generation.
///
/// Runs Handlebars in strict mode, so a reference to a field missing from the
/// context is a render error. HTML escaping is disabled; output is Go source.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates an engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut engine = Self::empty();
        for id in TemplateId::ALL {
            engine.register(id, id.builtin_source())?;
        }
        Ok(engine)
    }

    /// Creates an engine from the template files in `dir`.
    ///
    /// The directory must contain every file named by
    /// [`TemplateId::file_name`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a template file is missing,
    /// unreadable, or has a syntax error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut engine = Self::empty();
        for id in TemplateId::ALL {
            let path = dir.join(id.file_name());
            debug!("Loading template '{}' from {}", id, path.display());
            let source = std::fs::read_to_string(&path).map_err(|e| {
                Error::template(
                    id.name(),
                    format!("cannot read template file {}: {e}", path.display()),
                )
            })?;
            engine.register(id, &source)?;
        }
        Ok(engine)
    }

    /// Creates an engine from `dir` if given, otherwise from the built-ins.
    ///
    /// # Errors
    ///
    /// See [`TemplateEngine::new`] and [`TemplateEngine::from_dir`].
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        dir.map_or_else(Self::new, Self::from_dir)
    }

    fn empty() -> Self {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Registers (or replaces) the source of a template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the source has a syntax error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::template_engine::{TemplateEngine, TemplateId};
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register(TemplateId::Auth, "package auth\n").unwrap();
    /// assert_eq!(engine.render_static(TemplateId::Auth).unwrap(), "package auth\n");
    ///
    /// assert!(engine.register(TemplateId::Auth, "{{#if ready}}unclosed").is_err());
    /// ```
    pub fn register(&mut self, id: TemplateId, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(id.name(), source)
            .map_err(|e| Error::template(id.name(), format!("failed to compile: {e}")))
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the context cannot be serialized
    /// or the template references a field the context lacks.
    pub fn render<T: Serialize>(&self, id: TemplateId, context: &T) -> Result<String> {
        self.handlebars
            .render(id.name(), context)
            .map_err(|e| Error::template(id.name(), format!("rendering failed: {e}")))
    }

    /// Renders a template that takes no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template references any field.
    pub fn render_static(&self, id: TemplateId) -> Result<String> {
        self.render(id, &())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkgen_core::{GeneratorConfig, SpecVersion};
    use serde_json::json;

    fn bundle() -> sdkgen_core::ParameterBundle {
        GeneratorConfig::default().bundle(SpecVersion::new("abc123"))
    }

    // ========================================================================
    // Built-in Template Tests
    // ========================================================================

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_render_root_template() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render(TemplateId::Root, &bundle()).unwrap();

        assert!(rendered.contains("package dropbox"));
        assert!(rendered.contains("apiVersion    = 2"));
        assert!(rendered.contains(r#"defaultDomain = ".dropboxapi.com""#));
        assert!(rendered.contains(r#"hostAPI       = "api""#));
        assert!(rendered.contains(r#"hostContent   = "content""#));
        assert!(rendered.contains(r#"hostNotify    = "notify""#));
        assert!(rendered.contains(r#"sdkVersion    = "6.0.3""#));
        assert!(rendered.contains(r#"specVersion   = "abc123""#));
    }

    #[test]
    fn test_render_root_is_deterministic() {
        let engine = TemplateEngine::new().unwrap();
        let first = engine.render(TemplateId::Root, &bundle()).unwrap();
        let second = engine.render(TemplateId::Root, &bundle()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_root_does_not_escape() {
        let mut config = GeneratorConfig::default();
        config.default_domain = "a&b<c>.example".to_string();
        let engine = TemplateEngine::new().unwrap();

        let rendered = engine
            .render(TemplateId::Root, &config.bundle(SpecVersion::new("x")))
            .unwrap();
        assert!(rendered.contains(".a&b<c>.example"));
        assert!(!rendered.contains("&amp;"));
    }

    #[test]
    fn test_render_root_requires_parameters() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render_static(TemplateId::Root).unwrap_err();
        assert!(err.is_template_error());
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_render_root_missing_field_fails() {
        let engine = TemplateEngine::new().unwrap();
        let partial = json!({"package": "dropbox", "api_version": 2});
        assert!(engine.render(TemplateId::Root, &partial).is_err());
    }

    #[test]
    fn test_render_auth_template() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_static(TemplateId::Auth).unwrap();
        assert!(rendered.contains("package auth"));
        assert!(rendered.contains("func ParseError("));
    }

    #[test]
    fn test_render_tagged_union_template() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_static(TemplateId::TaggedUnion).unwrap();
        assert!(rendered.contains("package file_properties"));
        assert!(rendered.contains("func (pt PropertyType) MarshalJSON()"));
        assert!(rendered.contains("json.Marshal(pt.Tagged.Tag)"));
    }

    #[test]
    fn test_template_ids() {
        assert_eq!(TemplateId::Root.file_name(), "sdk.go.hbs");
        assert_eq!(TemplateId::Auth.file_name(), "auth.go.hbs");
        assert_eq!(TemplateId::TaggedUnion.file_name(), "file_properties.go.hbs");
        assert_eq!(TemplateId::TaggedUnion.to_string(), "tagged_union");
    }

    // ========================================================================
    // Directory Loading Tests
    // ========================================================================

    fn write_templates(dir: &Path) {
        std::fs::write(dir.join("sdk.go.hbs"), "package {{package}} // {{spec_version}}\n")
            .unwrap();
        std::fs::write(dir.join("auth.go.hbs"), "package auth\n").unwrap();
        std::fs::write(dir.join("file_properties.go.hbs"), "package file_properties\n").unwrap();
    }

    #[test]
    fn test_from_dir_overrides_builtins() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());

        let engine = TemplateEngine::from_dir(dir.path()).unwrap();
        assert_eq!(
            engine.render(TemplateId::Root, &bundle()).unwrap(),
            "package dropbox // abc123\n"
        );
        assert_eq!(
            engine.render_static(TemplateId::Auth).unwrap(),
            "package auth\n"
        );
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        std::fs::remove_file(dir.path().join("auth.go.hbs")).unwrap();

        let err = TemplateEngine::from_dir(dir.path()).unwrap_err();
        assert!(err.is_template_error());
        assert!(err.to_string().contains("auth.go.hbs"));
    }

    #[test]
    fn test_from_dir_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        std::fs::write(dir.path().join("sdk.go.hbs"), "package {{package").unwrap();

        let err = TemplateEngine::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::TemplateError { ref template, .. } if template == "root"));
    }

    #[test]
    fn test_load_without_dir_uses_builtins() {
        let engine = TemplateEngine::load(None).unwrap();
        assert!(
            engine
                .render_static(TemplateId::TaggedUnion)
                .unwrap()
                .contains("MarshalJSON")
        );
    }

    #[test]
    fn test_concurrent_template_usage() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }
}
