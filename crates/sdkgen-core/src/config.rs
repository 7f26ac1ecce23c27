//! Configuration types for the SDK generator.
//!
//! Configuration is assembled once per run and passed explicitly through the
//! pipeline:
//!
//! - [`GeneratorConfig`] holds the naming and versioning values supplied by
//!   the user (package, API version, domain, hosts, SDK version).
//! - [`ParameterBundle`] is the immutable template context, built from a
//!   `GeneratorConfig` plus the resolved [`SpecVersion`].
//! - [`Layout`] names every path and external program the pipeline touches.
//! - [`ConfigFile`] is the optional TOML file that overrides defaults.
//!
//! Precedence is command-line flag, then config file, then built-in default.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{GeneratorConfig, SdkOverrides, SpecVersion};
//!
//! let mut config = GeneratorConfig::default();
//! SdkOverrides {
//!     sdk_version: Some("7.0.0".to_string()),
//!     ..Default::default()
//! }
//! .apply_to(&mut config);
//!
//! let bundle = config.bundle(SpecVersion::new("abc123"));
//! assert_eq!(bundle.package(), "dropbox");
//! assert_eq!(bundle.sdk_version(), "7.0.0");
//! assert_eq!(bundle.spec_version().as_str(), "abc123");
//! ```

use crate::{Error, Result, SpecVersion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default Go package name of the generated SDK.
pub const DEFAULT_PACKAGE: &str = "dropbox";
/// Default numeric API version.
pub const DEFAULT_API_VERSION: u32 = 2;
/// Default network domain the SDK talks to.
pub const DEFAULT_DOMAIN: &str = "dropboxapi.com";
/// Default SDK version string.
pub const DEFAULT_SDK_VERSION: &str = "6.0.3";

/// User-supplied naming and versioning values.
///
/// # Examples
///
/// ```
/// use sdkgen_core::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.api_version, 2);
/// assert_eq!(config.default_domain, "dropboxapi.com");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Go package name of the generated root module.
    pub package: String,

    /// Numeric API version.
    pub api_version: u32,

    /// Default network domain, without a leading dot.
    pub default_domain: String,

    /// Host identifier for RPC-style endpoints.
    pub host_api: String,

    /// Host identifier for upload/download endpoints.
    pub host_content: String,

    /// Host identifier for long-poll notification endpoints.
    pub host_notify: String,

    /// Version string of the generated SDK.
    pub sdk_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            api_version: DEFAULT_API_VERSION,
            default_domain: DEFAULT_DOMAIN.to_string(),
            host_api: "api".to_string(),
            host_content: "content".to_string(),
            host_notify: "notify".to_string(),
            sdk_version: DEFAULT_SDK_VERSION.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if any name is empty or if the package
    /// name is not a valid Go identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::GeneratorConfig;
    ///
    /// let mut config = GeneratorConfig::default();
    /// config.package = "not a package".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("package", &self.package),
            ("domain", &self.default_domain),
            ("host-api", &self.host_api),
            ("host-content", &self.host_content),
            ("host-notify", &self.host_notify),
            ("sdk-version", &self.sdk_version),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigError {
                    message: format!("{field} cannot be empty"),
                });
            }
        }

        let mut chars = self.package.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::ConfigError {
                message: format!("package '{}' is not a valid Go identifier", self.package),
            });
        }

        Ok(())
    }

    /// Combines this configuration with a resolved spec version.
    #[must_use]
    pub fn bundle(&self, spec_version: SpecVersion) -> ParameterBundle {
        ParameterBundle {
            package: self.package.clone(),
            api_version: self.api_version,
            default_domain: self.default_domain.clone(),
            host_api: self.host_api.clone(),
            host_content: self.host_content.clone(),
            host_notify: self.host_notify.clone(),
            sdk_version: self.sdk_version.clone(),
            spec_version,
        }
    }
}

/// Template context for the root module.
///
/// Immutable once built. Serializes with snake-case keys, which are the
/// names templates refer to (`{{package}}`, `{{spec_version}}`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBundle {
    package: String,
    api_version: u32,
    default_domain: String,
    host_api: String,
    host_content: String,
    host_notify: String,
    sdk_version: String,
    spec_version: SpecVersion,
}

impl ParameterBundle {
    /// Go package name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Numeric API version.
    #[must_use]
    pub const fn api_version(&self) -> u32 {
        self.api_version
    }

    /// Default network domain.
    #[must_use]
    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// API, content and notify host identifiers, in that order.
    #[must_use]
    pub fn hosts(&self) -> [&str; 3] {
        [&self.host_api, &self.host_content, &self.host_notify]
    }

    /// SDK version string.
    #[must_use]
    pub fn sdk_version(&self) -> &str {
        &self.sdk_version
    }

    /// Resolved specification revision.
    #[must_use]
    pub const fn spec_version(&self) -> &SpecVersion {
        &self.spec_version
    }
}

/// Optional overrides for [`GeneratorConfig`].
///
/// Used both for the `[sdk]` table of the config file and for command-line
/// flags, so the two can be layered with the same code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SdkOverrides {
    /// Go package name.
    pub package: Option<String>,
    /// Numeric API version.
    pub api_version: Option<u32>,
    /// Default network domain.
    pub default_domain: Option<String>,
    /// API host identifier.
    pub host_api: Option<String>,
    /// Content host identifier.
    pub host_content: Option<String>,
    /// Notify host identifier.
    pub host_notify: Option<String>,
    /// SDK version string.
    pub sdk_version: Option<String>,
}

impl SdkOverrides {
    /// Writes every present value into `config`.
    pub fn apply_to(&self, config: &mut GeneratorConfig) {
        if let Some(v) = &self.package {
            config.package.clone_from(v);
        }
        if let Some(v) = self.api_version {
            config.api_version = v;
        }
        if let Some(v) = &self.default_domain {
            config.default_domain.clone_from(v);
        }
        if let Some(v) = &self.host_api {
            config.host_api.clone_from(v);
        }
        if let Some(v) = &self.host_content {
            config.host_content.clone_from(v);
        }
        if let Some(v) = &self.host_notify {
            config.host_notify.clone_from(v);
        }
        if let Some(v) = &self.sdk_version {
            config.sdk_version.clone_from(v);
        }
    }
}

/// Every path and external program used by the pipeline.
///
/// # Examples
///
/// ```
/// use sdkgen_core::Layout;
/// use std::path::Path;
///
/// let layout = Layout::from_root(Path::new("/repo"));
/// assert_eq!(layout.output_dir, Path::new("/repo/sdk/dropbox"));
/// assert_eq!(
///     layout.spec_git_dir,
///     Path::new("/repo/.git/modules/generator/dropbox-api-spec")
/// );
/// assert_eq!(layout.stone_program, "stone");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory holding generator scripts, spec sources and logs.
    pub generator_dir: PathBuf,
    /// Version-control metadata directory of the vendored spec submodule.
    pub spec_git_dir: PathBuf,
    /// Directory containing the specification files.
    pub spec_dir: PathBuf,
    /// Glob, relative to `spec_dir`, selecting specification files.
    pub spec_glob: String,
    /// Root of the generated SDK.
    pub output_dir: PathBuf,
    /// Library resource directory receiving a copy of the root file.
    pub resource_dir: PathBuf,
    /// Generator script producing type definitions.
    pub types_script: PathBuf,
    /// Generator script producing client methods.
    pub client_script: PathBuf,
    /// Log file receiving the generator's standard output.
    pub stdout_log: PathBuf,
    /// Log file receiving the generator's standard error.
    pub stderr_log: PathBuf,
    /// Directory with template overrides; built-in templates when `None`.
    pub templates_dir: Option<PathBuf>,
    /// Spec compiler executable.
    pub stone_program: String,
    /// Formatter executable run over the output.
    pub formatter_program: String,
}

impl Layout {
    /// Derives the standard layout from a repository root.
    ///
    /// The output directory is always `<root>/sdk/dropbox`: generated import
    /// paths refer to it regardless of the Go package name. Use
    /// [`LayoutOverrides::output_dir`] to move it.
    #[must_use]
    pub fn from_root(root: &Path) -> Self {
        let generator_dir = root.join("generator");
        let lib_dir = generator_dir.join("lib");
        Self {
            spec_git_dir: root
                .join(".git")
                .join("modules")
                .join("generator")
                .join("dropbox-api-spec"),
            spec_dir: generator_dir.join("dropbox-api-spec"),
            spec_glob: "*.stone".to_string(),
            output_dir: root.join("sdk").join(DEFAULT_PACKAGE),
            resource_dir: lib_dir.join("go_rsrc"),
            types_script: lib_dir.join("go_types.stoneg.py"),
            client_script: lib_dir.join("go_client.stoneg.py"),
            stdout_log: generator_dir.join("stone.out.log"),
            stderr_log: generator_dir.join("stone.err.log"),
            templates_dir: None,
            stone_program: "stone".to_string(),
            formatter_program: "goimports".to_string(),
            generator_dir,
        }
    }
}

/// Path and program overrides for [`Layout`].
///
/// Relative paths are resolved against the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOverrides {
    /// Version-control metadata directory.
    pub spec_git_dir: Option<PathBuf>,
    /// Specification file directory.
    pub spec_dir: Option<PathBuf>,
    /// Specification file glob.
    pub spec_glob: Option<String>,
    /// SDK output directory.
    pub output_dir: Option<PathBuf>,
    /// Library resource directory.
    pub resource_dir: Option<PathBuf>,
    /// Types generator script.
    pub types_script: Option<PathBuf>,
    /// Client generator script.
    pub client_script: Option<PathBuf>,
    /// Template override directory.
    pub templates_dir: Option<PathBuf>,
    /// Spec compiler executable.
    pub stone: Option<String>,
    /// Formatter executable.
    pub formatter: Option<String>,
}

impl LayoutOverrides {
    /// Writes every present value into `layout`.
    pub fn apply_to(&self, layout: &mut Layout, root: &Path) {
        let resolve = |p: &PathBuf| root.join(p);

        if let Some(p) = &self.spec_git_dir {
            layout.spec_git_dir = resolve(p);
        }
        if let Some(p) = &self.spec_dir {
            layout.spec_dir = resolve(p);
        }
        if let Some(g) = &self.spec_glob {
            layout.spec_glob.clone_from(g);
        }
        if let Some(p) = &self.output_dir {
            layout.output_dir = resolve(p);
        }
        if let Some(p) = &self.resource_dir {
            layout.resource_dir = resolve(p);
        }
        if let Some(p) = &self.types_script {
            layout.types_script = resolve(p);
        }
        if let Some(p) = &self.client_script {
            layout.client_script = resolve(p);
        }
        if let Some(p) = &self.templates_dir {
            layout.templates_dir = Some(resolve(p));
        }
        if let Some(s) = &self.stone {
            layout.stone_program.clone_from(s);
        }
        if let Some(s) = &self.formatter {
            layout.formatter_program.clone_from(s);
        }
    }
}

/// Optional TOML configuration file.
///
/// # Examples
///
/// ```toml
/// [sdk]
/// package = "dropbox"
/// api_version = 2
/// sdk_version = "6.0.3"
///
/// [layout]
/// templates_dir = "generator/templates"
/// formatter = "/usr/local/bin/goimports"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Parameter overrides.
    pub sdk: SdkOverrides,
    /// Path and program overrides.
    pub layout: LayoutOverrides,
}

impl ConfigFile {
    /// Loads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilesystemError`] if the file cannot be read and
    /// [`Error::ConfigError`] if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config file: {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| Error::fs(path, e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            Error::ConfigError { message } => Error::ConfigError {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Parses config file contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] on malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::ConfigFile;
    ///
    /// let file = ConfigFile::from_toml_str("[sdk]\napi_version = 3\n").unwrap();
    /// assert_eq!(file.sdk.api_version, Some(3));
    /// assert!(ConfigFile::from_toml_str("[sdk]\nbogus = 1\n").is_err());
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })
    }
}
