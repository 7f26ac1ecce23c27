//! End-to-end SDK generation.
//!
//! [`Pipeline::run`] walks a fixed sequence of stages:
//!
//! ```text
//! ResolveVersion -> RenderRoot -> CopyRootToLibrary
//!   -> InvokeTypesGenerator -> InvokeClientGenerator
//!   -> RenderAuth -> RenderTaggedUnion -> PostProcess
//! ```
//!
//! The first failing stage stops the run. Nothing is rolled back and nothing
//! is retried; the error comes back tagged with the stage that produced it.

use crate::fsutil::{copy_file, ensure_dir, write_output};
use crate::postprocess::Formatter;
use crate::spec_files::collect_spec_files;
use crate::stone::{LogFiles, StoneCompiler};
use crate::template_engine::{TemplateEngine, TemplateId};
use crate::version::resolve_spec_version;
use sdkgen_core::traits::ToolRunner;
use sdkgen_core::{Error, GeneratorConfig, Layout, ParameterBundle, Result, SpecVersion};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::{debug, info};

/// One step of the generation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Read the spec revision from git metadata.
    ResolveVersion,
    /// Render the root module into the output directory.
    RenderRoot,
    /// Copy the root module into the library resource directory.
    CopyRootToLibrary,
    /// Run `stone` with the types generator.
    InvokeTypesGenerator,
    /// Run `stone` with the client generator.
    InvokeClientGenerator,
    /// Render the auth helpers.
    RenderAuth,
    /// Render the tagged-union JSON helper.
    RenderTaggedUnion,
    /// Run the formatter over the output directory.
    PostProcess,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Self; 8] = [
        Self::ResolveVersion,
        Self::RenderRoot,
        Self::CopyRootToLibrary,
        Self::InvokeTypesGenerator,
        Self::InvokeClientGenerator,
        Self::RenderAuth,
        Self::RenderTaggedUnion,
        Self::PostProcess,
    ];

    /// Kebab-case stage name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ResolveVersion => "resolve-version",
            Self::RenderRoot => "render-root",
            Self::CopyRootToLibrary => "copy-root-to-library",
            Self::InvokeTypesGenerator => "invoke-types-generator",
            Self::InvokeClientGenerator => "invoke-client-generator",
            Self::RenderAuth => "render-auth",
            Self::RenderTaggedUnion => "render-tagged-union",
            Self::PostProcess => "post-process",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed run: the stage that failed and the error it produced.
#[derive(Debug, ThisError)]
#[error("{stage} stage failed")]
pub struct PipelineError {
    stage: Stage,
    #[source]
    source: Error,
}

impl PipelineError {
    /// The stage that failed.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// The underlying error.
    #[must_use]
    pub const fn error(&self) -> &Error {
        &self.source
    }
}

/// Files the pipeline writes itself, derived from a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `<output>/sdk.go`
    pub root: PathBuf,
    /// `<resource>/sdk.go`
    pub root_copy: PathBuf,
    /// `<output>/auth/sdk.go`
    pub auth: PathBuf,
    /// `<output>/file_properties/tagged.go`
    pub tagged_union: PathBuf,
}

impl OutputPaths {
    /// Computes the output paths for `layout`.
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        Self {
            root: layout.output_dir.join("sdk.go"),
            root_copy: layout.resource_dir.join("sdk.go"),
            auth: layout.output_dir.join("auth").join("sdk.go"),
            tagged_union: layout.output_dir.join("file_properties").join("tagged.go"),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Resolved spec revision.
    pub spec_version: SpecVersion,
    /// Number of spec files handed to `stone`.
    pub spec_files: usize,
    /// Files written by the pipeline itself, in write order.
    pub written: Vec<PathBuf>,
    /// Stages that completed, in order.
    pub completed: Vec<Stage>,
}

#[derive(Debug, Default)]
struct Progress {
    completed: Vec<Stage>,
}

impl Progress {
    fn step<T>(&mut self, stage: Stage, result: Result<T>) -> std::result::Result<T, PipelineError> {
        match result {
            Ok(value) => {
                debug!("Stage {stage} complete");
                self.completed.push(stage);
                Ok(value)
            }
            Err(source) => Err(PipelineError { stage, source }),
        }
    }
}

/// The SDK generation sequence.
///
/// Holds borrowed configuration only; construct one per run.
///
/// # Examples
///
/// ```no_run
/// use sdkgen_codegen::{Pipeline, ProcessToolRunner};
/// use sdkgen_core::{GeneratorConfig, Layout};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GeneratorConfig::default();
/// let layout = Layout::from_root(Path::new("."));
/// let runner = ProcessToolRunner::new();
///
/// let report = Pipeline::new(&config, &layout, &runner).run().await?;
/// println!("generated spec {}", report.spec_version);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<'a> {
    config: &'a GeneratorConfig,
    layout: &'a Layout,
    runner: &'a dyn ToolRunner,
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", self.config)
            .field("layout", self.layout)
            .finish_non_exhaustive()
    }
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given configuration and tool runner.
    #[must_use]
    pub const fn new(
        config: &'a GeneratorConfig,
        layout: &'a Layout,
        runner: &'a dyn ToolRunner,
    ) -> Self {
        Self {
            config,
            layout,
            runner,
        }
    }

    /// Runs every stage in order.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] naming the first stage that failed.
    /// Files written by earlier stages stay on disk.
    pub async fn run(&self) -> std::result::Result<GenerationReport, PipelineError> {
        let layout = self.layout;
        let paths = OutputPaths::new(layout);
        let mut progress = Progress::default();

        info!(
            "Generating '{}' SDK into {}",
            self.config.package,
            layout.output_dir.display()
        );

        let spec_version = progress.step(
            Stage::ResolveVersion,
            resolve_spec_version(&layout.spec_git_dir),
        )?;
        info!("Spec version: {spec_version}");
        let bundle = self.config.bundle(spec_version.clone());

        let engine = progress.step(Stage::RenderRoot, self.render_root(&bundle, &paths))?;

        progress.step(
            Stage::CopyRootToLibrary,
            copy_file(&paths.root, &paths.root_copy),
        )?;

        let stone = StoneCompiler::new(
            &layout.stone_program,
            LogFiles::new(&layout.stdout_log, &layout.stderr_log),
        );
        let spec_files = progress.step(
            Stage::InvokeTypesGenerator,
            self.generate_types(&stone).await,
        )?;
        progress.step(
            Stage::InvokeClientGenerator,
            stone
                .generate(
                    self.runner,
                    &layout.client_script,
                    &layout.output_dir,
                    &spec_files,
                )
                .await,
        )?;

        progress.step(
            Stage::RenderAuth,
            render_static(&engine, TemplateId::Auth, &paths.auth),
        )?;
        progress.step(
            Stage::RenderTaggedUnion,
            render_static(&engine, TemplateId::TaggedUnion, &paths.tagged_union),
        )?;

        progress.step(
            Stage::PostProcess,
            Formatter::new(&layout.formatter_program)
                .run(self.runner, &layout.output_dir)
                .await,
        )?;

        info!(
            "Generated SDK for spec {} from {} spec files",
            spec_version,
            spec_files.len()
        );

        Ok(GenerationReport {
            spec_version,
            spec_files: spec_files.len(),
            written: vec![paths.root, paths.root_copy, paths.auth, paths.tagged_union],
            completed: progress.completed,
        })
    }

    /// Loads the templates and writes the root module.
    ///
    /// The engine is returned so the later render stages reuse it.
    fn render_root(
        &self,
        bundle: &ParameterBundle,
        paths: &OutputPaths,
    ) -> Result<TemplateEngine<'static>> {
        ensure_dir(&self.layout.output_dir)?;
        let engine = TemplateEngine::load(self.layout.templates_dir.as_deref())?;
        let source = engine.render(TemplateId::Root, bundle)?;
        write_output(&paths.root, &source)?;
        Ok(engine)
    }

    /// Truncates the logs, collects spec files, and runs the types script.
    ///
    /// Returns the spec files so the client script sees the same list.
    async fn generate_types(&self, stone: &StoneCompiler) -> Result<Vec<PathBuf>> {
        let layout = self.layout;
        stone.logs().truncate()?;
        let spec_files = collect_spec_files(&layout.spec_dir, &layout.spec_glob)?;
        stone
            .generate(
                self.runner,
                &layout.types_script,
                &layout.output_dir,
                &spec_files,
            )
            .await?;
        Ok(spec_files)
    }
}

fn render_static(engine: &TemplateEngine<'_>, id: TemplateId, path: &std::path::Path) -> Result<()> {
    let source = engine.render_static(id)?;
    write_output(path, &source)
}
