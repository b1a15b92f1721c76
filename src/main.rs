use std::{path::Path, process};

use plotwist::{
    application::{
        compiler::{DocumentOptions, ReportCompiler},
        error::AppError,
        manifest::ReportManifest,
        session::ReportSession,
    },
    config::{self, BuildArgs, CheckArgs, Settings},
    infra::{artifacts::FsArtifactRegistry, output::DocumentWriter, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, kind = error.kind(), "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, kind = error.kind(), "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    match cli_args.command {
        config::Command::Build(args) => run_build(settings, args),
        config::Command::Check(args) => run_check(settings, args),
    }
}

fn run_build(settings: Settings, args: BuildArgs) -> Result<(), AppError> {
    let manifest = ReportManifest::load(&args.manifest)?;
    let options = document_options(&settings, &manifest, args.overrides.title.as_deref());

    let mut registry =
        FsArtifactRegistry::new(&settings.output.directory, settings.output.plots_dir.as_str());
    let mut session = ReportSession::new();
    manifest.apply(&mut session, &mut registry, manifest_dir(&args.manifest))?;

    let compiler = ReportCompiler::new(
        options,
        DocumentWriter::new(settings.output.document_path()),
    );
    let report = compiler.compile(&mut session)?;

    info!(
        target = "plotwist::build",
        manifest = %args.manifest.display(),
        path = %report.path.display(),
        units = report.units,
        layout_changes = report.layout_changes,
        artifacts = session.next_slot(),
        "Report written"
    );
    Ok(())
}

fn run_check(settings: Settings, args: CheckArgs) -> Result<(), AppError> {
    let manifest = ReportManifest::load(&args.manifest)?;
    let options = document_options(&settings, &manifest, None);

    let mut registry =
        FsArtifactRegistry::planning(&settings.output.directory, settings.output.plots_dir.as_str());
    let mut session = ReportSession::new();
    manifest.apply(&mut session, &mut registry, manifest_dir(&args.manifest))?;

    let compiler = ReportCompiler::new(
        options,
        DocumentWriter::new(settings.output.document_path()),
    );
    let rendered = compiler.render(&mut session)?;

    info!(
        target = "plotwist::check",
        manifest = %args.manifest.display(),
        entries = manifest.len(),
        units = rendered.body.units,
        layout_changes = rendered.body.layout_changes,
        bytes = rendered.html.len(),
        "Manifest is valid"
    );
    Ok(())
}

/// Title precedence: `--title`, then the manifest, then configuration.
fn document_options(
    settings: &Settings,
    manifest: &ReportManifest,
    title_override: Option<&str>,
) -> DocumentOptions {
    let mut options = DocumentOptions::from(&settings.document);
    if let Some(title) = title_override.or(manifest.title.as_deref()) {
        options.title = title.to_string();
    }
    options
}

fn manifest_dir(manifest: &Path) -> &Path {
    manifest.parent().unwrap_or_else(|| Path::new("."))
}
