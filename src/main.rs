//! rhcert-viewer: interactive HTML viewer generator for certification reports

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use globset::GlobSet;
use rhcert_viewer::analyzer::{GeneratedViewer, ReportAnalysis, ViewerEngine};
use rhcert_viewer::config::{
    build_ignore_set, default_config_json, is_ignored, load_config, CliOverrides, Config,
    CONFIG_FILENAME,
};
use rhcert_viewer::output::ArtifactNames;
use rhcert_viewer::reporter::{ConsoleReporter, JsonReporter};
use rhcert_viewer::watcher::ReportWatcher;
use rhcert_viewer::ViewerError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const LOG_ENV: &str = "RHCERT_VIEWER_LOG";

/// Generate interactive HTML viewers for Red Hat certification test reports
#[derive(Parser, Debug)]
#[command(name = "rhcert-viewer")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Report XML file or directory of reports (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Directory to write the viewer files to (default: config outputDir or current dir)
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Path to config file (default: search .rhcertviewerrc.json in input dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the JSON index to stdout instead of the console summary
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (one line per document)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (every command, debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Also package the three viewer files into a zip archive
    #[arg(long)]
    zip: bool,

    /// Remove previously generated viewer files from the output directory first
    #[arg(long)]
    clean: bool,

    /// Write into a per-document subdirectory named after the content hash
    #[arg(long)]
    scoped: bool,

    /// Also write the sidebar index as JSON next to the viewer
    #[arg(long)]
    index_json: bool,

    /// Watch for report changes and regenerate
    #[arg(long)]
    watch: bool,

    /// Generate viewers in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Maximum characters of command text shown in the sidebar
    #[arg(long, value_name = "N")]
    preview_length: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .rhcertviewerrc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output_dir: self.output_dir.clone(),
            preview_length: self.preview_length,
            clean: self.clean,
            scoped: self.scoped,
            package: self.zip,
            index_json: self.index_json,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rhcert_viewer=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init { dir }) = args.command {
        return run_init(dir.as_deref());
    }

    let path = args
        .path
        .clone()
        .context("A report file or directory is required")?;
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let config = load_config(work_dir(&path), args.config.as_deref())?
        .merge_with_cli(&args.overrides());
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    if args.watch {
        return run_watch(&args, &path, config, ignore_set.as_ref());
    }

    let files = collect_xml_files(&path, ignore_set.as_ref())?;
    if files.is_empty() {
        eprintln!("{}: No report files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = ViewerEngine::new().with_config(config);
    let removed = engine.prepare_output(&files);
    if !args.quiet && !args.json {
        ConsoleReporter::new().report_cleaned(removed);
    }

    let use_parallel = args.parallel || files.len() > 10;
    let outcomes = if use_parallel {
        engine.generate_parallel(&files)
    } else {
        engine.generate_many(&files)
    };

    let mut generated = Vec::new();
    let mut failures = 0usize;
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(viewer) => generated.push(viewer),
            Err(e) => {
                failures += 1;
                report_failure(file, &e);
            }
        }
    }

    // A lone input that fails is fatal; in a batch the rest still count.
    if path.is_file() && generated.is_empty() {
        return Ok(ExitCode::from(2));
    }

    report_results(&args, &generated);

    if failures > 0 {
        if !args.quiet && !args.json {
            eprintln!(
                "\n{}: {} of {} reports could not be processed",
                "Failed".red().bold(),
                failures,
                files.len()
            );
        }
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Directory used for config discovery
fn work_dir(path: &Path) -> &Path {
    if path.is_file() {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    } else {
        path
    }
}

fn report_failure(file: &Path, e: &ViewerError) {
    if e.is_input_error() {
        eprintln!("{}: {}", "Error".red(), e);
    } else {
        eprintln!("{}: {}: {}", "Error".red(), file.display(), e);
    }
}

fn report_results(args: &Args, generated: &[GeneratedViewer]) {
    let analyses: Vec<&ReportAnalysis> = generated.iter().map(|g| &g.analysis).collect();

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if let [single] = analyses.as_slice() {
            println!("{}", reporter.report(single));
        } else {
            let stats = ViewerEngine::aggregate_stats(&analyses);
            println!("{}", reporter.report_many(&analyses, &stats));
        }
        return;
    }

    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }

    if args.quiet {
        for analysis in &analyses {
            reporter.report_quiet(analysis);
        }
        return;
    }

    for viewer in generated {
        reporter.report(viewer);
    }
    if generated.len() > 1 {
        reporter.report_summary(&ViewerEngine::aggregate_stats(&analyses));
    }
    if let Some(first) = generated.first() {
        eprintln!(
            "\n{}: Open {} in a browser to view the report",
            "Done".green().bold(),
            first.html_path.display()
        );
    }
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    std::fs::write(&config_path, default_config_json())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {}",
        "Done".green().bold(),
        config_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(
    args: &Args,
    path: &Path,
    config: Config,
    ignore_set: Option<&GlobSet>,
) -> Result<ExitCode> {
    let engine = ViewerEngine::new().with_config(config);
    let reporter = ConsoleReporter::new();

    let regenerate = |file: &Path, names: &ArtifactNames| match engine.generate_as(file, names) {
        Ok(viewer) => {
            if args.quiet {
                reporter.report_quiet(&viewer.analysis);
            } else {
                reporter.report(&viewer);
            }
        }
        Err(e) => report_failure(file, &e),
    };

    let files = collect_xml_files(path, ignore_set)?;
    let removed = engine.prepare_output(&files);
    if !args.quiet {
        reporter.report_cleaned(removed);
    }
    for (file, names) in files.iter().zip(ArtifactNames::for_batch(&files)) {
        regenerate(file, &names);
    }

    let watcher = ReportWatcher::watch(path).context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    loop {
        let changed = watcher.next_changes();
        if changed.is_empty() {
            continue;
        }
        // Names are recomputed over the whole tree so a changed file keeps the
        // name it got in the initial batch, and new files never take another's.
        let names = batch_names(&collect_xml_files(path, ignore_set)?);
        for file in changed {
            if ignore_set.is_some_and(|set| is_ignored(&file, set)) {
                continue;
            }
            tracing::debug!(path = %file.display(), "Change detected");
            let names = names
                .get(&canonical(&file))
                .cloned()
                .unwrap_or_else(|| ArtifactNames::for_input(&file));
            regenerate(&file, &names);
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Batch artifact names keyed by canonical input path
fn batch_names(files: &[PathBuf]) -> HashMap<PathBuf, ArtifactNames> {
    files
        .iter()
        .map(|f| canonical(f))
        .zip(ArtifactNames::for_batch(files))
        .collect()
}

fn collect_xml_files(path: &Path, ignore_set: Option<&GlobSet>) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if ignore_set.is_some_and(|set| is_ignored(path, set)) {
            return Ok(vec![]);
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_xml_file(p))
        .filter(|p| !ignore_set.is_some_and(|set| is_ignored(p, set)))
        .collect();

    // Sort for consistent output
    files.sort();
    Ok(files)
}

fn is_xml_file(path: &Path) -> bool {
    ReportWatcher::is_report_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_xml_file() {
        assert!(is_xml_file(Path::new("lab.xml")));
        assert!(is_xml_file(Path::new("runs/2024/LAB.XML")));
        assert!(!is_xml_file(Path::new("lab-viewer.html")));
        assert!(!is_xml_file(Path::new("xml")));
    }

    #[test]
    fn test_collect_xml_files_with_ignore() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        std::fs::write(dir.path().join("b.xml"), "<r/>").unwrap();
        std::fs::write(dir.path().join("a.xml"), "<r/>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("tmp/c.xml"), "<r/>").unwrap();

        let set = build_ignore_set(&["**/tmp/**".to_string()]).unwrap();
        let files = collect_xml_files(dir.path(), Some(&set)).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }

    #[test]
    fn test_batch_names_keyed_by_canonical_path() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("x")).unwrap();
        std::fs::create_dir_all(dir.path().join("y")).unwrap();
        std::fs::write(dir.path().join("x/lab.xml"), "<r/>").unwrap();
        std::fs::write(dir.path().join("y/lab.xml"), "<r/>").unwrap();

        let files = collect_xml_files(dir.path(), None).unwrap();
        let names = batch_names(&files);
        let second = canonical(&dir.path().join("y/lab.xml"));
        assert_eq!(names[&second].base, "lab-2");
    }

    #[test]
    fn test_work_dir_for_bare_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(work_dir(dir.path()), dir.path());
        assert_eq!(work_dir(Path::new("missing.xml")), Path::new("missing.xml"));
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "rhcert-viewer",
            "lab.xml",
            "-o",
            "out",
            "--zip",
            "--preview-length",
            "20",
        ]);
        let cli = args.overrides();
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(cli.package);
        assert!(!cli.clean);
        assert_eq!(cli.preview_length, Some(20));
    }
}
