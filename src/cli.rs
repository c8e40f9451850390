use clap::Parser;

use itertools::Itertools;
use log::info;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::{path::Path as FsPath, sync::mpsc::channel, time::Duration};
use tempfile::NamedTempFile;

use crate::document::{export_string, import_str_with, ImportReport};
use crate::errors::{Error, Result};
use crate::path::Path;
use crate::scene::{Scene, Shape};
use crate::{check_curve_samples, ArcMode, CloseMode, TessellationConfig, DEFAULT_CURVE_SAMPLES};

/// Output produced for each processed input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Per-path statistics and canonical path data
    #[default]
    Summary,
    /// SVG document containing only the (canonicalised) paths
    Svg,
    /// Vertex, index and segment buffers as JSON
    #[cfg(feature = "json")]
    Json,
}

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about=None)] // Read from Cargo.toml
struct Arguments {
    /// File to process ('-' for stdin)
    #[arg(default_value = "-")]
    file: String,

    /// Target output file ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Watch file for changes; update output on change. (FILE must be given)
    #[arg(short, long, requires = "file")]
    watch: bool,

    /// Treat input as raw path data rather than an SVG document
    #[arg(short = 'd', long)]
    path_data: bool,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    format: OutputFormat,

    /// Number of points sampled from each curve command (at most 65536)
    #[arg(long, default_value_t = DEFAULT_CURVE_SAMPLES)]
    samples: usize,

    /// Handling of elliptical arc commands
    #[arg(long, default_value = "reject")]
    arc_mode: ArcMode,

    /// Handling of close-path commands
    #[arg(long, default_value = "connect")]
    close_mode: CloseMode,

    /// Fail if any path in the document could not be imported
    #[arg(long)]
    strict: bool,

    /// Worker threads used to tessellate documents
    #[arg(long, default_value = "1")]
    threads: usize,

    /// Log progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Top-level configuration used by the `svgtess` command-line process.
///
/// This is typically derived from command line arguments and passed to `run()`.
///
/// 'front-end' program settings (e.g. input/output filenames, whether to continually
/// process input on change, etc) are stored directly in this struct. Per-path
/// tessellation settings are stored in the embedded `TessellationConfig` struct.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path to input file, or '-' for stdin
    pub input_path: String,
    /// Path to output file, or '-' for stdout
    pub output_path: String,
    /// Stay monitoring `input_path` for changes (Requires input_path is not stdin)
    pub watch: bool,
    /// Input is path data rather than an SVG document
    pub path_data: bool,
    pub format: OutputFormat,
    /// Fail on any per-path import failure
    pub strict: bool,
    pub threads: usize,
    /// 0: warnings only, 1: info, 2+: debug
    pub verbosity: u8,
    /// tessellation config options
    pub tessellation: TessellationConfig,
}

impl Config {
    fn from_args(args: Arguments) -> Result<Self> {
        if args.watch && args.file == "-" {
            // Should already be enforced by clap validation
            return Err(Error::Cli(
                "A non-stdin file must be provided with -w/--watch argument".into(),
            ));
        }
        check_curve_samples(args.samples)?;
        if args.file != "-" && args.output != "-" {
            let in_path = FsPath::new(&args.file);
            let out_path = FsPath::new(&args.output);
            if out_path.exists() && out_path.canonicalize()? == in_path.canonicalize()? {
                return Err(Error::Cli(
                    "Output path must not refer to the same file as the input file.".into(),
                ));
            }
        }
        Ok(Self {
            input_path: args.file,
            output_path: args.output,
            watch: args.watch,
            path_data: args.path_data,
            format: args.format,
            strict: args.strict,
            threads: args.threads,
            verbosity: args.verbose,
            tessellation: TessellationConfig {
                curve_samples: args.samples,
                arc_mode: args.arc_mode,
                close_mode: args.close_mode,
            },
        })
    }

    /// Create a `Config` object set up given a command line string.
    ///
    /// The string is parsed using `shlex::split()`, so values containing
    /// spaces or quotes should be quoted or escaped appropriately.
    pub fn from_cmdline(args: &str) -> Result<Self> {
        let args = shlex::split(args).unwrap_or_default();
        let args = Arguments::try_parse_from(args.iter()).map_err(Error::from_err)?;
        Self::from_args(args)
    }
}

/// Create a `Config` object from process arguments.
pub fn get_config() -> Result<Config> {
    let args = Arguments::parse();
    Config::from_args(args)
}

/// Set up `env_logger` according to the verbosity level; `RUST_LOG`
/// takes precedence if set.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn load_scene(input: &str, config: &Config) -> Result<ImportReport> {
    if config.path_data {
        let path = Path::parse(input.trim())?.with_config(config.tessellation.clone());
        path.tessellation()?;
        return Ok(ImportReport {
            scene: Scene::from_iter([Shape::new(path)]),
            failures: Vec::new(),
        });
    }
    let report = import_str_with(input, &config.tessellation, config.threads)?;
    if config.strict {
        let scene = report.into_result()?;
        return Ok(ImportReport {
            scene,
            failures: Vec::new(),
        });
    }
    Ok(report)
}

fn summary(report: &ImportReport) -> Result<String> {
    let mut out = String::new();
    for (idx, shape) in report.scene.iter().enumerate() {
        let tess = shape.path.tessellation()?;
        writeln!(
            out,
            "{}: {} commands, {} vertices, {} indices, {} segments",
            shape.label(idx),
            shape.path.len(),
            tess.vertex_count(),
            tess.indices.len(),
            tess.segments.len()
        )
        .map_err(Error::from_err)?;
        writeln!(out, "  d=\"{}\"", shape.path.to_text()).map_err(Error::from_err)?;
    }
    for failure in &report.failures {
        let label = failure
            .id
            .clone()
            .unwrap_or_else(|| format!("path {}", failure.index));
        writeln!(out, "{label}: error: {}", failure.error).map_err(Error::from_err)?;
    }
    writeln!(
        out,
        "compatible: {}",
        if report.is_compatible() { "yes" } else { "no" }
    )
    .map_err(Error::from_err)?;
    Ok(out)
}

/// Process `input` according to `config`, returning the formatted output.
pub fn process_str(input: &str, config: &Config) -> Result<String> {
    let report = load_scene(input, config)?;
    info!(
        "{} paths imported, {} failed",
        report.scene.len(),
        report.failures.len()
    );
    match config.format {
        OutputFormat::Summary => summary(&report),
        OutputFormat::Svg => export_string(&report.scene),
        #[cfg(feature = "json")]
        OutputFormat::Json => crate::json_api::SceneOutput::from_report(&report)?.to_json(),
    }
}

/// Read from `input` (or stdin for '-') and write the processed output to
/// `output` (or stdout for '-').
pub fn process_file(input: &str, output: &str, config: &Config) -> Result<()> {
    let mut in_text = String::new();
    if input == "-" {
        io::stdin().read_to_string(&mut in_text)?;
    } else {
        in_text = fs::read_to_string(input)?;
    }

    let result = process_str(&in_text, config)?;

    if output == "-" {
        io::stdout().write_all(result.as_bytes())?;
    } else {
        // Write to a temp file first so a failure leaves any previous
        // output intact.
        let mut tmpfile = NamedTempFile::new()?;
        tmpfile.write_all(result.as_bytes())?;
        fs::copy(tmpfile.path(), output)?;
    }
    Ok(())
}

/// Run the `svgtess` program with a given `Config`.
pub fn run(config: Config) -> Result<()> {
    if !config.watch {
        process_file(&config.input_path, &config.output_path, &config)?;
    } else if config.input_path != "-" {
        let watch = config.input_path.clone();
        let (tx, rx) = channel();
        let mut watcher = new_debouncer(Duration::from_millis(250), tx).map_err(Error::from_err)?;
        let watch_path = FsPath::new(&watch);
        watcher
            .watcher()
            .watch(watch_path, RecursiveMode::NonRecursive)
            .map_err(Error::from_err)?;
        process_file(&watch, &config.output_path, &config).unwrap_or_else(|e| {
            eprintln!("processing failed: {e}");
        });
        eprintln!("Watching {watch} for changes");
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    if events
                        .iter()
                        .map(|event| event.path.canonicalize())
                        .filter_map(|p| p.ok())
                        .contains(&watch_path.canonicalize()?)
                    {
                        eprintln!("{watch} changed");
                        process_file(&watch, &config.output_path, &config).unwrap_or_else(|e| {
                            eprintln!("processing failed: {e}");
                        });
                    }
                }
                Ok(Err(e)) => eprintln!("Watch error {e:?}"),
                Err(e) => eprintln!("Channel error: {e:?}"),
            }
        }
    }

    Ok(())
}
