//! fxmlc command line interface.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};

use fxmlc_compiler::frontend::java::JavaSourceParser;
use fxmlc_compiler::{BatchReport, Compiler, CompilerConfig, ConversionMode};

mod ui;

#[derive(Parser)]
#[command(name = "fxmlc")]
#[command(version)]
#[command(about = "Converts FXML views into plain Java classes, keeping hand-written code on regeneration")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single markup file
    Convert {
        file: PathBuf,

        /// Output directory for generated Java sources
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every markup file below a directory
    Batch {
        /// Source directory (defaults to the configured one)
        dir: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON report of all units to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Resolve a markup file and report what would be generated
    Check { file: PathBuf },

    /// Watch a directory and reconvert on changes
    Watch {
        dir: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::default(),
    };

    match cli.command {
        Commands::Convert { file, output } => {
            if let Some(output) = output {
                config.out_dir = output;
            }
            convert(config, &file)?;
        }

        Commands::Batch { dir, output, report } => {
            if let Some(output) = output {
                config.out_dir = output;
            }
            let dir = dir.unwrap_or_else(|| config.source_dir.clone());
            run_batch(config, &dir, report.as_deref())?;
        }

        Commands::Check { file } => {
            check(config, &file)?;
        }

        Commands::Watch { dir, output } => {
            if let Some(output) = output {
                config.out_dir = output;
            }
            let dir = dir.unwrap_or_else(|| config.source_dir.clone());
            run_watch_mode(config, &dir).await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn convert(config: CompilerConfig, file: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let compiler = Compiler::new(config);
    let mut parser = JavaSourceParser::new()?;

    let converted = match compiler.convert_file(file, &mut parser) {
        Ok(converted) => converted,
        Err(e) => {
            ui::nope_header();
            return Err(e.into());
        }
    };

    let verb = match converted.mode {
        _ if !converted.changed => "Unchanged",
        ConversionMode::Create => "Created",
        ConversionMode::Merge => "Merged",
    };
    ui::success(&format!(
        "{} {} {} {}",
        verb,
        ui::file_link(&converted.output),
        ui::symbols::ARROW,
        converted.source.display()
    ));
    ui::warnings(&converted.warnings);
    ui::timing("Done", start.elapsed().as_millis());
    Ok(())
}

fn run_batch(config: CompilerConfig, dir: &Path, report_path: Option<&Path>) -> miette::Result<()> {
    let start = Instant::now();
    let spinner = ui::spinner(&format!("Converting {}...", dir.display()));

    let compiler = Compiler::new(config);
    let report = compiler.convert_directory(dir);
    spinner.finish_and_clear();
    let report = report?;

    print_report(&report);
    ui::timing("Done", start.elapsed().as_millis());

    if let Some(path) = report_path {
        let json = report.to_json().map_err(|e| miette::miette!("{}", e))?;
        std::fs::write(path, json).map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
        ui::dim(&format!("Report written to {}", path.display()));
    }

    if !report.is_success() {
        ui::nope_header();
        return Err(miette::miette!("{} of {} unit(s) failed", report.failed(), report.units.len()));
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    if report.units.is_empty() {
        ui::dim("No markup files found.");
        return;
    }

    ui::box_header("UNITS");
    for unit in &report.units {
        ui::box_line(&ui::unit_line(unit));
    }
    ui::box_footer();

    for unit in &report.units {
        if let fxmlc_compiler::UnitStatus::Failed(message) = &unit.status {
            ui::error(&format!("{}: {}", unit.source.display(), message));
        }
        ui::warnings(&unit.warnings);
    }

    println!(
        "    {} created {} {} merged {} {} failed",
        report.created(),
        ui::symbols::DOT,
        report.merged(),
        ui::symbols::DOT,
        report.failed()
    );
}

fn check(config: CompilerConfig, file: &Path) -> miette::Result<()> {
    let spinner = ui::spinner("Resolving markup...");
    let compiler = Compiler::new(config);

    match compiler.check(file) {
        Ok(ir) => {
            spinner.finish_and_clear();
            ui::looking_good();
            println!();
            println!(
                "    {} elements {} {} fields {} {} handlers {} {} localized",
                ir.arena.len(),
                ui::symbols::DOT,
                ir.fields.len(),
                ui::symbols::DOT,
                ir.handlers.len(),
                ui::symbols::DOT,
                ir.i18n_statements.len()
            );
            println!("    Main container: {}", ir.root_node().type_with_generics());
            ui::warnings(&ir.warnings);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            Err(e.into())
        }
    }
}

/// Batch conversion once, then again after every debounced change.
async fn run_watch_mode(config: CompilerConfig, dir: &Path) -> miette::Result<()> {
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    ui::info(&format!("Watching for changes in {}", dir.display()));
    println!();

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    // Generated sources may live inside the watched tree; only markup edits count.
    let filter = config.clone();
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |result: DebounceEventResult| {
        if let Ok(events) = result {
            if touches_markup(&filter, events.iter().map(|e| e.path.as_path())) {
                let _ = notify_tx.send(());
            } else {
                log::trace!("Ignoring {} non-markup change(s)", events.len());
            }
        }
    })
    .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    debouncer
        .watcher()
        .watch(dir, RecursiveMode::Recursive)
        .map_err(|e| miette::miette!("Failed to watch {}: {}", dir.display(), e))?;

    std::thread::spawn(move || {
        while notify_rx.recv().is_ok() {
            let _ = tx.try_send(());
        }
    });

    let compiler = Compiler::new(config);
    rebuild(&compiler, dir);
    ui::info("Ready! Waiting for changes...");

    loop {
        tokio::select! {
            _ = rx.recv() => {
                println!();
                rebuild(&compiler, dir);
                println!();
                ui::info("Ready! Waiting for changes...");
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::dim("Stopping watch mode.");
                break;
            }
        }
    }

    // The watcher stops when dropped.
    drop(debouncer);
    Ok(())
}

fn touches_markup<'a>(config: &CompilerConfig, mut paths: impl Iterator<Item = &'a Path>) -> bool {
    paths.any(|path| config.is_markup(path))
}

fn rebuild(compiler: &Compiler, dir: &Path) {
    let spinner = ui::spinner("Converting...");
    let start = Instant::now();

    match compiler.convert_directory(dir) {
        Ok(report) => {
            spinner.finish_and_clear();
            let duration = start.elapsed().as_millis();
            if report.is_success() {
                ui::success(&format!(
                    "Converted {} unit(s) in {}ms",
                    report.units.len(),
                    duration
                ));
            } else {
                print_report(&report);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error(&format!("{}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["fxmlc", "convert", "Main.fxml", "-o", "out", "-vv", "--config", "fxmlc.json"])
            .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("fxmlc.json")));
        assert!(matches!(cli.command, Commands::Convert { ref output, .. } if output.as_deref() == Some(Path::new("out"))));
    }

    #[test]
    fn watch_ignores_generated_output() {
        let config = CompilerConfig::default();
        let generated = [Path::new("src/generated/java/com/acme/Main.java")];
        let edited = [Path::new("src/generated/java/com/acme/Main.java"), Path::new("views/com.acme.Main.fxml")];

        assert!(!touches_markup(&config, generated.into_iter()));
        assert!(touches_markup(&config, edited.into_iter()));
    }

    #[test]
    fn batch_report_flag() {
        let cli = Cli::try_parse_from(["fxmlc", "batch", "views", "--report", "report.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Batch { ref dir, ref report, .. }
                if dir.as_deref() == Some(Path::new("views")) && report.as_deref() == Some(Path::new("report.json"))
        ));
    }
}
