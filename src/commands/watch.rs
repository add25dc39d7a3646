use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use stylewatch::application::watch::{WatchEvent, WatchOptions, WatchUseCase};
use stylewatch::config::{Config, ConfigWarning};
use stylewatch::domain::path::absolutize;
use stylewatch::domain::ports::StylesheetCompiler;
use stylewatch::infrastructure::{CommandCompiler, PassthroughCompiler};

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::views::watch::render_watch_event;

/// Configuration for one run and the problems found while loading it
pub struct LoadedConfig {
    pub cwd: PathBuf,
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

pub fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    let cwd = std::env::current_dir().context("could not determine the working directory")?;
    let (config, warnings) = Config::load_layered(&cwd, cli.config.as_deref())?;
    Ok(LoadedConfig {
        cwd,
        config,
        warnings,
    })
}

/// Log verbosity from `-v` flags, raised to debug by `[output] verbose`
pub fn effective_verbosity(flag: u8, config: &Config) -> u8 {
    flag.max(u8::from(config.output.verbose))
}

pub fn cmd_watch(cli: &Cli, loaded: LoadedConfig) -> Result<()> {
    let LoadedConfig {
        cwd,
        config,
        warnings,
    } = loaded;
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    if !ui.json {
        for warning in &warnings {
            eprintln!("Warning: {warning}");
        }
    }

    let options = watch_options(cli, &config, &cwd);
    let command = command_compiler(cli, &config);
    tracing::debug!(?options, ?command, "starting watch");

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("could not install the Ctrl+C handler")?;

    let compiler: Arc<dyn StylesheetCompiler> = match command {
        Some(command) => Arc::new(command),
        None => Arc::new(PassthroughCompiler::new()),
    };
    let use_case = WatchUseCase::new(options, compiler);
    use_case.start(running, |event| emit(&ui, &event))?;

    Ok(())
}

/// External compiler from `--compiler` or the config.
///
/// `None` selects the built-in passthrough compiler.
fn command_compiler(cli: &Cli, config: &Config) -> Option<CommandCompiler> {
    let argv: Vec<String> = match &cli.compiler {
        Some(command) => command.split_whitespace().map(str::to_string).collect(),
        None => config.build.compiler.clone(),
    };
    let compiler = CommandCompiler::from_argv(&argv)?;
    Some(match &config.build.compress_args {
        Some(args) => compiler.with_compress_args(args.clone()),
        None => compiler,
    })
}

/// Merge CLI flags over the loaded configuration
fn watch_options(cli: &Cli, config: &Config, cwd: &Path) -> WatchOptions {
    let roots = if cli.paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        cli.paths.iter().map(|p| absolutize(p, cwd)).collect()
    };
    let output_dir = cli
        .output
        .as_ref()
        .or(config.build.output_dir.as_ref())
        .map(|dir| absolutize(dir, cwd));

    WatchOptions::new(roots, cwd.to_path_buf())
        .with_extensions(
            &config.build.source_extension,
            &config.build.output_extension,
        )
        .with_output_dir(output_dir)
        .with_compress(cli.compress || config.build.compress)
        .with_build_on_start(cli.build_on_start || config.build.build_on_start)
}

fn emit(ui: &UiContext, event: &WatchEvent) {
    if event.is_verbose() && !ui.verbose {
        return;
    }

    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_watch_event(&timestamp, event, ui.color, ui.unicode);
    if event.is_error() {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
