//! Provision and tear down the openMVG dependency of sispo.
//!
//! `provision` lays out `software/openMVG/build_openMVG`, clones openMVG with
//! submodules and builds/installs it with CMake. `teardown` deletes the local
//! environment directory after an explicit `y`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sispo_setup::core::layout::Layout;
use sispo_setup::exit_codes;
use sispo_setup::io::config::{CONFIG_FILE_NAME, SetupConfig, load_config, write_config};
use sispo_setup::io::environment::active_conda_prefix;
use sispo_setup::io::process::SystemRunner;
use sispo_setup::logging;
use sispo_setup::provision::{describe, prepare, run_provision};
use sispo_setup::status::collect_status;
use sispo_setup::teardown::run_teardown;

#[derive(Parser)]
#[command(
    name = "sispo-setup",
    version,
    about = "Provision and tear down the openMVG dependency of sispo"
)]
struct Cli {
    /// Project root containing `software/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (default: `<root>/sispo-setup.toml`; missing means defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the directory layout, clone, configure, build and install.
    Provision {
        /// Print the directories and commands without running anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Ask for confirmation, then delete the teardown target.
    Teardown,
    /// Report layout directories and required executables.
    Status {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    match cli.command {
        Command::InitConfig { force } => cmd_init_config(&config_path, force),
        Command::Provision { dry_run } => {
            let cfg = load_config(&config_path)?;
            cmd_provision(&cli.root, &cfg, dry_run)
        }
        Command::Teardown => {
            let cfg = load_config(&config_path)?;
            cmd_teardown(&cli.root, &cfg)
        }
        Command::Status { json } => {
            let cfg = load_config(&config_path)?;
            cmd_status(&cli.root, &cfg, json)
        }
    }
}

fn cmd_provision(root: &Path, cfg: &SetupConfig, dry_run: bool) -> Result<i32> {
    if dry_run {
        let (layout, plan) = prepare(root, cfg)?;
        for line in describe(&layout, &plan) {
            println!("{line}");
        }
        return Ok(exit_codes::OK);
    }
    let report = run_provision(root, cfg, &SystemRunner)?;
    let failed = report.failed_steps();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
        eprintln!("provision: failed steps: {}", names.join(", "));
    }
    Ok(report.exit_code())
}

fn cmd_teardown(root: &Path, cfg: &SetupConfig) -> Result<i32> {
    let layout = Layout::new(root, cfg);
    let prefix = active_conda_prefix();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    run_teardown(
        &layout.teardown_target,
        prefix.as_deref(),
        &mut input,
        &mut output,
    )?;
    Ok(exit_codes::OK)
}

fn cmd_status(root: &Path, cfg: &SetupConfig, json: bool) -> Result<i32> {
    let layout = Layout::new(root, cfg);
    let report = collect_status(&layout)?;
    if json {
        let payload = serde_json::to_string_pretty(&report).context("serialize status")?;
        println!("{payload}");
    } else {
        print!("{}", report.render_text());
    }
    Ok(report.exit_code())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_config(path, &SetupConfig::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}
