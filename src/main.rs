use clap::Parser;
use colored::*;
use std::process::ExitCode;
use std::time::Instant;

use ava_init::init::{run, InitReport};
use ava_init::logging;
use ava_init::options::{env_flag, InitOptions, VERBOSE_ENV};

#[derive(Parser)]
#[command(name = "ava-init")]
#[command(version)]
#[command(about = "Add AVA to your project", long_about = None)]
struct Cli {
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments to pass to AVA in the test script"
    )]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = env_flag(VERBOSE_ENV);
    if let Err(e) = logging::init_logging(verbose) {
        eprintln!("{} {}", "⚠".yellow(), e);
    }
    logging::log_system_info();

    let options = InitOptions::new().with_args(cli.args).with_env_overrides();

    let started = Instant::now();
    let result = run(&options);
    logging::log_performance("init", started.elapsed());

    match result {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &InitReport) {
    println!(
        "{} Updated {}",
        "→".green(),
        report.manifest_path.display().to_string().cyan()
    );
    println!("  {} test: {}", "•".blue(), report.test_script.bold());

    match &report.install {
        Some(install) => {
            let specifier = install.specifier.as_deref().unwrap_or("unknown version");
            println!(
                "{} Installed {} with {}",
                "✓".green().bold(),
                specifier.cyan(),
                install.package_manager.to_string().green()
            );
            if let Some(warning) = &install.specifier_warning {
                println!("  {} Unexpected specifier {}", "⚠".yellow(), warning.yellow());
            }
            if install.pinned_wildcard {
                println!("  {} Pinned to {}", "•".blue(), "*".yellow());
            }
        }
        None => println!("  {} Skipped installation", "ℹ".blue()),
    }
}
