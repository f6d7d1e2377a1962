// ABOUTME: Entry point for the lingo binary.
// ABOUTME: Parses CLI args and launches the TUI or runs a subcommand.

use clap::{CommandFactory, Parser};
use lingo_chat::cli::{self, Cli, Command};
use lingo_core::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(Command::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "lingo", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match &cli.command {
        None => lingo_log::init_file("chat"),
        Some(_) => lingo_log::init_for("lingo-chat"),
    }

    let (config, config_path) = match Config::resolve(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error loading config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, path = %config_path.display(), "Loaded configuration");

    match cli.command {
        Some(Command::Languages) => {
            cli::languages::run();
            ExitCode::SUCCESS
        }
        Some(Command::Doctor) => {
            cli::doctor::run(&config, &config_path);
            ExitCode::SUCCESS
        }
        Some(Command::Config { action }) => {
            match cli::config::run(action, &config, &config_path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(Command::Send {
            text,
            to,
            summarize,
            json,
        }) => block_on(send(&config, &text, to.as_deref(), summarize, json)),
        Some(Command::Completion { .. }) => ExitCode::SUCCESS,
        None => block_on(async {
            match lingo_chat::run_chat(&config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }),
    }
}

fn block_on(fut: impl std::future::Future<Output = ExitCode>) -> ExitCode {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(fut),
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn send(
    config: &Config,
    text: &str,
    to: Option<&str>,
    summarize: bool,
    json: bool,
) -> ExitCode {
    let pipeline = lingo_chat::pipeline_from(config);
    let report = match cli::send::run(&pipeline, text, to, summarize).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.render_text());
        for notice in &report.notices {
            eprintln!("lingo: {notice}");
        }
    }

    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
