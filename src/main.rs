use acton_fs_guard::config::{self, FsGuardConfig};
use acton_fs_guard::error::FsGuardError;
use acton_fs_guard::logging;
use acton_fs_guard::tools::{FilesystemTools, ToolContext, ToolResult};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_DENIED: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sandboxed filesystem access for agent tool calls")]
struct Cli {
    /// Configuration file (defaults to the standard search paths)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Workspace root; overrides the configured one
    #[arg(long, global = true, env = "ACTON_FS_WORKSPACE")]
    workspace: Option<String>,
    /// Extra allowed root (repeatable)
    #[arg(long = "allow", global = true)]
    allow: Vec<String>,
    /// Disable containment checks
    #[arg(long, global = true)]
    no_restrict: bool,
    /// Emit tool results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a path may be accessed and print its absolute form
    Check {
        #[arg()]
        path: String,
    },
    /// Read a file
    Read {
        #[arg()]
        path: String,
    },
    /// Write content to a file, creating parent directories
    Write {
        #[arg()]
        path: String,
        #[arg()]
        content: String,
    },
    /// List a directory
    Ls {
        #[arg()]
        path: Option<String>,
    },
    /// Print the tool descriptors as JSON
    Tools,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match cli.command {
        Commands::Check { path } => match config.validator().validate(&path) {
            Ok(resolved) => {
                println!("{}", resolved.display());
                ExitCode::SUCCESS
            }
            Err(e) if e.is_denial() => {
                eprintln!("{e}");
                ExitCode::from(EXIT_DENIED)
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Read { path } => {
            run_tool(&config, cli.json, "read_file", json!({ "path": path })).await
        }
        Commands::Write { path, content } => {
            run_tool(
                &config,
                cli.json,
                "write_file",
                json!({ "path": path, "content": content }),
            )
            .await
        }
        Commands::Ls { path } => {
            let args = match path {
                Some(path) => json!({ "path": path }),
                None => json!({}),
            };
            run_tool(&config, cli.json, "list_dir", args).await
        }
        Commands::Tools => {
            let tools = FilesystemTools::from_config(&config);
            match serde_json::to_string_pretty(&tools.definitions()) {
                Ok(payload) => {
                    println!("{payload}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Loads configuration and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<FsGuardConfig, FsGuardError> {
    let mut config = match &cli.config {
        Some(path) => config::from_path(path)?,
        None => config::load()?,
    };

    if let Some(workspace) = &cli.workspace {
        config.workspace = workspace.clone();
    }
    config.allowed_paths.extend(cli.allow.iter().cloned());
    if cli.no_restrict {
        config.restrict_to_workspace = false;
    }

    Ok(config)
}

/// File logging when configured, otherwise warnings and above on stderr.
fn init_logging(config: &FsGuardConfig) {
    match logging::init(&config.logging) {
        Ok(sink) => tracing::debug!(%sink, "logging initialized"),
        Err(e) => eprintln!("warning: {}", FsGuardError::from(e)),
    }
}

async fn run_tool(
    config: &FsGuardConfig,
    as_json: bool,
    name: &str,
    args: serde_json::Value,
) -> ExitCode {
    let tools = FilesystemTools::from_config(config);
    let result = tools.execute(name, &ToolContext::new(), args).await;
    print_result(&result, as_json);

    if result.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_result(result: &ToolResult, as_json: bool) {
    if as_json {
        match serde_json::to_string(result) {
            Ok(payload) => println!("{payload}"),
            Err(e) => eprintln!("error: {e}"),
        }
    } else if result.is_error {
        eprintln!("error: {}", result.content);
    } else if result.silent {
        eprintln!("{}", result.content);
    } else {
        print!("{}", result.content);
    }
}
