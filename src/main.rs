use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::workflow::{self, WorkflowKind};
use commands::ModelArgs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shipmate")]
#[command(version = VERSION)]
#[command(about = "CLI for orchestrating release workflows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate artifact checksums
    Checksum(ModelArgs),
    /// Sign release artifacts
    Sign(ModelArgs),
    /// Prepare packager files for all distributions
    Prepare(ModelArgs),
    /// Package all distributions
    Package(ModelArgs),
    /// Create a release on the configured provider
    Release(ModelArgs),
    /// Upload artifacts to configured targets
    Upload(ModelArgs),
    /// Announce a release
    Announce(ModelArgs),
    /// Run the full release workflow
    FullRelease(ModelArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (kind, args) = match cli.command {
        Commands::Checksum(args) => (WorkflowKind::Checksum, args),
        Commands::Sign(args) => (WorkflowKind::Sign, args),
        Commands::Prepare(args) => (WorkflowKind::Prepare, args),
        Commands::Package(args) => (WorkflowKind::Package, args),
        Commands::Release(args) => (WorkflowKind::Release, args),
        Commands::Upload(args) => (WorkflowKind::Upload, args),
        Commands::Announce(args) => (WorkflowKind::Announce, args),
        Commands::FullRelease(args) => (WorkflowKind::FullRelease, args),
    };

    let (json_result, exit_code) = output::map_cmd_result_to_json(workflow::run(kind, args));
    output::print_json_result(json_result);
    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
