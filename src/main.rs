use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{manifest, run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "iconswap")]
#[command(version = VERSION)]
#[command(about = "Move icon imports off @iconify/react onto a local icon component")]
struct Cli {
    /// Print the JSON envelope instead of the text report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite imports and usage sites in every manifest file
    Run(run::RunArgs),
    /// Show where each manifest file resolves and the import path it gets
    Manifest(manifest::ManifestArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    let exit_code = commands::run(cli.command, &global);

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
