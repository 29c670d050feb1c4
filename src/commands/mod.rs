use clap::Args;
use std::path::PathBuf;

use iconswap::config::{CodemodConfig, ConfigSource};
use iconswap::utils::paths;
use iconswap::Codemod;

pub type CmdResult<T> = iconswap::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub json: bool,
}

/// Where the project lives and which config to use.
#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    /// Project root; sourceDir and manifest paths are relative to it
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Config file (defaults to <root>/iconswap.json, then built-in settings)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

/// Everything a command needs before touching files.
pub(crate) struct Prepared {
    pub root: PathBuf,
    pub config: CodemodConfig,
    pub source: ConfigSource,
    pub codemod: Codemod,
}

impl ProjectArgs {
    /// Load and validate the config, then check the source root exists.
    pub(crate) fn prepare(&self) -> iconswap::Result<Prepared> {
        if self.root.trim().is_empty() {
            return Err(iconswap::Error::validation_invalid_argument(
                "root",
                "Project root cannot be empty",
            ));
        }

        let root = paths::expand_tilde(self.root.trim());
        let (config, source) = CodemodConfig::discover(&root, self.config.as_deref())?;
        let codemod = Codemod::new(&root, &config)?;

        Ok(Prepared {
            root: codemod.root().to_path_buf(),
            config,
            source,
            codemod,
        })
    }
}

pub mod manifest;
pub mod run;

/// Dispatch a command to its handler and print its output.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::emit($module::run($args, $global), $global.json)
    };
}

pub(crate) fn run(command: crate::Commands, global: &GlobalArgs) -> i32 {
    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Manifest(args) => dispatch!(args, global, manifest),
    }
}
