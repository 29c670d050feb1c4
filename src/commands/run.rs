use clap::Args;
use serde::Serialize;

use iconswap::config::ConfigSource;
use iconswap::output::{RewriteResult, RunSummary};
use iconswap::RunMode;

use super::{CmdResult, GlobalArgs, ProjectArgs};
use crate::output::{result_lines, TextReport};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RunOutput {
    #[serde(rename = "run", rename_all = "camelCase")]
    Run {
        root: String,
        source_root: String,
        config: ConfigSource,
        dry_run: bool,
        results: Vec<RewriteResult>,
        summary: RunSummary,
        summary_line: String,
    },
}

pub fn run(args: RunArgs, global: &GlobalArgs) -> CmdResult<RunOutput> {
    let prepared = args.project.prepare()?;
    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Write
    };

    if args.dry_run && !global.json {
        crate::tty::status("Dry run: no files will be written");
    }

    let report = prepared.codemod.run(&prepared.config.manifest, mode);
    let summary_line = report.summary_line();

    // Per-file failures are already in the report; the run itself succeeded.
    Ok((
        RunOutput::Run {
            root: prepared.root.display().to_string(),
            source_root: prepared.codemod.source_root().display().to_string(),
            config: prepared.source,
            dry_run: report.dry_run,
            results: report.results,
            summary: report.summary,
            summary_line,
        },
        0,
    ))
}

impl TextReport for RunOutput {
    fn render_text(&self) -> String {
        match self {
            RunOutput::Run {
                dry_run,
                results,
                summary_line,
                ..
            } => {
                let mut lines: Vec<String> = results
                    .iter()
                    .flat_map(|result| result_lines(result, *dry_run))
                    .collect();
                lines.push(String::new());
                lines.push(summary_line.clone());
                lines.join("\n")
            }
        }
    }
}
