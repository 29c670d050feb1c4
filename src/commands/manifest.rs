use clap::Args;
use serde::Serialize;

use iconswap::codemod::ResolvedTarget;
use iconswap::config::ConfigSource;

use super::{CmdResult, GlobalArgs, ProjectArgs};
use crate::output::TextReport;

#[derive(Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ManifestOutput {
    #[serde(rename = "manifest", rename_all = "camelCase")]
    Show {
        source_root: String,
        config: ConfigSource,
        targets: Vec<ResolvedTarget>,
        missing: usize,
        mismatched: usize,
    },
}

pub fn run(args: ManifestArgs, _global: &GlobalArgs) -> CmdResult<ManifestOutput> {
    let prepared = args.project.prepare()?;
    let targets = prepared.codemod.resolve_all(&prepared.config.manifest);

    let missing = targets.iter().filter(|t| !t.exists).count();
    let mismatched = targets.iter().filter(|t| !t.warnings.is_empty()).count();

    Ok((
        ManifestOutput::Show {
            source_root: prepared.codemod.source_root().display().to_string(),
            config: prepared.source,
            targets,
            missing,
            mismatched,
        },
        0,
    ))
}

fn target_line(target: &ResolvedTarget) -> String {
    let mut line = match (&target.import_path, target.depth) {
        (Some(import), Some(depth)) => format!("{}  depth={}  {}", target.path, depth, import),
        _ => format!("{}  (outside source root)", target.path),
    };

    if !target.exists {
        line.push_str("  [missing]");
    }
    if target.skip {
        line.push_str("  [skip]");
    }
    for warning in &target.warnings {
        line.push_str(&format!("\n    warning: {}", warning.message()));
    }

    line
}

impl TextReport for ManifestOutput {
    fn render_text(&self) -> String {
        match self {
            ManifestOutput::Show {
                source_root,
                targets,
                missing,
                mismatched,
                ..
            } => {
                let mut lines = vec![format!("source root: {}", source_root)];
                lines.extend(targets.iter().map(target_line));
                lines.push(String::new());
                lines.push(format!(
                    "{} file(s), {} missing, {} with a stale declared depth",
                    targets.len(),
                    missing,
                    mismatched
                ));
                lines.join("\n")
            }
        }
    }
}
