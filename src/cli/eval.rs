// src/cli/eval.rs — Subcommand handlers

use std::path::Path;

use serde::Serialize;

use super::Commands;
use crate::infra::config::Config;
use crate::judge::panel::Panel;
use crate::judge::LabelInput;

/// `@path` reads the file; anything else is taken literally.
pub fn resolve_text(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .map_err(|e| anyhow::anyhow!("cannot read '{}': {}", path, e)),
        None => Ok(arg.to_string()),
    }
}

fn resolve_opt(arg: Option<&str>) -> anyhow::Result<Option<String>> {
    arg.map(resolve_text).transpose()
}

fn non_empty(list: &[String]) -> Option<&[String]> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Dispatch one subcommand against the configured panel.
pub async fn run_command(command: &Commands, config: &Config) -> anyhow::Result<()> {
    // Built per arm so `judges` works without credentials.
    let panel = || -> anyhow::Result<Panel> {
        let panel = Panel::from_config(config)?;
        tracing::debug!(judges = panel.len(), "Panel ready");
        Ok(panel)
    };

    match command {
        Commands::Generation {
            input,
            candidate,
            guidance,
            rubric,
        } => {
            let input = resolve_text(input)?;
            let candidate = resolve_text(candidate)?;
            let guidance = resolve_opt(guidance.as_deref())?;
            let rubric = resolve_opt(rubric.as_deref())?;
            let verdict = panel()?
                .evaluate_generation(&input, &candidate, guidance.as_deref(), rubric.as_deref())
                .await?;
            print_json(&verdict)
        }
        Commands::Classification {
            input,
            candidate,
            allowed,
            multi_label,
            gold,
        } => {
            let input = resolve_text(input)?;
            let labels = match candidate.as_slice() {
                [one] => LabelInput::One(one.clone()),
                many => LabelInput::Many(many.to_vec()),
            };
            let verdict = panel()?
                .evaluate_classification(&input, labels, allowed, *multi_label, non_empty(gold))
                .await?;
            print_json(&verdict)
        }
        Commands::Ranking {
            items,
            candidate,
            criteria,
            gold,
        } => {
            let criteria = resolve_opt(criteria.as_deref())?;
            let verdict = panel()?
                .evaluate_ranking(items, candidate, criteria.as_deref(), non_empty(gold))
                .await?;
            print_json(&verdict)
        }
        Commands::Describe {
            generation,
            reference,
            context,
        } => {
            let generation = resolve_text(generation)?;
            let reference = resolve_opt(reference.as_deref())?;
            let context = resolve_opt(context.as_deref())?;
            let results = panel()?
                .describe(&generation, reference.as_deref(), context.as_deref())
                .await?;
            print_json(&results)
        }
        Commands::Judges => list_judges(config),
    }
}

fn list_judges(config: &Config) -> anyhow::Result<()> {
    for judge in config.panel() {
        let settings = judge.settings(&config.generation);
        println!(
            "{:<16} {:<14} {}",
            judge.name,
            judge.provider.to_string(),
            settings.model.as_deref().unwrap_or("(provider default)")
        );
    }
    Ok(())
}
