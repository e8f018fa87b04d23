//! Resolve command: containment matching of spaces against zone specs

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use zonemap::model::SpaceList;
use zonemap::report::{MatchReport, Resolver};

use crate::cli::ResolveCommand;
use crate::commands::{cell, classifier, load_requirements};
use crate::config::RuntimeContext;
use crate::output::{load_json, output_for_format, print_table, write_json};

#[derive(Debug, Clone, Serialize, Tabled)]
struct MatchRow {
    #[tabled(rename = "SPACE")]
    space: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "ZONE")]
    zone: String,
    #[tabled(rename = "VIA")]
    via: String,
    #[tabled(rename = "TEMPERATURE")]
    temperature: String,
}

impl MatchRow {
    fn rows(report: &MatchReport) -> Vec<Self> {
        let matched = report.matched.iter().map(|pair| Self {
            space: pair.space.name.clone(),
            id: pair.space.id.clone(),
            zone: pair.zone.name.clone(),
            via: pair.matched_by.term().to_string(),
            temperature: cell(pair.zone.temperature),
        });
        let unmatched = report.unmatched_spaces.iter().map(|space| Self {
            space: space.name.clone(),
            id: space.id.clone(),
            zone: match (&space.suggested_match, space.suggestion_score) {
                (Some(zone), Some(score)) => format!("? {zone} ({score})"),
                (Some(zone), None) => format!("? {zone}"),
                _ => "-".to_string(),
            },
            via: "-".to_string(),
            temperature: "-".to_string(),
        });
        matched.chain(unmatched).collect()
    }
}

pub fn run(ctx: &RuntimeContext, cmd: ResolveCommand) -> Result<()> {
    let tables = ctx.tables()?;
    let requirements = load_requirements(&cmd.requirements)?;
    let spaces = load_json::<SpaceList>(&cmd.spaces)?.into_spaces();

    let batch = requirements.zone_specs();
    log::info!(
        "{} zone specs, {} spaces, {} unreadable requirement values",
        batch.specs.len(),
        spaces.len(),
        batch.errors.len()
    );

    let resolver = Resolver::new(&tables)
        .with_classifier(classifier(ctx, &tables, batch.class_temperatures()))
        .with_suggest_cutoff(ctx.suggest_cutoff(cmd.suggest_cutoff))
        .with_defaults(ctx.config.defaults.clone())
        .with_project(requirements.project());
    let resolution = resolver.resolve(&spaces, &batch.specs);

    if let Some(dir) = cmd.out.as_deref() {
        let stubs = write_json(dir, "stubs.json", &resolution.stubs)?;
        let report = write_json(dir, "match_report.json", &resolution.report)?;
        if !ctx.global.quiet {
            println!("{} stubs -> {}", resolution.stubs.len(), stubs.display());
            println!(
                "{} matched, {} unmatched spaces, {} unmatched zones -> {}",
                resolution.report.matched.len(),
                resolution.report.unmatched_spaces.len(),
                resolution.report.unmatched_zones.len(),
                report.display()
            );
        }
        return Ok(());
    }

    output_for_format(ctx, &resolution.report, || {
        let rows = MatchRow::rows(&resolution.report);
        if rows.is_empty() {
            println!("No spaces found");
        } else {
            print_table(ctx, &rows)?;
        }
        if !resolution.report.unmatched_zones.is_empty() {
            println!();
            let zones: Vec<String> = resolution
                .report
                .unmatched_zones
                .iter()
                .map(|zone| format!("{} (best {})", zone.name, zone.best_score))
                .collect();
            println!("Zones without a space: {}", zones.join(", "));
        }
        Ok(())
    })
}
