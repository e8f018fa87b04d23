//! Assign command: one-to-one fuzzy assignment of zone names to rooms

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use zonemap::fuzzy::{assign, Assignment};
use zonemap::model::{Space, SpaceList, ZoneSpec};
use zonemap::report::{Resolver, SpaceAssignment};

use crate::cli::AssignCommand;
use crate::commands::{class_temperatures, classifier, load_requirements};
use crate::config::RuntimeContext;
use crate::output::{load_json, output_for_format, print_table, write_json};

/// Zones file: bare names or full zone specs
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZoneInput {
    Names(Vec<String>),
    Specs(Vec<ZoneSpec>),
}

impl ZoneInput {
    fn into_specs(self) -> Vec<ZoneSpec> {
        match self {
            ZoneInput::Names(names) => names.into_iter().map(ZoneSpec::new).collect(),
            ZoneInput::Specs(specs) => specs,
        }
    }
}

/// Rooms file: bare names or spaces from the geometry reader
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoomInput {
    Names(Vec<String>),
    Spaces(SpaceList),
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct PairRow {
    #[tabled(rename = "ZONE")]
    zone: String,
    #[tabled(rename = "ROOM")]
    room: String,
    #[tabled(rename = "SCORE")]
    score: u8,
}

pub fn run(ctx: &RuntimeContext, cmd: AssignCommand) -> Result<()> {
    let cutoff = ctx.assign_cutoff(cmd.cutoff);
    let specs = load_json::<ZoneInput>(&cmd.zones)?.into_specs();
    let rooms = load_json::<RoomInput>(&cmd.rooms)?;

    match rooms {
        RoomInput::Names(rooms) => {
            let zone_names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
            let assignment = assign(&zone_names, &rooms, cutoff);
            finish(ctx, &cmd, &assignment, None)
        }
        RoomInput::Spaces(spaces) => {
            let spaces = spaces.into_spaces();
            let result = assign_spaces(ctx, &cmd, &specs, &spaces, cutoff)?;
            finish(ctx, &cmd, &result.assignment, Some(&result))
        }
    }
}

fn assign_spaces(
    ctx: &RuntimeContext,
    cmd: &AssignCommand,
    specs: &[ZoneSpec],
    spaces: &[Space],
    cutoff: u8,
) -> Result<SpaceAssignment> {
    let tables = ctx.tables()?;
    let requirements = cmd.requirements.as_deref().map(load_requirements).transpose()?;

    let mut resolver = Resolver::new(&tables)
        .with_classifier(classifier(
            ctx,
            &tables,
            class_temperatures(requirements.as_ref()),
        ))
        .with_defaults(ctx.config.defaults.clone());
    if let Some(requirements) = &requirements {
        resolver = resolver.with_project(requirements.project());
    }

    Ok(resolver.assign_spaces(specs, spaces, cutoff))
}

fn finish(
    ctx: &RuntimeContext,
    cmd: &AssignCommand,
    assignment: &Assignment,
    spaces: Option<&SpaceAssignment>,
) -> Result<()> {
    let report = &assignment.report;
    log::info!(
        "assigned {} of {} zones at cutoff {}",
        assignment.matched().count(),
        report.pairs.len(),
        report.cutoff
    );

    if let Some(dir) = cmd.out.as_deref() {
        write_json(dir, "mapping.json", &assignment.mapping)?;
        write_json(dir, "match_report.json", report)?;
        if let Some(spaces) = spaces {
            write_json(dir, "stubs.json", &spaces.stubs)?;
        }
        if !ctx.global.quiet {
            println!(
                "{} assigned, {} unmatched zones, {} unmatched rooms -> {}",
                assignment.mapping.len(),
                report.unmatched_zones.len(),
                report.unmatched_rooms.len(),
                dir.display()
            );
        }
        return Ok(());
    }

    output_for_format(ctx, assignment, || {
        let rows: Vec<PairRow> = report
            .pairs
            .iter()
            .map(|pair| PairRow {
                zone: pair.zone.clone(),
                room: pair.room.clone().unwrap_or_else(|| "-".to_string()),
                score: pair.score,
            })
            .collect();
        if rows.is_empty() {
            println!("No zones given");
        } else {
            print_table(ctx, &rows)?;
        }
        if !report.unmatched_rooms.is_empty() {
            println!();
            println!("Rooms left over: {}", report.unmatched_rooms.join(", "));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_input_accepts_names_and_specs() {
        let names: ZoneInput = serde_json::from_str(r#"["Офис", "Коридор"]"#).unwrap();
        assert_eq!(
            names.into_specs(),
            vec![ZoneSpec::new("Офис"), ZoneSpec::new("Коридор")]
        );

        let specs: ZoneInput =
            serde_json::from_str(r#"[{"name": "Офис", "temperature": 21.5}]"#).unwrap();
        assert_eq!(
            specs.into_specs(),
            vec![ZoneSpec::new("Офис").with_temperature(21.5)]
        );
    }

    #[test]
    fn test_room_input_accepts_names_and_spaces() {
        let names: RoomInput = serde_json::from_str(r#"["Room A1", "Room B2"]"#).unwrap();
        assert!(matches!(names, RoomInput::Names(ref rooms) if rooms.len() == 2));

        let wrapped: RoomInput =
            serde_json::from_str(r#"{"spaces": [{"id": "s1", "name": "Room A1"}]}"#).unwrap();
        match wrapped {
            RoomInput::Spaces(list) => assert_eq!(list.into_spaces()[0].id, "s1"),
            other => panic!("expected spaces, got {other:?}"),
        }

        let bare: RoomInput = serde_json::from_str(r#"[{"id": "s2", "name": "Холл"}]"#).unwrap();
        assert!(matches!(bare, RoomInput::Spaces(_)));
    }
}
