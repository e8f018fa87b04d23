//! Classify command

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use zonemap::model::ZoneSpec;

use crate::commands::{cell, class_temperatures, classifier, load_requirements};
use crate::config::RuntimeContext;
use crate::output::{output_for_format, print_table};

#[derive(Debug, Clone, Serialize, Tabled)]
struct ClassRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CLASS")]
    class: String,
    #[tabled(rename = "TEMPERATURE")]
    temperature: String,
}

impl From<&ZoneSpec> for ClassRow {
    fn from(spec: &ZoneSpec) -> Self {
        Self {
            name: spec.name.clone(),
            class: cell(spec.class.as_deref()),
            temperature: cell(spec.temperature),
        }
    }
}

pub fn run(ctx: &RuntimeContext, names: &[String], requirements: Option<&Path>) -> Result<()> {
    let tables = ctx.tables()?;
    let requirements = requirements.map(load_requirements).transpose()?;
    let classifier = classifier(ctx, &tables, class_temperatures(requirements.as_ref()));

    let specs: Vec<ZoneSpec> = names
        .iter()
        .map(|name| classifier.spec_for_space_name(name))
        .collect();

    output_for_format(ctx, &specs, || {
        let rows: Vec<ClassRow> = specs.iter().map(ClassRow::from).collect();
        print_table(ctx, &rows)
    })
}
