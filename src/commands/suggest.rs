//! Suggest command

use anyhow::Result;
use serde::Serialize;
use zonemap::fuzzy::suggest;

use crate::config::RuntimeContext;
use crate::output::output_for_format;

#[derive(Debug, Serialize)]
struct SuggestOutput<'a> {
    name: &'a str,
    suggested_match: Option<&'a str>,
    score: Option<u8>,
    cutoff: u8,
}

pub fn run(ctx: &RuntimeContext, name: &str, candidates: &[String], cutoff: Option<u8>) -> Result<()> {
    let cutoff = ctx.suggest_cutoff(cutoff);
    let candidates: Vec<&str> = candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();

    let suggestion = suggest(name, &candidates, cutoff);
    let output = SuggestOutput {
        name,
        suggested_match: suggestion.map(|s| s.candidate),
        score: suggestion.map(|s| s.score),
        cutoff,
    };

    output_for_format(ctx, &output, || {
        match suggestion {
            Some(s) => println!("{} ({})", s.candidate, s.score),
            None => println!("No candidate reached {cutoff}"),
        }
        Ok(())
    })
}
