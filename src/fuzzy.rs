//! Fuzzy matching between zone names and room names
//!
//! Provides:
//! - A token-set similarity score in `[0, 100]`
//! - Greedy one-to-one assignment of zone names to room names
//! - A single best-effort suggestion for a name nothing else resolved
//!
//! The score ignores token order and repetition: "Room A" and "a room"
//! score 100. Both operations are deterministic for a given input order.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimum score for a zone to be assigned a room
pub const DEFAULT_ASSIGN_CUTOFF: u8 = 65;

/// Minimum score for a suggestion to be offered
pub const DEFAULT_SUGGEST_CUTOFF: u8 = 60;

/// Token-set similarity of two names, case-insensitive, in `[0, 100]`.
///
/// Both names are split on whitespace into token sets. The sorted
/// intersection is compared against itself extended by each side's sorted
/// leftover tokens, and the two extended strings against each other; the
/// best of these normalized indel similarities is the score. A name whose
/// tokens are all contained in the other (with at least one shared token)
/// scores 100. An empty or blank name scores 0 against anything.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100;
    }

    let sect = sect.join(" ");
    let extend = |diff: &[&str]| {
        if sect.is_empty() {
            diff.join(" ")
        } else {
            format!("{sect} {}", diff.join(" "))
        }
    };
    let sect_ab = extend(&diff_ab);
    let sect_ba = extend(&diff_ba);

    let mut best = indel_similarity(&sect_ab, &sect_ba);
    if !sect.is_empty() {
        best = best
            .max(indel_similarity(&sect, &sect_ab))
            .max(indel_similarity(&sect, &sect_ba));
    }
    best
}

/// `100 * (1 - indel_distance / (len_a + len_b))`, rounded down
fn indel_similarity(a: &str, b: &str) -> u8 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }
    let distance = indel::distance(a.chars(), b.chars());
    let score = 100 * total.saturating_sub(distance) / total;
    score.min(100) as u8
}

/// One zone's outcome in an assignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub zone: String,
    /// The assigned room, `None` when the best score missed the cutoff
    pub room: Option<String>,
    /// Best score observed for this zone (0 when no room was available)
    pub score: u8,
    /// Position of `room` in the room list
    #[serde(skip)]
    pub room_index: Option<usize>,
}

impl ScoredPair {
    pub fn is_matched(&self) -> bool {
        self.room.is_some()
    }
}

/// Audit trail of an assignment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub cutoff: u8,
    /// One entry per zone, in zone order
    pub pairs: Vec<ScoredPair>,
    pub unmatched_zones: Vec<String>,
    /// Rooms no zone consumed, in room order
    pub unmatched_rooms: Vec<String>,
}

/// Result of [`assign`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Zone name → room name, in the order zones were assigned. A zone
    /// name listed twice keeps its first position and its last room.
    pub mapping: Map<String, Value>,
    pub report: AssignmentReport,
}

impl Assignment {
    pub fn matched(&self) -> impl Iterator<Item = &ScoredPair> {
        self.report.pairs.iter().filter(|p| p.is_matched())
    }

    /// Room assigned to `zone`, if any
    pub fn room_for(&self, zone: &str) -> Option<&str> {
        self.mapping.get(zone).and_then(Value::as_str)
    }
}

/// Greedily assign each zone name its best still-available room name.
///
/// Zones are processed in input order. Each zone takes the highest scoring
/// room not yet consumed, the first one in room order on ties, provided
/// the score reaches `cutoff`; that room is then consumed. Rooms are
/// consumed by position, so repeated room names are distinct candidates.
pub fn assign<Z, R>(zone_names: &[Z], room_names: &[R], cutoff: u8) -> Assignment
where
    Z: AsRef<str>,
    R: AsRef<str>,
{
    let mut consumed = vec![false; room_names.len()];
    let mut assignment = Assignment {
        mapping: Map::new(),
        report: AssignmentReport {
            cutoff,
            ..AssignmentReport::default()
        },
    };

    for zone in zone_names {
        let zone = zone.as_ref();
        let mut best_score = 0u8;
        let mut best_room: Option<usize> = None;

        for (index, room) in room_names.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            let score = similarity(zone, room.as_ref());
            if score > best_score {
                best_score = score;
                best_room = Some(index);
            }
        }

        match best_room {
            Some(index) if best_score >= cutoff => {
                let room = room_names[index].as_ref().to_string();
                log::debug!("assigned zone '{zone}' -> room '{room}' (score {best_score})");
                consumed[index] = true;
                assignment
                    .mapping
                    .insert(zone.to_string(), Value::String(room.clone()));
                assignment.report.pairs.push(ScoredPair {
                    zone: zone.to_string(),
                    room: Some(room),
                    score: best_score,
                    room_index: Some(index),
                });
            }
            _ => {
                log::debug!("zone '{zone}' unmatched (best score {best_score} < {cutoff})");
                assignment.report.pairs.push(ScoredPair {
                    zone: zone.to_string(),
                    room: None,
                    score: best_score,
                    room_index: None,
                });
                assignment.report.unmatched_zones.push(zone.to_string());
            }
        }
    }

    assignment.report.unmatched_rooms = room_names
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(room, _)| room.as_ref().to_string())
        .collect();

    assignment
}

/// Best candidate for a single name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'a> {
    pub candidate: &'a str,
    pub index: usize,
    pub score: u8,
}

/// Suggest the best scoring candidate for `name`, if it reaches `cutoff`.
///
/// Advisory only: keeps no state and consumes nothing. Ties go to the
/// earlier candidate. A blank name never gets a suggestion.
pub fn suggest<'a, S: AsRef<str>>(
    name: &str,
    candidates: &'a [S],
    cutoff: u8,
) -> Option<Suggestion<'a>> {
    if name.trim().is_empty() {
        return None;
    }

    let mut best: Option<Suggestion<'a>> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let score = similarity(name, candidate);
        if best.map_or(true, |b| score > b.score) {
            best = Some(Suggestion {
                candidate,
                index,
                score,
            });
        }
    }

    best.filter(|b| b.score >= cutoff)
}
