//! zonemap - match zone requirements to the named spaces of a building model
//!
//! The engine pairs zone specifications extracted from project documents
//! with spaces read from a building model, using:
//! - Containment matching on normalized names and synonyms
//! - Token-set fuzzy scoring for greedy one-to-one assignment
//! - Fuzzy suggestions for spaces nothing could resolve
//!
//! Everything here is a pure, synchronous computation over in-memory lists.
//! Reading documents, models and config files is left to the caller.

pub mod classify;
pub mod containment;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod normalize;
pub mod report;
pub mod requirements;
pub mod stub;
pub mod tables;

pub use classify::Classifier;
pub use error::{FieldCoercionError, TableError};
pub use fuzzy::{assign, similarity, suggest, Assignment};
pub use model::{Point3, Space, ZoneSpec};
pub use report::{build_report, MatchReport, Resolution, UnmatchedZone};
pub use stub::{PlacementStub, StubDefaults};
pub use tables::MatchTables;
