//! `rolescout-ranker` — role-priority contact ranking engine.
//!
//! Pure engine crate: receives raw people records from a [`ContactSource`],
//! returns ranked, windowed and shaped results. No CLI or network code.

pub mod domain;
pub mod engine;
pub mod error;
pub mod model;
pub mod name;
pub mod scorer;
pub mod selector;
pub mod shaper;
pub mod source;
pub mod taxonomy;

pub use engine::{process_domain, run_batch, BatchReport, SearchRequest};
pub use error::{RankError, SelectError, SourceError};
pub use model::{
    NameFormat, OrgReport, OrgStatus, Rank, RawContact, RevealedContact, ScoredCandidate,
    SelectionWindow,
};
pub use shaper::{ShapedRow, Table};
pub use source::ContactSource;
pub use taxonomy::{RoleDefinition, RolePriorityList, RoleTaxonomy};
