//! Domain logic - pure release rules independent of any I/O

pub mod commit;
pub mod level;
pub mod tag;

pub use commit::{CommitRecord, ParseFailure};
pub use level::ReleaseLevel;
pub use tag::{TagPattern, TagPolicy};
