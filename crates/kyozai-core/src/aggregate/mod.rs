pub mod engine;
pub mod outcome;

pub use engine::{build_tab_report, ReportOptions, DEFAULT_BULK_THRESHOLD};
pub use outcome::{BucketKind, GradeSection, ProductEntry, SubjectBucket, TabReport};
