pub mod builtin;
pub mod schema;

pub use builtin::{load_builtin, load_from_path};
pub use schema::{KeywordConfig, SeasonKeywords, SubjectKeywords};
