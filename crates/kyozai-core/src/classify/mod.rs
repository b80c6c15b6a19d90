pub mod composite;
pub mod engine;
pub mod grade;
pub mod normalize;
pub mod season;
pub mod subject;

pub use engine::classify_product;
pub use normalize::normalize_text;
