use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::model::{Category, Grade, Subject};

/// One product row within a bucket.
#[derive(Debug, Clone, Serialize)]
pub struct ProductEntry {
    pub product_name: String,
    pub total_quantity: u32,
    /// Largest quantity ordered on a single day.
    pub peak_day_quantity: u32,
    /// Earliest day reaching the peak quantity.
    pub peak_day_date: NaiveDate,
    /// Peak day reaches the bulk threshold.
    pub is_bulk: bool,
    /// The bucket's total is at or below half of the grade's strongest subject.
    pub is_low_emphasis: bool,
}

/// What a bucket groups: a regular subject, bundled materials on a
/// seasonal tab, or the ungrouped overall ranking used for 高校.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BucketKind {
    Subject(Subject),
    Composite,
    Overall,
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKind::Subject(s) => write!(f, "{s}"),
            BucketKind::Composite => write!(f, "合本"),
            BucketKind::Overall => write!(f, "全商品"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectBucket {
    pub kind: BucketKind,
    pub total_quantity: u32,
    /// Middle-school core subject with no orders at all.
    pub needs_attention: bool,
    pub entries: Vec<ProductEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeSection {
    pub grade: Grade,
    /// No orders for this grade on this tab.
    pub needs_attention: bool,
    pub buckets: Vec<SubjectBucket>,
}

/// Everything the presentation layer needs for one (school, tab) pair.
#[derive(Debug, Clone, Serialize)]
pub struct TabReport {
    pub school_name: String,
    pub tab: Category,
    /// School's total ordered quantity across every tab.
    pub annual_total_quantity: u32,
    pub bulk_threshold: u32,
    /// Projected incremental revenue; present only on the annual tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_potential: Option<i64>,
    /// The tab has no matching orders at all.
    pub needs_attention: bool,
    pub grades: Vec<GradeSection>,
}
