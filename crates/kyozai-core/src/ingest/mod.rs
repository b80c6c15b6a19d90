pub mod xlsx;

pub use xlsx::{load_workbook, CellValue, RawTable};

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::classify::classify_product;
use crate::error::KyozaiError;
use crate::keywords::schema::KeywordConfig;
use crate::model::{ClassifiedOrderRecord, OrderRecord, ProductClassification};

/// Source column holding the order date.
pub const COL_ORDER_DATE: &str = "伝票日付";
/// Source column holding the customer (school) name.
pub const COL_SCHOOL: &str = "得意先名１";
/// Source column holding the product name.
pub const COL_PRODUCT: &str = "商品名";
/// Source column holding the ordered quantity.
pub const COL_QUANTITY: &str = "数量";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_ORDER_DATE, COL_SCHOOL, COL_PRODUCT, COL_QUANTITY];

/// Why a row was excluded during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    NonPositiveQuantity,
    MissingDate,
    MissingSchool,
    MissingProduct,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::NonPositiveQuantity => "quantity missing, unparseable or not positive",
            DropReason::MissingDate => "order date missing or unparseable",
            DropReason::MissingSchool => "school name missing",
            DropReason::MissingProduct => "product name missing",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// 1-based worksheet row number (the header is row 1).
    pub row_number: usize,
    pub reason: DropReason,
}

/// Drop diagnostics for one ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestTrace {
    pub total_rows: usize,
    pub retained: usize,
    pub skipped: Vec<SkippedRow>,
}

impl IngestTrace {
    pub fn dropped(&self) -> usize {
        self.skipped.len()
    }
}

/// Validated, classified records plus the drop diagnostics.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub records: Vec<ClassifiedOrderRecord>,
    pub trace: IngestTrace,
}

/// Validate a decoded table and join each retained row with its product
/// classification.
///
/// Fails fast with `MissingColumns` when any required column is absent,
/// naming every missing one. Individual bad rows are dropped, never fatal;
/// each drop is recorded in the trace and logged.
pub fn ingest_table(
    table: &RawTable,
    config: &KeywordConfig,
) -> Result<IngestOutcome, KyozaiError> {
    let col = |name: &str| table.headers.iter().position(|h| h == name);
    let (date_col, school_col, product_col, qty_col) = match (
        col(COL_ORDER_DATE),
        col(COL_SCHOOL),
        col(COL_PRODUCT),
        col(COL_QUANTITY),
    ) {
        (Some(d), Some(s), Some(p), Some(q)) => (d, s, p, q),
        _ => {
            let columns: Vec<String> = REQUIRED_COLUMNS
                .iter()
                .filter(|c| col(c).is_none())
                .map(|c| c.to_string())
                .collect();
            return Err(KyozaiError::MissingColumns { columns });
        }
    };

    let mut records = Vec::new();
    let mut trace = IngestTrace {
        total_rows: table.rows.len(),
        ..IngestTrace::default()
    };
    // classification is a pure function of the name; memoize per distinct name
    let mut cache: HashMap<String, ProductClassification> = HashMap::new();

    for (i, row) in table.rows.iter().enumerate() {
        let row_number = i + 2;
        let skip = |reason: DropReason, trace: &mut IngestTrace| {
            warn!(row = row_number, reason = %reason, "order row dropped");
            trace.skipped.push(SkippedRow { row_number, reason });
        };

        let quantity = cell_quantity(row.get(qty_col));
        if quantity <= 0 {
            skip(DropReason::NonPositiveQuantity, &mut trace);
            continue;
        }
        let Some(order_date) = cell_date(row.get(date_col)) else {
            skip(DropReason::MissingDate, &mut trace);
            continue;
        };
        let Some(school_name) = cell_text(row.get(school_col)) else {
            skip(DropReason::MissingSchool, &mut trace);
            continue;
        };
        let Some(product_name) = cell_text(row.get(product_col)) else {
            skip(DropReason::MissingProduct, &mut trace);
            continue;
        };

        let classification = cache
            .entry(product_name.clone())
            .or_insert_with(|| classify_product(Some(&product_name), config))
            .clone();

        records.push(ClassifiedOrderRecord {
            record: OrderRecord {
                order_date,
                school_name,
                product_name,
                quantity: quantity as u32,
            },
            classification,
        });
    }

    trace.retained = records.len();
    info!(
        total = trace.total_rows,
        retained = trace.retained,
        dropped = trace.dropped(),
        "order ingestion finished"
    );

    Ok(IngestOutcome { records, trace })
}

fn cell_text(cell: Option<&CellValue>) -> Option<String> {
    match cell? {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        CellValue::Number(f) => Some(f.to_string()),
        CellValue::Date(d) => Some(d.to_string()),
        CellValue::Empty => None,
    }
}

/// Quantity parsing mirrors the lenient numeric coercion of the source
/// system: text parses as a number, fractions truncate toward zero, and
/// anything unparseable coerces to 0 (then fails the positivity filter).
fn cell_quantity(cell: Option<&CellValue>) -> i64 {
    match cell {
        Some(CellValue::Number(f)) => f.trunc() as i64,
        Some(CellValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.trunc() as i64)
            .unwrap_or(0),
        _ => 0,
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%Y年%m月%d日"];

fn cell_date(cell: Option<&CellValue>) -> Option<NaiveDate> {
    match cell? {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        }
        _ => None,
    }
}
