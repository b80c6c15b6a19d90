use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// School grade a product is aimed at: 小1..小6, 中1..中3, or 高校.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    Elementary(u8),
    Middle(u8),
    HighSchool,
}

impl Grade {
    pub fn is_elementary(self) -> bool {
        matches!(self, Grade::Elementary(_))
    }

    pub fn is_middle(self) -> bool {
        matches!(self, Grade::Middle(_))
    }

    /// Parse a display label such as 小3, 中2 or 高校.
    pub fn parse_label(s: &str) -> Option<Grade> {
        let s = s.trim();
        if s == "高校" {
            return Some(Grade::HighSchool);
        }
        let mut chars = s.chars();
        let head = chars.next()?;
        let digit = chars.next()?.to_digit(10)? as u8;
        if chars.next().is_some() {
            return None;
        }
        match head {
            '小' if (1..=6).contains(&digit) => Some(Grade::Elementary(digit)),
            '中' if (1..=3).contains(&digit) => Some(Grade::Middle(digit)),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Elementary(n) => write!(f, "小{n}"),
            Grade::Middle(n) => write!(f, "中{n}"),
            Grade::HighSchool => write!(f, "高校"),
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Grade::parse_label(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown grade label '{s}'")))
    }
}

/// Subject resolved from a product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "国語")]
    Kokugo,
    #[serde(rename = "算数")]
    Sansuu,
    #[serde(rename = "数学")]
    Suugaku,
    #[serde(rename = "英語")]
    Eigo,
    #[serde(rename = "理科")]
    Rika,
    #[serde(rename = "社会")]
    Shakai,
    #[serde(rename = "その他")]
    Sonota,
}

impl Subject {
    /// Keyword-group priority order; その他 is the no-match fallback, not a group.
    pub const GROUP_ORDER: [Subject; 6] = [
        Subject::Kokugo,
        Subject::Sansuu,
        Subject::Suugaku,
        Subject::Eigo,
        Subject::Rika,
        Subject::Shakai,
    ];

    /// Bucket iteration order in grade sections.
    pub const DISPLAY_ORDER: [Subject; 7] = [
        Subject::Kokugo,
        Subject::Sansuu,
        Subject::Suugaku,
        Subject::Eigo,
        Subject::Rika,
        Subject::Shakai,
        Subject::Sonota,
    ];

    /// The five subjects every middle-school grade is expected to order.
    pub const MIDDLE_CORE: [Subject; 5] = [
        Subject::Kokugo,
        Subject::Suugaku,
        Subject::Eigo,
        Subject::Rika,
        Subject::Shakai,
    ];
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Subject::Kokugo => "国語",
            Subject::Sansuu => "算数",
            Subject::Suugaku => "数学",
            Subject::Eigo => "英語",
            Subject::Rika => "理科",
            Subject::Shakai => "社会",
            Subject::Sonota => "その他",
        };
        write!(f, "{label}")
    }
}

/// Seasonal-course marker found in a product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "春期")]
    Spring,
    #[serde(rename = "夏期")]
    Summer,
    #[serde(rename = "冬期")]
    Winter,
}

impl Season {
    pub fn category(self) -> Category {
        match self {
            Season::Spring => Category::Spring,
            Season::Summer => Category::Summer,
            Season::Winter => Category::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Season::Spring => "春期",
            Season::Summer => "夏期",
            Season::Winter => "冬期",
        };
        write!(f, "{label}")
    }
}

/// Mutually exclusive product bucket; doubles as the report tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "入試")]
    Exam,
    #[serde(rename = "春期")]
    Spring,
    #[serde(rename = "夏期")]
    Summer,
    #[serde(rename = "冬期")]
    Winter,
    #[serde(rename = "通年")]
    YearRound,
}

impl Category {
    /// The five recognized tabs, in display order.
    pub const TABS: [Category; 5] = [
        Category::YearRound,
        Category::Spring,
        Category::Summer,
        Category::Winter,
        Category::Exam,
    ];

    pub fn is_seasonal(self) -> bool {
        matches!(self, Category::Spring | Category::Summer | Category::Winter)
    }

    /// Priority rule: exam beats season beats year-round.
    pub fn derive(is_exam: bool, season: Option<Season>) -> Category {
        if is_exam {
            Category::Exam
        } else {
            match season {
                Some(s) => s.category(),
                None => Category::YearRound,
            }
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Category> {
        match s.trim() {
            "通年" | "annual" | "year-round" | "yearround" => Some(Category::YearRound),
            "春期" | "spring" => Some(Category::Spring),
            "夏期" | "summer" => Some(Category::Summer),
            "冬期" | "winter" => Some(Category::Winter),
            "入試" | "exam" => Some(Category::Exam),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Exam => "入試",
            Category::Spring => "春期",
            Category::Summer => "夏期",
            Category::Winter => "冬期",
            Category::YearRound => "通年",
        };
        write!(f, "{label}")
    }
}

/// One validated order line from the source workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub school_name: String,
    pub product_name: String,
    pub quantity: u32,
}

/// Attributes extracted from one product name. Pure function of the string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductClassification {
    pub grade: Option<Grade>,
    pub subject: Subject,
    pub season: Option<Season>,
    pub is_exam: bool,
    pub is_composite: bool,
    pub category: Category,
}

impl Default for ProductClassification {
    fn default() -> Self {
        ProductClassification {
            grade: None,
            subject: Subject::Sonota,
            season: None,
            is_exam: false,
            is_composite: false,
            category: Category::YearRound,
        }
    }
}

/// An order line joined with the classification of its product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedOrderRecord {
    #[serde(flatten)]
    pub record: OrderRecord,
    #[serde(flatten)]
    pub classification: ProductClassification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_labels_round_trip() {
        for grade in [Grade::Elementary(1), Grade::Elementary(6), Grade::Middle(3), Grade::HighSchool] {
            assert_eq!(Grade::parse_label(&grade.to_string()), Some(grade));
        }
    }

    #[test]
    fn grade_label_rejects_out_of_range() {
        assert_eq!(Grade::parse_label("小7"), None);
        assert_eq!(Grade::parse_label("中4"), None);
        assert_eq!(Grade::parse_label("高1"), None);
    }

    #[test]
    fn category_priority_exam_over_season() {
        assert_eq!(Category::derive(true, Some(Season::Summer)), Category::Exam);
        assert_eq!(Category::derive(false, Some(Season::Summer)), Category::Summer);
        assert_eq!(Category::derive(false, None), Category::YearRound);
    }

    #[test]
    fn category_loose_parse() {
        assert_eq!(Category::from_str_loose("通年"), Some(Category::YearRound));
        assert_eq!(Category::from_str_loose("summer"), Some(Category::Summer));
        assert_eq!(Category::from_str_loose("入試"), Some(Category::Exam));
        assert_eq!(Category::from_str_loose("holiday"), None);
    }
}
