/// 결정적 폴백 추출기
/// 외부 호출 없이 정규식과 키워드만으로 추출한다.
// region:    --- Imports
use super::{IntentError, IntentExtractor, RequestIntent, SearchAnalysis};
use crate::catalog::ProductCategory;
use async_trait::async_trait;
use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

// endregion: --- Imports

// region:    --- Keywords
/// 카테고리 키워드 (우선순위 순)
const CATEGORY_KEYWORDS: &[(ProductCategory, &[&str])] = &[
    (
        ProductCategory::Electronics,
        &[
            "laptop", "computer", "monitor", "keyboard", "mouse", "headphone", "tablet", "phone",
            "iphone", "macbook", "dell", "lenovo", "asus", "samsung",
        ],
    ),
    (
        ProductCategory::Furniture,
        &[
            "chair", "desk", "table", "furniture", "cabinet", "bookcase", "shelf", "filing",
            "drawer",
        ],
    ),
    (
        ProductCategory::Office,
        &[
            "paper", "pen", "pencil", "stapler", "supplies", "printer", "ink", "toner", "shredder",
        ],
    ),
    (
        ProductCategory::It,
        &[
            "server", "network", "switch", "router", "firewall", "software", "license", "nas",
            "ups", "backup",
        ],
    ),
];

/// 상품명 키워드 (우선순위 순)
const PRODUCT_NAMES: &[(&[&str], &str)] = &[
    (&["laptop"], "Laptop"),
    (&["monitor"], "Monitor"),
    (&["desk"], "Desk"),
    (&["chair"], "Office Chair"),
    (&["phone", "iphone", "smartphone"], "Smartphone"),
    (&["server"], "Server"),
    (&["printer"], "Printer"),
];

const BRANDS: &[&str] = &[
    "dell",
    "apple",
    "hp",
    "lenovo",
    "asus",
    "microsoft",
    "samsung",
    "lg",
    "acer",
    "sony",
    "herman miller",
    "steelcase",
    "autonomous",
    "uplift",
    "fully",
    "cisco",
    "ubiquiti",
    "fortinet",
];

const SPEC_KEYWORDS: &[&str] = &[
    "i7",
    "i5",
    "ryzen",
    "ssd",
    "hdd",
    "ram",
    "16gb",
    "32gb",
    "4k",
    "uhd",
    "fhd",
    "touchscreen",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by",
];

const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];
// endregion: --- Keywords

// region:    --- Patterns
fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("정규식 리터럴 컴파일 실패"))
}

fn quantity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(
        &RE,
        r"(?i)(\d+)\s*(units?|pieces?|items?|laptops?|monitors?|desks?)?",
    )
}

fn budget_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)\$?(\d+(?:\.\d+)?)\s*(dollars?|USD|per\s*unit)?")
}

fn product_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)need\s+(?:a|an|some)?\s+([a-z\s]+)")
}

fn end_of_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)by\s+(?:the\s+)?end\s+of\s+(\w+)")
}

fn next_period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)next\s+(\w+)")
}
// endregion: --- Patterns

// region:    --- Fallback Extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackIntentExtractor;

impl FallbackIntentExtractor {
    /// 오늘 날짜 기준 요청 의도 추출
    pub fn request_intent(&self, input: &str) -> RequestIntent {
        request_intent_on(input, Utc::now().date_naive())
    }

    pub fn search_analysis(&self, query: &str) -> SearchAnalysis {
        search_analysis(query)
    }
}

#[async_trait]
impl IntentExtractor for FallbackIntentExtractor {
    async fn extract_request(&self, text: &str) -> Result<RequestIntent, IntentError> {
        Ok(self.request_intent(text))
    }

    async fn analyze_search(&self, query: &str) -> Result<SearchAnalysis, IntentError> {
        Ok(self.search_analysis(query))
    }
}

/// 요청 의도 추출 (기준일 지정)
pub fn request_intent_on(input: &str, today: NaiveDate) -> RequestIntent {
    let lower = input.to_lowercase();

    let quantity = quantity_re()
        .captures(input)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let budget = budget_re()
        .captures(input)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    let product_name = product_name(input, &lower);

    let mut search_terms: Vec<String> = BRANDS
        .iter()
        .filter(|brand| lower.contains(*brand))
        .map(|brand| brand.to_string())
        .collect();
    if let Some(name) = &product_name {
        search_terms.push(name.clone());
    }
    search_terms.extend(
        SPEC_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .map(|keyword| keyword.to_string()),
    );

    RequestIntent {
        product_category: Some(category(&lower).unwrap_or(ProductCategory::Other)),
        product_name,
        description: Some(input.trim().to_string()),
        quantity,
        budget,
        required_by: required_by(input, today),
        additional_suggestions: None,
        search_terms: (!search_terms.is_empty()).then(|| search_terms.join(", ")),
    }
}

/// 검색 의도 추출
pub fn search_analysis(query: &str) -> SearchAnalysis {
    let lower = query.to_lowercase();

    let brand = BRANDS
        .iter()
        .find(|brand| lower.contains(*brand))
        .map(|brand| brand.to_string());
    let terms: Vec<&str> = lower
        .split_whitespace()
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(word))
        .collect();

    SearchAnalysis {
        category: category(&lower),
        brand,
        search_terms: (!terms.is_empty()).then(|| terms.join(", ")),
        price_range: None,
    }
}

fn category(lower: &str) -> Option<ProductCategory> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(category, _)| *category)
}

fn product_name(input: &str, lower: &str) -> Option<String> {
    if let Some((_, name)) = PRODUCT_NAMES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lower.contains(keyword)))
    {
        return Some(name.to_string());
    }
    product_phrase_re()
        .captures(input)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// "by the end of <month>" → 해당 월 28일 (올해)
/// "next week|month|year" → 기준일 + 7일 / 1개월 / 1년
/// 첫 번째 패턴이 맞으면 월 이름이 아니어도 두 번째 패턴은 보지 않는다.
fn required_by(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = end_of_month_re().captures(input) {
        let month = caps[1].to_lowercase();
        return MONTHS
            .iter()
            .find(|(name, _)| *name == month)
            .and_then(|(_, number)| NaiveDate::from_ymd_opt(today.year(), *number, 28));
    }

    let caps = next_period_re().captures(input)?;
    match caps[1].to_lowercase().as_str() {
        "week" => today.checked_add_signed(Duration::days(7)),
        "month" => today.checked_add_months(Months::new(1)),
        "year" => today.checked_add_months(Months::new(12)),
        _ => None,
    }
}
// endregion: --- Fallback Extractor
