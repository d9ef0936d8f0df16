/// 외부 마켓플레이스(Amazon) 상품 링크 파싱
/// 실제 상품 정보를 조회하지 않고 URL에서만 추출한다.
use crate::catalog::ProductCategory;
use crate::error::{ProcurementError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_PRODUCT_NAME: &str = "Amazon Product";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceProduct {
    /// ASIN
    pub product_id: String,
    pub product_name: String,
    pub description: String,
    pub product_category: ProductCategory,
    pub url: String,
}

fn asin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]{10})").expect("정규식 리터럴 컴파일 실패")
    })
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/([^/]+)/(?:dp|gp/product)/").expect("정규식 리터럴 컴파일 실패")
    })
}

/// 링크 파싱
pub fn parse_marketplace_link(url: &str) -> Result<MarketplaceProduct> {
    let url = url.trim();
    if !url.contains("amazon.com") {
        return Err(ProcurementError::validation(
            "Please enter a valid Amazon product URL.",
        ));
    }

    let product_id = asin_re()
        .captures(url)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| {
            ProcurementError::validation("Could not extract product ID from the Amazon URL")
        })?;

    // 슬러그가 없는 링크는 호스트가 잡히므로 제외
    let product_name = title_re()
        .captures(url)
        .map(|caps| caps[1].to_string())
        .filter(|slug| !slug.contains("amazon."))
        .map(|slug| title_case(&slug.replace('-', " ")))
        .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

    Ok(MarketplaceProduct {
        description: format!(
            "Product ID: {}\nSource: Amazon\nURL: {}\n\nPlease find this specific product or an equivalent alternative.",
            product_id, url
        ),
        product_id,
        product_name,
        product_category: ProductCategory::Electronics,
        url: url.to_string(),
    })
}

/// 단어 경계 뒤 첫 글자를 대문자로
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_boundary = true;
    for ch in text.chars() {
        if at_boundary && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_boundary = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
