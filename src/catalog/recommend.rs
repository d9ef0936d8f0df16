/// 자연어 요청 기반 상품 추천
use super::{Catalog, Product, DEFAULT_MAX_RESULTS};
use crate::intent::{RequestIntent, ResilientExtractor};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub intent: RequestIntent,
    pub products: Vec<Product>,
}

/// 요청 의도를 추출한 뒤 카탈로그에서 최대 5개 상품 추천
pub async fn recommend_products(
    extractor: &ResilientExtractor,
    catalog: &Catalog,
    text: &str,
) -> Recommendation {
    let intent = extractor.extract_request(text).await;
    let query = recommendation_query(&intent);
    let products =
        catalog.find_matching_products(intent.product_category, Some(&query), DEFAULT_MAX_RESULTS);
    info!(
        "{:<12} --> 추천 상품 {}건 (query: {})",
        "Catalog",
        products.len(),
        query
    );
    Recommendation { intent, products }
}

/// 검색어가 있으면 쉼표를 공백으로 바꿔 사용하고, 없으면 상품명과 설명을 이어 붙인다.
pub fn recommendation_query(intent: &RequestIntent) -> String {
    match intent
        .search_terms
        .as_deref()
        .filter(|terms| !terms.trim().is_empty())
    {
        Some(terms) => terms.replace(',', " "),
        None => format!(
            "{} {}",
            intent.product_name.as_deref().unwrap_or_default(),
            intent.description.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_prefers_search_terms() {
        let intent = RequestIntent {
            product_name: Some("Laptop".to_string()),
            search_terms: Some("dell, Laptop, ram".to_string()),
            ..Default::default()
        };
        assert_eq!(recommendation_query(&intent), "dell  Laptop  ram");
    }

    #[test]
    fn query_falls_back_to_name_and_description() {
        let intent = RequestIntent {
            product_name: Some("Standing Desk".to_string()),
            ..Default::default()
        };
        assert_eq!(recommendation_query(&intent), "Standing Desk");
    }
}
