/// 포인트 리워드 카탈로그 뷰
/// 카탈로그 앞쪽 20개 상품을 포인트 상품으로 변환해 보여준다. (1 USD = 100 포인트)
use super::{Catalog, ProductCategory};
use crate::intent::{ResilientExtractor, SearchAnalysis};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const REWARD_ITEM_LIMIT: usize = 20;
pub const POINTS_PER_DOLLAR: f64 = 100.0;
pub const DEFAULT_MAX_POINTS: u64 = 200_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub points: u64,
    pub category: ProductCategory,
    pub brand: String,
}

impl RewardItem {
    fn text_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RewardSort {
    #[default]
    #[serde(rename = "recommended")]
    Recommended,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
}

/// 리워드 필터 (HTTP 쿼리 파라미터와 동일)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardFilter {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
    #[serde(default)]
    pub sort: RewardSort,
    #[serde(default)]
    pub q: Option<String>,
}

impl Catalog {
    /// 포인트 상품 목록
    pub fn reward_items(&self) -> Vec<RewardItem> {
        self.products
            .iter()
            .take(REWARD_ITEM_LIMIT)
            .map(|product| RewardItem {
                id: product.id.clone(),
                name: format!("{} {}", product.brand, product.name),
                description: product.description.clone(),
                image_url: product.image_url.clone(),
                points: (product.price * POINTS_PER_DOLLAR).round() as u64,
                category: product.category,
                brand: product.brand.clone(),
            })
            .collect()
    }
}

/// 검색 분석 결과로 포인트 상품 좁히기
/// 분석 결과가 비어 있으면 원문 검색어로 단순 검색한다.
pub fn search_rewards(
    items: Vec<RewardItem>,
    query: &str,
    analysis: &SearchAnalysis,
) -> Vec<RewardItem> {
    if analysis.is_empty() {
        let needle = query.trim().to_lowercase();
        return items
            .into_iter()
            .filter(|item| item.text_contains(&needle))
            .collect();
    }

    let terms = analysis.terms();
    let brand = analysis.brand.as_deref().map(str::to_lowercase);
    let mut matched: Vec<(RewardItem, usize)> = items
        .into_iter()
        .filter(|item| analysis.category.map_or(true, |c| item.category == c))
        .filter(|item| {
            brand
                .as_deref()
                .map_or(true, |b| item.brand.to_lowercase().contains(b))
        })
        .map(|item| {
            let count = terms.iter().filter(|term| item.text_contains(term)).count();
            (item, count)
        })
        .filter(|(_, count)| terms.is_empty() || *count > 0)
        .collect();

    matched.sort_by(|a, b| b.1.cmp(&a.1));
    matched.into_iter().map(|(item, _)| item).collect()
}

/// 브랜드, 포인트 범위 필터 후 정렬
pub fn apply_filter(items: Vec<RewardItem>, filter: &RewardFilter) -> Vec<RewardItem> {
    let min = filter.min.unwrap_or(0);
    let max = filter.max.unwrap_or(DEFAULT_MAX_POINTS);
    let brand = filter
        .brand
        .as_deref()
        .filter(|b| !b.is_empty() && *b != "all");

    let mut items: Vec<RewardItem> = items
        .into_iter()
        .filter(|item| brand.map_or(true, |b| item.brand == b))
        .filter(|item| item.points >= min && item.points <= max)
        .collect();

    match filter.sort {
        RewardSort::Recommended => {}
        RewardSort::PriceLow => items.sort_by_key(|item| item.points),
        RewardSort::PriceHigh => items.sort_by(|a, b| b.points.cmp(&a.points)),
    }
    items
}

/// 리워드 카탈로그 조회
/// 검색어가 있으면 검색 의도 분석으로 먼저 좁힌 뒤 필터와 정렬을 적용한다.
pub async fn rewards_catalog(
    extractor: &ResilientExtractor,
    catalog: &Catalog,
    filter: &RewardFilter,
) -> Vec<RewardItem> {
    let mut items = catalog.reward_items();
    if let Some(query) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let analysis = extractor.analyze_search(query).await;
        items = search_rewards(items, query, &analysis);
    }
    let items = apply_filter(items, filter);
    info!("{:<12} --> 리워드 상품 {}건", "Catalog", items.len());
    items
}
