/// 상품 카탈로그
/// 프로세스 수명 동안 변경되지 않는 참조 데이터이며 조회/검색에만 사용한다.
// region:    --- Imports
use crate::request::model::ProductInfo;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// endregion: --- Imports

pub mod recommend;
pub mod rewards;

/// 기본 최대 추천 개수
pub const DEFAULT_MAX_RESULTS: usize = 5;

const BUILTIN_PRODUCTS: &str = include_str!("products.json");

// region:    --- Category
/// 상품 카테고리
/// 역직렬화는 대소문자를 구분하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProductCategory {
    Electronics,
    Furniture,
    Office,
    It,
    #[default]
    Other,
}

impl ProductCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Furniture => "furniture",
            ProductCategory::Office => "office",
            ProductCategory::It => "it",
            ProductCategory::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "electronics" => Ok(ProductCategory::Electronics),
            "furniture" => Ok(ProductCategory::Furniture),
            "office" => Ok(ProductCategory::Office),
            "it" => Ok(ProductCategory::It),
            "other" => Ok(ProductCategory::Other),
            _ => Err(format!("unknown product category: {}", raw)),
        }
    }
}

impl TryFrom<String> for ProductCategory {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}
// endregion: --- Category

// region:    --- Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category: ProductCategory,
    pub brand: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub specs: BTreeMap<String, serde_json::Value>,
    pub price: f64,
    pub image_url: String,
}

impl Product {
    /// 검색어가 상품 필드 중 하나에 포함되는지 (term은 소문자)
    fn matches_term(&self, term: &str) -> bool {
        [&self.brand, &self.name, &self.full_name, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
            || self
                .specs
                .values()
                .any(|value| spec_text(value).to_lowercase().contains(term))
    }

    fn match_count(&self, terms: &[String]) -> usize {
        terms.iter().filter(|term| self.matches_term(term)).count()
    }

    /// 요청에 연결할 상품 정보
    pub fn to_product_info(&self) -> ProductInfo {
        ProductInfo {
            id: self.id.clone(),
            sku: format!("SKU-{}", self.id.trim_start_matches("prod_").to_uppercase()),
            name: format!("{} {}", self.brand, self.name),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            image_url: Some(self.image_url.clone()),
        }
    }
}

fn spec_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
// endregion: --- Product Model

// region:    --- Catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// 내장 카탈로그 로드
    pub fn builtin() -> Result<Self, serde_json::Error> {
        let products: Vec<Product> = serde_json::from_str(BUILTIN_PRODUCTS)?;
        debug!("{:<12} --> 카탈로그 로드: {}개 상품", "Catalog", products.len());
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// 상품 조회
    pub fn get_product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// 조건에 맞는 상품 검색
    /// 1. 카테고리가 있고 Other가 아니면 카테고리 일치 상품만
    /// 2. 검색어가 있으면 하나 이상의 단어가 포함된 상품만, 일치 단어 수 내림차순 (안정 정렬)
    /// 3. 최대 max_results개
    pub fn find_matching_products(
        &self,
        category: Option<ProductCategory>,
        query: Option<&str>,
        max_results: usize,
    ) -> Vec<Product> {
        let category = category.filter(|c| *c != ProductCategory::Other);
        let terms: Vec<String> = query
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| category.map_or(true, |c| product.category == c))
            .collect();

        if !terms.is_empty() {
            let mut ranked: Vec<(&Product, usize)> = results
                .into_iter()
                .map(|product| (product, product.match_count(&terms)))
                .filter(|(_, count)| *count > 0)
                .collect();
            ranked.sort_by_key(|(_, count)| Reverse(*count));
            results = ranked.into_iter().map(|(product, _)| product).collect();
        }

        debug!(
            "{:<12} --> 상품 검색 category={:?} terms={:?} -> {}건",
            "Catalog",
            category,
            terms,
            results.len()
        );
        results.into_iter().take(max_results).cloned().collect()
    }
}
// endregion: --- Catalog
