use procurement_service::catalog::recommend::recommend_products;
use procurement_service::catalog::rewards::{
    apply_filter, rewards_catalog, search_rewards, RewardFilter, RewardSort,
};
use procurement_service::catalog::{Catalog, ProductCategory};
use procurement_service::config::LlmConfig;
use procurement_service::intent::fallback::search_analysis;
use procurement_service::intent::{RemoteIntentExtractor, ResilientExtractor};
use std::sync::Arc;
use std::time::Duration;

fn catalog() -> Catalog {
    Catalog::builtin().expect("카탈로그 로드 실패")
}

/// 키가 없어 항상 폴백으로 처리되는 추출기
fn offline_extractor() -> ResilientExtractor {
    let remote = RemoteIntentExtractor::new(LlmConfig::default()).unwrap();
    ResilientExtractor::new(Arc::new(remote), Duration::from_secs(1))
}

fn ids(products: &[procurement_service::catalog::Product]) -> Vec<&str> {
    products.iter().map(|product| product.id.as_str()).collect()
}

/// 내장 카탈로그 로드 테스트
#[test]
fn test_builtin_catalog() {
    let catalog = catalog();

    assert_eq!(catalog.products().len(), 52);
    let laptop = catalog.get_product_by_id("prod_laptop_1").unwrap();
    assert_eq!(laptop.brand, "Dell");
    assert_eq!(laptop.category, ProductCategory::Electronics);
    assert!(catalog.get_product_by_id("prod_missing").is_none());
}

/// 카테고리 + 검색어 매칭 순서 테스트
#[test]
fn test_find_matching_products_ranking() {
    let catalog = catalog();

    let laptops =
        catalog.find_matching_products(Some(ProductCategory::Electronics), Some("dell laptop"), 5);
    assert_eq!(
        ids(&laptops),
        vec![
            "prod_laptop_1",
            "prod_laptop_2",
            "prod_laptop_3",
            "prod_laptop_4",
            "prod_laptop_5"
        ]
    );

    let desks =
        catalog.find_matching_products(Some(ProductCategory::Furniture), Some("standing desk"), 5);
    assert_eq!(
        ids(&desks),
        vec![
            "prod_desk_1",
            "prod_desk_2",
            "prod_desk_4",
            "prod_chair_2",
            "prod_desk_3"
        ]
    );
}

/// 카테고리/검색어 생략 테스트
#[test]
fn test_find_matching_products_filters() {
    let catalog = catalog();

    // Other는 카테고리 필터 없음
    let cisco = catalog.find_matching_products(Some(ProductCategory::Other), Some("cisco"), 5);
    assert_eq!(ids(&cisco), vec!["prod_it_1"]);

    // 검색어가 없으면 카탈로그 순서대로
    let furniture = catalog.find_matching_products(Some(ProductCategory::Furniture), None, 3);
    assert_eq!(
        ids(&furniture),
        vec!["prod_chair_1", "prod_chair_2", "prod_chair_3"]
    );

    // 대소문자 무시
    let upper = catalog.find_matching_products(None, Some("CISCO"), 5);
    assert_eq!(ids(&upper), vec!["prod_it_1"]);

    assert!(catalog
        .find_matching_products(None, Some("zzzz-not-a-product"), 5)
        .is_empty());
    assert_eq!(catalog.find_matching_products(None, None, 52).len(), 52);
}

/// 리워드 상품 변환 테스트
#[test]
fn test_reward_items() {
    let items = catalog().reward_items();

    assert_eq!(items.len(), 20);
    assert_eq!(items[0].id, "prod_laptop_1");
    assert_eq!(items[0].name, "Dell XPS 13");
    assert_eq!(items[0].points, 149_999);
}

/// 리워드 필터/정렬 테스트
#[test]
fn test_reward_filter() {
    let items = catalog().reward_items();

    let apple = apply_filter(
        items.clone(),
        &RewardFilter {
            brand: Some("Apple".to_string()),
            sort: RewardSort::PriceLow,
            ..Default::default()
        },
    );
    assert_eq!(apple.len(), 4);
    assert!(apple.iter().all(|item| item.brand == "Apple"));
    assert!(apple.windows(2).all(|pair| pair[0].points <= pair[1].points));

    let expensive = apply_filter(
        items.clone(),
        &RewardFilter {
            min: Some(150_000),
            sort: RewardSort::PriceHigh,
            ..Default::default()
        },
    );
    assert_eq!(expensive[0].id, "prod_laptop_2");
    assert!(expensive.iter().all(|item| item.points >= 150_000));
    assert!(expensive
        .windows(2)
        .all(|pair| pair[0].points >= pair[1].points));

    // "all"은 브랜드 필터 없음
    let all = apply_filter(
        items,
        &RewardFilter {
            brand: Some("all".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(all.len(), 20);
}

/// 검색 분석으로 리워드 좁히기 테스트
#[test]
fn test_search_rewards() {
    let items = catalog().reward_items();

    let analysis = search_analysis("sony headphones");
    let sony = search_rewards(items.clone(), "sony headphones", &analysis);
    assert_eq!(sony.len(), 1);
    assert_eq!(sony[0].id, "prod_headphones_1");

    // 분석 결과가 비어 있으면 원문 검색
    let empty = search_analysis("xp");
    assert!(empty.is_empty());
    let raw = search_rewards(items, "xp", &empty);
    assert!(raw.iter().any(|item| item.id == "prod_laptop_1"));
}

/// 리워드 카탈로그 조회 테스트 (검색어 + 필터)
#[tokio::test]
async fn test_rewards_catalog() {
    let catalog = catalog();
    let extractor = offline_extractor();

    let filter = RewardFilter {
        q: Some("apple".to_string()),
        sort: RewardSort::PriceHigh,
        ..Default::default()
    };
    let items = rewards_catalog(&extractor, &catalog, &filter).await;

    assert_eq!(items.len(), 4);
    assert_eq!(items[0].id, "prod_laptop_2");
    assert!(items.iter().all(|item| item.brand == "Apple"));
}

/// 자연어 요청 기반 추천 테스트
#[tokio::test]
async fn test_recommend_products() {
    let catalog = catalog();
    let extractor = offline_extractor();

    let recommendation = recommend_products(
        &extractor,
        &catalog,
        "I need 5 Dell XPS laptops with 32GB RAM by the end of next month with a budget of $1500 each",
    )
    .await;

    assert_eq!(
        recommendation.intent.product_category,
        Some(ProductCategory::Electronics)
    );
    assert_eq!(recommendation.products.len(), 5);
    assert_eq!(recommendation.products[0].id, "prod_laptop_1");
    assert!(recommendation
        .products
        .iter()
        .all(|product| product.category == ProductCategory::Electronics));
}
