mod common;

use common::{create_material_type, create_project, setup};
use stitchlog::repositories::ProjectSort;
use stitchlog::service::{CounterAction, CounterKind, ProjectListing, TrackerService};

fn titles(listings: &[ProjectListing]) -> Vec<String> {
    listings.iter().map(|l| l.project.title.clone()).collect()
}

async fn list(service: &TrackerService, sort: ProjectSort) -> Vec<ProjectListing> {
    service.list_projects(None, sort).await.unwrap()
}

#[tokio::test]
async fn test_search_matches_title_or_tag() {
    let (service, _dir) = setup().await;
    create_project(&service, "Amigurumi Bear", &[]).await;
    create_project(&service, "Little Guy", &["bear-amigurumi", "toy"]).await;
    create_project(&service, "Dishcloth", &["kitchen"]).await;

    let found = service.list_projects(Some("bear"), ProjectSort::TitleAsc).await.unwrap();
    assert_eq!(titles(&found), ["Amigurumi Bear", "Little Guy"]);
}

#[tokio::test]
async fn test_search_returns_each_project_once() {
    let (service, _dir) = setup().await;
    create_project(&service, "Bear Hat", &["bear", "bear-ears", "hat"]).await;

    let found = service.list_projects(Some("BEAR"), ProjectSort::Newest).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].tags.len(), 3);
}

#[tokio::test]
async fn test_blank_search_lists_everything() {
    let (service, _dir) = setup().await;
    create_project(&service, "One", &[]).await;
    create_project(&service, "Two", &["x"]).await;

    assert_eq!(service.list_projects(None, ProjectSort::Newest).await.unwrap().len(), 2);
    assert_eq!(service.list_projects(Some("   "), ProjectSort::Newest).await.unwrap().len(), 2);
    assert!(service.list_projects(Some("100%"), ProjectSort::Newest).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sort_orders() {
    let (service, _dir) = setup().await;
    let b = create_project(&service, "Beanie", &[]).await;
    let a = create_project(&service, "Afghan", &[]).await;
    let c = create_project(&service, "Cardigan", &[]).await;
    for _ in 0..2 {
        service
            .update_counter(c.id, CounterKind::MadeCount, CounterAction::Increment)
            .await
            .unwrap();
    }
    service
        .update_counter(b.id, CounterKind::MadeCount, CounterAction::Increment)
        .await
        .unwrap();

    assert_eq!(titles(&list(&service, ProjectSort::TitleAsc).await), ["Afghan", "Beanie", "Cardigan"]);
    assert_eq!(titles(&list(&service, ProjectSort::TitleDesc).await), ["Cardigan", "Beanie", "Afghan"]);
    assert_eq!(titles(&list(&service, ProjectSort::MadeCountDesc).await), ["Cardigan", "Beanie", "Afghan"]);
    assert_eq!(titles(&list(&service, ProjectSort::MadeCountAsc).await), ["Afghan", "Beanie", "Cardigan"]);

    // Creation order, ties broken by id
    let oldest = list(&service, ProjectSort::Oldest).await;
    let ids: Vec<i32> = oldest.iter().map(|l| l.project.id).collect();
    assert_eq!(ids, [b.id, a.id, c.id]);
    let newest = list(&service, ProjectSort::Newest).await;
    assert_eq!(newest[0].project.id, c.id);
}

#[tokio::test]
async fn test_title_sort_ignores_case() {
    let (service, _dir) = setup().await;
    create_project(&service, "Zebra Scarf", &[]).await;
    create_project(&service, "apple cozy", &[]).await;
    create_project(&service, "Mittens", &[]).await;

    assert_eq!(
        titles(&list(&service, ProjectSort::TitleAsc).await),
        ["apple cozy", "Mittens", "Zebra Scarf"]
    );
    assert_eq!(
        titles(&list(&service, ProjectSort::TitleDesc).await),
        ["Zebra Scarf", "Mittens", "apple cozy"]
    );
}

#[test]
fn test_sort_keys_parse() {
    for sort in ProjectSort::ALL {
        assert_eq!(sort.as_str().parse::<ProjectSort>().unwrap(), sort);
    }
    assert!("popular".parse::<ProjectSort>().is_err());
    assert_eq!(ProjectSort::default(), ProjectSort::Newest);
}

#[tokio::test]
async fn test_search_material_types_by_brand_or_name() {
    let (service, _dir) = setup().await;
    create_material_type(&service, "Drops", "Paris Cotton").await;
    create_material_type(&service, "Scheepjes", "Catona").await;
    create_material_type(&service, "Clover", "Amour hook 4mm").await;

    let found = service.search_material_types("cot").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].brand, "Drops");

    let found = service.search_material_types("SCHEEP").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Catona");

    assert_eq!(service.search_material_types("").await.unwrap().len(), 3);

    let json = serde_json::to_value(&found[0]).unwrap();
    for key in ["id", "brand", "name", "description"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
