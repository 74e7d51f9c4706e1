mod common;

use common::{create_material_type, create_project, setup};
use stitchlog::service::MaterialTypeInput;
use stitchlog::TrackerError;

#[tokio::test]
async fn test_material_type_crud() {
    let (service, _dir) = setup().await;
    let created = service
        .create_material_type(MaterialTypeInput {
            brand: " Drops ".to_string(),
            name: " Paris ".to_string(),
            description: Some("cotton DK".to_string()),
            external_link: Some("".to_string()),
        })
        .await
        .unwrap();
    assert_eq!((created.brand.as_str(), created.name.as_str()), ("Drops", "Paris"));
    assert_eq!(created.external_link, None);

    let updated = service
        .update_material_type(
            created.id,
            MaterialTypeInput {
                brand: "Drops".to_string(),
                name: "Paris Recycled".to_string(),
                description: None,
                external_link: Some("https://example.com/paris".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Paris Recycled");
    assert_eq!(updated.description, None);
    assert_eq!(updated.created_at, created.created_at);

    let err = service
        .create_material_type(MaterialTypeInput {
            brand: "Drops".to_string(),
            name: " ".to_string(),
            description: None,
            external_link: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(ref f) if f == "name"));
}

#[tokio::test]
async fn test_catalog_is_sorted_by_brand_then_name() {
    let (service, _dir) = setup().await;
    create_material_type(&service, "Scheepjes", "Catona").await;
    create_material_type(&service, "Drops", "Safran").await;
    create_material_type(&service, "Drops", "Paris").await;

    let names: Vec<String> = service
        .list_material_types()
        .await
        .unwrap()
        .into_iter()
        .map(|m| format!("{} {}", m.brand, m.name))
        .collect();
    assert_eq!(names, ["Drops Paris", "Drops Safran", "Scheepjes Catona"]);
}

#[tokio::test]
async fn test_project_materials() {
    let (service, _dir) = setup().await;
    let yarn = create_material_type(&service, "Drops", "Paris").await;
    let project = create_project(&service, "Tote", &[]).await;

    let material = service.add_material(project.id, yarn.id, Some(" 2 skeins ")).await.unwrap();
    assert_eq!(material.quantity.as_deref(), Some("2 skeins"));

    let updated = service.update_material(material.id, Some("3 skeins")).await.unwrap();
    assert_eq!(updated.quantity.as_deref(), Some("3 skeins"));

    let detail = service.project_detail(project.id).await.unwrap();
    assert_eq!(detail.materials.len(), 1);
    assert_eq!(detail.materials[0].material_type.as_ref().unwrap().name, "Paris");

    let removed = service.delete_material(material.id).await.unwrap();
    assert_eq!(removed.project_id, project.id);
    assert!(service.list_materials(project.id).await.unwrap().is_empty());
    assert!(service.get_material_type(yarn.id).await.is_ok());
}

#[tokio::test]
async fn test_add_material_checks_references() {
    let (service, _dir) = setup().await;
    let yarn = create_material_type(&service, "Drops", "Paris").await;
    let project = create_project(&service, "Tote", &[]).await;

    assert!(matches!(
        service.add_material(project.id, 77, None).await.unwrap_err(),
        TrackerError::NotFound { entity: "MaterialType", id: 77 }
    ));
    assert!(matches!(
        service.add_material(88, yarn.id, None).await.unwrap_err(),
        TrackerError::NotFound { entity: "Project", id: 88 }
    ));
    assert!(service.list_materials(project.id).await.unwrap().is_empty());
}
