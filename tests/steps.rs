mod common;

use common::{create_project, setup};
use stitchlog::TrackerError;

#[tokio::test]
async fn test_add_and_edit_step() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let head = service.append_part(project.id, "Head").await.unwrap();

    let step = service.add_step(head.id, Some(" 1-3 "), "  6 sc in MR ").await.unwrap();
    assert_eq!(step.round_number.as_deref(), Some("1-3"));
    assert_eq!(step.instructions, "6 sc in MR");
    assert!(!step.completed);

    let edited = service.edit_step(step.id, Some(""), "FO and stuff").await.unwrap();
    assert_eq!(edited.round_number, None);
    assert_eq!(edited.instructions, "FO and stuff");
}

#[tokio::test]
async fn test_step_requires_instructions_and_part() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let head = service.append_part(project.id, "Head").await.unwrap();

    assert!(matches!(
        service.add_step(head.id, Some("1"), "  ").await.unwrap_err(),
        TrackerError::Validation(_)
    ));
    assert!(matches!(
        service.add_step(404, None, "sc around").await.unwrap_err(),
        TrackerError::NotFound { entity: "Part", id: 404 }
    ));
}

#[tokio::test]
async fn test_toggle_twice_restores_value() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let head = service.append_part(project.id, "Head").await.unwrap();
    let step = service.add_step(head.id, None, "sc 6").await.unwrap();

    assert!(service.toggle_step_completion(step.id).await.unwrap().completed);
    assert!(!service.toggle_step_completion(step.id).await.unwrap().completed);
    assert!(!service.get_step(step.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_reset_steps_for_part_only_touches_that_part() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let head = service.append_part(project.id, "Head").await.unwrap();
    let body = service.append_part(project.id, "Body").await.unwrap();
    let head_step = service.add_step(head.id, None, "sc 6").await.unwrap();
    let body_step = service.add_step(body.id, None, "sc 12").await.unwrap();
    service.toggle_step_completion(head_step.id).await.unwrap();
    service.toggle_step_completion(body_step.id).await.unwrap();

    assert_eq!(service.reset_steps_for_part(head.id).await.unwrap(), 1);

    assert!(!service.get_step(head_step.id).await.unwrap().completed);
    assert!(service.get_step(body_step.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_reset_all_steps_of_project() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let other = create_project(&service, "Bunny", &[]).await;
    let other_part = service.append_part(other.id, "Ears").await.unwrap();
    let other_step = service.add_step(other_part.id, None, "ch 8").await.unwrap();
    service.toggle_step_completion(other_step.id).await.unwrap();

    for name in ["Head", "Body", "Arms"] {
        let part = service.append_part(project.id, name).await.unwrap();
        for i in 0..2 {
            let step = service.add_step(part.id, Some(&i.to_string()), "sc around").await.unwrap();
            service.toggle_step_completion(step.id).await.unwrap();
        }
    }

    assert_eq!(service.reset_all_steps(project.id).await.unwrap(), 6);

    let detail = service.project_detail(project.id).await.unwrap();
    assert!(detail.parts.iter().all(|p| p.completed_count() == 0));
    assert!(service.get_step(other_step.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_reset_on_empty_project() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Empty", &[]).await;
    assert_eq!(service.reset_all_steps(project.id).await.unwrap(), 0);
    assert!(service.reset_all_steps(project.id + 1).await.is_err());
}

#[tokio::test]
async fn test_detail_groups_steps_by_part_in_order() {
    let (service, _dir) = setup().await;
    let project = create_project(&service, "Bear", &[]).await;
    let head = service.append_part(project.id, "Head").await.unwrap();
    let body = service.append_part(project.id, "Body").await.unwrap();
    service.add_step(body.id, Some("1"), "body one").await.unwrap();
    service.add_step(head.id, Some("1"), "head one").await.unwrap();
    service.add_step(head.id, Some("2"), "head two").await.unwrap();

    let detail = service.project_detail(project.id).await.unwrap();
    let grouped: Vec<(String, Vec<String>)> = detail
        .parts
        .iter()
        .map(|p| {
            (
                p.part.name.clone(),
                p.steps.iter().map(|s| s.instructions.clone()).collect(),
            )
        })
        .collect();

    assert_eq!(
        grouped,
        vec![
            ("Head".to_string(), vec!["head one".to_string(), "head two".to_string()]),
            ("Body".to_string(), vec!["body one".to_string()]),
        ]
    );

    let deleted = service.delete_step(detail.parts[0].steps[0].id).await.unwrap();
    assert_eq!(deleted.part_id, head.id);
    assert_eq!(service.project_detail(project.id).await.unwrap().parts[0].steps.len(), 1);
}
