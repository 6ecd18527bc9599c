mod common;

use axum::http::StatusCode;
use common::{parse_body, sqlite_stores, test_pool, TestApp};
use prestart_backend::domain::models::{
    attendance::NewAttendance,
    briefing::NewBriefing,
    project::NewProject,
    user::{NewUser, Role},
};
use prestart_backend::domain::ports::Stores;
use prestart_backend::domain::services::migration::migrate_all;

/// Seeds the source store and returns the local manager id.
async fn seed(source: &Stores) -> i64 {
    let manager = source
        .users
        .create(&NewUser {
            name: "Hermmy".into(),
            email: "manager@example.com".into(),
            password: "secret".into(),
            role: Role::ProjectManager,
            company: "Acme Civil".into(),
        })
        .await
        .unwrap();

    let alice = source
        .users
        .create(&NewUser {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "secret".into(),
            role: Role::SiteSupervisor,
            company: "Acme Civil".into(),
        })
        .await
        .unwrap();

    let project = source
        .projects
        .create(&NewProject {
            name: "Site A".into(),
            location: "Perth".into(),
            client: "NPI".into(),
            description: None,
            created_by: manager.id,
        })
        .await
        .unwrap();

    let briefing = source
        .briefings
        .create(&NewBriefing {
            project_id: project.id,
            date: "2025-06-02T07:00:00Z".parse().unwrap(),
            location: "North pit".into(),
            description: "Morning pre-start".into(),
            hazards: vec!["Mobile plant".into()],
            controls: vec!["Exclusion zone".into()],
            created_by: alice.id,
        })
        .await
        .unwrap();

    source
        .attendances
        .create(&NewAttendance {
            briefing_id: briefing.id,
            user_id: Some(alice.id),
            name: "Alice".into(),
            time_on: "07:00".into(),
            time_off: None,
            bac: 0.0,
        })
        .await
        .unwrap();

    source
        .attendances
        .create(&NewAttendance {
            briefing_id: briefing.id,
            user_id: None,
            name: "Worker1".into(),
            time_on: "07:05".into(),
            time_off: Some("15:30".into()),
            bac: 0.01,
        })
        .await
        .unwrap();

    manager.id
}

#[tokio::test]
async fn test_migration_copies_everything_in_dependency_order() {
    let (source_pool, source_file) = test_pool().await;
    let (target_pool, target_file) = test_pool().await;
    let source = sqlite_stores(&source_pool);
    let target = sqlite_stores(&target_pool);

    let local_manager_id = seed(&source).await;

    // Pre-existing remote data shifts the target's ids away from the local
    // ones, which is exactly what the reference rewriting must survive.
    target
        .users
        .create(&NewUser {
            name: "Existing".into(),
            email: "existing@example.com".into(),
            password: "x".into(),
            role: Role::SiteSupervisor,
            company: String::new(),
        })
        .await
        .unwrap();

    let report = migrate_all(&source, &target).await.unwrap();

    assert_eq!(report.users.total, 2);
    assert_eq!(report.users.succeeded, 2);
    assert_eq!(report.projects.succeeded, 1);
    assert_eq!(report.briefings.succeeded, 1);
    assert_eq!(report.attendances.succeeded, 2);
    assert_eq!(report.failed_total(), 0);

    let users = target.users.list().await.unwrap();
    assert_eq!(users.len(), 3);

    let remote_manager = target.users.find_by_email("manager@example.com").await.unwrap().unwrap();
    let remote_alice = target.users.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_ne!(remote_manager.id, local_manager_id);

    let projects = target.projects.list().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].created_by, remote_manager.id);

    let briefings = target.briefings.list().await.unwrap();
    assert_eq!(briefings.len(), 1);
    assert_eq!(briefings[0].project_id, projects[0].id);
    assert_eq!(briefings[0].created_by, remote_alice.id);
    assert_eq!(briefings[0].hazards.0, vec!["Mobile plant".to_string()]);

    let attendances = target.attendances.list_by_briefing(briefings[0].id).await.unwrap();
    assert_eq!(attendances.len(), 2);
    assert_eq!(attendances[0].user_id, Some(remote_alice.id));
    assert_eq!(attendances[1].user_id, None);
    assert_eq!(attendances[1].time_off.as_deref(), Some("15:30"));

    let _ = std::fs::remove_file(&source_file);
    let _ = std::fs::remove_file(&target_file);
}

#[tokio::test]
async fn test_rerun_deduplicates_users_but_not_briefings() {
    let (source_pool, source_file) = test_pool().await;
    let (target_pool, target_file) = test_pool().await;
    let source = sqlite_stores(&source_pool);
    let target = sqlite_stores(&target_pool);

    seed(&source).await;

    let first = migrate_all(&source, &target).await.unwrap();
    assert_eq!(first.failed_total(), 0);

    let second = migrate_all(&source, &target).await.unwrap();
    assert_eq!(second.users.succeeded, 2);
    assert_eq!(second.failed_total(), 0);

    // Users are checked by email before creation; nothing else is.
    assert_eq!(target.users.list().await.unwrap().len(), 2);
    assert_eq!(target.projects.list().await.unwrap().len(), 2);
    assert_eq!(target.briefings.list().await.unwrap().len(), 2);

    let _ = std::fs::remove_file(&source_file);
    let _ = std::fs::remove_file(&target_file);
}

#[tokio::test]
async fn test_per_record_failures_keep_partial_progress() {
    let (source_pool, source_file) = test_pool().await;
    let (target_pool, target_file) = test_pool().await;
    let source = sqlite_stores(&source_pool);
    let target = sqlite_stores(&target_pool);

    seed(&source).await;

    // An orphaned attendance (its briefing is gone) cannot be remapped and
    // must be tallied as failed without sinking the rest of the batch.
    sqlx::query(
        "INSERT INTO attendances (briefing_id, user_id, name, time_on, bac, created_at)
         VALUES (999, NULL, 'Ghost', '06:00', 0, '2025-06-02T06:00:00Z')",
    )
    .execute(&source_pool)
    .await
    .unwrap();

    let report = migrate_all(&source, &target).await.unwrap();

    assert_eq!(report.attendances.total, 3);
    assert_eq!(report.attendances.succeeded, 2);
    assert_eq!(report.attendances.failed, 1);
    assert_eq!(report.failed_total(), 1);

    // Partial progress is retained.
    assert_eq!(target.briefings.list().await.unwrap().len(), 1);
    assert_eq!(target.attendances.list().await.unwrap().len(), 2);

    let _ = std::fs::remove_file(&source_file);
    let _ = std::fs::remove_file(&target_file);
}

#[tokio::test]
async fn test_migration_endpoint_is_gated() {
    let app = TestApp::new().await;
    let (_, manager) = app.register("Hermmy", "manager@example.com", "secret", "project_manager").await;
    let (_, supervisor) = app.register("Andrew", "andrew@example.com", "secret", "site_supervisor").await;

    let res = app.request("GET", "/api/migration/status", Some(&supervisor), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["state"], "idle");

    let res = app.request("POST", "/api/migration/run", Some(&supervisor), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // No remote API configured in the test app.
    let res = app.request("POST", "/api/migration/run", Some(&manager), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "validation");

    // The failed precondition leaves the status untouched.
    let res = app.request("GET", "/api/migration/status", Some(&manager), None).await;
    let body = parse_body(res).await;
    assert_eq!(body["state"], "idle");
}
