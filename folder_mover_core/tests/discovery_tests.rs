//! Discovery pipeline tests against a recording service

use folder_mover_core::error::{Error, ServiceError, ValidationError};
use folder_mover_core::{
    ContentKind, ContentRef, Discovery, FolderCatalog, ProgressUpdate, RecordingProvider,
    TreeBuilder, document,
};
use folder_mover_test_utils::{AccountBuilder, MockFolderService, ServiceCall, test_account};
use std::collections::HashSet;

fn sales_account() -> MockFolderService {
    MockFolderService::new(
        AccountBuilder::new()
            .folder("F1", "Sales")
            .subfolder("F1", "F2", "Sales/EU")
            .member("F1", ContentKind::Dashboard, "revenue")
            .member("F2", ContentKind::Analysis, "eu-churn")
            .member("F2", ContentKind::Dataset, "eu-orders")
            .build(),
    )
}

#[tokio::test]
async fn test_single_root_with_child_normalizes_to_one_tree() {
    let service = sales_account();
    let account = test_account();

    let roots = Discovery::new(&service, &account).run().await.unwrap();

    assert_eq!(roots.len(), 1);
    let root = &roots[0];
    assert_eq!(root.folder_id, "F1");
    assert_eq!(root.name, "Sales");
    assert_eq!(root.dashboards, vec![ContentRef::new("revenue")]);
    assert_eq!(root.subfolders.len(), 1);

    let child = &root.subfolders[0];
    assert_eq!(child.folder_id, "F2");
    assert_eq!(child.analyses, vec![ContentRef::new("eu-churn")]);
    assert_eq!(child.datasets, vec![ContentRef::new("eu-orders")]);
    assert!(child.subfolders.is_empty());
}

#[tokio::test]
async fn test_calls_follow_depth_first_order() {
    let service = sales_account();
    let account = test_account();
    let root_arn = "arn:aws:quicksight:us-east-1:111122223333:folder/F1";
    let child_arn = "arn:aws:quicksight:us-east-1:111122223333:folder/F2";

    Discovery::new(&service, &account).run().await.unwrap();

    let expected = vec![
        ServiceCall::ListFolders,
        // F1 expanded as a listed folder
        ServiceCall::SearchChildFolders { parent_arn: root_arn.to_string() },
        ServiceCall::ListFolderMembers { folder_id: "F1".to_string() },
        ServiceCall::SearchChildFolders { parent_arn: child_arn.to_string() },
        ServiceCall::ListFolderMembers { folder_id: "F2".to_string() },
        // F2 expanded again as a listed folder, then dropped by normalization
        ServiceCall::SearchChildFolders { parent_arn: child_arn.to_string() },
        ServiceCall::ListFolderMembers { folder_id: "F2".to_string() },
    ];
    assert_eq!(service.calls(), expected);
}

#[tokio::test]
async fn test_empty_account_yields_empty_document() {
    let service = MockFolderService::new(AccountBuilder::new().build());
    let roots = Discovery::new(&service, &test_account()).run().await.unwrap();
    assert!(roots.is_empty());
}

#[tokio::test]
async fn test_content_is_partitioned_exclusively() {
    let service = MockFolderService::new(
        AccountBuilder::new()
            .folder("R", "Reports")
            .member("R", ContentKind::Analysis, "dataset-review")
            .member("R", ContentKind::Dataset, "analysis-input")
            .member("R", ContentKind::Dashboard, "ops")
            .foreign_member("R", "theme", "dark")
            .build(),
    );

    let roots = Discovery::new(&service, &test_account()).run().await.unwrap();

    for (_, node) in roots.iter().flat_map(|root| root.iter()) {
        let mut seen = HashSet::new();
        for kind in ContentKind::ALL {
            for content in node.contents(kind) {
                assert!(seen.insert(&content.member_id), "{} in two categories", content.member_id);
            }
        }
    }
    let root = &roots[0];
    assert_eq!(root.analyses, vec![ContentRef::new("dataset-review")]);
    assert_eq!(root.datasets, vec![ContentRef::new("analysis-input")]);
    assert_eq!(root.member_count(), 3);
}

#[tokio::test]
async fn test_listing_failure_propagates_unmodified() {
    let service = sales_account();
    service.fail_list_members("F2", ServiceError::Throttled);

    let result = Discovery::new(&service, &test_account()).run().await;

    assert!(matches!(result, Err(Error::Service(ServiceError::Throttled))));
    assert_eq!(
        service.calls().last(),
        Some(&ServiceCall::ListFolderMembers { folder_id: "F2".to_string() })
    );
}

#[tokio::test]
async fn test_offline_service_fails_first_call() {
    let service = sales_account();
    service.go_offline();

    let result = Discovery::new(&service, &test_account()).run().await;

    assert!(matches!(result, Err(Error::Service(ServiceError::NetworkOffline))));
    assert_eq!(service.calls(), vec![ServiceCall::ListFolders]);
}

#[tokio::test]
async fn test_cycle_in_parent_links_is_reported() {
    let mut snapshot = AccountBuilder::new().folder("A", "A").build();
    let arn_a = snapshot.folder_arn("A");
    let arn_b = snapshot.add_folder("B", "B", Some(&arn_a));
    snapshot.folders[0].parent_folder_arn = Some(arn_b);
    let service = MockFolderService::new(snapshot);
    let account = test_account();
    let catalog = FolderCatalog::new(&service, &account);

    let summary = service.inner().summary_of("A").await.unwrap();
    let result = TreeBuilder::new(&catalog).build(summary).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::CycleDetected { .. }))
    ));
}

#[tokio::test]
async fn test_reports_each_discovered_folder() {
    let service = sales_account();
    let recorder = RecordingProvider::new();

    Discovery::new(&service, &test_account())
        .with_progress(&recorder)
        .run()
        .await
        .unwrap();

    let discovered: Vec<_> = recorder
        .updates()
        .into_iter()
        .filter_map(|update| match update {
            ProgressUpdate::FolderDiscovered { folder_id, depth, .. } => Some((folder_id, depth)),
            _ => None,
        })
        .collect();
    assert_eq!(
        discovered,
        vec![
            ("F1".to_string(), 0),
            ("F2".to_string(), 1),
            ("F2".to_string(), 0)
        ]
    );
    assert!(recorder.is_completed());
}

#[tokio::test]
async fn test_list_content_by_kind() {
    let service = sales_account();
    let account = test_account();
    let catalog = FolderCatalog::new(&service, &account);

    let analyses = catalog.list_content("F2", ContentKind::Analysis).await.unwrap();
    let dashboards = catalog.list_content("F2", ContentKind::Dashboard).await.unwrap();

    assert_eq!(analyses, vec![ContentRef::new("eu-churn")]);
    assert!(dashboards.is_empty());
}

#[tokio::test]
async fn test_deep_discovery_document_reads_back() {
    let depth = 80;
    let mut builder = AccountBuilder::new().folder("L0", "Level 0");
    for level in 1..depth {
        builder = builder.subfolder(
            &format!("L{}", level - 1),
            &format!("L{level}"),
            &format!("Level {level}"),
        );
    }
    let service = MockFolderService::new(builder.build());
    let account = test_account();

    let roots = Discovery::new(&service, &account).run().await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].folder_count(), depth);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folders.json");
    document::write_document(&path, &roots).await.unwrap();
    let loaded = document::read_document(&path).await.unwrap();

    assert_eq!(loaded, roots);
    let (deepest, leaf) = loaded[0].iter().last().unwrap();
    assert_eq!(deepest, depth - 1);
    assert_eq!(leaf.folder_id, format!("L{}", depth - 1));
}
