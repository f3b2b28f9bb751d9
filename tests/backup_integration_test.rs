//! End-to-end backup scenarios through the public API

mod common;

use common::{row, rows, MemoryOrg, MemorySink};
use mockito::Matcher;
use serde_json::json;
use sfvault::adapters::salesforce::SalesforceClient;
use sfvault::config::{secret_string, SalesforceConfig};
use sfvault::core::backup::{run_backup, BackupOptions, BackupOrchestrator, BackupStatus};
use sfvault::core::update::bulk_update;
use sfvault::domain::ObjectType;
use std::sync::Arc;

fn objects(names: &[&str]) -> Vec<ObjectType> {
    names.iter().map(|n| ObjectType::new(*n).unwrap()).collect()
}

#[tokio::test]
async fn test_full_catalog_with_failing_object() {
    let org = Arc::new(
        MemoryOrg::new()
            .object("Account", &["Id", "Name"], rows("001", 3))
            .object("Contact", &["Id", "Name"], rows("003", 2))
            .broken("Contact"),
    );
    let sink = Arc::new(MemorySink::new());

    let report = run_backup(org, sink.clone(), "public", None, 10_000)
        .await
        .unwrap();

    let outcome: Vec<(&str, usize, BackupStatus)> = report
        .results
        .iter()
        .map(|r| (r.object.as_str(), r.record_count, r.status))
        .collect();
    assert_eq!(
        outcome,
        vec![
            ("Account", 3, BackupStatus::Success),
            ("Contact", 0, BackupStatus::Failed),
        ]
    );
    assert_eq!(report.total_records(), 3);
    assert_eq!(sink.table_names(), vec!["public.Account"]);
    assert_eq!(sink.schemas(), vec!["public"]);
}

#[tokio::test]
async fn test_exact_multiple_costs_one_extra_page() {
    let org = Arc::new(MemoryOrg::new().object("Lead", &["Id"], rows("00Q", 6)));
    let sink = Arc::new(MemorySink::new());

    let report = run_backup(org.clone(), sink.clone(), "crm", None, 3)
        .await
        .unwrap();

    assert!(report.is_successful());
    assert_eq!(org.pages("Lead"), 3);
    assert_eq!(sink.table("crm.Lead").unwrap().len(), 6);
}

#[tokio::test]
async fn test_digit_leading_object_gets_prefixed_table() {
    let org = Arc::new(MemoryOrg::new().object("7Eleven__c", &["Id"], rows("a07", 1)));
    let sink = Arc::new(MemorySink::new());

    let report = run_backup(org, sink.clone(), "public", None, 100)
        .await
        .unwrap();

    assert_eq!(report.results[0].table, "o_7Eleven__c");
    assert!(sink.table("public.o_7Eleven__c").is_some());
}

#[tokio::test]
async fn test_rerun_replaces_tables() {
    let sink = Arc::new(MemorySink::new());

    let first = Arc::new(MemoryOrg::new().object("Account", &["Id"], rows("001", 5)));
    run_backup(first, sink.clone(), "public", None, 100)
        .await
        .unwrap();

    let second = Arc::new(MemoryOrg::new().object("Account", &["Id"], rows("001", 2)));
    run_backup(second, sink.clone(), "public", None, 100)
        .await
        .unwrap();

    assert_eq!(sink.table("public.Account").unwrap().len(), 2);
}

#[tokio::test]
async fn test_compound_fields_stored_as_json_text() {
    let org = Arc::new(MemoryOrg::new().object(
        "Contact",
        &["Id", "MailingAddress"],
        vec![
            row(json!({"Id": "003A", "MailingAddress": {"city": "Lyon", "country": "FR"}})),
            row(json!({"Id": "003B"})),
        ],
    ));
    let sink = Arc::new(MemorySink::new());

    run_backup(org, sink.clone(), "public", None, 100)
        .await
        .unwrap();

    let table = sink.table("public.Contact").unwrap();
    for cell in table.column_values("MailingAddress") {
        let text = cell.as_str().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(text).is_ok());
    }
    assert_eq!(table.value(1, "MailingAddress"), &json!("{}"));
}

#[tokio::test]
async fn test_dry_run_with_exclusions() {
    let org = Arc::new(
        MemoryOrg::new()
            .object("Account", &["Id"], rows("001", 4))
            .object("Task", &["Id"], rows("00T", 9)),
    );
    let sink = Arc::new(MemorySink::new());
    let options = BackupOptions {
        dry_run: true,
        exclude: objects(&["Task"]),
        ..BackupOptions::default()
    };

    let report = BackupOrchestrator::new(org.clone(), sink.clone(), options)
        .run(None)
        .await
        .unwrap();

    assert_eq!(report.total_objects(), 1);
    assert_eq!(report.results[0].record_count, 4);
    assert_eq!(org.pages("Task"), 0);
    assert!(sink.table_names().is_empty());
    assert!(sink.schemas().is_empty());
}

#[tokio::test]
async fn test_bulk_update_through_public_api() {
    let org = MemoryOrg::new();
    let account = ObjectType::new("Account").unwrap();

    let results = bulk_update(&org, &account, &rows("001", 7), 3).await.unwrap();

    assert_eq!(results.len(), 7);
    assert!(results.iter().all(|r| r.success));
}

#[tokio::test]
async fn test_backup_against_rest_endpoints() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/services/data/v59.0/sobjects/Account/describe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "name": "Account",
                "fields": [{"name": "Id", "type": "id"}, {"name": "Name", "type": "string"}],
                "childRelationships": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let first_page = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "SELECT Id, Name FROM Account ORDER BY Id LIMIT 2".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "totalSize": 2,
                "done": true,
                "records": [
                    {"attributes": {"type": "Account"}, "Id": "001A", "Name": "Acme"},
                    {"attributes": {"type": "Account"}, "Id": "001B", "Name": "Globex"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let second_page = server
        .mock("GET", "/services/data/v59.0/query")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "SELECT Id, Name FROM Account WHERE Id > '001B' ORDER BY Id LIMIT 2".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"totalSize": 0, "done": true, "records": []}).to_string())
        .create_async()
        .await;

    let config = SalesforceConfig {
        instance_url: Some(server.url()),
        ..SalesforceConfig::default()
    };
    let client = SalesforceClient::with_access_token(
        &server.url(),
        secret_string("00Dtest!token".to_string()),
        &config,
    )
    .unwrap();
    let sink = Arc::new(MemorySink::new());

    let report = run_backup(
        Arc::new(client),
        sink.clone(),
        "public",
        Some(objects(&["Account"])),
        2,
    )
    .await
    .unwrap();

    first_page.assert_async().await;
    second_page.assert_async().await;
    assert!(report.is_successful());

    let table = sink.table("public.Account").unwrap();
    assert_eq!(table.columns(), &["Id", "Name"]);
    assert_eq!(table.value(1, "Name"), &json!("Globex"));
}
