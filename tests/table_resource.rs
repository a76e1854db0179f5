use std::sync::Arc;

use whtable::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
use whtable::error::WhTableError;
use whtable::traits::DatabaseDriver;
use whtable::types::RawQueryResult;
use whtable::{TableChange, TableConfig, TableId, TableResource, TableState, WhTableClient};

const SHOW_COLUMNS: [&str; 5] = [
    "created_on",
    "name",
    "database_name",
    "schema_name",
    "comment",
];

fn show_row(name: &str, database: &str, schema: &str, comment: &str) -> RawQueryResult {
    InMemoryTestResponseBuilder::new()
        .columns(&SHOW_COLUMNS)
        .row(&["2020-01-01 00:00:00", name, database, schema, comment])
        .build()
}

fn setup(driver: InMemoryTestDriver) -> (Arc<InMemoryTestDriver>, TableResource) {
    let in_memory_test_driver = Arc::new(driver);
    let driver: Arc<dyn DatabaseDriver> =
        Arc::clone(&in_memory_test_driver) as Arc<dyn DatabaseDriver>;
    let client = WhTableClient::with_driver(driver);
    (in_memory_test_driver, client.tables())
}

fn existing(comment: Option<&str>) -> TableState {
    TableState {
        comment: comment.map(str::to_string),
        ..TableState::from_id(TableId::new("D", "PUBLIC", "T"))
    }
}

#[tokio::test]
async fn test_create_table() {
    let (driver, tables) = setup(
        InMemoryTestDriver::new()
            .with_response(RawQueryResult::empty())
            .with_response(show_row("T", "D", "PUBLIC", "hi")),
    );

    let mut state = TableState::default();
    let config = TableConfig::new("T", "D").with_comment("hi");
    let record = tables.create(&mut state, &config).await.unwrap();

    assert_eq!(
        driver.executed_sql(),
        vec![
            r#"CREATE OR REPLACE TABLE "D"."PUBLIC"."T"(placeholder varchar(100)) COMMENT = 'hi'"#,
            r#"SHOW TABLES LIKE 'T' IN DATABASE "D""#,
        ]
    );
    assert_eq!(state.id.as_ref().unwrap().to_string(), "D|PUBLIC|T");
    assert_eq!(state.schema, "PUBLIC");
    assert_eq!(state.comment.as_deref(), Some("hi"));
    assert_eq!(record.comment.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_create_without_comment() {
    let (driver, tables) = setup(
        InMemoryTestDriver::new()
            .with_response(RawQueryResult::empty())
            .with_response(show_row("T", "D", "RAW", "")),
    );

    let mut state = TableState::default();
    let config = TableConfig::new("T", "D").with_schema("RAW");
    tables.create(&mut state, &config).await.unwrap();

    assert_eq!(
        driver.recorded_queries()[0].sql,
        r#"CREATE OR REPLACE TABLE "D"."RAW"."T"(placeholder varchar(100))"#
    );
    assert_eq!(state.id.unwrap().to_string(), "D|RAW|T");
}

#[tokio::test]
async fn test_create_failure_leaves_state_absent() {
    let (driver, tables) = setup(InMemoryTestDriver::new().with_failure("insufficient privileges"));

    let mut state = TableState::default();
    let err = tables
        .create(&mut state, &TableConfig::new("T", "D"))
        .await
        .unwrap_err();

    assert!(state.is_absent());
    assert_eq!(
        err.to_string(),
        "error creating table T: Query failed: insufficient privileges"
    );
    driver.assert_query_count(1);
}

#[tokio::test]
async fn test_create_rejects_unsafe_identifier() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    let mut state = TableState::default();
    let config = TableConfig::new(r#"T" CASCADE; --"#, "D");
    let err = tables.create(&mut state, &config).await.unwrap_err();

    assert!(matches!(
        err,
        WhTableError::InvalidIdentifier { field: "name", .. }
    ));
    driver.assert_query_count(0);
}

#[tokio::test]
async fn test_read_copies_identity_fields() {
    let (driver, tables) = setup(
        InMemoryTestDriver::new().with_response(show_row("T", "D", "PUBLIC", "remote comment")),
    );

    let mut state = existing(Some("local comment"));
    state.name = String::new();
    let record = tables.read(&mut state).await.unwrap();

    driver.assert_last_query(r#"SHOW TABLES LIKE 'T' IN DATABASE "D""#);
    assert_eq!(state.name, "T");
    assert_eq!(state.database, "D");
    assert_eq!(state.schema, "PUBLIC");
    // the comment is reported but not written back
    assert_eq!(state.comment.as_deref(), Some("local comment"));
    assert_eq!(record.comment.as_deref(), Some("remote comment"));
}

#[tokio::test]
async fn test_read_null_columns_become_empty() {
    let (_driver, tables) = setup(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["name", "database_name", "schema_name", "comment"])
                .row_opt(&[Some("T"), Some("D"), None, None])
                .build(),
        ),
    );

    let mut state = existing(None);
    let record = tables.read(&mut state).await.unwrap();

    assert_eq!(state.schema, "");
    assert_eq!(record.schema_name, None);
    assert_eq!(record.comment, None);
}

#[tokio::test]
async fn test_read_missing_table() {
    let (_driver, tables) = setup(InMemoryTestDriver::new());

    let mut state = existing(None);
    match tables.read(&mut state).await.unwrap_err() {
        WhTableError::NotFound { id } => assert_eq!(id, "D|PUBLIC|T"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_read_without_id() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    let mut state = existing(None);
    state.id = None;
    assert!(matches!(
        tables.read(&mut state).await,
        Err(WhTableError::MissingId)
    ));
    driver.assert_query_count(0);
}

#[tokio::test]
async fn test_read_failure_names_table() {
    let (_driver, tables) = setup(InMemoryTestDriver::new().with_failure("warehouse unavailable"));

    let mut state = existing(Some("hi"));
    let before = state.clone();
    let err = tables.read(&mut state).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "error reading table D|PUBLIC|T: Query failed: warehouse unavailable"
    );
    assert_eq!(state, before);
}

#[tokio::test]
async fn test_update_unset_comment_only() {
    let (driver, tables) =
        setup(InMemoryTestDriver::new().with_default_response(show_row("T", "D", "PUBLIC", "")));

    let mut state = existing(Some("hi"));
    let config = TableConfig::new("T", "D").with_comment("");
    tables.update(&mut state, &config).await.unwrap();

    let executed = driver.executed_sql();
    let alters: Vec<&String> = executed
        .iter()
        .filter(|sql| sql.starts_with("ALTER"))
        .collect();
    assert_eq!(alters, [r#"ALTER TABLE "D"."PUBLIC"."T" UNSET COMMENT"#]);
    assert!(!executed.iter().any(|sql| sql.contains("RENAME")));
    assert_eq!(state.comment, None);
}

#[tokio::test]
async fn test_update_rename_and_comment() {
    let (driver, tables) = setup(
        InMemoryTestDriver::new()
            .with_responses([RawQueryResult::empty(), RawQueryResult::empty()])
            .with_response(show_row("T2", "D", "PUBLIC", "new")),
    );

    let mut state = existing(Some("hi"));
    let config = TableConfig::new("T2", "D").with_comment("new");
    tables.update(&mut state, &config).await.unwrap();

    assert_eq!(
        driver.executed_sql(),
        vec![
            r#"ALTER TABLE "D"."PUBLIC"."T" RENAME TO "D"."PUBLIC"."T2""#,
            r#"ALTER TABLE "D"."PUBLIC"."T2" SET COMMENT = 'new'"#,
            r#"SHOW TABLES LIKE 'T2' IN DATABASE "D""#,
        ]
    );
    assert_eq!(state.id.unwrap().to_string(), "D|PUBLIC|T2");
    assert_eq!(state.name, "T2");
    assert_eq!(state.comment.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_update_keeps_rename_when_comment_fails() {
    let (driver, tables) = setup(
        InMemoryTestDriver::new()
            .with_response(RawQueryResult::empty())
            .with_failure("comment too long"),
    );

    let mut state = existing(Some("hi"));
    let config = TableConfig::new("T2", "D").with_comment("new");
    let err = tables.update(&mut state, &config).await.unwrap_err();

    match err {
        WhTableError::PartialUpdate {
            id,
            applied,
            failed,
            source,
        } => {
            assert_eq!(id, "D|PUBLIC|T2");
            assert_eq!(
                applied,
                vec![TableChange::Rename {
                    from: "T".to_string(),
                    to: "T2".to_string()
                }]
            );
            assert_eq!(failed, TableChange::SetComment("new".to_string()));
            assert!(matches!(*source, WhTableError::QueryFailed(_)));
        }
        other => panic!("Expected PartialUpdate, got {other:?}"),
    }

    // the rename stays committed, the comment does not
    assert_eq!(state.id.as_ref().unwrap().to_string(), "D|PUBLIC|T2");
    assert_eq!(state.name, "T2");
    assert_eq!(state.comment.as_deref(), Some("hi"));
    driver.assert_query_count(2);
}

#[tokio::test]
async fn test_update_first_step_failure_applies_nothing() {
    let (driver, tables) = setup(InMemoryTestDriver::new().with_failure("name already taken"));

    let mut state = existing(Some("hi"));
    let config = TableConfig::new("T2", "D").with_comment("new");
    let err = tables.update(&mut state, &config).await.unwrap_err();

    match err {
        WhTableError::PartialUpdate {
            id,
            applied,
            failed,
            ..
        } => {
            assert_eq!(id, "D|PUBLIC|T");
            assert!(applied.is_empty());
            assert_eq!(
                failed,
                TableChange::Rename {
                    from: "T".to_string(),
                    to: "T2".to_string()
                }
            );
        }
        other => panic!("Expected PartialUpdate, got {other:?}"),
    }

    assert_eq!(state.id.as_ref().unwrap().to_string(), "D|PUBLIC|T");
    assert_eq!(state.name, "T");
    assert_eq!(state.comment.as_deref(), Some("hi"));
    driver.assert_query_count(1);
}

#[tokio::test]
async fn test_update_rejects_invalid_rename_target() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    for name in ["X|Y", "X\"Y"] {
        let mut state = existing(Some("hi"));
        let before = state.clone();
        let config = TableConfig::new(name, "D").with_comment("hi");

        assert!(matches!(
            tables.update(&mut state, &config).await,
            Err(WhTableError::InvalidIdentifier { field: "name", .. })
        ));
        assert_eq!(state, before);
    }
    driver.assert_query_count(0);
}

#[tokio::test]
async fn test_update_schema_change_requires_replacement() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    let mut state = existing(None);
    let config = TableConfig::new("T", "D").with_schema("OTHER");
    match tables.update(&mut state, &config).await.unwrap_err() {
        WhTableError::RequiresReplacement { field } => assert_eq!(field, "schema"),
        other => panic!("Expected RequiresReplacement, got {other:?}"),
    }
    driver.assert_query_count(0);
}

#[tokio::test]
async fn test_update_without_changes_only_reads() {
    let (driver, tables) =
        setup(InMemoryTestDriver::new().with_response(show_row("T", "D", "PUBLIC", "hi")));

    let mut state = existing(Some("hi"));
    let config = TableConfig::new("T", "D").with_comment("hi");
    tables.update(&mut state, &config).await.unwrap();

    driver.assert_query_count(1);
    driver.assert_last_query(r#"SHOW TABLES LIKE 'T' IN DATABASE "D""#);
}

#[tokio::test]
async fn test_delete_clears_id() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    let mut state = existing(None);
    tables.delete(&mut state).await.unwrap();

    driver.assert_last_query(r#"DROP TABLE "D"."PUBLIC"."T""#);
    assert!(state.is_absent());
}

#[tokio::test]
async fn test_delete_failure_keeps_id() {
    let (_driver, tables) = setup(InMemoryTestDriver::new().with_failure("table is locked"));

    let mut state = existing(None);
    let err = tables.delete(&mut state).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "error deleting table D|PUBLIC|T: Query failed: table is locked"
    );
    assert!(!state.is_absent());
}

#[tokio::test]
async fn test_exists() {
    let (driver, tables) =
        setup(InMemoryTestDriver::new().with_response(show_row("T", "D", "PUBLIC", "")));

    assert!(tables.exists(&existing(None)).await.unwrap());
    driver.assert_last_query(r#"SHOW TABLES LIKE 'T' IN DATABASE "D""#);
}

#[tokio::test]
async fn test_exists_without_rows_is_false() {
    let (_driver, tables) = setup(InMemoryTestDriver::new());

    assert!(!tables.exists(&existing(None)).await.unwrap());
}

#[tokio::test]
async fn test_exists_failure_names_table() {
    let (_driver, tables) = setup(InMemoryTestDriver::new().with_failure("warehouse unavailable"));

    let err = tables.exists(&existing(None)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "error checking table D|PUBLIC|T: Query failed: warehouse unavailable"
    );
}

#[tokio::test]
async fn test_import() {
    let (driver, tables) =
        setup(InMemoryTestDriver::new().with_response(show_row("T", "D", "S", "imported")));

    let state = tables.import("D|S|T").await.unwrap();

    driver.assert_last_query(r#"SHOW TABLES LIKE 'T' IN DATABASE "D""#);
    assert_eq!(state.id.as_ref().unwrap().to_string(), "D|S|T");
    assert_eq!(state.name, "T");
    assert_eq!(state.schema, "S");
    assert_eq!(state.database, "D");
}

#[tokio::test]
async fn test_import_malformed_id() {
    let (driver, tables) = setup(InMemoryTestDriver::new());

    match tables.import("D|T").await.unwrap_err() {
        WhTableError::InvalidId(id) => assert_eq!(id, "D|T"),
        other => panic!("Expected InvalidId, got {other:?}"),
    }
    driver.assert_query_count(0);
}
