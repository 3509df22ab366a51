//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    let version = qrmenu_db::run_migrations(&db).await.unwrap();
    assert_eq!(version, 1);

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(
        info_str.contains("establishments"),
        "missing establishments table"
    );
    assert!(info_str.contains("menus"), "missing menus table");
    assert!(
        info_str.contains("_schema_version"),
        "missing _schema_version table"
    );
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    let first = qrmenu_db::run_migrations(&db).await.unwrap();
    let second = qrmenu_db::run_migrations(&db).await.unwrap();
    assert_eq!(first, second);

    let mut result = db.query("SELECT * FROM _schema_version").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one version record");
}

#[tokio::test]
async fn version_record_lists_its_collections() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    qrmenu_db::run_migrations(&db).await.unwrap();

    let mut result = db
        .query("SELECT VALUE collections FROM _schema_version:1")
        .await
        .unwrap();
    let collections: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(collections.len(), 1);
    let listed = format!("{:?}", collections[0]);
    assert!(listed.contains("establishments"));
    assert!(listed.contains("menus"));
}

#[tokio::test]
async fn collections_accept_arbitrary_documents() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    qrmenu_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE establishments SET \
         name = 'Blue Door', \
         isActive = true, \
         owner = { name: 'Aoife Byrne', mobile: '+353875550199' }",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let mut result = db
        .query("SELECT * FROM establishments WHERE isActive = true")
        .await
        .unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1);
}
