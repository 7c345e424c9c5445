use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

fn temp_db(tag: &str) -> (PathBuf, String) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "onair-{tag}-{}-{nanos}.sqlite",
        std::process::id()
    ));
    let url = format!("sqlite:{}", path.display());
    (path, url)
}

async fn cleanup(path: PathBuf) {
    let wal_path = PathBuf::from(format!("{}-wal", path.to_string_lossy()));
    let shm_path = PathBuf::from(format!("{}-shm", path.to_string_lossy()));
    let _ = fs::remove_file(&wal_path).await;
    let _ = fs::remove_file(&shm_path).await;
    let _ = fs::remove_file(&path).await;
}

#[tokio::test]
async fn stream_status_only_records_changes() {
    let (path, url) = temp_db("stream-status");
    let db = onair::db::spawn(&url).await;

    // 1. Nothing recorded yet: offline with no id
    let initial = db.current_status().await.unwrap();
    assert!(!initial.is_live);
    assert!(initial.id.is_none());
    assert!(initial.started_at.is_none());
    assert!(db.status_history(10).await.unwrap().is_empty());

    // 2. Going live records a row with started_at == timestamp
    let live = db.update_status(true).await.unwrap();
    assert!(live.is_live);
    assert_eq!(live.started_at, Some(live.timestamp));
    let live_id = live.id.expect("live row has an id");

    // 3. Repeating the same status records nothing
    let again = db.update_status(true).await.unwrap();
    assert_eq!(again.id, Some(live_id));
    assert_eq!(db.status_history(10).await.unwrap().len(), 1);

    // 4. Going offline clears started_at
    let offline = db.update_status(false).await.unwrap();
    assert!(!offline.is_live);
    assert!(offline.started_at.is_none());
    assert_ne!(offline.id, Some(live_id));

    let history = db.status_history(10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(!history[0].is_live, "history is newest first");
    assert!(history[1].is_live);

    let current = db.current_status().await.unwrap();
    assert_eq!(current.id, offline.id);

    assert_eq!(db.status_history(1).await.unwrap().len(), 1);

    cleanup(path).await;
}

#[tokio::test]
async fn stream_info_normalizes_blanks_and_clears() {
    let (path, url) = temp_db("stream-info");
    let db = onair::db::spawn(&url).await;

    let empty = db.current_info().await.unwrap();
    assert!(empty.id.is_none());
    assert!(empty.title.is_none());

    let info = db
        .update_info(Some("Building a compiler".to_string()), Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(info.title.as_deref(), Some("Building a compiler"));
    assert!(info.description.is_none(), "blank description becomes none");

    let current = db.current_info().await.unwrap();
    assert_eq!(current.id, info.id);
    assert_eq!(current.title.as_deref(), Some("Building a compiler"));

    let cleared = db.clear_info().await.unwrap();
    assert!(cleared.title.is_none());
    assert!(cleared.description.is_none());
    assert!(cleared.id > info.id, "clearing appends a new row");

    let current = db.current_info().await.unwrap();
    assert_eq!(current.id, cleared.id);
    assert!(current.title.is_none());

    cleanup(path).await;
}
