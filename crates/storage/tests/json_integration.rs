use std::fs;

use trainer_core::model::{Drill, DrillId, Progress, Settings};
use trainer_core::time::fixed_now;

use storage::json::JsonStorage;
use storage::repository::{
    CatalogSource, ProgressRepository, SettingsRepository, Storage, StorageError,
};

fn build_drill(name: &str) -> Drill {
    Drill {
        name: DrillId::new(name),
        description: format!("practice {name}"),
        example: format!("{name} --help"),
        category: "files".into(),
        difficulty: "easy".into(),
        flags: "-h".into(),
        output_example: "usage".into(),
        analysis: "read the flags".into(),
    }
}

#[tokio::test]
async fn settings_round_trip_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::json_dir(dir.path()).expect("open");

    assert!(storage.settings.load().await.unwrap().is_none());

    let settings = Settings {
        reminder_interval: 120,
        sound_enabled: false,
        auto_advance: true,
    };
    storage.settings.save(&settings).await.unwrap();

    let patch = storage.settings.load().await.unwrap().expect("override");
    assert_eq!(patch.reminder_interval, Some(120));
    assert_eq!(patch.sound_enabled, Some(false));
    assert_eq!(patch.auto_advance, Some(true));
}

#[tokio::test]
async fn settings_partial_override_loads_as_subset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStorage::open(dir.path()).expect("open");
    fs::write(
        dir.path().join("trainer_settings.json"),
        r#"{"sound_enabled": false}"#,
    )
    .unwrap();

    let patch = SettingsRepository::load(&store).await.unwrap().expect("override");
    assert_eq!(patch.sound_enabled, Some(false));
    assert!(patch.reminder_interval.is_none());
    assert!(patch.auto_advance.is_none());
}

#[tokio::test]
async fn wrong_typed_settings_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStorage::open(dir.path()).expect("open");
    fs::write(
        dir.path().join("trainer_settings.json"),
        r#"{"sound_enabled": "yes"}"#,
    )
    .unwrap();

    let err = SettingsRepository::load(&store).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn progress_save_is_a_full_snapshot_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::json_dir(dir.path()).expect("open");

    let mut progress = Progress::new();
    progress.record_completion(DrillId::new("ls"), fixed_now());
    progress.record_completion(DrillId::new("grep"), fixed_now());
    storage.progress.save(&progress).await.unwrap();

    progress.clear();
    progress.record_completion(DrillId::new("awk"), fixed_now());
    storage.progress.save(&progress).await.unwrap();

    let loaded = storage.progress.load().await.unwrap().expect("progress");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.completed_count(), 1);
    assert!(!loaded.is_completed(&DrillId::new("ls")));

    // no stray temp file left behind by the atomic write
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn corrupt_progress_file_reports_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStorage::open(dir.path()).expect("open");
    fs::write(dir.path().join("trainer_data.json"), "{not json").unwrap();

    let err = ProgressRepository::load(&store).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn missing_catalog_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStorage::open(dir.path()).expect("open");

    let err = CatalogSource::load(&store).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn catalog_document_loads_drills_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonStorage::open(dir.path()).expect("open");

    let doc = serde_json::json!({
        "commands": [
            serde_json::to_value(build_drill("ls")).unwrap(),
            serde_json::to_value(build_drill("grep")).unwrap(),
        ]
    });
    fs::write(
        dir.path().join("commands.json"),
        serde_json::to_string_pretty(&doc).unwrap(),
    )
    .unwrap();

    let drills = CatalogSource::load(&store).await.unwrap();
    assert_eq!(drills.len(), 2);
    assert_eq!(drills[0].id().as_str(), "ls");
    assert_eq!(drills[1].id().as_str(), "grep");
}
