use exercise_visibility::types::errors::*;

// === StoreError Tests ===

#[test]
fn store_error_display_variants() {
    assert_eq!(
        StoreError::Unavailable("disk full".to_string()).to_string(),
        "Storage unavailable: disk full"
    );
    assert_eq!(
        StoreError::SerializationError("bad json".to_string()).to_string(),
        "Storage serialization error: bad json"
    );
    assert_eq!(
        StoreError::TaskFailed("panicked".to_string()).to_string(),
        "Storage task failed: panicked"
    );
}

#[test]
fn store_error_from_rusqlite() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn store_error_from_serde_json() {
    let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
    let err: StoreError = parse.into();
    assert!(matches!(err, StoreError::SerializationError(_)));
}

#[test]
fn store_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(StoreError::Unavailable("x".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::InvalidKey("theme".to_string()).to_string(),
        "Invalid settings key: theme"
    );
    assert_eq!(
        SettingsError::InvalidValue("negative".to_string()).to_string(),
        "Invalid settings value: negative"
    );
    assert_eq!(
        SettingsError::StoreError("locked".to_string()).to_string(),
        "Settings store error: locked"
    );
}

#[test]
fn settings_error_wraps_store_error() {
    let err: SettingsError = StoreError::Unavailable("gone".to_string()).into();
    assert_eq!(err.to_string(), "Settings store error: Storage unavailable: gone");
}

// === AppError Tests ===

#[test]
fn app_error_display_variants() {
    assert_eq!(
        AppError::DatabaseError("cannot open".to_string()).to_string(),
        "Database error: cannot open"
    );
    assert_eq!(
        AppError::StateWriterTaken.to_string(),
        "Visibility state writer already claimed"
    );
}
