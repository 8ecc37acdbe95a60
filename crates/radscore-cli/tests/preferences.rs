use radscore_cli::preferences::{load_from, save_to, Preferences, MAX_RECENTS};
use radscore_core::normalize::NumberLocale;

fn at(seconds: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(seconds).unwrap()
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = load_from(&dir.path().join("preferences.json")).unwrap();
    assert_eq!(prefs, Preferences::default());
    assert_eq!(prefs.number_locale, NumberLocale::Auto);
}

#[test]
fn save_then_load_keeps_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut prefs = Preferences::default();
    prefs.add_favorite("tirads");
    prefs.record_recent("mehran", at(1_700_000_000));
    prefs.number_locale = NumberLocale::Comma;
    save_to(&path, &prefs).unwrap();

    let loaded = load_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.favorites, vec!["tirads"]);
    assert_eq!(loaded.recents[0].calculator_id, "mehran");
    assert_eq!(loaded.recents[0].used_at, at(1_700_000_000));
    assert_eq!(loaded.number_locale, NumberLocale::Comma);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn unversioned_file_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{"favorites": ["aast"], "recents": ["pirads", "renal"]}"#).unwrap();

    let prefs = load_from(&path).unwrap();
    assert_eq!(prefs.config_version, 1);
    assert_eq!(prefs.favorites, vec!["aast"]);
    let ids: Vec<&str> = prefs.recents.iter().map(|r| r.calculator_id.as_str()).collect();
    assert_eq!(ids, vec!["pirads", "renal"]);
    assert_eq!(prefs.recents[0].used_at, jiff::Timestamp::UNIX_EPOCH);
}

#[test]
fn newer_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{"config_version": 99}"#).unwrap();

    let err = load_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn favorites_do_not_duplicate() {
    let mut prefs = Preferences::default();
    assert!(prefs.add_favorite("avs"));
    assert!(!prefs.add_favorite("avs"));
    assert_eq!(prefs.favorites.len(), 1);
    assert!(prefs.remove_favorite("avs"));
    assert!(!prefs.remove_favorite("avs"));
}

#[test]
fn recents_are_most_recent_first_and_capped() {
    let mut prefs = Preferences::default();
    for i in 0..12 {
        prefs.record_recent(&format!("calc{i}"), at(i));
    }
    assert_eq!(prefs.recents.len(), MAX_RECENTS);
    assert_eq!(prefs.recents[0].calculator_id, "calc11");

    prefs.record_recent("calc5", at(100));
    assert_eq!(prefs.recents.len(), MAX_RECENTS);
    assert_eq!(prefs.recents[0].calculator_id, "calc5");
    assert_eq!(prefs.recents.iter().filter(|r| r.calculator_id == "calc5").count(), 1);
}
