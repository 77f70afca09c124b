mod common;

use common::{create_archive, dir_url, explode, file_url};
use nestjar_core::{Layout, LauncherConfig, launcher_for_path};
use tempfile::tempdir;

#[test]
fn test_archived_jar_uses_boot_inf_layout() {
    let dir = tempdir().unwrap();
    let jar = create_archive(dir.path(), "app.jar", "BOOT-INF", true, &[]);

    let launcher = launcher_for_path(&jar, None, LauncherConfig::default()).unwrap();
    assert_eq!(launcher.layout(), Layout::Jar);
    assert_eq!(launcher.main_class().unwrap(), "com.example.Application");

    let archives = launcher.resolve_classpath().unwrap();
    let jar_url = file_url(&jar);
    let actual: Vec<String> = archives.iter().map(|a| a.url().to_string()).collect();
    assert_eq!(
        actual,
        vec![
            format!("jar:{}!/BOOT-INF/classes!/", jar_url),
            format!("jar:{}!/BOOT-INF/lib/foo.jar!/", jar_url),
            format!("jar:{}!/BOOT-INF/lib/bar.jar!/", jar_url),
            format!("jar:{}!/BOOT-INF/lib/baz.jar!/", jar_url),
        ]
    );
}

#[test]
fn test_exploded_jar_detected_from_directory() {
    let dir = tempdir().unwrap();
    let root = explode(&create_archive(dir.path(), "app.jar", "BOOT-INF", false, &[]));

    let launcher = launcher_for_path(&root, None, LauncherConfig::default()).unwrap();
    assert_eq!(launcher.layout(), Layout::Jar);
    assert!(launcher.archive().is_exploded());

    let entries: Vec<String> = launcher
        .classpath_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(
        entries,
        vec![
            "BOOT-INF/classes/",
            "BOOT-INF/lib/bar.jar",
            "BOOT-INF/lib/baz.jar",
            "BOOT-INF/lib/foo.jar",
        ]
    );

    let archives = launcher.resolve_classpath().unwrap();
    assert_eq!(
        archives[0].url().to_string(),
        dir_url(&root.join("BOOT-INF/classes"))
    );
}

#[test]
fn test_explicit_layout_on_wrong_archive_reports_missing_classes() {
    let dir = tempdir().unwrap();
    let jar = create_archive(dir.path(), "app.jar", "BOOT-INF", false, &[]);

    let launcher = launcher_for_path(&jar, Some(Layout::War), LauncherConfig::default()).unwrap();
    let err = launcher.classpath_entries().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_configured_index_location_overrides_default() {
    let dir = tempdir().unwrap();
    let root = explode(&create_archive(
        dir.path(),
        "app.jar",
        "BOOT-INF",
        false,
        &["extra-1.jar"],
    ));
    std::fs::write(
        root.join("order.idx"),
        "BOOT-INF/lib/foo.jar\nBOOT-INF/lib/extra-1.jar\nBOOT-INF/lib/missing.jar\n",
    )
    .unwrap();

    let config = LauncherConfig {
        classpath_index: Some("order.idx".to_string()),
        warn_on_stale_index: true,
        ..LauncherConfig::default()
    };
    let launcher = launcher_for_path(&root, Some(Layout::Jar), config).unwrap();

    let entries: Vec<String> = launcher
        .classpath_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(
        entries,
        vec![
            "BOOT-INF/classes/",
            "BOOT-INF/lib/bar.jar",
            "BOOT-INF/lib/baz.jar",
            "BOOT-INF/lib/foo.jar",
            "BOOT-INF/lib/extra-1.jar",
        ]
    );
}
