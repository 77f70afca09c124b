mod common;

use common::{create_archive, explode, file_url};
use nestjar_core::{ExplodedArchive, JarArchive, Launcher};
use tempfile::tempdir;

#[test]
fn test_first_archive_in_order_shadows_later_ones() {
    let dir = tempdir().unwrap();
    let war = create_archive(dir.path(), "archive.war", "WEB-INF", true, &["extra-1.jar"]);
    let launcher = Launcher::war(Box::new(JarArchive::open(&war).unwrap())).unwrap();

    let class_path = launcher
        .create_class_loader(launcher.classpath_archives().unwrap())
        .unwrap();
    assert_eq!(class_path.len(), 5);

    let war_url = file_url(&war);
    assert_eq!(
        class_path
            .find_resource("shared.properties")
            .unwrap()
            .unwrap()
            .as_str(),
        format!("jar:{}!/WEB-INF/lib/extra-1.jar!/shared.properties", war_url)
    );

    let all: Vec<String> = class_path
        .resources("shared.properties")
        .unwrap()
        .iter()
        .map(|u| u.to_string())
        .collect();
    assert_eq!(
        all,
        ["extra-1", "foo", "bar", "baz"]
            .iter()
            .map(|lib| format!("jar:{}!/WEB-INF/lib/{}.jar!/shared.properties", war_url, lib))
            .collect::<Vec<_>>()
    );

    assert_eq!(
        class_path
            .find_resource("com/example/Application.class")
            .unwrap()
            .unwrap()
            .as_str(),
        format!("jar:{}!/WEB-INF/classes!/com/example/Application.class", war_url)
    );
    assert!(class_path.find_resource("missing.txt").unwrap().is_none());
}

#[test]
fn test_exploded_resources_resolve_to_files() {
    let dir = tempdir().unwrap();
    let root = explode(&create_archive(dir.path(), "archive.war", "WEB-INF", true, &[]));
    let launcher = Launcher::war(Box::new(ExplodedArchive::new(&root).unwrap())).unwrap();

    let class_path = launcher
        .create_class_loader(launcher.classpath_archives().unwrap())
        .unwrap();

    assert_eq!(
        class_path
            .find_resource("com/example/Application.class")
            .unwrap()
            .unwrap()
            .to_string(),
        file_url(&root.join("WEB-INF/classes/com/example/Application.class"))
    );

    // foo.jar is first in the index.
    let shared = class_path.find_resource("shared.properties").unwrap().unwrap();
    assert_eq!(
        shared.to_string(),
        format!(
            "jar:{}!/shared.properties",
            file_url(&root.join("WEB-INF/lib/foo.jar"))
        )
    );
}

#[test]
fn test_close_releases_every_archive() {
    let dir = tempdir().unwrap();
    let war = create_archive(dir.path(), "archive.war", "WEB-INF", false, &[]);
    let launcher = Launcher::war(Box::new(JarArchive::open(&war).unwrap())).unwrap();

    let mut class_path = launcher
        .create_class_loader(launcher.classpath_archives().unwrap())
        .unwrap();
    class_path.close().unwrap();
    class_path.close().unwrap();

    assert!(class_path.archives().iter().all(|a| a.is_closed()));
    assert!(class_path.find_resource("shared.properties").is_err());
    // URLs stay available for reporting after release.
    assert_eq!(class_path.urls().len(), 4);
}

#[test]
fn test_failed_archive_aborts_class_loader_creation() {
    let dir = tempdir().unwrap();
    let root = explode(&create_archive(dir.path(), "archive.war", "WEB-INF", false, &[]));
    std::fs::write(root.join("WEB-INF/lib/foo.jar"), b"truncated").unwrap();

    let launcher = Launcher::war(Box::new(ExplodedArchive::new(&root).unwrap())).unwrap();
    let result = launcher.create_class_loader(launcher.classpath_archives().unwrap());
    assert!(result.is_err());
}
