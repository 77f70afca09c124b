use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const LIBS: [&str; 3] = ["foo.jar", "bar.jar", "baz.jar"];

/// A library jar carrying its own marker resource plus a resource every
/// library shares.
pub fn library_jar(name: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file(format!("{}.txt", name.trim_end_matches(".jar")), options)
        .unwrap();
    zip.write_all(name.as_bytes()).unwrap();
    zip.start_file("shared.properties", options).unwrap();
    zip.write_all(format!("origin={}", name).as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Build an executable archive at `dir/name` with classes and `foo`, `bar`,
/// `baz` libraries under `prefix` (`WEB-INF` or `BOOT-INF`).
///
/// With `index`, a classpath index listing the three libraries is added.
/// `extra_libs` are written to the lib directory before the indexed ones and
/// are never listed in the index.
#[allow(dead_code)]
pub fn create_archive(
    dir: &Path,
    name: &str,
    prefix: &str,
    index: bool,
    extra_libs: &[&str],
) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    let stored = options.compression_method(CompressionMethod::Stored);

    zip.add_directory("META-INF/", options).unwrap();
    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(b"Manifest-Version: 1.0\r\nStart-Class: com.example.Application\r\n\r\n")
        .unwrap();

    zip.add_directory(format!("{}/", prefix), options).unwrap();
    zip.add_directory(format!("{}/classes/", prefix), options)
        .unwrap();
    zip.add_directory(format!("{}/classes/com/example/", prefix), options)
        .unwrap();
    zip.start_file(
        format!("{}/classes/com/example/Application.class", prefix),
        options,
    )
    .unwrap();
    zip.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();

    zip.add_directory(format!("{}/lib/", prefix), options).unwrap();
    for lib in extra_libs.iter().chain(LIBS.iter()) {
        zip.start_file(format!("{}/lib/{}", prefix, lib), stored)
            .unwrap();
        zip.write_all(&library_jar(lib)).unwrap();
    }

    if index {
        zip.start_file(format!("{}/classpath.idx", prefix), options)
            .unwrap();
        for lib in LIBS {
            writeln!(zip, "- \"{}/lib/{}\"", prefix, lib).unwrap();
        }
    }

    zip.finish().unwrap();
    path
}

/// Unpack `archive` next to it and return the directory.
#[allow(dead_code)]
pub fn explode(archive: &Path) -> PathBuf {
    let target = archive.with_extension("exploded");
    std::fs::create_dir_all(&target).unwrap();
    let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    zip.extract(&target).unwrap();
    target
}

#[allow(dead_code)]
pub fn file_url(path: &Path) -> String {
    nestjar_core::Url::from_file_path(path).unwrap().to_string()
}

#[allow(dead_code)]
pub fn dir_url(path: &Path) -> String {
    nestjar_core::Url::from_directory_path(path).unwrap().to_string()
}
