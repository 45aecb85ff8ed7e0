//! Integration tests from a semdex.toml on disk to the files the indexer reads.

use std::{fs, io::Write, path::Path};

use semdex_core::PackageIdentity;
use semdex_manifest::SemdexToml;
use semdex_pipeline::{ClasspathAggregator, HostGraph, IndexAssembler, ManifestGraph};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

fn write_jar(path: &Path, pom_properties: Option<&str>) {
    let file = fs::File::create(path).expect("Failed to create jar");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    writer.start_file("a/A.class", options).unwrap();
    writer.write_all(b"cafebabe").unwrap();
    if let Some(content) = pom_properties {
        writer
            .start_file("META-INF/maven/org.typelevel/cats-core_3/pom.properties", options)
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_manifest_dependencies_reach_javacopts() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join("lib")).unwrap();
    write_jar(
        &root.join("lib/cats-core_3-2.10.0.jar"),
        Some("groupId=org.typelevel\nartifactId=cats-core_3\nversion=2.10.0\n"),
    );
    write_jar(&root.join("lib/plain.jar"), None);
    fs::write(root.join("lib/broken.jar"), "not a zip").unwrap();

    let manifest_path = root.join("semdex.toml");
    fs::write(
        &manifest_path,
        r#"
        [workspace]
        java_version = 21

        [modules.core]
        variant = "scala3"
        dependencies = ["lib/cats-core_3-2.10.0.jar", "lib/broken.jar"]

        [modules.app]
        variant = "java"
        dependencies = ["lib/plain.jar", "lib/cats-core_3-2.10.0.jar"]
        upstream = ["core"]
    "#,
    )
    .unwrap();

    let file = SemdexToml::open(&manifest_path).expect("Failed to open manifest");
    let graph = ManifestGraph::open(&file).expect("Failed to build graph");
    assert_eq!(graph.runtime_version(), Some(21));

    let entries = ClasspathAggregator::new().aggregate(graph.modules());
    assert_eq!(entries.len(), 4);
    let cats = PackageIdentity::new("org.typelevel", "cats-core_3", "2.10.0");
    assert_eq!(entries[0].package.as_ref(), Some(&cats));
    assert_eq!(entries[1].package, None);
    assert_eq!(entries[2].package, None);
    assert_eq!(entries[3].package.as_ref(), Some(&cats));

    let dest = root.join("out/semdex");
    IndexAssembler::new(&dest).write_javacopts(&entries).unwrap();

    let javacopts = fs::read_to_string(dest.join("javacopts.txt")).unwrap();
    let mut lines = javacopts.lines();
    assert_eq!(lines.next(), Some("-classpath"));
    let paths: Vec<_> = lines.next().unwrap().split(':').collect();
    assert_eq!(paths.len(), 4);
    assert!(paths[0].ends_with("cats-core_3-2.10.0.jar"));
    assert!(paths[1].ends_with("broken.jar"));
}
