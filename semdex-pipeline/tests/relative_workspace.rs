//! Indexer invocation for a manifest opened through a relative path.

#![cfg(unix)]

use std::{fs, os::unix::fs::PermissionsExt, path::Path};

use semdex_core::OutputFormat;
use semdex_manifest::SemdexToml;
use semdex_pipeline::{
    CommandIndexer, HostGraph, IndexAssembler, Indexer, ManifestGraph, SourceLanguage,
    TracingReporter,
};
use tempfile::TempDir;

/// Stand-in for scip-java that fails unless its last argument, the
/// targetroot, is a directory as seen from its own working directory.
const INDEXER_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do last="$arg"; done
if [ ! -d "$last" ]; then
  echo "error: targetroot $last missing in $(pwd)" >&2
  exit 1
fi
"#;

#[test]
fn test_indexer_finds_targetroot_under_relative_manifest() {
    let scratch = TempDir::new_in(".").expect("Failed to create scratch dir");
    let name = scratch.path().file_name().unwrap().to_owned();
    let manifest_path = Path::new(&name).join("ws").join("semdex.toml");
    fs::create_dir_all(manifest_path.parent().unwrap()).unwrap();
    fs::write(&manifest_path, "[modules.core]\nvariant = \"scala3\"\n").unwrap();

    let script = std::path::absolute(scratch.path().join("fake-indexer")).unwrap();
    fs::write(&script, INDEXER_SCRIPT).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let file = SemdexToml::open(&manifest_path).expect("Failed to open manifest");
    let graph = ManifestGraph::open(&file).expect("Failed to build graph");
    let root = graph.workspace_root();
    assert!(root.is_absolute());

    let dest = root.join("out").join("semdex");
    let assembler = IndexAssembler::new(&dest);
    assembler.write_javacopts(&[]).unwrap();
    let request = assembler.request(
        Path::new("index.scip"),
        root,
        &TracingReporter,
        SourceLanguage::Scala,
        OutputFormat::Scip,
        &[],
    );

    let result = CommandIndexer::new(script.to_string_lossy()).index(&request);
    assert!(result.is_ok(), "{result:?}");
}
