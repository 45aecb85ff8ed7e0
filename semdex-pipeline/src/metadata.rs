//! Package identity extraction from dependency jars.

use std::{fs::File, io::Read, path::Path};

use semdex_core::PackageIdentity;
use tracing::trace;
use zip::ZipArchive;

const MAVEN_METADATA_PREFIX: &str = "META-INF/maven/";
const POM_PROPERTIES: &str = "pom.properties";

/// Read the Maven coordinates embedded in a jar.
///
/// Looks for `META-INF/maven/<group>/<artifact>/pom.properties`. Anything
/// that prevents a clean answer (not a file, not a zip, no or incomplete
/// metadata) yields `None`.
pub fn package_identity(path: &Path) -> Option<PackageIdentity> {
    match read_identity(path) {
        Ok(identity) => identity,
        Err(reason) => {
            trace!(path = %path.display(), %reason, "no package identity");
            None
        }
    }
}

fn read_identity(path: &Path) -> Result<Option<PackageIdentity>, String> {
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut archive = ZipArchive::new(file).map_err(|e| e.to_string())?;

    let candidates: Vec<String> = archive
        .file_names()
        .filter(|name| is_pom_properties(name))
        .map(str::to_string)
        .collect();

    for name in candidates {
        let mut entry = archive.by_name(&name).map_err(|e| e.to_string())?;
        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(|e| e.to_string())?;
        if let Some(identity) = parse_pom_properties(&content) {
            return Ok(Some(identity));
        }
    }
    Ok(None)
}

/// `META-INF/maven/<group>/<artifact>/pom.properties`, exactly two levels deep.
fn is_pom_properties(name: &str) -> bool {
    name.strip_prefix(MAVEN_METADATA_PREFIX)
        .and_then(|rest| rest.strip_suffix(POM_PROPERTIES))
        .is_some_and(|middle| {
            let parts: Vec<&str> = middle.trim_end_matches('/').split('/').collect();
            parts.len() == 2 && parts.iter().all(|p| !p.is_empty())
        })
}

fn parse_pom_properties(content: &str) -> Option<PackageIdentity> {
    let mut group = None;
    let mut artifact = None;
    let mut version = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once(['=', ':']) else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "groupId" => group = Some(value),
            "artifactId" => artifact = Some(value),
            "version" => version = Some(value),
            _ => {}
        }
    }

    match (group, artifact, version) {
        (Some(g), Some(a), Some(v)) if !g.is_empty() && !a.is_empty() && !v.is_empty() => {
            Some(PackageIdentity::new(g, a, v))
        }
        _ => None,
    }
}
