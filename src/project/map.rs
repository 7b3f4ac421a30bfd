//! Building a project's resolution map by scanning its source tree.
//!
//! Every resolvable collection directory is walked; each file becomes a
//! `kind:path` specifier mapped to its project-relative file path. The file
//! stem decides the kind: a stem naming one of the collection's types (e.g.
//! `component.ts`, `template.hbs`) types the containing directory's module,
//! any other `.hbs` file is a template, and any other code file takes the
//! collection's default type.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::error::ProjectError;
use crate::resolver::{CollectionConfig, ModuleConfig};
use crate::specifier;

/// Absolute specifier to project-relative file path, ordered for stable
/// output and diffing.
pub type ResolutionMap = BTreeMap<String, String>;

const SRC_DIR: &str = "src";
const TEMPLATE_EXTENSION: &str = "hbs";
const CODE_EXTENSIONS: &[&str] = &["ts", "js"];

pub fn build_resolution_map(
    root: &Path,
    root_name: &str,
    config: &ModuleConfig,
    ignores: &[Pattern],
) -> Result<ResolutionMap, ProjectError> {
    let mut map = ResolutionMap::new();
    for (collection_name, collection) in &config.collections {
        if collection.unresolvable {
            continue;
        }
        let dir = collection_dir(root, collection_name, collection);
        if !dir.is_dir() {
            continue;
        }
        scan_collection(
            root,
            root_name,
            collection_name,
            collection,
            &dir,
            ignores,
            &mut map,
        )?;
    }
    Ok(map)
}

fn collection_dir(root: &Path, name: &str, collection: &CollectionConfig) -> PathBuf {
    let mut dir = root.join(SRC_DIR);
    if let Some(group) = &collection.group {
        dir.push(group);
    }
    dir.push(name);
    dir
}

fn scan_collection(
    root: &Path,
    root_name: &str,
    collection_name: &str,
    collection: &CollectionConfig,
    dir: &Path,
    ignores: &[Pattern],
    map: &mut ResolutionMap,
) -> Result<(), ProjectError> {
    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop"));
            ProjectError::Io { path, source }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_unix_path(root, entry.path()) else {
            continue;
        };
        if ignores.iter().any(|pattern| pattern.matches(&relative)) {
            continue;
        }
        let Some(key) = classify(root_name, collection_name, collection, dir, entry.path()) else {
            continue;
        };
        map.insert(key, relative);
    }
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Decides what module a file provides, or `None` when the file plays no
/// part in resolution.
fn classify(
    root_name: &str,
    collection_name: &str,
    collection: &CollectionConfig,
    collection_dir: &Path,
    file: &Path,
) -> Option<String> {
    let stem = file.file_stem()?.to_str()?;
    let extension = file.extension()?.to_str()?;
    let relative = file.strip_prefix(collection_dir).ok()?;
    let mut segments: Vec<&str> = relative
        .parent()
        .map(|parent| parent.iter().filter_map(|c| c.to_str()).collect())
        .unwrap_or_default();

    let has_type = |name: &str| collection.types.iter().any(|t| t.as_str() == name);
    let known_extension =
        extension == TEMPLATE_EXTENSION || CODE_EXTENSIONS.contains(&extension);

    let type_name = if has_type(stem) {
        if !known_extension {
            return None;
        }
        stem
    } else if extension == TEMPLATE_EXTENSION {
        segments.push(stem);
        "template"
    } else if CODE_EXTENSIONS.contains(&extension) {
        segments.push(stem);
        collection.default_type.as_deref()?
    } else {
        return None;
    };
    if !has_type(type_name) {
        return None;
    }

    let mut path = format!("/{root_name}/{collection_name}");
    for segment in &segments {
        path.push('/');
        path.push_str(segment);
    }
    Some(specifier::make(type_name, &path))
}

fn relative_unix_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .iter()
        .map(|c| c.to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
