//! Read page definitions and request data from JSON.

use std::{ffi::OsStr, fs, path::Path};

use serde::de::DeserializeOwned;

use crate::{Error, Page, definition::PageDef};

/// Load and build a page from a `.json` definition file.
pub fn load_from_path(path: &Path) -> Result<Page, Error> {
    if path.extension() != Some(OsStr::new("json")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported definition format (expected a .json file)".to_string(),
        });
    }
    let source = read_source(path)?;
    load_from_str(&source, Some(path))
}

/// Build a page from an in-memory definition.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Page, Error> {
    let def = parse_def(source, path)?;
    let page = Page::new(&def);
    match path {
        Some(p) => page.map_err(|e| e.with_path(p)),
        None => page,
    }
}

/// Parse a definition without building it.
pub fn parse_def(source: &str, path: Option<&Path>) -> Result<PageDef, Error> {
    serde_json::from_str(source).map_err(|e| Error::from_json(&e, path))
}

/// Read a JSON document (state, payload or request config) from disk.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let source = read_source(path)?;
    serde_json::from_str(&source).map_err(|e| Error::from_json(&e, Some(path)))
}

fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })
}
