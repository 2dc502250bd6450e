use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogueLink {
    label: String,
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogueItem {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    links: Vec<CatalogueLink>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogueFile {
    schema_version: u32,
    items: Vec<CatalogueItem>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("catalogue.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalogue: CatalogueFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalogue.schema_version != 1 {
        panic!(
            "catalogue schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalogue.schema_version
        );
    }

    let mut seen = HashSet::new();
    for item in &catalogue.items {
        if item.id.trim().is_empty() || item.name.trim().is_empty() {
            panic!("catalogue item with empty id or name in {}", path.display());
        }
        if !seen.insert(item.id.clone()) {
            panic!("duplicate catalogue item id `{}`", item.id);
        }
    }

    let json = serde_json::to_string_pretty(&catalogue.items).expect("serialize catalogue");
    let generated = format!(
        "/// Build-time generated catalogue JSON.\n\
pub const CATALOGUE_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("catalogue_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
