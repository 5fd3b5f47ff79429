//! Build script for storefront crate.
//!
//! Generates content-based hashes for static assets (CSS, JS) so they can be
//! served with immutable cache headers.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_asset("css", "main", "CSS_HASH");
    hash_asset("js", "app", "JS_HASH");
}

/// Hash `static/{dir}/{stem}.{dir}` and copy it to `static/{dir}/derived/`
/// with the hash in the filename.
///
/// Sets `env_var` for use with `env!()` in the template filters.
fn hash_asset(dir: &str, stem: &str, env_var: &str) {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static").join(dir);
    let source = static_dir.join(format!("{stem}.{dir}"));

    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", source.display());
            println!("cargo:rustc-env={env_var}=");
            return;
        }
    };

    // First 8 hex chars of SHA256
    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = &hash[..8];

    println!("cargo:rustc-env={env_var}={short_hash}");

    let derived_dir = static_dir.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(&source, derived_dir.join(format!("{stem}.{short_hash}.{dir}")))
        .expect("Failed to copy asset to derived directory");
}
