// build.rs

use std::env;

/// Exposes the crate root to the compiler so fixture scripts can be located
/// from tests regardless of the working directory.
fn dump_env() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is not set");
    println!("cargo:rustc-env=PROJECT_ROOT={}/", manifest_dir);
}

fn main() {
    dump_env();
    println!("cargo:rerun-if-changed=build.rs");
}
