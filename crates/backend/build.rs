use std::env;
use std::fs;
use std::path::Path;

// Ship config.toml from the workspace root next to the built binary, so the
// runtime config lookup (next to the executable) finds it in dev builds too.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // OUT_DIR is typically target/<profile>/build/backend-xxx/out
    let out_path = Path::new(&out_dir);
    let target_dir = match out_path.ancestors().find(|p| p.ends_with(&profile)) {
        Some(dir) => dir.to_path_buf(),
        None => return,
    };

    let workspace_root = match Path::new(env!("CARGO_MANIFEST_DIR")).parent().and_then(|p| p.parent()) {
        Some(root) => root.to_path_buf(),
        None => return,
    };

    let source_config = workspace_root.join("config.toml");
    if source_config.exists() {
        let dest_config = target_dir.join("config.toml");
        if let Err(e) = fs::copy(&source_config, &dest_config) {
            println!("cargo:warning=Failed to copy config.toml: {}", e);
        }
    }
}
