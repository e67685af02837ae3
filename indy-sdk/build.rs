fn main() {
    println!("cargo:rerun-if-env-changed=LIBINDY_DIR");

    // Only link when the native backend is requested; the mock-backed build
    // has no libindy dependency.
    if std::env::var_os("CARGO_FEATURE_LIBINDY").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("LIBINDY_DIR") {
        let dir = std::path::PathBuf::from(dir);
        println!("cargo:rustc-link-search=native={}", dir.display());
    }
    println!("cargo:rustc-link-lib=dylib=indy");
}
