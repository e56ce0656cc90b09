fn main() {
    // Footer copyright year
    let build_time = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=BUILD_TIME={build_time}");

    println!("cargo:rerun-if-changed=build.rs");
    // Embedded dictionaries and motion constants
    println!("cargo:rerun-if-changed=content");
}
