//! Build script - copies the linker script into the output directory
//! so that the linker can find it at link time, and records the build
//! time as the firmware's initial wall clock.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to OUT_DIR
    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();

    // Tell cargo to look for linker scripts in OUT_DIR
    println!("cargo:rustc-link-search={}", out_dir.display());

    // The board has no RTC backup, so it boots at the time it was built.
    let now_ms = chrono::Utc::now().timestamp_millis().max(0);
    fs::write(
        out_dir.join("utc.rs"),
        format!("const BUILD_UTC_MS: u64 = {now_ms};\n"),
    )
    .unwrap();

    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Rebuild if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
