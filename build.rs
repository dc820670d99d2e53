//! Build script for Displair Volume Control
//!
//! Embeds the Windows application manifest for DPI awareness and
//! links required Windows libraries.

fn main() {
    // Only run on Windows
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    // Per-monitor DPI awareness keeps the 1024x768 layout in physical pixels
    embed_resource::compile("resources/app.rc", embed_resource::NONE);

    // COM (CoInitializeEx, CoCreateInstance)
    println!("cargo:rustc-link-lib=ole32");
    println!("cargo:rustc-link-lib=user32");

    println!("cargo:rerun-if-changed=resources/app.rc");
    println!("cargo:rerun-if-changed=resources/app.manifest");
}
