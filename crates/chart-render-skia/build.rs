// File: crates/chart-render-skia/build.rs
// Summary: Link the Windows system libraries Skia needs when rasterising charts.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager reads the registry (RegOpenKeyExW and friends).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
