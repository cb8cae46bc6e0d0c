use std::process::Command;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());

    let output = Command::new("git")
        .args(["-C", &format!("{manifest_dir}/.."), "rev-parse", "--short", "HEAD"])
        .output();

    let sha = match output {
        Ok(o) if o.status.success() => {
            let s = String::from_utf8_lossy(&o.stdout).trim().to_string();
            if s.is_empty() { "unknown".to_string() } else { s }
        }
        _ => "unknown".to_string(),
    };

    println!("cargo:rustc-env=HEARTH_BUILD_SHA={sha}");
}
