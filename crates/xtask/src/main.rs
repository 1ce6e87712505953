use anyhow::Context;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize)]
struct Dependency {
    name: String,
}

/// Pure-core crates must never depend on an adapter or composition-root
/// crate, directly or transitively -- that dependency direction is what
/// keeps game rules free of I/O. Checked against `cargo metadata` rather
/// than hand-maintained, so a new `use` of the wrong crate fails CI
/// instead of rotting silently.
const CORE_CRATES: &[&str] = &["nightfall-domain", "nightfall-protocol", "nightfall-engine"];

const FORBIDDEN_FOR_CORE: &[&str] = &[
    "nightfall-engine-adapters",
    "nightfall-engine-runner",
    "nightfall-player-adapters",
    "tokio",
    "axum",
    "rand",
];

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata output")?;

    let mut violations = Vec::new();
    for package in &metadata.packages {
        if !CORE_CRATES.contains(&package.name.as_str()) {
            continue;
        }
        for dep in &package.dependencies {
            if FORBIDDEN_FOR_CORE.contains(&dep.name.as_str()) {
                violations.push(format!("{} depends on {}", package.name, dep.name));
            }
        }
    }

    if !violations.is_empty() {
        anyhow::bail!(
            "dependency direction violated -- core crates must stay pure:\n  {}",
            violations.join("\n  ")
        );
    }

    println!("arch-check: ok ({} core crates clean)", CORE_CRATES.len());
    Ok(())
}
