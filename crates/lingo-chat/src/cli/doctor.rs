// ABOUTME: Doctor command implementation.
// ABOUTME: Reports the config file in use and which capabilities are configured.

use lingo_core::capability::CommandSpec;
use lingo_core::{CapabilityProvider, Config};
use std::path::Path;

pub fn run(config: &Config, path: &Path) {
    print!("{}", report(config, path));
}

fn report(config: &Config, path: &Path) -> String {
    let mut out = String::new();
    let state = if path.exists() {
        "found"
    } else {
        "not found, using defaults"
    };
    out.push_str(&format!("Config: {} ({state})\n\n", path.display()));

    for (name, spec) in [
        ("Language detector", &config.detector),
        ("Translator", &config.translator),
        ("Summarizer", &config.summarizer),
    ] {
        out.push_str(&format!("{name}: {}\n", describe(spec.as_ref())));
    }

    let availability = config.provider().availability();
    out.push('\n');
    if availability.is_supported() {
        out.push_str("Chat processing: supported\n");
    } else {
        out.push_str("Chat processing: not supported (needs a detector and a translator)\n");
    }
    out
}

fn describe(spec: Option<&CommandSpec>) -> String {
    match spec {
        Some(spec) if spec.args.is_empty() => format!("● {}", spec.command),
        Some(spec) => format!("● {} {}", spec.command, spec.args.join(" ")),
        None => "○ not configured".to_string(),
    }
}
