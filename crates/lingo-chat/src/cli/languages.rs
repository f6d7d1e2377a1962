// ABOUTME: Languages subcommand implementation.
// ABOUTME: Lists every supported target language code with its display name.

use lingo_core::Language;

pub fn run() {
    for line in lines() {
        println!("{line}");
    }
}

fn lines() -> Vec<String> {
    Language::ALL
        .iter()
        .map(|l| format!("{:<8} {}", l.code(), l.display_name()))
        .collect()
}
