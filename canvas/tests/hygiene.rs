//! Source hygiene for the canvas engine.
//!
//! The engine runs inside the editor and viewer on every pointer event and
//! frame, so production code under `canvas/src/` may not panic or silently drop
//! results. Test files (`*_test.rs`) are exempt. Budgets only go down.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    budget: usize,
    label: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, label: "unwrap" },
    Rule { pattern: ".expect(", budget: 0, label: "expect" },
    Rule { pattern: "panic!(", budget: 0, label: "panic" },
    Rule { pattern: "unreachable!(", budget: 0, label: "unreachable" },
    Rule { pattern: "todo!(", budget: 0, label: "todo" },
    Rule { pattern: "unimplemented!(", budget: 0, label: "unimplemented" },
    Rule { pattern: "let _ =", budget: 0, label: "silent discard" },
    Rule { pattern: ".ok()", budget: 0, label: "result-to-option" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, label: "allow(dead_code)" },
];

/// Every non-test `.rs` file under `canvas/src/`. Panics rather than returning an
/// empty list, so a wrong path can never pass the budgets vacuously.
fn production_sources() -> Vec<(PathBuf, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect(&root, &mut files);
    files.sort_by(|a, b| a.0.cmp(&b.0));
    assert!(!files.is_empty(), "no production sources found under {}", root.display());
    files
}

fn collect(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            let content = fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
            out.push((path, content));
        }
    }
}

fn hits(files: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(move |(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = production_sources();
    for module in ["lib.rs", "engine.rs", "render.rs", "geometry.rs"] {
        assert!(files.iter().any(|(p, _)| p.ends_with(module)), "{module} missing from scan");
    }
    assert!(files.iter().all(|(p, _)| !p.to_string_lossy().ends_with("_test.rs")));
}

#[test]
fn production_code_stays_within_budgets() {
    let files = production_sources();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        if found.len() > rule.budget {
            failures.push(format!(
                "{} budget exceeded: found {}, max {}\n{}",
                rule.label,
                found.len(),
                rule.budget,
                found.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
