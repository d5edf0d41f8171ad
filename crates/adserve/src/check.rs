// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `adserve-plugins check` command implementation.
//!
//! Walks every extension in the plugin tree and verifies that each component
//! file resolves to a registered class, that dependency declarations form no
//! cycle, and that declared dependencies exist on disk.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use adserve_config::AdserveConfig;
use adserve_core::{ComponentIndex, ScanDepth};
use adserve_plugin::naming::component_path;
use adserve_plugin::{ComponentLoader, scan_component_files, sort_by_dependencies};
use walkdir::WalkDir;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `check` command. Returns `false` if any check failed.
pub fn run_check(loader: &ComponentLoader, config: &AdserveConfig, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(loader, config);

    println!();
    println!("  adserve-plugins check");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Pass => {}
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
        }
        println!("{}", format_result(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count == 0
}

/// Run every check against the configured plugin tree.
pub fn collect_checks(loader: &ComponentLoader, config: &AdserveConfig) -> Vec<CheckResult> {
    let mut results = vec![check_root(config)];
    if results[0].status == CheckStatus::Fail {
        return results;
    }
    for extension in extension_names(config) {
        results.extend(check_extension(loader, config, &extension));
    }
    results
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal().to_string()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow().to_string()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red().to_string()),
        };
        format!("    {symbol} {:<28} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<28} {} ({duration_ms}ms)", result.name, result.message)
    }
}

/// The plugins root must be a readable directory.
fn check_root(config: &AdserveConfig) -> CheckResult {
    let start = Instant::now();
    let root = config.extensions_root();
    let (status, message) = if root.is_dir() {
        (CheckStatus::Pass, root.display().to_string())
    } else {
        (CheckStatus::Fail, format!("not a directory: {}", root.display()))
    };
    CheckResult {
        name: "Plugins root".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Directory names directly below the plugins root, sorted.
fn extension_names(config: &AdserveConfig) -> Vec<String> {
    WalkDir::new(config.extensions_root())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect()
}

fn check_extension(loader: &ComponentLoader, config: &AdserveConfig, extension: &str) -> Vec<CheckResult> {
    let start = Instant::now();
    let extension_dir = config.extensions_root().join(extension);
    let files = scan_component_files(&extension_dir, &extension_dir, ScanDepth::default())
        .into_iter()
        .filter(|f| f.group_and_component().is_some())
        .count();
    let components = loader.get_components(
        config,
        extension,
        None,
        ComponentIndex::GroupAndName,
        ScanDepth::default(),
        false,
    );

    let loaded = CheckResult {
        name: format!("Extension {extension}"),
        status: if components.len() == files {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        },
        message: format!("{}/{files} components loaded", components.len()),
        duration: start.elapsed(),
    };

    let start = Instant::now();
    let missing: Vec<String> = components
        .values()
        .flat_map(|c| c.dependencies())
        .filter(|dep| !component_path(&config.extensions_root(), dep).is_file())
        .map(|dep| dep.identifier())
        .collect();
    let dependencies_name = format!("Dependencies {extension}");
    let dependencies = match sort_by_dependencies(components) {
        Err(e) => CheckResult {
            name: dependencies_name,
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
        Ok(_) if !missing.is_empty() => CheckResult {
            name: dependencies_name,
            status: CheckStatus::Warn,
            message: format!("missing: {}", missing.join(", ")),
            duration: start.elapsed(),
        },
        Ok(_) => CheckResult {
            name: dependencies_name,
            status: CheckStatus::Pass,
            message: "ordered".to_string(),
            duration: start.elapsed(),
        },
    };

    vec![loaded, dependencies]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::builtin_loader;
    use adserve_test_utils::PluginTree;

    fn statuses(results: &[CheckResult]) -> Vec<(&str, CheckStatus)> {
        results.iter().map(|r| (r.name.as_str(), r.status.clone())).collect()
    }

    #[test]
    fn missing_root_fails_early() {
        let mut config = AdserveConfig::default();
        config.plugin_paths.extensions = "/nonexistent/adserve/plugins".to_string();
        let results = collect_checks(&builtin_loader(), &config);
        assert_eq!(statuses(&results), vec![("Plugins root", CheckStatus::Fail)]);
    }

    #[test]
    fn unregistered_component_fails_and_missing_dependency_warns() {
        let tree = PluginTree::builder()
            .component_with(
                "deliveryLog",
                "ox_click",
                "ox_click",
                "[component]\ndepends_on = [\"deliveryDataPrepare:ox_core:ox_core\"]\n",
            )
            .component("deliveryLog", "ox_orphan", "ox_orphan")
            .build()
            .unwrap();

        let results = collect_checks(&builtin_loader(), tree.config());
        assert_eq!(
            statuses(&results),
            vec![
                ("Plugins root", CheckStatus::Pass),
                ("Extension deliveryLog", CheckStatus::Fail),
                ("Dependencies deliveryLog", CheckStatus::Warn),
            ]
        );
        assert_eq!(results[1].message, "1/2 components loaded");
    }

    #[test]
    fn plain_format_has_status_tag() {
        let result = CheckResult {
            name: "Plugins root".to_string(),
            status: CheckStatus::Pass,
            message: "plugins".to_string(),
            duration: Duration::from_millis(3),
        };
        assert_eq!(
            format_result(&result, false),
            format!("    [OK]   {:<28} plugins (3ms)", "Plugins root")
        );
    }
}
