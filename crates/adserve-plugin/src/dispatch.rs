// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch dispatch over loaded components.
//!
//! Both operations are all-or-nothing: every component is checked for the
//! method before any is invoked, and a single failing call aborts the batch
//! without partial results.

use adserve_core::{AdserveError, ComponentMap, ErrorReporter, HookPoint, HookType};
use serde_json::Value;
use tracing::debug;

use crate::instance::ComponentInstance;

/// Invoke `method` on every component, keyed as the input.
pub fn call_on_components(
    components: &ComponentMap<ComponentInstance>,
    method: &str,
    args: Option<&[Value]>,
    reporter: &dyn ErrorReporter,
) -> Result<ComponentMap<Value>, AdserveError> {
    let targets: Vec<(&str, &ComponentInstance)> = components.iter().collect();
    ensure_callable(targets.iter().map(|(_, c)| *c), method, reporter)?;

    let args = args.unwrap_or_default();
    let mut results = ComponentMap::new();
    for (key, component) in targets {
        let value = component.call(method, args).map_err(|e| report(e, reporter))?;
        results.insert(key.to_string(), value);
    }

    debug!(method, count = results.len(), "batch dispatch complete");
    Ok(results)
}

/// Invoke `method` on maintenance components registered for
/// `(hook_type, hook_point)`.
///
/// Returns `Ok(false)` if any invoked call returned `false`, which callers
/// read as "a plugin replaced the default behaviour". Components without the
/// maintenance facet, or hooked elsewhere, are not invoked.
pub fn call_on_components_by_hook(
    components: &ComponentMap<ComponentInstance>,
    method: &str,
    hook_type: HookType,
    hook_point: &HookPoint,
    args: Option<&[Value]>,
    reporter: &dyn ErrorReporter,
) -> Result<bool, AdserveError> {
    let maintenance: Vec<&ComponentInstance> = components
        .values()
        .filter(|c| c.as_maintenance().is_some())
        .collect();
    ensure_callable(maintenance.iter().copied(), method, reporter)?;

    let args = args.unwrap_or_default();
    let mut outcome = true;
    for component in maintenance {
        let Some(hook) = component.as_maintenance() else {
            continue;
        };
        if hook.hook_type() != hook_type || hook.hook_point() != hook_point {
            continue;
        }

        let value = component.call(method, args).map_err(|e| report(e, reporter))?;
        if value == Value::Bool(false) {
            debug!(identifier = %component.identifier(), %hook_point, "hook returned false");
            outcome = false;
        }
    }

    Ok(outcome)
}

fn ensure_callable<'a>(
    components: impl IntoIterator<Item = &'a ComponentInstance>,
    method: &str,
    reporter: &dyn ErrorReporter,
) -> Result<(), AdserveError> {
    for component in components {
        if let Err(err) = component.resolve_method(method) {
            return Err(report(err, reporter));
        }
    }
    Ok(())
}

fn report(error: AdserveError, reporter: &dyn ErrorReporter) -> AdserveError {
    if error.is_hard() {
        reporter.report(&error);
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::{Scripted, instance};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl ErrorReporter for Collect {
        fn report(&self, error: &AdserveError) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    fn batch<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, Scripted)>,
    ) -> ComponentMap<ComponentInstance> {
        entries
            .into_iter()
            .map(|(key, inner)| {
                let key = key.as_ref();
                (key.to_string(), instance(&format!("ext:{key}:{key}"), inner))
            })
            .collect()
    }

    fn hooked(result: Value, hook_type: HookType, point: &str) -> Scripted {
        let mut s = Scripted::new(vec!["run"], result);
        s.hook = Some((hook_type, HookPoint::new(point)));
        s
    }

    #[test]
    fn results_follow_input_order() {
        let components = batch(vec![
            ("b", Scripted::new(vec!["run"], Value::from(2))),
            ("a", Scripted::new(vec!["run"], Value::from(1))),
        ]);
        let results = call_on_components(&components, "run", None, &Collect::default()).unwrap();

        let pairs: Vec<(&str, &Value)> = results.iter().collect();
        assert_eq!(pairs, vec![("b", &Value::from(2)), ("a", &Value::from(1))]);
    }

    #[test]
    fn missing_method_fails_whole_batch_at_any_position() {
        for bad in 0..4 {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let components = batch((0..4).map(|i| {
                let methods = if i == bad { vec!["other"] } else { vec!["run"] };
                let mut s = Scripted::new(methods, Value::Bool(true));
                s.calls = Arc::clone(&calls);
                (format!("c{i}"), s)
            }));

            let reporter = Collect::default();
            let err = call_on_components(&components, "run", None, &reporter).unwrap_err();
            assert!(matches!(err, AdserveError::MethodNotFound { .. }), "position {bad}");
            assert!(calls.lock().unwrap().is_empty(), "nothing invoked at position {bad}");
            assert_eq!(reporter.0.lock().unwrap().len(), 1);
        }
    }

    #[test]
    fn hook_false_when_any_matching_call_returns_false() {
        let components = batch(vec![
            ("a", hooked(Value::Bool(true), HookType::Pre, "adLogin")),
            ("b", hooked(Value::Bool(false), HookType::Pre, "adLogin")),
        ]);
        let ok = call_on_components_by_hook(
            &components,
            "run",
            HookType::Pre,
            &HookPoint::new("adLogin"),
            None,
            &Collect::default(),
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn hook_ignores_non_matching_components() {
        let components = batch(vec![
            ("a", hooked(Value::Bool(false), HookType::Post, "adLogin")),
            ("b", hooked(Value::Bool(false), HookType::Pre, "other")),
            ("c", Scripted::new(vec!["run"], Value::Bool(false))),
            ("d", hooked(Value::Null, HookType::Pre, "adLogin")),
        ]);
        let ok = call_on_components_by_hook(
            &components,
            "run",
            HookType::Pre,
            &HookPoint::new("adLogin"),
            None,
            &Collect::default(),
        )
        .unwrap();
        assert!(ok);
    }

    #[test]
    fn hook_true_for_empty_input() {
        let ok = call_on_components_by_hook(
            &ComponentMap::new(),
            "run",
            HookType::Post,
            &HookPoint::new("anything"),
            None,
            &Collect::default(),
        )
        .unwrap();
        assert!(ok);
    }

    #[test]
    fn hook_checks_every_maintenance_component_first() {
        let mut bad = hooked(Value::Bool(true), HookType::Post, "elsewhere");
        bad.methods = vec!["other"];
        let components = batch(vec![
            ("a", hooked(Value::Bool(true), HookType::Pre, "adLogin")),
            ("b", bad),
        ]);
        let err = call_on_components_by_hook(
            &components,
            "run",
            HookType::Pre,
            &HookPoint::new("adLogin"),
            None,
            &Collect::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AdserveError::MethodNotFound { .. }));
    }
}
