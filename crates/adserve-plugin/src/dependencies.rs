// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering components by their declared `depends_on` lists.

use std::collections::HashSet;

use adserve_core::{AdserveError, ComponentMap};
use tracing::debug;

use crate::instance::ComponentInstance;

/// Reorder `components` so each one follows the components it depends on.
///
/// Dependencies on components outside the map are ignored. Components whose
/// dependencies are already satisfied keep their relative input order.
pub fn sort_by_dependencies(
    components: ComponentMap<ComponentInstance>,
) -> Result<ComponentMap<ComponentInstance>, AdserveError> {
    let mut pending: Vec<(String, ComponentInstance)> = components.into_iter().collect();
    let present: HashSet<String> = pending.iter().map(|(_, c)| c.identifier()).collect();
    let mut emitted: HashSet<String> = HashSet::with_capacity(pending.len());
    let mut sorted = ComponentMap::new();

    while !pending.is_empty() {
        let ready = pending.iter().position(|(_, component)| {
            component.dependencies().iter().all(|dep| {
                let id = dep.identifier();
                !present.contains(&id) || emitted.contains(&id)
            })
        });

        let Some(idx) = ready else {
            let members = pending.iter().map(|(_, c)| c.identifier()).collect();
            return Err(AdserveError::DependencyCycle { members });
        };

        let (key, component) = pending.remove(idx);
        emitted.insert(component.identifier());
        sorted.insert(key, component);
    }

    debug!(count = sorted.len(), "components ordered by dependencies");
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::tests::Scripted;
    use crate::manifest::ComponentManifest;
    use adserve_core::ComponentDescriptor;
    use serde_json::Value;
    use std::sync::Arc;

    fn with_deps(identifier: &str, deps: &[&str]) -> ComponentInstance {
        let descriptor = ComponentDescriptor::parse_identifier(identifier).unwrap();
        let manifest = ComponentManifest {
            depends_on: deps
                .iter()
                .map(|d| ComponentDescriptor::parse_identifier(d).unwrap())
                .collect(),
            ..ComponentManifest::default()
        };
        ComponentInstance::new(
            descriptor.clone(),
            true,
            crate::naming::component_class_name(&descriptor),
            Arc::new(manifest),
            Box::new(Scripted::new(vec![], Value::Null)),
        )
    }

    fn keys(map: &ComponentMap<ComponentInstance>) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn dependency_moves_ahead_of_dependent() {
        let map: ComponentMap<_> = [
            ("click", with_deps("deliveryLog:ox_click:ox_click", &["deliveryDataPrepare:ox_core:ox_core"])),
            ("core", with_deps("deliveryDataPrepare:ox_core:ox_core", &[])),
        ]
        .into_iter()
        .collect();

        let sorted = sort_by_dependencies(map).unwrap();
        assert_eq!(keys(&sorted), vec!["core", "click"]);
    }

    #[test]
    fn independent_components_keep_input_order() {
        let map: ComponentMap<_> = [
            ("c", with_deps("e:c:c", &[])),
            ("a", with_deps("e:a:a", &[])),
            ("b", with_deps("e:b:b", &["e:c:c"])),
        ]
        .into_iter()
        .collect();

        let sorted = sort_by_dependencies(map).unwrap();
        assert_eq!(keys(&sorted), vec!["c", "a", "b"]);
    }

    #[test]
    fn absent_dependencies_are_ignored() {
        let map: ComponentMap<_> = [("click", with_deps("deliveryLog:ox_click:ox_click", &["x:y:z"]))]
            .into_iter()
            .collect();

        assert_eq!(keys(&sort_by_dependencies(map).unwrap()), vec!["click"]);
    }

    #[test]
    fn cycle_is_an_error() {
        let map: ComponentMap<_> = [
            ("free", with_deps("e:free:free", &[])),
            ("a", with_deps("e:a:a", &["e:b:b"])),
            ("b", with_deps("e:b:b", &["e:a:a"])),
        ]
        .into_iter()
        .collect();

        match sort_by_dependencies(map).unwrap_err() {
            AdserveError::DependencyCycle { members } => {
                assert_eq!(members, vec!["e:a:a".to_string(), "e:b:b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
