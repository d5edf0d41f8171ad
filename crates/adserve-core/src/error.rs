// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Adserve plugin system.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across component loading and dispatch.
///
/// Variants fall into two tiers. Soft failures (file not found, component
/// disabled, malformed identifier) are expected and callers branch on them.
/// Hard failures indicate a broken plugin package or a misused batch and are
/// also handed to an [`ErrorReporter`](crate::traits::ErrorReporter).
#[derive(Debug, Error)]
pub enum AdserveError {
    /// No component file exists at the resolved path.
    #[error("component file not found: {}", path.display())]
    ComponentNotFound { path: PathBuf },

    /// The component is switched off by the group enablement map.
    #[error("component {identifier} is disabled")]
    ComponentDisabled { identifier: String },

    /// A component identifier did not have the `extension:group:component` shape.
    #[error("malformed component identifier `{0}`: expected `extension:group:component`")]
    MalformedIdentifier(String),

    /// The component file loaded but no class is registered under the derived name.
    #[error("component file {} included but class '{class}' does not exist", path.display())]
    ClassNotFound { class: String, path: PathBuf },

    /// The requested method is not defined on the component class.
    #[error("method '{method}()' not defined in class '{class}'")]
    MethodNotFound { class: String, method: String },

    /// The component manifest could not be parsed.
    #[error("invalid component manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// A registered factory failed to build its component.
    #[error("failed to construct '{class}': {message}")]
    Construction { class: String, message: String },

    /// A component method was dispatched but returned an error.
    #[error("call to '{method}()' failed: {message}")]
    Invocation { method: String, message: String },

    /// Component dependencies form a cycle.
    #[error("dependency cycle between components: {}", members.join(", "))]
    DependencyCycle { members: Vec<String> },

    /// Filesystem errors while reading plugin files.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdserveError {
    /// Returns true for failures that indicate a broken plugin package or a
    /// misused API, as opposed to an expected miss.
    pub fn is_hard(&self) -> bool {
        !matches!(
            self,
            AdserveError::ComponentNotFound { .. }
                | AdserveError::ComponentDisabled { .. }
                | AdserveError::MalformedIdentifier(_)
        )
    }

    /// Returns true when the component file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdserveError::ComponentNotFound { .. })
    }

    /// Shorthand for an [`AdserveError::Invocation`] error.
    pub fn invocation(method: impl Into<String>, message: impl Into<String>) -> Self {
        AdserveError::Invocation {
            method: method.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_errors_are_not_hard() {
        let not_found = AdserveError::ComponentNotFound {
            path: PathBuf::from("/plugins/x/y/z.component.toml"),
        };
        assert!(!not_found.is_hard());
        assert!(not_found.is_not_found());

        let disabled = AdserveError::ComponentDisabled {
            identifier: "bannerTypeHtml:demo:demo".into(),
        };
        assert!(!disabled.is_hard());

        assert!(!AdserveError::MalformedIdentifier("a:b".into()).is_hard());
    }

    #[test]
    fn package_errors_are_hard() {
        let missing_class = AdserveError::ClassNotFound {
            class: "Plugins_A_B_C".into(),
            path: PathBuf::from("a/b/c.component.toml"),
        };
        assert!(missing_class.is_hard());
        assert!(!missing_class.is_not_found());

        let missing_method = AdserveError::MethodNotFound {
            class: "Plugins_A_B_C".into(),
            method: "run".into(),
        };
        assert!(missing_method.is_hard());
        assert_eq!(
            missing_method.to_string(),
            "method 'run()' not defined in class 'Plugins_A_B_C'"
        );
    }

    #[test]
    fn dependency_cycle_lists_members() {
        let err = AdserveError::DependencyCycle {
            members: vec!["a:b:c".into(), "d:e:f".into()],
        };
        assert_eq!(
            err.to_string(),
            "dependency cycle between components: a:b:c, d:e:f"
        );
    }
}
