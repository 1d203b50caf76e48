use std::collections::BTreeMap;

use crate::error::ErrorMap;

/// Tree-shaped errors, nested along the dot-paths of the field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ErrorTree {
    pub errors: Vec<String>,
    pub properties: BTreeMap<String, ErrorTree>,
}

impl ErrorTree {
    /// Node at `path`, if any error lives at or below it.
    pub fn get(&self, path: &str) -> Option<&ErrorTree> {
        path.split('.')
            .try_fold(self, |node, segment| node.properties.get(segment))
    }
}

/// Convert an [`ErrorMap`] into a tree: `"user.name"` ends up under
/// `properties["user"].properties["name"]`.
pub fn treeify_errors(errors: &ErrorMap) -> ErrorTree {
    let mut root = ErrorTree::default();
    for (field, message) in errors.iter() {
        let mut current = &mut root;
        for segment in field.split('.') {
            current = current.properties.entry(segment.to_string()).or_default();
        }
        current.errors.push(message.to_string());
    }
    root
}

/// Format an [`ErrorMap`] into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ This field is required
///   → at name
/// ✖ Please enter a valid email address
///   → at contact.email
/// ```
pub fn prettify_errors(errors: &ErrorMap) -> String {
    let mut lines = Vec::new();
    for (field, message) in errors.iter() {
        lines.push(format!("✖ {}", message));
        lines.push(format!("  → at {}", field));
    }
    lines.join("\n")
}
