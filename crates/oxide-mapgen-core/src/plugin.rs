//! Extension hook invoked at the end of table initialization.

use std::fmt;
use std::sync::Arc;

use crate::introspected_table::IntrospectedTable;

/// An external collaborator that observes or adjusts tables once every
/// derived attribute and the rule strategy are in place.
///
/// Plugins may rewrite attributes, use the table's attribute bag, or swap the
/// rule strategy through [`IntrospectedTable::replace_rules`].
pub trait Plugin: Send + Sync {
    /// Returns the plugin name (used in diagnostics).
    fn name(&self) -> &str;

    /// Called after `initialize` has derived all attributes for `table`.
    fn initialized(&self, _table: &mut IntrospectedTable) {}
}

/// The ordered set of plugins registered on a context.
#[derive(Clone, Default)]
pub struct Plugins {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Plugins {
    /// Registers a plugin; plugins run in registration order.
    pub fn add(&mut self, plugin: impl Plugin + 'static) {
        self.plugins.push(Arc::new(plugin));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Notifies every plugin that `table` finished initializing.
    pub fn initialized(&self, table: &mut IntrospectedTable) {
        for plugin in &self.plugins {
            plugin.initialized(table);
        }
    }
}

impl fmt::Debug for Plugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|p| p.name()))
            .finish()
    }
}
