//! Test components and their lifecycle bookkeeping.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::verdict::Verdict;

/// Reference of the system under test.
pub const SYSTEM_REF: &str = "system";
/// Reference of the host controller.
pub const HC_REF: &str = "hc";
/// Reference of the main test component.
pub const MTC_REF: &str = "mtc";

/// A test participant with its own lifeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestComponent {
    /// Component reference (`mtc`, `3`, ...)
    pub name: String,
    /// Name given at creation, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub verdict: Verdict,
    /// Ports currently mapped to the system
    pub ports: BTreeSet<String>,
}

impl TestComponent {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
            verdict: Verdict::None,
            ports: BTreeSet::new(),
        }
    }

    /// Alias if known, else the reference.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// All components seen in one test case, keyed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRegistry {
    components: BTreeMap<String, TestComponent>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Registry seeded with the system-level components.
    pub fn new() -> Self {
        let components = [SYSTEM_REF, HC_REF, MTC_REF]
            .into_iter()
            .map(|r| (r.to_string(), TestComponent::new(r, None)))
            .collect();
        Self { components }
    }

    /// Register a created component; a re-created reference is reset.
    pub fn create(&mut self, reference: &str, alias: Option<String>) -> &TestComponent {
        self.components
            .insert(reference.to_string(), TestComponent::new(reference, alias));
        &self.components[reference]
    }

    /// Look up a component, creating a bare entry on first sight.
    fn entry(&mut self, reference: &str) -> &mut TestComponent {
        self.components
            .entry(reference.to_string())
            .or_insert_with(|| TestComponent::new(reference, None))
    }

    pub fn set_verdict(&mut self, reference: &str, verdict: Verdict) {
        self.entry(reference).verdict = verdict;
    }

    pub fn map_port(&mut self, reference: &str, port: &str) {
        self.entry(reference).ports.insert(port.to_string());
    }

    pub fn unmap_port(&mut self, reference: &str, port: &str) {
        self.entry(reference).ports.remove(port);
    }

    pub fn get(&self, reference: &str) -> Option<&TestComponent> {
        self.components.get(reference)
    }

    pub fn alias_of(&self, reference: &str) -> Option<&str> {
        self.get(reference).and_then(|c| c.alias.as_deref())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestComponent> {
        self.components.values()
    }
}
