//! Run-wide accumulators.
//!
//! Both tables are append-only while files are visited and are read once at
//! the end of the run. Hosts that visit files in parallel give each worker
//! its own tables and `merge` them afterwards.

use crate::descriptor::ClassMetadata;
use indexmap::IndexMap;

/// Canonical type name (`<module path>#<Name>`) -> import specifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeImportTable {
    entries: IndexMap<String, String>,
}

impl TypeImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `canonical` is imported from. The first specifier
    /// recorded for a name is kept.
    pub fn record(&mut self, canonical: impl Into<String>, specifier: impl Into<String>) -> bool {
        match self.entries.entry(canonical.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(specifier.into());
                true
            }
        }
    }

    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.entries.get(canonical).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct specifiers in first-recorded order.
    pub fn specifiers(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for specifier in self.entries.values() {
            seen.insert(specifier.as_str());
        }
        seen.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append another shard's entries; existing names keep their specifier.
    pub fn merge(&mut self, other: TypeImportTable) {
        for (canonical, specifier) in other.entries {
            self.record(canonical, specifier);
        }
    }
}

/// File key -> class name -> class metadata.
///
/// File keys are import specifiers relative to `pathToSource`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedRegistry {
    files: IndexMap<String, IndexMap<String, ClassMetadata>>,
}

impl CollectedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a class. A class name already present under the same file key
    /// keeps its first metadata; returns whether `metadata` was stored.
    pub fn insert(
        &mut self,
        file_key: impl Into<String>,
        class_name: impl Into<String>,
        metadata: ClassMetadata,
    ) -> bool {
        let classes = self.files.entry(file_key.into()).or_default();
        match classes.entry(class_name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(metadata);
                true
            }
        }
    }

    pub fn get(&self, file_key: &str, class_name: &str) -> Option<&ClassMetadata> {
        self.files.get(file_key)?.get(class_name)
    }

    pub fn classes(&self, file_key: &str) -> Option<&IndexMap<String, ClassMetadata>> {
        self.files.get(file_key)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &IndexMap<String, ClassMetadata>)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append another shard's classes in its order.
    pub fn merge(&mut self, other: CollectedRegistry) {
        for (file_key, classes) in other.files {
            for (class_name, metadata) in classes {
                self.insert(file_key.clone(), class_name, metadata);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
