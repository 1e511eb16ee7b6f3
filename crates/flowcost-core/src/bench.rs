//! Benchmark descriptors and the name-ordered [`Registry`].

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::fixtures::Fixtures;
use crate::sink::Sink;

/// A benchmark body: one logical operation plus at least one write to the
/// sink on every path that models work.
///
/// Bodies are plain function pointers so the runner can hide them behind
/// [`std::hint::black_box`] and stop the optimizer from inlining them into
/// the timing loop.
pub type BenchFn = fn(&mut Sink, &Fixtures);

/// A named benchmark body.
///
/// The iteration count is not part of the descriptor; the runner chooses
/// it per round.
#[derive(Clone, Copy, Debug)]
pub struct BenchDescriptor {
    /// Unique name, used for selection and report lines.
    pub name: &'static str,
    /// One-line description of the construct being measured.
    pub summary: &'static str,
    /// The measured body.
    pub body: BenchFn,
}

impl BenchDescriptor {
    /// Create a descriptor.
    pub const fn new(name: &'static str, summary: &'static str, body: BenchFn) -> Self {
        Self {
            name,
            summary,
            body,
        }
    }

    /// Whether `pattern` selects this benchmark (plain substring match).
    pub fn matches(&self, pattern: &str) -> bool {
        self.name.contains(pattern)
    }
}

/// Registered benchmarks, iterated in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    benches: IndexMap<&'static str, BenchDescriptor>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a slice of descriptors.
    ///
    /// # Errors
    ///
    /// Fails on the first empty or duplicate name.
    pub fn from_descriptors(descriptors: &[BenchDescriptor]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for &d in descriptors {
            registry.register(d)?;
        }
        Ok(registry)
    }

    /// Add a descriptor.
    pub fn register(&mut self, descriptor: BenchDescriptor) -> Result<(), RegistryError> {
        if descriptor.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.benches.contains_key(descriptor.name) {
            return Err(RegistryError::DuplicateName {
                name: descriptor.name,
            });
        }
        self.benches.insert(descriptor.name, descriptor);
        Ok(())
    }

    /// Look up a descriptor by exact name.
    pub fn get(&self, name: &str) -> Option<&BenchDescriptor> {
        self.benches.get(name)
    }

    /// All descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BenchDescriptor> {
        self.benches.values()
    }

    /// Descriptors selected by `pattern`, in registration order.
    ///
    /// `None` or an empty pattern selects everything.
    pub fn select(&self, pattern: Option<&str>) -> Vec<&BenchDescriptor> {
        match pattern {
            Some(p) if !p.is_empty() => self.iter().filter(|d| d.matches(p)).collect(),
            _ => self.iter().collect(),
        }
    }

    /// Number of registered benchmarks.
    pub fn len(&self) -> usize {
        self.benches.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.benches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bump(sink: &mut Sink, _: &Fixtures) {
        sink.inc();
    }

    fn drop_one(sink: &mut Sink, _: &Fixtures) {
        sink.dec();
    }

    fn sample_registry() -> Registry {
        Registry::from_descriptors(&[
            BenchDescriptor::new("select_a", "a", bump),
            BenchDescriptor::new("switch", "b", drop_one),
            BenchDescriptor::new("select_b", "c", bump),
        ])
        .unwrap()
    }

    #[test]
    fn registration_order_is_preserved() {
        let r = sample_registry();
        let names: Vec<_> = r.iter().map(|d| d.name).collect();
        assert_eq!(names, ["select_a", "switch", "select_b"]);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut r = sample_registry();
        let err = r
            .register(BenchDescriptor::new("switch", "again", bump))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName { name: "switch" });
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn empty_name_rejected() {
        let mut r = Registry::new();
        assert_eq!(
            r.register(BenchDescriptor::new("", "nameless", bump)),
            Err(RegistryError::EmptyName)
        );
        assert!(r.is_empty());
    }

    #[test]
    fn select_by_substring() {
        let r = sample_registry();
        let picked: Vec<_> = r.select(Some("select")).iter().map(|d| d.name).collect();
        assert_eq!(picked, ["select_a", "select_b"]);
        assert!(r.select(Some("nothing")).is_empty());
        assert_eq!(r.select(None).len(), 3);
        assert_eq!(r.select(Some("")).len(), 3);
    }

    #[test]
    fn get_returns_registered_body() {
        let r = sample_registry();
        let fixtures = Fixtures::build().unwrap();
        let mut sink = Sink::new();
        (r.get("switch").unwrap().body)(&mut sink, &fixtures);
        (r.get("select_a").unwrap().body)(&mut sink, &fixtures);
        (r.get("select_a").unwrap().body)(&mut sink, &fixtures);
        assert_eq!(sink.get(), 1);
        assert!(r.get("missing").is_none());
    }

    proptest! {
        #[test]
        fn selection_is_exactly_the_matching_names(pattern in "[a-z_]{0,4}") {
            let r = sample_registry();
            let picked: Vec<_> = r.select(Some(&pattern)).iter().map(|d| d.name).collect();
            let expected: Vec<_> = r
                .iter()
                .map(|d| d.name)
                .filter(|n| pattern.is_empty() || n.contains(pattern.as_str()))
                .collect();
            prop_assert_eq!(picked, expected);
        }
    }
}
