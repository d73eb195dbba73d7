//! Ordered, append-only benchmark registry.
//!
//! Entries keep registration order, which is also display order. Names are
//! not deduplicated: registering the same name twice yields two rows.

use regex::Regex;

use crate::context::Trial;
use crate::error::{BenchError, BenchResult};

/// Filter value that selects every benchmark.
pub const MATCH_ALL: &str = "all";

/// A benchmark body: runs `iterations` repetitions of the measured work.
///
/// Borrowed, never owned, by the registry.
pub type BenchFn<'a> = &'a dyn Fn(&mut Trial, u64);

/// A named benchmark.
#[derive(Clone, Copy)]
pub struct Benchmark<'a> {
    name: &'a str,
    body: BenchFn<'a>,
}

impl<'a> Benchmark<'a> {
    pub fn new(name: &'a str, body: BenchFn<'a>) -> Self {
        Self { name, body }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Execute one trial of `iterations` repetitions.
    pub fn run(&self, trial: &mut Trial, iterations: u64) {
        (self.body)(trial, iterations)
    }
}

impl std::fmt::Debug for Benchmark<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Compiled name filter with whole-name matching.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile `pattern`. `"all"` selects everything.
    pub fn new(pattern: &str) -> BenchResult<Self> {
        let invalid = |source| BenchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };

        let expr = if pattern == MATCH_ALL { ".*" } else { pattern };

        // Compile bare first so an unbalanced pattern cannot be rescued by
        // the anchoring group.
        Regex::new(expr).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{})$", expr)).map_err(invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as given by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `name` matches in full.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Registry of benchmarks in registration order.
#[derive(Debug, Default)]
pub struct BenchmarkRegistry<'a> {
    benchmarks: Vec<Benchmark<'a>>,
}

impl<'a> BenchmarkRegistry<'a> {
    /// Create an empty registry. Nothing is allocated until the first
    /// registration.
    pub fn new() -> Self {
        Self {
            benchmarks: Vec::new(),
        }
    }

    /// Append a benchmark.
    pub fn register(&mut self, name: &'a str, body: BenchFn<'a>) {
        tracing::trace!(name, index = self.benchmarks.len(), "Registered benchmark");
        self.benchmarks.push(Benchmark::new(name, body));
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[Benchmark<'a>] {
        &self.benchmarks
    }

    /// Entries whose name matches `pattern`, in registration order.
    pub fn matching<'r>(
        &'r self,
        pattern: &'r NamePattern,
    ) -> impl Iterator<Item = &'r Benchmark<'a>> + 'r {
        self.benchmarks
            .iter()
            .filter(move |b| pattern.matches(b.name))
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&'a str> {
        self.benchmarks.iter().map(|b| b.name).collect()
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Trial, _: u64) {}

    #[test]
    fn test_register_keeps_order() {
        let mut registry = BenchmarkRegistry::new();
        registry.register("BM_B", &noop);
        registry.register("BM_A", &noop);
        registry.register("BM_C", &noop);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["BM_B", "BM_A", "BM_C"]);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut registry = BenchmarkRegistry::new();
        registry.register("BM_Same", &noop);
        registry.register("BM_Same", &noop);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_entries_follow_insertion_order() {
        let mut registry = BenchmarkRegistry::new();
        registry.register("BM_Z", &noop);
        registry.register("BM_A", &noop);
        registry.register("BM_Z", &noop);

        let names: Vec<_> = registry.entries().iter().map(|b| b.name()).collect();
        assert_eq!(names, ["BM_Z", "BM_A", "BM_Z"]);
    }

    #[test]
    fn test_empty_registry_does_not_allocate() {
        let registry = BenchmarkRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.benchmarks.capacity(), 0);
    }

    #[test]
    fn test_pattern_is_full_match() {
        let pattern = NamePattern::new("BM_Conv").unwrap();
        assert!(pattern.matches("BM_Conv"));
        assert!(!pattern.matches("BM_Conv2D"));
        assert!(!pattern.matches("XBM_Conv"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = NamePattern::new("BM_A|BM_B").unwrap();
        assert!(pattern.matches("BM_A"));
        assert!(pattern.matches("BM_B"));
        assert!(!pattern.matches("BM_AB"));
    }

    #[test]
    fn test_all_matches_everything() {
        let pattern = NamePattern::new(MATCH_ALL).unwrap();
        assert!(pattern.matches("anything"));
        assert!(pattern.matches(""));
        assert_eq!(pattern.as_str(), "all");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NamePattern::new("BM_(").unwrap_err();
        assert!(matches!(err, BenchError::InvalidPattern { ref pattern, .. } if pattern == "BM_("));
    }

    #[test]
    fn test_unbalanced_close_is_rejected() {
        // "a)(b" would be valid once wrapped in an anchoring group.
        assert!(NamePattern::new("a)(b").is_err());
    }

    #[test]
    fn test_matching_preserves_order() {
        let mut registry = BenchmarkRegistry::new();
        registry.register("BM_CONCAT_1", &noop);
        registry.register("BM_ADD", &noop);
        registry.register("BM_CONCAT_2", &noop);

        let pattern = NamePattern::new("BM_CONCAT_.*").unwrap();
        let names: Vec<_> = registry.matching(&pattern).map(|b| b.name()).collect();
        assert_eq!(names, vec!["BM_CONCAT_1", "BM_CONCAT_2"]);
    }
}
