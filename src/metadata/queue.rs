//! Priority worklist of provider names.
//!
//! Entries pop in ascending `(weight, sequence)` order. Caller weights are
//! negated on the way in, so a larger caller weight pops earlier, and equal
//! weights pop in insertion order. Re-adding a name drops its old entry and
//! takes a fresh sequence number.

use std::collections::{BTreeMap, HashMap};

use idforged_parser::Identifier;

/// Ordered queue of provider names for one resolution.
#[derive(Debug, Default, Clone)]
pub struct ProviderQueue {
    entries: BTreeMap<(i64, u64), String>,
    positions: HashMap<String, (i64, u64)>,
    sequence: u64,
}

impl ProviderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a queue with every configured name at equal weight, in order.
    ///
    /// Identifier-specific weighting is not applied; configured order alone
    /// decides which source is trusted first.
    pub fn build_for<S: AsRef<str>>(_identifier: &Identifier, names: &[S]) -> Self {
        let mut queue = Self::new();
        for name in names {
            queue.add(name.as_ref(), None);
        }
        queue
    }

    /// Insert `name`, replacing any entry it already has. Absent weight is 0.
    pub fn add(&mut self, name: impl Into<String>, weight: Option<i64>) {
        let name = name.into();
        if let Some(key) = self.positions.remove(&name) {
            self.entries.remove(&key);
        }

        let key = (weight.unwrap_or(0).saturating_neg(), self.sequence);
        self.sequence += 1;

        self.entries.insert(key, name.clone());
        self.positions.insert(name, key);
    }

    /// Remove and return the next name, or `None` when the queue is empty.
    pub fn pop(&mut self) -> Option<String> {
        let (_, name) = self.entries.pop_first()?;
        self.positions.remove(&name);
        Some(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Iterator for ProviderQueue {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: ProviderQueue) -> Vec<String> {
        queue.collect()
    }

    #[test]
    fn empty_queue_pops_none() {
        let mut queue = ProviderQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn equal_weights_keep_insertion_order() {
        let mut queue = ProviderQueue::new();
        queue.add("a", None);
        queue.add("b", Some(0));
        queue.add("c", None);
        assert_eq!(drain(queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn larger_weight_pops_first() {
        let mut queue = ProviderQueue::new();
        queue.add("low", Some(1));
        queue.add("high", Some(10));
        queue.add("none", None);
        queue.add("negative", Some(-5));
        assert_eq!(drain(queue), vec!["high", "low", "none", "negative"]);
    }

    #[test]
    fn re_adding_replaces_entry() {
        let mut queue = ProviderQueue::new();
        queue.add("a", None);
        queue.add("b", None);
        queue.add("a", None);
        assert_eq!(queue.len(), 2);
        assert_eq!(drain(queue), vec!["b", "a"]);
    }

    #[test]
    fn re_adding_with_new_weight_moves_entry() {
        let mut queue = ProviderQueue::new();
        queue.add("a", None);
        queue.add("b", None);
        queue.add("b", Some(3));
        assert_eq!(drain(queue), vec!["b", "a"]);
    }

    #[test]
    fn extreme_weights_do_not_overflow() {
        let mut queue = ProviderQueue::new();
        queue.add("min", Some(i64::MIN));
        queue.add("max", Some(i64::MAX));
        assert_eq!(drain(queue), vec!["max", "min"]);
    }

    #[test]
    fn pop_order_is_non_decreasing_in_internal_weight() {
        let weights = [3, -1, 7, 0, 3, 7, -2, 0, 5];
        let mut queue = ProviderQueue::new();
        for (i, w) in weights.iter().enumerate() {
            queue.add(format!("p{i}"), Some(*w));
        }

        let order = drain(queue);
        let popped: Vec<i64> = order
            .iter()
            .map(|name| {
                let i: usize = name[1..].parse().unwrap();
                -weights[i]
            })
            .collect();
        assert!(popped.windows(2).all(|w| w[0] <= w[1]));
        // Ties pop in insertion order.
        let sevens: Vec<_> = order.iter().filter(|n| *n == "p2" || *n == "p5").collect();
        assert_eq!(sevens, vec!["p2", "p5"]);
    }

    #[test]
    fn build_for_uses_configured_order() {
        let id = Identifier::new("ABP-454").unwrap();
        let queue = ProviderQueue::build_for(&id, &["remote", "local", "mirror"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(drain(queue), vec!["remote", "local", "mirror"]);
    }
}
