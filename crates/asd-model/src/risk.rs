//! Stability risk flags.

/// Ordered, duplicate-free list of free-text risk labels.
///
/// Flags can only be added. Adding a label already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskFlags {
    flags: Vec<String>,
}

impl RiskFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `flag` unless an identical label exists.
    ///
    /// Returns `true` when the flag was added.
    pub fn add(&mut self, flag: impl Into<String>) -> bool {
        let flag = flag.into();
        if self.contains(&flag) {
            return false;
        }
        self.flags.push(flag);
        true
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.flags
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.flags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for RiskFlags {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for flag in iter {
            self.add(flag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_ignored() {
        let mut flags = RiskFlags::new();
        assert!(flags.add("Low Tg margin"));
        assert!(!flags.add("Low Tg margin"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut flags = RiskFlags::new();
        flags.add("high hygroscopicity");
        flags.add("Low Tg margin");
        flags.add("high hygroscopicity");
        let collected: Vec<&str> = flags.iter().collect();
        assert_eq!(collected, ["high hygroscopicity", "Low Tg margin"]);
    }

    #[test]
    fn match_is_exact_text() {
        let mut flags = RiskFlags::new();
        flags.add("low tg margin");
        flags.add("Low Tg margin");
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn extend_deduplicates() {
        let mut flags = RiskFlags::new();
        flags.extend(["a", "b", "a", "c"]);
        assert_eq!(flags.as_slice(), ["a", "b", "c"]);
    }
}
