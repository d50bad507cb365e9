//! Expected-output patterns and scripted exchanges.
//!
//! A [`Patterns`] value is a set of substrings that must *all* appear in a
//! session's output. Order among them does not matter and overlapping
//! entries are fine. The empty string (or an empty list) is the empty set,
//! which every output satisfies.

/// A set of required substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patterns {
    items: Vec<String>,
}

impl Patterns {
    /// The empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self { items: Vec::new() }
    }

    /// Whether there is nothing to wait for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The required substrings.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of entries present in `output`.
    #[must_use]
    pub fn count_matched(&self, output: &str) -> usize {
        self.items.iter().filter(|p| output.contains(p.as_str())).count()
    }

    /// Whether every entry is present in `output`.
    #[must_use]
    pub fn all_present(&self, output: &str) -> bool {
        self.items.iter().all(|p| output.contains(p.as_str()))
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        if pattern.is_empty() {
            Self::none()
        } else {
            Self {
                items: vec![pattern.to_string()],
            }
        }
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Self::from(pattern.as_str())
    }
}

impl From<&String> for Patterns {
    fn from(pattern: &String) -> Self {
        Self::from(pattern.as_str())
    }
}

impl From<Vec<String>> for Patterns {
    fn from(items: Vec<String>) -> Self {
        Self { items }
    }
}

impl From<Vec<&str>> for Patterns {
    fn from(items: Vec<&str>) -> Self {
        Self::from(items.as_slice())
    }
}

impl From<&[&str]> for Patterns {
    fn from(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Patterns {
    fn from(items: [&str; N]) -> Self {
        Self::from(items.as_slice())
    }
}

/// One scripted step: keys to send, then output to wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Bytes written to the terminal.
    pub input: String,
    /// Output required after the input.
    pub output: Patterns,
}

impl Exchange {
    /// Create a step.
    pub fn new(input: impl Into<String>, output: impl Into<Patterns>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// An ordered list of [`Exchange`] steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchanges(Vec<Exchange>);

impl Exchanges {
    /// No steps.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Whether there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Exchange> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Exchanges {
    type Item = &'a Exchange;
    type IntoIter = std::slice::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Exchange> for Exchanges {
    fn from(step: Exchange) -> Self {
        Self(vec![step])
    }
}

impl From<Vec<Exchange>> for Exchanges {
    fn from(steps: Vec<Exchange>) -> Self {
        Self(steps)
    }
}

impl<const N: usize> From<[Exchange; N]> for Exchanges {
    fn from(steps: [Exchange; N]) -> Self {
        Self(steps.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_string_is_empty_set() {
        assert!(Patterns::from("").is_empty());
        assert!(Patterns::from(Vec::<String>::new()).is_empty());
        assert!(Patterns::none().all_present(""));
    }

    #[test]
    fn all_entries_required_in_any_order() {
        let patterns = Patterns::from(["You selected", "Item B"]);
        assert!(patterns.all_present("You selected Item B\r\n"));
        assert!(patterns.all_present("Item B ... You selected"));
        assert!(!patterns.all_present("You selected Item C"));
        assert_eq!(patterns.count_matched("You selected Item C"), 1);
    }

    #[test]
    fn overlapping_entries() {
        let patterns = Patterns::from(["Item", "Item A", "m A"]);
        assert!(patterns.all_present("> Item A"));
    }

    #[test]
    fn single_exchange_is_one_step() {
        let steps = Exchanges::from(Exchange::new("\n", "done"));
        assert_eq!(steps.len(), 1);
        let step = steps.iter().next().unwrap();
        assert_eq!(step.input, "\n");
        assert_eq!(step.output.items(), ["done"]);
    }

    proptest! {
        #[test]
        fn output_built_from_patterns_matches(items in proptest::collection::vec("[a-z]{1,6}", 0..5)) {
            let output = items.join(" | ");
            let patterns = Patterns::from(items.clone());
            prop_assert!(patterns.all_present(&output));
            prop_assert_eq!(patterns.count_matched(&output), items.len());
        }
    }
}
