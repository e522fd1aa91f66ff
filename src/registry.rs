//! Insertion-ordered named stores.
//!
//! Each engine instance owns one store per category (propstrings, patterns,
//! replacements, parsers, templates). Stores are purely in-memory and private
//! to the instance; nothing is shared across engines and no entry is removed
//! implicitly — only an explicit overwrite by name mutates an entry.

/// A named store that preserves insertion order.
///
/// Overwriting an existing name replaces the value but keeps the entry's
/// original position, so `names()` stays stable across overwrites.
#[derive(Clone, Debug)]
pub(crate) struct Store<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Store { entries: Vec::new() }
    }
}

impl<T> Store<T> {
    pub fn set(&mut self, name: &str, value: T) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Registry categories, for listing stored names via
/// [`Strings::names`](crate::Strings::names).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Propstrings,
    Patterns,
    Replacements,
    Parsers,
    Templates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut store: Store<u32> = Store::default();
        store.set("b", 1);
        store.set("a", 2);
        store.set("c", 3);

        assert_eq!(store.names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut store: Store<&str> = Store::default();
        store.set("first", "1");
        store.set("second", "2");
        store.set("first", "one");

        assert_eq!(store.get("first"), Some(&"one"));
        assert_eq!(store.names(), vec!["first", "second"]);
    }

    #[test]
    fn missing_name_is_none() {
        let store: Store<String> = Store::default();
        assert!(store.get("nope").is_none());
    }
}
