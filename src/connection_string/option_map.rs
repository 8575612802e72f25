use std::fmt;

/// An ordered, case-insensitive multimap of raw connection string options.
///
/// Names keep the spelling of their first occurrence and are enumerated in first-seen order.
/// Every occurrence of a name is retained in input order: [`OptionMap::get`] returns the most
/// recent value, so a later occurrence overwrites an earlier one for lookups, while
/// [`OptionMap::get_all`] returns them all.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<OptionEntry>,
}

#[derive(Clone, PartialEq, Eq)]
struct OptionEntry {
    key: String,
    name: String,
    values: Vec<String>,
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

impl OptionMap {
    /// Records one occurrence of `name=value`.
    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        let key = normalize(name);
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.values.push(value.to_string()),
            None => self.entries.push(OptionEntry {
                key,
                name: name.to_string(),
                values: vec![value.to_string()],
            }),
        }
    }

    fn entry(&self, name: &str) -> Option<&OptionEntry> {
        let key = normalize(name);
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// The value of the last occurrence of `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .and_then(|entry| entry.values.last())
            .map(String::as_str)
    }

    /// Every value given for `name`, ignoring case, in input order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name)
            .map(|entry| entry.values.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `name` appeared at least once, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// The distinct option names, as first written, in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Each distinct name paired with its latest value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| {
            entry
                .values
                .last()
                .map(|value| (entry.name.as_str(), value.as_str()))
        })
    }

    /// The number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no options were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OptionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (&entry.name, &entry.values)),
            )
            .finish()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::OptionMap;

    #[test]
    fn lookups_ignore_case_and_latest_wins() {
        let mut options = OptionMap::default();
        options.insert("replicaSet", "rs0");
        options.insert("SSL", "true");
        options.insert("replicaset", "rs1");

        assert_eq!(options.get("REPLICASET"), Some("rs1"));
        assert_eq!(options.get_all("ReplicaSet"), ["rs0", "rs1"]);
        assert_eq!(options.names().collect::<Vec<_>>(), ["replicaSet", "SSL"]);
        assert_eq!(options.len(), 2);
        assert!(options.contains("ssl"));
        assert!(options.get("w").is_none());
        assert!(options.get_all("w").is_empty());
    }

    #[test]
    fn iter_yields_latest_values_in_first_seen_order() {
        let mut options = OptionMap::default();
        options.insert("w", "1");
        options.insert("j", "true");
        options.insert("W", "majority");

        assert_eq!(
            options.iter().collect::<Vec<_>>(),
            [("w", "majority"), ("j", "true")]
        );
    }
}
