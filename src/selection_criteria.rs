use std::{fmt, str::FromStr, time::Duration};

use serde::{ser::SerializeMap, Serialize, Serializer};
use typed_builder::TypedBuilder;

use crate::{
    connection_string::convert::UriEnum,
    error::{Error, Result, ValueType},
    serde_util,
};

/// Which members of a replica set are eligible to serve a read operation.
///
/// See the [MongoDB docs](https://www.mongodb.com/docs/manual/core/read-preference) for more details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, derive_more::Display)]
#[non_exhaustive]
pub enum ReadPreferenceMode {
    /// Only route this operation to the primary.
    #[default]
    #[display("primary")]
    Primary,

    /// Route this operation to the primary if it's available, but fall back to the secondaries if
    /// not.
    #[display("primaryPreferred")]
    PrimaryPreferred,

    /// Only route this operation to a secondary.
    #[display("secondary")]
    Secondary,

    /// Route this operation to a secondary if one is available, but fall back to the primary if
    /// not.
    #[display("secondaryPreferred")]
    SecondaryPreferred,

    /// Route this operation to the node with the least network latency regardless of whether it's
    /// the primary or a secondary.
    #[display("nearest")]
    Nearest,
}

impl UriEnum for ReadPreferenceMode {
    const TYPE_NAME: &'static str = "ReadPreferenceMode";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("primary", Self::Primary),
        ("primaryPreferred", Self::PrimaryPreferred),
        ("secondary", Self::Secondary),
        ("secondaryPreferred", Self::SecondaryPreferred),
        ("nearest", Self::Nearest),
    ];
}

impl ReadPreferenceMode {
    /// Looks up a mode by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as UriEnum>::lookup(name)
    }

    /// The canonical camelCase name of the mode.
    pub fn as_str(&self) -> &'static str {
        <Self as UriEnum>::name_of(*self)
    }
}

impl FromStr for ReadPreferenceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::invalid_option_value("readPreference", s, ValueType::Enum(Self::TYPE_NAME))
        })
    }
}

/// A single `name:value` label attached to a replica set member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The tag's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag's value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// A read preference tag set: the tags from one `readPreferenceTags` occurrence, in the order
/// they were written. Adding a tag that is already present has no effect.
///
/// See the documentation [here](https://www.mongodb.com/docs/manual/tutorial/configure-replica-set-tag-sets/) for more details.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    /// Creates an empty tag set, which matches every member.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag to the set. Returns false if an identical tag was already present.
    pub fn add(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// The value of the first tag with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.value.as_str())
    }

    /// Iterates over the tags in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// The number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set has no tags, in which case it matches every member.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut tag_set = TagSet::new();
        for tag in iter {
            tag_set.add(tag);
        }
        tag_set
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

impl Serialize for TagSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.tags.len()))?;
        for tag in &self.tags {
            map.serialize_entry(&tag.name, &tag.value)?;
        }
        map.end()
    }
}

/// Specifies how reads should be routed to members of a replica set, as assembled from the
/// `readPreference`, `readPreferenceTags` and `secondaryAcceptableLatency` connection string
/// options.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, TypedBuilder, Serialize)]
#[builder(field_defaults(default, setter(into)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadPreference {
    /// Which members are eligible.
    #[serde(serialize_with = "serialize_mode")]
    pub mode: ReadPreferenceMode,

    /// Tag sets checked in order until one matches at least one eligible member.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_sets: Vec<TagSet>,

    /// How much slower than the fastest eligible member another member may be and still be
    /// selected.
    #[serde(
        rename = "secondaryAcceptableLatencyMS",
        serialize_with = "serde_util::serialize_duration_option_as_int_millis"
    )]
    pub secondary_acceptable_latency: Option<Duration>,
}

fn serialize_mode<S: Serializer>(
    mode: &ReadPreferenceMode,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.as_str())
}

impl fmt::Display for ReadPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mode = self.mode.to_string();
        mode[0..1].make_ascii_uppercase();
        write!(f, "{{ Mode: {}", mode)?;

        if !self.tag_sets.is_empty() {
            let tag_sets: Vec<String> = self.tag_sets.iter().map(ToString::to_string).collect();
            write!(f, ", Tag Sets: [{}]", tag_sets.join("], ["))?;
        }
        if let Some(ref latency) = self.secondary_acceptable_latency {
            write!(f, ", Secondary Acceptable Latency: {:?}", latency)?;
        }

        write!(f, " }}")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{ReadPreference, ReadPreferenceMode, Tag, TagSet};

    #[test]
    fn mode_lookup_ignores_case() {
        assert_eq!(
            ReadPreferenceMode::from_name("SECONDARYpreferred"),
            Some(ReadPreferenceMode::SecondaryPreferred)
        );
        assert_eq!(ReadPreferenceMode::from_name("tertiary"), None);

        let err = "tertiary".parse::<ReadPreferenceMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "readPreference has an invalid ReadPreferenceMode value of tertiary."
        );
    }

    #[test]
    fn tag_set_ignores_identical_tags() {
        let tag_set: TagSet = [
            Tag::new("dc", "ny"),
            Tag::new("rack", "1"),
            Tag::new("dc", "ny"),
            Tag::new("dc", "sf"),
        ]
        .into_iter()
        .collect();

        assert_eq!(tag_set.len(), 3);
        assert_eq!(tag_set.get("dc"), Some("ny"));
        assert_eq!(tag_set.to_string(), "dc:ny,rack:1,dc:sf");
    }

    #[test]
    fn read_preference_display() {
        let read_pref = ReadPreference::builder()
            .mode(ReadPreferenceMode::Nearest)
            .tag_sets(vec![[Tag::new("dc", "ny")].into_iter().collect::<TagSet>()])
            .build();

        assert_eq!(read_pref.to_string(), "{ Mode: Nearest, Tag Sets: [dc:ny] }");
    }

    #[test]
    fn read_preference_serializes_in_camel_case() {
        let read_pref = ReadPreference::builder()
            .mode(ReadPreferenceMode::SecondaryPreferred)
            .tag_sets(vec![[Tag::new("dc", "ny")].into_iter().collect::<TagSet>()])
            .secondary_acceptable_latency(std::time::Duration::from_millis(15))
            .build();

        assert_eq!(
            serde_json::to_value(&read_pref).unwrap(),
            serde_json::json!({
                "mode": "secondaryPreferred",
                "tagSets": [{ "dc": "ny" }],
                "secondaryAcceptableLatencyMS": 15,
            })
        );
    }
}
