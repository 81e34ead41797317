use chrono::{DateTime, Utc};

/// A single field value exposed by a record, as a tagged union.
///
/// Domain types stay plain immutable snapshots; the engine only sees them
/// through this enum, resolved per field name at the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
    Tags(&'a [String]),
    Instant(DateTime<Utc>),
}

/// A record the query engine can filter, sort, and aggregate.
///
/// `FIELDS` enumerates every field name the type answers to. The predicate
/// and comparator builders assert requested names against this list in debug
/// builds; in release, an unknown name simply yields `None`, which the
/// engine treats as "does not match" / "sorts first" so it stays total over
/// malformed data.
pub trait Record {
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Minimal record used by the core module tests.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Sample {
        pub name: String,
        pub rating: f64,
        pub tags: Vec<String>,
        pub featured: bool,
        pub listed_at: DateTime<Utc>,
    }

    impl Sample {
        pub fn new(name: &str, rating: f64) -> Self {
            Self {
                name: name.to_string(),
                rating,
                tags: vec![],
                featured: false,
                listed_at: Utc::now(),
            }
        }
    }

    impl Record for Sample {
        const FIELDS: &'static [&'static str] =
            &["name", "rating", "tags", "featured", "listed_at"];

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "name" => Some(FieldValue::Text(&self.name)),
                "rating" => Some(FieldValue::Number(self.rating)),
                "tags" => Some(FieldValue::Tags(&self.tags)),
                "featured" => Some(FieldValue::Flag(self.featured)),
                "listed_at" => Some(FieldValue::Instant(self.listed_at)),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Sample;
    use super::*;

    #[test]
    fn test_known_fields_resolve() {
        let sample = Sample::new("Skyline Lounge", 4.8);

        assert_eq!(
            sample.field("name"),
            Some(FieldValue::Text("Skyline Lounge"))
        );
        assert_eq!(sample.field("rating"), Some(FieldValue::Number(4.8)));
    }

    #[test]
    fn test_unknown_field_is_none() {
        let sample = Sample::new("Skyline Lounge", 4.8);

        assert_eq!(sample.field("no_such_field"), None);
    }
}
