use crate::core::record::{FieldValue, Record};

/// One named dimension of filtering.
///
/// Every kind has a default sentinel that means "do not filter on this
/// field": an empty or whitespace-only query, an empty or `"All"` category,
/// a zero threshold, a range equal to its full bounds, an empty required
/// set, an off flag. Callers pass criteria straight from UI state and rely
/// on inactive ones being skipped.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Case-insensitive substring match against one or more text fields.
    Text {
        fields: &'static [&'static str],
        query: String,
    },
    /// Exact match against a text field. Empty and `"All"`/`"all"` are
    /// sentinels for inactive.
    Equals {
        field: &'static str,
        value: String,
    },
    /// `record.field >= threshold`. A threshold of zero is inactive.
    AtLeast {
        field: &'static str,
        threshold: f64,
    },
    /// `lo <= record.field <= hi`. Inactive while the range still equals
    /// the full default bounds.
    Within {
        field: &'static str,
        range: (f64, f64),
        full: (f64, f64),
    },
    /// The record's tag list must contain **all** requested values, not any.
    HasAll {
        field: &'static str,
        required: Vec<String>,
    },
    /// Exact match when on; a one-directional toggle, inactive when off.
    Enabled {
        field: &'static str,
        on: bool,
    },
}

impl Criterion {
    /// Whether this criterion participates in filtering at all.
    pub fn is_active(&self) -> bool {
        match self {
            Criterion::Text { query, .. } => !query.trim().is_empty(),
            Criterion::Equals { value, .. } => {
                !value.is_empty() && !value.eq_ignore_ascii_case("all")
            }
            Criterion::AtLeast { threshold, .. } => *threshold > 0.0,
            Criterion::Within { range, full, .. } => range != full,
            Criterion::HasAll { required, .. } => !required.is_empty(),
            Criterion::Enabled { on, .. } => *on,
        }
    }

    fn field_names(&self) -> &[&'static str] {
        match self {
            Criterion::Text { fields, .. } => fields,
            Criterion::Equals { field, .. }
            | Criterion::AtLeast { field, .. }
            | Criterion::Within { field, .. }
            | Criterion::HasAll { field, .. }
            | Criterion::Enabled { field, .. } => std::slice::from_ref(field),
        }
    }

    /// Evaluate this criterion against a record.
    ///
    /// A field that is absent or of the wrong kind never matches; malformed
    /// records are silently excluded rather than failing the whole query.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            Criterion::Text { fields, query } => {
                let needle = query.trim().to_lowercase();
                fields.iter().any(|field| match record.field(field) {
                    Some(FieldValue::Text(text)) => text.to_lowercase().contains(&needle),
                    _ => false,
                })
            }
            Criterion::Equals { field, value } => match record.field(field) {
                Some(FieldValue::Text(text)) => text == value,
                _ => false,
            },
            Criterion::AtLeast { field, threshold } => match record.field(field) {
                Some(FieldValue::Number(n)) => n >= *threshold,
                _ => false,
            },
            Criterion::Within { field, range, .. } => match record.field(field) {
                Some(FieldValue::Number(n)) => range.0 <= n && n <= range.1,
                _ => false,
            },
            Criterion::HasAll { field, required } => match record.field(field) {
                Some(FieldValue::Tags(tags)) => {
                    required.iter().all(|want| tags.iter().any(|tag| tag == want))
                }
                _ => false,
            },
            Criterion::Enabled { field, .. } => {
                matches!(record.field(field), Some(FieldValue::Flag(true)))
            }
        }
    }
}

/// The logical AND of all active criteria in a filter specification.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    active: Vec<Criterion>,
}

impl Predicate {
    /// Build a predicate for records of type `T`, dropping inactive
    /// criteria. A criterion naming a field `T` does not declare is a caller
    /// bug and fails fast in debug builds.
    pub fn new<T: Record>(criteria: Vec<Criterion>) -> Self {
        for criterion in &criteria {
            for name in criterion.field_names() {
                debug_assert!(
                    T::FIELDS.contains(name),
                    "criterion references unknown field `{}`",
                    name
                );
            }
        }

        Self {
            active: criteria.into_iter().filter(Criterion::is_active).collect(),
        }
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.active.iter().all(|criterion| criterion.matches(record))
    }

    /// True when no criterion is active, i.e. every record passes.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
