//! Structural equality, hashing, and rendering for value objects.
//!
//! A value object exposes its fields in declaration order through
//! [`ValueObject::fields`]. Equality and hashing walk that list; rendering
//! sorts it by field name so the output does not depend on declaration order.
//! The [`value_object!`] macro declares a value type and wires all of this up
//! from the field list alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::any::TypeId;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

const HASH_SEED: u64 = 123;
const HASH_MULTIPLIER: u64 = 111;
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Borrowed view of a single value object field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue<'a> {
    /// The field carries no value.
    Unset,
    /// Textual field content.
    Text(&'a str),
    /// Timestamp field content.
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Returns whether the field carries no value.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Timestamp(timestamp) => write!(f, "{}", timestamp.format(TIMESTAMP_FORMAT)),
        }
    }
}

/// Named field of a value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field name as declared on the type.
    pub name: &'static str,
    /// Current field content.
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Creates a named field view.
    #[must_use]
    pub const fn new(name: &'static str, value: FieldValue<'a>) -> Self {
        Self { name, value }
    }
}

/// Conversion of a stored field into its [`FieldValue`] view.
pub trait IntoFieldValue {
    /// Returns the borrowed view of this field.
    fn field_value(&self) -> FieldValue<'_>;
}

impl IntoFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl IntoFieldValue for Option<String> {
    fn field_value(&self) -> FieldValue<'_> {
        self.as_deref().map_or(FieldValue::Unset, FieldValue::Text)
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Timestamp(*self)
    }
}

impl IntoFieldValue for Option<DateTime<Utc>> {
    fn field_value(&self) -> FieldValue<'_> {
        self.map_or(FieldValue::Unset, FieldValue::Timestamp)
    }
}

/// Canonical form of a stored field. Blank text counts as unset.
pub(crate) trait NormalizeField {
    fn normalize(self) -> Self;
}

impl NormalizeField for String {
    fn normalize(self) -> Self {
        self.trim().to_owned()
    }
}

impl NormalizeField for Option<String> {
    fn normalize(self) -> Self {
        self.map(NormalizeField::normalize)
            .filter(|trimmed| !trimmed.is_empty())
    }
}

impl NormalizeField for DateTime<Utc> {
    fn normalize(self) -> Self {
        self
    }
}

impl NormalizeField for Option<DateTime<Utc>> {
    fn normalize(self) -> Self {
        self
    }
}

/// Deserializes a value object field into its canonical form.
pub(crate) fn deserialize_normalized<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + NormalizeField,
{
    T::deserialize(deserializer).map(NormalizeField::normalize)
}

/// Immutable data holder compared by field content.
pub trait ValueObject: 'static {
    /// Type name used when rendering the value.
    const TYPE_NAME: &'static str;

    /// Returns every field in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Compares two value objects field by field.
///
/// Returns `false` when either side is absent or the concrete types differ,
/// even if the field contents match. Stops at the first mismatching field.
#[must_use]
pub fn structurally_equal<A, B>(left: Option<&A>, right: Option<&B>) -> bool
where
    A: ValueObject,
    B: ValueObject,
{
    let (Some(left_value), Some(right_value)) = (left, right) else {
        return false;
    };
    if TypeId::of::<A>() != TypeId::of::<B>() {
        return false;
    }
    left_value
        .fields()
        .iter()
        .zip(right_value.fields().iter())
        .all(|(lhs, rhs)| lhs.value == rhs.value)
}

/// Combines the field hashes of a value object in declaration order.
#[must_use]
pub fn structural_hash<T: ValueObject>(value: &T) -> u64 {
    value.fields().iter().fold(HASH_SEED, |hash, field| {
        hash.wrapping_mul(HASH_MULTIPLIER) ^ field_hash(field.value)
    })
}

fn field_hash(value: FieldValue<'_>) -> u64 {
    if value.is_unset() {
        return 0;
    }
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Renders `TypeName(field: value; ...)` with fields sorted by name.
#[must_use]
pub fn describe<T: ValueObject>(value: &T) -> String {
    let mut fields = value.fields();
    fields.sort_by(|lhs, rhs| lhs.name.cmp(rhs.name));
    let body = fields
        .iter()
        .map(|field| format!("{}: {}", field.name, field.value))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{}({body})", T::TYPE_NAME)
}

/// Declares a value object type from its field list.
///
/// Generates the struct with private fields, one getter per field, and
/// structural `PartialEq`, `Eq`, `Hash` and `Display` implementations backed
/// by [`ValueObject`]. Deserialized fields pass through the same
/// normalisation as the constructors. Field types must implement
/// [`IntoFieldValue`].
macro_rules! value_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                #[serde(deserialize_with = "crate::value::deserialize_normalized")]
                $field: $ty,
            )*
        }

        impl $name {
            $(
                $(#[$field_meta])*
                #[must_use]
                pub const fn $field(&self) -> &$ty {
                    &self.$field
                }
            )*
        }

        impl $crate::value::ValueObject for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn fields(&self) -> Vec<$crate::value::Field<'_>> {
                vec![
                    $(
                        $crate::value::Field::new(
                            stringify!($field),
                            $crate::value::IntoFieldValue::field_value(&self.$field),
                        ),
                    )*
                ]
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::value::structurally_equal(Some(self), Some(other))
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64($crate::value::structural_hash(self));
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::value::describe(self))
            }
        }
    };
}

pub(crate) use value_object;

#[cfg(test)]
mod tests {
    use super::{FieldValue, describe, structural_hash, structurally_equal, value_object};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    value_object! {
        /// Value type declared in reverse alphabetical field order.
        struct Reversed {
            /// Z field.
            zulu: Option<String>,
            /// A field.
            alpha: Option<String>,
        }
    }

    value_object! {
        /// Same fields as [`Reversed`] under a different type.
        struct Twin {
            /// Z field.
            zulu: Option<String>,
            /// A field.
            alpha: Option<String>,
        }
    }

    fn reversed(zulu: Option<&str>, alpha: Option<&str>) -> Reversed {
        Reversed {
            zulu: zulu.map(str::to_owned),
            alpha: alpha.map(str::to_owned),
        }
    }

    #[rstest]
    fn equal_fields_compare_equal_and_hash_alike() {
        let left = reversed(Some("z"), Some("a"));
        let right = reversed(Some("z"), Some("a"));

        assert_eq!(left, right);
        assert_eq!(structural_hash(&left), structural_hash(&right));
    }

    #[rstest]
    #[case(Some("other"), Some("a"))]
    #[case(Some("z"), Some("other"))]
    #[case(None, Some("a"))]
    #[case(Some("z"), None)]
    fn any_field_change_breaks_equality(#[case] zulu: Option<&str>, #[case] alpha: Option<&str>) {
        assert_ne!(reversed(Some("z"), Some("a")), reversed(zulu, alpha));
    }

    #[rstest]
    fn unset_fields_compare_equal() {
        assert_eq!(reversed(None, None), reversed(None, None));
    }

    #[rstest]
    fn absent_operand_is_never_equal() {
        let value = reversed(Some("z"), Some("a"));

        assert!(!structurally_equal::<Reversed, Reversed>(Some(&value), None));
        assert!(!structurally_equal::<Reversed, Reversed>(None, Some(&value)));
        assert!(!structurally_equal::<Reversed, Reversed>(None, None));
    }

    #[rstest]
    fn different_types_with_same_fields_are_not_equal() {
        let left = reversed(Some("z"), Some("a"));
        let right = Twin {
            zulu: Some("z".to_owned()),
            alpha: Some("a".to_owned()),
        };

        assert!(!structurally_equal(Some(&left), Some(&right)));
    }

    #[rstest]
    fn hash_depends_on_field_position() {
        let forward = reversed(Some("x"), Some("y"));
        let swapped = reversed(Some("y"), Some("x"));

        assert_ne!(structural_hash(&forward), structural_hash(&swapped));
    }

    #[rstest]
    fn hash_is_stable_across_calls() {
        let value = reversed(Some("z"), None);

        assert_eq!(structural_hash(&value), structural_hash(&value));
    }

    #[rstest]
    fn describe_sorts_fields_by_name() {
        let value = reversed(Some("last"), Some("first"));

        assert_eq!(describe(&value), "Reversed(alpha: first; zulu: last)");
        assert_eq!(value.to_string(), describe(&value));
    }

    #[rstest]
    fn describe_renders_unset_as_empty() {
        assert_eq!(describe(&reversed(None, None)), "Reversed(alpha: ; zulu: )");
    }

    #[rstest]
    fn timestamps_render_without_fraction() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .map(FieldValue::Timestamp);

        assert_eq!(
            timestamp.map(|value| value.to_string()).as_deref(),
            Some("2024-03-09 07:05:01")
        );
    }
}
