//! Named property values and calculated-property side tables.

use asd_core::Real;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A property value looked up by name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum PropertyValue {
    Int(i64),
    Real(Real),
    Text(String),
    Table(BTreeMap<String, Real>),
}

impl PropertyValue {
    /// Numeric view of the value. Integers widen to `Real`.
    pub fn as_real(&self) -> Option<Real> {
        match self {
            PropertyValue::Int(v) => Some(*v as Real),
            PropertyValue::Real(v) => Some(*v),
            PropertyValue::Text(_) | PropertyValue::Table(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Real> for PropertyValue {
    fn from(v: Real) -> Self {
        PropertyValue::Real(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        PropertyValue::Int(i64::from(v))
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<BTreeMap<String, Real>> for PropertyValue {
    fn from(v: BTreeMap<String, Real>) -> Self {
        PropertyValue::Table(v)
    }
}

/// Side table of externally calculated properties.
///
/// Each instance owns its own map. Merges take the write lock, lookups the read
/// lock, so a table can sit inside an `Arc`-shared record and still be updated.
#[derive(Debug, Default)]
pub struct PropertyTable {
    entries: RwLock<BTreeMap<String, PropertyValue>>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Merge entries into the table.
    ///
    /// Same-named entries are overwritten, all others are kept.
    pub fn merge<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for (name, value) in entries {
            map.insert(name.into(), value.into());
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, PropertyValue> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for PropertyTable {
    fn clone(&self) -> Self {
        Self {
            entries: RwLock::new(self.snapshot()),
        }
    }
}

impl PartialEq for PropertyTable {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

/// Records that expose named properties with a calculated-value fallback.
///
/// This is the extension point for descriptor or prediction pipelines: they
/// attach values through `update_calculated_properties` without touching the
/// record's explicit attributes.
pub trait PropertySource {
    /// Value of an explicit attribute, `None` if unknown or not set.
    fn explicit_property(&self, name: &str) -> Option<PropertyValue>;

    /// The record's calculated-property table.
    fn calculated(&self) -> &PropertyTable;

    /// Look up a property.
    ///
    /// The explicit attribute wins when set. Otherwise, and only when
    /// `allow_calculated` is true, the calculated table is consulted.
    fn get_property(&self, name: &str, allow_calculated: bool) -> Option<PropertyValue> {
        if let Some(value) = self.explicit_property(name) {
            return Some(value);
        }
        if allow_calculated {
            return self.calculated().get(name);
        }
        None
    }

    /// Bulk-merge calculated values into the side table.
    fn update_calculated_properties<I, K, V>(&self, entries: I)
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.calculated().merge(entries);
    }
}
