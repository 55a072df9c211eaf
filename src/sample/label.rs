use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::HashMap;


/// The attributes of an instance, keyed by attribute name.
pub type Attributes = HashMap<String, AttributeValue>;


/// A classification label.
/// Labels are totally ordered so that every choice among equals
/// (e.g., two labels with the same proportion) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// An integer label, e.g., `-1`/`+1` or `0`/`1`.
    Int(i64),
    /// A textual label, e.g., `"click"`.
    Text(String),
}


impl From<i64> for Label {
    #[inline]
    fn from(label: i64) -> Self {
        Self::Int(label)
    }
}


impl From<i32> for Label {
    #[inline]
    fn from(label: i32) -> Self {
        Self::Int(label as i64)
    }
}


impl From<&str> for Label {
    #[inline]
    fn from(label: &str) -> Self {
        Self::Text(label.to_string())
    }
}


impl From<String> for Label {
    #[inline]
    fn from(label: String) -> Self {
        Self::Text(label)
    }
}


impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(label) => write!(f, "{label}"),
            Self::Text(label) => write!(f, "{label}"),
        }
    }
}


/// (De)serializes a label-keyed map as a sequence of `(label, value)` pairs.
/// Formats such as JSON write map keys as strings,
/// which would turn `Label::Int(1)` into `Label::Text("1")` on reload.
pub(crate) mod label_map {
    use serde::{Deserialize, Deserializer, Serializer};

    use std::collections::BTreeMap;

    use super::Label;


    pub(crate) fn serialize<S>(map: &BTreeMap<Label, f64>, serializer: S)
        -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serializer.collect_seq(map.iter())
    }


    pub(crate) fn deserialize<'de, D>(deserializer: D)
        -> Result<BTreeMap<Label, f64>, D::Error>
        where D: Deserializer<'de>
    {
        let pairs = Vec::<(Label, f64)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}


/// The value of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A real-valued attribute.
    Numeric(f64),
    /// A categorical attribute.
    Categorical(String),
}


impl AttributeValue {
    /// Returns the numeric value, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(x) => Some(*x),
            Self::Categorical(_) => None,
        }
    }


    /// Returns the categorical value, if any.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Categorical(s) => Some(s),
        }
    }
}


impl From<f64> for AttributeValue {
    #[inline]
    fn from(x: f64) -> Self {
        Self::Numeric(x)
    }
}


impl From<&str> for AttributeValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Categorical(s.to_string())
    }
}


impl From<String> for AttributeValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::Categorical(s)
    }
}


impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(x) => write!(f, "{x}"),
            Self::Categorical(s) => write!(f, "{s}"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Weights(#[serde(with = "label_map")] BTreeMap<Label, f64>);

    #[test]
    fn label_maps_keep_integer_labels_through_json() {
        let weights = Weights(BTreeMap::from([
            (Label::from(0), 0.25),
            (Label::from(1), 0.75),
            (Label::from("1"), 0.5),
        ]));

        let json = serde_json::to_string(&weights).unwrap();
        let back: Weights = serde_json::from_str(&json).unwrap();

        assert_eq!(back, weights);
        assert_eq!(back.0.get(&Label::Int(1)), Some(&0.75));
    }
}
