use serde::{Serialize, Deserialize};

use std::fmt;

use super::label::{Label, AttributeValue, Attributes};


/// A single training example.
/// An `Instance` is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    attributes: Attributes,
    label: Label,
    weight: f64,
}


impl Instance {
    /// Construct a new instance of weight `1.0`.
    #[inline]
    pub fn new<L>(attributes: Attributes, label: L) -> Self
        where L: Into<Label>
    {
        Self { attributes, label: label.into(), weight: 1f64, }
    }


    /// Construct a new instance from `(name, value)` pairs.
    pub fn from_pairs<I, K, V, L>(pairs: I, label: L) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<AttributeValue>,
              L: Into<Label>,
    {
        let attributes = pairs.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Attributes>();
        Self::new(attributes, label)
    }


    /// Set the weight of this instance.
    /// Default value is `1.0`.
    #[inline]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }


    /// Returns the attributes.
    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }


    /// Returns the value of the attribute named `name`.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }


    /// Returns the label.
    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }


    /// Returns the weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}


impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.attributes.keys().collect::<Vec<_>>();
        names.sort();

        write!(f, "{{")?;
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{name}: {}", self.attributes[name])?;
        }
        write!(f, "}} label: {} weight: {}", self.label, self.weight)
    }
}
