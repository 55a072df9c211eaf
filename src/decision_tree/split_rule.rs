//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::Attributes;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LR {
    Left,
    Right,
}


/// A binary test on a single attribute.
/// An instance without the attribute (or with a value of the other kind)
/// always goes right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Splitter {
    /// `value < threshold` goes left.
    Threshold {
        attribute: String,
        threshold: f64,
    },
    /// `value == category` goes left.
    Category {
        attribute: String,
        category: String,
    },
}


impl Splitter {
    /// Defines the splitting.
    #[inline]
    pub(crate) fn split(&self, attributes: &Attributes) -> LR {
        let goes_left = match self {
            Self::Threshold { attribute, threshold } => {
                attributes.get(attribute)
                    .and_then(|v| v.as_f64())
                    .is_some_and(|x| x < *threshold)
            },
            Self::Category { attribute, category } => {
                attributes.get(attribute)
                    .and_then(|v| v.as_str())
                    .is_some_and(|s| s == category.as_str())
            },
        };

        if goes_left { LR::Left } else { LR::Right }
    }
}


impl fmt::Display for Splitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold { attribute, threshold } => {
                write!(f, "{attribute} < {threshold}")
            },
            Self::Category { attribute, category } => {
                write!(f, "{attribute} == {category}")
            },
        }
    }
}
