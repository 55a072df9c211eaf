//! Struct `Sample` represents a batch of labeled instances.

// Provides the label and attribute types.
pub(crate) mod label;
// Provides the instance struct.
pub(crate) mod instance;
// Provides the sample struct.
pub(crate) mod sample_struct;


pub use label::{Label, AttributeValue, Attributes};
pub use instance::Instance;
pub use sample_struct::Sample;
