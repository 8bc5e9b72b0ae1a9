pub(crate) mod aggregate;
pub(crate) mod elements;
pub(crate) mod grouping;
pub(crate) mod joins;
pub(crate) mod partition;
pub(crate) mod sequence;
pub(crate) mod sets;

pub use grouping::Grouping;
