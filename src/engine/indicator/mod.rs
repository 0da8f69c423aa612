pub mod assembler;
pub mod builtin;
pub mod definition;
pub mod dimension;
pub mod query;
pub mod registry;

pub use assembler::QueryAssembler;
pub use definition::{IndicatorDefinition, Join, RecordSource};
pub use dimension::{AgeRange, Classification, ClassificationCase, ClassificationRule, Dimension};
pub use query::{AggregateQuery, Grouping, GroupingPeriod};
pub use registry::IndicatorRegistry;

#[cfg(test)]
mod registry_test;
