pub mod filter_binding;
pub mod filter_spec;
pub mod fragment_builder;
pub mod predicate;
pub mod scope;

pub use filter_binding::{FilterBinding, FilterKind};
pub use filter_spec::{DateRangeInput, FilterSpec, FilterValue};
pub use fragment_builder::FragmentBuilder;
pub use predicate::{FieldAccessor, Predicate, ScopePredicate, StaticPredicate};
pub use scope::{AccessScope, Principal, RecordOwnershipScope, ScopeProvider};
