pub mod dataset_factory;
pub mod filter_spec_factory;
pub mod principal_factory;
pub mod record_factory;
pub mod result_row_factory;

pub use dataset_factory::DatasetFactory;
pub use filter_spec_factory::FilterSpecFactory;
pub use principal_factory::PrincipalFactory;
pub use record_factory::RecordFactory;
pub use result_row_factory::ResultRowFactory;

#[cfg(test)]
mod dataset_factory_test;
#[cfg(test)]
mod filter_spec_factory_test;
#[cfg(test)]
mod principal_factory_test;
#[cfg(test)]
mod record_factory_test;
#[cfg(test)]
mod result_row_factory_test;
