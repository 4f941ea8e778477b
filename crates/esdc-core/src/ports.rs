//! Ports for external collaborators
//!
//! Anything that has to open a data file and look inside it goes through a
//! trait defined here, so checks can be exercised with in-memory fakes.

use crate::error::Result;
use crate::models::DriverInfo;

/// Reports format information about a dataset
pub trait MetadataProvider {
    /// Identify the driver that handles `dataset_name` and, for HDF-EOS
    /// files, the HDF-EOS version
    fn driver_info(&self, dataset_name: &str) -> Result<DriverInfo>;
}
