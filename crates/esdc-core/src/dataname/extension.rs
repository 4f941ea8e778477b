//! File extension check for HDF5 and netCDF granules

use std::path::Path;

use crate::dataname::name::DatasetName;
use crate::models::{DriverInfo, ExtensionInfo, ExtensionRecord};
use crate::ports::MetadataProvider;

pub const NETCDF_EXTENSION: &str = ".nc";
pub const HDF5_EXTENSION: &str = ".h5";
pub const HDFEOS5_EXTENSION: &str = ".he5";

/// Look up the driver of `dataset_name` and compare the file extension
/// against the one expected for that driver
pub fn check(dataset_name: &str, provider: &dyn MetadataProvider) -> ExtensionRecord {
    let mut record = ExtensionRecord::new(dataset_name);

    match provider.driver_info(dataset_name) {
        Ok(driver) => {
            let file = DatasetName::parse(dataset_name).file;
            record.extension = Some(evaluate(driver, file_extension(&file)));
        }
        Err(e) => record.error = Some(e.to_string()),
    }

    record
}

/// Extension of `file` including the leading dot, empty if there is none
pub fn file_extension(file: &str) -> String {
    Path::new(file)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Extension expected for a driver, `None` when the driver is out of scope
pub fn expected_extension(driver: &DriverInfo) -> Option<&'static str> {
    match driver.driver_short_name.to_uppercase().as_str() {
        "NETCDF" => Some(NETCDF_EXTENSION),
        "HDF5" if driver.hdfeos_version.is_empty() => Some(HDF5_EXTENSION),
        "HDF5" => Some(HDFEOS5_EXTENSION),
        _ => None,
    }
}

fn evaluate(driver: DriverInfo, extension: String) -> ExtensionInfo {
    let expected = expected_extension(&driver);
    let valid = expected.map(|e| e == extension);

    ExtensionInfo {
        driver_short_name: driver.driver_short_name,
        hdfeos_version: driver.hdfeos_version,
        extension,
        expected: expected.map(str::to_string),
        valid,
    }
}
