//! Format detection from file signatures
//!
//! Only the leading bytes of a file are read. That is enough to tell HDF5,
//! netCDF classic and HDF4 apart, and to spot the markers netCDF-4 and
//! HDF-EOS5 leave in an HDF5 file's early metadata.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::bytes::Regex;

use crate::dataname::name::DatasetName;
use crate::error::{EsdcError, Result};
use crate::models::DriverInfo;
use crate::ports::MetadataProvider;

/// The 8-byte HDF5 superblock signature
pub const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1A, b'\n'];

/// HDF4 magic number
pub const HDF4_SIGNATURE: [u8; 4] = [0x0e, 0x03, 0x13, 0x01];

/// Attribute written by netCDF-4 into the root group
const NETCDF4_MARKER: &[u8] = b"_NCProperties";

const HDFEOS_VERSION_PATTERN: &str = r"HDFEOS_[0-9]+(?:\.[0-9]+)*";

/// Bytes read from the start of every file
pub const HEADER_LEN: u64 = 1 << 20;

pub const HDF5_DRIVER: &str = "HDF5";
pub const NETCDF_DRIVER: &str = "netCDF";
pub const HDF4_DRIVER: &str = "HDF4";

/// Offset of the HDF5 signature: 0 or a power of two from 512
pub fn find_hdf5_signature(data: &[u8]) -> Option<usize> {
    if data.starts_with(&HDF5_SIGNATURE) {
        return Some(0);
    }

    let mut offset = 512;
    while offset + HDF5_SIGNATURE.len() <= data.len() {
        if data[offset..offset + HDF5_SIGNATURE.len()] == HDF5_SIGNATURE {
            return Some(offset);
        }
        offset *= 2;
    }
    None
}

fn is_netcdf_classic(data: &[u8]) -> bool {
    data.len() >= 4 && &data[..3] == b"CDF" && matches!(data[3], 0x01 | 0x02 | 0x05)
}

/// Metadata provider working from the first [`HEADER_LEN`] bytes of a file
#[derive(Debug)]
pub struct SignatureProvider {
    hdfeos_version: Regex,
}

impl SignatureProvider {
    pub fn new() -> Result<Self> {
        let hdfeos_version = Regex::new(HDFEOS_VERSION_PATTERN)
            .map_err(|e| EsdcError::invalid_pattern(HDFEOS_VERSION_PATTERN, e))?;
        Ok(Self { hdfeos_version })
    }

    /// Classify a byte prefix. `dataset` is only used in errors.
    pub fn identify(&self, data: &[u8], dataset: &str) -> Result<DriverInfo> {
        if find_hdf5_signature(data).is_some() {
            let is_netcdf4 = data.windows(NETCDF4_MARKER.len()).any(|w| w == NETCDF4_MARKER);
            let hdfeos_version = self
                .hdfeos_version
                .find(data)
                .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
                .unwrap_or_default();

            let driver = if is_netcdf4 && hdfeos_version.is_empty() { NETCDF_DRIVER } else { HDF5_DRIVER };
            return Ok(DriverInfo { driver_short_name: driver.to_string(), hdfeos_version });
        }

        if is_netcdf_classic(data) {
            return Ok(DriverInfo { driver_short_name: NETCDF_DRIVER.to_string(), ..Default::default() });
        }

        if data.starts_with(&HDF4_SIGNATURE) {
            return Ok(DriverInfo { driver_short_name: HDF4_DRIVER.to_string(), ..Default::default() });
        }

        Err(EsdcError::UnsupportedFormat { dataset: dataset.to_string() })
    }

    fn read_header(path: &Path) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        File::open(path)?.take(HEADER_LEN).read_to_end(&mut data)?;
        Ok(data)
    }
}

impl MetadataProvider for SignatureProvider {
    fn driver_info(&self, dataset_name: &str) -> Result<DriverInfo> {
        let file = DatasetName::parse(dataset_name).file;
        let data = Self::read_header(Path::new(&file))?;
        tracing::debug!(file = %file, bytes = data.len(), "read file header");
        self.identify(&data, dataset_name)
    }
}
