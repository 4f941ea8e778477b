pub mod collection;
pub mod datetime;
pub mod extension;
pub mod partition;

pub use collection::{CollectionResult, CollectionValidity};
pub use datetime::{DateTimeField, DateTimeInfo, DateTimeValidity};
pub use extension::{DriverInfo, ExtensionInfo, ExtensionRecord};
pub use partition::{CridValidity, FilenamePartition, PartitionRecord};
