//! Record store adapters.

mod disk_record_store;
mod memory_record_store;

pub use disk_record_store::DiskRecordStore;
pub use memory_record_store::MemoryRecordStore;
