//! Store implementations.

pub mod account;
pub mod file;
pub mod memory;

pub use account::AccountRepository;
pub use file::FileRepository;
pub use memory::{MemoryAccountStore, MemoryFileRecordStore};
