// Storage - persistence gateway and import/export payload codec

pub mod exchange;
pub mod gateway;

pub use exchange::{ExchangeError, export_performances, import_performances};
pub use gateway::{JsonFileGateway, MemoryGateway, PersistenceGateway, StorageError};
