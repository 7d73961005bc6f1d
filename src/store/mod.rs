pub mod memory;
pub mod sqlite;

use crate::app::Result;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Durable string-to-string storage the feed cache persists its blob into.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>>;
    fn set_string(&self, key: &str, value: &str) -> Result<()>;
}
