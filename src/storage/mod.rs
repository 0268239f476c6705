mod collection;
mod item_store;
mod persistence;
mod persistence_file;
mod persistence_memory;
mod tag_store;

pub use collection::Collection;
pub use item_store::ItemStore;
pub use persistence::Persistence;
pub use persistence_file::FilePersistence;
pub use persistence_memory::MemoryPersistence;
pub use tag_store::TagStore;
