pub mod entry_mapper;
pub mod user_mapper;

pub use entry_mapper::EntryMapper;
pub use user_mapper::UserMapper;
