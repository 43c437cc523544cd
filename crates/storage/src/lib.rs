#![forbid(unsafe_code)]

pub mod codec;
pub mod json_file;
pub mod keys;
pub mod kv;

pub use json_file::JsonFileStore;
pub use kv::{InMemoryStore, KeyValueStore, Storage, UnavailableStore};
