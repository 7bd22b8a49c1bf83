#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod key_value;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use key_value::BrowserStorage;
pub use key_value::{BackendError, FileStorage, KeyValueStore, MemoryStorage};
pub use local_storage::{LocalStorage, STORAGE_KEY};
