pub mod store;

pub use store::{HackStore, STORAGE_KEY};
