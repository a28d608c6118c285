//! Persistence boundary for sealed vaults.
//!
//! The session layer never touches the filesystem directly; it talks to a [`VaultStore`],
//! which keeps one account's PIN digest and sealed vault. Everything crossing this boundary
//! is already encrypted or one-way hashed.
//!
//! # Backends
//!
//! - **[`FileStore`]**: one JSON record per account under a sandboxed root, written with an
//!   atomic swap (unique temp file + `fsync` + `rename`). Orphaned temp files are purged on
//!   connect.
//! - **[`MemoryStore`]**: shared in-process record with write-failure injection, used by tests
//!   and ephemeral sessions.
//!
//! # Record Layout
//!
//! ```text
//! <root>/<account>/account.json
//! {
//!   "pinHash": "<base64>",
//!   "vault": { "encryptedData": "<base64>", "salt": "<base64>", "iv": "<base64>" }
//! }
//! ```

mod account;
mod builder;
mod error;
mod file;
mod maintenance;
mod memory;
mod record;
mod store;

pub use account::AccountName;
pub use builder::FileStoreBuilder;
pub use error::{StoreError, StoreErrorExt};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::AccountRecord;
pub use store::VaultStore;
