//! mdb-runtime: the container and text substrate an MDB (Access) file
//! parser links against.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: give a binary-format parser the small set of collections and
//!   string/byte transforms it expects, with ownership made explicit.
//! - Layers:
//!   - `Arena<T>` / `Handle`: central owner of payloads; everything else
//!     stores copyable, identity-compared handles.
//!   - `PtrArray<H>`: contiguous handle array, one-slot growth, ordered
//!     removal, adjacent-swap sort.
//!   - `List<H>`: doubly-linked handle list with slot-map nodes.
//!   - `AssocTable<K, V, E>`: predicate-resolved key/value records kept in
//!     a `PtrArray` (linear scan). `HashedTable<K, V, S>` is the
//!     hash-indexed alternative for larger key spaces.
//!   - `StringBuf`: NUL-terminated byte buffer with a fixed growth policy.
//!   - `strutil`, `rc4`, `transcode`: leaf functions.
//!   - `Config`: per-handle option mask and charset labels.
//!
//! Constraints
//! - Containers never own payloads. Dropping or destroying one releases
//!   its own records only; payload lifetime is the arena owner's concern.
//! - Single-owner. Every mutation takes `&mut self`, so a predicate or
//!   visitor can never reach the table it is running inside.
//! - Absence is `Option`/`bool`, never an error. Failed growth is reported
//!   through [`RuntimeError::AllocationFailure`] or, where the calling
//!   convention has no error channel, logged and dropped.
//!
//! Ownership of list heads
//! - The list keeps its own head. `append`/`remove` return the resulting
//!   head for callers that thread it through, but no caller-held head can
//!   dangle, and node references are generational.
//!
//! Notes and non-goals
//! - Not a general-purpose collections library; only the operations the
//!   parser needs are provided.
//! - The transcoder is deliberately lossy: no Unicode beyond one byte.
//! - `rc4` is a format-compatibility primitive, not a recommendation.

pub mod assoc;
pub mod config;
pub mod error;
pub mod handle;
pub mod hashed;
pub mod list;
pub mod ptr_array;
pub mod rc4;
pub mod string_buf;
pub mod strutil;
pub mod transcode;

#[cfg(test)]
mod table_proptest;

// Public surface
pub use assoc::{AssocTable, EntryRef};
pub use config::{Config, Options};
pub use error::{Result, RuntimeError};
pub use handle::{Arena, Handle};
pub use hashed::HashedTable;
pub use list::{List, NodeRef};
pub use ptr_array::PtrArray;
pub use string_buf::StringBuf;
