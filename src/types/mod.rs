//! Typed entities returned by the subgraph, one file per entity family.
//!
//! Each family carries a `Raw*` record mirroring the subgraph's wire shape
//! (scaled-integer strings, camelCase) and a public entity produced by a pure
//! `TryFrom` mapping.

pub mod history;
pub mod order;
pub mod pair;
pub mod trade;

// Re-export all types for convenience
pub use history::*;
pub use order::*;
pub use pair::*;
pub use trade::*;
