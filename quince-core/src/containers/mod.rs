//! Containers which are used throughout the crate, in particular storage which
//! can only be indexed by typed keys.

mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
