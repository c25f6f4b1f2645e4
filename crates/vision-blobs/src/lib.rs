//! Umbrella crate for the `vision-blobs` workspace.
//!
//! Re-exports the image primitives from `vm-core` and the blob labeling
//! entry points from `vm-blob`.

pub use vm_blob::*;
pub use vm_core::*;
