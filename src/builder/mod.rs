//! Builders: host data in, IR out.
//!
//! Each builder consumes one host collaborator through its capability trait
//! and produces a write-once IR entity. The skeleton is built first; mesh
//! and animation building both read it.

mod animation;
mod mesh;
mod morph_animation;
mod skeleton;

pub use animation::*;
pub use mesh::*;
pub use morph_animation::*;
pub use skeleton::*;
