//! Intermediate representation of one export pass.
//!
//! Every entity here is write-once: a builder constructs it completely,
//! after which only the codec reads it. Vectors are `[f32; 3]` and
//! quaternions `[f32; 4]` in `(x, y, z, w)` component order.

mod animation;
mod material;
mod mesh;
mod skeleton;

pub use animation::*;
pub use material::*;
pub use mesh::*;
pub use skeleton::*;
