//! Export core for the Cal3D interchange formats.
//!
//! Takes an in-memory character rig, supplied by a host content tool
//! through the narrow interfaces in [`host`], and turns it into Cal3D
//! skeletons, meshes, materials and animations: first a normalized,
//! hierarchy-independent intermediate representation ([`model`]), then the
//! exact text (XSF/XMF/XAF/XPF/XRF) or binary (CSF/CMF/CAF/CRF) layouts
//! via [`codec`].
//!
//! Data flows one way: host data → [`builder`] → [`model`] → [`codec`].
//! Builders never touch the codec, the codec never touches host data, and
//! the only cross-builder dependency is the skeleton, which mesh skinning
//! and animation composition both read.

pub mod builder;
pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod manifest;
pub mod model;
pub mod pipeline;
pub mod transform;

pub use config::ExportConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::ExportError;
pub use pipeline::{ExportPass, ExportSet};
