//! Serialization of IR entities into the Cal3D dialects.
//!
//! Pure: codecs read IR and produce text or bytes, nothing else. The text
//! dialect is fixed at version 919, the binary dialect at 700 (downgraded
//! for compatibility with Cal3D 0.11 consumers); both constants are global
//! to a pass, never per entity.

mod binary;
mod xml;

pub use binary::*;
pub use xml::*;

/// Text dialect version written into every `<HEADER>` tag.
pub const XML_VERSION: u32 = 919;

/// Binary dialect version written after every magic tag.
pub const BINARY_VERSION: u32 = 700;

/// Raw 4-byte magic tags, one per binary entity kind.
pub const SKELETON_MAGIC: &[u8; 4] = b"CSF\0";
pub const MESH_MAGIC: &[u8; 4] = b"CMF\0";
pub const ANIMATION_MAGIC: &[u8; 4] = b"CAF\0";
pub const MATERIAL_MAGIC: &[u8; 4] = b"CRF\0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xml,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Skeleton,
    Mesh,
    Animation,
    MorphAnimation,
    Material,
}

impl FileKind {
    /// File extension for a kind/format pair. Morph animations only exist
    /// in the text dialect, so they keep `xpf` either way.
    pub fn extension(&self, format: FileFormat) -> &'static str {
        match (self, format) {
            (FileKind::Skeleton, FileFormat::Xml) => "xsf",
            (FileKind::Skeleton, FileFormat::Binary) => "csf",
            (FileKind::Mesh, FileFormat::Xml) => "xmf",
            (FileKind::Mesh, FileFormat::Binary) => "cmf",
            (FileKind::Animation, FileFormat::Xml) => "xaf",
            (FileKind::Animation, FileFormat::Binary) => "caf",
            (FileKind::MorphAnimation, _) => "xpf",
            (FileKind::Material, FileFormat::Xml) => "xrf",
            (FileKind::Material, FileFormat::Binary) => "crf",
        }
    }

    /// `<prefix><name>.<ext>` as referenced from the manifest.
    pub fn filename(&self, prefix: &str, name: &str, format: FileFormat) -> String {
        format!("{prefix}{name}.{}", self.extension(format))
    }
}
