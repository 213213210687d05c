//! The `.cfg` manifest: a plain key=value listing of the files one export
//! pass wrote, consumed by engines that load a whole rig from one entry
//! point. Thin by design; all layout knowledge lives in the codec.

use std::io::{self, Write};

use crate::codec::{FileFormat, FileKind};
use crate::pipeline::ExportSet;

/// Per-kind text/binary choice for the filenames the manifest references.
#[derive(Debug, Clone, Copy)]
pub struct ManifestFormats {
    pub skeleton: FileFormat,
    pub mesh: FileFormat,
    pub animation: FileFormat,
    pub material: FileFormat,
}

impl Default for ManifestFormats {
    fn default() -> Self {
        Self {
            skeleton: FileFormat::Xml,
            mesh: FileFormat::Xml,
            animation: FileFormat::Xml,
            material: FileFormat::Xml,
        }
    }
}

/// Filename prefixes, mirrored from the host's export settings.
#[derive(Debug, Clone)]
pub struct FilePrefixes {
    pub skeleton: String,
    pub mesh: String,
    pub animation: String,
    pub material: String,
}

impl Default for FilePrefixes {
    fn default() -> Self {
        Self {
            skeleton: String::new(),
            mesh: "model_".to_string(),
            animation: String::new(),
            material: String::new(),
        }
    }
}

/// Write `skeleton=`, `animation=`, `material=` and `mesh=` lines for
/// everything in the set, in that order.
pub fn write_manifest<W: Write>(
    w: &mut W,
    set: &ExportSet,
    formats: &ManifestFormats,
    prefixes: &FilePrefixes,
) -> io::Result<()> {
    if let Some(skeleton) = &set.skeleton {
        let filename =
            FileKind::Skeleton.filename(&prefixes.skeleton, &skeleton.name, formats.skeleton);
        writeln!(w, "skeleton={filename}")?;
    }

    for animation in &set.animations {
        let filename =
            FileKind::Animation.filename(&prefixes.animation, &animation.name, formats.animation);
        writeln!(w, "animation={filename}")?;
    }
    for animation in &set.morph_animations {
        let filename =
            FileKind::MorphAnimation.filename(&prefixes.animation, &animation.name, FileFormat::Xml);
        writeln!(w, "animation={filename}")?;
    }

    for material in set.materials.materials() {
        let filename =
            FileKind::Material.filename(&prefixes.material, &material.name, formats.material);
        writeln!(w, "material={filename}")?;
    }

    for mesh in &set.meshes {
        let filename = FileKind::Mesh.filename(&prefixes.mesh, &mesh.name, formats.mesh);
        writeln!(w, "mesh={filename}")?;
    }

    Ok(())
}
