use thiserror::Error;

/// Errors raised while building or serializing export data.
///
/// `MultipleArmatures` aborts the whole pass. The mesh-level variants abort
/// only the entity that raised them; the pass driver logs them and moves on
/// to the next object.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("only one armature is supported per export pass")]
    MultipleArmatures,

    #[error("mesh `{0}` is not attached to a skeleton")]
    NoSkeleton(String),

    #[error("no materials with texture maps were found")]
    EmptyMaterialSet,

    #[error("mesh `{0}` has no materials assigned")]
    NoMaterials(String),

    #[error("mesh `{0}` has no uv layers")]
    NoUvLayers(String),

    #[error("mesh `{mesh}`: no exportable material for face material slot {slot}")]
    MaterialSlotMismatch { mesh: String, slot: usize },

    #[error("mesh `{mesh}`: vertex index {index} out of range")]
    VertexIndexOutOfRange { mesh: String, index: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
