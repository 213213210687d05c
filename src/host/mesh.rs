use nalgebra_glm as glm;

/// A vertex of the host mesh in mesh-local space, with its vertex-group
/// memberships as `(group_index, weight)` pairs.
#[derive(Debug, Clone)]
pub struct MeshVertex {
    pub position: glm::Vec3,
    pub normal: glm::Vec3,
    pub groups: Vec<(usize, f32)>,
}

/// A tessellated face: a triangle, or a quad when `corner4` is set.
///
/// `uvs` holds one `[ [u, v]; 4 ]` entry per uv layer; the fourth corner is
/// ignored for triangles. `colors` follows the same corner layout when the
/// mesh carries a vertex-color layer.
#[derive(Debug, Clone)]
pub struct MeshFace {
    pub corners: [u32; 3],
    pub corner4: Option<u32>,
    pub material_slot: usize,
    pub uvs: Vec<[[f32; 2]; 4]>,
    pub colors: Option<[[f32; 3]; 4]>,
}

impl MeshFace {
    /// Corner vertex indices in order, three or four of them.
    pub fn corner_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.corners.iter().copied().chain(self.corner4)
    }
}

/// A relative morph target (shape key) evaluated at full weight, in the
/// same mesh-local space as the base vertices. The basis key is excluded.
#[derive(Debug, Clone)]
pub struct MorphTarget {
    pub name: String,
    pub positions: Vec<glm::Vec3>,
    pub normals: Vec<glm::Vec3>,
}

/// A mesh object to export.
pub trait MeshSource {
    fn name(&self) -> &str;

    fn world_transform(&self) -> glm::Mat4;

    /// Material names per mesh-local material slot, in slot order.
    fn material_names(&self) -> &[String];

    /// Vertex-group names, indexed by `MeshVertex::groups` entries.
    fn group_names(&self) -> &[String];

    fn uv_layer_count(&self) -> usize;

    fn vertices(&self) -> &[MeshVertex];

    fn faces(&self) -> &[MeshFace];

    fn morph_targets(&self) -> &[MorphTarget] {
        &[]
    }

    /// Whether the host's shape-key set blends relative to the basis.
    /// Absolute key sets cannot be exported as morphs.
    fn morphs_are_relative(&self) -> bool {
        true
    }
}
