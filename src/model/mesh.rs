use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub bone_id: u32,
    pub weight: f32,
}

/// One exported vertex. Two faces referencing the same host vertex with
/// different uv coordinates produce two entities sharing `source_index`
/// with distinct `export_index` values ("duplicates").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Index into the host mesh vertex array.
    pub source_index: u32,
    /// Dense 0-based index within the owning submesh; serialization order.
    pub export_index: u32,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub maps: Vec<TexCoord>,
    pub influences: Vec<Influence>,
}

impl Vertex {
    /// Influences sorted by weight descending and renormalized so the
    /// weights sum to 1.0. Computed at serialization time; the stored
    /// influences keep their raw host weights.
    pub fn sorted_normalized_influences(&self) -> Vec<Influence> {
        let mut influences = self.influences.clone();
        influences.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));

        let total: f32 = influences.iter().map(|i| i.weight).sum();
        if total != 1.0 && total != 0.0 {
            for influence in &mut influences {
                influence.weight /= total;
            }
        }
        influences
    }
}

/// A face of three corners, or four when `vertex4` is set. Quads keep their
/// identity here; the codec fans them into `0-1-2, 0-2-3` triangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub vertices: [u32; 3],
    pub vertex4: Option<u32>,
}

/// A morphed copy of one base vertex, present only when the morphed
/// position moved far enough from the base. `export_index` shares the base
/// vertex numbering space of the submesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendVertex {
    pub export_index: u32,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub posdiff: f32,
    pub maps: Vec<TexCoord>,
}

/// One morph target scoped to one submesh. `morph_id` is stable across all
/// submeshes of the mesh (the shape-key ordinal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Morph {
    pub name: String,
    pub morph_id: u32,
    pub blend_vertices: Vec<BlendVertex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubMesh {
    /// Index into the pass-wide used-material table.
    pub material_use_index: u32,
    /// Material slot within the source mesh this submesh was split from.
    pub mesh_material_index: u32,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub morphs: Vec<Morph>,
}

impl SubMesh {
    /// Triangle count after quad fan-out; quads serialize as two faces.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| if f.vertex4.is_some() { 2 } else { 1 })
            .sum()
    }

    /// Uv map count, taken from the first vertex.
    pub fn texcoord_count(&self) -> usize {
        self.vertices.first().map_or(0, |v| v.maps.len())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub submeshes: Vec<SubMesh>,
}
