use nalgebra_glm as glm;

use crate::config::ExportConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ExportError;
use crate::host::MeshSource;
use crate::model::{
    BlendVertex, Face, Influence, MaterialSet, Mesh, Morph, Skeleton, SubMesh, TexCoord, Vertex,
};
use crate::transform::{
    decompose_transform, export_normal, export_position, quat_to_rotation_matrix, transform_direction,
    transform_point, vec3_to_array,
};

/// A morphed vertex must move at least this far (export units) from its
/// base position to be worth a blend vertex. The Cal3D savers use 0.01 for
/// binary and 1.0 for text; one shared middle value keeps both dialects of
/// one export consistent.
pub const MORPH_DIFFERENCE_TOLERANCE: f32 = 0.1;

/// Vertex-group memberships at or below this weight are noise, not skin.
const WEIGHT_THRESHOLD: f32 = 0.0001;

/// The dialects carry at most four uv maps per vertex.
const MAX_UV_LAYERS: usize = 4;

/// Morph names are expected to carry one of the engine's blending suffixes.
const MORPH_NAME_SUFFIXES: [&str; 4] = [".Clamped", ".Averaged", ".Exclusive", ".Additive"];

/// Build the mesh IR for one host mesh object.
///
/// Requires the pass skeleton (influences reference its bone ids) and the
/// pass material registry, which is appended to when a material is used for
/// the first time. Fails without producing a mesh when the object has no
/// materials, no uv layers, or references a material slot that was never
/// discovered.
pub fn build_mesh(
    source: &dyn MeshSource,
    skeleton: Option<&Skeleton>,
    materials: &mut MaterialSet,
    config: &ExportConfig,
    diags: &mut Diagnostics,
) -> Result<Mesh, ExportError> {
    let name = source.name().to_string();

    let Some(skeleton) = skeleton else {
        return Err(ExportError::NoSkeleton(name));
    };
    if materials.is_empty() {
        return Err(ExportError::EmptyMaterialSet);
    }
    if source.material_names().is_empty() {
        return Err(ExportError::NoMaterials(name));
    }
    if source.uv_layer_count() == 0 {
        return Err(ExportError::NoUvLayers(name));
    }

    let mesh_matrix = corrected_world_transform(source, diags);

    let base_rotation = config.base_rotation_quat();
    let base_translation = config.base_translation_vec();
    let base_scale = config.base_scale;

    let targets = source.morph_targets();
    let do_morphs = morphs_exportable(source, diags);
    if do_morphs {
        for target in targets {
            if !MORPH_NAME_SUFFIXES.iter().any(|s| target.name.ends_with(s)) {
                diags.warning(format!(
                    "morph name `{}` does not end in one of the engine blending suffixes",
                    target.name
                ));
            }
        }
    }

    let mut mesh = Mesh {
        name: name.clone(),
        submeshes: Vec::new(),
    };

    for face in source.faces() {
        let submesh_index = match mesh
            .submeshes
            .iter()
            .position(|sm| sm.mesh_material_index as usize == face.material_slot)
        {
            Some(index) => index,
            None => {
                let material_name = source
                    .material_names()
                    .get(face.material_slot)
                    .ok_or_else(|| ExportError::MaterialSlotMismatch {
                        mesh: name.clone(),
                        slot: face.material_slot,
                    })?;
                let material_index = materials.find_by_name(material_name).ok_or_else(|| {
                    ExportError::MaterialSlotMismatch {
                        mesh: name.clone(),
                        slot: face.material_slot,
                    }
                })?;
                let used_index = materials.mark_used(material_index);

                let mut submesh = SubMesh {
                    material_use_index: used_index,
                    mesh_material_index: face.material_slot as u32,
                    vertices: Vec::new(),
                    faces: Vec::new(),
                    morphs: Vec::new(),
                };
                if do_morphs {
                    // Every submesh carries every morph; morph_id stays the
                    // shape-key ordinal across all of them.
                    for (target_index, target) in targets.iter().enumerate() {
                        submesh.morphs.push(Morph {
                            name: target.name.clone(),
                            morph_id: target_index as u32,
                            blend_vertices: Vec::new(),
                        });
                    }
                }
                mesh.submeshes.push(submesh);
                mesh.submeshes.len() - 1
            }
        };

        let mut corner_exports: [u32; 4] = [0; 4];
        let mut corner_count = 0usize;

        for (corner, vertex_index) in face.corner_indices().enumerate() {
            let maps: Vec<TexCoord> = face
                .uvs
                .iter()
                .take(MAX_UV_LAYERS)
                .map(|layer| TexCoord {
                    u: layer[corner][0],
                    // Host texture space has V growing the other way.
                    v: 1.0 - layer[corner][1],
                })
                .collect();
            if maps.is_empty() {
                diags.warning(format!(
                    "mesh `{name}`: no uv coordinates for vertex {vertex_index}"
                ));
            }

            // The color layer is mandatory in the output, so default to
            // opaque white when the host has none.
            let color = face
                .colors
                .map(|colors| colors[corner])
                .unwrap_or([1.0, 1.0, 1.0]);

            // A corner reuses an exported vertex only when source index,
            // map count and every uv component match exactly. Color is
            // deliberately not part of the key: coincident vertices that
            // differ only in color collapse and the first color wins.
            let existing = mesh.submeshes[submesh_index]
                .vertices
                .iter()
                .find(|v| {
                    v.source_index == vertex_index
                        && v.maps.len() == maps.len()
                        && v.maps
                            .iter()
                            .zip(&maps)
                            .all(|(a, b)| a.u == b.u && a.v == b.v)
                })
                .map(|v| v.export_index);

            let export_index = match existing {
                Some(index) => index,
                None => {
                    let host_vertex = source.vertices().get(vertex_index as usize).ok_or(
                        ExportError::VertexIndexOutOfRange {
                            mesh: name.clone(),
                            index: vertex_index,
                        },
                    )?;

                    let world_position = transform_point(&mesh_matrix, &host_vertex.position);
                    let world_normal = transform_direction(&mesh_matrix, &host_vertex.normal);
                    let position =
                        export_position(&world_position, &base_translation, base_scale, &base_rotation);
                    let normal = export_normal(&world_normal, base_scale, &base_rotation);

                    let mut influences = Vec::new();
                    for &(group_index, weight) in &host_vertex.groups {
                        if weight <= WEIGHT_THRESHOLD {
                            continue;
                        }
                        if let Some(group_name) = source.group_names().get(group_index) {
                            if let Some(bone) = skeleton.bone_by_name(group_name) {
                                influences.push(Influence {
                                    bone_id: bone.id,
                                    weight,
                                });
                            }
                        }
                    }
                    if influences.is_empty() {
                        diags.warning(format!(
                            "mesh `{name}`: vertex {vertex_index} has no influences"
                        ));
                    }

                    let submesh = &mut mesh.submeshes[submesh_index];
                    let export_index = submesh.vertices.len() as u32;

                    if do_morphs {
                        for (target_index, target) in targets.iter().enumerate() {
                            let morph_world =
                                transform_point(&mesh_matrix, &target.positions[vertex_index as usize]);
                            let morph_position = export_position(
                                &morph_world,
                                &base_translation,
                                base_scale,
                                &base_rotation,
                            );
                            let posdiff = (morph_position - position).norm();
                            if posdiff >= MORPH_DIFFERENCE_TOLERANCE {
                                let morph_normal_world = transform_direction(
                                    &mesh_matrix,
                                    &target.normals[vertex_index as usize],
                                );
                                let morph_normal =
                                    export_normal(&morph_normal_world, base_scale, &base_rotation);
                                submesh.morphs[target_index].blend_vertices.push(BlendVertex {
                                    export_index,
                                    position: vec3_to_array(&morph_position),
                                    normal: vec3_to_array(&morph_normal),
                                    posdiff,
                                    // Blend vertices reuse the base uv set.
                                    maps: maps.clone(),
                                });
                            }
                        }
                    }

                    submesh.vertices.push(Vertex {
                        source_index: vertex_index,
                        export_index,
                        position: vec3_to_array(&position),
                        normal: vec3_to_array(&normal),
                        color,
                        maps,
                        influences,
                    });
                    export_index
                }
            };

            corner_exports[corner] = export_index;
            corner_count = corner + 1;
        }

        mesh.submeshes[submesh_index].faces.push(Face {
            vertices: [corner_exports[0], corner_exports[1], corner_exports[2]],
            vertex4: (corner_count == 4).then(|| corner_exports[3]),
        });
    }

    Ok(mesh)
}

/// A non-unit world scale would double-apply once the configured base scale
/// comes in. Divide it out of the translation and rebuild the transform
/// with unit scale, keeping the rotation.
fn corrected_world_transform(source: &dyn MeshSource, diags: &mut Diagnostics) -> glm::Mat4 {
    let matrix = source.world_transform();
    let (translation, rotation, scale) = decompose_transform(&matrix);
    if scale.x == 1.0 && scale.y == 1.0 && scale.z == 1.0 {
        return matrix;
    }

    diags.warning(format!(
        "mesh `{}` has non-unit world scale ({:.3} {:.3} {:.3}); rebuilding transform with unit scale",
        source.name(),
        scale.x,
        scale.y,
        scale.z
    ));
    let corrected = glm::vec3(
        translation.x / scale.x,
        translation.y / scale.y,
        translation.z / scale.z,
    );
    glm::translation(&corrected) * glm::mat3_to_mat4(&quat_to_rotation_matrix(&rotation))
}

fn morphs_exportable(source: &dyn MeshSource, diags: &mut Diagnostics) -> bool {
    let targets = source.morph_targets();
    if targets.is_empty() {
        return false;
    }
    if !source.morphs_are_relative() {
        diags.warning(format!(
            "mesh `{}`: only relative shape keys are supported; morphs will not be exported",
            source.name()
        ));
        return false;
    }
    let vertex_count = source.vertices().len();
    for target in targets {
        if target.positions.len() != vertex_count || target.normals.len() != vertex_count {
            diags.warning(format!(
                "shape key `{}` has a different vertex count than mesh `{}`; morphs will not be exported",
                target.name,
                source.name()
            ));
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MaterialDesc, MeshFace, MeshVertex, MorphTarget};
    use crate::model::{Bone, LightType};

    struct TestMesh {
        name: String,
        world: glm::Mat4,
        material_names: Vec<String>,
        group_names: Vec<String>,
        uv_layers: usize,
        vertices: Vec<MeshVertex>,
        faces: Vec<MeshFace>,
        morph_targets: Vec<MorphTarget>,
        relative: bool,
    }

    impl Default for TestMesh {
        fn default() -> Self {
            Self {
                name: "Cube".to_string(),
                world: glm::Mat4::identity(),
                material_names: vec!["Skin".to_string()],
                group_names: vec!["Root".to_string()],
                uv_layers: 1,
                vertices: Vec::new(),
                faces: Vec::new(),
                morph_targets: Vec::new(),
                relative: true,
            }
        }
    }

    impl MeshSource for TestMesh {
        fn name(&self) -> &str {
            &self.name
        }

        fn world_transform(&self) -> glm::Mat4 {
            self.world
        }

        fn material_names(&self) -> &[String] {
            &self.material_names
        }

        fn group_names(&self) -> &[String] {
            &self.group_names
        }

        fn uv_layer_count(&self) -> usize {
            self.uv_layers
        }

        fn vertices(&self) -> &[MeshVertex] {
            &self.vertices
        }

        fn faces(&self) -> &[MeshFace] {
            &self.faces
        }

        fn morph_targets(&self) -> &[MorphTarget] {
            &self.morph_targets
        }

        fn morphs_are_relative(&self) -> bool {
            self.relative
        }
    }

    fn vertex(x: f32, y: f32, z: f32) -> MeshVertex {
        MeshVertex {
            position: glm::vec3(x, y, z),
            normal: glm::vec3(0.0, 0.0, 1.0),
            groups: vec![(0, 1.0)],
        }
    }

    fn tri(corners: [u32; 3], uv: [[f32; 2]; 4]) -> MeshFace {
        MeshFace {
            corners,
            corner4: None,
            material_slot: 0,
            uvs: vec![uv],
            colors: None,
        }
    }

    fn one_bone_skeleton() -> Skeleton {
        Skeleton {
            name: "Armature".to_string(),
            bones: vec![Bone {
                id: 0,
                name: "Root".to_string(),
                parent: None,
                children: vec![],
                local_translation: [0.0; 3],
                local_rotation: [0.0, 0.0, 0.0, 1.0],
                bind_translation: [0.0; 3],
                bind_rotation: [0.0, 0.0, 0.0, 1.0],
                light_type: LightType::None,
                light_color: [0.5; 3],
            }],
            scene_ambient_color: None,
            anim_scale: [1.0; 3],
        }
    }

    fn materials() -> MaterialSet {
        MaterialSet::discover(&[MaterialDesc::new("Skin", vec!["skin.png".to_string()])])
    }

    fn quad_mesh() -> TestMesh {
        let uv = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        TestMesh {
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            faces: vec![MeshFace {
                corners: [0, 1, 2],
                corner4: Some(3),
                material_slot: 0,
                uvs: vec![uv],
                colors: None,
            }],
            ..TestMesh::default()
        }
    }

    #[test]
    fn shared_vertices_dedup_on_matching_uvs() {
        let uv1 = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let uv2 = [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];
        let mesh = TestMesh {
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            faces: vec![tri([0, 1, 2], uv1), tri([0, 2, 3], uv2)],
            ..TestMesh::default()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        // Corners 0 and 2 of the second face match the first face's uvs.
        let submesh = &built.submeshes[0];
        assert_eq!(submesh.vertices.len(), 4);
        assert_eq!(submesh.faces.len(), 2);
        assert_eq!(submesh.faces[1].vertices, [0, 2, 3]);
    }

    #[test]
    fn differing_uvs_create_a_duplicate_sharing_source_index() {
        let uv1 = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let uv2 = [[0.5, 0.5], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];
        let mesh = TestMesh {
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            faces: vec![tri([0, 1, 2], uv1), tri([0, 2, 3], uv2)],
            ..TestMesh::default()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        let submesh = &built.submeshes[0];
        // Corner 0 of face 2 has different uvs: a fifth vertex appears.
        assert_eq!(submesh.vertices.len(), 5);
        let duplicate = &submesh.vertices[4];
        assert_eq!(duplicate.source_index, 0);
        assert_eq!(duplicate.export_index, 4);
        assert_eq!(submesh.faces[1].vertices[0], 4);
    }

    #[test]
    fn color_differences_do_not_split_vertices() {
        let uv = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let red = [[1.0, 0.0, 0.0]; 4];
        let blue = [[0.0, 0.0, 1.0]; 4];
        let mesh = TestMesh {
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            faces: vec![
                MeshFace {
                    colors: Some(red),
                    ..tri([0, 1, 2], uv)
                },
                MeshFace {
                    colors: Some(blue),
                    ..tri([0, 2, 3], [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]])
                },
            ],
            ..TestMesh::default()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        // Vertex 0 is shared between the red and blue faces; the first
        // occurrence's color wins.
        let submesh = &built.submeshes[0];
        assert_eq!(submesh.vertices.len(), 4);
        assert_eq!(submesh.vertices[0].color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn quads_keep_their_identity_until_serialization() {
        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &quad_mesh(),
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        let submesh = &built.submeshes[0];
        assert_eq!(submesh.faces.len(), 1);
        assert_eq!(submesh.faces[0].vertex4, Some(3));
        assert_eq!(submesh.triangle_count(), 2);
    }

    #[test]
    fn v_coordinate_is_flipped() {
        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &quad_mesh(),
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        let maps = &built.submeshes[0].vertices[0].maps;
        assert_eq!(maps[0].u, 0.0);
        assert_eq!(maps[0].v, 1.0);
    }

    #[test]
    fn missing_uv_layers_fail_the_mesh() {
        let mesh = TestMesh {
            uv_layers: 0,
            ..quad_mesh()
        };
        let mut diags = Diagnostics::new();
        let result = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        );
        assert!(matches!(result, Err(ExportError::NoUvLayers(_))));
    }

    #[test]
    fn missing_skeleton_fails_the_mesh() {
        let mut diags = Diagnostics::new();
        let result = build_mesh(
            &quad_mesh(),
            None,
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        );
        assert!(matches!(result, Err(ExportError::NoSkeleton(_))));
    }

    #[test]
    fn unknown_material_slot_fails_the_mesh() {
        let mut mesh = quad_mesh();
        mesh.material_names = vec!["NotDiscovered".to_string()];
        let mut diags = Diagnostics::new();
        let result = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        );
        assert!(matches!(
            result,
            Err(ExportError::MaterialSlotMismatch { slot: 0, .. })
        ));
    }

    #[test]
    fn morph_tolerance_boundary() {
        let base = quad_mesh();
        let offset = |d: f32| MorphTarget {
            name: "Smile.Clamped".to_string(),
            positions: base
                .vertices
                .iter()
                .map(|v| v.position + glm::vec3(0.0, 0.0, d))
                .collect(),
            normals: base.vertices.iter().map(|v| v.normal).collect(),
        };
        let mesh = TestMesh {
            morph_targets: vec![offset(0.1), offset(0.0999)],
            ..quad_mesh()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        let morphs = &built.submeshes[0].morphs;
        assert_eq!(morphs.len(), 2);
        // A displacement of exactly 0.1 is included, just below is not.
        assert_eq!(morphs[0].blend_vertices.len(), 4);
        assert_eq!(morphs[1].blend_vertices.len(), 0);
        assert!((morphs[0].blend_vertices[0].posdiff - 0.1).abs() < 1e-6);
        assert_eq!(morphs[0].blend_vertices[0].export_index, 0);
    }

    #[test]
    fn nonconforming_morph_suffix_warns_but_exports() {
        let base = quad_mesh();
        let mesh = TestMesh {
            morph_targets: vec![MorphTarget {
                name: "Smile".to_string(),
                positions: base
                    .vertices
                    .iter()
                    .map(|v| v.position + glm::vec3(0.0, 0.0, 1.0))
                    .collect(),
                normals: base.vertices.iter().map(|v| v.normal).collect(),
            }],
            ..quad_mesh()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        assert_eq!(built.submeshes[0].morphs[0].name, "Smile");
        assert_eq!(built.submeshes[0].morphs[0].blend_vertices.len(), 4);
        assert!(diags.warning_count() >= 1);
    }

    #[test]
    fn mismatched_morph_vertex_count_skips_morphs_only() {
        let mesh = TestMesh {
            morph_targets: vec![MorphTarget {
                name: "Broken.Clamped".to_string(),
                positions: vec![glm::vec3(0.0, 0.0, 9.0)],
                normals: vec![glm::vec3(0.0, 0.0, 1.0)],
            }],
            ..quad_mesh()
        };

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        assert!(built.submeshes[0].morphs.is_empty());
        assert_eq!(built.submeshes[0].vertices.len(), 4);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn faces_split_into_submeshes_by_material() {
        let uv = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let mesh = TestMesh {
            material_names: vec!["Skin".to_string(), "Hair[2]".to_string()],
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(1.0, 1.0, 0.0),
                vertex(0.0, 1.0, 0.0),
            ],
            faces: vec![
                tri([0, 1, 2], uv),
                MeshFace {
                    material_slot: 1,
                    ..tri([0, 2, 3], uv)
                },
            ],
            ..TestMesh::default()
        };

        let mut material_set = MaterialSet::discover(&[
            MaterialDesc::new("Skin", vec!["skin.png".to_string()]),
            MaterialDesc::new("Hair[2]", vec!["hair.png".to_string()]),
        ]);

        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut material_set,
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        assert_eq!(built.submeshes.len(), 2);
        assert_eq!(built.submeshes[0].material_use_index, 0);
        // Hair[2] pins its used index explicitly.
        assert_eq!(built.submeshes[1].material_use_index, 2);
        // Vertices are per-submesh, both submeshes re-export shared corners.
        assert_eq!(built.submeshes[0].vertices.len(), 3);
        assert_eq!(built.submeshes[1].vertices.len(), 3);
    }

    #[test]
    fn builder_is_deterministic() {
        let mut diags = Diagnostics::new();
        let a = build_mesh(
            &quad_mesh(),
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();
        let b = build_mesh(
            &quad_mesh(),
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn zero_influence_vertices_warn_but_export() {
        let mut mesh = quad_mesh();
        for v in &mut mesh.vertices {
            v.groups.clear();
        }
        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        assert_eq!(built.submeshes[0].vertices.len(), 4);
        assert_eq!(diags.warning_count(), 4);
    }

    #[test]
    fn non_unit_scale_is_divided_out_of_translation() {
        let mut mesh = quad_mesh();
        mesh.world = glm::translation(&glm::vec3(2.0, 4.0, 8.0)) * glm::scaling(&glm::vec3(2.0, 2.0, 2.0));
        let mut diags = Diagnostics::new();
        let built = build_mesh(
            &mesh,
            Some(&one_bone_skeleton()),
            &mut materials(),
            &ExportConfig::default(),
            &mut diags,
        )
        .unwrap();

        // Translation (2, 4, 8) over scale 2: vertex 0 lands at (1, 2, 4).
        let v0 = &built.submeshes[0].vertices[0];
        assert!((v0.position[0] - 1.0).abs() < 1e-5);
        assert!((v0.position[1] - 2.0).abs() < 1e-5);
        assert!((v0.position[2] - 4.0).abs() < 1e-5);
        assert_eq!(diags.warning_count(), 1);
    }
}
