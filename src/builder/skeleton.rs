use nalgebra_glm as glm;

use crate::diagnostics::Diagnostics;
use crate::host::{BoneNode, BoneSource};
use crate::model::{Bone, LightType, Skeleton};
use crate::transform::{
    compose_matrix, decompose_transform, quat_to_array, rotation_matrix_to_quat, transform_point,
    vec3_to_array,
};

/// Fallback color for a light-proxy bone with no matching host light.
const DEFAULT_LIGHT_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Build the skeleton IR from a host armature.
///
/// Depth-first pre-order over the host's root bones, in host order, so bone
/// ids are dense and every parent id is smaller than its children's. Bones
/// whose name starts with `_` are skipped together with their whole
/// subtree; that is the convention for non-exportable helper bones.
pub fn build_skeleton(source: &dyn BoneSource, diags: &mut Diagnostics) -> Skeleton {
    let armature_world = source.world_transform();
    let (_, _, anim_scale) = decompose_transform(&armature_world);

    let mut skeleton = Skeleton {
        name: source.name().to_string(),
        bones: Vec::new(),
        scene_ambient_color: source.ambient_color(),
        anim_scale: vec3_to_array(&anim_scale),
    };
    let mut world_matrices: Vec<glm::Mat4> = Vec::new();

    for root in source.root_bones() {
        treat_bone(
            root,
            None,
            source,
            &armature_world,
            &mut skeleton,
            &mut world_matrices,
            diags,
        );
    }

    skeleton
}

fn treat_bone(
    node: &BoneNode,
    parent: Option<(u32, &BoneNode)>,
    source: &dyn BoneSource,
    armature_world: &glm::Mat4,
    skeleton: &mut Skeleton,
    world_matrices: &mut Vec<glm::Mat4>,
    diags: &mut Diagnostics,
) {
    // Skipping a bone skips its children too.
    if node.name.is_empty() || node.name.starts_with('_') {
        return;
    }

    let translation = match parent {
        // Translation from the parent's head to this bone's head, expressed
        // in the parent's bone space.
        Some((_, parent_node)) => {
            let offset = node.armature_translation - parent_node.armature_translation;
            glm::quat_rotate_vec3(&glm::quat_inverse(&parent_node.armature_rotation), &offset)
        }
        // Roots anchor at their world-space head.
        None => transform_point(armature_world, &node.armature_translation),
    };
    let rotation = node.rotation;

    let local_matrix = compose_matrix(&rotation, &translation);
    let world_matrix = match parent {
        Some((parent_id, _)) => world_matrices[parent_id as usize] * local_matrix,
        None => local_matrix,
    };

    // The bind pose is the inverse of the accumulated world transform, not
    // of the local transform alone.
    let bind_matrix = glm::inverse(&world_matrix);
    let bind_translation = glm::vec3(bind_matrix[(0, 3)], bind_matrix[(1, 3)], bind_matrix[(2, 3)]);
    let bind_rotation = rotation_matrix_to_quat(&glm::mat4_to_mat3(&bind_matrix));

    let (light_type, light_color) = classify_light(node, source, diags);

    let id = skeleton.bones.len() as u32;
    skeleton.bones.push(Bone {
        id,
        name: node.name.clone(),
        parent: parent.map(|(parent_id, _)| parent_id),
        children: Vec::new(),
        local_translation: vec3_to_array(&translation),
        local_rotation: quat_to_array(&rotation),
        bind_translation: vec3_to_array(&bind_translation),
        bind_rotation: quat_to_array(&bind_rotation),
        light_type,
        light_color,
    });
    world_matrices.push(world_matrix);

    if let Some((parent_id, _)) = parent {
        skeleton.bones[parent_id as usize].children.push(id);
    }

    for child in &node.children {
        treat_bone(
            child,
            Some((id, node)),
            source,
            armature_world,
            skeleton,
            world_matrices,
            diags,
        );
    }
}

fn classify_light(
    node: &BoneNode,
    source: &dyn BoneSource,
    diags: &mut Diagnostics,
) -> (LightType, [f32; 3]) {
    let lower = node.name.to_lowercase();
    let light_type = if lower.starts_with("omni") {
        LightType::Omni
    } else if lower.starts_with("spot") {
        LightType::Spot
    } else {
        return (LightType::None, DEFAULT_LIGHT_COLOR);
    };

    let color = match source.light_color(&node.name) {
        Some(color) => color,
        None => {
            diags.warning(format!(
                "no light found matching bone `{}`; using default color",
                node.name
            ));
            DEFAULT_LIGHT_COLOR
        }
    };
    (light_type, color)
}
