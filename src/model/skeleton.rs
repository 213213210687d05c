use serde::{Deserialize, Serialize};

/// Cal3D bone light proxy type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    #[default]
    None,
    Omni,
    Spot,
}

impl LightType {
    /// Numeric value used by the skeleton text dialect.
    pub fn cal3d_value(&self) -> u32 {
        match self {
            LightType::None => 0,
            LightType::Omni => 1,
            LightType::Spot => 3,
        }
    }
}

/// One bone in the arena. `parent`/`children` are bone ids, never owning
/// references, so the hierarchy can be walked both ways without ownership
/// cycles.
///
/// `local_*` is the rest transform relative to the parent bone; `bind_*` is
/// the inverse of the accumulated world transform down to this bone, the
/// matrix runtime skinning multiplies against. A parent id is always
/// smaller than its children's ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bone {
    pub id: u32,
    pub name: String,
    pub parent: Option<u32>,
    pub children: Vec<u32>,
    pub local_translation: [f32; 3],
    pub local_rotation: [f32; 4],
    pub bind_translation: [f32; 3],
    pub bind_rotation: [f32; 4],
    pub light_type: LightType,
    pub light_color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    pub name: String,
    /// Bones in id order; `bones[i].id == i`.
    pub bones: Vec<Bone>,
    pub scene_ambient_color: Option<[f32; 3]>,
    /// Armature world scale, applied to sampled keyframe translations.
    pub anim_scale: [f32; 3],
}

impl Skeleton {
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.name == name)
    }
}
