use nalgebra_glm as glm;

/// One bone of the host armature's rest pose.
///
/// `rotation` is the bone's orientation relative to its parent bone;
/// `armature_translation`/`armature_rotation` are the bone head and
/// orientation in armature space. Children appear in the host's own order,
/// which the exporter preserves when assigning bone ids.
#[derive(Debug, Clone)]
pub struct BoneNode {
    pub name: String,
    pub rotation: glm::Quat,
    pub armature_translation: glm::Vec3,
    pub armature_rotation: glm::Quat,
    pub children: Vec<BoneNode>,
}

/// An armature object: the bone tree plus the object's world transform.
pub trait BoneSource {
    fn name(&self) -> &str;

    /// World transform of the armature object itself.
    fn world_transform(&self) -> glm::Mat4;

    fn root_bones(&self) -> &[BoneNode];

    /// Color of the host light whose name matches `name` exactly, if any.
    /// Queried for bones tagged as light proxies.
    fn light_color(&self, name: &str) -> Option<[f32; 3]>;

    /// Scene-level ambient color, if the host scene defines one.
    fn ambient_color(&self) -> Option<[f32; 3]> {
        None
    }
}
