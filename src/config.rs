use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

use crate::transform::euler_xyz_to_quat;

/// User adjustments applied to every exported entity.
///
/// The base rotation/translation/scale re-express the whole rig in the
/// consuming engine's frame; `fps` converts host frame numbers into
/// keyframe seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base rotation as Euler XYZ angles in radians.
    pub base_rotation: [f32; 3],
    pub base_translation: [f32; 3],
    pub base_scale: f32,
    /// Playback rate keyframe times are normalized against. IMVU expects 30.
    pub fps: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_rotation: [0.0, 0.0, 0.0],
            base_translation: [0.0, 0.0, 0.0],
            base_scale: 1.0,
            fps: 30.0,
        }
    }
}

impl ExportConfig {
    pub fn base_rotation_quat(&self) -> glm::Quat {
        euler_xyz_to_quat(&self.base_rotation)
    }

    pub fn base_translation_vec(&self) -> glm::Vec3 {
        glm::vec3(
            self.base_translation[0],
            self.base_translation[1],
            self.base_translation[2],
        )
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
