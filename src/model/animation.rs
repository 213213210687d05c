use serde::{Deserialize, Serialize};

/// One sampled pose of one bone. `time` is seconds from animation start;
/// translation and rotation are the full bone-local pose, bind pose
/// already composed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFrame {
    pub time: f32,
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub bone_id: u32,
    pub keyframes: Vec<KeyFrame>,
}

/// A skeletal animation. Tracks are sorted by bone id; all tracks share
/// one duration derived from the keyframe extrema across the whole action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MorphKeyFrame {
    pub time: f32,
    pub weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphTrack {
    pub morph_name: String,
    pub keyframes: Vec<MorphKeyFrame>,
}

/// A morph-weight animation. Text-dialect only; duration comes from the
/// action's own frame range rather than keyframe extrema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphAnimation {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<MorphTrack>,
}
