use nalgebra_glm as glm;

use crate::config::ExportConfig;
use crate::diagnostics::Diagnostics;
use crate::host::{ActionSource, CurveSource};
use crate::model::{Animation, KeyFrame, Skeleton, Track};
use crate::transform::{
    array_to_quat, array_to_vec3, quat_to_array, scale_rotate_translate, vec3_to_array,
};

/// Build one skeletal animation from a host action.
///
/// Returns `None` when no curve group matches a skeleton bone or no group
/// carries keyframes; an animation with zero tracks is never emitted.
pub fn build_animation(
    source: &dyn ActionSource,
    skeleton: &Skeleton,
    config: &ExportConfig,
    diags: &mut Diagnostics,
) -> Option<Animation> {
    let mut animation = Animation {
        name: source.name().to_string(),
        duration: 0.0,
        tracks: Vec::new(),
    };

    // One shared pair of bounds for the whole action, not per bone.
    let mut bounds: Option<(f32, f32)> = None;
    let anim_scale = array_to_vec3(&skeleton.anim_scale);

    for group in source.groups() {
        let Some(bone) = skeleton.bone_by_name(&group.name) else {
            diags.warning(format!(
                "no bone found corresponding to action group `{}`",
                group.name
            ));
            continue;
        };

        let loc_x = find_curve(&group.curves, "location", 0);
        let loc_y = find_curve(&group.curves, "location", 1);
        let loc_z = find_curve(&group.curves, "location", 2);

        // Rotation curves index W first: channel 0 is W, 1..3 are X, Y, Z.
        let quat_w = find_curve(&group.curves, "rotation_quaternion", 0);
        let quat_x = find_curve(&group.curves, "rotation_quaternion", 1);
        let quat_y = find_curve(&group.curves, "rotation_quaternion", 2);
        let quat_z = find_curve(&group.curves, "rotation_quaternion", 3);

        let mut times: Vec<f32> = Vec::new();
        for curve in [loc_x, loc_y, loc_z, quat_x, quat_y, quat_z, quat_w]
            .into_iter()
            .flatten()
        {
            times.extend(curve.keyframes().iter().map(|&(frame, _)| frame));
        }
        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times.dedup();

        if times.is_empty() {
            diags.warning(format!("no keyframes in action group `{}`", group.name));
            continue;
        }

        let first = times[0];
        let last = *times.last().unwrap_or(&first);
        bounds = Some(match bounds {
            None => (first, last),
            Some((lo, hi)) => (lo.min(first), hi.max(last)),
        });

        let bone_rotation = array_to_quat(&bone.local_rotation);
        let bone_translation = array_to_vec3(&bone.local_translation);

        let mut track = Track {
            bone_id: bone.id,
            keyframes: Vec::with_capacity(times.len()),
        };

        for &frame in &times {
            let delta_translation = glm::vec3(
                evaluate(loc_x, frame, 0.0),
                evaluate(loc_y, frame, 0.0),
                evaluate(loc_z, frame, 0.0),
            );
            // An absent rotation curve means the identity pose, so W
            // defaults to 1 while X, Y, Z default to 0.
            let delta_rotation = glm::quat(
                evaluate(quat_x, frame, 0.0),
                evaluate(quat_y, frame, 0.0),
                evaluate(quat_z, frame, 0.0),
                evaluate(quat_w, frame, 1.0),
            );

            let rotation = glm::quat_normalize(&(bone_rotation * delta_rotation));
            let translation = scale_rotate_translate(
                &delta_translation,
                &anim_scale,
                &bone_rotation,
                &bone_translation,
            );

            track.keyframes.push(KeyFrame {
                time: frame,
                translation: vec3_to_array(&translation),
                rotation: quat_to_array(&rotation),
            });
        }

        if !track.keyframes.is_empty() {
            animation.tracks.push(track);
        }
    }

    if animation.tracks.is_empty() {
        return None;
    }

    let (first, last) = bounds?;
    animation.duration = (last - first) / config.fps;
    animation.tracks.sort_by_key(|track| track.bone_id);

    // Re-base every keyframe onto a 0-based time axis in seconds.
    for track in &mut animation.tracks {
        for keyframe in &mut track.keyframes {
            keyframe.time = (keyframe.time - first) / config.fps;
        }
    }

    Some(animation)
}

fn find_curve<'a>(
    curves: &[&'a dyn CurveSource],
    data_path: &str,
    array_index: u32,
) -> Option<&'a dyn CurveSource> {
    curves
        .iter()
        .copied()
        .find(|curve| curve.data_path().contains(data_path) && curve.array_index() == array_index)
}

fn evaluate(curve: Option<&dyn CurveSource>, frame: f32, default: f32) -> f32 {
    curve.map_or(default, |curve| curve.evaluate(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CurveGroup;
    use crate::model::{Bone, LightType};

    struct TestCurve {
        data_path: String,
        array_index: u32,
        points: Vec<(f32, f32)>,
    }

    impl TestCurve {
        fn new(data_path: &str, array_index: u32, points: Vec<(f32, f32)>) -> Self {
            Self {
                data_path: data_path.to_string(),
                array_index,
                points,
            }
        }
    }

    impl CurveSource for TestCurve {
        fn data_path(&self) -> &str {
            &self.data_path
        }

        fn array_index(&self) -> u32 {
            self.array_index
        }

        fn keyframes(&self) -> Vec<(f32, f32)> {
            self.points.clone()
        }

        fn evaluate(&self, frame: f32) -> f32 {
            // Linear interpolation is enough for test curves.
            if self.points.is_empty() {
                return 0.0;
            }
            if frame <= self.points[0].0 {
                return self.points[0].1;
            }
            for pair in self.points.windows(2) {
                let (f0, v0) = pair[0];
                let (f1, v1) = pair[1];
                if frame <= f1 {
                    let t = (frame - f0) / (f1 - f0);
                    return v0 + (v1 - v0) * t;
                }
            }
            self.points.last().unwrap().1
        }
    }

    struct TestAction {
        name: String,
        groups: Vec<(String, Vec<TestCurve>)>,
    }

    impl ActionSource for TestAction {
        fn name(&self) -> &str {
            &self.name
        }

        fn groups(&self) -> Vec<CurveGroup<'_>> {
            self.groups
                .iter()
                .map(|(name, curves)| CurveGroup {
                    name: name.clone(),
                    curves: curves.iter().map(|c| c as &dyn CurveSource).collect(),
                })
                .collect()
        }
    }

    fn skeleton_with_bone(name: &str) -> Skeleton {
        Skeleton {
            name: "Armature".to_string(),
            bones: vec![Bone {
                id: 0,
                name: name.to_string(),
                parent: None,
                children: vec![],
                local_translation: [0.0, 2.0, 0.0],
                local_rotation: [0.0, 0.0, 0.0, 1.0],
                bind_translation: [0.0, -2.0, 0.0],
                bind_rotation: [0.0, 0.0, 0.0, 1.0],
                light_type: LightType::None,
                light_color: [0.5; 3],
            }],
            scene_ambient_color: None,
            anim_scale: [1.0; 3],
        }
    }

    #[test]
    fn times_are_normalized_to_zero_at_fps() {
        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![(
                "Spine".to_string(),
                vec![TestCurve::new(
                    "location",
                    0,
                    vec![(10.0, 0.0), (25.0, 1.0), (40.0, 0.0)],
                )],
            )],
        };
        let skeleton = skeleton_with_bone("Spine");
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        assert!((animation.duration - 1.0).abs() < 1e-6);
        let times: Vec<f32> = animation.tracks[0]
            .keyframes
            .iter()
            .map(|k| k.time)
            .collect();
        assert!((times[0] - 0.0).abs() < 1e-6);
        assert!((times[1] - 0.5).abs() < 1e-6);
        assert!((times[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn keyframe_times_union_across_channels() {
        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![(
                "Spine".to_string(),
                vec![
                    TestCurve::new("location", 0, vec![(0.0, 0.0), (10.0, 1.0)]),
                    TestCurve::new("rotation_quaternion", 0, vec![(5.0, 1.0)]),
                ],
            )],
        };
        let skeleton = skeleton_with_bone("Spine");
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        assert_eq!(animation.tracks[0].keyframes.len(), 3);
    }

    #[test]
    fn absent_curves_default_to_identity_pose() {
        let action = TestAction {
            name: "Nod".to_string(),
            groups: vec![(
                "Spine".to_string(),
                vec![TestCurve::new("location", 1, vec![(0.0, 0.5)])],
            )],
        };
        let skeleton = skeleton_with_bone("Spine");
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        let keyframe = &animation.tracks[0].keyframes[0];
        // Identity rotation composed with the bind rotation stays identity.
        assert!((keyframe.rotation[3] - 1.0).abs() < 1e-6);
        // Sampled (0, 0.5, 0) adds onto the rest translation (0, 2, 0).
        assert!((keyframe.translation[1] - 2.5).abs() < 1e-6);
    }

    #[test]
    fn unmatched_group_warns_and_is_skipped() {
        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![
                (
                    "NotABone".to_string(),
                    vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
                ),
                (
                    "Spine".to_string(),
                    vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
                ),
            ],
        };
        let skeleton = skeleton_with_bone("Spine");
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        assert_eq!(animation.tracks.len(), 1);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn action_with_no_matching_bones_yields_nothing() {
        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![(
                "NotABone".to_string(),
                vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
            )],
        };
        let skeleton = skeleton_with_bone("Spine");
        let mut diags = Diagnostics::new();
        let animation = build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags);
        assert!(animation.is_none());
    }

    #[test]
    fn anim_scale_is_applied_to_sampled_translation() {
        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![(
                "Spine".to_string(),
                vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
            )],
        };
        let mut skeleton = skeleton_with_bone("Spine");
        skeleton.anim_scale = [3.0, 1.0, 1.0];
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        let keyframe = &animation.tracks[0].keyframes[0];
        assert!((keyframe.translation[0] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn tracks_are_sorted_by_bone_id() {
        let mut skeleton = skeleton_with_bone("Root");
        skeleton.bones.push(Bone {
            id: 1,
            name: "Spine".to_string(),
            parent: Some(0),
            children: vec![],
            local_translation: [0.0; 3],
            local_rotation: [0.0, 0.0, 0.0, 1.0],
            bind_translation: [0.0; 3],
            bind_rotation: [0.0, 0.0, 0.0, 1.0],
            light_type: LightType::None,
            light_color: [0.5; 3],
        });
        skeleton.bones[0].children.push(1);

        let action = TestAction {
            name: "Walk".to_string(),
            groups: vec![
                (
                    "Spine".to_string(),
                    vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
                ),
                (
                    "Root".to_string(),
                    vec![TestCurve::new("location", 0, vec![(0.0, 1.0)])],
                ),
            ],
        };
        let mut diags = Diagnostics::new();
        let animation =
            build_animation(&action, &skeleton, &ExportConfig::default(), &mut diags).unwrap();

        let ids: Vec<u32> = animation.tracks.iter().map(|t| t.bone_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
