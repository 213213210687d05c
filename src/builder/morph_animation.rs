use crate::config::ExportConfig;
use crate::diagnostics::Diagnostics;
use crate::host::MorphActionSource;
use crate::model::{MorphAnimation, MorphKeyFrame, MorphTrack};

/// Build a morph-weight animation from a shape-key action.
///
/// Much simpler than the skeletal path: no pose composition and no bind
/// dependency. Duration comes from the action's own frame range, and
/// keyframes are the raw curve points at `frame / fps`.
pub fn build_morph_animation(
    source: &dyn MorphActionSource,
    config: &ExportConfig,
    diags: &mut Diagnostics,
) -> Option<MorphAnimation> {
    let (start, end) = source.frame_range();
    let mut animation = MorphAnimation {
        name: source.name().to_string(),
        duration: (end - start) / config.fps,
        tracks: Vec::new(),
    };

    for curve in source.curves() {
        let Some(morph_name) = morph_name_from_data_path(curve.data_path()) else {
            diags.warning(format!(
                "morph action `{}`: unexpected data path `{}`; curve skipped",
                source.name(),
                curve.data_path()
            ));
            continue;
        };

        let points = curve.keyframes();
        if points.is_empty() {
            diags.warning(format!("no keyframe points for morph `{morph_name}`"));
        }

        let keyframes = points
            .iter()
            .map(|&(frame, value)| MorphKeyFrame {
                time: frame / config.fps,
                weight: value,
            })
            .collect();

        animation.tracks.push(MorphTrack {
            morph_name,
            keyframes,
        });
    }

    if animation.tracks.is_empty() {
        return None;
    }
    Some(animation)
}

/// A morph curve's data path must reference a shape key:
/// `key_blocks["<name>"]...`. Anything else fails to parse.
fn morph_name_from_data_path(data_path: &str) -> Option<String> {
    if !data_path.starts_with("key_blocks[") {
        return None;
    }
    let parts: Vec<&str> = data_path.split('"').collect();
    if parts.len() == 3 {
        Some(parts[1].to_string())
    } else {
        None
    }
}
