/// One animation curve. Keyframe evaluation at arbitrary times stays on the
/// host side, where the interpolation mode of each curve is known.
pub trait CurveSource {
    /// The host property path this curve animates, e.g. `location` or
    /// `pose.bones["Spine"].rotation_quaternion` or `key_blocks["Smile"].value`.
    fn data_path(&self) -> &str;

    /// Component index within the property. Rotation quaternions index
    /// W as 0 and X/Y/Z as 1..3.
    fn array_index(&self) -> u32;

    /// Raw keyframe control points as `(frame, value)` pairs.
    fn keyframes(&self) -> Vec<(f32, f32)>;

    /// Interpolated curve value at an arbitrary frame.
    fn evaluate(&self, frame: f32) -> f32;
}

/// Curves of one action bundled under the bone name they animate.
pub struct CurveGroup<'a> {
    pub name: String,
    pub curves: Vec<&'a dyn CurveSource>,
}

/// A skeletal action: named curve groups, one per animated bone.
pub trait ActionSource {
    fn name(&self) -> &str;

    fn groups(&self) -> Vec<CurveGroup<'_>>;
}

/// A shape-key action: a flat curve list, each curve driving one morph
/// weight, plus the action's own frame range.
pub trait MorphActionSource {
    fn name(&self) -> &str;

    /// `(start_frame, end_frame)` of the action.
    fn frame_range(&self) -> (f32, f32);

    fn curves(&self) -> Vec<&dyn CurveSource>;
}
