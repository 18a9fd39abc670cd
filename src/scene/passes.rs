//! The ordered list of render passes run every frame

/// Which set of drawables a pass renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneGroup {
    World,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSlot {
    Orbit,
    Fixed,
}

/// What a pass clears before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    ColorAndDepth,
    /// Keep the previous pass's pixels; overlay content draws over them
    DepthOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPass {
    pub group: SceneGroup,
    pub camera: CameraSlot,
    pub clear: ClearMode,
}

/// World under the orbit camera, then the text overlay under the fixed camera
pub const DEFAULT_PASSES: [RenderPass; 2] = [
    RenderPass {
        group: SceneGroup::World,
        camera: CameraSlot::Orbit,
        clear: ClearMode::ColorAndDepth,
    },
    RenderPass {
        group: SceneGroup::Overlay,
        camera: CameraSlot::Fixed,
        clear: ClearMode::DepthOnly,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        assert_eq!(DEFAULT_PASSES[0].group, SceneGroup::World);
        assert_eq!(DEFAULT_PASSES[0].clear, ClearMode::ColorAndDepth);
        assert_eq!(DEFAULT_PASSES[1].camera, CameraSlot::Fixed);
        assert_eq!(DEFAULT_PASSES[1].clear, ClearMode::DepthOnly);
    }
}
