//! Rendering seam between the simulation and whatever draws the scene.
//!
//! The engine only ever creates visuals, pushes pose/visibility, updates the
//! projection, and releases visuals on dispose. Swapping rendering backends
//! means implementing [`RenderBackend`].

use std::collections::HashMap;

use arshooter_core::components::Pose;
use arshooter_core::enums::TargetShape;
use arshooter_core::types::{Projection, Viewer, VisualHandle};

/// A scene renderer driven by the engine.
pub trait RenderBackend {
    /// Allocate a renderable for a target.
    fn create_visual(&mut self, shape: TargetShape, color: u32) -> VisualHandle;
    /// Push the latest pose and visibility of a renderable.
    fn update_visual(&mut self, handle: VisualHandle, pose: &Pose, visible: bool);
    /// Free the renderable and any GPU-side resources it owns.
    fn release_visual(&mut self, handle: VisualHandle);
    /// Apply new projection parameters after a viewport change.
    fn set_projection(&mut self, projection: &Projection);
    /// Draw one frame from the viewer's point of view.
    fn render_frame(&mut self, viewer: &Viewer);
}

/// Last state pushed for one visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualRecord {
    pub shape: TargetShape,
    pub color: u32,
    pub pose: Pose,
    pub visible: bool,
}

/// Backend without a graphics context. Keeps the scene in memory so the
/// simulation can run in tests and in the terminal host.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    visuals: HashMap<VisualHandle, VisualRecord>,
    projection: Option<Projection>,
    frames_rendered: u64,
    released: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.visuals.get(&handle)
    }

    /// Number of live (allocated, not released) visuals.
    pub fn live_visuals(&self) -> usize {
        self.visuals.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visuals.values().filter(|v| v.visible).count()
    }

    pub fn projection(&self) -> Option<Projection> {
        self.projection
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Total release calls that freed a live visual.
    pub fn released(&self) -> u64 {
        self.released
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_visual(&mut self, shape: TargetShape, color: u32) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(
            handle,
            VisualRecord {
                shape,
                color,
                pose: Pose::default(),
                visible: false,
            },
        );
        handle
    }

    fn update_visual(&mut self, handle: VisualHandle, pose: &Pose, visible: bool) {
        if let Some(record) = self.visuals.get_mut(&handle) {
            record.pose = *pose;
            record.visible = visible;
        }
    }

    fn release_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_some() {
            self.released += 1;
        }
    }

    fn set_projection(&mut self, projection: &Projection) {
        self.projection = Some(*projection);
    }

    fn render_frame(&mut self, _viewer: &Viewer) {
        self.frames_rendered += 1;
    }
}
