//! Provides the host-engine adapter trait the pipeline drives.
//!
//! The embedding 3D application owns a single scene graph, importers, and
//! offscreen capture routines. The pipeline never talks to the host directly;
//! it drives this trait, so host integrations and test fakes are
//! interchangeable. Whichever pipeline step currently holds the engine may
//! assume nothing about scene contents beyond what it just loaded itself.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by a host-engine adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host rejected or could not parse the file.
    #[error("import failed: {0}")]
    Import(String),
    /// An offscreen capture call failed.
    #[error("capture failed: {0}")]
    Capture(String),
    /// An optional host plugin could not be enabled.
    #[error("plugin unavailable: {0}")]
    Plugin(String),
    /// A scene-graph operation (reset, open, select, frame) failed.
    #[error("scene operation failed: {0}")]
    Scene(String),
    /// The filesystem was unavailable for an artifact write.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opaque handle to a renderable mesh shape in the host scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshHandle(pub String);

impl MeshHandle {
    /// Returns the host-side node name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An opaque handle to a transform node (a mesh's parent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformHandle(pub String);

impl TransformHandle {
    /// Returns the host-side node name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An opaque handle to a renderable viewport panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelHandle(pub String);

/// An opaque handle to whatever UI element held focus before the pipeline
/// took over, so it can be handed back afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget(pub String);

/// An animatable rotation channel on a transform node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    RotateX,
    /// The vertical axis; turntable clips keyframe this one.
    RotateY,
    RotateZ,
}

/// The contract a host integration implements so the pipeline can import
/// models, frame them, and capture offscreen snapshots.
///
/// All scene-mutating calls are synchronous and blocking; there is exactly one
/// scene graph behind an implementation and only one import/render cycle may
/// be in flight at a time.
pub trait SceneEngine {
    /// Returns the host application's version string.
    fn version(&self) -> String;

    /// Reports whether the host is running headless (batch mode).
    fn is_batch_mode(&self) -> bool;

    /// Returns the operating-system identity of the current user.
    fn current_user(&self) -> String;

    /// Probes an optional host capability by name, resolved once at startup
    /// by the integration rather than try-and-ignore at each call site.
    fn has_capability(&self, name: &str) -> bool;

    /// Enables an optional host plugin. Callers treat failure as non-fatal;
    /// a genuinely required plugin makes the subsequent import fail loudly.
    ///
    /// # Errors
    /// Returns an error if the plugin cannot be loaded.
    fn enable_plugin(&mut self, name: &str) -> Result<(), EngineError>;

    /// Resets the host to an empty scene, discarding any unsaved state.
    ///
    /// # Errors
    /// Returns an error if the host refuses the reset.
    fn reset_scene(&mut self) -> Result<(), EngineError>;

    /// Returns the path of the currently open scene file, if a saved scene
    /// is open.
    fn current_scene(&self) -> Option<PathBuf>;

    /// Opens a saved scene file, replacing the current scene.
    ///
    /// # Errors
    /// Returns an error if the scene cannot be opened.
    fn open_scene(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Imports a model file's contents into the current scene.
    ///
    /// # Errors
    /// Returns an error for malformed or unsupported content.
    fn import_file(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Enumerates renderable mesh shapes in the current scene, in host order.
    fn meshes(&self) -> Vec<MeshHandle>;

    /// Returns the parent transform node of a mesh shape.
    ///
    /// # Errors
    /// Returns an error if the mesh has no parent transform.
    fn parent_transform(&self, mesh: &MeshHandle) -> Result<TransformHandle, EngineError>;

    /// Replaces the active selection with the given node.
    ///
    /// # Errors
    /// Returns an error if the node no longer exists.
    fn select_node(&mut self, node: &TransformHandle) -> Result<(), EngineError>;

    /// Clears the active selection. Selection highlighting must never appear
    /// in captured output.
    fn clear_selection(&mut self);

    /// Fits the camera view to frame the current selection exactly.
    ///
    /// # Errors
    /// Returns an error if no viewport camera is available.
    fn frame_selection(&mut self) -> Result<(), EngineError>;

    /// Locates or creates a renderable viewport panel.
    ///
    /// # Errors
    /// Returns an error if the host cannot supply a panel.
    fn render_panel(&mut self) -> Result<PanelHandle, EngineError>;

    /// Toggles grid/ornament overlays on a panel.
    ///
    /// # Errors
    /// Returns an error if the panel no longer exists.
    fn set_panel_overlays(&mut self, panel: &PanelHandle, enabled: bool)
        -> Result<(), EngineError>;

    /// Renders one offscreen frame at the given resolution, overwriting any
    /// existing file at `output`.
    ///
    /// # Errors
    /// Returns an error if the capture or the artifact write fails.
    fn capture_frame(&mut self, output: &Path, width: u32, height: u32)
        -> Result<(), EngineError>;

    /// Renders an offscreen frame range to a near-uncompressed motion clip,
    /// overwriting any existing file at `output`.
    ///
    /// # Errors
    /// Returns an error if the capture or the artifact write fails.
    fn capture_range(
        &mut self,
        output: &Path,
        start_frame: i32,
        end_frame: i32,
        width: u32,
        height: u32,
    ) -> Result<(), EngineError>;

    /// Sets an animation keyframe on a transform's rotation channel.
    ///
    /// # Errors
    /// Returns an error if the node no longer exists.
    fn set_keyframe(
        &mut self,
        node: &TransformHandle,
        channel: Channel,
        frame: i32,
        value: f64,
    ) -> Result<(), EngineError>;

    /// Captures the UI element that currently holds focus, if any.
    fn focus_target(&self) -> Option<FocusTarget>;

    /// Hands focus back to a previously captured target.
    fn restore_focus(&mut self, target: &FocusTarget);

    /// Returns the vertex count of a mesh.
    ///
    /// # Errors
    /// Returns an error if the mesh cannot be interrogated.
    fn vertex_count(&self, mesh: &MeshHandle) -> Result<u64, EngineError>;

    /// Returns the per-polygon vertex counts of a mesh, in polygon order.
    ///
    /// # Errors
    /// Returns an error if the mesh cannot be interrogated.
    fn polygon_sides(&self, mesh: &MeshHandle) -> Result<Vec<u32>, EngineError>;

    /// Returns the mesh's UV set names in host order.
    ///
    /// # Errors
    /// Returns an error if the mesh cannot be interrogated.
    fn uv_set_names(&self, mesh: &MeshHandle) -> Result<Vec<String>, EngineError>;
}

/// Maps a source-model extension to the optional host plugin it needs, if any.
///
/// # Examples
/// ```
/// use turntable::engine::plugin_for_extension;
///
/// assert_eq!(plugin_for_extension("FBX"), Some("fbxmaya"));
/// assert_eq!(plugin_for_extension("obj"), None);
/// ```
pub fn plugin_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "fbx" => Some("fbxmaya"),
        _ => None,
    }
}
