//! Provides single-asset thumbnail generation: one model in, one static image
//! and one turntable clip out.
//!
//! Each call imports the model into a fresh scene, frames the first piece of
//! renderable geometry, captures an offscreen frame, keyframes a 360° rotation
//! on the vertical axis and captures the frame range as a clip. The scene
//! reset is destructive by design; any unsaved host state is discarded. UI
//! focus is captured before the run and handed back afterwards on success and
//! failure alike. Every failure becomes exactly one entry in the error report
//! before it is returned to the caller.

use std::error::Error as _;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::extension_of;
use crate::engine::{plugin_for_extension, Channel, EngineError, SceneEngine, TransformHandle};
use crate::report::{ErrorReportEntry, ReportSink};

/// Default square resolution for the static image and the clip.
pub const DEFAULT_IMAGE_SIZE: u32 = 256;

/// Default turntable length in frames.
pub const DEFAULT_CLIP_FRAMES: u32 = 60;

/// Errors terminating one asset's generation. Each is recorded once in the
/// error report before being returned; none aborts a surrounding batch.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Import succeeded but the scene contains no renderable geometry.
    #[error("no geometry found")]
    NoGeometry,
    /// The host rejected or could not parse the model file.
    #[error("import failed")]
    Import(#[source] EngineError),
    /// The offscreen capture call failed.
    #[error("capture failed")]
    Capture(#[source] EngineError),
    /// Scene setup (reset, selection, framing, panel) failed.
    #[error("scene setup failed")]
    Scene(#[source] EngineError),
}

/// Tunable parameters for one generation run.
///
/// # Examples
/// ```
/// use turntable::generator::GenerateOptions;
///
/// let options = GenerateOptions::default();
/// assert_eq!(options.image_size, 256);
/// assert_eq!(options.clip_frames, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Width and height of both artifacts, in pixels.
    pub image_size: u32,
    /// Number of frames in the turntable clip.
    pub clip_frames: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            clip_frames: DEFAULT_CLIP_FRAMES,
        }
    }
}

/// Generates both thumbnail artifacts for one model.
///
/// On success both output files exist and are non-empty. On failure the host
/// scene is left in whatever partial state the failing step produced; the next
/// run always starts with its own scene reset. Re-running with the same inputs
/// produces equivalent but not necessarily byte-identical artifacts.
///
/// # Errors
/// Returns the failure after recording it in the report sink. A sink write
/// failure is logged and does not mask the original error.
pub fn generate(
    engine: &mut dyn SceneEngine,
    model: &Path,
    image_out: &Path,
    clip_out: &Path,
    options: &GenerateOptions,
    sink: &ReportSink,
) -> Result<(), GenerateError> {
    let focus = engine.focus_target();

    let result = capture_asset(engine, model, image_out, clip_out, options);

    // Focus goes back regardless of outcome; the scene does not.
    if let Some(target) = &focus {
        engine.restore_focus(target);
    }

    match &result {
        Ok(()) => debug!(model = %model.display(), "thumbnail generated"),
        Err(err) => {
            let entry = failure_entry(&*engine, model, image_out, err);
            if let Err(report_err) = sink.append(entry) {
                warn!(
                    report = %sink.path().display(),
                    error = %report_err,
                    "failed to record thumbnail failure"
                );
            }
        }
    }

    result
}

fn capture_asset(
    engine: &mut dyn SceneEngine,
    model: &Path,
    image_out: &Path,
    clip_out: &Path,
    options: &GenerateOptions,
) -> Result<(), GenerateError> {
    engine.reset_scene().map_err(GenerateError::Scene)?;

    // Optional interchange plugin: failure here is non-fatal, the import
    // itself fails loudly if the plugin was actually required.
    if let Some(plugin) = extension_of(model).as_deref().and_then(plugin_for_extension) {
        if let Err(err) = engine.enable_plugin(plugin) {
            warn!(plugin, error = %err, "plugin enable failed, proceeding with import");
        }
    }

    engine.import_file(model).map_err(GenerateError::Import)?;

    let meshes = engine.meshes();
    let first = meshes.first().ok_or(GenerateError::NoGeometry)?;
    let transform = engine.parent_transform(first).map_err(GenerateError::Scene)?;

    engine.select_node(&transform).map_err(GenerateError::Scene)?;
    engine.frame_selection().map_err(GenerateError::Scene)?;

    let panel = engine.render_panel().map_err(GenerateError::Scene)?;
    engine
        .set_panel_overlays(&panel, false)
        .map_err(GenerateError::Scene)?;

    // Selection highlighting must not appear in the output.
    engine.clear_selection();

    engine
        .capture_frame(image_out, options.image_size, options.image_size)
        .map_err(GenerateError::Capture)?;

    keyframe_turntable(engine, &transform, options.clip_frames)?;
    engine
        .capture_range(
            clip_out,
            1,
            options.clip_frames as i32,
            options.image_size,
            options.image_size,
        )
        .map_err(GenerateError::Capture)?;

    Ok(())
}

/// Keyframes a full rotation on the vertical axis: 0° at frame 1, 360° at the
/// final frame.
fn keyframe_turntable(
    engine: &mut dyn SceneEngine,
    node: &TransformHandle,
    frames: u32,
) -> Result<(), GenerateError> {
    engine
        .set_keyframe(node, Channel::RotateY, 1, 0.0)
        .map_err(GenerateError::Scene)?;
    engine
        .set_keyframe(node, Channel::RotateY, frames as i32, 360.0)
        .map_err(GenerateError::Scene)?;
    Ok(())
}

fn failure_entry(
    engine: &dyn SceneEngine,
    model: &Path,
    output: &Path,
    err: &GenerateError,
) -> ErrorReportEntry {
    ErrorReportEntry {
        engine_version: engine.version(),
        batch_mode: engine.is_batch_mode(),
        user: engine.current_user(),
        model: model.to_string_lossy().into_owned(),
        output: output.to_string_lossy().into_owned(),
        error: err.to_string(),
        trace: error_trace(err),
        created_at: ErrorReportEntry::utc_timestamp(),
    }
}

/// Renders the full error chain, one cause per line.
fn error_trace(err: &GenerateError) -> String {
    let mut lines = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines.join("\n")
}
