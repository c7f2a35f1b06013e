//! Provides the model analysis pipeline: mesh statistics gathered with the
//! same import/cleanup discipline as thumbnail generation.
//!
//! Analysis never raises past its boundary. Every failure, outer or per-mesh,
//! becomes a string in the report's error list, and the scene that was open
//! before the call is restored unconditionally afterwards (or the scene is
//! reset to empty if none was open).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::engine::{EngineError, MeshHandle, SceneEngine};

/// Per-mesh statistics for one analyzed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    /// Host-side mesh node name.
    pub mesh: String,
    /// Vertex count.
    pub vertices: u64,
    /// Polygon count.
    pub polygons: u64,
    /// Count of polygons with more than four sides.
    pub ngons: u64,
    /// UV set names in host order.
    pub uv_sets: Vec<String>,
}

/// Aggregate analysis result for one model file.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
///
/// use turntable::analysis::ModelAnalysisReport;
///
/// let report = ModelAnalysisReport {
///     model: PathBuf::from("/assets/hero.obj"),
///     meshes: Vec::new(),
///     errors: vec!["No mesh found".into()],
/// };
/// assert!(report.meshes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelAnalysisReport {
    /// Source model path.
    pub model: PathBuf,
    /// Statistics for each mesh that could be interrogated.
    pub meshes: Vec<MeshStats>,
    /// Errors gathered along the way, in occurrence order.
    pub errors: Vec<String>,
}

/// Analyzes one model: imports it into a fresh scene, gathers per-mesh
/// statistics, then restores whatever scene was open beforehand.
///
/// One bad mesh's error is appended to the report and analysis continues with
/// the remaining meshes. This function never returns an error; inspect
/// `report.errors` instead.
pub fn analyze(engine: &mut dyn SceneEngine, model: &Path) -> ModelAnalysisReport {
    let original_scene = engine.current_scene();

    let mut report = ModelAnalysisReport {
        model: model.to_path_buf(),
        meshes: Vec::new(),
        errors: Vec::new(),
    };

    collect_stats(engine, model, &mut report);

    // Restoration runs on every path, including failures above.
    restore_scene(engine, original_scene.as_deref());

    report
}

fn collect_stats(engine: &mut dyn SceneEngine, model: &Path, report: &mut ModelAnalysisReport) {
    if let Err(err) = engine.reset_scene() {
        report.errors.push(err.to_string());
        return;
    }
    if let Err(err) = engine.import_file(model) {
        report.errors.push(err.to_string());
        return;
    }

    let meshes = engine.meshes();
    if meshes.is_empty() {
        report.errors.push("No mesh found".to_string());
    }

    for mesh in &meshes {
        match gather_mesh_stats(&*engine, mesh) {
            Ok(stats) => report.meshes.push(stats),
            Err(err) => report.errors.push(err.to_string()),
        }
    }
}

fn gather_mesh_stats(
    engine: &dyn SceneEngine,
    mesh: &MeshHandle,
) -> Result<MeshStats, EngineError> {
    let vertices = engine.vertex_count(mesh)?;
    let sides = engine.polygon_sides(mesh)?;
    let ngons = sides.iter().filter(|&&n| n > 4).count() as u64;
    let uv_sets = engine.uv_set_names(mesh)?;

    Ok(MeshStats {
        mesh: mesh.name().to_string(),
        vertices,
        polygons: sides.len() as u64,
        ngons,
        uv_sets,
    })
}

fn restore_scene(engine: &mut dyn SceneEngine, original: Option<&Path>) {
    let restored = match original {
        Some(scene) => engine.open_scene(scene),
        None => engine.reset_scene(),
    };
    if let Err(err) = restored {
        warn!(error = %err, "scene restoration after analysis failed");
    }
}

/// Formats an analysis report as the human-readable text the analysis dialog
/// displays: one header line, per-mesh statistics, inline error lines.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
///
/// use turntable::analysis::{format_report, ModelAnalysisReport};
///
/// let report = ModelAnalysisReport {
///     model: PathBuf::from("/assets/hero.obj"),
///     meshes: Vec::new(),
///     errors: vec!["No mesh found".into()],
/// };
/// let text = format_report(&report);
/// assert!(text.starts_with("Model: /assets/hero.obj"));
/// assert!(text.contains("ERROR: No mesh found"));
/// ```
pub fn format_report(report: &ModelAnalysisReport) -> String {
    let mut lines = vec![format!("Model: {}", report.model.display())];

    for stats in &report.meshes {
        lines.push(format!("  Mesh: {}", stats.mesh));
        lines.push(format!(
            "    Verts: {} | Polys: {} | Ngons: {} | UV sets: {}",
            stats.vertices,
            stats.polygons,
            stats.ngons,
            stats.uv_sets.join(", ")
        ));
    }
    for err in &report.errors {
        lines.push(format!("  ERROR: {err}"));
    }

    lines.join("\n")
}
