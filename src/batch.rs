//! Provides batch orchestration over an ordered set of candidate model files.
//!
//! Candidates are processed strictly in the order given; the host engine is a
//! single shared mutable resource, so there is no parallelism and at most one
//! import/render cycle in flight. A progress callback is polled once per
//! candidate, before any work on it, and may cancel the batch between files
//! (never mid-file). One bad asset never aborts the batch.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{is_supported, ThumbnailStore};
use crate::engine::SceneEngine;
use crate::generator::{self, GenerateOptions};
use crate::report::ReportSink;

/// The progress callback's verdict, polled between files.
///
/// # Examples
/// ```
/// use turntable::batch::Flow;
///
/// let keep_going = |done: usize, total: usize| {
///     if done < total { Flow::Continue } else { Flow::Cancel }
/// };
/// assert_eq!(keep_going(0, 3), Flow::Continue);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing.
    Continue,
    /// Stop before the next file; unprocessed candidates are left untouched.
    Cancel,
}

/// What a batch run did, for the caller's status line. `generated` counts the
/// files for which generation actually ran and succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files newly generated in this run.
    pub generated: usize,
    /// Files skipped: non-files, unsupported extensions, or already cached.
    pub skipped: usize,
    /// Files whose generation failed (each recorded once in the report).
    pub failed: usize,
    /// Whether the callback cancelled the batch before the end.
    pub cancelled: bool,
}

/// Errors aborting a batch before any candidate is processed.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The flat thumbnail root could not be created.
    #[error("could not create thumbnail root {root}: {source}")]
    CreateRoot {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Generates thumbnails for every candidate that needs them.
///
/// Ensures the thumbnail root exists, then walks `candidates` in order. A
/// candidate is skipped when it is not a file, has an unsupported extension,
/// or its *image* artifact already exists and `force` is false — the clip is
/// deliberately not consulted, so an asset with an image but no clip counts as
/// done (inherited skip policy). Per-file failures are isolated: the generator
/// has already recorded the report entry, so the orchestrator just logs and
/// moves on. After the loop, UI focus is handed back and the scene is reset to
/// clear residue from the last processed file.
///
/// # Errors
/// Fails only if the thumbnail root cannot be created.
pub fn generate_all(
    engine: &mut dyn SceneEngine,
    candidates: &[PathBuf],
    store: &ThumbnailStore,
    sink: &ReportSink,
    options: &GenerateOptions,
    force: bool,
    mut progress: impl FnMut(usize, usize) -> Flow,
) -> Result<BatchSummary, BatchError> {
    store.ensure_root().map_err(|source| BatchError::CreateRoot {
        root: store.root().to_path_buf(),
        source,
    })?;

    let total = candidates.len();
    let focus = engine.focus_target();
    let mut summary = BatchSummary::default();

    for (index, candidate) in candidates.iter().enumerate() {
        if progress(index, total) == Flow::Cancel {
            summary.cancelled = true;
            break;
        }

        if !candidate.is_file() || !is_supported(candidate) {
            summary.skipped += 1;
            continue;
        }

        let image_out = store.image_path(candidate);
        if image_out.exists() && !force {
            summary.skipped += 1;
            continue;
        }

        let clip_out = store.clip_path(candidate);
        match generator::generate(engine, candidate, &image_out, &clip_out, options, sink) {
            Ok(()) => summary.generated += 1,
            Err(err) => {
                // Already reported by the generator; keep the batch moving.
                warn!(model = %candidate.display(), error = %err, "thumbnail generation failed");
                summary.failed += 1;
            }
        }
    }

    if let Some(target) = &focus {
        engine.restore_focus(target);
    }
    if let Err(err) = engine.reset_scene() {
        warn!(error = %err, "post-batch scene reset failed");
    }

    info!(
        generated = summary.generated,
        skipped = summary.skipped,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "thumbnail batch finished"
    );
    Ok(summary)
}
