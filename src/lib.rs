//! Provides the turntable thumbnail pipeline for DCC asset browsers.
//!
//! An asset browser embedded in a 3D authoring application calls into this
//! crate to generate preview artifacts for model files (FBX, Maya ASCII, OBJ):
//! a static image and a short 360° turntable clip per asset, both named by a
//! deterministic key derived from the source path and stored under one flat
//! thumbnail root. The host application's scene graph, importers, and
//! offscreen capture are reached only through the [`engine::SceneEngine`]
//! trait, so the pipeline runs identically against a live host integration or
//! a scripted test fake.
//!
//! Failures never crash a batch: each failed asset is recorded once in an
//! append-only JSON error report and iteration continues with the next file.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//!
//! use turntable::batch::{self, Flow};
//! use turntable::config::PipelineConfig;
//! use turntable::engine::SceneEngine;
//!
//! fn refresh_folder(engine: &mut dyn SceneEngine, candidates: &[PathBuf]) -> usize {
//!     let config = PipelineConfig::default();
//!     let summary = batch::generate_all(
//!         engine,
//!         candidates,
//!         &config.store(),
//!         &config.sink(),
//!         &config.options(),
//!         false,
//!         |_done, _total| Flow::Continue,
//!     )
//!     .expect("thumbnail root not writable");
//!     summary.generated
//! }
//! ```

pub mod analysis;
pub mod batch;
pub mod cache;
pub mod config;
pub mod engine;
pub mod generator;
pub mod report;

pub use analysis::{analyze, format_report, MeshStats, ModelAnalysisReport};
pub use batch::{generate_all, BatchSummary, Flow};
pub use cache::{derive_key, ThumbnailStore, SUPPORTED_EXTENSIONS};
pub use config::PipelineConfig;
pub use engine::{EngineError, SceneEngine};
pub use generator::{generate, GenerateError, GenerateOptions};
pub use report::{ErrorReportEntry, ReportSink};
