//! Provides deterministic cache-key derivation and the flat thumbnail artifact layout.
//!
//! Every generated artifact lives directly under a single thumbnail root
//! directory. The filename is derived from the source model's absolute path by
//! character substitution, so the browser UI and the generation pipeline agree
//! on artifact locations without any shared index file.
//!
//! # Examples
//! ```
//! use turntable::cache::derive_key;
//!
//! assert_eq!(derive_key("C:/assets/hero.obj"), "C__assets__hero.obj");
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// File extensions the pipeline accepts as source models (lowercase, no dot).
///
/// # Examples
/// ```
/// use turntable::cache::SUPPORTED_EXTENSIONS;
///
/// assert!(SUPPORTED_EXTENSIONS.contains(&"fbx"));
/// ```
pub const SUPPORTED_EXTENSIONS: &[&str] = &["fbx", "ma", "obj"];

/// Extension appended to the derived key for the static image artifact.
pub const IMAGE_EXTENSION: &str = "png";

/// Extension appended to the *image filename* for the turntable clip artifact.
pub const CLIP_EXTENSION: &str = "avi";

/// Derives a flat, collision-free cache key from an absolute model path.
///
/// The drive-letter separator is dropped and every directory separator (both
/// conventions) becomes `__`, producing a single token that is a valid
/// filename on all major platforms. The same logical path written with forward
/// or back slashes derives the same key. The substitution is injective over
/// real-world paths; the only ambiguity is a path that itself contains a
/// literal `__` run next to a separator, which no sane asset path does.
///
/// # Examples
/// ```
/// use turntable::cache::derive_key;
///
/// let forward = derive_key("C:/assets/characters/hero.obj");
/// let backward = derive_key(r"C:\assets\characters\hero.obj");
/// assert_eq!(forward, backward);
/// assert_eq!(forward, "C__assets__characters__hero.obj");
/// ```
pub fn derive_key(path: &str) -> String {
    path.replace(':', "").replace('\\', "__").replace('/', "__")
}

/// Returns the image artifact filename for a model path: derived key plus the
/// fixed image extension.
///
/// # Examples
/// ```
/// use turntable::cache::image_file_name;
///
/// assert_eq!(image_file_name("C:/assets/hero.obj"), "C__assets__hero.obj.png");
/// ```
pub fn image_file_name(path: &str) -> String {
    format!("{}.{}", derive_key(path), IMAGE_EXTENSION)
}

/// Returns the clip artifact filename for a model path.
///
/// By inherited convention the clip filename is the *image* filename with the
/// clip extension appended, not the bare key. Preserved for compatibility with
/// existing thumbnail directories.
///
/// # Examples
/// ```
/// use turntable::cache::clip_file_name;
///
/// assert_eq!(clip_file_name("C:/assets/hero.obj"), "C__assets__hero.obj.png.avi");
/// ```
pub fn clip_file_name(path: &str) -> String {
    format!("{}.{}", image_file_name(path), CLIP_EXTENSION)
}

/// Returns the lowercase extension of a path, if any.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use turntable::cache::extension_of;
///
/// assert_eq!(extension_of(Path::new("hero.FBX")).as_deref(), Some("fbx"));
/// assert_eq!(extension_of(Path::new("hero")), None);
/// ```
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Checks whether a path has a supported source-model extension
/// (case-insensitive).
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use turntable::cache::is_supported;
///
/// assert!(is_supported(Path::new("hero.OBJ")));
/// assert!(!is_supported(Path::new("hero.blend")));
/// ```
pub fn is_supported(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Represents the flat thumbnail root and resolves artifact paths under it.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use turntable::cache::ThumbnailStore;
///
/// let store = ThumbnailStore::new("/tmp/thumbs");
/// let image = store.image_path(Path::new("/assets/hero.obj"));
/// assert_eq!(image, Path::new("/tmp/thumbs/__assets__hero.obj.png"));
/// ```
#[derive(Debug, Clone)]
pub struct ThumbnailStore {
    root: PathBuf,
}

impl ThumbnailStore {
    /// Creates a store rooted at the given directory. Nothing is created on
    /// disk until [`ThumbnailStore::ensure_root`] runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the flat root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist (idempotent).
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_root(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Returns the static image artifact path for a model.
    pub fn image_path(&self, model: &Path) -> PathBuf {
        self.root.join(image_file_name(&model.to_string_lossy()))
    }

    /// Returns the turntable clip artifact path for a model.
    pub fn clip_path(&self, model: &Path) -> PathBuf {
        self.root.join(clip_file_name(&model.to_string_lossy()))
    }

    /// Checks whether the image artifact for a model already exists.
    ///
    /// The image alone is the "generation done" signal; the clip is
    /// deliberately not consulted (inherited skip policy).
    pub fn has_image(&self, model: &Path) -> bool {
        self.image_path(model).exists()
    }
}
