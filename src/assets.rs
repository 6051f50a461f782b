use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{error, warn};

use crate::error::{ReportError, Result};

/// Bundled Arabic font pair looked for first in the fonts directory.
const BUNDLED_REGULAR: &str = "Dubai-Regular.otf";
const BUNDLED_BOLD: &str = "Dubai-Bold.ttf";

struct FontPair {
    regular: &'static str,
    bold: &'static str,
}

/// System font pairs tried in order when the bundled pair is incomplete.
/// The DejaVu pair is the final fallback and is used even without an
/// existence check; a missing file then fails at read time.
const SYSTEM_FONT_PAIRS: &[FontPair] = &[
    FontPair {
        regular: "/usr/share/fonts/truetype/amiri/Amiri-Regular.ttf",
        bold: "/usr/share/fonts/truetype/amiri/Amiri-Bold.ttf",
    },
    FontPair {
        regular: "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
        bold: "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Bold.ttf",
    },
    FontPair {
        regular: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        bold: "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    },
];

const LOGO_FILE: &str = "logo.png";

/// A font embeddable in the report stylesheet.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// `data:font/...;base64,...` URI carrying the whole font file.
    pub data_uri: String,
    /// CSS `format()` label: `opentype` or `truetype`.
    pub css_format: &'static str,
}

/// Everything the HTML template needs from the filesystem, fully resolved.
#[derive(Debug, Clone)]
pub struct ResolvedAssets {
    pub font_regular: FontFace,
    pub font_bold: FontFace,
    /// `file://` URI of the logo, or empty when the logo file is missing.
    pub logo_src: String,
}

/// Picks the first existing candidate for a resource directory: next to the
/// executable, then next to the crate manifest. Falls back to the manifest
/// path so error messages name a concrete location.
pub fn default_resource_dir(name: &str) -> PathBuf {
    let mut candidates = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(bin_dir) = exe.parent() {
            candidates.push(bin_dir.join(name));
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name));

    candidates
        .iter()
        .find(|dir| dir.is_dir())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name))
}

/// Chooses the regular/bold font paths: the bundled Dubai pair when both
/// files exist, otherwise the first complete system pair, otherwise the
/// final DejaVu fallback.
fn resolve_font_paths(fonts_dir: &Path) -> (PathBuf, PathBuf) {
    let bundled_regular = fonts_dir.join(BUNDLED_REGULAR);
    let bundled_bold = fonts_dir.join(BUNDLED_BOLD);
    if bundled_regular.exists() && bundled_bold.exists() {
        return (bundled_regular, bundled_bold);
    }

    for pair in &SYSTEM_FONT_PAIRS[..SYSTEM_FONT_PAIRS.len() - 1] {
        let regular = PathBuf::from(pair.regular);
        let bold = PathBuf::from(pair.bold);
        if regular.exists() && bold.exists() {
            return (regular, bold);
        }
    }

    let last = &SYSTEM_FONT_PAIRS[SYSTEM_FONT_PAIRS.len() - 1];
    (PathBuf::from(last.regular), PathBuf::from(last.bold))
}

/// Reads a font file and wraps it as a self-contained data URI. The MIME
/// type and CSS format label come from the file extension: `.otf` maps to
/// `font/otf`/`opentype`, everything else to `font/ttf`/`truetype`.
pub fn font_data_uri(path: &Path) -> Result<FontFace> {
    if !path.exists() {
        error!("Font file not found: {}", path.display());
        return Err(ReportError::FontNotFound(path.to_path_buf()));
    }

    let is_otf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("otf"))
        .unwrap_or(false);
    let (mime, css_format) = if is_otf {
        ("font/otf", "opentype")
    } else {
        ("font/ttf", "truetype")
    };

    let bytes = fs::read(path).map_err(|err| {
        error!("Failed to load font {}: {err}", path.display());
        ReportError::Io(err)
    })?;

    Ok(FontFace {
        data_uri: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        css_format,
    })
}

/// Converts a filesystem path to a `file://` URI, absolutizing it first.
pub fn file_uri(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    if cfg!(windows) {
        Ok(format!(
            "file:///{}",
            absolute.to_string_lossy().replace('\\', "/")
        ))
    } else {
        Ok(format!("file://{}", absolute.to_string_lossy()))
    }
}

/// Resolves the font pair and logo for one report run.
///
/// A missing font file is fatal; a missing logo degrades to an empty image
/// source with a warning.
pub fn resolve_assets(fonts_dir: &Path, assets_dir: &Path) -> Result<ResolvedAssets> {
    let (regular_path, bold_path) = resolve_font_paths(fonts_dir);
    let font_regular = font_data_uri(&regular_path)?;
    let font_bold = font_data_uri(&bold_path)?;

    let logo_path = assets_dir.join(LOGO_FILE);
    let logo_src = if logo_path.exists() {
        file_uri(&logo_path)?
    } else {
        warn!("Logo file not found: {}", logo_path.display());
        String::new()
    };

    Ok(ResolvedAssets {
        font_regular,
        font_bold,
        logo_src,
    })
}
