pub mod assets;
pub mod error;
pub mod pdf;
pub mod report;

pub use assets::{resolve_assets, FontFace, ResolvedAssets};
pub use error::{ReportError, Result};
pub use pdf::render_pdf;
pub use report::{build_document, parse_report, ReportDocument};
