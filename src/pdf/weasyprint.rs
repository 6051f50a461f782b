use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{ReportError, Result};

/// Renders an HTML document to PDF bytes by shelling out to WeasyPrint.
///
/// The HTML is written to a temp file, compiled with
/// `weasyprint --encoding utf-8 --base-url <base_url>`, and the resulting
/// bytes are returned verbatim. Relative references in the document resolve
/// against `base_url`.
pub fn render_pdf(html: &str, base_url: &Path) -> Result<Vec<u8>> {
    // Probe availability first; the version line goes to stderr diagnostics.
    let probe = Command::new("weasyprint").arg("--version").output();
    match probe {
        Ok(output) if output.status.success() => {
            info!(
                "Using {}",
                String::from_utf8_lossy(&output.stdout).trim()
            );
        }
        _ => return Err(ReportError::RendererNotFound),
    }

    let temp_dir = std::env::temp_dir().join("wathiq-report");
    fs::create_dir_all(&temp_dir)?;

    // Pid-suffixed names so concurrent invocations do not clobber each other.
    let pid = std::process::id();
    let html_path = temp_dir.join(format!("report-{pid}.html"));
    let pdf_path = temp_dir.join(format!("report-{pid}.pdf"));

    fs::write(&html_path, html)?;
    debug!("Report HTML written to {}", html_path.display());

    let output = Command::new("weasyprint")
        .arg("--encoding")
        .arg("utf-8")
        .arg("--base-url")
        .arg(base_url)
        .arg(&html_path)
        .arg(&pdf_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let _ = fs::remove_file(&html_path);
        return Err(ReportError::RenderFailed(stderr.to_string()));
    }

    let pdf_bytes = fs::read(&pdf_path)?;

    // Clean up temp files
    let _ = fs::remove_file(&html_path);
    let _ = fs::remove_file(&pdf_path);

    Ok(pdf_bytes)
}
