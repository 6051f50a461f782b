mod weasyprint;

pub use weasyprint::render_pdf;
