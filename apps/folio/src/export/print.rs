//! Print adapter: wraps the mounted fragment's markup in a standalone,
//! print-styled document and hands it to a fresh presentation context.

/// A secondary window the host opens for printing.
pub trait PrintWindow {
    /// Replaces the window's document with `html`.
    fn write(&mut self, html: &str);
    fn print(&mut self);
    fn close(&mut self);
}

/// Opens print windows. `None` means the platform refused (e.g. popup blocked).
pub trait PrintSurface {
    fn open_print_window(&mut self) -> Option<Box<dyn PrintWindow>>;
}

/// Stylesheet embedded in every print document.
/// Two-column grid on screen, collapsed to a single column under `@media print`.
pub const PRINT_STYLES: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.4; color: #333; margin: 20px; }
.resume-layout { display: grid; grid-template-columns: 1fr 2fr; gap: 30px; }
.resume-sidebar { background: #f8f9fa; padding: 20px; border-radius: 10px; }
.resume-profile img { width: 100px; height: 100px; border-radius: 50%; display: block; margin: 0 auto 15px; }
.resume-profile h1 { text-align: center; margin-bottom: 5px; color: #2563eb; }
.job-title { text-align: center; color: #6b7280; margin-bottom: 20px; }
h2 { color: #2563eb; border-bottom: 2px solid #dbeafe; padding-bottom: 5px; margin-top: 25px; margin-bottom: 15px; }
h3 { margin-bottom: 5px; color: #374151; }
.contact-item { margin-bottom: 10px; font-size: 14px; }
.skill-item { display: flex; justify-content: space-between; margin-bottom: 8px; font-size: 14px; }
.skill-level { display: flex; gap: 4px; }
.skill-dot { width: 8px; height: 8px; border-radius: 50%; background: #dbeafe; }
.skill-dot.active { background: #2563eb; }
.experience-item { margin-bottom: 20px; padding-left: 15px; border-left: 3px solid #2563eb; }
.experience-date { font-size: 12px; color: #6b7280; margin-bottom: 5px; }
.experience-company { font-size: 14px; color: #06b6d4; margin-bottom: 10px; }
ul { margin: 10px 0; padding-left: 20px; }
li { margin-bottom: 5px; font-size: 14px; }
@media print {
  body { margin: 0; }
  .resume-layout { grid-template-columns: 1fr; gap: 15px; }
}
";

/// Builds the standalone print document around already-serialized markup.
///
/// `markup` must come from a rendered fragment: it is embedded verbatim.
pub fn print_document(markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Resume</title>\n<style>\n{PRINT_STYLES}</style>\n</head>\n<body>\n{markup}\n</body>\n</html>\n"
    )
}
