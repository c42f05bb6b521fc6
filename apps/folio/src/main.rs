use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use folio::check::check_content;
use folio::config::Config;
use folio::logging::init_tracing;
use folio::store::Content;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting folio content check v{}", env!("CARGO_PKG_VERSION"));

    let content = Content::load(&config.content_path).with_context(|| {
        format!(
            "Failed to load content from {}",
            config.content_path.display()
        )
    })?;

    let report = check_content(&content, &config.asset_root);
    for record in &report.records {
        info!(
            id = %record.id,
            sections = record.sections.len(),
            bytes = record.markup_bytes,
            image = ?record.image,
            download = ?record.download,
            "Rendered {}",
            record.name
        );
    }

    if !report.is_clean() {
        for problem in &report.problems {
            warn!("{problem}");
        }
        bail!("{} asset problem(s) found", report.problems.len());
    }

    info!("All {} records render and reference existing assets", report.records.len());
    Ok(())
}
