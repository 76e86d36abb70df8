//! Markdown run summary

use crate::output::stats::HarvestSummary;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the summary as a markdown file
pub fn write_markdown_summary(summary: &HarvestSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

pub fn format_markdown_summary(summary: &HarvestSummary) -> String {
    let mut md = String::new();

    md.push_str("# Startup Harvest Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push_str(&format!("- **Config Hash**: {}\n", summary.config_hash));
    md.push_str(&format!("- **Output**: {}\n\n", summary.destination));

    md.push_str("## Listing Pages\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Requested | {} |\n", summary.pages_requested));
    md.push_str(&format!("| Loaded | {} |\n", summary.pages_loaded));
    md.push_str(&format!("| Skipped | {} |\n\n", summary.pages_skipped));

    md.push_str("## Startups\n\n");
    md.push_str(&format!("- **Links Seen**: {}\n", summary.links_seen));
    md.push_str(&format!("- **Unique Links**: {}\n", summary.unique_links));
    md.push_str(&format!(
        "- **Duplicate Links Dropped**: {}\n",
        summary.duplicate_links
    ));
    md.push_str(&format!("- **Extracted**: {}\n", summary.records_extracted));
    md.push_str(&format!("- **Placeholders**: {}\n", summary.records_placeholder));
    md.push_str(&format!(
        "- **Extraction Rate**: {:.2}%\n",
        summary.extraction_rate()
    ));
    md.push_str(&format!("- **Records Written**: {}\n\n", summary.records_written));

    md.push_str("## Renderer\n\n");
    md.push_str(&format!("- **Restarts**: {}\n", summary.restarts));

    md
}
