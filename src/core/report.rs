// src/core/report.rs
use std::io::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use super::{format_route, RoleBucket, ScanReport};

pub const ENDPOINTS_HEADER: &str = "API Endpoints (method path -> Class#method):";

/// Render `report` in the requested format
pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Counter block, one listing per role bucket, then the endpoint table
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    for (key, value) in report.summary.entries() {
        out.push_str(&format!("{},{}\n", key, value));
    }
    out.push('\n');

    for role in RoleBucket::ALL {
        out.push_str(&format!("{}:\n", role.title()));
        for name in report.bucket(role) {
            out.push_str(name);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str(ENDPOINTS_HEADER);
    out.push('\n');
    for route in &report.endpoints {
        out.push_str(&format_route(route));
        out.push('\n');
    }

    out
}

pub fn write_report<W: Write>(
    mut writer: W,
    report: &ScanReport,
    format: OutputFormat,
) -> Result<()> {
    writer.write_all(render(report, format)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}
