//! Pretty output formatting.

use hookbins_core::bins::Bin;

/// Format a bin for display.
pub fn format_bin(bin: &Bin) -> String {
    format!(
        "{}\n  ID: {}\n  Account: {}\n  Created: {}\n  Updated: {}",
        bin.title,
        bin.id,
        bin.account_id,
        bin.created_at.to_rfc3339(),
        bin.updated_at.to_rfc3339()
    )
}

/// Format bins for display.
pub fn format_bins(bins: &[Bin]) -> String {
    if bins.is_empty() {
        return "No bins found.".to_string();
    }
    let mut output = format!("BINS ({})\n", bins.len());
    output.push_str(&"-".repeat(40));
    for bin in bins {
        output.push_str(&format!("\n{}", format_bin(bin)));
        output.push('\n');
    }
    output
}
