//! Output formatting utilities

use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print an endpoint line in the server banner
pub(crate) fn endpoint(method: &str, path: &str, description: &str) {
    println!("  {:<5}{:<10} - {}", method.green(), path, description);
}

/// Color a recommendation label by severity
pub(crate) fn label(recommendation: device_advisor::advisor::Recommendation) -> colored::ColoredString {
    use device_advisor::advisor::Recommendation;

    let text = recommendation.as_str();
    match recommendation {
        Recommendation::Keep => text.green().bold(),
        Recommendation::Sell => text.yellow().bold(),
        Recommendation::Replace => text.red().bold(),
    }
}
