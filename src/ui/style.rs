use console::style;
use std::fmt::Display;

/// Green bold: success outcomes
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold: failure outcomes
pub fn failure<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// White bold: section headers
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: hints, placeholders, separators
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Cyan: field labels
pub fn label<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Green: current values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: the selected entry in a list
pub fn marker<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}
