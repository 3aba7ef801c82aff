//! Output formatting for the CLI.

use console::style;
use orchard_commerce::money::Money;
use orchard_observability::TimingReport;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print phase timings (only in verbose mode, always to stderr).
    pub fn timings(&self, report: &TimingReport) {
        if !self.verbose {
            return;
        }
        if self.json {
            eprintln!("{}", report.to_json());
        } else {
            eprintln!("{}", style(report.to_summary()).dim());
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-align `col` in `width` terminal columns.
fn pad(col: &str, width: usize) -> String {
    let len = console::measure_text_width(col);
    if len >= width {
        col.to_string()
    } else {
        format!("{}{}", col, " ".repeat(width - len))
    }
}

/// Money in storefront format, promotional prices highlighted.
pub fn format_price(price: Money, promoted: bool) -> String {
    if promoted {
        style(price.display()).green().to_string()
    } else {
        price.display()
    }
}

/// Net weight in grams.
pub fn format_weight(grams: f64) -> String {
    if grams.fract() == 0.0 {
        format!("{grams:.0} g")
    } else {
        format!("{grams:.1} g")
    }
}

/// Stock badge for a variant.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("out of stock").red().to_string(),
        1..=5 => style(format!("{stock} left")).yellow().to_string(),
        _ => style("in stock").green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(250.0), "250 g");
        assert_eq!(format_weight(12.5), "12.5 g");
    }

    #[test]
    fn test_pad_counts_characters() {
        assert_eq!(pad("Hũ", 4), "Hũ  ");
        assert_eq!(pad("too long", 3), "too long");
    }
}
