// File: src/display.rs
use crate::core::types::Classification;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const BAR_WIDTH: usize = 40;

/// Human-readable name for a language code. Unknown codes map to "Unknown".
pub fn language_name(code: &str) -> &'static str {
    match code {
        "ca" => "Catalan",
        "da" => "Danish",
        "de" => "German",
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "hr" => "Croatian",
        "hu" => "Hungarian",
        "it" => "Italian",
        "pt" => "Portuguese",
        _ => "Unknown",
    }
}

/// One line of the probability chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub name: &'static str,
    pub code: String,
    pub probability: f64,
    pub bar_len: usize,
    pub highlighted: bool,
}

/// Rows in the classifier's label order; the most probable one is highlighted.
pub fn chart_rows(classification: &Classification) -> Vec<ChartRow> {
    let best = classification.best_index();
    classification
        .iter()
        .enumerate()
        .map(|(i, (code, probability))| ChartRow {
            name: language_name(code),
            code: code.to_string(),
            probability,
            bar_len: (probability.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize,
            highlighted: Some(i) == best,
        })
        .collect()
}

/// Draws a horizontal bar chart: the predicted language in red, the rest in blue.
pub fn render_chart<W: Write>(out: &mut W, classification: &Classification) -> io::Result<()> {
    let rows = chart_rows(classification);
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

    for row in &rows {
        let color = if row.highlighted { Color::Red } else { Color::Blue };
        queue!(
            out,
            Print(format!("{:<name_width$} ({:<2}) ", row.name, row.code)),
            SetForegroundColor(color),
            Print("#".repeat(row.bar_len)),
            Print(" ".repeat(BAR_WIDTH - row.bar_len)),
            ResetColor,
            Print(format!(" {:>6.2}%\n", row.probability * 100.0)),
        )?;
    }

    if let Some((code, _)) = classification.best() {
        queue!(
            out,
            Print("\nThe sentence is classified as: "),
            SetAttribute(Attribute::Bold),
            Print(format!("{} ({code})\n", language_name(code))),
            SetAttribute(Attribute::Reset),
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Classification {
        Classification {
            labels: vec!["en".into(), "fr".into(), "xx".into()],
            probabilities: vec![0.25, 0.7, 0.05],
        }
    }

    #[test]
    fn known_codes_have_names() {
        assert_eq!(language_name("hr"), "Croatian");
        assert_eq!(language_name("pt"), "Portuguese");
        assert_eq!(language_name("nl"), "Unknown");
        assert_eq!(language_name(""), "Unknown");
    }

    #[test]
    fn only_the_most_probable_row_is_highlighted() {
        let rows = chart_rows(&sample());
        let highlighted: Vec<&str> = rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(highlighted, vec!["fr"]);
        assert_eq!(rows[2].name, "Unknown");
    }

    #[test]
    fn bar_length_scales_with_probability() {
        let rows = chart_rows(&sample());
        assert_eq!(rows[0].bar_len, 10);
        assert_eq!(rows[1].bar_len, 28);
        assert_eq!(rows[2].bar_len, 2);
    }

    #[test]
    fn rendered_chart_names_every_language_and_the_winner() {
        let mut out = Vec::new();
        render_chart(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("English"));
        assert!(text.contains("French"));
        assert!(text.contains("70.00%"));
        assert!(text.contains("classified as: "));
        assert!(text.contains("French (fr)"));
    }
}
