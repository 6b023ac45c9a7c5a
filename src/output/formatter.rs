use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::assessment::TalentAssessment;
use crate::scoring::{DisabilityCategory, GradeBand, ScoreRecord, ScoringTables};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly two decimals ("35.00", "100.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format a percentile as "p95"
pub fn format_percentile(percentile: f64) -> String {
    format!("p{:.0}", percentile)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Terminal columns taken by a char: Hangul, CJK and fullwidth forms take two
fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Truncate a display name to fit available terminal columns
fn truncate_name(name: &str, max_width: usize) -> String {
    if display_width(name) <= max_width {
        return name.to_string();
    }

    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut used = 0;
    let mut truncated: String = name
        .chars()
        .take_while(|c| {
            used += char_width(*c);
            used <= budget
        })
        .collect();
    truncated.push_str(suffix);
    truncated
}

fn color_grade(band: GradeBand, padded: &str) -> String {
    match band {
        GradeBand::Excellent => padded.green().bold().to_string(),
        GradeBand::High => padded.green().to_string(),
        GradeBand::AboveAverage => padded.cyan().to_string(),
        GradeBand::Average => padded.yellow().to_string(),
        GradeBand::BelowAverage => padded.dimmed().to_string(),
    }
}

/// Format score records as a ranked table with columns:
/// Index, Score, Grade, Percentile, Name (sport id)
/// No headers. Index column is 1-based and right-aligned with a trailing dot.
pub fn format_scored_table(records: &[ScoreRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No sports scored.".to_string();
    }

    let term_width = get_terminal_width();

    // Index: 3 + 1, Score: 6 + 2, Grade: 13 + 2, Percentile: 3 + 2
    let score_width = 6;
    let grade_width = 13;
    let percentile_width = 3;
    let separator = "  ";

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(record.score), width = score_width);
            let grade_padded = format!("{:<width$}", record.grade_level.key(), width = grade_width);
            let percentile_padded = format!(
                "{:<width$}",
                format_percentile(record.percentile),
                width = percentile_width
            );

            let id_suffix = format!("({})", record.sport);
            let fixed_width = 4 + score_width + grade_width + percentile_width
                + separator.len() * 4
                + display_width(&id_suffix);

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&record.sport_name, width - fixed_width)
                }
                Some(_) => truncate_name(&record.sport_name, 10),
                None => record.sport_name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    color_grade(record.grade_level, &grade_padded),
                    separator,
                    percentile_padded,
                    separator,
                    name,
                    separator,
                    id_suffix.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    index_str,
                    score_padded,
                    separator,
                    grade_padded,
                    separator,
                    percentile_padded,
                    separator,
                    name,
                    separator,
                    id_suffix
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as tab-separated values for scripting
/// Columns: sport, score, percentile, grade_level (no headers, no colors)
pub fn format_tsv(records: &[ScoreRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{}\t{}\t{}\t{}",
                record.sport,
                format_score(record.score),
                record.percentile,
                record.grade_level.key()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of who was assessed and which catalog was used
pub fn format_assessment_header(assessment: &TalentAssessment, use_colors: bool) -> String {
    let gender = assessment.gender.map(|g| g.code()).unwrap_or("-");
    let track = match assessment.disability {
        Some(category) => format!("adapted ({})", category),
        None => "general".to_string(),
    };
    let bmi = assessment
        .bmi
        .map(|b| format!("{:.2}", b))
        .unwrap_or_else(|| "-".to_string());

    if use_colors {
        format!(
            "Age: {}  Gender: {}  BMI: {}  Track: {}",
            assessment.age.bold(),
            gender.bold(),
            bmi,
            track.cyan()
        )
    } else {
        format!(
            "Age: {}  Gender: {}  BMI: {}  Track: {}",
            assessment.age, gender, bmi, track
        )
    }
}

/// Pretty JSON for an assessment (the shape an HTTP caller would return)
pub fn format_json(assessment: &TalentAssessment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(assessment)
}

/// Catalog and grade-row counts for tables that passed validation
pub fn format_check_summary(tables: &ScoringTables) -> String {
    let mut lines = vec![
        "Scoring tables OK".to_string(),
        format!("  General sports: {}", tables.sports.len()),
    ];
    for category in DisabilityCategory::ALL {
        lines.push(format!(
            "  Adapted ({}): {}",
            category,
            tables.adapted.for_category(category).len()
        ));
    }
    lines.push(format!("  Grade bands: {}", tables.grades.len()));
    lines.join("\n")
}
