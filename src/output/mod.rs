pub mod formatter;

pub use formatter::{
    format_assessment_header, format_check_summary, format_json, format_percentile, format_score,
    format_scored_table, format_tsv, should_use_colors,
};
