use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};

use talent_score::assessment::{self, TalentAssessment, TalentTestRequest, DEFAULT_TOP};
use talent_score::output;
use talent_score::scoring::{validate_tables, ScoringTables, TalentEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Ranked table (colored on a TTY)
    Table,
    /// Tab-separated values, no headers
    Tsv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Age in years (5-100)
    #[arg(long)]
    age: u32,

    /// Gender code: M or F (anything else uses the unspecified ranges)
    #[arg(long)]
    gender: Option<String>,

    /// Disability category: physical, visual, hearing or intellectual
    #[arg(long)]
    disability: Option<String>,

    /// School grade label, e.g. "중3"
    #[arg(long)]
    grade: Option<String>,

    /// Height in cm (BMI only)
    #[arg(long)]
    height: Option<f64>,

    /// Weight in kg (BMI only)
    #[arg(long)]
    weight: Option<f64>,

    /// Grip strength in kg
    #[arg(long)]
    grip_strength: Option<f64>,

    /// Sit-ups per minute
    #[arg(long)]
    sit_ups: Option<u32>,

    /// Standing long jump in cm
    #[arg(long)]
    standing_long_jump: Option<f64>,

    /// 20m shuttle run repetitions
    #[arg(long = "shuttle-run")]
    shuttle_run_20m: Option<u32>,

    /// Sit-and-reach in cm (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    sit_and_reach: Option<f64>,
}

impl ScoreArgs {
    fn into_request(self) -> TalentTestRequest {
        TalentTestRequest {
            age: self.age,
            grade: self.grade,
            gender: self.gender,
            region_sido: None,
            region_sigungu: None,
            disability_type: self.disability,
            height: self.height,
            weight: self.weight,
            grip_strength: self.grip_strength,
            sit_ups: self.sit_ups,
            standing_long_jump: self.standing_long_jump,
            shuttle_run_20m: self.shuttle_run_20m,
            sit_and_reach: self.sit_and_reach,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one talent test given as flags
    Score(ScoreArgs),
    /// Score every row of a CSV file (header row names the fields)
    Batch {
        /// Path to the CSV file
        path: PathBuf,
    },
    /// Print the effective scoring tables as YAML
    Tables,
    /// Validate the effective scoring tables, listing every error (exit 4 when invalid)
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "talent-score")]
#[command(about = "Youth sports talent assessment from fitness-test measurements", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/talent-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Show only the N best sports per assessment
    #[arg(short, long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = talent_score::logging::init(cli.verbose) {
        eprintln!("Logging disabled: {}", e);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match talent_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let tables = config.effective_tables();
    let top = cli.top.or(config.top);
    let format = cli.format;
    let use_colors = output::should_use_colors();

    let code = match cli.command {
        Commands::Check => run_check(&tables),
        Commands::Score(args) => with_engine(tables, |engine| {
            run_score(engine, args.into_request(), format, top, use_colors)
        }),
        Commands::Batch { path } => with_engine(tables, |engine| {
            run_batch(engine, &path, format, top.or(Some(DEFAULT_TOP)), use_colors)
        }),
        Commands::Tables => with_engine(tables, |engine| {
            match serde_saphyr::to_string(engine.tables()) {
                Ok(yaml) => {
                    println!("{}", yaml);
                    EXIT_SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to serialize scoring tables: {}", e);
                    EXIT_CONFIG
                }
            }
        }),
    };

    std::process::exit(code);
}

/// Limit an assessment's scores to the requested top N
fn limit(mut assessment: TalentAssessment, top: Option<usize>) -> TalentAssessment {
    if let Some(n) = top {
        assessment.scores.truncate(n);
    }
    assessment
}

fn render(assessment: &TalentAssessment, format: OutputFormat, use_colors: bool) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(format!(
            "{}\n{}",
            output::format_assessment_header(assessment, use_colors),
            output::format_scored_table(&assessment.scores, use_colors)
        )),
        OutputFormat::Tsv => Ok(output::format_tsv(&assessment.scores)),
        OutputFormat::Json => output::format_json(assessment).map_err(|e| e.to_string()),
    }
}

fn run_score(
    engine: &TalentEngine,
    request: TalentTestRequest,
    format: OutputFormat,
    top: Option<usize>,
    use_colors: bool,
) -> i32 {
    let assessment = match assessment::assess(engine, &request) {
        Ok(a) => limit(a, top),
        Err(errors) => {
            eprintln!("Invalid input:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            return EXIT_INPUT;
        }
    };

    match render(&assessment, format, use_colors) {
        Ok(text) => {
            println!("{}", text);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render output: {}", e);
            EXIT_INPUT
        }
    }
}

fn run_batch(
    engine: &TalentEngine,
    path: &Path,
    format: OutputFormat,
    top: Option<usize>,
    use_colors: bool,
) -> i32 {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path.display(), e);
            return EXIT_INPUT;
        }
    };

    let rows = assessment::read_batch(engine, file);
    let mut any_succeeded = false;
    let mut json_rows = Vec::new();

    for row in rows.iter() {
        match &row.outcome {
            Ok(assessment) => {
                any_succeeded = true;
                let assessment = limit(assessment.clone(), top);
                match format {
                    OutputFormat::Table => {
                        println!("Line {}", row.line);
                        match render(&assessment, format, use_colors) {
                            Ok(text) => println!("{}\n", text),
                            Err(e) => eprintln!("Line {}: {}", row.line, e),
                        }
                    }
                    OutputFormat::Tsv => {
                        for line in output::format_tsv(&assessment.scores).lines() {
                            println!("{}\t{}", row.line, line);
                        }
                    }
                    OutputFormat::Json => {
                        json_rows.push(serde_json::json!({ "line": row.line, "assessment": assessment }));
                    }
                }
            }
            Err(errors) => {
                eprintln!("Line {}: skipped", row.line);
                for error in errors {
                    eprintln!("  - {}", error);
                }
                if format == OutputFormat::Json {
                    json_rows.push(serde_json::json!({ "line": row.line, "errors": errors }));
                }
            }
        }
    }

    if format == OutputFormat::Json {
        match serde_json::to_string_pretty(&json_rows) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to render output: {}", e);
                return EXIT_INPUT;
            }
        }
    }

    if !rows.is_empty() && !any_succeeded {
        eprintln!("No rows could be scored.");
        return EXIT_INPUT;
    }
    EXIT_SUCCESS
}

fn print_table_errors(errors: &[String]) {
    eprintln!("Scoring table errors:");
    for error in errors {
        eprintln!("  - {}", error);
    }
}

/// Validate tables once, then hand the engine to `run`
fn with_engine(tables: ScoringTables, run: impl FnOnce(&TalentEngine) -> i32) -> i32 {
    match TalentEngine::new(tables) {
        Ok(engine) => run(&engine),
        Err(errors) => {
            print_table_errors(&errors);
            EXIT_CONFIG
        }
    }
}

fn run_check(tables: &ScoringTables) -> i32 {
    match validate_tables(tables) {
        Ok(()) => {
            println!("{}", output::format_check_summary(tables));
            EXIT_SUCCESS
        }
        Err(errors) => {
            print_table_errors(&errors);
            EXIT_CONFIG
        }
    }
}
