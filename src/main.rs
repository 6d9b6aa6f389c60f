#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # essaymark
//!
//! Grades essays from the command line.
//!
//! - `essaymark grade essay.txt --topic "Climate policy"` prints scores and
//!   feedback.
//! - `essaymark train graded.csv` fits a scoring model from human grades.
//! - `essaymark report 'essays/*.txt'` summarizes a folder of essays.
//!
//! Configuration is read from `ESSAYMARK_*` environment variables, or a
//! `.env` file in the working directory.

use std::{
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use essaymark::{
    AdapterSettings, Dashboard, Document, Grader, ScoreResult,
    grade::diff::render_corrections,
    model::train::{TrainConfig, load_samples, train},
};
use futures::future::try_join_all;
use tokio::runtime::Runtime;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Arguments of `grade`.
#[derive(Debug, Clone)]
struct GradeArgs {
    /// Topic the essay should address.
    topic:       Option<String>,
    /// Keywords the essay should cover.
    keywords:    Vec<String>,
    /// Print the storage record as JSON.
    json:        bool,
    /// Print the grammar corrections as a diff.
    corrections: bool,
    /// Essay path, or `-` for stdin.
    file:        String,
}

/// Arguments of `train`.
#[derive(Debug, Clone)]
struct TrainArgs {
    /// Where to write the model.
    output: Option<PathBuf>,
    /// Boosting iterations.
    trees:  usize,
    /// CSV or JSON file of graded essays.
    data:   PathBuf,
}

/// Arguments of `report`.
#[derive(Debug, Clone)]
struct ReportArgs {
    /// Print the dashboard as JSON.
    json:     bool,
    /// Glob patterns matching essay files.
    patterns: Vec<String>,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade one essay
    Grade(GradeArgs),
    /// Train a scoring model
    Train(TrainArgs),
    /// Summarize many essays
    Report(ReportArgs),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let topic = long("topic")
        .short('t')
        .help("Topic or title the essay responds to")
        .argument::<String>("TOPIC")
        .optional();
    let keywords = long("keyword")
        .short('k')
        .help("Keyword the essay should cover; repeat for more")
        .argument::<String>("KEYWORD")
        .many();
    let json = long("json")
        .help("Print the graded record as JSON")
        .switch();
    let corrections = long("corrections")
        .help("Show the grammar checker's corrections as a word diff")
        .switch();
    let file = positional::<String>("FILE").help("Essay to grade, or - to read stdin");
    let grade = construct!(GradeArgs {
        topic,
        keywords,
        json,
        corrections,
        file
    })
    .to_options()
    .command("grade")
    .help("Grade one essay")
    .map(Cmd::Grade);

    let output = long("output")
        .short('o')
        .help("Where to write the model (defaults to ESSAYMARK_MODEL_PATH)")
        .argument::<PathBuf>("PATH")
        .optional();
    let trees = long("trees")
        .help("Number of boosting iterations")
        .argument::<usize>("N")
        .fallback(TrainConfig::default().trees);
    let data = positional::<PathBuf>("DATA")
        .help("CSV with essay,score columns, or a JSON array of {essay, score} objects");
    let train = construct!(TrainArgs {
        output,
        trees,
        data
    })
    .to_options()
    .command("train")
    .help("Train a scoring model from graded essays")
    .map(Cmd::Train);

    let json = long("json")
        .help("Print the dashboard as JSON")
        .switch();
    let patterns = positional::<String>("GLOB")
        .help("Glob pattern of essay files")
        .some("at least one pattern is required");
    let report = construct!(ReportArgs { json, patterns })
        .to_options()
        .command("report")
        .help("Grade many essays and summarize them")
        .map(Cmd::Report);

    let cmd = construct!([grade, train, report]);

    cmd.to_options().descr("Essay grader with feedback").run()
}

/// Reads an essay from `file`, or stdin for `-`.
fn read_essay(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Could not read essay from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Could not read essay at {file}"))
    }
}

/// Colors an overall score by band.
fn colored_score(score: f64) -> String {
    let text = format!("{score:.2}");
    if score >= 70.0 {
        text.green().bold().to_string()
    } else if score >= 40.0 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

/// Runs `grade`.
fn grade_cmd(grader: &Grader, args: GradeArgs) -> Result<()> {
    let text = read_essay(&args.file)?;
    let document = match args.topic {
        Some(topic) => Document::builder()
            .text(text)
            .topic(topic)
            .keywords(args.keywords)
            .build(),
        None => Document::builder().text(text).keywords(args.keywords).build(),
    };
    let result = grader.grade_document(&document);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.to_record())?);
    } else {
        print_result(&result);
    }

    if args.corrections {
        let diff = render_corrections(document.text(), &result.extended.grammar.corrected_text);
        if diff.changes == 0 {
            eprintln!("No corrections suggested.");
        } else {
            println!("{}", diff.colored);
        }
    }

    Ok(())
}

/// Prints scores and feedback for humans.
fn print_result(result: &ScoreResult) {
    println!("{}", result.score_table());
    println!("Overall: {}", colored_score(result.overall));
    println!();
    println!("{}", result.feedback);

    let grammar = &result.extended.grammar;
    if !grammar.issues.is_empty() {
        println!();
        for issue in &grammar.issues {
            let hint = if issue.suggestions.is_empty() {
                String::new()
            } else {
                format!(" (try: {})", issue.suggestions.join(", "))
            };
            println!("- {}: \"{}\"{hint}", issue.message, issue.context);
        }
    }
    for note in &result.extended.degraded {
        eprintln!("{} {note}", "degraded:".yellow());
    }
}

/// Runs `train`.
fn train_cmd(grader: &Grader, settings: &AdapterSettings, args: TrainArgs) -> Result<()> {
    let samples = load_samples(&args.data)?;
    let config = TrainConfig::builder().trees(args.trees).build();
    let (artifact, report) = train(grader, &samples, &config)
        .with_context(|| format!("Could not train on {}", args.data.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| settings.model_path().to_path_buf());
    artifact
        .save(&output)
        .with_context(|| format!("Could not save model to {}", output.display()))?;

    match report.validation_mae {
        Some(mae) => eprintln!(
            "Trained on {} essays; validation MAE {mae:.2} over {} held out.",
            report.trained_on, report.validated_on
        ),
        None => eprintln!("Trained on {} essays; nothing held out.", report.trained_on),
    }
    eprintln!("Model written to {}", output.display());
    Ok(())
}

/// Expands glob patterns into files sorted by file name.
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern {pattern}"))? {
            let path = entry.with_context(|| format!("Could not read a match of {pattern}"))?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    paths.dedup();
    Ok(paths)
}

/// File name used as a dashboard label.
fn label_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs `report`, grading files concurrently.
fn report_cmd(grader: Grader, args: ReportArgs) -> Result<()> {
    let paths = expand_patterns(&args.patterns)?;
    if paths.is_empty() {
        bail!("No files matched {}", args.patterns.join(", "));
    }

    let grader = Arc::new(grader);
    let rt = Runtime::new().context("Could not start the async runtime")?;
    let results: Vec<ScoreResult> = rt.block_on(async {
        let tasks = paths.iter().cloned().map(|path| {
            let grader = Arc::clone(&grader);
            tokio::task::spawn_blocking(move || -> Result<ScoreResult> {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Could not read essay at {}", path.display()))?;
                Ok(grader.grade(&text))
            })
        });
        try_join_all(tasks)
            .await
            .context("A grading task panicked")?
            .into_iter()
            .collect::<Result<Vec<_>>>()
    })?;

    let labels: Vec<String> = paths.iter().map(|p| label_for(p)).collect();
    let dashboard = Dashboard::build(labels.iter().map(String::as_str).zip(&results));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        println!("{}", dashboard.render());
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();
    let settings = AdapterSettings::from_env();
    let grader = Grader::from_settings(&settings);

    match cmd {
        Cmd::Grade(args) => grade_cmd(&grader, args)?,
        Cmd::Train(args) => train_cmd(&grader, &settings, args)?,
        Cmd::Report(args) => report_cmd(grader, args)?,
    };

    Ok(())
}
