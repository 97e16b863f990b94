use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::parse_weight;
use crate::server;
use crate::workflows::advisor::{
    AdvisorError, CloudAdvisor, Criterion, OpenAiChatClient, RankedResult, RankingInsights,
    RankingView, ScoreMatrixView, ScoreSnapshot, WeightVector,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Cloud Compass",
    about = "Score and rank cloud providers for a use case, from the command line or as an HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run provider evaluations without the HTTP service
    Advisor {
        #[command(subcommand)]
        command: AdvisorCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AdvisorCommand {
    /// Rank providers from a captured model response
    Rank(RankArgs),
    /// Call the configured model and rank providers end to end
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct RankArgs {
    /// File holding a raw model response to normalize and rank
    #[arg(long)]
    response_file: PathBuf,
    /// Criterion weight override, e.g. --weight "Security Parameters=5" (repeatable)
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(Criterion, u32)>,
    /// Write the normalized score matrix to a CSV file
    #[arg(long)]
    matrix_csv: Option<PathBuf>,
    /// Print the full score matrix
    #[arg(long)]
    list_matrix: bool,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Use case description text
    #[arg(long)]
    use_case: Option<String>,
    /// Read the use case description from a file
    #[arg(long, conflicts_with = "use_case")]
    use_case_file: Option<PathBuf>,
    /// Criterion weight override, e.g. --weight "Security Parameters=5" (repeatable)
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(Criterion, u32)>,
    /// Write the normalized score matrix to a CSV file
    #[arg(long)]
    matrix_csv: Option<PathBuf>,
    /// Print the full score matrix
    #[arg(long)]
    list_matrix: bool,
    /// Print the raw model response alongside the report
    #[arg(long)]
    show_raw: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Advisor {
            command: AdvisorCommand::Rank(args),
        } => run_rank(args),
        Command::Advisor {
            command: AdvisorCommand::Evaluate(args),
        } => run_evaluate(args).await,
    }
}

fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.response_file)?;
    let snapshot = ScoreSnapshot::from_response(raw)?;
    report_and_export(
        &snapshot,
        args.weights,
        args.matrix_csv.as_deref(),
        args.list_matrix,
        false,
    )
}

async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let use_case = match (args.use_case, args.use_case_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(AppError::Advisor(AdvisorError::EmptyUseCase)),
    };

    let config = AppConfig::load()?;
    let gateway = OpenAiChatClient::from_config(&config.model)?;
    let advisor = CloudAdvisor::new(Box::new(gateway));
    // The gateway blocks on its own runtime; keep it off the async workers.
    let snapshot =
        tokio::task::spawn_blocking(move || advisor.generate_scores(&use_case)).await??;

    report_and_export(
        &snapshot,
        args.weights,
        args.matrix_csv.as_deref(),
        args.list_matrix,
        args.show_raw,
    )
}

fn report_and_export(
    snapshot: &ScoreSnapshot,
    weights: Vec<(Criterion, u32)>,
    matrix_csv: Option<&std::path::Path>,
    list_matrix: bool,
    show_raw: bool,
) -> Result<(), AppError> {
    let weights = WeightVector::from_entries(weights);
    let (result, insights) = snapshot.rank(&weights)?;

    if let Some(path) = matrix_csv {
        std::fs::write(path, snapshot.table.to_csv()?)?;
        println!("Score matrix written to {}", path.display());
    }

    render_advisor_report(snapshot, &result, insights.as_ref(), list_matrix, show_raw);
    Ok(())
}

fn render_advisor_report(
    snapshot: &ScoreSnapshot,
    result: &RankedResult,
    insights: Option<&RankingInsights>,
    list_matrix: bool,
    show_raw: bool,
) {
    println!("Cloud provider evaluation");
    println!(
        "Generated at: {}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if !snapshot.repairs.is_clean() {
        println!("Response repairs: {}", snapshot.repairs.describe());
    }

    println!();
    println!("Final weighted scores:");
    let view = RankingView::from_result(result);
    for (position, entry) in view.rankings.iter().enumerate() {
        println!(
            "  {:>2}. {:<13} {}",
            position + 1,
            entry.provider_label,
            entry.display_score
        );
    }

    if let Some(recommendation) = &view.recommendation {
        println!();
        println!(
            "Recommended provider: {} (score {})",
            recommendation.provider_label, recommendation.display_score
        );
    }

    if let Some(insights) = insights {
        if !insights.decisive_criteria.is_empty() {
            println!("Decisive criteria: {}", insights.decisive_criteria.join(", "));
        }
        for note in &insights.observations {
            println!("Note: {note}");
        }
    }

    if list_matrix {
        println!();
        println!("Score matrix:");
        for row in ScoreMatrixView::from_table(&snapshot.table).rows {
            let cells = row
                .scores
                .iter()
                .map(|cell| format!("{}={}", cell.provider_label, cell.score))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {:<33} {cells}", row.criterion_label);
        }
    }

    if show_raw {
        println!();
        println!("Raw model response:");
        println!("{}", snapshot.raw_response);
    }
}
