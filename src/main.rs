use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use condoc_client::config::Settings;
use condoc_client::domain::{
    DocumentCategory, FileUpload, FloorPlanParser, GanttFormat, ParserConfig,
};
use condoc_client::logging;
use condoc_client::session::ParserSession;

/// Submit a construction document to the parser service and print the
/// extracted data, optionally asking follow-up questions about it.
#[derive(Parser)]
#[command(name = "condoc", version)]
struct Cli {
    /// Document file to upload (floor plan, Gantt chart, or bill of quantities)
    file: PathBuf,

    /// Document category
    #[arg(long, value_enum, default_value_t = CategoryArg::FloorPlan)]
    category: CategoryArg,

    /// Extraction variant within the category
    #[arg(long, value_enum)]
    config: Option<ConfigArg>,

    /// Follow-up question about the parsed result (repeatable)
    #[arg(long = "ask", value_name = "QUESTION")]
    questions: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    FloorPlan,
    GanttChart,
    BillOfQuantities,
}

impl From<CategoryArg> for DocumentCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::FloorPlan => DocumentCategory::FloorPlan,
            CategoryArg::GanttChart => DocumentCategory::GanttChart,
            CategoryArg::BillOfQuantities => DocumentCategory::BillOfQuantities,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigArg {
    TitleblockHybrid,
    RoomsDeterministic,
    RoomsAi,
    FullPlanAi,
    Visual,
    Tabular,
}

impl From<ConfigArg> for ParserConfig {
    fn from(arg: ConfigArg) -> Self {
        match arg {
            ConfigArg::TitleblockHybrid => Self::FloorPlan(FloorPlanParser::TitleblockHybrid),
            ConfigArg::RoomsDeterministic => Self::FloorPlan(FloorPlanParser::RoomsDeterministic),
            ConfigArg::RoomsAi => Self::FloorPlan(FloorPlanParser::RoomsAi),
            ConfigArg::FullPlanAi => Self::FloorPlan(FloorPlanParser::FullPlanAi),
            ConfigArg::Visual => Self::GanttChart(GanttFormat::Visual),
            ConfigArg::Tabular => Self::GanttChart(GanttFormat::Tabular),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        base_url = %settings.parser_base_url,
        "Starting condoc client"
    );

    let session = ParserSession::new(&settings)?;

    // Warm the hosted backend without blocking the upload.
    session.spawn_wake_ping();

    let category = DocumentCategory::from(cli.category);
    session.select_category(category);

    if let Some(config_arg) = cli.config {
        let config = ParserConfig::from(config_arg);
        ensure!(
            config.category() == category,
            "--config {:?} is not valid for --category {:?}",
            config_arg,
            cli.category,
        );
        session.select_config(config);
    }

    let bytes = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let name = cli
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let content_type = content_type_for(&cli.file);

    let config = session.snapshot().config;
    if !mime_accepted(config.accepted_mime_types(), content_type) {
        // The filter is advisory; the service has the final say.
        tracing::warn!(
            content_type,
            "File type is outside the advisory filter for this parser; submitting as-is"
        );
    }

    session.select_file(FileUpload::new(name, bytes, content_type));

    match session.submit().await {
        Ok(result) => {
            println!("Input format:      {}", result.input_format);
            println!(
                "Extraction status: {}",
                if result.is_extraction_successful {
                    "successful"
                } else {
                    "failed"
                }
            );
            println!("Extraction method: {}", result.extraction_method);
            if let Some(confidence) = result.confidence_percent() {
                println!("Confidence:        {confidence}");
            }
            println!("{}", serde_json::to_string_pretty(&result.payload)?);
        }
        Err(err) => {
            eprintln!("Error: {}", err.message);
            if let Some(detail) = &err.detail {
                eprintln!("{}", serde_json::to_string_pretty(detail)?);
            }
            std::process::exit(1);
        }
    }

    for question in &cli.questions {
        match session.ask(question).await {
            Some(Ok(answer)) => println!("\nQ: {question}\nA: {answer}"),
            Some(Err(err)) => eprintln!("\nQ: {question}\n{err}"),
            None => {}
        }
    }

    Ok(())
}

/// Content type from the file extension. Presentation-side convenience only;
/// the service inspects the upload itself.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn mime_accepted(accepted: &[&str], content_type: &str) -> bool {
    accepted.iter().any(|entry| match entry.strip_suffix("/*") {
        Some(family) => content_type.starts_with(family)
            && content_type[family.len()..].starts_with('/'),
        None => *entry == content_type,
    })
}
