use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;

use mizan_analysis::report;
use mizan_analysis::{
    Analyzer, CaseProfile, ComplianceProfile, ExplainableReasoner, ReasoningContext, RiskAssessor,
};
use mizan_core::{AnalyzerConfig, Catalog};

#[derive(Parser, Debug)]
#[command(name = "mizan", version, about = "Turkish contract analysis")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(
        long,
        global = true,
        env = "MIZAN_CATALOG",
        help = "Catalog JSON file (built-in catalog when omitted)"
    )]
    catalog: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "MIZAN_MAX_DOCUMENT_CHARS",
        default_value_t = AnalyzerConfig::DEFAULT_MAX_DOCUMENT_CHARS,
        help = "Truncate documents longer than this many chars"
    )]
    max_chars: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract clauses, entities, obligations and risk flags from a document.
    Analyze {
        file: PathBuf,
        #[arg(long = "type", default_value = "genel")]
        document_type: String,
    },
    /// Analyze a document, then score it as a weighted-factor assessment.
    AssessContract {
        file: PathBuf,
        #[arg(long = "type", default_value = "genel")]
        document_type: String,
    },
    /// Assess litigation risk from a case profile (JSON).
    AssessCase { file: PathBuf },
    /// Assess regulatory compliance from a requirement list (JSON).
    AssessCompliance { file: PathBuf },
    /// Build a confidence-scored reasoning trace from a context (JSON).
    Reason { file: PathBuf },
    /// Show the active catalog.
    Catalog,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    tracing::debug!("mizan v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Analyze {
            file,
            document_type,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let document = read_text(file)?;
            let result = analyzer(&catalog, cli.max_chars).analyze(&document, document_type);
            emit(cli.json, &result, report::render_extraction)
        }
        Commands::AssessContract {
            file,
            document_type,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let document = read_text(file)?;
            let result = analyzer(&catalog, cli.max_chars).analyze(&document, document_type);
            let assessment = RiskAssessor::new().assess_contract(&result);
            emit(cli.json, &assessment, report::render_assessment)
        }
        Commands::AssessCase { file } => {
            let profile: CaseProfile = read_json(file)?;
            let assessment = RiskAssessor::new().assess_case(&profile);
            emit(cli.json, &assessment, report::render_assessment)
        }
        Commands::AssessCompliance { file } => {
            let profile: ComplianceProfile = read_json(file)?;
            let assessment = RiskAssessor::new().assess_compliance(&profile);
            emit(cli.json, &assessment, report::render_assessment)
        }
        Commands::Reason { file } => {
            let context: ReasoningContext = read_json(file)?;
            let result = ExplainableReasoner::new().explain(&context);
            emit(cli.json, &result, report::render_explainable)
        }
        Commands::Catalog => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&catalog.summary())?);
            } else {
                print_catalog(&catalog);
            }
            Ok(())
        }
    }
}

fn analyzer(catalog: &Catalog, max_chars: usize) -> Analyzer<'_> {
    Analyzer::new(catalog).with_config(AnalyzerConfig {
        max_document_chars: max_chars,
        ..AnalyzerConfig::default()
    })
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => {
            let json = read_text(path)?;
            Catalog::from_json(&json)
                .with_context(|| format!("invalid catalog {}", path.display()))
        }
        None => Catalog::builtin().context("built-in catalog failed validation"),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit<T: Serialize>(json: bool, value: &T, render: fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render(value));
    }
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    let summary = catalog.summary();
    println!("=== Katalog {} ===", summary.version);
    println!();
    println!("  {:<26} {}", "clause_types", summary.clause_types);
    println!("  {:<26} {}", "risk_patterns", summary.risk_patterns);
    println!("  {:<26} {}", "document_types", summary.document_types);
    println!("  {:<26} {}", "rules", summary.rules);
    println!();

    println!("Madde Türleri");
    for ct in catalog.clause_types() {
        let severity = ct.severity.map(|s| format!(" [{}]", s.as_str())).unwrap_or_default();
        println!("  {:<26} {}{}", ct.id, ct.title, severity);
    }
    println!();

    println!("Risk Kalıpları");
    for rp in catalog.risk_patterns() {
        println!(
            "  {:<26} {} [{}]",
            rp.id,
            rp.flag_type.as_str(),
            rp.severity.as_str()
        );
    }
    println!();

    println!("Belge Türleri");
    let default = &catalog.default_document_type().id;
    for dt in catalog.document_types() {
        let marker = if &dt.id == default { " (varsayılan)" } else { "" };
        println!("  {:<26} {}{}", dt.id, dt.title, marker);
        println!("    {}", dt.required.join(", "));
    }
}
