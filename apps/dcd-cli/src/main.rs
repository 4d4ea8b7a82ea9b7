use clap::{Parser, Subcommand};
use dcd_app::{
    AppError, AppResult, Co2EmissionsGenerator, CostService, Settings, effective_co2_emissions,
    project_service,
};
use dcd_core::CaseId;
use dcd_model::Series;
use dcd_store::{CaseLookup, DrainageStrategyLookup};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dcd")]
#[command(about = "Concept development data and CO2 emissions profiles", long_about = None)]
struct Cli {
    /// Settings file (YAML); defaults apply when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project document with one base case
    Init {
        /// Path of the new document (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Project name
        #[arg(long, default_value = "New project")]
        name: String,
        /// Calendar year of DG4
        #[arg(long)]
        dg4_year: i32,
    },
    /// Validate document syntax and references
    Validate {
        /// Path to the project document
        project_path: PathBuf,
    },
    /// List cases in a project
    Cases {
        /// Path to the project document
        project_path: PathBuf,
    },
    /// Regenerate and store the CO2 emissions of a case
    GenerateCo2 {
        /// Path to the project document
        project_path: PathBuf,
        /// Case ID
        case_id: CaseId,
    },
    /// Show CAPEX and exploration cost totals of a case
    CostSummary {
        /// Path to the project document
        project_path: PathBuf,
        /// Case ID
        case_id: CaseId,
    },
    /// Export the effective CO2 emissions of a case as CSV
    ShowProfile {
        /// Path to the project document
        project_path: PathBuf,
        /// Case ID
        case_id: CaseId,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Init {
            project_path,
            name,
            dg4_year,
        } => cmd_init(&project_path, &name, dg4_year, &settings),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Cases { project_path } => cmd_cases(&project_path, &settings),
        Commands::GenerateCo2 {
            project_path,
            case_id,
        } => cmd_generate_co2(&project_path, case_id, &settings),
        Commands::CostSummary {
            project_path,
            case_id,
        } => cmd_cost_summary(&project_path, case_id, &settings),
        Commands::ShowProfile {
            project_path,
            case_id,
            output,
        } => cmd_show_profile(&project_path, case_id, output.as_deref(), &settings),
    }
}

fn cmd_init(project_path: &Path, name: &str, dg4_year: i32, settings: &Settings) -> AppResult<()> {
    let store = project_service::create_project(project_path, name, dg4_year, settings)?;
    let cases = project_service::list_cases(&store)?;
    println!("✓ Created {}", project_path.display());
    for case in cases {
        println!("  {} - {}", case.id, case.name);
    }
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let document = project_service::validate_project(project_path)?;
    println!(
        "✓ Project '{}' is valid ({} cases)",
        document.project.name,
        document.cases.len()
    );
    Ok(())
}

fn cmd_cases(project_path: &Path, settings: &Settings) -> AppResult<()> {
    let store = project_service::open_store(project_path, settings)?;
    let cases = project_service::list_cases(&store)?;

    if cases.is_empty() {
        println!("No cases found in project");
    } else {
        println!("Cases in project:");
        for case in cases {
            let co2 = if case.has_co2_emissions {
                "co2 generated"
            } else {
                "no co2"
            };
            println!("  {} - {} (DG4 {}, {})", case.id, case.name, case.dg4_year, co2);
        }
    }
    Ok(())
}

fn cmd_generate_co2(project_path: &Path, case_id: CaseId, settings: &Settings) -> AppResult<()> {
    let store = project_service::open_store(project_path, settings)?;
    let dto = Co2EmissionsGenerator::from_repository(&store).generate(case_id)?;

    let series = dto.series();
    println!("✓ CO2 emissions generated: {}", dto.id);
    match series.last_year() {
        Some(last) => println!("  Years: {} - {} (relative to DG4)", series.start_year, last),
        None => println!("  No emissions"),
    }
    println!("  Total: {:.3} t", series.total());
    Ok(())
}

fn cmd_cost_summary(project_path: &Path, case_id: CaseId, settings: &Settings) -> AppResult<()> {
    let store = project_service::open_store(project_path, settings)?;
    let summary = CostService::from_repository(&store).case_cost_summary(case_id)?;

    println!("Cost summary for case {}:", case_id);
    println!("\nCAPEX:");
    for line in &summary.capex {
        println!("  {:<18} {:>14.2}", line.label, line.series.total());
    }
    println!("  {:<18} {:>14.2}", "total", summary.capex_total.total());

    println!("\nExploration:");
    for line in &summary.exploration {
        println!("  {:<18} {:>14.2}", line.label, line.series.total());
    }
    println!("  {:<18} {:>14.2}", "total", summary.exploration_total.total());

    if let Some((first, last)) = summary.calendar_span() {
        println!("\nYears: {} - {}", first, last);
    }
    println!("Grand total: {:.2}", summary.grand_total());
    Ok(())
}

fn cmd_show_profile(
    project_path: &Path,
    case_id: CaseId,
    output: Option<&Path>,
    settings: &Settings,
) -> AppResult<()> {
    let store = project_service::open_store(project_path, settings)?;
    let case = store
        .case(case_id)?
        .ok_or(AppError::not_found("case", case_id))?;
    let strategy = store
        .drainage_strategy(case.drainage_strategy_link)?
        .ok_or(AppError::not_found(
            "drainage strategy",
            case.drainage_strategy_link,
        ))?;

    let series = effective_co2_emissions(&strategy).unwrap_or_default();
    let csv = profile_csv(&series, case.dg4_year);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} years to {}", series.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

/// `year,co2_tonnes` rows with relative years moved to calendar years.
fn profile_csv(series: &Series, dg4_year: i32) -> String {
    let mut csv = String::from("year,co2_tonnes\n");
    for (year, value) in series.shifted(dg4_year).iter() {
        csv.push_str(&format!("{},{}\n", year, value));
    }
    csv
}
