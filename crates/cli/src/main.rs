use chrono::SecondsFormat;
use clap::{Parser, Subcommand, ValueEnum};
use er_core::{FileStore, Patient, TriageService, DEFAULT_PATIENT_DATA_DIR};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "er")]
#[command(about = "Emergency room patient tracker CLI")]
struct Cli {
    /// Root of the patient file store
    #[arg(long, env = "PATIENT_DATA_DIR", default_value = DEFAULT_PATIENT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum View {
    #[default]
    Active,
    Treated,
    All,
    Waiting,
    Emergency,
}

#[derive(Subcommand)]
enum Commands {
    /// Admit a patient with a triaged severity (1-10)
    Admit {
        name: String,
        #[arg(allow_negative_numbers = true)]
        severity: i64,
    },
    /// Admit an emergency patient (severity 10)
    Emergency { name: String },
    /// List patients
    List {
        #[arg(long, value_enum, default_value_t = View::Active)]
        view: View,
    },
    /// Show the next patient to be treated
    Next,
    /// Treat a specific patient
    Treat { id: String },
    /// Treat the highest-priority patient
    TreatNext,
    /// Revise the severity of a patient still waiting
    Revise {
        id: String,
        #[arg(allow_negative_numbers = true)]
        severity: i64,
    },
    /// Delete a patient record
    Delete { id: String },
    /// Search patients by name
    Search { name: String },
    /// Show department statistics
    Stats,
    /// Add sample patients to an empty store
    Seed,
}

fn format_patient(patient: &Patient) -> String {
    let mut line = format!(
        "ID: {}, Name: {}, Severity: {}, Status: {}, Arrived: {}",
        patient.id(),
        patient.name(),
        patient.severity(),
        patient.status(),
        patient
            .arrival_time()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    if let Some(treated) = patient.treated_time() {
        line.push_str(&format!(
            ", Treated: {}",
            treated.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    line
}

fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients found.");
    } else {
        for patient in patients {
            println!("{}", format_patient(patient));
        }
    }
}

fn list(triage: &TriageService, view: View) -> er_core::PatientResult<Vec<Patient>> {
    match view {
        View::Active => triage.list_active(),
        View::Treated => triage.list_treated(),
        View::All => triage.list_all(),
        View::Waiting => triage.list_waiting_only(),
        View::Emergency => triage.list_emergency_only(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        println!("Use 'er --help' for commands");
        return Ok(());
    };

    let triage = TriageService::new(Arc::new(FileStore::open(&cli.data_dir)?));

    match command {
        Commands::Admit { name, severity } => {
            let p = triage
                .admit_regular(&name, severity)
                .map_err(|e| format!("Error admitting patient: {}", e))?;
            println!("Admitted patient with ID: {}", p.id());
        }
        Commands::Emergency { name } => {
            let p = triage
                .admit_emergency(&name)
                .map_err(|e| format!("Error admitting emergency patient: {}", e))?;
            println!("Admitted emergency patient with ID: {}", p.id());
        }
        Commands::List { view } => print_patients(&list(&triage, view)?),
        Commands::Next => match triage.get_next()? {
            Some(p) => println!("{}", format_patient(&p)),
            None => println!("No patients waiting for treatment."),
        },
        Commands::Treat { id } => {
            let p = triage
                .treat_by_id(&id)
                .map_err(|e| format!("Error treating patient: {}", e))?;
            println!("Treated: {}", format_patient(&p));
        }
        Commands::TreatNext => match triage.auto_treat_next()? {
            Some(p) => println!("Treated: {}", format_patient(&p)),
            None => println!("No patients waiting for treatment."),
        },
        Commands::Revise { id, severity } => {
            let p = triage
                .revise_severity(&id, severity)
                .map_err(|e| format!("Error revising severity: {}", e))?;
            println!("Revised: {}", format_patient(&p));
        }
        Commands::Delete { id } => {
            triage
                .delete_by_id(&id)
                .map_err(|e| format!("Error deleting patient: {}", e))?;
            println!("Deleted patient with ID: {}", id);
        }
        Commands::Search { name } => print_patients(&triage.search_by_name(&name)?),
        Commands::Stats => {
            let stats = triage.get_statistics()?;
            println!("Total: {}", stats.total);
            println!("Waiting: {}", stats.waiting);
            println!("Emergency: {}", stats.emergency);
            println!("Treated: {}", stats.treated);
            println!("Active: {}", stats.active);
            println!("Average severity: {:.1}", stats.average_severity);
        }
        Commands::Seed => match triage.seed_sample_data()? {
            0 => println!("Store already holds patients; nothing seeded."),
            n => println!("Seeded {} sample patients.", n),
        },
    }

    Ok(())
}
