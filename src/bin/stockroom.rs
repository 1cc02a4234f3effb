//! Stockroom command-line front-end.
//!
//! Inventory subcommands work on one JSON document (`--file`); each run
//! loads it, applies one change, and saves it back.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use stockroom::{
    grading, HealthRegistry, InventoryItem, InventoryLog, ItemId, ItemKind, LoadOutcome,
    PersistenceConfig, StoreError, WarehouseManager,
};

#[derive(Parser)]
#[command(name = "stockroom", about = "Typed inventory stores with JSON persistence", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Inventory document
    #[arg(short, long, global = true, default_value = "inventory.json")]
    file: PathBuf,

    /// Write compact JSON instead of indented
    #[arg(long, global = true)]
    compact: bool,

    /// Overwrite the document in place instead of temp-file + rename
    #[arg(long, global = true)]
    no_atomic: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write the sample inventory to the document
    Seed,
    /// Print every item in the document
    List,
    /// Add an item
    Add(AddArgs),
    /// Remove an item
    Remove(IdArgs),
    /// Set an item's quantity
    SetQuantity(QuantityArgs),
    /// Add a (possibly negative) delta to an item's quantity
    Adjust(QuantityArgs),
    /// Run the warehouse demo
    Warehouse,
    /// Show patients, or one patient's prescriptions
    Prescriptions(PrescriptionArgs),
    /// Turn an `id,name,score` file into a grade report
    Grade(GradeArgs),
}

#[derive(Args)]
struct AddArgs {
    id: u32,
    name: String,
    quantity: u32,
}

#[derive(Args)]
struct IdArgs {
    id: u32,
}

#[derive(Args)]
struct QuantityArgs {
    id: u32,
    #[arg(allow_negative_numbers = true)]
    value: i64,
}

#[derive(Args)]
struct PrescriptionArgs {
    patient_id: Option<u32>,
}

#[derive(Args)]
struct GradeArgs {
    input: PathBuf,
    output: PathBuf,
}

fn open_log(cli: &Cli) -> anyhow::Result<InventoryLog> {
    let config = PersistenceConfig {
        pretty: !cli.compact,
        atomic_replace: !cli.no_atomic,
        ..PersistenceConfig::default()
    };
    let mut log = InventoryLog::with_config(&cli.file, config)?;
    if log.load()? == LoadOutcome::Absent {
        println!("No existing file found.");
    }
    Ok(log)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn cmd_seed(cli: &Cli) -> anyhow::Result<()> {
    let mut log = open_log(cli)?;
    log.seed_sample_data(Utc::now())?;
    let count = log.save()?;
    println!("Saved {count} items to {}", log.path().display());
    Ok(())
}

fn cmd_list(cli: &Cli) -> anyhow::Result<()> {
    let log = open_log(cli)?;
    print_lines(&log.render_lines());
    Ok(())
}

fn cmd_add(cli: &Cli, args: &AddArgs) -> anyhow::Result<()> {
    let mut log = open_log(cli)?;
    log.add(InventoryItem::new(args.id, args.name.clone(), args.quantity, Utc::now())?)?;
    log.save()?;
    println!("Item ID {} added.", args.id);
    Ok(())
}

fn cmd_remove(cli: &Cli, args: &IdArgs) -> anyhow::Result<()> {
    let mut log = open_log(cli)?;
    log.remove(ItemId::new(args.id))?;
    log.save()?;
    println!("Item ID {} removed.", args.id);
    Ok(())
}

fn cmd_set_quantity(cli: &Cli, args: &QuantityArgs) -> anyhow::Result<()> {
    let mut log = open_log(cli)?;
    log.store_mut().update_quantity(ItemId::new(args.id), args.value)?;
    log.save()?;
    println!("Item ID {} quantity set to {}.", args.id, args.value);
    Ok(())
}

fn cmd_adjust(cli: &Cli, args: &QuantityArgs) -> anyhow::Result<()> {
    let mut log = open_log(cli)?;
    let quantity = log
        .store_mut()
        .adjust_quantity(ItemId::new(args.id), args.value)?;
    log.save()?;
    println!("Stock adjusted for Item ID {}. New Qty: {quantity}", args.id);
    Ok(())
}

fn report_store_error(label: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        let kind = match e {
            StoreError::DuplicateIdentity(_) => "Duplicate Error",
            StoreError::NotFound(_) => "Not Found Error",
            StoreError::InvalidValue { .. } => "Quantity Error",
        };
        warn!(check = label, error = %e, "expected rejection");
        println!("{kind}: {e}");
    }
}

fn cmd_warehouse() -> anyhow::Result<()> {
    let mut manager = WarehouseManager::new();
    manager.seed_data(Utc::now().date_naive())?;

    println!("=== Grocery Items ===");
    print_lines(&manager.report_lines(ItemKind::Grocery));
    println!();
    println!("=== Electronic Items ===");
    print_lines(&manager.report_lines(ItemKind::Electronic));
    println!();

    let quantity = manager.increase_stock(ItemKind::Electronic, ItemId::new(2), 5)?;
    println!("Stock increased for Item ID 2. New Qty: {quantity}");
    println!();

    println!("=== Error Checks ===");
    let tablet = stockroom::ElectronicItem::new(1, "Tablet", 5, "Apple", 18)?;
    report_store_error("duplicate", manager.electronics_mut().add(tablet));
    report_store_error(
        "missing",
        manager.remove_item(ItemKind::Grocery, ItemId::new(99)).map(drop),
    );
    report_store_error(
        "negative",
        manager.groceries_mut().update_quantity(ItemId::new(1), -10),
    );
    Ok(())
}

fn cmd_prescriptions(args: &PrescriptionArgs) -> anyhow::Result<()> {
    let mut registry = HealthRegistry::new();
    registry.seed_data(Utc::now().date_naive())?;
    registry.build_prescription_map();

    let Some(patient_id) = args.patient_id else {
        println!("=== All Patients ===");
        for patient in registry.patients() {
            println!("{patient}");
        }
        return Ok(());
    };

    let patient_id = ItemId::new(patient_id);
    let prescriptions = registry.prescriptions_for(patient_id)?;
    let patient = registry.patients().get(patient_id)?;
    if prescriptions.is_empty() {
        println!("No prescriptions found for Patient ID {patient_id}");
        return Ok(());
    }
    println!("=== Prescriptions for {} ===", patient.name);
    for prescription in prescriptions {
        println!("{prescription}");
    }
    Ok(())
}

fn cmd_grade(args: &GradeArgs) -> anyhow::Result<()> {
    let students = grading::read_students(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    grading::write_report(&students, &args.output)?;
    println!("Report successfully written to '{}'.", args.output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Seed => cmd_seed(&cli),
        Command::List => cmd_list(&cli),
        Command::Add(args) => cmd_add(&cli, args),
        Command::Remove(args) => cmd_remove(&cli, args),
        Command::SetQuantity(args) => cmd_set_quantity(&cli, args),
        Command::Adjust(args) => cmd_adjust(&cli, args),
        Command::Warehouse => cmd_warehouse(),
        Command::Prescriptions(args) => cmd_prescriptions(args),
        Command::Grade(args) => cmd_grade(args),
    }
}
