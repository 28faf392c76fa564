//! Operator command line for the order file
//!
//! Lists, inspects and edits orders without starting the dashboard. Uses the
//! same loader and mutation gateway as the dashboard, so edits made here are
//! visible there on the next refresh.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use orderbook::{DatasetLoader, MutationGateway, Order, RealCsvStore, mask_phone_number};
use shared::{FieldUpdates, MutationOutcome, OrderDraft, ProcessId, RowId, logging, process_debug};

const DEFAULT_ORDERS_FILE: &str = "cleaned_revenue_data.csv";

/// Inspect and edit the catering order file
#[derive(Parser)]
#[command(name = "orderbook")]
#[command(about = "Inspect and edit the catering order file")]
struct Args {
    /// Order file (defaults to $ORDERS_FILE, then ./cleaned_revenue_data.csv)
    #[arg(long)]
    data_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List orders, oldest first
    List {
        /// Only rows whose date could not be parsed
        #[arg(long)]
        invalid_only: bool,
    },
    /// Show every field of one order
    Show { id: RowId },
    /// Append a new order
    Add {
        /// Event date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        customer: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value_t = 100)]
        pax: i64,
        #[arg(long, default_value_t = 0)]
        staff: i64,
        #[arg(long, default_value = "Wedding")]
        event_type: String,
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        menu: String,
    },
    /// Overwrite fields of one order
    Update {
        id: RowId,
        /// Column=Value, repeatable
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    /// Remove one order
    Delete { id: RowId },
}

fn parse_assignment(input: &str) -> Result<(String, String), String> {
    let (column, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected Column=Value, got '{}'", input))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{}'", input));
    }
    Ok((column.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_cli();
    logging::init_tracing_with_level(Some(&args.log_level));

    let path = args
        .data_file
        .or_else(|| std::env::var("ORDERS_FILE").ok())
        .unwrap_or_else(|| DEFAULT_ORDERS_FILE.to_string());
    process_debug!(ProcessId::current(), "Using order file {}", path);

    let store = Arc::new(RealCsvStore::new(&path));
    let loader = DatasetLoader::new(Arc::clone(&store));
    let gateway = MutationGateway::new(store);

    match args.command {
        Command::List { invalid_only } => {
            let table = loader.load().await;
            let rows: Vec<&Order> = if invalid_only {
                table.invalid().collect()
            } else {
                table.iter().collect()
            };
            if rows.is_empty() {
                println!("No orders.");
            }
            for order in rows {
                println!("{}", summary_line(order));
            }
        }
        Command::Show { id } => {
            let table = loader.load().await;
            let order = table
                .get(id)
                .with_context(|| format!("order {} not found in {}", id, path))?;
            print_order(order);
        }
        Command::Add {
            date,
            customer,
            phone,
            title,
            pax,
            staff,
            event_type,
            revenue,
            location,
            menu,
        } => {
            let draft = OrderDraft {
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                customer_name: customer,
                phone_number: phone,
                order_title: title,
                pax,
                staff_count: staff,
                event_type,
                revenue,
                location,
                menu,
            };
            report(gateway.create(&draft).await)?;
        }
        Command::Update { id, set } => {
            let mut updates = FieldUpdates::new();
            for (column, value) in set {
                updates.set(column, value);
            }
            report(gateway.update(id, &updates).await)?;
        }
        Command::Delete { id } => {
            report(gateway.delete(id).await)?;
        }
    }

    Ok(())
}

fn report(outcome: MutationOutcome) -> Result<()> {
    if !outcome.success {
        bail!(outcome.message);
    }
    match outcome.row_id {
        Some(id) => println!("{} (id {})", outcome.message, id),
        None => println!("{}", outcome.message),
    }
    Ok(())
}

fn summary_line(order: &Order) -> String {
    let date = order
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "invalid date".to_string());
    format!(
        "{:>5}  {:<12}  {:<28}  {:>5} pax  RM {:>10.2}{}",
        order.row_id,
        date,
        order.display_title(),
        order.pax,
        order.revenue,
        if order.revenue_estimated { " (est.)" } else { "" }
    )
}

fn print_order(order: &Order) {
    let date = order
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "invalid date".to_string());
    println!("Order {}", order.row_id);
    println!("  Date:       {}", date);
    println!("  Customer:   {}", order.customer_name);
    println!("  Phone:      {}", mask_phone_number(&order.phone_number));
    println!("  Title:      {}", order.order_title);
    println!("  Event:      {}", order.event_type);
    println!("  Location:   {}", order.location);
    println!("  Pax:        {}", order.pax);
    println!("  Staff:      {}", order.staff_count);
    println!(
        "  Revenue:    RM {:.2}{}",
        order.revenue,
        if order.revenue_estimated { " (estimated)" } else { "" }
    );
    println!("  Menu:       {}", order.dishes().join(", "));
    if !order.details.is_empty() {
        println!("  Details:    {}", order.details);
    }
    for (column, value) in &order.extra {
        println!("  {}: {}", column, value);
    }
}
