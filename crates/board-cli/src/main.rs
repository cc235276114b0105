//! Main entry point for the service-order board CLI.
//!
//! Wires the storage backend, order store, notification relay and board
//! controller together, then drives the board through an interactive
//! command loop. Commands map onto the drag capability interface the
//! board exposes (`grab`/`drop`/`cancel`), with `move` as the one-step
//! shorthand.

use anyhow::Context;
use board_config::Config;
use board_core::{BoardController, EventBus, MoveOutcome, OrderStore};
use board_notify::NotificationService;
use board_storage::{implementations::memory, StorageService};
use board_types::{ClientType, OrderDraft, OrderStatus, PersonType};
use chrono::{Duration, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod render;
mod seed;

/// Command-line arguments for the board CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "board.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load configuration; a missing file means defaults.
	let config = if args.config.exists() {
		Config::from_file(&args.config)
			.with_context(|| format!("loading config from {}", args.config.display()))?
	} else {
		tracing::info!(path = %args.config.display(), "Config file not found, using defaults");
		Config::default()
	};
	tracing::info!(board = %config.board.id, "Starting board");

	// Build services.
	let backend = match config.storage.backend.as_str() {
		"memory" => memory::create_storage(&config.storage.backend_config())
			.map_err(|e| anyhow::anyhow!("storage backend: {}", e))?,
		other => anyhow::bail!("unknown storage backend '{}'", other),
	};
	let storage = Arc::new(StorageService::new(backend));
	let event_bus = EventBus::default();
	let store = Arc::new(OrderStore::new(storage.clone(), event_bus.clone()));
	let notify = Arc::new(NotificationService::new(storage.clone()));

	// The relay turns board events into the notification feed.
	let relay_notify = notify.clone();
	let relay_bus = event_bus.clone();
	let relay = tokio::spawn(async move { relay_notify.relay(relay_bus).await });

	if config.seed.sample_data {
		store
			.seed(seed::sample_orders())
			.await
			.map_err(|e| anyhow::anyhow!("seeding sample data: {}", e))?;
	}

	let mut board = BoardController::load(store.clone(), event_bus.clone())
		.await
		.map_err(|e| anyhow::anyhow!("loading board: {}", e))?;

	println!("Service-order board [{}]. Type 'help' for commands.", config.board.id);
	print!("{}", render::render_board(board.grouping()));

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut stdout = tokio::io::stdout();
	stdout.write_all(b"> ").await?;
	stdout.flush().await?;

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else { break };
				match handle_command(&line, &mut board, &store, &notify).await {
					Ok(true) => break,
					Ok(false) => {}
					Err(e) => println!("error: {:#}", e),
				}
				stdout.write_all(b"> ").await?;
				stdout.flush().await?;
			}

			// Shutdown signal
			_ = tokio::signal::ctrl_c() => {
				break;
			}
		}
	}

	relay.abort();
	tracing::info!("Board stopped");
	Ok(())
}

const HELP: &str = "\
commands:
  board                 render the kanban columns
  orders                list all orders, newest first
  notes                 show the notification feed
  grab <id>             start dragging a card
  drop <zone>           drop the dragged card (approved|pending|rejected|inspection)
  cancel                abandon the active drag
  move <id> <zone>      grab and drop in one step
  add <client> <type>   create a pending order
  rm <id>               delete an order
  quit                  exit
";

/// Executes one command line. Returns true when the loop should exit.
async fn handle_command(
	line: &str,
	board: &mut BoardController,
	store: &Arc<OrderStore>,
	notify: &Arc<NotificationService>,
) -> anyhow::Result<bool> {
	let mut parts = line.split_whitespace();
	let Some(command) = parts.next() else {
		return Ok(false);
	};

	match command {
		"help" => print!("{}", HELP),
		"board" => print!("{}", render::render_board(board.grouping())),
		"orders" => {
			let orders = store.list_orders().await?;
			print!("{}", render::render_orders(&orders));
		}
		"notes" => {
			let feed = notify.list().await?;
			print!("{}", render::render_notifications(&feed));
		}
		"grab" => {
			let id = parts.next().context("usage: grab <id>")?;
			board.drag_start(id)?;
			println!("dragging [{}]", id);
		}
		"drop" => {
			let zone = parts.next().context("usage: drop <zone>")?;
			report_outcome(board.drag_end(Some(zone)).await?);
		}
		"cancel" => {
			report_outcome(board.drag_end(None).await?);
		}
		"move" => {
			let id = parts.next().context("usage: move <id> <zone>")?;
			let zone = parts.next().context("usage: move <id> <zone>")?;
			report_outcome(board.move_order(id, zone).await?);
			print!("{}", render::render_board(board.grouping()));
		}
		"add" => {
			let client = parts.next().context("usage: add <client> <type>")?;
			let service: Vec<&str> = parts.collect();
			if service.is_empty() {
				anyhow::bail!("usage: add <client> <type>");
			}
			let draft = OrderDraft {
				status: OrderStatus::Pending,
				client_name: client.to_string(),
				address: String::new(),
				service_type: service.join(" "),
				scheduled_for: Utc::now() + Duration::days(3),
				client_type: ClientType::New,
				person_type: PersonType::Individual,
				value: 0.0,
				technician: None,
				description: None,
				budget_id: None,
			};
			let order = store.create_order(draft).await?;
			board.refresh().await?;
			println!("created [{}] for {}", order.id, order.client_name);
		}
		"rm" => {
			let id = parts.next().context("usage: rm <id>")?;
			store.delete_order(id).await?;
			board.refresh().await?;
			println!("deleted [{}]", id);
		}
		"quit" | "exit" => return Ok(true),
		other => println!("unknown command '{}' (try 'help')", other),
	}
	Ok(false)
}

/// Prints the result of a completed drag gesture.
fn report_outcome(outcome: MoveOutcome) {
	match outcome {
		MoveOutcome::Committed { from, to } => println!("moved {} -> {}", from, to),
		MoveOutcome::Unchanged => println!("dropped on its own column, nothing to do"),
		MoveOutcome::Aborted => println!("drag abandoned"),
		MoveOutcome::RolledBack { reason, .. } => {
			println!("move failed and was rolled back: {}", reason)
		}
	}
}
