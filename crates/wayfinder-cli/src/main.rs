use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::commands::floors::{handle_floor, FloorCommand};
use wayfinder_cli::commands::graph::{
    handle_auto_connect, handle_edge, handle_graph, handle_node, AutoConnectStrategy, EdgeCommand,
    GraphCommand, NodeCommand,
};
use wayfinder_cli::commands::rooms::{handle_room, RoomCommand};
use wayfinder_cli::commands::route::{handle_route, handle_route_multi, RouteArgs};
use wayfinder_cli::commands::{handle_init, CommandContext};
use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{FloorId, DATABASE_PATH_ENV};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor floor graph authoring and route planning")]
struct Cli {
    /// Graph database file (or a directory to hold wayfinder.db).
    #[arg(long, global = true, env = DATABASE_PATH_ENV)]
    db: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the graph database if it does not exist and report its location.
    Init,
    /// Manage floors.
    #[command(subcommand)]
    Floor(FloorCommand),
    /// Manage room anchors.
    #[command(subcommand)]
    Room(RoomCommand),
    /// Manage graph nodes.
    #[command(subcommand)]
    Node(NodeCommand),
    /// Manage graph edges.
    #[command(subcommand)]
    Edge(EdgeCommand),
    /// Inspect or clear a floor graph.
    #[command(subcommand)]
    Graph(GraphCommand),
    /// Generate edges for a floor automatically.
    AutoConnect {
        #[arg(value_enum)]
        strategy: AutoConnectStrategy,
        #[arg(long)]
        floor: FloorId,
    },
    /// Route to a room on the same floor.
    Route(RouteArgs),
    /// Route to a room on any floor.
    RouteMulti {
        #[command(flatten)]
        route: RouteArgs,
        /// Preferred connector: stairs or elevator.
        #[arg(long)]
        prefer: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CommandContext::new(cli.db, cli.format);

    match cli.command {
        Command::Init => handle_init(&ctx),
        Command::Floor(command) => handle_floor(&ctx, command),
        Command::Room(command) => handle_room(&ctx, command),
        Command::Node(command) => handle_node(&ctx, command),
        Command::Edge(command) => handle_edge(&ctx, command),
        Command::Graph(command) => handle_graph(&ctx, command),
        Command::AutoConnect { strategy, floor } => handle_auto_connect(&ctx, strategy, floor),
        Command::Route(args) => handle_route(&ctx, &args),
        Command::RouteMulti { route, prefer } => {
            handle_route_multi(&ctx, &route, prefer.as_deref())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
