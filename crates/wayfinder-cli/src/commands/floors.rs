//! `wayfinder floor ...`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use wayfinder_lib::{FloorId, NewFloor};

use super::CommandContext;
use crate::output::Removal;

#[derive(Subcommand, Debug)]
pub enum FloorCommand {
    /// Create a floor.
    Add(AddFloorArgs),
    /// List all floors.
    List,
    /// Delete a floor with its nodes, edges, and rooms.
    Delete {
        /// Floor id.
        id: FloorId,
    },
}

#[derive(Args, Debug)]
pub struct AddFloorArgs {
    /// Short code such as GF or B1.
    #[arg(long)]
    pub key: String,
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Faculty or building the floor belongs to.
    #[arg(long)]
    pub faculty: Option<String>,
    /// Background map image URL.
    #[arg(long = "image-url")]
    pub image_url: String,
    /// Map width in pixels.
    #[arg(long)]
    pub width: u32,
    /// Map height in pixels.
    #[arg(long)]
    pub height: u32,
}

impl From<AddFloorArgs> for NewFloor {
    fn from(args: AddFloorArgs) -> Self {
        NewFloor {
            key: args.key,
            name: args.name,
            faculty: args.faculty,
            image_url: args.image_url,
            width: args.width,
            height: args.height,
        }
    }
}

pub fn handle_floor(ctx: &CommandContext, command: FloorCommand) -> Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        FloorCommand::Add(args) => {
            let floor = store
                .create_floor(&args.into())
                .context("failed to create floor")?;
            ctx.emit(&floor)
        }
        FloorCommand::List => {
            let floors = store.list_floors().context("failed to list floors")?;
            ctx.emit(floors.as_slice())
        }
        FloorCommand::Delete { id } => {
            store
                .delete_floor(id)
                .with_context(|| format!("failed to delete floor {}", id))?;
            ctx.emit(&Removal {
                kind: "floor",
                id,
                edges_removed: None,
            })
        }
    }
}
