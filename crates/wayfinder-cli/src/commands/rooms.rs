//! `wayfinder room ...`

use anyhow::{Context, Result};
use clap::Subcommand;

use wayfinder_lib::{FloorId, NewRoomLocation};

use super::CommandContext;

#[derive(Subcommand, Debug)]
pub enum RoomCommand {
    /// Place a room anchor on a floor, moving it if the code already exists.
    Set {
        #[arg(long)]
        floor: FloorId,
        /// Room code; stored trimmed and upper-cased.
        #[arg(long)]
        code: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Show where a room is.
    Show {
        /// Room code (case-insensitive).
        code: String,
    },
    /// List the rooms placed on a floor.
    List {
        #[arg(long)]
        floor: FloorId,
    },
}

pub fn handle_room(ctx: &CommandContext, command: RoomCommand) -> Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        RoomCommand::Set { floor, code, x, y } => {
            let room = store
                .upsert_room_location(
                    floor,
                    &NewRoomLocation {
                        room_code: code,
                        x,
                        y,
                    },
                )
                .context("failed to place room")?;
            ctx.emit(&room)
        }
        RoomCommand::Show { code } => {
            let room = store.room_location(&code)?;
            ctx.emit(&room)
        }
        RoomCommand::List { floor } => {
            store.floor(floor)?;
            let rooms = store
                .room_locations(floor)
                .with_context(|| format!("failed to list rooms on floor {}", floor))?;
            ctx.emit(rooms.as_slice())
        }
    }
}
