//! `wayfinder route` and `wayfinder route-multi`.

use anyhow::Result;
use clap::Args;
use tracing::info;

use wayfinder_lib::{
    route_multi_floor, route_single_floor, FloorId, MultiFloorRequest, Point, RoutePreference,
};

use super::CommandContext;

/// Start point and destination shared by both route commands.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Floor the start point is on.
    #[arg(long)]
    pub floor: FloorId,
    /// Start x coordinate.
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,
    /// Start y coordinate.
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
    /// Destination room code (case-insensitive).
    #[arg(long)]
    pub room: String,
}

impl RouteArgs {
    fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Route to a room on the start floor.
pub fn handle_route(ctx: &CommandContext, args: &RouteArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let route = route_single_floor(&store, args.floor, args.start(), &args.room)?;
    info!(room = %route.to.room_code, cost = route.cost, "route computed");
    ctx.emit(&route)
}

/// Route to a room on any floor, changing floors through stairs or elevators.
///
/// Unrecognised `prefer` values are treated as no preference.
pub fn handle_route_multi(
    ctx: &CommandContext,
    args: &RouteArgs,
    prefer: Option<&str>,
) -> Result<()> {
    let store = ctx.open_store()?;
    let request = MultiFloorRequest::new(args.floor, args.start(), args.room.as_str())
        .with_preference(RoutePreference::parse_lenient(prefer));
    let route = route_multi_floor(&store, &request)?;
    info!(
        mode = route.mode.as_str(),
        total_cost = route.total_cost,
        "route computed"
    );
    ctx.emit(&route)
}
