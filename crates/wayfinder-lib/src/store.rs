//! SQLite-backed store for floors, graph nodes, edges, and room anchors.
//!
//! The router only ever reads from the store. Every mutation runs inside a
//! single transaction, and foreign keys cascade node deletions to edges and
//! floor deletions to everything the floor owns, so a reader never observes
//! a half-deleted graph.

use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    normalize_room_code, require_room_code, Edge, Floor, FloorGraph, FloorId, NewFloor,
    NewRoomLocation, Node, NodeType, RoomLocation,
};

/// Minimum normalized Levenshtein similarity for a room code suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS floors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL,
    name TEXT NOT NULL,
    faculty TEXT,
    image_url TEXT NOT NULL,
    width INTEGER NOT NULL CHECK (width > 0),
    height INTEGER NOT NULL CHECK (height > 0)
);

CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    floor_id INTEGER NOT NULL REFERENCES floors(id) ON DELETE CASCADE,
    x REAL NOT NULL,
    y REAL NOT NULL,
    label TEXT,
    type TEXT NOT NULL DEFAULT 'hall'
);
CREATE INDEX IF NOT EXISTS nodes_floor_idx ON nodes(floor_id);

CREATE TABLE IF NOT EXISTS edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    floor_id INTEGER NOT NULL REFERENCES floors(id) ON DELETE CASCADE,
    from_node_id INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
    to_node_id INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
    cost REAL NOT NULL CHECK (cost >= 0)
);
CREATE INDEX IF NOT EXISTS edges_floor_idx ON edges(floor_id);

CREATE TABLE IF NOT EXISTS room_locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    floor_id INTEGER NOT NULL REFERENCES floors(id) ON DELETE CASCADE,
    room_code TEXT NOT NULL,
    x REAL NOT NULL,
    y REAL NOT NULL,
    UNIQUE (floor_id, room_code)
);
";

const FLOOR_COLUMNS: &str = "id, key, name, faculty, image_url, width, height";
pub(crate) const NODE_COLUMNS: &str = "id, floor_id, x, y, label, type";
pub(crate) const EDGE_COLUMNS: &str = "id, floor_id, from_node_id, to_node_id, cost";
const ROOM_COLUMNS: &str = "id, floor_id, room_code, x, y";

impl ToSql for NodeType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for NodeType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|err: Error| FromSqlError::Other(Box::new(err)))
    }
}

/// Handle to the graph database.
#[derive(Debug)]
pub struct GraphStore {
    connection: Connection,
}

impl GraphStore {
    /// Open (creating if necessary) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening graph store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an existing database for reads only.
    ///
    /// The schema is not applied and every write fails, so routing can run on
    /// its own connection while another connection authors the graph.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { connection })
    }

    /// Open a private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection.pragma_update(None, "foreign_keys", true)?;
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.connection
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }

    // -------------------------------------------------------------------------
    // Floors
    // -------------------------------------------------------------------------

    /// All floors ordered by id.
    pub fn list_floors(&self) -> Result<Vec<Floor>> {
        let sql = format!("SELECT {FLOOR_COLUMNS} FROM floors ORDER BY id");
        let mut stmt = self.connection.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_floor)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Fetch a floor or fail with [`Error::UnknownFloor`].
    pub fn floor(&self, id: FloorId) -> Result<Floor> {
        let sql = format!("SELECT {FLOOR_COLUMNS} FROM floors WHERE id = ?1");
        self.connection
            .query_row(&sql, [id], row_to_floor)
            .optional()?
            .ok_or(Error::UnknownFloor { id })
    }

    pub fn floor_count(&self) -> Result<usize> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM floors", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn create_floor(&mut self, floor: &NewFloor) -> Result<Floor> {
        validate_new_floor(floor)?;
        let tx = self.connection.transaction()?;
        tx.execute(
            "INSERT INTO floors (key, name, faculty, image_url, width, height)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                floor.key.trim(),
                floor.name.trim(),
                floor
                    .faculty
                    .as_deref()
                    .map(str::trim)
                    .filter(|f| !f.is_empty()),
                floor.image_url.trim(),
                floor.width,
                floor.height,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!(floor = id, key = %floor.key, "created floor");
        self.floor(id)
    }

    /// Delete a floor together with its nodes, edges, and room locations.
    pub fn delete_floor(&mut self, id: FloorId) -> Result<()> {
        let tx = self.connection.transaction()?;
        tx.execute("DELETE FROM edges WHERE floor_id = ?1", [id])?;
        tx.execute("DELETE FROM nodes WHERE floor_id = ?1", [id])?;
        tx.execute("DELETE FROM room_locations WHERE floor_id = ?1", [id])?;
        let removed = tx.execute("DELETE FROM floors WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(Error::UnknownFloor { id });
        }
        tx.commit()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Graph snapshots
    // -------------------------------------------------------------------------

    /// Read every node and edge of a floor as one consistent snapshot.
    ///
    /// An unknown floor yields an empty graph, matching how graph listings
    /// behave for floors that have not been drawn yet.
    pub fn floor_graph(&self, floor_id: FloorId) -> Result<FloorGraph> {
        let tx = self.connection.unchecked_transaction()?;
        let nodes = {
            let sql = format!(
                "SELECT {NODE_COLUMNS} FROM nodes WHERE floor_id = ?1 ORDER BY id"
            );
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map([floor_id], row_to_node)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        let edges = {
            let sql = format!(
                "SELECT {EDGE_COLUMNS} FROM edges WHERE floor_id = ?1 ORDER BY id"
            );
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map([floor_id], row_to_edge)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.finish()?;
        Ok(FloorGraph { nodes, edges })
    }

    // -------------------------------------------------------------------------
    // Room locations
    // -------------------------------------------------------------------------

    /// Resolve a room code on any floor; the lowest floor id wins if the
    /// same code is placed on several floors.
    pub fn room_location(&self, code: &str) -> Result<RoomLocation> {
        let normalized = require_room_code(code)?;
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM room_locations WHERE room_code = ?1
             ORDER BY floor_id LIMIT 1"
        );
        let found = self
            .connection
            .query_row(&sql, [&normalized], row_to_room)
            .optional()?;
        match found {
            Some(room) => Ok(room),
            None => Err(self.room_not_found(normalized)?),
        }
    }

    /// Resolve a room code, preferring `floor_id` when the code is placed on
    /// several floors and falling back to the lowest floor id otherwise.
    pub fn room_location_preferring(&self, floor_id: FloorId, code: &str) -> Result<RoomLocation> {
        let normalized = require_room_code(code)?;
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM room_locations WHERE room_code = ?1
             ORDER BY floor_id = ?2 DESC, floor_id LIMIT 1"
        );
        let found = self
            .connection
            .query_row(&sql, params![&normalized, floor_id], row_to_room)
            .optional()?;
        match found {
            Some(room) => Ok(room),
            None => Err(self.room_not_found(normalized)?),
        }
    }

    /// Resolve a room code on a specific floor.
    pub fn room_location_on_floor(&self, floor_id: FloorId, code: &str) -> Result<RoomLocation> {
        let normalized = require_room_code(code)?;
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM room_locations WHERE floor_id = ?1 AND room_code = ?2"
        );
        let found = self
            .connection
            .query_row(&sql, params![floor_id, &normalized], row_to_room)
            .optional()?;
        match found {
            Some(room) => Ok(room),
            None => Err(self.room_not_found(normalized)?),
        }
    }

    /// Room locations on a floor ordered by code.
    pub fn room_locations(&self, floor_id: FloorId) -> Result<Vec<RoomLocation>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM room_locations WHERE floor_id = ?1 ORDER BY room_code"
        );
        let mut stmt = self.connection.prepare(&sql)?;
        let rows = stmt.query_map([floor_id], row_to_room)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Every distinct room code in the store.
    pub fn room_codes(&self) -> Result<Vec<String>> {
        let sql = "SELECT DISTINCT room_code FROM room_locations ORDER BY room_code";
        let mut stmt = self.connection.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Insert a room anchor, or move it if the code already exists on the floor.
    pub fn upsert_room_location(
        &mut self,
        floor_id: FloorId,
        room: &NewRoomLocation,
    ) -> Result<RoomLocation> {
        let code = require_room_code(&room.room_code)?;
        require_finite("x", room.x)?;
        require_finite("y", room.y)?;
        self.floor(floor_id)?;

        let tx = self.connection.transaction()?;
        tx.execute(
            "INSERT INTO room_locations (floor_id, room_code, x, y) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (floor_id, room_code) DO UPDATE SET x = excluded.x, y = excluded.y",
            params![floor_id, &code, room.x, room.y],
        )?;
        tx.commit()?;
        self.room_location_on_floor(floor_id, &code)
    }

    /// Return up to `limit` known room codes that resemble `code`, best first.
    pub fn fuzzy_room_matches(&self, code: &str, limit: usize) -> Result<Vec<String>> {
        let needle = normalize_room_code(code);
        let score = |candidate: &str| strsim::normalized_levenshtein(&needle, candidate);
        let mut scored: Vec<(f64, String)> = self
            .room_codes()?
            .into_iter()
            .map(|candidate| (score(&candidate), candidate))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate)
            .collect())
    }

    fn room_not_found(&self, code: String) -> Result<Error> {
        let suggestions = self.fuzzy_room_matches(&code, 3)?;
        Ok(Error::RoomLocationNotFound { code, suggestions })
    }
}

fn validate_new_floor(floor: &NewFloor) -> Result<()> {
    if floor.key.trim().is_empty() {
        return Err(Error::invalid("key", "floor key cannot be empty"));
    }
    if floor.name.trim().is_empty() {
        return Err(Error::invalid("name", "floor name cannot be empty"));
    }
    if floor.image_url.trim().is_empty() {
        return Err(Error::invalid("imageUrl", "image url cannot be empty"));
    }
    if floor.width == 0 {
        return Err(Error::invalid("width", "must be a positive integer"));
    }
    if floor.height == 0 {
        return Err(Error::invalid("height", "must be a positive integer"));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(field, "must be a finite number"))
    }
}

fn row_to_floor(row: &Row<'_>) -> rusqlite::Result<Floor> {
    Ok(Floor {
        id: row.get(0)?,
        key: row.get(1)?,
        name: row.get(2)?,
        faculty: row.get(3)?,
        image_url: row.get(4)?,
        width: row.get(5)?,
        height: row.get(6)?,
    })
}

pub(crate) fn row_to_node(row: &Row<'_>) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get(0)?,
        floor_id: row.get(1)?,
        x: row.get(2)?,
        y: row.get(3)?,
        label: row.get(4)?,
        node_type: row.get(5)?,
    })
}

pub(crate) fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<Edge> {
    Ok(Edge {
        id: row.get(0)?,
        floor_id: row.get(1)?,
        from_node_id: row.get(2)?,
        to_node_id: row.get(3)?,
        cost: row.get(4)?,
    })
}

fn row_to_room(row: &Row<'_>) -> rusqlite::Result<RoomLocation> {
    Ok(RoomLocation {
        id: row.get(0)?,
        floor_id: row.get(1)?,
        room_code: row.get(2)?,
        x: row.get(3)?,
        y: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_floor() -> NewFloor {
        NewFloor {
            key: "GF".to_string(),
            name: "Ground".to_string(),
            faculty: Some("Engineering".to_string()),
            image_url: "/maps/gf.png".to_string(),
            width: 1200,
            height: 800,
        }
    }

    #[test]
    fn create_and_fetch_floor() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let floor = store.create_floor(&ground_floor()).unwrap();
        assert_eq!(floor.key, "GF");
        assert_eq!(store.floor(floor.id).unwrap(), floor);
        assert_eq!(store.floor_count().unwrap(), 1);
    }

    #[test]
    fn create_floor_rejects_zero_width() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let mut floor = ground_floor();
        floor.width = 0;
        let err = store.create_floor(&floor).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput { ref field, .. } if field == "width"
        ));
    }

    #[test]
    fn unknown_floor_is_not_found() {
        let store = GraphStore::open_in_memory().unwrap();
        assert!(matches!(
            store.floor(42).unwrap_err(),
            Error::UnknownFloor { id: 42 }
        ));
    }

    #[test]
    fn upsert_room_normalizes_and_moves() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let floor = store.create_floor(&ground_floor()).unwrap();
        let first = store
            .upsert_room_location(
                floor.id,
                &NewRoomLocation {
                    room_code: " 111170 ".to_string(),
                    x: 50.0,
                    y: 50.0,
                },
            )
            .unwrap();
        let moved = store
            .upsert_room_location(
                floor.id,
                &NewRoomLocation {
                    room_code: "111170".to_string(),
                    x: 60.0,
                    y: 40.0,
                },
            )
            .unwrap();

        assert_eq!(first.id, moved.id);
        assert_eq!(moved.room_code, "111170");
        assert_eq!((moved.x, moved.y), (60.0, 40.0));
        assert_eq!(store.room_locations(floor.id).unwrap().len(), 1);
    }

    #[test]
    fn room_lookup_is_case_insensitive() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let floor = store.create_floor(&ground_floor()).unwrap();
        store
            .upsert_room_location(
                floor.id,
                &NewRoomLocation {
                    room_code: "gf-lab".to_string(),
                    x: 1.0,
                    y: 2.0,
                },
            )
            .unwrap();

        let room = store.room_location("  Gf-Lab").unwrap();
        assert_eq!(room.room_code, "GF-LAB");
    }

    #[test]
    fn missing_room_suggests_close_codes() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let floor = store.create_floor(&ground_floor()).unwrap();
        store
            .upsert_room_location(
                floor.id,
                &NewRoomLocation {
                    room_code: "111170".to_string(),
                    x: 1.0,
                    y: 2.0,
                },
            )
            .unwrap();

        match store.room_location("111171").unwrap_err() {
            Error::RoomLocationNotFound { code, suggestions } => {
                assert_eq!(code, "111171");
                assert_eq!(suggestions, vec!["111170".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_floor_graph_for_new_floor() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let floor = store.create_floor(&ground_floor()).unwrap();
        let graph = store.floor_graph(floor.id).unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
