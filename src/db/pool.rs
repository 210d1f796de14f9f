//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! One pool per process, passed by reference into every core function: the
//! store handle is injected, never global.

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }
}
