use anyhow::{Context, Result};
use rusqlite::{Connection, Row};
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_date     TEXT PRIMARY KEY,
    main_1        INTEGER NOT NULL,
    main_2        INTEGER NOT NULL,
    main_3        INTEGER NOT NULL,
    main_4        INTEGER NOT NULL,
    main_5        INTEGER NOT NULL,
    lucky_number  INTEGER NOT NULL
);
";

const COLUMNS: &str = "draw_date, main_1, main_2, main_3, main_4, main_5, lucky_number";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("loto.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

/// Insère un tirage. Retourne `false` si un tirage existe déjà pour cette date.
pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let m = draw.main_numbers;
    let changed = conn.execute(
        &format!("INSERT OR IGNORE INTO draws ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        rusqlite::params![draw.date, m[0], m[1], m[2], m[3], m[4], draw.lucky_number],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_to_draw(row: &Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        date: row.get(0)?,
        main_numbers: [
            row.get::<_, u8>(1)?,
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
        ],
        lucky_number: row.get(6)?,
    })
}

/// Historique complet en ordre chronologique (le plus ancien d'abord).
pub fn fetch_draw_history(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM draws ORDER BY draw_date ASC"
    ))?;
    let draws = stmt
        .query_map([], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()
        .context("Lecture de l'historique impossible")?;
    Ok(draws)
}

/// Les `limit` derniers tirages, le plus récent d'abord.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM draws ORDER BY draw_date DESC LIMIT ?1"
    ))?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
