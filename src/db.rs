//! Catalog store: SQLite schema and operations

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::matcher;
use crate::models::{CommercialBeer, HopSpec, MaltSpec, Style};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS malts (
            name TEXT PRIMARY KEY,
            extraction_yield_percent REAL NOT NULL,
            color_ebc REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS hops (
            name TEXT PRIMARY KEY,
            alpha_acid_percent REAL NOT NULL
        );

        -- Insertion order is kept: ties in beer matching go to the earliest row
        CREATE TABLE IF NOT EXISTS commercial_beers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brewery TEXT NOT NULL,
            style TEXT NOT NULL,
            abv REAL NOT NULL,
            flavor_notes TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_commercial_beers_name_brewery
            ON commercial_beers(name, brewery);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a malt
pub fn upsert_malt(conn: &Connection, malt: &MaltSpec) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO malts (name, extraction_yield_percent, color_ebc)
         VALUES (?1, ?2, ?3)",
        (&malt.name, malt.extraction_yield_percent, malt.color_ebc),
    )?;
    Ok(())
}

/// Insert or replace a hop
pub fn upsert_hop(conn: &Connection, hop: &HopSpec) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO hops (name, alpha_acid_percent) VALUES (?1, ?2)",
        (&hop.name, hop.alpha_acid_percent),
    )?;
    Ok(())
}

/// Insert a commercial beer, or update the row with the same name and
/// brewery. An updated row keeps its position.
pub fn upsert_commercial_beer(conn: &Connection, beer: &CommercialBeer) -> Result<()> {
    conn.execute(
        "INSERT INTO commercial_beers (name, brewery, style, abv, flavor_notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(name, brewery) DO UPDATE SET
            style = excluded.style,
            abv = excluded.abv,
            flavor_notes = excluded.flavor_notes",
        (
            &beer.name,
            &beer.brewery,
            beer.style.to_string(),
            beer.abv,
            &beer.flavor_notes,
        ),
    )?;
    Ok(())
}

/// Clear all catalog data (for re-seeding)
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM commercial_beers;
        DELETE FROM hops;
        DELETE FROM malts;
        "#,
    )?;
    Ok(())
}

/// List all malts in the database
pub fn list_malts(conn: &Connection) -> Result<Vec<MaltSpec>> {
    let mut stmt = conn.prepare("SELECT name, extraction_yield_percent, color_ebc FROM malts ORDER BY name")?;

    let rows = stmt.query_map([], |row| {
        Ok(MaltSpec {
            name: row.get(0)?,
            extraction_yield_percent: row.get(1)?,
            color_ebc: row.get(2)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List all hops in the database
pub fn list_hops(conn: &Connection) -> Result<Vec<HopSpec>> {
    let mut stmt = conn.prepare("SELECT name, alpha_acid_percent FROM hops ORDER BY name")?;

    let rows = stmt.query_map([], |row| {
        Ok(HopSpec {
            name: row.get(0)?,
            alpha_acid_percent: row.get(1)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List commercial beers in insertion order
pub fn list_commercial_beers(conn: &Connection) -> Result<Vec<CommercialBeer>> {
    let mut stmt = conn.prepare(
        "SELECT name, brewery, style, abv, flavor_notes FROM commercial_beers ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let (name, brewery, style, abv, flavor_notes) = row?;
        let style: Style = style
            .parse()
            .with_context(|| format!("Unknown style '{}' for beer '{}'", style, name))?;
        results.push(CommercialBeer {
            name,
            brewery,
            style,
            abv,
            flavor_notes,
        });
    }
    Ok(results)
}

/// Load the ingredient catalog stored in the database
pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    Ok(Catalog::new(list_malts(conn)?, list_hops(conn)?))
}

/// Built-in catalog with the stored malts and hops layered on top
pub fn load_merged_catalog(conn: &Connection) -> Result<Catalog> {
    Ok(Catalog::builtin().merged_with(load_catalog(conn)?))
}

/// Built-in commercial beers with the stored ones layered on top
pub fn load_merged_beers(conn: &Connection) -> Result<Vec<CommercialBeer>> {
    Ok(matcher::merge_beers(matcher::builtin_beers(), list_commercial_beers(conn)?))
}
