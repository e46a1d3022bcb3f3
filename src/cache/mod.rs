//! Local SQLite mirror of the administrative dataset.
//!
//! The mirror is a cache, not the source of truth: it is loaded at startup
//! and replaced wholesale whenever the dataset changes or a newer remote
//! snapshot is applied. It also carries the durable operations log.

pub mod log;

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::dataset::SyncedDataset;
use crate::dataset::snapshot::Snapshot;
use crate::errors::{AppError, AppResult};
use crate::models::{CardId, DailyHours, Employee, Group, SpecialDay, SpecialDayKind};

pub struct CacheDb {
    pub conn: Connection,
}

impl CacheDb {
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS employees (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 card_id TEXT UNIQUE NOT NULL,
                 daily_hours REAL NOT NULL,
                 group_id INTEGER
             );
             CREATE TABLE IF NOT EXISTS groups (
                 id INTEGER PRIMARY KEY,
                 name TEXT UNIQUE NOT NULL
             );
             CREATE TABLE IF NOT EXISTS special_days (
                 card_id TEXT NOT NULL,
                 date TEXT NOT NULL,
                 type TEXT NOT NULL,
                 UNIQUE(card_id, date)
             );
             CREATE TABLE IF NOT EXISTS meta (
                 key TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS log (
                 timestamp TEXT NOT NULL,
                 operation TEXT NOT NULL,
                 target TEXT NOT NULL,
                 message TEXT NOT NULL
             );",
        )?;
        Ok(())
    }

    /// Replace the whole mirror with the current dataset state.
    pub fn replace_dataset(&mut self, dataset: &SyncedDataset) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM special_days", [])?;
        tx.execute("DELETE FROM employees", [])?;
        tx.execute("DELETE FROM groups", [])?;

        for group in dataset.groups() {
            tx.execute(
                "INSERT INTO groups (id, name) VALUES (?1, ?2)",
                params![group.id, group.name],
            )?;
        }

        for emp in dataset.employees() {
            tx.execute(
                "INSERT INTO employees (id, name, card_id, daily_hours, group_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    emp.id,
                    emp.name,
                    emp.card_id.as_str(),
                    f64::from(emp.daily_hours),
                    emp.group_id,
                ],
            )?;
        }

        for sd in dataset.special_days() {
            tx.execute(
                "INSERT INTO special_days (card_id, date, type) VALUES (?1, ?2, ?3)",
                params![
                    sd.card_id.as_str(),
                    sd.date.format("%Y-%m-%d").to_string(),
                    match sd.kind {
                        SpecialDayKind::SickLeave => "sick_leave",
                        SpecialDayKind::Vacation => "vacation",
                    },
                ],
            )?;
        }

        tx.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('version', ?1)",
            params![dataset.version().to_string()],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Load the cached dataset. An empty cache loads as an empty dataset
    /// at version 0, which makes any remote snapshot look newer.
    pub fn load_dataset(&self) -> AppResult<SyncedDataset> {
        let mut groups = Vec::new();
        {
            let mut stmt = self.conn.prepare("SELECT id, name FROM groups ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            for row in rows {
                groups.push(row?);
            }
        }

        let mut employees = Vec::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, card_id, daily_hours, group_id FROM employees ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })?;
            for row in rows {
                let (id, name, card, hours, group_id) = row?;
                let card_id = CardId::parse(&card)
                    .map_err(|_| AppError::MalformedRecord(format!("cached card id {card}")))?;
                employees.push(Employee {
                    id,
                    name,
                    card_id,
                    daily_hours: DailyHours::from(hours),
                    group_id,
                });
            }
        }

        let mut special_days = Vec::new();
        {
            let mut stmt = self
                .conn
                .prepare("SELECT card_id, date, type FROM special_days ORDER BY date")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for row in rows {
                let (card, date, kind) = row?;
                let card_id = CardId::parse(&card)
                    .map_err(|_| AppError::MalformedRecord(format!("cached card id {card}")))?;
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(date.clone()))?;
                let kind = match kind.as_str() {
                    "sick_leave" => SpecialDayKind::SickLeave,
                    "vacation" => SpecialDayKind::Vacation,
                    other => {
                        return Err(AppError::MalformedRecord(format!(
                            "cached special day type {other}"
                        )));
                    }
                };
                special_days.push(SpecialDay {
                    card_id,
                    date,
                    kind,
                });
            }
        }

        let version: u64 = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
                row.get::<_, String>(0)
            })
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let snapshot = Snapshot {
            employees,
            groups,
            special_days,
            version,
            last_updated: String::new(),
        };
        Ok(SyncedDataset::from_snapshot(snapshot))
    }
}
