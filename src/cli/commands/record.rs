use std::path::Path;

use crate::cache::log::oplog;
use crate::cli::commands::AdminCtx;
use crate::cli::parser::RecordCmd;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::archive_events;
use crate::models::{CardId, EventKind};
use crate::ui::messages;
use crate::utils::date::{parse_date, resolve_period};
use crate::utils::time::parse_time_or_err;

pub fn handle(cmd: &RecordCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        RecordCmd::Add {
            card,
            date,
            time,
            kind,
        } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let date = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let time = parse_time_or_err(time)?;
            let kind = parse_kind(kind)?;

            ctx.event_store()
                .append_event(&card_id, date.and_time(time), kind)?;
            oplog(
                &ctx.cache.conn,
                "record-add",
                card_id.as_str(),
                &format!("{date} {time} {kind:?}"),
            )?;

            messages::success(format!("Recorded {kind:?} at {time} on {date} for {card_id}"));
            Ok(())
        }

        RecordCmd::Del {
            card,
            date,
            time,
            kind,
        } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let date = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let time = parse_time_or_err(time)?;
            let kind = parse_kind(kind)?;

            let removed = ctx
                .event_store()
                .delete_event(&card_id, date.and_time(time), kind)?;
            oplog(
                &ctx.cache.conn,
                "record-del",
                card_id.as_str(),
                &format!("{date} {time} {kind:?} ({removed} removed)"),
            )?;

            if removed == 0 {
                messages::warning("No matching record found; nothing deleted");
            } else {
                messages::success(format!("{removed} record(s) deleted"));
            }
            Ok(())
        }

        RecordCmd::List { card, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;

            let mut events: Vec<_> = ctx
                .event_store()
                .read_range(start, end)
                .into_iter()
                .filter(|ev| ev.card_id == card_id)
                .collect();
            events.sort_by_key(|ev| ev.timestamp);

            for ev in &events {
                println!("{}  {}", ev.timestamp_str(), ev.kind.as_label());
            }
            println!("{} record(s)", events.len());
            Ok(())
        }

        RecordCmd::Purge { card, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;

            let removed = ctx.event_store().delete_all_for_card(&card_id, start, end)?;
            oplog(
                &ctx.cache.conn,
                "record-purge",
                card_id.as_str(),
                &format!("{start}..{end} ({removed} removed)"),
            )?;

            messages::success(format!(
                "Removed {removed} record(s) for {card_id} between {start} and {end}"
            ));
            Ok(())
        }

        RecordCmd::Archive { card, period, out } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;

            let worker_name = ctx
                .dataset
                .employee_by_card(&card_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| card_id.to_string());

            let events: Vec<_> = ctx
                .event_store()
                .read_range(start, end)
                .into_iter()
                .filter(|ev| ev.card_id == card_id)
                .collect();

            let path = archive_events(Path::new(out), &worker_name, &events, start, end)?;
            messages::success(format!(
                "Archived {} record(s) to {}",
                events.len(),
                path.display()
            ));
            Ok(())
        }
    }
}

fn parse_kind(kind: &str) -> AppResult<EventKind> {
    EventKind::from_cli(kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown event kind '{kind}'")))
}
