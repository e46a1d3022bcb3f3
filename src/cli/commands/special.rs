use crate::cli::commands::AdminCtx;
use crate::cli::parser::SpecialCmd;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{CardId, SpecialDayKind};
use crate::ui::messages;
use crate::utils::date::{days_between, resolve_period};

pub fn handle(cmd: &SpecialCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        SpecialCmd::Set { card, kind, period } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let kind = SpecialDayKind::from_cli(kind)
                .ok_or_else(|| AppError::Validation(format!("Unknown special-day kind '{kind}'")))?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;
            let dates = days_between(start, end);

            ctx.dataset.set_special_days(&card_id, &dates, kind)?;
            ctx.commit("special-set", card_id.as_str())?;

            messages::success(format!(
                "{} day(s) marked as {kind} for {card_id}",
                dates.len()
            ));
            Ok(())
        }

        SpecialCmd::Clear { card, period } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;
            let dates = days_between(start, end);

            let removed = ctx.dataset.clear_special_days(&card_id, &dates)?;
            if removed > 0 {
                ctx.commit("special-clear", card_id.as_str())?;
            }

            messages::success(format!("{removed} special day(s) cleared for {card_id}"));
            Ok(())
        }

        SpecialCmd::List { card } => {
            let ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;

            let mut days = ctx.dataset.special_days_for(&card_id);
            days.sort_by_key(|sd| sd.date);

            for sd in &days {
                println!("{}  {}", sd.date, sd.kind);
            }
            println!("{} special day(s)", days.len());
            Ok(())
        }
    }
}
