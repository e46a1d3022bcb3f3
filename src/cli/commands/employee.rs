use crate::cli::commands::AdminCtx;
use crate::cli::parser::EmployeeCmd;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::write_roster;
use crate::models::{CardId, DailyHours};
use crate::ui::messages;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &EmployeeCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        EmployeeCmd::Add {
            name,
            card,
            hours,
            flexible,
            group,
        } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let daily_hours = resolve_hours(*hours, *flexible)?;
            let group_id = match group {
                Some(name) => Some(ctx.resolve_group(name)?),
                None => None,
            };

            ctx.dataset
                .add_employee(name, card_id.clone(), daily_hours, group_id)?;
            let result = ctx.commit("employee-add", card_id.as_str());
            update_roster(&ctx);
            result?;

            messages::success(format!("Employee {name} added with card {card_id}"));
            Ok(())
        }

        EmployeeCmd::Del { card } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;

            let removed = ctx.dataset.remove_employee(&card_id)?;
            let result = ctx.commit("employee-del", card_id.as_str());
            update_roster(&ctx);
            result?;

            messages::success(format!("Employee {} removed", removed.name));
            Ok(())
        }

        EmployeeCmd::List => {
            let ctx = AdminCtx::open(cfg)?;

            let mut table = Table::new(vec![
                Column::new("Name", 24),
                Column::new("Card id", 16),
                Column::new("Daily hours", 12),
                Column::new("Group", 16),
            ]);

            let mut employees: Vec<_> = ctx.dataset.employees().to_vec();
            employees.sort_by(|a, b| a.name.cmp(&b.name));

            for emp in &employees {
                table.add_row(vec![
                    emp.name.clone(),
                    emp.card_id.to_string(),
                    emp.daily_hours.to_string(),
                    ctx.dataset
                        .group_name(emp.group_id)
                        .unwrap_or("-")
                        .to_string(),
                ]);
            }

            print!("{}", table.render());
            println!("{} employee(s), dataset version {}", employees.len(), ctx.dataset.version());
            Ok(())
        }

        EmployeeCmd::SetHours {
            card,
            hours,
            flexible,
        } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let daily_hours = resolve_hours(*hours, *flexible)?;

            ctx.dataset.set_daily_hours(&card_id, daily_hours)?;
            ctx.commit("employee-set-hours", card_id.as_str())?;

            messages::success(format!("Daily hours for {card_id} set to {daily_hours}"));
            Ok(())
        }

        EmployeeCmd::SetGroup { card, group } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let card_id = CardId::parse(card)?;
            let group_id = match group {
                Some(name) => Some(ctx.resolve_group(name)?),
                None => None,
            };

            ctx.dataset.set_group(&card_id, group_id)?;
            ctx.commit("employee-set-group", card_id.as_str())?;

            match group {
                Some(name) => messages::success(format!("{card_id} assigned to group {name}")),
                None => messages::success(format!("{card_id} removed from its group")),
            }
            Ok(())
        }

        EmployeeCmd::ChangeCard { old_card, new_card } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let old = CardId::parse(old_card)?;
            let new = CardId::parse(new_card)?;

            ctx.dataset.change_card_id(&old, new.clone())?;
            let result = ctx.commit("employee-change-card", old.as_str());
            update_roster(&ctx);

            // Propagate into the day-files, best-effort file by file.
            let updated = ctx.event_store().replace_card_id(&old, &new)?;
            messages::success(format!(
                "Card id changed from {old} to {new}; {updated} day-file(s) updated"
            ));

            result?;
            Ok(())
        }
    }
}

fn resolve_hours(hours: Option<f64>, flexible: bool) -> AppResult<DailyHours> {
    match (hours, flexible) {
        (Some(h), false) if h > 0.0 => Ok(DailyHours::Fixed(h)),
        (Some(h), false) => Err(AppError::InvalidDailyHours(h.to_string())),
        (None, true) => Ok(DailyHours::Flexible),
        (None, false) => Err(AppError::Validation(
            "Specify either --hours or --flexible".into(),
        )),
        (Some(_), true) => Err(AppError::Validation(
            "--hours and --flexible are mutually exclusive".into(),
        )),
    }
}

/// Roster rewrite is best-effort: the dataset change already happened, a
/// share hiccup here only delays the reader-facing file.
fn update_roster(ctx: &AdminCtx) {
    if let Err(e) = write_roster(ctx.share.as_ref(), ctx.dataset.employees()) {
        messages::warning(format!("Could not rewrite the worker roster: {e}"));
    }
}
