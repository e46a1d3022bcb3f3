use crate::calc::{compute_range, period_totals};
use crate::cli::commands::AdminCtx;
use crate::cli::parser::CalcCmd;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{CardId, DailyHours, DailySummary, Employee};
use crate::ui::messages;
use crate::utils::colors::colorize_status;
use crate::utils::date::resolve_period;
use crate::utils::format_hours;
use crate::utils::formatting::format_optional_time;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &CalcCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        CalcCmd::Hours { card, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let (employee, summaries) = summaries_for(&ctx, card, period)?;

            print_day_table(&summaries);
            let totals = period_totals(&summaries, employee.daily_hours);
            println!(
                "Total: {} h over {} day(s)",
                format_hours(totals.total_hours),
                totals.days
            );
            Ok(())
        }

        CalcCmd::Overtime { card, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let (employee, summaries) = summaries_for(&ctx, card, period)?;

            if employee.daily_hours.is_flexible() {
                messages::warning("Employee has a flexible schedule; overtime is not computed");
                return Ok(());
            }

            print_day_table(&summaries);
            let totals = period_totals(&summaries, employee.daily_hours);
            println!(
                "Overtime: {} h over {} day(s)",
                format_hours(totals.overtime_hours),
                totals.overtime_days
            );
            Ok(())
        }

        CalcCmd::Shortage { card, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let (employee, summaries) = summaries_for(&ctx, card, period)?;

            if employee.daily_hours.is_flexible() {
                messages::warning("Employee has a flexible schedule; shortfall is not computed");
                return Ok(());
            }

            print_day_table(&summaries);
            let totals = period_totals(&summaries, employee.daily_hours);
            println!(
                "Shortfall: {} h over {} day(s)",
                format_hours(totals.shortfall_hours),
                totals.shortfall_days
            );
            Ok(())
        }

        CalcCmd::Group { group, period } => {
            let ctx = AdminCtx::open(cfg)?;
            let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;

            let members: Vec<Employee> = match group {
                Some(name) => {
                    let id = ctx.resolve_group(name)?;
                    ctx.dataset
                        .employees()
                        .iter()
                        .filter(|e| e.group_id == Some(id))
                        .cloned()
                        .collect()
                }
                None => ctx.dataset.employees().to_vec(),
            };

            if members.is_empty() {
                messages::warning("No employees to report on");
                return Ok(());
            }

            let events = ctx.event_store().read_range(start, end);

            let mut table = Table::new(vec![
                Column::new("Name", 24),
                Column::new("Days", 5),
                Column::new("Hours", 8),
                Column::new("Over", 8),
                Column::new("Short", 8),
                Column::new("Sick", 5),
                Column::new("Vac", 5),
                Column::new("Net", 8),
            ]);

            let mut sorted = members;
            sorted.sort_by(|a, b| a.name.cmp(&b.name));

            for emp in &sorted {
                let summaries = compute_range(
                    &emp.card_id,
                    emp.daily_hours,
                    &events,
                    ctx.dataset.special_days(),
                    start,
                    end,
                );
                let totals = period_totals(&summaries, emp.daily_hours);

                let (over, short, net) = match emp.daily_hours {
                    DailyHours::Fixed(_) => (
                        format_hours(totals.overtime_hours),
                        format_hours(totals.shortfall_hours),
                        format_hours(totals.net_hours()),
                    ),
                    DailyHours::Flexible => ("-".into(), "-".into(), "-".into()),
                };

                table.add_row(vec![
                    emp.name.clone(),
                    totals.days.to_string(),
                    format_hours(totals.total_hours),
                    over,
                    short,
                    totals.sick_leave_days.to_string(),
                    totals.vacation_days.to_string(),
                    net,
                ]);
            }

            print!("{}", table.render());
            Ok(())
        }
    }
}

fn summaries_for(
    ctx: &AdminCtx,
    card: &str,
    period: &str,
) -> AppResult<(Employee, Vec<DailySummary>)> {
    let card_id = CardId::parse(card)?;
    let employee = ctx
        .dataset
        .employee_by_card(&card_id)
        .cloned()
        .ok_or_else(|| AppError::UnknownCardId(card_id.to_string()))?;

    let (start, end) = resolve_period(period).map_err(AppError::InvalidDate)?;
    let events = ctx.event_store().read_range(start, end);
    let summaries = compute_range(
        &card_id,
        employee.daily_hours,
        &events,
        ctx.dataset.special_days(),
        start,
        end,
    );

    Ok((employee, summaries))
}

fn print_day_table(summaries: &[DailySummary]) {
    let mut table = Table::new(vec![
        Column::new("Date", 12),
        Column::new("Arrival", 10),
        Column::new("Departure", 10),
        Column::new("Hours", 8),
        Column::new("Status", 24),
    ]);

    for day in summaries {
        table.add_row(vec![
            day.date.to_string(),
            format_optional_time(day.first_arrival),
            format_optional_time(day.last_departure),
            format_hours(day.hours_worked),
            colorize_status(&day.status),
        ]);
    }

    print!("{}", table.render());
}
