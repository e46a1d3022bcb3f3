use crate::cli::commands::AdminCtx;
use crate::cli::parser::GroupCmd;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &GroupCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        GroupCmd::Add { name } => {
            let mut ctx = AdminCtx::open(cfg)?;
            ctx.dataset.add_group(name)?;
            ctx.commit("group-add", name)?;
            messages::success(format!("Group '{name}' added"));
            Ok(())
        }

        GroupCmd::Del { name } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let id = ctx.resolve_group(name)?;
            ctx.dataset.remove_group(id)?;
            ctx.commit("group-del", name)?;
            messages::success(format!("Group '{name}' removed; members were kept"));
            Ok(())
        }

        GroupCmd::List => {
            let ctx = AdminCtx::open(cfg)?;

            let mut table = Table::new(vec![Column::new("Group", 24), Column::new("Members", 8)]);
            for group in ctx.dataset.groups() {
                let members = ctx
                    .dataset
                    .employees()
                    .iter()
                    .filter(|e| e.group_id == Some(group.id))
                    .count();
                table.add_row(vec![group.name.clone(), members.to_string()]);
            }

            print!("{}", table.render());
            Ok(())
        }
    }
}
