use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            println!("share_path:         {}", cfg.share_path);
            println!("remote_address:     {}", cfg.remote_address);
            println!("share_name:         {}", cfg.share_name);
            println!("username:           {}", cfg.username);
            println!("database:           {}", cfg.database);
            println!("backup_dir:         {}", cfg.backup_dir);
            println!("poll_interval_secs: {}", cfg.poll_interval_secs);
        }

        if *check {
            cfg.check()?;
            messages::success("Configuration looks good");
        }
    }
    Ok(())
}
