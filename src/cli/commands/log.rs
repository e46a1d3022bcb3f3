use crate::cache::CacheDb;
use crate::cache::log::load_log;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let cache = CacheDb::open(&cfg.database)?;
        for (timestamp, operation, target, message) in load_log(&cache.conn)? {
            println!("{timestamp}  {operation}  {target}  {message}");
        }
    }
    Ok(())
}
