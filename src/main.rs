use anyhow::Result;

use link_cleaner::cli::CommandLineArgs;
use link_cleaner::config::Config;
use link_cleaner::db::{Db, TOTAL_PARAMS_REMOVED};
use link_cleaner::{logging, session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logging(&config.app_env);

    let args = CommandLineArgs::parse_args();

    let database_url = args
        .database
        .clone()
        .unwrap_or_else(|| config.database_url.clone());
    let db = Db::new(&database_url).await?;

    if args.stats {
        let total = db.get_counter(TOTAL_PARAMS_REMOVED).await?;
        println!("Total tracking parameters removed: {}", total);
        return Ok(());
    }

    if !args.urls.is_empty() {
        return session::clean_batch(&db, &args.urls, args.json).await;
    }

    session::run_session(db).await
}
