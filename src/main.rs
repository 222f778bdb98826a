//! Start-up entry point: validates configuration and prepares the database.

use std::env;
use std::error::Error;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ideas_platform::db::establish_connection_pool;
use ideas_platform::domain::multilingual::MultilingualSchema;
use ideas_platform::models::config::ServerConfig;
use ideas_platform::repository::{DieselRepository, IdeaListQuery, IdeaReader};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = env::var("APP_CONFIG").unwrap_or_else(|_| "config/settings.yaml".into());
    let config = ServerConfig::load(&config_path).map_err(|e| {
        log::error!("Failed to load configuration from {config_path}: {e}");
        e
    })?;

    let languages = config.language_settings().map_err(|e| {
        log::error!("Invalid language configuration: {e}");
        e
    })?;
    let schema = MultilingualSchema::new(&languages).map_err(|e| {
        log::error!("Language configuration does not match the category columns: {e}");
        e
    })?;
    let themes = config.article_themes().map_err(|e| {
        log::error!("Invalid magazine themes: {e}");
        e
    })?;
    log::info!(
        "Languages: default `{}`, supported {:?}; {} magazine themes",
        schema.settings().default_language(),
        schema
            .settings()
            .supported()
            .iter()
            .map(|code| code.as_str())
            .collect::<Vec<_>>(),
        themes.choices().len()
    );
    log::info!(
        "Category title columns: {}",
        MultilingualSchema::field_names("title").join(", ")
    );

    let pool = establish_connection_pool(&config.database_url).map_err(|e| {
        log::error!("Failed to open database {}: {e}", config.database_url);
        e
    })?;

    let applied = {
        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS)?.len()
    };
    log::info!("Applied {applied} pending migrations to {}", config.database_url);

    let repo = DieselRepository::new(pool);
    let (ideas, _) = repo.list_ideas(IdeaListQuery::default().paginate(1, 1))?;
    log::info!("Database ready with {ideas} ideas");

    Ok(())
}
