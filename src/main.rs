// Entrypoint for the CLI application.
// - Keeps `main` small: load the configuration, create the store and the
//   API client and hand them to the UI loop.
// - Returns `anyhow::Result` to simplify error handling.

use filmoteca_cli::{api::OmdbClient, config::AppConfig, store::CatalogStore, ui::main_menu};

fn main() -> anyhow::Result<()> {
    // Configuration comes from the environment (and a local `.env` file
    // if present). See `config::AppConfig::from_env`.
    let config = AppConfig::from_env()?;

    let client = OmdbClient::new(&config)?;
    let store = CatalogStore::new(&config.catalog_path);

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(store, client)?;
    Ok(())
}
