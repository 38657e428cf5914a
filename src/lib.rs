// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive catalog
// manager.
//
// Module responsibilities:
// - `config`: Environment-sourced settings (OMDb endpoint, API key and
//   catalog file path), loaded once at startup.
// - `model`: The validated movie record, the in-memory catalog and the
//   pure operations over it (validate, search, merge).
// - `store`: Loads and saves the catalog as a single JSON file.
// - `api`: Blocking HTTP client for the OMDb search endpoint and the
//   sync operation that merges results into the catalog.
// - `ui`: Implements the terminal menu and delegates to the modules
//   above.
//
// Keeping this separation makes it possible to test the catalog logic
// without simulating terminal input.
pub mod api;
pub mod config;
pub mod model;
pub mod store;
pub mod ui;
