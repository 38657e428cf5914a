// UI layer: provides the interactive menu and the per-action prompts.
// Every action reloads the catalog from disk, mutates it in memory and
// saves it back; nothing is cached between actions.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::{sync_catalog, OmdbClient};
use crate::model::{search_titles, Catalog, Record};
use crate::store::CatalogStore;

static INPUT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s]+$").unwrap());

/// Returns whether free-text input contains only letters, digits and
/// whitespace. Anything else (punctuation included) is rejected.
pub fn is_valid_input(input: &str) -> bool {
    INPUT_PATTERN.is_match(input)
}

/// Main interactive menu. Reads one line per round and dispatches on an
/// exact match against "1".."7"; any other input is reported as invalid
/// and the menu is shown again. This call blocks until the user exits.
pub fn main_menu(store: CatalogStore, client: OmdbClient) -> Result<()> {
    clear_terminal();
    loop {
        print_menu();
        let choice: String = Input::new().with_prompt("Choose an option").interact_text()?;
        println!("----------------------------");
        match choice.as_str() {
            "1" => handle_add(&store)?,
            "2" => handle_remove(&store)?,
            "3" => handle_list(&store),
            "4" => handle_search(&store)?,
            "5" => handle_modify(&store)?,
            "6" => handle_sync(&store, &client)?,
            "7" => {
                println!("{}", "Leaving the program...".red());
                break;
            }
            _ => println!("{}", "Invalid option.".red()),
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("{}", "Movie Catalog".red());
    println!("----------------------------");
    println!("{}", "1. Add movie".green());
    println!("{}", "2. Remove movie".yellow());
    println!("{}", "3. List movies".blue());
    println!("{}", "4. Search movies".magenta());
    println!("{}", "5. Modify movie".cyan());
    println!("{}", "6. Sync movies from the API".blue());
    println!("{}", "7. Exit".red());
    println!("----------------------------");
}

fn clear_terminal() {
    let _ = execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    );
}

/// Prints a hint and returns true when there is nothing to operate on.
fn report_if_empty(catalog: &Catalog) -> bool {
    if catalog.is_empty() {
        println!(
            "{}",
            "There are no movies in the catalog. Add some movies first.".red()
        );
        return true;
    }
    false
}

/// Collect the fields for a new movie and insert it. A title that is
/// already present (exact match, case-sensitive) is a conflict and
/// nothing is written.
fn handle_add(store: &CatalogStore) -> Result<()> {
    clear_terminal();
    let mut catalog = store.load();

    println!("----------------------------");
    let title: String = Input::new()
        .with_prompt("Title of the movie to add")
        .interact_text()?;
    let title = title.trim().to_string();

    if catalog.contains_key(&title) {
        println!(
            "{}",
            format!("The movie '{title}' is already in the catalog.").yellow()
        );
        return Ok(());
    }

    let year: String = Input::new().with_prompt("Release year").interact_text()?;
    let imdb_id: String = Input::new().with_prompt("IMDb ID").interact_text()?;
    let kind: String = Input::new()
        .with_prompt("Type")
        .default("movie".to_string())
        .interact_text()?;
    let poster: String = Input::new()
        .with_prompt("Poster URL (leave blank for none)")
        .allow_empty(true)
        .interact_text()?;
    let poster = if poster.trim().is_empty() {
        None
    } else {
        Some(poster.trim().to_string())
    };

    match Record::new(title.clone(), year, imdb_id, kind, poster) {
        Ok(record) => {
            catalog.insert(title.clone(), record);
            store.save(&catalog)?;
            println!("{}", format!("Movie '{title}' added.").green());
        }
        Err(err) => println!("{}", format!("Could not add the movie: {err}").red()),
    }
    Ok(())
}

/// List the titles with a 1-based index and delete the selected one
/// after an explicit confirmation. Out-of-range or non-numeric input is
/// rejected with no mutation, and declining the confirmation leaves the
/// catalog untouched.
fn handle_remove(store: &CatalogStore) -> Result<()> {
    clear_terminal();
    let mut catalog = store.load();
    if report_if_empty(&catalog) {
        return Ok(());
    }

    println!("----------------------------");
    println!("Available movies:");
    let titles: Vec<String> = catalog.keys().cloned().collect();
    for (index, title) in titles.iter().enumerate() {
        println!("{}. {}", index + 1, title);
    }

    let selection: String = Input::new()
        .with_prompt("Number of the movie to remove")
        .interact_text()?;
    let title = match selection.trim().parse::<usize>() {
        Ok(number) if (1..=titles.len()).contains(&number) => &titles[number - 1],
        _ => {
            println!("{}", "Invalid selection.".red());
            return Ok(());
        }
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Remove '{title}'?"))
        .default(false)
        .interact()?;
    if confirmed {
        catalog.remove(title);
        store.save(&catalog)?;
        println!("{}", format!("Movie '{title}' removed.").red());
    }
    Ok(())
}

/// Print every record's title, year and IMDb id in catalog order.
fn handle_list(store: &CatalogStore) {
    clear_terminal();
    let catalog = store.load();
    if report_if_empty(&catalog) {
        return;
    }

    println!();
    println!("{}", "Movie list:".green());
    for (title, record) in &catalog {
        println!(
            "{} - Year: {}, IMDb ID: {}",
            title.as_str().blue(),
            record.year,
            record.imdb_id
        );
    }
}

/// Case-insensitive substring search over the titles. The search term
/// must pass the letters/digits/whitespace allow-list.
fn handle_search(store: &CatalogStore) -> Result<()> {
    clear_terminal();
    let catalog = store.load();
    if report_if_empty(&catalog) {
        return Ok(());
    }

    let term: String = Input::new()
        .with_prompt("Name or fragment to search for")
        .interact_text()?;
    let term = term.trim().to_string();
    if !is_valid_input(&term) {
        println!("{}", "Invalid input.".red());
        return Ok(());
    }

    let matches = search_titles(&catalog, &term);
    if matches.is_empty() {
        println!("{}", format!("No matches found for '{term}'.").yellow());
        return Ok(());
    }
    for (title, record) in matches {
        println!(
            "Found: {} - Year: {}, IMDb ID: {}",
            title, record.year, record.imdb_id
        );
    }
    Ok(())
}

/// Look a movie up by its exact title and update its year and IMDb id.
/// Blank input keeps the current value. The rebuilt record is validated
/// before anything is saved.
fn handle_modify(store: &CatalogStore) -> Result<()> {
    clear_terminal();
    let mut catalog = store.load();
    if report_if_empty(&catalog) {
        return Ok(());
    }

    let title: String = Input::new()
        .with_prompt("Title of the movie to modify")
        .interact_text()?;
    let title = title.trim().to_string();

    let Some(current) = catalog.get(&title).cloned() else {
        println!("{}", "Movie not found.".red());
        return Ok(());
    };

    println!("Enter the new values (leave blank to keep the current one):");
    let year: String = Input::new()
        .with_prompt(format!("Year [{}]", current.year))
        .allow_empty(true)
        .interact_text()?;
    let year = if year.trim().is_empty() {
        current.year.clone()
    } else {
        year.trim().to_string()
    };

    let imdb_id: String = Input::new()
        .with_prompt(format!("IMDb ID [{}]", current.imdb_id))
        .allow_empty(true)
        .interact_text()?;
    let imdb_id = if imdb_id.trim().is_empty() {
        current.imdb_id.clone()
    } else {
        imdb_id.trim().to_string()
    };

    // Title, type and poster stay as they were; only the record as a
    // whole is revalidated.
    match Record::new(current.title, year, imdb_id, current.kind, current.poster) {
        Ok(updated) => {
            catalog.insert(title.clone(), updated);
            store.save(&catalog)?;
            println!("{}", format!("Movie '{title}' modified.").green());
        }
        Err(err) => println!(
            "{}",
            format!("The modified movie is not valid: {err}").red()
        ),
    }
    Ok(())
}

/// Confirm, ask for a search string (defaulting to "Avatar") and run the
/// sync. A spinner is shown while the request is in flight.
fn handle_sync(store: &CatalogStore, client: &OmdbClient) -> Result<()> {
    clear_terminal();
    let catalog = store.load();

    println!("{}", "Sync movies from the API".blue());
    println!("----------------------------");
    let confirmed = Confirm::new()
        .with_prompt("Syncing overwrites matching entries with API data. Continue?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Sync cancelled.".green());
        return Ok(());
    }

    let query: String = Input::new()
        .with_prompt("Search string")
        .default("Avatar".to_string())
        .interact_text()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(format!("Syncing with the search '{query}'..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = sync_catalog(client, store, &query, catalog);
    spinner.finish_and_clear();
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::is_valid_input;

    #[test]
    fn input_allows_letters_digits_and_whitespace() {
        assert!(is_valid_input("Avatar"));
        assert!(is_valid_input("Avatar 2"));
        assert!(is_valid_input("tt0499549"));
    }

    #[test]
    fn input_rejects_punctuation_and_empty_text() {
        assert!(!is_valid_input(""));
        assert!(!is_valid_input("Avatar!"));
        assert!(!is_valid_input("50%"));
        assert!(!is_valid_input("a;b"));
        assert!(!is_valid_input("título"));
    }
}
