use filmoteca_cli::model::{search_titles, Catalog, Record};
use filmoteca_cli::store::CatalogStore;
use tempfile::TempDir;

fn record(title: &str, year: &str, imdb_id: &str) -> Record {
    Record::new(
        title.to_string(),
        year.to_string(),
        imdb_id.to_string(),
        "movie".to_string(),
        None,
    )
    .expect("valid record")
}

#[test]
fn catalog_survives_a_save_and_a_reload() {
    let dir = TempDir::new().expect("temp dir");
    let store = CatalogStore::new(dir.path().join("data").join("catalog.json"));

    let mut catalog = Catalog::new();
    catalog.insert("Avatar".to_string(), record("Avatar", "2009", "tt0499549"));
    catalog.insert(
        "Avengers".to_string(),
        record("Avengers", "2012", "tt0848228"),
    );
    catalog.insert(
        "Inception".to_string(),
        record("Inception", "2010", "tt1375666"),
    );
    store.save(&catalog).expect("save catalog");

    let reloaded = store.load();
    assert_eq!(reloaded, catalog);

    let matches = search_titles(&reloaded, "AV");
    let titles: Vec<&str> = matches.iter().map(|(title, _)| *title).collect();
    assert_eq!(titles, vec!["Avatar", "Avengers"]);
}

#[test]
fn loading_a_mixed_file_keeps_only_the_valid_entries() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "Avatar": {"Title": "Avatar", "Year": "2009", "imdbID": "tt0499549", "Type": "movie", "Poster": null},
            "Broken": {"Title": "Broken", "Year": 1999, "imdbID": "tt0000001", "Type": "movie", "Poster": null},
            "Nameless": {"Year": "2005", "imdbID": "tt0000002", "Type": "movie"}
        }"#,
    )
    .expect("write fixture");

    let store = CatalogStore::new(path);
    let catalog = store.load();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains_key("Avatar"));
}
