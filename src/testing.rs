//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::practitioner::PractitionerInput;
use crate::store::SqliteStore;

const SCHEMA: &str = "
    CREATE TABLE headquarter (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );
    CREATE TABLE practitioners (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        city_of_birth TEXT NOT NULL,
        age INTEGER NOT NULL,
        weight REAL NOT NULL,
        height REAL NOT NULL,
        rank_id INTEGER NOT NULL,
        grade_id INTEGER NOT NULL
    );
    INSERT INTO headquarter (name) VALUES ('HQ1'), ('HQ2');
";

/// In-memory store with both tables and headquarters `HQ1` (id 1) and `HQ2` (id 2).
pub async fn memory_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();
    store.execute_batch(SCHEMA).await.unwrap();
    Arc::new(store)
}

pub fn sample_input(first_name: &str) -> PractitionerInput {
    PractitionerInput {
        first_name: first_name.to_string(),
        last_name: "Kano".to_string(),
        birth_date: "1990-04-12".to_string(),
        city_of_birth: "Lyon".to_string(),
        age: 34,
        weight: 61.5,
        height: 1.68,
        rank_id: 2,
        grade_id: 5,
    }
}
