//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the SQLite provider.

pub const CREATE_QA_DATA_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS qa_data (
        id INTEGER PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        additional_answer TEXT,
        category TEXT,
        created_at TEXT
    );
";

pub const CREATE_MEALS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY,
        date TEXT NOT NULL,
        meal_type TEXT,
        menu TEXT,
        image_url TEXT
    );
";

pub const CREATE_NOTICES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS notices (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT,
        url TEXT,
        created_at TEXT,
        tags TEXT,
        category TEXT
    );
";

pub const CREATE_MEALS_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_meals_date ON meals (date, meal_type);";

/// Every statement `initialize_schema` runs, in order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_QA_DATA_TABLE,
    CREATE_MEALS_TABLE,
    CREATE_NOTICES_TABLE,
    CREATE_MEALS_DATE_INDEX,
];

/// All records in insertion order, which is the corpus order.
pub const SELECT_QA_RECORDS: &str =
    "SELECT question, answer, additional_answer, category FROM qa_data ORDER BY id ASC;";

/// Expects the date (`?1`) and the meal type (`?2`).
pub const SELECT_MENU_BY_DATE: &str =
    "SELECT menu FROM meals WHERE date = ?1 AND meal_type = ?2 LIMIT 1;";

/// Expects the meal type (`?1`).
pub fn select_recent_menus(limit: usize) -> String {
    format!(
        "
        SELECT date, menu
        FROM meals
        WHERE meal_type = ?1
        ORDER BY date DESC
        LIMIT {limit};
    "
    )
}

pub fn select_recent_notices(limit: usize) -> String {
    format!(
        "
        SELECT title, created_at, content
        FROM notices
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}

/// Row count of one of the application tables.
pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table};")
}

/// Splits a script on `;` outside single-quoted literals and drops blank statements.
/// A doubled quote (`''`) inside a literal is an escaped quote. Comments and other quoting
/// styles are not recognized.
pub fn split_statements(script: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut in_literal = false;
    let mut start = 0;
    for (i, c) in script.char_indices() {
        match c {
            '\'' => in_literal = !in_literal,
            ';' if !in_literal => {
                statements.push(&script[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    statements.push(&script[start..]);
    statements.retain(|s| !s.trim().is_empty());
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolons_inside_literals_do_not_split() {
        let script = "INSERT INTO meals VALUES ('2024-05-10', '중식', '잡곡밥; 미역국');\n\
                      INSERT INTO notices (title) VALUES ('엄마''s 안내; 1부');;";
        let statements = split_statements(script);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].ends_with("'잡곡밥; 미역국')"));
        assert!(statements[1].trim().ends_with("'엄마''s 안내; 1부')"));
    }

    #[test]
    fn trailing_statement_without_semicolon_is_kept() {
        assert_eq!(split_statements("SELECT 1; SELECT 2"), vec!["SELECT 1", " SELECT 2"]);
        assert!(split_statements(" ; \n ").is_empty());
    }
}
