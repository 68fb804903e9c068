//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_catalog_schema",
            sql: include_str!("../../migrations/001_catalog_schema.sql"),
        },
        Migration {
            id: "002_most_common_orbits",
            sql: include_str!("../../migrations/002_most_common_orbits.sql"),
        },
        Migration {
            id: "003_provenance",
            sql: include_str!("../../migrations/003_provenance.sql"),
        },
    ]
}
