//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `stream_status` / `stream_info` (append-only logs, newest row wins)
/// - `sponsors` (admin-managed rows)
/// - `quotes`, `repos`, `weather_days`, `news_stories`, `fear_greed_index`
///   (widget caches, replaced wholesale by refresh jobs)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Stream status / info
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS stream_status (
    id INTEGER PRIMARY KEY NOT NULL,
    is_live INTEGER NOT NULL,
    timestamp TEXT NOT NULL, -- RFC3339
    started_at TEXT NULL -- RFC3339, set while live
);

CREATE TABLE IF NOT EXISTS stream_info (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NULL,
    description TEXT NULL,
    timestamp TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Sponsors
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS sponsors (
    id INTEGER PRIMARY KEY NOT NULL,
    placement TEXT NOT NULL, -- 'card' | 'banner'
    name TEXT NOT NULL,
    logo_url TEXT NULL,
    link_url TEXT NOT NULL,
    display_text TEXT NULL,
    display_order INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    padding_class TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_sponsors_display_order ON sponsors(display_order);
CREATE INDEX IF NOT EXISTS idx_sponsors_active ON sponsors(is_active, placement);

-- ---------------------------------------------------------------------------
-- Widget caches
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS quotes (
    symbol TEXT PRIMARY KEY NOT NULL,
    price REAL NOT NULL,
    change_pct REAL NOT NULL,
    kind TEXT NOT NULL, -- 'stock' | 'crypto'
    is_highlight INTEGER NOT NULL,
    position INTEGER NOT NULL,
    updated TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_quotes_kind_highlight ON quotes(kind, is_highlight);

CREATE TABLE IF NOT EXISTS repos (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    stars TEXT NOT NULL,
    star_count INTEGER NOT NULL,
    url TEXT NOT NULL,
    updated TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_repos_star_count ON repos(star_count);

CREATE TABLE IF NOT EXISTS weather_days (
    position INTEGER PRIMARY KEY NOT NULL,
    day TEXT NOT NULL,
    temp INTEGER NOT NULL,
    condition TEXT NOT NULL,
    updated TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS news_stories (
    position INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    date TEXT NOT NULL,
    updated TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS fear_greed_index (
    id INTEGER PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    value_classification TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    time_until_update TEXT NULL,
    updated TEXT NOT NULL -- RFC3339
);
"#;
