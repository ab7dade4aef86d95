pub(super) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS courses (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    fee         REAL NOT NULL,
    duration    TEXT NOT NULL,
    level       TEXT NOT NULL,
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id              TEXT PRIMARY KEY,
    student_id      TEXT NOT NULL COLLATE NOCASE UNIQUE,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL,
    phone           TEXT NOT NULL DEFAULT '',
    course_id       TEXT NOT NULL REFERENCES courses(id),
    fees_paid       REAL NOT NULL DEFAULT 0,
    status          TEXT NOT NULL,
    enrollment_date TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS leads (
    id                   TEXT PRIMARY KEY,
    name                 TEXT NOT NULL,
    email                TEXT NOT NULL,
    phone                TEXT NOT NULL DEFAULT '',
    interested_course_id TEXT REFERENCES courses(id) ON DELETE SET NULL,
    source               TEXT NOT NULL,
    status               TEXT NOT NULL,
    notes                TEXT,
    created_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS admins (
    id            TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    admin_id   TEXT NOT NULL REFERENCES admins(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lead_imports (
    md5         TEXT PRIMARY KEY,
    rows        INTEGER NOT NULL,
    imported_at TEXT NOT NULL
);
";
