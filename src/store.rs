use crate::errors::AppError;
use crate::models::{CheckInRow, UserRow};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Embedded SQLite store. All uniqueness invariants (email, display name,
/// one check-in per user per day) live here as UNIQUE constraints.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrate(&conn)?;
        info!("database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn
            .lock()
            .map_err(|_| AppError::internal("database lock poisoned"))
    }

    // -- Users and directory entries --

    /// Creates the identity record and its directory entry in one transaction.
    pub fn create_user(&self, user: &UserRow) -> Result<(), AppError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO users (id, email, password, display_name) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.email, user.password, user.display_name],
        )
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::conflict("email is already registered")
            } else {
                err.into()
            }
        })?;
        tx.execute(
            "INSERT INTO profiles (user_id, display_name) VALUES (?1, ?2)",
            params![user.id, user.display_name],
        )
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::conflict("nickname is already taken")
            } else {
                err.into()
            }
        })?;
        tx.commit()?;
        Ok(())
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, email, password, display_name FROM users WHERE email = ?1",
                [email],
                map_user,
            )
            .optional()?;
        Ok(row)
    }

    pub fn user_by_id(&self, id: &str) -> Result<Option<UserRow>, AppError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, email, password, display_name FROM users WHERE id = ?1",
                [id],
                map_user,
            )
            .optional()?;
        Ok(row)
    }

    pub fn update_password(&self, user_id: &str, password_hash: &str) -> Result<(), AppError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET password = ?1 WHERE id = ?2",
            params![password_hash, user_id],
        )?;
        Ok(())
    }

    /// Identity-record half of a rename.
    pub fn update_display_name(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET display_name = ?1 WHERE id = ?2",
            params![name, user_id],
        )?;
        Ok(())
    }

    /// Who currently owns a display name in the directory, if anyone.
    pub fn directory_owner(&self, name: &str) -> Result<Option<String>, AppError> {
        let conn = self.conn()?;
        let owner = conn
            .query_row(
                "SELECT user_id FROM profiles WHERE display_name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(owner)
    }

    /// Directory-entry half of a rename.
    pub fn update_directory_entry(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE profiles SET display_name = ?1 WHERE user_id = ?2",
            params![name, user_id],
        )
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::conflict("nickname is already taken")
            } else {
                err.into()
            }
        })?;
        Ok(())
    }

    // -- Check-ins --

    /// Returns true if the row was inserted, false if the (user, date)
    /// uniqueness constraint rejected it.
    pub fn insert_check_in(&self, user_id: &str, row: &CheckInRow) -> Result<bool, AppError> {
        let conn = self.conn()?;
        match conn.execute(
            "INSERT INTO wake_up_logs (user_id, wake_date, wake_time) VALUES (?1, ?2, ?3)",
            params![user_id, row.wake_date, row.wake_time],
        ) {
            Ok(_) => Ok(true),
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// All of a user's check-ins with `first <= wake_date <= last`, oldest first.
    pub fn check_ins_between(
        &self,
        user_id: &str,
        first: &str,
        last: &str,
    ) -> Result<Vec<CheckInRow>, AppError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT wake_date, wake_time FROM wake_up_logs
             WHERE user_id = ?1 AND wake_date >= ?2 AND wake_date <= ?3
             ORDER BY wake_date ASC",
        )?;
        let rows = stmt
            .query_map(params![user_id, first, last], |row| {
                Ok(CheckInRow {
                    wake_date: row.get(0)?,
                    wake_time: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id           TEXT PRIMARY KEY,
            email        TEXT NOT NULL UNIQUE,
            password     TEXT NOT NULL,
            display_name TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS profiles (
            user_id      TEXT PRIMARY KEY REFERENCES users(id),
            display_name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS wake_up_logs (
            user_id    TEXT NOT NULL REFERENCES users(id),
            wake_date  TEXT NOT NULL,
            wake_time  TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(user_id, wake_date)
        );
        ",
    )
}

fn map_user(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        display_name: row.get(3)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
