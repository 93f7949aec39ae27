//! Classification helpers for `sqlx` errors.

/// Returns `Some(constraint)` when `e` is a unique violation.
///
/// The inner option is `None` if the driver did not report a constraint name.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<Option<String>> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().map(str::to_string))
}

/// Returns true if `e` is a foreign key violation.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Returns true if `e` means the database could not be reached at all.
pub fn is_connectivity_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}
