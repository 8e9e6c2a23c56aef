use crate::auth;
use crate::errors::AppError;
use crate::store::Database;

const MIN_PASSWORD_CHARS: usize = 6;

/// Display names allow letters (CJK included) and digits, nothing else.
pub fn validate_display_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::validation("nickname must not be empty"));
    }
    if !name.chars().all(char::is_alphanumeric) {
        return Err(AppError::validation(
            "nickname may only contain letters and digits",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::validation(
            "password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Renames a user. The identity record and the directory entry are updated
/// one after the other without a transaction; a failure between the two
/// leaves them inconsistent. This mirrors the original two-store flow and is
/// a documented limitation.
pub fn rename_display_name(db: &Database, user_id: &str, new_name: &str) -> Result<(), AppError> {
    validate_display_name(new_name)?;
    if let Some(owner) = db.directory_owner(new_name)? {
        if owner != user_id {
            return Err(AppError::conflict("nickname is already taken"));
        }
    }
    db.update_display_name(user_id, new_name)?;
    db.update_directory_entry(user_id, new_name)?;
    Ok(())
}

pub fn reset_credential(db: &Database, user_id: &str, new_password: &str) -> Result<(), AppError> {
    validate_password(new_password)?;
    let hash = auth::hash_password(new_password)?;
    db.update_password(user_id, &hash)?;
    Ok(())
}
