use crate::clock;
use crate::errors::AppError;
use crate::models::CheckInRow;
use crate::store::Database;
use chrono::{DateTime, NaiveDate, Utc};

/// Result of a check-in attempt. A second attempt on the same canonical day
/// is a normal outcome, not an error.
#[derive(Debug, PartialEq)]
pub enum CheckInOutcome {
    Created(CheckInRow),
    AlreadyCheckedIn,
}

pub fn record_check_in(db: &Database, user_id: &str) -> Result<CheckInOutcome, AppError> {
    record_check_in_at(db, user_id, clock::today(), Utc::now())
}

pub fn record_check_in_at(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<CheckInOutcome, AppError> {
    let row = CheckInRow {
        wake_date: clock::date_key(date),
        wake_time: now.to_rfc3339(),
    };
    if db.insert_check_in(user_id, &row)? {
        Ok(CheckInOutcome::Created(row))
    } else {
        Ok(CheckInOutcome::AlreadyCheckedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRow;

    fn db_with_user(id: &str) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&UserRow {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password: "hash".to_string(),
            display_name: id.to_string(),
        })
        .unwrap();
        db
    }

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn second_attempt_same_day_is_already_checked_in() {
        let db = db_with_user("u1");
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let first = record_check_in_at(&db, "u1", date, instant("2024-03-01T23:50:00Z")).unwrap();
        assert!(matches!(first, CheckInOutcome::Created(_)));

        let second = record_check_in_at(&db, "u1", date, instant("2024-03-02T01:00:00Z")).unwrap();
        assert_eq!(second, CheckInOutcome::AlreadyCheckedIn);

        // Exactly one row was stored.
        let rows = db.check_ins_between("u1", "2024-03-02", "2024-03-02").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].wake_time, "2024-03-01T23:50:00+00:00");
    }

    #[test]
    fn different_days_create_separate_rows() {
        let db = db_with_user("u1");
        let day1 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        record_check_in_at(&db, "u1", day1, instant("2024-03-01T23:50:00Z")).unwrap();
        record_check_in_at(&db, "u1", day2, instant("2024-03-02T23:10:00Z")).unwrap();

        let rows = db.check_ins_between("u1", "2024-03-01", "2024-03-04").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn different_users_do_not_conflict() {
        let db = db_with_user("u1");
        db.create_user(&UserRow {
            id: "u2".to_string(),
            email: "u2@example.com".to_string(),
            password: "hash".to_string(),
            display_name: "u2".to_string(),
        })
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let now = instant("2024-03-02T00:00:00Z");
        assert!(matches!(
            record_check_in_at(&db, "u1", date, now).unwrap(),
            CheckInOutcome::Created(_)
        ));
        assert!(matches!(
            record_check_in_at(&db, "u2", date, now).unwrap(),
            CheckInOutcome::Created(_)
        ));
    }
}
