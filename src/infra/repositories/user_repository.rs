//! User repository backed by the stored functions of the user schema.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, IsolationLevel,
    Statement, TransactionTrait, Value,
};

use super::rows::{decode_user, UserRow};
use crate::domain::{Credentials, EmailAddress, RegistrationId, User, UserId, UserUpdate};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub(crate) const SELECT_ALL_USERS: &str =
    "SELECT user_id, email_address, password_hash, role_names, created_at FROM get_all_users()";
pub(crate) const SELECT_USER_BY_ID: &str =
    "SELECT user_id, email_address, password_hash, role_names, created_at FROM get_user_by_user_id($1)";
pub(crate) const SELECT_USER_BY_EMAIL: &str =
    "SELECT user_id, email_address, password_hash, role_names, created_at FROM get_user_by_email_address($1)";
pub(crate) const INSERT_USER: &str = "SELECT create_user($1, $2) AS user_id";
pub(crate) const UPDATE_USER: &str =
    "UPDATE users SET email_address = $1, password_hash = COALESCE($2, password_hash) WHERE user_id = $3";
pub(crate) const DELETE_USER: &str = "DELETE FROM users WHERE user_id = $1";
pub(crate) const INSERT_REGISTRATION: &str =
    "SELECT create_user_registration($1, $2) AS registration_id";
pub(crate) const CONFIRM_REGISTRATION: &str =
    "SELECT confirm_user_registration($1) AS user_id";

/// User repository trait for dependency injection.
///
/// Inputs are validated domain values; rows are decoded back into
/// [`User`] and a row that does not decode is a data integrity error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email_address: &EmailAddress) -> AppResult<Option<User>>;

    /// Hash the password and create a user with the `user` role
    async fn create(&self, credentials: &Credentials) -> AppResult<UserId>;

    /// Replace the email address and, if given, the password
    async fn update(&self, update: &UserUpdate) -> AppResult<UserId>;

    /// Delete user by ID
    async fn delete(&self, user_id: UserId) -> AppResult<UserId>;

    /// Hash the password and store a pending registration, replacing any
    /// earlier one for the same email address
    async fn register(&self, credentials: &Credentials) -> AppResult<RegistrationId>;

    /// Promote a pending registration into a user, atomically
    async fn confirm_registration(&self, registration_id: RegistrationId) -> AppResult<UserId>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn statement(sql: &str, values: impl IntoIterator<Item = Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

fn email_in_use(email_address: &EmailAddress) -> String {
    format!("Email address {email_address} is already in use")
}

fn returned_user_id(value: i64) -> AppResult<UserId> {
    UserId::new(value).map_err(|e| AppError::data_integrity(e.to_string()))
}

async fn confirm_within<C: ConnectionTrait>(
    conn: &C,
    registration_id: RegistrationId,
) -> AppResult<UserId> {
    let row = conn
        .query_one(statement(CONFIRM_REGISTRATION, [registration_id.as_uuid().into()]))
        .await
        .map_err(|e| AppError::from_db_unique(e, "Email address is already in use"))?
        .ok_or_else(|| AppError::internal("confirm_user_registration returned no row"))?;

    match row.try_get::<Option<i64>>("", "user_id")? {
        Some(user_id) => returned_user_id(user_id),
        None => Err(AppError::not_found("No such registration")),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = UserRow::find_by_statement(statement(SELECT_ALL_USERS, []))
            .all(&self.db)
            .await?;

        tracing::debug!(count = rows.len(), "Fetched users");
        rows.into_iter().map(decode_user).collect()
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        UserRow::find_by_statement(statement(SELECT_USER_BY_ID, [user_id.value().into()]))
            .one(&self.db)
            .await?
            .map(decode_user)
            .transpose()
    }

    async fn find_by_email(&self, email_address: &EmailAddress) -> AppResult<Option<User>> {
        UserRow::find_by_statement(statement(
            SELECT_USER_BY_EMAIL,
            [email_address.as_str().into()],
        ))
        .one(&self.db)
        .await?
        .map(decode_user)
        .transpose()
    }

    async fn create(&self, credentials: &Credentials) -> AppResult<UserId> {
        let password_hash = credentials.password.hash().await?;

        let row = self
            .db
            .query_one(statement(
                INSERT_USER,
                [
                    credentials.email_address.as_str().into(),
                    password_hash.as_str().into(),
                ],
            ))
            .await
            .map_err(|e| AppError::from_db_unique(e, email_in_use(&credentials.email_address)))?
            .ok_or_else(|| AppError::internal("create_user returned no row"))?;

        let user_id = returned_user_id(row.try_get::<i64>("", "user_id")?)?;
        tracing::debug!(%user_id, "Created user");
        Ok(user_id)
    }

    async fn update(&self, update: &UserUpdate) -> AppResult<UserId> {
        let password_hash = match &update.password {
            Some(password) => Some(password.hash().await?.as_str().to_string()),
            None => None,
        };

        let result = self
            .db
            .execute(statement(
                UPDATE_USER,
                [
                    update.email_address.as_str().into(),
                    password_hash.into(),
                    update.user_id.value().into(),
                ],
            ))
            .await
            .map_err(|e| AppError::from_db_unique(e, email_in_use(&update.email_address)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::no_such_resource());
        }
        Ok(update.user_id)
    }

    async fn delete(&self, user_id: UserId) -> AppResult<UserId> {
        let result = self
            .db
            .execute(statement(DELETE_USER, [user_id.value().into()]))
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::no_such_resource());
        }
        Ok(user_id)
    }

    async fn register(&self, credentials: &Credentials) -> AppResult<RegistrationId> {
        let password_hash = credentials.password.hash().await?;

        let row = self
            .db
            .query_one(statement(
                INSERT_REGISTRATION,
                [
                    credentials.email_address.as_str().into(),
                    password_hash.as_str().into(),
                ],
            ))
            .await?
            .ok_or_else(|| AppError::internal("create_user_registration returned no row"))?;

        let registration_id = row.try_get::<uuid::Uuid>("", "registration_id")?;
        Ok(RegistrationId::from_uuid(registration_id))
    }

    async fn confirm_registration(&self, registration_id: RegistrationId) -> AppResult<UserId> {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), Some(AccessMode::ReadWrite))
            .await?;

        match confirm_within(&txn, registration_id).await {
            Ok(user_id) => {
                txn.commit().await?;
                tracing::debug!(%registration_id, %user_id, "Confirmed registration");
                Ok(user_id)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    use super::*;
    use crate::domain::{Password, RoleName};

    const SAMPLE_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

    fn user_row(user_id: i64, email: &str, hash: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("user_id", Value::from(user_id)),
            ("email_address", Value::from(email)),
            ("password_hash", Value::from(hash)),
            ("role_names", Value::from("user")),
            ("created_at", Value::from(Utc::now())),
        ])
    }

    fn exec_result(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_find_all_decodes_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                user_row(1, "admin@example.com", SAMPLE_HASH),
                user_row(2, "user@example.com", SAMPLE_HASH),
            ]])
            .into_connection();

        let users = UserStore::new(db).find_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].email_address.as_str(), "user@example.com");
        assert_eq!(users[0].role_names, vec![RoleName::User]);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_data_integrity_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "admin@example.com", "plaintext")]])
            .into_connection();

        let result = UserStore::new(db).find_all().await;
        assert!(matches!(result, Err(AppError::DataIntegrity(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_without_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let user = UserStore::new(db)
            .find_by_id(UserId::new(404).unwrap())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_parameterized() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_result(1)])
            .into_connection();
        let store = UserStore::new(db);

        let deleted = store.delete(UserId::new(5).unwrap()).await.unwrap();
        assert_eq!(deleted.value(), 5);

        let UserStore { db } = store;
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                DELETE_USER,
                [5i64.into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_result(0)])
            .into_connection();

        let err = UserStore::new(db)
            .delete(UserId::new(404).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No such resource found"));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_result(0)])
            .into_connection();

        let update = UserUpdate {
            user_id: UserId::new(404).unwrap(),
            email_address: EmailAddress::parse("renamed@mail.com").unwrap(),
            password: None,
        };
        let err = UserStore::new(db).update(&update).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_stores_a_hash() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("user_id", Value::from(9i64))])]])
            .into_connection();
        let store = UserStore::new(db);

        let credentials = Credentials {
            email_address: EmailAddress::parse("new@mail.com").unwrap(),
            password: Password::parse("correct-horse-battery").unwrap(),
        };
        assert_eq!(store.create(&credentials).await.unwrap().value(), 9);

        let UserStore { db } = store;
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("new@mail.com"));
        assert!(!log.contains("correct-horse-battery"));
    }

    #[tokio::test]
    async fn test_confirm_registration_returns_new_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("user_id", Value::from(12i64))])]])
            .into_connection();

        let registration_id =
            RegistrationId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        let user_id = UserStore::new(db)
            .confirm_registration(registration_id)
            .await
            .unwrap();
        assert_eq!(user_id.value(), 12);
    }

    #[tokio::test]
    async fn test_confirm_unknown_registration_rolls_back() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("user_id", Value::BigInt(None))])]])
            .into_connection();
        let store = UserStore::new(db);

        let registration_id =
            RegistrationId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        let err = store.confirm_registration(registration_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No such registration"));

        let UserStore { db } = store;
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("confirm_user_registration"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_register_decodes_registration_id() {
        let id = uuid::Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("registration_id", Value::from(id))])]])
            .into_connection();
        let store = UserStore::new(db);

        let credentials = Credentials {
            email_address: EmailAddress::parse("pending@mail.com").unwrap(),
            password: Password::parse("correct-horse-battery").unwrap(),
        };
        let registration_id = store.register(&credentials).await.unwrap();
        assert_eq!(registration_id, RegistrationId::from_uuid(id));

        let UserStore { db } = store;
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("create_user_registration"));
        assert!(!log.contains("correct-horse-battery"));
    }

    #[tokio::test]
    async fn test_update_with_password_sends_a_hash() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_result(1)])
            .into_connection();
        let store = UserStore::new(db);

        let update = UserUpdate {
            user_id: UserId::new(3).unwrap(),
            email_address: EmailAddress::parse("renamed@mail.com").unwrap(),
            password: Some(Password::parse("correct-horse-battery").unwrap()),
        };
        assert_eq!(store.update(&update).await.unwrap().value(), 3);

        let UserStore { db } = store;
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("renamed@mail.com"));
        assert!(log.contains("$2b$10$"));
        assert!(!log.contains("correct-horse-battery"));
    }
}
