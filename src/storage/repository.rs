use async_trait::async_trait;
use tracing::instrument;

use super::database::Database;
use crate::error::{Result, UserqlError};
use crate::model::{NewUser, User, UserId};

const USER_COLUMNS: &str = r#"id, "firstName", "lastName", age, email"#;

/// Data access for [`User`] records.
///
/// Every operation may fail with a persistence error; callers decide whether
/// to surface or swallow it.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a single user. Absence is `Ok(None)`, not an error.
    async fn find_one(&self, id: UserId) -> Result<Option<User>>;

    /// All users, in whatever order the engine returns them.
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Insert a new user and return it with its generated id.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Write every field of `user` back to its row.
    async fn save(&self, user: &User) -> Result<User>;

    /// Hard-delete the row backing `user`.
    async fn remove(&self, user: &User) -> Result<()>;
}

pub struct SqlUserRepository {
    db: Database,
}

impl SqlUserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    #[instrument(skip(self))]
    async fn find_one(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user""#);
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(self.db.pool())
            .await?;
        Ok(users)
    }

    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let sql = format!(
            r#"INSERT INTO "user" ("firstName", "lastName", age, email)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_COLUMNS}"#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(new_user.first_name)
            .bind(new_user.last_name)
            .bind(new_user.age)
            .bind(new_user.email)
            .fetch_one(self.db.pool())
            .await?;
        tracing::info!(id = user.id, "Created user");
        Ok(user)
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn save(&self, user: &User) -> Result<User> {
        let result = sqlx::query(
            r#"UPDATE "user"
               SET "firstName" = $1, "lastName" = $2, age = $3, email = $4
               WHERE id = $5"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(&user.email)
        .bind(user.id)
        .execute(self.db.pool())
        .await?;

        // The row was removed between load and save.
        if result.rows_affected() == 0 {
            return Err(UserqlError::NotFound(user.id.to_string()));
        }
        tracing::info!("Saved user");
        Ok(user.clone())
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn remove(&self, user: &User) -> Result<()> {
        sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(user.id)
            .execute(self.db.pool())
            .await?;
        tracing::info!("Removed user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;

    async fn setup_test_repo() -> SqlUserRepository {
        let db = Database::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap();
        SqlUserRepository::new(db)
    }

    #[tokio::test]
    async fn test_create_assigns_novel_ids() {
        let repo = setup_test_repo().await;

        let first = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();
        let second = repo
            .create(NewUser::new("C", "D", 40, "c@d.com"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.first_name, "A");
        assert_eq!(first.last_name, "B");
        assert_eq!(first.age, 30);
        assert_eq!(first.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_find_one_missing_is_none() {
        let repo = setup_test_repo().await;
        assert_eq!(repo.find_one(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_one_and_find_all() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();

        let found = repo.find_one(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_save_writes_all_fields() {
        let repo = setup_test_repo().await;
        let mut user = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();

        user.age = 31;
        user.email = "new@b.com".to_string();
        repo.save(&user).await.unwrap();

        let reloaded = repo.find_one(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded, user);
    }

    #[tokio::test]
    async fn test_save_vanished_row_is_not_found() {
        let repo = setup_test_repo().await;
        let user = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();
        repo.remove(&user).await.unwrap();

        let result = repo.save(&user).await;
        assert!(matches!(result, Err(UserqlError::NotFound(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_deletes_only_target() {
        let repo = setup_test_repo().await;
        let keep = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();
        let gone = repo
            .create(NewUser::new("C", "D", 40, "c@d.com"))
            .await
            .unwrap();

        repo.remove(&gone).await.unwrap();

        assert_eq!(repo.find_one(gone.id).await.unwrap(), None);
        assert_eq!(repo.find_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_remove() {
        let repo = setup_test_repo().await;
        let first = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();
        repo.remove(&first).await.unwrap();

        let second = repo
            .create(NewUser::new("A", "B", 30, "a@b.com"))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }
}
