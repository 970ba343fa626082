use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub uuid: String,
    pub username: String,
}

/// What the listing page needs per joke, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct JokeListItem {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Joke {
    pub uuid: String,
    pub jokester_id: String,
    pub name: String,
    pub content: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything that isn't `asc` sorts descending; unknown values are not an
    /// error on this page and never were.
    pub fn parse(raw: Option<&str>) -> SortOrder {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub async fn migrate(db_pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            uuid TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            pass_salt TEXT NOT NULL,
            pass_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS jokes (
            uuid TEXT PRIMARY KEY,
            jokester_id TEXT NOT NULL REFERENCES users(uuid),
            name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jokes_jokester ON jokes(jokester_id)")
        .execute(db_pool)
        .await?;

    Ok(())
}

pub async fn all_users(db_pool: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as("SELECT uuid,username FROM users")
        .fetch_all(db_pool)
        .await
}

pub async fn find_user(db_pool: &SqlitePool, uuid: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as("SELECT uuid,username FROM users WHERE uuid=?")
        .bind(uuid)
        .fetch_optional(db_pool)
        .await
}

/// The listing read: one jokester's jokes whose name contains `search`,
/// ordered by name. `jokester_id` is taken as-is; an id that matches nobody
/// just yields an empty list.
pub async fn jokes_for(
    db_pool: &SqlitePool,
    jokester_id: &str,
    search: &str,
    order: SortOrder,
) -> sqlx::Result<Vec<JokeListItem>> {
    // only the ORDER BY direction is interpolated, and it comes from the enum
    let sql = format!(
        "SELECT uuid,name FROM jokes WHERE jokester_id=? AND name LIKE '%'||?||'%' ORDER BY name {}",
        order.as_sql()
    );

    sqlx::query_as(&sql)
        .bind(jokester_id)
        .bind(search)
        .fetch_all(db_pool)
        .await
}

pub async fn find_joke(db_pool: &SqlitePool, uuid: &str) -> sqlx::Result<Option<Joke>> {
    sqlx::query_as("SELECT uuid,jokester_id,name,content,created_at FROM jokes WHERE uuid=?")
        .bind(uuid)
        .fetch_optional(db_pool)
        .await
}

pub async fn recent_jokes(db_pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Joke>> {
    sqlx::query_as(
        "SELECT uuid,jokester_id,name,content,created_at FROM jokes ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db_pool)
    .await
}

pub async fn random_joke(db_pool: &SqlitePool) -> sqlx::Result<Option<JokeListItem>> {
    sqlx::query_as("SELECT uuid,name FROM jokes ORDER BY RANDOM() LIMIT 1")
        .fetch_optional(db_pool)
        .await
}

pub async fn insert_joke(
    db_pool: &SqlitePool,
    jokester_id: &str,
    name: &str,
    content: &str,
) -> sqlx::Result<String> {
    let uuid = Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO jokes (uuid,jokester_id,name,content,created_at) VALUES (?,?,?,?,?)")
        .bind(&uuid)
        .bind(jokester_id)
        .bind(name)
        .bind(content)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?;

    Ok(uuid)
}

/// Deletes only when `jokester_id` owns the joke; reports whether a row went.
pub async fn delete_joke(
    db_pool: &SqlitePool,
    uuid: &str,
    jokester_id: &str,
) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM jokes WHERE uuid=? AND jokester_id=?")
        .bind(uuid)
        .bind(jokester_id)
        .execute(db_pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// One connection, or every query would see its own empty `:memory:` db.
    pub(crate) async fn pool() -> SqlitePool {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&db_pool).await.unwrap();
        db_pool
    }

    pub(crate) async fn seed_user(db_pool: &SqlitePool, uuid: &str, username: &str) {
        sqlx::query(
            "INSERT INTO users (uuid,username,pass_salt,pass_hash,created_at) VALUES (?,?,'','',?)",
        )
        .bind(uuid)
        .bind(username)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await
        .unwrap();
    }

    pub(crate) async fn seed_joke(db_pool: &SqlitePool, jokester_id: &str, name: &str) -> String {
        seed_joke_at(db_pool, jokester_id, name, OffsetDateTime::now_utc()).await
    }

    pub(crate) async fn seed_joke_at(
        db_pool: &SqlitePool,
        jokester_id: &str,
        name: &str,
        created_at: OffsetDateTime,
    ) -> String {
        let uuid = Uuid::now_v7().to_string();
        sqlx::query(
            "INSERT INTO jokes (uuid,jokester_id,name,content,created_at) VALUES (?,?,?,'Why? Because.',?)",
        )
        .bind(&uuid)
        .bind(jokester_id)
        .bind(name)
        .bind(created_at)
        .execute(db_pool)
        .await
        .unwrap();
        uuid
    }
}
