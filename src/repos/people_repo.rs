/*
 * Responsibility
 * - people テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 * - DB エラーは RepoError/AppError に変換しやすい形で返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    #[sqlx(rename = "personId")]
    pub person_id: Uuid,

    pub name: String,
    pub image: String,
    pub title: String,

    // 所有者 (identity provider の subject)。basic variant では NULL。
    pub uid: Option<String>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, uid: Option<&str>) -> Result<Vec<PersonRow>, RepoError> {
    // uid は所有者スコープ。None なら全件 (basic variant)。
    let rows = match uid {
        Some(uid) => {
            sqlx::query_as::<_, PersonRow>(
                r#"
                SELECT "personId", name, image, title, uid, "createdAt", "updatedAt"
                FROM people
                WHERE uid = $1
                ORDER BY "createdAt" DESC
                "#,
            )
            .bind(uid)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, PersonRow>(
                r#"
                SELECT "personId", name, image, title, uid, "createdAt", "updatedAt"
                FROM people
                ORDER BY "createdAt" DESC
                "#,
            )
            .fetch_all(db)
            .await?
        }
    };

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    image: &str,
    title: &str,
    uid: Option<&str>,
) -> Result<PersonRow, RepoError> {
    let row = sqlx::query_as::<_, PersonRow>(
        r#"
        INSERT INTO people (name, image, title, uid)
        VALUES ($1, $2, $3, $4)
        RETURNING "personId", name, image, title, uid, "createdAt", "updatedAt"
        "#,
    )
    .bind(name)
    .bind(image)
    .bind(title)
    .bind(uid)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    person_id: Uuid,
    name: Option<&str>,
    image: Option<&str>,
    title: Option<&str>,
) -> Result<Option<PersonRow>, RepoError> {
    // 部分更新。uid / "createdAt" は触らない。"updatedAt" はここで更新する。
    let row = sqlx::query_as::<_, PersonRow>(
        r#"
        UPDATE people
        SET
            name = COALESCE($2, name),
            image = COALESCE($3, image),
            title = COALESCE($4, title),
            "updatedAt" = now()
        WHERE "personId" = $1
        RETURNING "personId", name, image, title, uid, "createdAt", "updatedAt"
        "#,
    )
    .bind(person_id)
    .bind(name)
    .bind(image)
    .bind(title)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, person_id: Uuid) -> Result<Option<PersonRow>, RepoError> {
    // 削除した行をそのまま返す (存在しなければ None)
    let row = sqlx::query_as::<_, PersonRow>(
        r#"
        DELETE FROM people
        WHERE "personId" = $1
        RETURNING "personId", name, image, title, uid, "createdAt", "updatedAt"
        "#,
    )
    .bind(person_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
