/*
 * Responsibility
 * - /people 系 CRUD handler
 * - AuthCtx (あれば) を所有者スコープとして repo に渡す
 * - repo のエラーは AppError 経由で一律 400 に変換する
 */
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    api::{
        dto::people::{CreatePersonRequest, PersonResponse, UpdatePersonRequest},
        extractors::AuthCtx,
    },
    error::AppError,
    repos::people_repo,
    state::AppState,
};

fn row_to_response(row: people_repo::PersonRow) -> PersonResponse {
    PersonResponse {
        id: row.person_id,
        name: row.name,
        image: row.image,
        title: row.title,
        uid: row.uid,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub async fn list_people(
    State(state): State<AppState>,
    ctx: Option<AuthCtx>,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    let rows = people_repo::list(&state.db, ctx.as_ref().map(|c| c.uid.as_str())).await?;

    let res = rows.into_iter().map(row_to_response).collect();

    Ok(Json(res))
}

pub async fn create_person(
    State(state): State<AppState>,
    ctx: Option<AuthCtx>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<Json<PersonResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    // uid は body からは受け取らない。AuthCtx だけが所有者を決める。
    let uid = ctx.as_ref().map(|c| c.uid.as_str());

    let row = people_repo::create(&state.db, &req.name, &req.image, &req.title, uid).await?;

    // 既存クライアント互換: create は 201 ではなく 200
    Ok(Json(row_to_response(row)))
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<Option<PersonResponse>>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION", msg))?;

    let row = people_repo::update(
        &state.db,
        person_id,
        req.name.as_deref(),
        req.image.as_deref(),
        req.title.as_deref(),
    )
    .await?;

    // 見つからない場合はエラーではなく null
    Ok(Json(row.map(row_to_response)))
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> Result<Json<Option<PersonResponse>>, AppError> {
    let row = people_repo::delete(&state.db, person_id).await?;

    // 2 回目の delete は null を返すだけでエラーにはしない
    Ok(Json(row.map(row_to_response)))
}
