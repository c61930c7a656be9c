/*
 * Responsibility
 * - URL 構造を定義 (/, /people, /people/{person_id})
 * - Bearer が必要な範囲 (list/create) へ gate を route_layer で適用する
 * - update/delete は現状 gate を通らない (既存の外部仕様を維持)
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::api::handlers::{
    people::{create_person, delete_person, list_people, update_person},
    root::root,
};
use crate::middleware::auth::gate;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let mut people = Router::new().route("/people", get(list_people).post(create_person));

    if state.auth_enabled() {
        people = gate::apply(people);
    }

    Router::new()
        .route("/", get(root))
        .route(
            "/people/{person_id}",
            put(update_person).delete(delete_person),
        )
        .merge(people)
}
