//! Menu API handlers.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http::StatusCode;
use qrmenu_core::models::menu::{
    CreateMenu, CreateMenuCategory, CreateMenuItem, CreateMenuSubCategory, Menu, MenuCategory,
    MenuItem, MenuSubCategory, UpdateMenu, UpdateMenuCategory, UpdateMenuItem,
    UpdateMenuSubCategory,
};

use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
        .route("/{id}/categories", post(add_category))
        .route(
            "/{id}/categories/{category_id}",
            put(update_category).delete(remove_category),
        )
        .route(
            "/{id}/categories/{category_id}/subcategories",
            post(add_sub_category),
        )
        .route(
            "/{id}/categories/{category_id}/subcategories/{sub_category_id}",
            put(update_sub_category).delete(remove_sub_category),
        )
        .route(
            "/{id}/categories/{category_id}/subcategories/{sub_category_id}/items",
            post(add_item),
        )
        .route(
            "/{id}/categories/{category_id}/subcategories/{sub_category_id}/items/{item_id}",
            put(update_item).delete(remove_item),
        )
}

#[utoipa::path(
    post,
    path = "/api/menus",
    request_body = CreateMenu,
    responses(
        (status = 201, description = "Menu created", body = Menu),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenu>,
) -> ApiResult<(StatusCode, Json<Menu>)> {
    let menu = state.menus.create(payload).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    params(("id" = String, Path, description = "Menu id")),
    responses(
        (status = 200, description = "Menu returned", body = Menu),
        (status = 404, description = "No such menu", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Menu>> {
    Ok(Json(state.menus.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}",
    params(("id" = String, Path, description = "Menu id")),
    request_body = UpdateMenu,
    responses(
        (status = 200, description = "Menu updated", body = Menu),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "No such menu", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMenu>,
) -> ApiResult<Json<Menu>> {
    Ok(Json(state.menus.update(&id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    params(("id" = String, Path, description = "Menu id")),
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 404, description = "No such menu", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.menus.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/menus/{id}/categories",
    params(("id" = String, Path, description = "Menu id")),
    request_body = CreateMenuCategory,
    responses(
        (status = 201, description = "Category added", body = MenuCategory),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn add_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateMenuCategory>,
) -> ApiResult<(StatusCode, Json<MenuCategory>)> {
    let category = state.menus.add_category(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}/categories/{category_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id")),
    request_body = UpdateMenuCategory,
    responses(
        (status = 200, description = "Category updated", body = MenuCategory),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMenuCategory>,
) -> ApiResult<Json<MenuCategory>> {
    Ok(Json(
        state.menus.update_category(&id, &category_id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}/categories/{category_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category removed"),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn remove_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.menus.remove_category(&id, &category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/menus/{id}/categories/{category_id}/subcategories",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id")),
    request_body = CreateMenuSubCategory,
    responses(
        (status = 201, description = "Sub-category added", body = MenuSubCategory),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn add_sub_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(String, String)>,
    Json(payload): Json<CreateMenuSubCategory>,
) -> ApiResult<(StatusCode, Json<MenuSubCategory>)> {
    let sub_category = state
        .menus
        .add_sub_category(&id, &category_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(sub_category)))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}/categories/{category_id}/subcategories/{sub_category_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id"), ("sub_category_id" = String, Path, description = "Sub-category id")),
    request_body = UpdateMenuSubCategory,
    responses(
        (status = 200, description = "Sub-category updated", body = MenuSubCategory),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn update_sub_category(
    State(state): State<AppState>,
    Path((id, category_id, sub_category_id)): Path<(String, String, String)>,
    Json(payload): Json<UpdateMenuSubCategory>,
) -> ApiResult<Json<MenuSubCategory>> {
    Ok(Json(
        state
            .menus
            .update_sub_category(&id, &category_id, &sub_category_id, payload)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}/categories/{category_id}/subcategories/{sub_category_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id"), ("sub_category_id" = String, Path, description = "Sub-category id")),
    responses(
        (status = 204, description = "Sub-category removed"),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn remove_sub_category(
    State(state): State<AppState>,
    Path((id, category_id, sub_category_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    state
        .menus
        .remove_sub_category(&id, &category_id, &sub_category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/menus/{id}/categories/{category_id}/subcategories/{sub_category_id}/items",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id"), ("sub_category_id" = String, Path, description = "Sub-category id")),
    request_body = CreateMenuItem,
    responses(
        (status = 201, description = "Item added", body = MenuItem),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path((id, category_id, sub_category_id)): Path<(String, String, String)>,
    Json(payload): Json<CreateMenuItem>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = state
        .menus
        .add_item(&id, &category_id, &sub_category_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}/categories/{category_id}/subcategories/{sub_category_id}/items/{item_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id"), ("sub_category_id" = String, Path, description = "Sub-category id"), ("item_id" = String, Path, description = "Item id")),
    request_body = UpdateMenuItem,
    responses(
        (status = 200, description = "Item updated", body = MenuItem),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path((id, category_id, sub_category_id, item_id)): Path<(String, String, String, String)>,
    Json(payload): Json<UpdateMenuItem>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(
        state
            .menus
            .update_item(&id, &category_id, &sub_category_id, &item_id, payload)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}/categories/{category_id}/subcategories/{sub_category_id}/items/{item_id}",
    params(("id" = String, Path, description = "Menu id"), ("category_id" = String, Path, description = "Category id"), ("sub_category_id" = String, Path, description = "Sub-category id"), ("item_id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "Menu or node not found", body = ErrorBody)
    ),
    tag = "Menus"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, category_id, sub_category_id, item_id)): Path<(String, String, String, String)>,
) -> ApiResult<StatusCode> {
    state
        .menus
        .remove_item(&id, &category_id, &sub_category_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
