//! Menu API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{
    MenuCategory, MenuItem, MenuItemCreate, MenuItemEnvelope, MenuItemUpdate, MenuPage,
    MenuQuery, MessageResponse, ReviewCreate, ReviewDetail, SpiceLevel,
};
use shared::request::page_count;

use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, menu_item};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, non_blank,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, Json, Path, Query};

/// Default page size for the public listing
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Upper bound for `limit`
pub const MAX_PAGE_SIZE: u32 = 500;

/// Category filter/value; `all` only means "no filter" on the listing
fn parse_category(raw: &str) -> AppResult<MenuCategory> {
    MenuCategory::parse(raw).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidCategory).with_detail("category", raw.to_string())
    })
}

fn parse_spice_level(raw: &str) -> AppResult<SpiceLevel> {
    SpiceLevel::parse(raw).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidSpiceLevel).with_detail("spiceLevel", raw.to_string())
    })
}

fn check_price(price: f64) -> AppResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price));
    }
    Ok(price)
}

fn check_free_text(
    description: &Option<String>,
    subcategory: &Option<String>,
    image: &Option<String>,
    preparation_time: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(subcategory, "subcategory", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    validate_optional_text(preparation_time, "preparationTime", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

fn item_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
}

fn map_missing(id: i64) -> impl FnOnce(RepoError) -> AppError {
    move |e| match e {
        RepoError::NotFound(_) => item_not_found(id),
        other => other.into(),
    }
}

/// GET /api/menu - filtered, paginated listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<MenuPage>> {
    let category = match non_blank(query.category.as_deref()) {
        None => None,
        Some(raw) if raw == "all" => None,
        Some(raw) => Some(parse_category(&raw)?),
    };
    let filter = menu_item::MenuFilter {
        name: non_blank(query.name.as_deref()),
        max_price: query.max_price,
        category,
    };

    let paging = query.pagination();
    let page = paging.page();
    let limit = paging.limit(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let total = menu_item::count(state.pool(), &filter).await?;
    let items = menu_item::list(state.pool(), &filter, limit, paging.offset(limit)).await?;

    Ok(Json(MenuPage {
        items,
        total,
        page,
        pages: page_count(total, limit),
    }))
}

/// POST /api/menu - create an item (admin)
pub async fn create(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItemEnvelope>)> {
    let name = non_blank(payload.name.as_deref())
        .ok_or_else(|| AppError::invalid_format("Name required"))?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    let price = check_price(
        payload
            .price
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemInvalidPrice))?,
    )?;
    let category = match non_blank(payload.category.as_deref()) {
        Some(raw) => parse_category(&raw)?,
        None => return Err(AppError::new(ErrorCode::InvalidCategory)),
    };
    let spice_level = match non_blank(payload.spice_level.as_deref()) {
        Some(raw) => parse_spice_level(&raw)?,
        None => SpiceLevel::default(),
    };
    check_free_text(
        &payload.description,
        &payload.subcategory,
        &payload.image,
        &payload.preparation_time,
    )?;

    let item = menu_item::create(
        state.pool(),
        menu_item::NewMenuItem {
            name,
            price,
            description: payload.description,
            category,
            subcategory: payload.subcategory,
            image: payload.image,
            ingredients: payload.ingredients.unwrap_or_default(),
            spice_level,
            dietary: payload.dietary.unwrap_or_default(),
            preparation_time: payload.preparation_time,
        },
    )
    .await?;

    tracing::info!(item_id = item.id, admin_id = admin.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(MenuItemEnvelope { item })))
}

/// PUT /api/menu/{id} - partial update (admin)
pub async fn update(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let name = match payload.name.as_deref() {
        Some(raw) => {
            let name = non_blank(Some(raw)).ok_or_else(|| AppError::invalid_format("Name required"))?;
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            Some(name)
        }
        None => None,
    };
    let price = payload.price.map(check_price).transpose()?;
    let category = payload.category.as_deref().map(parse_category).transpose()?;
    let spice_level = payload
        .spice_level
        .as_deref()
        .map(parse_spice_level)
        .transpose()?;
    check_free_text(
        &payload.description,
        &payload.subcategory,
        &payload.image,
        &payload.preparation_time,
    )?;

    let item = menu_item::update(
        state.pool(),
        id,
        menu_item::MenuItemPatch {
            name,
            price,
            description: payload.description,
            category,
            subcategory: payload.subcategory,
            image: payload.image,
            ingredients: payload.ingredients,
            spice_level,
            dietary: payload.dietary,
            preparation_time: payload.preparation_time,
        },
    )
    .await
    .map_err(map_missing(id))?;

    tracing::info!(item_id = id, admin_id = admin.id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu/{id} - remove an item and its reviews (admin)
pub async fn delete(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    menu_item::delete(state.pool(), id)
        .await
        .map_err(map_missing(id))?;

    tracing::info!(item_id = id, admin_id = admin.id, "Menu item deleted");
    Ok(Json(MessageResponse::new("Menu item deleted successfully")))
}

/// POST /api/menu/{id}/reviews - append a review (authenticated)
pub async fn add_review(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let rating = match payload.rating {
        Some(r) if r.fract() == 0.0 && (1.0..=5.0).contains(&r) => r as i64,
        other => {
            let err = AppError::new(ErrorCode::InvalidRating);
            return Err(match other {
                Some(r) => err.with_detail("rating", r),
                None => err,
            });
        }
    };
    let comment = non_blank(payload.comment.as_deref());
    validate_optional_text(&comment, "comment", MAX_NOTE_LEN)?;

    menu_item::add_review(state.pool(), id, user.id, rating, comment)
        .await
        .map_err(map_missing(id))?;

    tracing::info!(item_id = id, user_id = user.id, rating, "Review added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Review added successfully")),
    ))
}

/// GET /api/menu/{id}/reviews - reviews with reviewer resolved
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ReviewDetail>>> {
    let reviews = menu_item::list_reviews(state.pool(), id)
        .await
        .map_err(map_missing(id))?;
    Ok(Json(reviews))
}
