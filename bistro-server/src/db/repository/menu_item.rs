//! Menu Item Repository
//!
//! Items live in `menu_item`; reviews in `menu_review` and are attached on
//! read together with the computed rating aggregates.

use super::{RepoError, RepoResult, from_json_list, to_json_list};
use shared::models::{
    MenuCategory, MenuItem, Review, ReviewDetail, Reviewer, SpiceLevel,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

const COLUMNS: &str = "id, name, price, description, category, subcategory, image, ingredients, spice_level, dietary, preparation_time, created_at";

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    price: f64,
    description: Option<String>,
    category: MenuCategory,
    subcategory: Option<String>,
    image: Option<String>,
    ingredients: String,
    spice_level: SpiceLevel,
    dietary: String,
    preparation_time: Option<String>,
    created_at: i64,
}

impl MenuItemRow {
    fn into_item(self, reviews: Vec<Review>) -> MenuItem {
        let mut item = MenuItem {
            id: self.id,
            name: self.name,
            price: self.price,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            image: self.image,
            ingredients: from_json_list(&self.ingredients),
            spice_level: self.spice_level,
            dietary: from_json_list(&self.dietary),
            preparation_time: self.preparation_time,
            reviews,
            review_count: 0,
            average_rating: None,
            created_at: self.created_at,
        };
        item.compute_rating();
        item
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    menu_item_id: i64,
    #[sqlx(flatten)]
    review: Review,
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewDetailRow {
    id: i64,
    user_id: i64,
    reviewer_email: Option<String>,
    rating: i64,
    comment: Option<String>,
    created_at: i64,
}

/// Validated data for a new menu item
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub spice_level: SpiceLevel,
    pub dietary: Vec<String>,
    pub preparation_time: Option<String>,
}

/// Validated partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<MenuCategory>,
    pub subcategory: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub spice_level: Option<SpiceLevel>,
    pub dietary: Option<Vec<String>>,
    pub preparation_time: Option<String>,
}

/// Listing filters, all optional and combined with AND
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    pub category: Option<MenuCategory>,
}

/// Folded form of a name; SQLite's `lower()` only maps ASCII
fn name_key(name: &str) -> String {
    name.to_lowercase()
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &MenuFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
        qb.push(" AND instr(name_key, ").push_bind(name_key(name)).push(") > 0");
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
}

/// Number of items matching the filter
pub async fn count(pool: &SqlitePool, filter: &MenuFilter) -> RepoResult<i64> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM menu_item");
    push_filter(&mut qb, filter);
    let total: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(total)
}

/// One page of matching items (creation order), reviews attached
pub async fn list(
    pool: &SqlitePool,
    filter: &MenuFilter,
    limit: u32,
    offset: u64,
) -> RepoResult<Vec<MenuItem>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM menu_item"));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at ASC, id ASC LIMIT ")
        .push_bind(i64::from(limit))
        .push(" OFFSET ")
        .push_bind(offset as i64);

    let rows: Vec<MenuItemRow> = qb.build_query_as().fetch_all(pool).await?;
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut reviews = reviews_for(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let item_reviews = reviews.remove(&row.id).unwrap_or_default();
            row.into_item(item_reviews)
        })
        .collect())
}

/// Reviews grouped by item, oldest first
async fn reviews_for(pool: &SqlitePool, ids: &[i64]) -> RepoResult<HashMap<i64, Vec<Review>>> {
    let mut grouped: HashMap<i64, Vec<Review>> = HashMap::new();
    if ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT menu_item_id, id, user_id, rating, comment, created_at FROM menu_review WHERE menu_item_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY created_at ASC, id ASC");

    let rows: Vec<ReviewRow> = qb.build_query_as().fetch_all(pool).await?;
    for row in rows {
        grouped.entry(row.menu_item_id).or_default().push(row.review);
    }
    Ok(grouped)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItemRow>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let reviews = reviews_for(pool, &[id]).await?.remove(&id).unwrap_or_default();
            Ok(Some(row.into_item(reviews)))
        }
        None => Ok(None),
    }
}

async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: NewMenuItem) -> RepoResult<MenuItem> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO menu_item (id, name, name_key, price, description, category, subcategory, image, ingredients, spice_level, dietary, preparation_time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(name_key(&data.name))
    .bind(data.price)
    .bind(&data.description)
    .bind(data.category)
    .bind(&data.subcategory)
    .bind(&data.image)
    .bind(to_json_list(&data.ingredients))
    .bind(data.spice_level)
    .bind(to_json_list(&data.dietary))
    .bind(&data.preparation_time)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemPatch) -> RepoResult<MenuItem> {
    let ingredients = data.ingredients.as_deref().map(to_json_list);
    let dietary = data.dietary.as_deref().map(to_json_list);
    let key = data.name.as_deref().map(name_key);

    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), name_key = COALESCE(?12, name_key), price = COALESCE(?2, price), description = COALESCE(?3, description), category = COALESCE(?4, category), subcategory = COALESCE(?5, subcategory), image = COALESCE(?6, image), ingredients = COALESCE(?7, ingredients), spice_level = COALESCE(?8, spice_level), dietary = COALESCE(?9, dietary), preparation_time = COALESCE(?10, preparation_time) WHERE id = ?11",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.description)
    .bind(data.category)
    .bind(&data.subcategory)
    .bind(&data.image)
    .bind(ingredients)
    .bind(data.spice_level)
    .bind(dietary)
    .bind(&data.preparation_time)
    .bind(id)
    .bind(key)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete an item and (via cascade) its reviews
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}

/// Append a review; aggregates are computed on read
pub async fn add_review(
    pool: &SqlitePool,
    item_id: i64,
    user_id: i64,
    rating: i64,
    comment: Option<String>,
) -> RepoResult<Review> {
    if !exists(pool, item_id).await? {
        return Err(RepoError::NotFound(format!("Menu item {item_id} not found")));
    }

    let review = Review {
        id: shared::util::snowflake_id(),
        user: user_id,
        rating,
        comment,
        created_at: shared::util::now_millis(),
    };

    sqlx::query(
        "INSERT INTO menu_review (id, menu_item_id, user_id, rating, comment, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(review.id)
    .bind(item_id)
    .bind(review.user)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.created_at)
    .execute(pool)
    .await?;

    Ok(review)
}

/// Reviews of one item with the reviewer resolved to `{id, email}`
pub async fn list_reviews(pool: &SqlitePool, item_id: i64) -> RepoResult<Vec<ReviewDetail>> {
    if !exists(pool, item_id).await? {
        return Err(RepoError::NotFound(format!("Menu item {item_id} not found")));
    }

    let rows = sqlx::query_as::<_, ReviewDetailRow>(
        "SELECT r.id, r.user_id, u.email AS reviewer_email, r.rating, r.comment, r.created_at FROM menu_review r LEFT JOIN users u ON u.id = r.user_id WHERE r.menu_item_id = ? ORDER BY r.created_at ASC, r.id ASC",
    )
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ReviewDetail {
            id: row.id,
            user: row.reviewer_email.map(|email| Reviewer {
                id: row.user_id,
                email,
            }),
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        })
        .collect())
}
