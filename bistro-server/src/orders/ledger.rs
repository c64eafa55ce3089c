//! Order Ledger
//!
//! Placement, admin updates, guest tracking and the paginated listing.
//!
//! Order numbers are `ORD` + the zero-padded count of existing orders plus
//! one. The count and the insert are not serialized: two concurrent
//! placements can compute the same number, in which case the unique index
//! rejects the second one with [`ErrorCode::OrderNumberConflict`]. Numbers
//! are approximately, not strictly, sequential.

use shared::models::{Order, OrderCreate, OrderPage, OrderStatus, OrderUpdate};
use shared::request::{PaginationQuery, page_count};
use sqlx::SqlitePool;

use super::items::normalize_items;
use super::money::reconcile_total;
use crate::db::repository::{RepoError, order as repo};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, non_blank,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Estimated time assigned at placement
pub const DEFAULT_ESTIMATED_TIME: &str = "20-30 minutes";

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// `ORD` followed by the sequence number, zero-padded to three digits
pub fn format_order_number(sequence: i64) -> String {
    format!("{ORDER_NUMBER_PREFIX}{sequence:03}")
}

/// Apply total reconciliation to an order read back from storage
fn reconciled(mut order: Order) -> Order {
    order.total = reconcile_total(Some(order.total), &order.items);
    order
}

fn order_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::new(ErrorCode::OrderNotFound),
        other => other.into(),
    }
}

/// Place a new order
pub async fn place(pool: &SqlitePool, payload: OrderCreate) -> AppResult<Order> {
    let (Some(customer_name), Some(email)) = (
        non_blank(payload.customer_name.as_deref()),
        non_blank(payload.email.as_deref()),
    ) else {
        return Err(AppError::validation("customerName and email are required"));
    };
    validate_required_text(&customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
    let phone = non_blank(payload.phone.as_deref());
    let delivery_address = non_blank(payload.delivery_address.as_deref());
    validate_optional_text(&phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&delivery_address, "deliveryAddress", MAX_NOTE_LEN)?;

    let items = normalize_items(payload.items.as_ref())?;
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    let total = super::money::compute_total(&items).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidOrderItem, "Order total is out of range")
    })?;

    let order_number = format_order_number(repo::count(pool).await? + 1);
    let new_order = repo::NewOrder {
        order_number: order_number.clone(),
        customer_name,
        email,
        phone,
        delivery_address,
        items,
        total,
        status: OrderStatus::default(),
        current_step: OrderStatus::default().step(),
        estimated_time: Some(DEFAULT_ESTIMATED_TIME.to_string()),
    };

    let order = repo::insert(pool, new_order).await.map_err(|e| match e {
        RepoError::Duplicate(_) => {
            tracing::warn!(order_number = %order_number, "Order number collision");
            AppError::new(ErrorCode::OrderNumberConflict).with_detail("orderNumber", order_number.clone())
        }
        other => other.into(),
    })?;

    tracing::info!(
        order_number = %order.order_number,
        items = order.items.len(),
        total = order.total,
        "Order placed"
    );
    Ok(order)
}

/// Apply an admin update
///
/// Blank `status` / `estimatedTime` count as absent. `status` and
/// `currentStep` are stored independently; a mismatch or a backwards move is
/// applied and logged.
pub async fn update(pool: &SqlitePool, order_number: &str, payload: OrderUpdate) -> AppResult<Order> {
    let status = match non_blank(payload.status.as_deref()) {
        Some(raw) => Some(
            OrderStatus::parse(&raw).ok_or_else(|| {
                AppError::new(ErrorCode::InvalidOrderStatus).with_detail("status", raw.clone())
            })?,
        ),
        None => None,
    };
    let current_step = match payload.current_step {
        Some(step) => Some(
            u8::try_from(step)
                .ok()
                .filter(|s| OrderStatus::from_step(*s).is_some())
                .ok_or_else(|| AppError::new(ErrorCode::InvalidOrderStep).with_detail("currentStep", step))?,
        ),
        None => None,
    };
    let estimated_time = non_blank(payload.estimated_time.as_deref());
    validate_optional_text(&estimated_time, "estimatedTime", MAX_SHORT_TEXT_LEN)?;

    let previous = repo::find_by_number(pool, order_number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let order = repo::update(
        pool,
        order_number,
        repo::OrderChanges {
            status,
            current_step,
            estimated_time,
        },
    )
    .await
    .map_err(order_not_found)?;

    if order.status.step() < previous.status.step() {
        tracing::warn!(
            order_number = %order_number,
            from = %previous.status,
            to = %order.status,
            "Order status moved backwards"
        );
    }
    if order.status.step() != order.current_step {
        tracing::warn!(
            order_number = %order_number,
            status = %order.status,
            current_step = order.current_step,
            "Order status and current step disagree"
        );
    }
    tracing::info!(order_number = %order_number, status = %order.status, "Order updated");

    Ok(reconciled(order))
}

/// Guest lookup: the order number and the placing email must both match
pub async fn track(pool: &SqlitePool, order_number: &str, email: Option<&str>) -> AppResult<Order> {
    let email = non_blank(email).ok_or_else(|| AppError::validation("Email query parameter required"))?;

    repo::find_by_number_and_email(pool, order_number, &email)
        .await?
        .map(reconciled)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// One page of orders in placement order
pub async fn list(pool: &SqlitePool, query: &PaginationQuery) -> AppResult<OrderPage> {
    let page = query.page();
    let limit = query.limit(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let orders = repo::list(pool, limit, query.offset(limit)).await?;
    let total = repo::count(pool).await?;

    Ok(OrderPage {
        orders: orders.into_iter().map(reconciled).collect(),
        total,
        page,
        pages: page_count(total, limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use serde_json::json;

    fn payload(items: serde_json::Value) -> OrderCreate {
        OrderCreate {
            customer_name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            phone: None,
            delivery_address: Some("1 Main St".into()),
            items: Some(items),
        }
    }

    fn pizza_and_soda() -> serde_json::Value {
        json!([
            {"name": "Pizza", "price": 12, "quantity": 2},
            {"name": "Soda", "price": 3, "quantity": 1}
        ])
    }

    #[test]
    fn test_format_order_number() {
        assert_eq!(format_order_number(1), "ORD001");
        assert_eq!(format_order_number(42), "ORD042");
        assert_eq!(format_order_number(1234), "ORD1234");
    }

    #[tokio::test]
    async fn test_place_order() {
        let pool = test_support::pool().await;
        let order = place(&pool, payload(pizza_and_soda())).await.unwrap();
        assert_eq!(order.order_number, "ORD001");
        assert_eq!(order.id, "ORD001");
        assert_eq!(order.total, 27.0);
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.current_step, 1);
        assert_eq!(order.estimated_time.as_deref(), Some(DEFAULT_ESTIMATED_TIME));

        let second = place(&pool, payload(pizza_and_soda())).await.unwrap();
        assert_eq!(second.order_number, "ORD002");
    }

    #[tokio::test]
    async fn test_place_requires_customer() {
        let pool = test_support::pool().await;
        let mut p = payload(pizza_and_soda());
        p.email = Some("  ".into());
        let err = place(&pool, p).await.unwrap_err();
        assert_eq!(err.message, "customerName and email are required");
    }

    #[tokio::test]
    async fn test_place_invalid_items_creates_nothing() {
        let pool = test_support::pool().await;
        let err = place(&pool, payload(json!([{"name": "", "price": 1, "quantity": 1}])))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);

        let err = place(&pool, payload(json!([]))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        assert_eq!(repo::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_place_rejects_out_of_range_amounts() {
        let pool = test_support::pool().await;

        let overflow = json!([{"name": "Caviar", "price": 5e28, "quantity": 2}]);
        let err = place(&pool, payload(overflow)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderItem);

        let unrepresentable = json!([{"name": "Caviar", "price": 1e30, "quantity": 1}]);
        let err = place(&pool, payload(unrepresentable)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderItem);

        assert_eq!(repo::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_place_many_large_orders() {
        let pool = test_support::pool().await;
        let items: Vec<serde_json::Value> = (0..100)
            .map(|n| json!({"name": format!("Dish {n}"), "price": 1.5, "quantity": 2}))
            .collect();

        for n in 1..=20 {
            let order = place(&pool, payload(json!(items))).await.unwrap();
            assert_eq!(order.order_number, format_order_number(n));
            assert_eq!(order.total, 300.0);
        }

        let stored = repo::find_by_number(&pool, "ORD020").await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 100);
        assert_eq!(stored.items[0].name, "Dish 0");
        assert_eq!(stored.items[99].name, "Dish 99");
    }

    #[tokio::test]
    async fn test_number_collision_is_conflict() {
        let pool = test_support::pool().await;
        place(&pool, payload(pizza_and_soda())).await.unwrap();
        // Free up the count without freeing the number
        sqlx::query("UPDATE orders SET order_number = 'ORD002'")
            .execute(&pool)
            .await
            .unwrap();
        let err = place(&pool, payload(pizza_and_soda())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNumberConflict);
        assert_eq!(repo::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_status() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();

        let updated = update(
            &pool,
            &placed.order_number,
            OrderUpdate {
                status: Some("Preparing".into()),
                current_step: Some(2),
                estimated_time: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(updated.current_step, 2);
        assert_eq!(updated.estimated_time.as_deref(), Some(DEFAULT_ESTIMATED_TIME));
    }

    #[tokio::test]
    async fn test_update_invalid_status_leaves_order_unchanged() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();

        let err = update(
            &pool,
            &placed.order_number,
            OrderUpdate {
                status: Some("Cancelled".into()),
                current_step: Some(3),
                estimated_time: Some("soon".into()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);

        let stored = repo::find_by_number(&pool, &placed.order_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, placed);
    }

    #[tokio::test]
    async fn test_update_rejects_step_out_of_range() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();
        for step in [0, 6, -1] {
            let err = update(
                &pool,
                &placed.order_number,
                OrderUpdate {
                    current_step: Some(step),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidOrderStep);
        }
    }

    #[tokio::test]
    async fn test_update_allows_independent_step_and_backwards_status() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();
        update(
            &pool,
            &placed.order_number,
            OrderUpdate {
                status: Some("Delivered".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let order = update(
            &pool,
            &placed.order_number,
            OrderUpdate {
                status: Some("Ready".into()),
                current_step: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.current_step, 5);
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let pool = test_support::pool().await;
        let err = update(&pool, "ORD404", OrderUpdate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_track_requires_matching_email() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();

        let order = track(&pool, &placed.order_number, Some("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(order, placed);

        let err = track(&pool, &placed.order_number, Some("eve@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);

        let err = track(&pool, "ORD999", Some("ada@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);

        let err = track(&pool, &placed.order_number, None).await.unwrap_err();
        assert_eq!(err.message, "Email query parameter required");
    }

    #[tokio::test]
    async fn test_read_reconciles_drifted_total() {
        let pool = test_support::pool().await;
        let placed = place(&pool, payload(pizza_and_soda())).await.unwrap();
        sqlx::query("UPDATE orders SET total = 99.0")
            .execute(&pool)
            .await
            .unwrap();
        let order = track(&pool, &placed.order_number, Some("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(order.total, 27.0);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let pool = test_support::pool().await;
        for _ in 0..3 {
            place(&pool, payload(pizza_and_soda())).await.unwrap();
        }
        let page = list(
            &pool,
            &PaginationQuery {
                page: Some(2),
                limit: Some(2),
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 2);
        assert_eq!(page.orders.len(), 1);

        let defaults = list(&pool, &PaginationQuery::default()).await.unwrap();
        assert_eq!(defaults.orders.len(), 3);
        assert_eq!(defaults.pages, 1);
    }
}
