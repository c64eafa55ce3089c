//! Order Repository
//!
//! Orders live in `orders`, their line items in `order_item` (kept in
//! placement order via `position`). Totals are returned as stored; callers
//! reconcile them against the items.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

const COLUMNS: &str = "id, order_number, customer_name, email, phone, delivery_address, total, status, current_step, estimated_time, created_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_number: String,
    customer_name: String,
    email: String,
    phone: Option<String>,
    delivery_address: Option<String>,
    total: f64,
    status: OrderStatus,
    current_step: i64,
    estimated_time: Option<String>,
    created_at: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.order_number.clone(),
            order_number: self.order_number,
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            delivery_address: self.delivery_address,
            items,
            total: self.total,
            status: self.status,
            current_step: u8::try_from(self.current_step).unwrap_or(1),
            estimated_time: self.estimated_time,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: i64,
    name: String,
    price: f64,
    quantity: i64,
}

/// Fully prepared order ready to be written
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub current_step: u8,
    pub estimated_time: Option<String>,
}

/// Admin changes; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub current_step: Option<u8>,
    pub estimated_time: Option<String>,
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Write an order and its items in one transaction
///
/// Row ids are assigned by SQLite. Only a taken order number surfaces as
/// [`RepoError::Duplicate`]; any other constraint failure is a database error.
pub async fn insert(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        "INSERT INTO orders (order_number, customer_name, email, phone, delivery_address, total, status, current_step, estimated_time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(&data.order_number)
    .bind(&data.customer_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.delivery_address)
    .bind(data.total)
    .bind(data.status)
    .bind(i64::from(data.current_step))
    .bind(&data.estimated_time)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(msg) if msg.contains("orders.order_number") => {
            RepoError::Duplicate(format!("Order number {} already taken", data.order_number))
        }
        RepoError::Duplicate(msg) => RepoError::Database(msg),
        other => other,
    })?
    .last_insert_rowid();

    for (position, item) in data.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_item (order_id, position, name, price, quantity) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(&item.name)
        .bind(item.price)
        .bind(i64::from(item.quantity))
        .execute(&mut *tx)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(msg) => RepoError::Database(msg),
            other => other,
        })?;
    }

    tx.commit().await?;

    Ok(Order {
        id: data.order_number.clone(),
        order_number: data.order_number,
        customer_name: data.customer_name,
        email: data.email,
        phone: data.phone,
        delivery_address: data.delivery_address,
        items: data.items,
        total: data.total,
        status: data.status,
        current_step: data.current_step,
        estimated_time: data.estimated_time,
        created_at: now,
    })
}

/// Line items grouped by order id, in placement order
async fn items_for(pool: &SqlitePool, ids: &[i64]) -> RepoResult<HashMap<i64, Vec<OrderItem>>> {
    let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    if ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT order_id, name, price, quantity FROM order_item WHERE order_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY order_id, position ASC");

    let rows: Vec<OrderItemRow> = qb.build_query_as().fetch_all(pool).await?;
    for row in rows {
        grouped.entry(row.order_id).or_default().push(OrderItem {
            name: row.name,
            price: row.price,
            quantity: u32::try_from(row.quantity).unwrap_or(1),
        });
    }
    Ok(grouped)
}

async fn attach_items(pool: &SqlitePool, rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut items = items_for(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let order_items = items.remove(&row.id).unwrap_or_default();
            row.into_order(order_items)
        })
        .collect())
}

pub async fn find_by_number(pool: &SqlitePool, order_number: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE order_number = ?"
    ))
    .bind(order_number)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(attach_items(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Lookup requiring both the order number and the email it was placed with
pub async fn find_by_number_and_email(
    pool: &SqlitePool,
    order_number: &str,
    email: &str,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE order_number = ?1 AND email = ?2"
    ))
    .bind(order_number)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(attach_items(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// One page of orders in placement order
pub async fn list(pool: &SqlitePool, limit: u32, offset: u64) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders ORDER BY created_at ASC, id ASC LIMIT ?1 OFFSET ?2"
    ))
    .bind(i64::from(limit))
    .bind(offset as i64)
    .fetch_all(pool)
    .await?;

    attach_items(pool, rows).await
}

pub async fn update(
    pool: &SqlitePool,
    order_number: &str,
    changes: OrderChanges,
) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE orders SET status = COALESCE(?1, status), current_step = COALESCE(?2, current_step), estimated_time = COALESCE(?3, estimated_time) WHERE order_number = ?4",
    )
    .bind(changes.status)
    .bind(changes.current_step.map(i64::from))
    .bind(&changes.estimated_time)
    .bind(order_number)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_number} not found")));
    }
    find_by_number(pool, order_number)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_number} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn new_order(number: &str, email: &str) -> NewOrder {
        NewOrder {
            order_number: number.into(),
            customer_name: "Ada".into(),
            email: email.into(),
            phone: None,
            delivery_address: Some("1 Main St".into()),
            items: vec![
                OrderItem {
                    name: "Pizza".into(),
                    price: 12.0,
                    quantity: 2,
                },
                OrderItem {
                    name: "Soda".into(),
                    price: 3.0,
                    quantity: 1,
                },
            ],
            total: 27.0,
            status: OrderStatus::Received,
            current_step: 1,
            estimated_time: Some("20-30 minutes".into()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = test_support::pool().await;
        let placed = insert(&pool, new_order("ORD001", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(placed.id, "ORD001");
        assert_eq!(count(&pool).await.unwrap(), 1);

        let found = find_by_number(&pool, "ORD001").await.unwrap().unwrap();
        assert_eq!(found, placed);
        assert_eq!(found.items[0].name, "Pizza");
        assert_eq!(found.items[1].name, "Soda");
        assert!(find_by_number(&pool, "ORD999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_number_rolls_back() {
        let pool = test_support::pool().await;
        insert(&pool, new_order("ORD001", "ada@example.com"))
            .await
            .unwrap();
        let err = insert(&pool, new_order("ORD001", "bob@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(items, 2);
    }

    #[tokio::test]
    async fn test_insert_many_items_keeps_order() {
        let pool = test_support::pool().await;
        let items: Vec<OrderItem> = (0..250)
            .map(|n| OrderItem {
                name: format!("Dish {n}"),
                price: 1.0,
                quantity: 1,
            })
            .collect();

        for n in 1..=5 {
            let mut order = new_order(&format!("ORD{n:03}"), "ada@example.com");
            order.items = items.clone();
            order.total = 250.0;
            insert(&pool, order).await.unwrap();
        }

        let found = find_by_number(&pool, "ORD005").await.unwrap().unwrap();
        assert_eq!(found.items, items);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1250);
    }

    #[tokio::test]
    async fn test_find_requires_matching_email() {
        let pool = test_support::pool().await;
        insert(&pool, new_order("ORD001", "ada@example.com"))
            .await
            .unwrap();

        assert!(
            find_by_number_and_email(&pool, "ORD001", "ada@example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            find_by_number_and_email(&pool, "ORD001", "bob@example.com")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            find_by_number_and_email(&pool, "ORD002", "ada@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_partial() {
        let pool = test_support::pool().await;
        insert(&pool, new_order("ORD001", "ada@example.com"))
            .await
            .unwrap();

        let order = update(
            &pool,
            "ORD001",
            OrderChanges {
                status: Some(OrderStatus::OutForDelivery),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.current_step, 1);
        assert_eq!(order.estimated_time.as_deref(), Some("20-30 minutes"));

        let order = update(
            &pool,
            "ORD001",
            OrderChanges {
                current_step: Some(4),
                estimated_time: Some("5 minutes".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.current_step, 4);
        assert_eq!(order.estimated_time.as_deref(), Some("5 minutes"));

        let err = update(&pool, "ORD404", OrderChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_pages() {
        let pool = test_support::pool().await;
        for n in 1..=3 {
            insert(&pool, new_order(&format!("ORD{n:03}"), "ada@example.com"))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let first = list(&pool, 2, 0).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].order_number, "ORD001");
        assert_eq!(first[0].items.len(), 2);

        let second = list(&pool, 2, 2).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].order_number, "ORD003");
    }
}
