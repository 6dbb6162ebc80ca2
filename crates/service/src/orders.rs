//! Application service driving the order lifecycle.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{MemberId, OrderId};
use domain::{Address, Money, Order, OrderItem, Pay, PayMethod, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::repository::{MemberRepository, OrderRepository, ProductRepository};

/// A requested order line: which product, and how many units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLine {
    /// Creates an order line.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Application service for the order lifecycle.
///
/// Every operation loads the aggregates it needs from the repositories,
/// delegates the decision to the domain, and saves back only when the
/// operation succeeded. A rejected operation therefore persists nothing,
/// which is what keeps multi-step flows (reservation across lines, the
/// cancellation cascade) atomic from a caller's point of view.
pub struct OrderService<M, P, O>
where
    M: MemberRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    members: M,
    products: P,
    orders: O,
}

impl<M, P, O> OrderService<M, P, O>
where
    M: MemberRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    /// Creates a new order service over the given repositories.
    pub fn new(members: M, products: P, orders: O) -> Self {
        Self {
            members,
            products,
            orders,
        }
    }

    /// Places an order for a member.
    ///
    /// Looks up the member and every referenced product, reserves stock per
    /// line, and persists the decremented products together with the new
    /// order. If any line fails (unknown product, insufficient stock),
    /// nothing is persisted.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, member_id: MemberId, lines: Vec<OrderLine>) -> Result<Order> {
        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or(ServiceError::MemberNotFound(member_id))?;

        // Load each product once so multiple lines against the same product
        // reserve from a consistent snapshot.
        let mut products: HashMap<ProductId, Product> = HashMap::new();
        for line in &lines {
            if !products.contains_key(&line.product_id) {
                let product = self
                    .products
                    .find_by_id(&line.product_id)
                    .await?
                    .ok_or_else(|| ServiceError::ProductNotFound(line.product_id.clone()))?;
                products.insert(line.product_id.clone(), product);
            }
        }

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = products
                .get_mut(&line.product_id)
                .ok_or_else(|| ServiceError::ProductNotFound(line.product_id.clone()))?;
            items.push(OrderItem::create(product, line.quantity)?);
        }

        let order = Order::create(&member, items)?;

        for product in products.into_values() {
            self.products.save(product).await?;
        }
        self.orders.save(order.clone()).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), %member_id, "order created");
        Ok(order)
    }

    /// Processes a payment for an order and confirms it.
    #[tracing::instrument(skip(self))]
    pub async fn process_payment(
        &self,
        order_id: OrderId,
        method: PayMethod,
        amount: Money,
    ) -> Result<Order> {
        let mut order = self.load_order(order_id).await?;
        order.process_payment(Pay::new(method, amount))?;
        self.orders.save(order.clone()).await?;

        metrics::counter!("payments_processed_total").increment(1);
        tracing::info!(%order_id, "payment confirmed");
        Ok(order)
    }

    /// Prepares the delivery for an order.
    ///
    /// When `ship_addr` is `None`, the member's address on file is used.
    #[tracing::instrument(skip(self))]
    pub async fn prepare_delivery(
        &self,
        order_id: OrderId,
        ship_addr: Option<Address>,
    ) -> Result<Order> {
        let mut order = self.load_order(order_id).await?;
        let member = self
            .members
            .find_by_id(order.member_id())
            .await?
            .ok_or(ServiceError::MemberNotFound(order.member_id()))?;

        order.prepare_delivery(&member, ship_addr)?;
        self.orders.save(order.clone()).await?;

        tracing::info!(%order_id, "delivery prepared");
        Ok(order)
    }

    /// Starts the delivery of an order.
    #[tracing::instrument(skip(self))]
    pub async fn start_delivery(
        &self,
        order_id: OrderId,
        tracking_no: String,
        shipped_at: Option<DateTime<Utc>>,
    ) -> Result<Order> {
        let mut order = self.load_order(order_id).await?;
        order.start_delivery(tracking_no, shipped_at)?;
        self.orders.save(order.clone()).await?;

        tracing::info!(%order_id, "delivery started");
        Ok(order)
    }

    /// Completes the delivery of an order.
    #[tracing::instrument(skip(self))]
    pub async fn complete_delivery(
        &self,
        order_id: OrderId,
        arrived_at: Option<DateTime<Utc>>,
    ) -> Result<Order> {
        let mut order = self.load_order(order_id).await?;
        order.complete_delivery(arrived_at)?;
        self.orders.save(order.clone()).await?;

        tracing::info!(%order_id, "delivery completed");
        Ok(order)
    }

    /// Cancels an order.
    ///
    /// The cascade cancels the bound payment and delivery and restores the
    /// reserved stock of every line item. Products and the canceled order
    /// are saved together after the whole cascade succeeded.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.load_order(order_id).await?;

        let mut catalog: HashMap<ProductId, Product> = HashMap::new();
        for item in order.items() {
            if !catalog.contains_key(item.product_id()) {
                match self.products.find_by_id(item.product_id()).await? {
                    Some(product) => {
                        catalog.insert(item.product_id().clone(), product);
                    }
                    None => {
                        tracing::warn!(
                            %order_id,
                            product_id = %item.product_id(),
                            "product no longer in catalog, skipping stock restore"
                        );
                    }
                }
            }
        }

        order.cancel(&mut catalog)?;

        for product in catalog.into_values() {
            self.products.save(product).await?;
        }
        self.orders.save(order.clone()).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(%order_id, "order cancelled");
        Ok(order)
    }

    /// Loads an order by ID.
    ///
    /// Returns `None` if the order doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.orders.find_by_id(order_id).await
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))
    }
}
