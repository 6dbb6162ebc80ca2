//! Order aggregate root.

use chrono::{DateTime, Utc};
use common::{MemberId, OrderId};
use serde::{Deserialize, Serialize};

use crate::member::Member;
use crate::product::StockLedger;
use crate::value_objects::{Address, Money};

use super::{
    Delivery, DiscountPolicy, OrderAmount, OrderError, OrderItem, OrderStatus, Pay,
};

/// Order aggregate root.
///
/// Owns the line items, the payment, and the delivery, and gates every
/// lifecycle change on its own status transition graph. The member is
/// referenced by ID; the persistence layer joins the full graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    member_id: MemberId,
    status: OrderStatus,
    ordered_at: DateTime<Utc>,
    amount: OrderAmount,
    ship_addr: Option<Address>,
    pay: Option<Pay>,
    delivery: Option<Delivery>,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates an order for `member` from at least one line item.
    ///
    /// Sums the item totals into the order amount, attaches every item to
    /// the new order, and starts the lifecycle at `Ordered`.
    pub fn create(member: &Member, items: Vec<OrderItem>) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyOrderItems);
        }

        let original = items
            .iter()
            .map(OrderItem::total_amount)
            .fold(Money::zero(), |acc, total| acc + total);
        let amount = OrderAmount::new(original)?;

        let id = OrderId::new();
        let mut items = items;
        for item in &mut items {
            item.attach(id);
        }

        Ok(Self {
            id,
            member_id: member.id(),
            status: OrderStatus::Ordered,
            ordered_at: Utc::now(),
            amount,
            ship_addr: None,
            pay: None,
            delivery: None,
            items,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn ordered_at(&self) -> DateTime<Utc> {
        self.ordered_at
    }

    pub fn amount(&self) -> &OrderAmount {
        &self.amount
    }

    pub fn ship_addr(&self) -> Option<&Address> {
        self.ship_addr.as_ref()
    }

    pub fn pay(&self) -> Option<&Pay> {
        self.pay.as_ref()
    }

    pub fn delivery(&self) -> Option<&Delivery> {
        self.delivery.as_ref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Binds `pay` to the order, validates its amount against the final
    /// amount, and confirms the order.
    ///
    /// The payment is bound permanently even when amount validation fails:
    /// in that case the bound payment ends up `Failed`, the mismatch error
    /// propagates, and the order status is left unchanged.
    pub fn process_payment(&mut self, mut pay: Pay) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::Confirmed)?;
        if self.pay.is_some() {
            return Err(OrderError::PayAlreadyBound { order_id: self.id });
        }

        pay.bind(self.id);
        let order_id = self.id;
        let expected = self.amount.final_amount();
        self.pay.insert(pay).complete(order_id, expected)?;

        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Prepares the delivery, resolving the shipping address from the
    /// explicit argument or the member's address on file.
    pub fn prepare_delivery(
        &mut self,
        member: &Member,
        ship_addr: Option<Address>,
    ) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::ShipReady)?;

        let addr = ship_addr
            .or_else(|| member.address().cloned())
            .ok_or(OrderError::AddressRequired)?;

        self.delivery = Some(Delivery::ready(self.id, addr.clone()));
        self.ship_addr = Some(addr);
        self.status = OrderStatus::ShipReady;
        Ok(())
    }

    /// Starts the bound delivery and moves the order to `Shipping`.
    pub fn start_delivery(
        &mut self,
        tracking_no: impl Into<String>,
        shipped_at: Option<DateTime<Utc>>,
    ) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::Shipping)?;

        let order_id = self.id;
        self.delivery
            .as_mut()
            .ok_or(OrderError::DeliveryMissing { order_id })?
            .start(tracking_no, shipped_at)?;

        self.status = OrderStatus::Shipping;
        Ok(())
    }

    /// Completes the bound delivery and moves the order to `Completed`.
    pub fn complete_delivery(
        &mut self,
        arrived_at: Option<DateTime<Utc>>,
    ) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::Completed)?;

        let order_id = self.id;
        self.delivery
            .as_mut()
            .ok_or(OrderError::DeliveryMissing { order_id })?
            .complete(arrived_at)?;

        self.status = OrderStatus::Completed;
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Cancellation cascades: the bound payment is canceled first, then the
    /// bound delivery, then every item's quantity is returned to the stock
    /// ledger, and only then does the order status flip. A sub-entity that
    /// refuses its own cancellation fails the whole operation before any
    /// stock is restored.
    pub fn cancel(&mut self, ledger: &mut dyn StockLedger) -> Result<(), OrderError> {
        self.ensure_transition(OrderStatus::Canceled)?;

        if let Some(pay) = self.pay.as_mut() {
            pay.cancel()?;
        }
        if let Some(delivery) = self.delivery.as_mut() {
            delivery.cancel()?;
        }

        for item in &self.items {
            ledger.restore(item.product_id(), item.quantity());
        }

        self.status = OrderStatus::Canceled;
        Ok(())
    }

    /// Applies a discount policy to the order amount.
    ///
    /// Standalone capability: the payment flow does not call this, but the
    /// single-application rule of the amount still holds.
    pub fn apply_discount(
        &mut self,
        member: &Member,
        policy: &dyn DiscountPolicy,
        extra_discount: Option<Money>,
    ) -> Result<(), OrderError> {
        self.amount.apply_discount(member, policy, extra_discount)
    }

    fn ensure_transition(&self, target: OrderStatus) -> Result<(), OrderError> {
        if self.status.allows(target) {
            return Ok(());
        }
        Err(OrderError::InvalidOrderTransition {
            order_id: self.id,
            from: self.status,
            to: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Grade;
    use crate::order::{PayMethod, PayStatus};
    use crate::product::{Product, ProductId};
    use std::collections::HashMap;

    fn member() -> Member {
        Member::new("Kim", Grade::Gold).unwrap()
    }

    fn address() -> Address {
        Address::new("04524", "Seoul", "Jung-gu", "100 Sejong-daero", None).unwrap()
    }

    fn order_with_items() -> (Order, HashMap<crate::product::ProductId, Product>) {
        let mut p1 = Product::register("SKU-001", "Widget", Money::new(50_000), 50).unwrap();
        let mut p2 = Product::register("SKU-002", "Gadget", Money::new(20_000), 20).unwrap();

        let item1 = OrderItem::create(&mut p1, 30).unwrap();
        let item2 = OrderItem::create(&mut p2, 10).unwrap();

        let mut catalog = HashMap::new();
        catalog.insert(p1.id().clone(), p1);
        catalog.insert(p2.id().clone(), p2);

        let order = Order::create(&member(), vec![item1, item2]).unwrap();
        (order, catalog)
    }

    #[test]
    fn test_create_sums_item_totals() {
        let (order, catalog) = order_with_items();

        assert_eq!(order.status(), OrderStatus::Ordered);
        assert_eq!(order.amount().original_amount().amount(), 1_700_000);
        assert_eq!(order.amount().final_amount().amount(), 1_700_000);
        assert_eq!(order.items().len(), 2);
        assert!(order.items().iter().all(|i| i.order_id() == Some(order.id())));

        // stock was reserved at item creation
        let p1 = &catalog[&ProductId::new("SKU-001")];
        let p2 = &catalog[&ProductId::new("SKU-002")];
        assert_eq!(p1.stock_quantity(), 20);
        assert_eq!(p2.stock_quantity(), 10);
    }

    #[test]
    fn test_create_rejects_empty_items() {
        let result = Order::create(&member(), vec![]);
        assert!(matches!(result, Err(OrderError::EmptyOrderItems)));
    }

    #[test]
    fn test_process_payment_confirms_order() {
        let (mut order, _) = order_with_items();
        let pay = Pay::new(PayMethod::Card, Money::new(1_700_000));

        order.process_payment(pay).unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        let bound = order.pay().unwrap();
        assert_eq!(bound.status(), PayStatus::Paid);
        assert_eq!(bound.order_id(), Some(order.id()));
        assert!(bound.paid_at().is_some());
    }

    #[test]
    fn test_payment_mismatch_leaves_order_unconfirmed() {
        let (mut order, _) = order_with_items();
        let pay = Pay::new(PayMethod::Card, Money::new(1_700_001));

        let result = order.process_payment(pay);

        assert!(matches!(result, Err(OrderError::PayAmountMismatch { .. })));
        assert_eq!(order.status(), OrderStatus::Ordered);
        assert_eq!(order.pay().unwrap().status(), PayStatus::Failed);
    }

    #[test]
    fn test_second_payment_fails_and_keeps_paid_at() {
        let (mut order, _) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();
        let paid_at = order.pay().unwrap().paid_at();

        let result = order.process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)));

        assert!(matches!(
            result,
            Err(OrderError::InvalidOrderTransition {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Confirmed,
                ..
            })
        ));
        assert_eq!(order.pay().unwrap().paid_at(), paid_at);
    }

    #[test]
    fn test_prepare_delivery_with_explicit_address() {
        let (mut order, _) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();

        order.prepare_delivery(&member(), Some(address())).unwrap();

        assert_eq!(order.status(), OrderStatus::ShipReady);
        assert!(order.delivery().is_some());
        assert_eq!(order.ship_addr().unwrap().postcode(), "04524");
    }

    #[test]
    fn test_prepare_delivery_falls_back_to_member_address() {
        let (mut order, _) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();

        let with_addr = Member::new("Kim", Grade::Gold).unwrap().with_address(address());
        order.prepare_delivery(&with_addr, None).unwrap();

        assert_eq!(order.ship_addr().unwrap().city(), "Jung-gu");
    }

    #[test]
    fn test_prepare_delivery_without_any_address_fails() {
        let (mut order, _) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();

        let result = order.prepare_delivery(&member(), None);
        assert!(matches!(result, Err(OrderError::AddressRequired)));
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_prepare_delivery_before_payment_fails() {
        let (mut order, _) = order_with_items();
        let result = order.prepare_delivery(&member(), Some(address()));
        assert!(matches!(
            result,
            Err(OrderError::InvalidOrderTransition {
                from: OrderStatus::Ordered,
                to: OrderStatus::ShipReady,
                ..
            })
        ));
    }

    #[test]
    fn test_start_delivery_without_delivery_cannot_happen_via_status() {
        // Shipping is only reachable from ShipReady, which always binds a
        // delivery first, so the missing-delivery error is shadowed by the
        // transition guard from Ordered.
        let (mut order, _) = order_with_items();
        let result = order.start_delivery("TRACK-1", None);
        assert!(matches!(
            result,
            Err(OrderError::InvalidOrderTransition { .. })
        ));
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut order, _) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();
        order.prepare_delivery(&member(), Some(address())).unwrap();
        order.start_delivery("TRACK-1", None).unwrap();
        assert_eq!(order.status(), OrderStatus::Shipping);

        order.complete_delivery(None).unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
        let delivery = order.delivery().unwrap();
        assert_eq!(delivery.status(), crate::order::DeliveryStatus::Completed);
        assert!(delivery.arrived_at().is_some());
        assert_eq!(order.pay().unwrap().status(), PayStatus::Paid);
    }

    #[test]
    fn test_cancel_before_payment_restores_stock() {
        let (mut order, mut catalog) = order_with_items();

        order.cancel(&mut catalog).unwrap();

        assert_eq!(order.status(), OrderStatus::Canceled);
        assert!(order.pay().is_none());
        assert!(order.delivery().is_none());
        assert_eq!(catalog[&ProductId::new("SKU-001")].stock_quantity(), 50);
        assert_eq!(catalog[&ProductId::new("SKU-002")].stock_quantity(), 20);
    }

    #[test]
    fn test_cancel_after_payment_cascades_into_pay() {
        let (mut order, mut catalog) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();

        order.cancel(&mut catalog).unwrap();

        assert_eq!(order.status(), OrderStatus::Canceled);
        assert_eq!(order.pay().unwrap().status(), PayStatus::Canceled);
        assert_eq!(catalog[&ProductId::new("SKU-001")].stock_quantity(), 50);
    }

    #[test]
    fn test_cancel_after_ship_ready_cascades_into_delivery() {
        let (mut order, mut catalog) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();
        order.prepare_delivery(&member(), Some(address())).unwrap();

        order.cancel(&mut catalog).unwrap();

        assert_eq!(order.status(), OrderStatus::Canceled);
        assert_eq!(
            order.delivery().unwrap().status(),
            crate::order::DeliveryStatus::Canceled
        );
    }

    #[test]
    fn test_cancel_after_shipping_start_fails() {
        let (mut order, mut catalog) = order_with_items();
        order
            .process_payment(Pay::new(PayMethod::Card, Money::new(1_700_000)))
            .unwrap();
        order.prepare_delivery(&member(), Some(address())).unwrap();
        order.start_delivery("TRACK-1", None).unwrap();

        let result = order.cancel(&mut catalog);

        assert!(matches!(
            result,
            Err(OrderError::InvalidOrderTransition {
                from: OrderStatus::Shipping,
                to: OrderStatus::Canceled,
                ..
            })
        ));
        assert_eq!(order.status(), OrderStatus::Shipping);
        // no stock restored on a refused cancel
        assert_eq!(catalog[&ProductId::new("SKU-001")].stock_quantity(), 20);
    }

    #[test]
    fn test_apply_discount_once() {
        let (mut order, _) = order_with_items();
        let m = member();

        order
            .apply_discount(&m, &crate::order::PercentageDiscount, None)
            .unwrap();
        assert_eq!(order.amount().discount_amount().amount(), 170_000);
        assert_eq!(order.amount().final_amount().amount(), 1_530_000);

        let result = order.apply_discount(&m, &crate::order::PercentageDiscount, None);
        assert!(matches!(result, Err(OrderError::AlreadyDiscounted)));
    }
}
