use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Order, OrderStatus};

use super::actions::{OrderAction, OrderActionResult};

impl Entity for Order {
    type Id = String;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String {
        &self.order_id
    }

    /// Orders only ever enter the store in the created state.
    fn on_create(&mut self) -> Result<(), FrameworkError> {
        if self.status != OrderStatus::Created || self.payment_id.is_some() || self.paid_at.is_some() {
            return Err(FrameworkError::Invalid(format!(
                "order {} must be stored unpaid",
                self.order_id
            )));
        }
        Ok(())
    }

    /// Handles order-specific actions.
    ///
    /// # Actions
    /// - `MarkPaid`: created → paid, recording the payment id and time.
    ///
    /// # Errors
    /// Returns `Rejected` when the order was already paid by another payment.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, FrameworkError> {
        match action {
            OrderAction::MarkPaid { payment_id, paid_at } => match self.status {
                OrderStatus::Created => {
                    self.status = OrderStatus::Paid;
                    self.payment_id = Some(payment_id);
                    self.paid_at = Some(paid_at);
                    Ok(OrderActionResult::Paid(self.clone()))
                }
                OrderStatus::Paid if self.payment_id.as_deref() == Some(payment_id.as_str()) => {
                    Ok(OrderActionResult::AlreadyPaid(self.clone()))
                }
                OrderStatus::Paid => Err(FrameworkError::Rejected(format!(
                    "order {} already paid by {}",
                    self.order_id,
                    self.payment_id.as_deref().unwrap_or("unknown payment")
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::fixtures::created_order;

    #[test]
    fn mark_paid_moves_created_to_paid() {
        let mut order = created_order("order123");
        let paid_at = Utc::now();

        let result = order
            .handle_action(OrderAction::MarkPaid { payment_id: "pay456".into(), paid_at })
            .unwrap();

        assert!(matches!(result, OrderActionResult::Paid(_)));
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.payment_id.as_deref(), Some("pay456"));
        assert_eq!(order.paid_at, Some(paid_at));
        assert_eq!(result.into_order(), order);
    }

    #[test]
    fn replaying_the_same_payment_keeps_the_first_timestamp() {
        let mut order = created_order("order123");
        let first = Utc::now();
        order
            .handle_action(OrderAction::MarkPaid { payment_id: "pay456".into(), paid_at: first })
            .unwrap();

        let result = order
            .handle_action(OrderAction::MarkPaid {
                payment_id: "pay456".into(),
                paid_at: first + Duration::minutes(5),
            })
            .unwrap();

        assert!(matches!(result, OrderActionResult::AlreadyPaid(_)));
        assert_eq!(order.paid_at, Some(first));
    }

    #[test]
    fn a_second_payment_is_rejected() {
        let mut order = created_order("order123");
        order
            .handle_action(OrderAction::MarkPaid { payment_id: "pay456".into(), paid_at: Utc::now() })
            .unwrap();
        let snapshot = order.clone();

        let err = order
            .handle_action(OrderAction::MarkPaid { payment_id: "pay789".into(), paid_at: Utc::now() })
            .unwrap_err();

        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert_eq!(order, snapshot);
    }

    #[test]
    fn paid_records_cannot_be_created() {
        let mut order = created_order("order123");
        assert!(order.on_create().is_ok());

        order.status = OrderStatus::Paid;
        assert!(matches!(order.on_create(), Err(FrameworkError::Invalid(_))));

        let mut sneaky = created_order("order124");
        sneaky.payment_id = Some("pay1".into());
        assert!(sneaky.on_create().is_err());
    }
}
