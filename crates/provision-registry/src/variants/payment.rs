//! Payment processors

use crate::capability::{Capability, PaymentError, PaymentProcessor, PaymentReceipt};

/// Card payments through Stripe
#[derive(Debug, Clone, Default)]
pub struct StripeProcessor {
    _private: (),
}

impl Capability for StripeProcessor {
    fn label(&self) -> &'static str {
        "stripe"
    }
}

impl PaymentProcessor for StripeProcessor {
    fn process_payment(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        let receipt = PaymentReceipt::issue(self.label(), "card", amount)?;
        tracing::info!(amount, "processed card payment via Stripe");
        Ok(receipt)
    }
}

/// PayPal payments
#[derive(Debug, Clone, Default)]
pub struct PayPalProcessor {
    _private: (),
}

impl Capability for PayPalProcessor {
    fn label(&self) -> &'static str {
        "paypal"
    }
}

impl PaymentProcessor for PayPalProcessor {
    fn process_payment(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        let receipt = PaymentReceipt::issue(self.label(), "paypal", amount)?;
        tracing::info!(amount, "processed PayPal payment");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_uses_card() {
        let receipt = StripeProcessor::default().process_payment(100.0).unwrap();
        assert_eq!(receipt.method, "card");
        assert_eq!(receipt.processor, "stripe");
    }

    #[test]
    fn paypal_rejects_negative() {
        assert!(PayPalProcessor::default().process_payment(-1.0).is_err());
    }
}
