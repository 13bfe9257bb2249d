//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use payments_types::{
        AppError, NewPayment, Payment, PaymentId, PaymentRepository, PaymentStatus, RepoError,
    };

    use crate::PaymentService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        payments: Mutex<Vec<Payment>>,
        fail: AtomicBool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                payments: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            }
        }

        /// Makes every subsequent call fail like a lost connection.
        pub fn fail_all(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PaymentRepository for MockRepo {
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, RepoError> {
            self.check()?;
            let mut payments = self.payments.lock().unwrap();
            let id = PaymentId::new(payments.len() as i64 + 1);
            let payment = payment.into_payment(id);
            payments.push(payment.clone());
            Ok(payment)
        }

        async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            self.check()?;
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn list_payments(&self, order_id: Option<i64>) -> Result<Vec<Payment>, RepoError> {
            self.check()?;
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .filter(|p| order_id.is_none_or(|o| p.order_id == o))
                .cloned()
                .collect())
        }

        async fn update_payment_status(
            &self,
            id: PaymentId,
            status: &str,
        ) -> Result<Option<Payment>, RepoError> {
            self.check()?;
            let mut payments = self.payments.lock().unwrap();
            Ok(payments.iter_mut().find(|p| p.id == id).map(|p| {
                p.payment_status = status.to_string();
                p.clone()
            }))
        }

        async fn count_payments(&self) -> Result<i64, RepoError> {
            self.check()?;
            Ok(self.payments.lock().unwrap().len() as i64)
        }
    }

    #[tokio::test]
    async fn test_confirm_payment() {
        let service = PaymentService::new(MockRepo::new());

        let payment = service.confirm_payment(42, 100.0).await.unwrap();

        assert_eq!(payment.payment_status, "PAID");
        assert_eq!(payment.status(), Some(PaymentStatus::Paid));
        assert_eq!(payment.order_id, 42);
        assert_eq!(payment.amount, 100.0);
        assert!(payment.id.get() > 0);
    }

    #[tokio::test]
    async fn test_get_payment_by_id() {
        let service = PaymentService::new(MockRepo::new());

        let created = service.confirm_payment(42, 100.0).await.unwrap();
        let fetched = service.get_payment_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_payment_by_id_absent() {
        let service = PaymentService::new(MockRepo::new());

        let result = service.get_payment_by_id(PaymentId::new(404)).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_payments_filters_by_order() {
        let service = PaymentService::new(MockRepo::new());

        service.confirm_payment(42, 10.0).await.unwrap();
        service.confirm_payment(42, 20.0).await.unwrap();
        let other = service.confirm_payment(99, 30.0).await.unwrap();

        let for_42 = service.get_payments(Some(42)).await.unwrap();
        assert_eq!(for_42.len(), 2);
        assert!(for_42.iter().all(|p| p.order_id == 42));
        assert!(!for_42.contains(&other));

        let all = service.get_payments(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_get_payments_empty() {
        let service = PaymentService::new(MockRepo::new());

        assert!(service.get_payments(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_payment_status() {
        let service = PaymentService::new(MockRepo::new());

        let created = service.confirm_payment(42, 100.0).await.unwrap();
        let updated = service
            .update_payment_status(created.id, "FAILED")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.payment_status, "FAILED");

        let fetched = service
            .get_payment_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.payment_status, "FAILED");
    }

    #[tokio::test]
    async fn test_update_payment_status_accepts_any_string() {
        let service = PaymentService::new(MockRepo::new());

        let created = service.confirm_payment(1, 1.0).await.unwrap();
        let updated = service
            .update_payment_status(created.id, "ON_HOLD")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.payment_status, "ON_HOLD");
    }

    #[tokio::test]
    async fn test_update_payment_status_absent_leaves_store_unchanged() {
        let service = PaymentService::new(MockRepo::new());

        service.confirm_payment(42, 100.0).await.unwrap();
        let before = service.repo().count_payments().await.unwrap();

        let result = service
            .update_payment_status(PaymentId::new(77), "FAILED")
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(service.repo().count_payments().await.unwrap(), before);
        let all = service.get_payments(None).await.unwrap();
        assert!(all.iter().all(|p| p.payment_status == "PAID"));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_as_internal() {
        let repo = MockRepo::new();
        repo.fail_all();
        let service = PaymentService::new(repo);

        let result = service.confirm_payment(42, 100.0).await;
        assert!(matches!(result, Err(AppError::Internal(_))));

        let result = service.get_payment_by_id(PaymentId::new(1)).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
