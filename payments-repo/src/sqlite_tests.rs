//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use payments_types::{NewPayment, PaymentId, PaymentRepository, PaymentStatus};

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_payment_assigns_id() {
        let repo = setup_repo().await;

        let first = repo
            .insert_payment(NewPayment::confirmed(42, 100.0))
            .await
            .unwrap();
        let second = repo
            .insert_payment(NewPayment::confirmed(42, 25.5))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.payment_status, "PAID");
        assert_eq!(first.order_id, 42);
        assert_eq!(second.amount, 25.5);
    }

    #[tokio::test]
    async fn test_get_payment() {
        let repo = setup_repo().await;

        let created = repo
            .insert_payment(NewPayment::confirmed(42, 100.0))
            .await
            .unwrap();

        let fetched = repo.get_payment(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.order_id, 42);
        assert_eq!(fetched.amount, 100.0);
        assert_eq!(fetched.status(), Some(PaymentStatus::Paid));
        // RFC 3339 text keeps sub-second precision
        assert_eq!(fetched.payment_date, created.payment_date);
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_payment(PaymentId::new(999)).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_payments_by_order() {
        let repo = setup_repo().await;

        repo.insert_payment(NewPayment::confirmed(42, 10.0))
            .await
            .unwrap();
        repo.insert_payment(NewPayment::confirmed(42, 20.0))
            .await
            .unwrap();
        repo.insert_payment(NewPayment::confirmed(99, 30.0))
            .await
            .unwrap();

        let for_42 = repo.list_payments(Some(42)).await.unwrap();
        assert_eq!(for_42.len(), 2);
        assert!(for_42.iter().all(|p| p.order_id == 42));

        let all = repo.list_payments(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|p| p.order_id == 99));
    }

    #[tokio::test]
    async fn test_list_payments_empty() {
        let repo = setup_repo().await;

        assert!(repo.list_payments(None).await.unwrap().is_empty());
        assert!(repo.list_payments(Some(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_payment_status() {
        let repo = setup_repo().await;

        let created = repo
            .insert_payment(NewPayment::confirmed(42, 100.0))
            .await
            .unwrap();

        let updated = repo
            .update_payment_status(created.id, "FAILED")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.payment_status, "FAILED");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, created.amount);

        let fetched = repo.get_payment(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.payment_status, "FAILED");
    }

    #[tokio::test]
    async fn test_update_payment_status_writes_unrecognized_value() {
        let repo = setup_repo().await;

        let created = repo
            .insert_payment(NewPayment::confirmed(1, 5.0))
            .await
            .unwrap();

        let updated = repo
            .update_payment_status(created.id, "REFUNDED")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.payment_status, "REFUNDED");
        assert_eq!(updated.status(), None);
    }

    #[tokio::test]
    async fn test_update_payment_status_not_found() {
        let repo = setup_repo().await;

        repo.insert_payment(NewPayment::confirmed(42, 100.0))
            .await
            .unwrap();
        let before = repo.count_payments().await.unwrap();

        let result = repo
            .update_payment_status(PaymentId::new(999), "FAILED")
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repo.count_payments().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let repo = setup_repo().await;

        repo.insert_payment(NewPayment::confirmed(42, 100.0))
            .await
            .unwrap();
        repo.create_schema().await.unwrap();

        assert_eq!(repo.count_payments().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_file_backed_database() {
        let dir = std::env::temp_dir().join(format!("payments-repo-test-{}", std::process::id()));
        let path = dir.join("nested").join("payments.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let repo = SqliteRepo::new(&url).await.unwrap();
        let created = repo
            .insert_payment(NewPayment::confirmed(7, 1.5))
            .await
            .unwrap();
        drop(repo);

        let reopened = SqliteRepo::new(&url).await.unwrap();
        let fetched = reopened.get_payment(created.id).await.unwrap();
        assert!(fetched.is_some());

        reopened.pool().close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
