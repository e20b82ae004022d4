//! End-to-end reconciliation against the in-memory event service.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use roster_core::{
        filter_against_roster, EventService, ParticipantRecord, ReconcileReport, ReconcileService,
    };

    use crate::fixtures::{Account, InMemoryEventService};

    fn record(first: &str, last: &str, email: Option<&str>) -> ParticipantRecord {
        ParticipantRecord::from_parts(first, last, email).expect("valid record")
    }

    async fn reconcile(
        service: Arc<InMemoryEventService>,
        records: Vec<ParticipantRecord>,
    ) -> ReconcileReport {
        let mut orchestrator = ReconcileService::new(service);
        timeout(Duration::from_secs(2), orchestrator.run(records))
            .await
            .expect("reconciliation timed out")
            .expect("reconciliation succeeded")
    }

    #[tokio::test]
    async fn account_holder_with_uncaptured_name_gets_corrected() {
        let service = Arc::new(InMemoryEventService::new().with_account(
            "a@x.com",
            Account {
                player_id: "p1".into(),
                captured_name: None,
            },
        ));

        let report = reconcile(service.clone(), vec![record("A", "B", Some("a@x.com"))]).await;

        assert!(report.missing.is_empty());
        assert_eq!(report.registered, 1);
        assert_eq!(
            service.name_corrections.lock().as_slice(),
            &[("p1".to_string(), "A".to_string(), "B".to_string())]
        );
    }

    #[tokio::test]
    async fn account_holder_with_captured_name_needs_no_correction() {
        let service = Arc::new(InMemoryEventService::new().with_account(
            "a@x.com",
            Account {
                player_id: "p1".into(),
                captured_name: Some(("A".into(), "B".into())),
            },
        ));

        let report = reconcile(service.clone(), vec![record("A", "B", Some("a@x.com"))]).await;

        assert_eq!(report.registered, 1);
        assert!(service.name_corrections.lock().is_empty());
    }

    #[tokio::test]
    async fn unknown_email_falls_back_to_guest() {
        let service = Arc::new(InMemoryEventService::new());

        let report = reconcile(service.clone(), vec![record("A", "B", Some("a@x.com"))]).await;

        assert!(report.missing.is_empty());
        assert_eq!(report.registered, 1);
        assert_eq!(
            service.accepted_guests(),
            vec![("A".to_string(), "B".to_string())]
        );
    }

    #[tokio::test]
    async fn already_registered_email_is_success_equivalent() {
        let service = Arc::new(InMemoryEventService::new().with_registered(
            "a@x.com",
            Account {
                player_id: "p1".into(),
                captured_name: Some(("A".into(), "B".into())),
            },
        ));

        let report = reconcile(service.clone(), vec![record("A", "B", Some("a@x.com"))]).await;

        assert!(report.missing.is_empty());
        assert_eq!(report.already_registered, 1);
        assert!(service.accepted_guests().is_empty());
    }

    #[tokio::test]
    async fn failed_guest_lands_in_missing_set() {
        let service = Arc::new(InMemoryEventService::new().with_failing_guest("C", "D"));

        let report = reconcile(service, vec![record("C", "D", None)]).await;

        assert_eq!(report.registered, 0);
        assert_eq!(report.missing, vec![record("C", "D", None)]);
    }

    #[tokio::test]
    async fn mixed_batch_partitions_every_record_in_input_order() {
        let service = Arc::new(
            InMemoryEventService::new()
                .with_account(
                    "a@x.com",
                    Account {
                        player_id: "p1".into(),
                        captured_name: None,
                    },
                )
                .with_registered(
                    "b@x.com",
                    Account {
                        player_id: "p2".into(),
                        captured_name: Some(("C".into(), "D".into())),
                    },
                )
                .with_failing_guest("G", "H")
                .with_failing_guest("I", "J"),
        );

        let records = vec![
            record("A", "B", Some("a@x.com")), // account holder, registered
            record("C", "D", Some("b@x.com")), // already registered
            record("E", "F", Some("e@x.com")), // no account -> guest, accepted
            record("G", "H", Some("g@x.com")), // no account -> guest declined -> missing
            record("I", "J", None),            // guest declined -> missing
            record("K", "L", None),            // guest accepted
        ];
        let total = records.len();

        let report = reconcile(service.clone(), records).await;

        assert_eq!(report.registered, 3);
        assert_eq!(report.already_registered, 1);
        assert_eq!(
            report.missing,
            vec![
                record("G", "H", Some("g@x.com")),
                record("I", "J", None),
            ]
        );
        // Partition invariant: nothing lost, nothing counted twice.
        assert_eq!(
            report.registered + report.already_registered + report.missing.len(),
            total
        );
        // Guest attempts kept issuance order.
        assert_eq!(
            service.accepted_guests(),
            vec![
                ("E".to_string(), "F".to_string()),
                ("K".to_string(), "L".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn dedup_keeps_emailed_collisions_and_drops_guest_collisions() {
        let service = Arc::new(
            InMemoryEventService::new()
                .with_roster_entry("E", "F")
                .with_roster_entry("G", "H"),
        );

        let existing = service.players_in_event().await.expect("snapshot");
        let records = vec![
            record("E", "F", Some("e@x.com")), // collision with email: still queued
            record("G", "H", None),            // collision without email: skipped
        ];
        let (queued, skipped) = filter_against_roster(records, &existing);

        assert_eq!(skipped, 1);
        assert_eq!(queued, vec![record("E", "F", Some("e@x.com"))]);

        // The skipped record never reaches the orchestrator at all.
        let report = reconcile(service.clone(), queued).await;
        assert_eq!(
            report.registered + report.already_registered + report.missing.len(),
            1
        );
        assert!(service
            .accepted_guests()
            .iter()
            .all(|(first, _)| first != "G"));
    }
}
