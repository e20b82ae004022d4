//! Whole-pipeline flows: CSV in, reconciliation, report CSV out.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::{tempdir, NamedTempFile};
    use tokio::time::timeout;

    use roster_core::{filter_against_roster, EventService, ReconcileService};
    use roster_csv::{read_participants, write_missing_report, ColumnMap, CsvError};

    use crate::fixtures::{Account, InMemoryEventService};

    fn input_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[tokio::test]
    async fn csv_to_missing_report_round_trip() {
        let service = Arc::new(
            InMemoryEventService::new()
                .with_account(
                    "ada@x.com",
                    Account {
                        player_id: "p1".into(),
                        captured_name: None,
                    },
                )
                .with_failing_guest("Missing", "Person"),
        );
        let columns = ColumnMap::default();

        let input = input_file(
            "firstName,lastName,email\n\
             Ada,Lovelace,ada@x.com\n\
             Missing,Person,\n\
             Walkin,Guest,\n",
        );
        let records = read_participants(input.path(), &columns).expect("read input");
        assert_eq!(records.len(), 3);

        let existing = service.players_in_event().await.expect("snapshot");
        let (queued, skipped) = filter_against_roster(records, &existing);
        assert_eq!(skipped, 0);

        let mut orchestrator = ReconcileService::new(service.clone());
        let report = timeout(Duration::from_secs(2), orchestrator.run(queued))
            .await
            .expect("timed out")
            .expect("run succeeded");

        assert_eq!(report.registered, 2);
        assert_eq!(report.missing.len(), 1);

        let dir = tempdir().expect("temp dir");
        let output = dir.path().join("missing.csv");
        write_missing_report(&output, &report.missing, &columns).expect("write report");

        let written = std::fs::read_to_string(&output).expect("read report");
        assert_eq!(written, "firstName,lastName,email\nMissing,Person,\n");

        // Ada's account had no captured name; the input row's name was applied.
        assert_eq!(
            service.name_corrections.lock().as_slice(),
            &[("p1".to_string(), "Ada".to_string(), "Lovelace".to_string())]
        );
    }

    #[tokio::test]
    async fn malformed_row_aborts_before_any_registration() {
        let service = Arc::new(InMemoryEventService::new());
        let columns = ColumnMap::default();

        let input = input_file(
            "firstName,lastName,email\n\
             Ada,Lovelace,ada@x.com\n\
             ,NoFirstName,x@x.com\n",
        );

        let result = read_participants(input.path(), &columns);
        assert!(matches!(result, Err(CsvError::MalformedRow { line: 3, .. })));

        // Nothing was attempted against the service.
        assert!(service.accepted_guests().is_empty());
    }

    #[tokio::test]
    async fn custom_column_mapping_flows_through_to_the_report() {
        let service = Arc::new(InMemoryEventService::new().with_failing_guest("Solo", "Guest"));
        let columns = ColumnMap {
            first_name: "given".into(),
            last_name: "family".into(),
            email: "mail".into(),
        };

        let input = input_file("given,family,mail\nSolo,Guest,\n");
        let records = read_participants(input.path(), &columns).expect("read input");

        let mut orchestrator = ReconcileService::new(service);
        let report = timeout(Duration::from_secs(2), orchestrator.run(records))
            .await
            .expect("timed out")
            .expect("run succeeded");

        let dir = tempdir().expect("temp dir");
        let output = dir.path().join("missing.csv");
        write_missing_report(&output, &report.missing, &columns).expect("write report");

        let written = std::fs::read_to_string(&output).expect("read report");
        assert_eq!(written, "given,family,mail\nSolo,Guest,\n");
    }
}
