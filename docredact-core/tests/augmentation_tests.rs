// docredact-core/tests/augmentation_tests.rs
use docredact_core::{
    enable_track_changes, insert_confidential_header, Alignment, ChangeTrackingMode, DocRedactConfig,
    DocRedactError, DocumentSnapshot, FaultPlan, HeaderColor, HeaderOutcome, HostError,
    MemoryDocument, TrackChangesStatus, TrackingConfig,
};
use docredact_core::host::{HeaderParagraph, Section};

#[test_log::test(tokio::test)]
async fn header_stamping_is_idempotent() {
    let config = DocRedactConfig::default();
    let doc = MemoryDocument::from_paragraphs(["body"]);

    let first = insert_confidential_header(&doc, &config.header).await.unwrap();
    let after_first = doc.snapshot().unwrap();
    let second = insert_confidential_header(&doc, &config.header).await.unwrap();

    assert_eq!(first, HeaderOutcome::Inserted);
    assert_eq!(second, HeaderOutcome::AlreadyPresent);
    assert_eq!(doc.snapshot().unwrap(), after_first);
    assert_eq!(doc.header_text(0).as_deref(), Some("CONFIDENTIAL DOCUMENT"));
}

#[test_log::test(tokio::test)]
async fn header_requires_a_section() {
    let doc = MemoryDocument::new(DocumentSnapshot {
        paragraphs: vec!["body".to_string()],
        ..DocumentSnapshot::default()
    });

    let err = insert_confidential_header(&doc, &DocRedactConfig::default().header)
        .await
        .unwrap_err();

    assert!(matches!(err, DocRedactError::NoSections), "{err:?}");
    assert_eq!(doc.mutation_count(), 0);
}

#[test_log::test(tokio::test)]
async fn only_the_first_section_header_is_touched() {
    let doc = MemoryDocument::new(DocumentSnapshot {
        sections: vec![
            Section::default(),
            Section {
                primary_header: vec![HeaderParagraph { text: "Appendix".to_string(), style: None }],
            },
        ],
        ..DocumentSnapshot::default()
    });

    insert_confidential_header(&doc, &DocRedactConfig::default().header).await.unwrap();

    assert_eq!(doc.header_text(0).as_deref(), Some("CONFIDENTIAL DOCUMENT"));
    assert_eq!(doc.header_text(1).as_deref(), Some("Appendix"));
}

#[test_log::test(tokio::test)]
async fn configured_style_is_applied() {
    let mut config = DocRedactConfig::default();
    config.header.text = "Internal Only".to_string();
    config.header.alignment = Alignment::Right;
    config.header.color = HeaderColor::Black;
    config.header.font_size = 10.5;
    config.header.bold = false;
    let doc = MemoryDocument::from_paragraphs(["body"]);

    insert_confidential_header(&doc, &config.header).await.unwrap();

    let snapshot = doc.snapshot().unwrap();
    let paragraph = &snapshot.sections[0].primary_header[0];
    assert_eq!(paragraph.text, "Internal Only");
    let style = paragraph.style.as_ref().unwrap();
    assert_eq!(style.alignment, Alignment::Right);
    assert_eq!(style.color, "#000000");
    assert_eq!(style.font_size, 10.5);
    assert!(!style.bold);

    // A custom marker is matched case-insensitively too.
    let again = insert_confidential_header(&doc, &config.header).await.unwrap();
    assert_eq!(again, HeaderOutcome::AlreadyPresent);
}

#[test_log::test(tokio::test)]
async fn unreadable_header_is_treated_as_absent() {
    let doc = MemoryDocument::from_paragraphs(["body"]).with_faults(FaultPlan {
        fail_header_read: true,
        ..FaultPlan::default()
    });

    let outcome = insert_confidential_header(&doc, &DocRedactConfig::default().header)
        .await
        .unwrap();

    assert_eq!(outcome, HeaderOutcome::Inserted);
}

#[test_log::test(tokio::test)]
async fn header_write_failure_propagates() {
    let doc = MemoryDocument::from_paragraphs(["body"]).with_faults(FaultPlan {
        fail_header_write: true,
        ..FaultPlan::default()
    });

    let err = insert_confidential_header(&doc, &DocRedactConfig::default().header)
        .await
        .unwrap_err();

    assert!(matches!(err, DocRedactError::Host(HostError::Mutation(_))), "{err:?}");
    assert_eq!(doc.header_text(0).as_deref(), Some(""));
}

#[test_log::test(tokio::test)]
async fn track_changes_not_supported_attempts_no_mutation() {
    let doc = MemoryDocument::from_paragraphs(["body"]).with_requirement_set("WordApi", "1.4");

    let status = enable_track_changes(&doc, &TrackingConfig::default()).await;

    assert_eq!(status, TrackChangesStatus::NotSupported);
    assert_eq!(doc.mutation_count(), 0);
    assert_eq!(doc.commit_count(), 0);
    assert_eq!(doc.change_tracking_mode(), ChangeTrackingMode::Off);
}

#[test_log::test(tokio::test)]
async fn track_changes_missing_requirement_set_is_not_supported() {
    let doc = MemoryDocument::from_paragraphs(["body"]);
    let status = enable_track_changes(&doc, &TrackingConfig::default()).await;
    assert_eq!(status, TrackChangesStatus::NotSupported);
}

#[test_log::test(tokio::test)]
async fn track_changes_mutation_error_is_reported_not_raised() {
    let doc = MemoryDocument::from_paragraphs(["body"])
        .with_requirement_set("WordApi", "1.5")
        .with_faults(FaultPlan { fail_tracking_write: true, ..FaultPlan::default() });

    let status = enable_track_changes(&doc, &TrackingConfig::default()).await;

    assert_eq!(status, TrackChangesStatus::Error);
    assert_eq!(doc.mutation_count(), 1);
}

#[test_log::test(tokio::test)]
async fn track_changes_is_idempotent() {
    let doc = MemoryDocument::from_paragraphs(["body"]).with_requirement_set("WordApi", "1.8");
    let tracking = TrackingConfig::default();

    assert_eq!(enable_track_changes(&doc, &tracking).await, TrackChangesStatus::Enabled);
    assert_eq!(enable_track_changes(&doc, &tracking).await, TrackChangesStatus::Enabled);
    assert_eq!(doc.change_tracking_mode(), ChangeTrackingMode::TrackAll);
}
