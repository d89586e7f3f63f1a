//! Integration test: audit a small generated-style corpus on disk

use command_model_generator_auditor::CorpusAuditor;
use std::fs;

#[test]
fn test_audit_mixed_corpus() {
    let corpus = tempfile::tempdir().unwrap();
    let storage = corpus.path().join("storage");
    let queue = corpus.path().join("queue");
    fs::create_dir_all(&storage).unwrap();
    fs::create_dir_all(&queue).unwrap();

    // clean document, including the storage layer's derived fields
    fs::write(
        storage.join("CreateBucketCommand.json"),
        r#"{
            "service": "storage",
            "operation": "CreateBucket",
            "parameters": {
                "Bucket": {
                    "name": "Bucket",
                    "type": "string",
                    "required": true,
                    "documentation": "Name of the bucket"
                }
            },
            "requiredParameters": ["Bucket"],
            "optionalParameters": [],
            "generatedAt": "2024-06-01T00:00:00Z",
            "parameterCount": 1,
            "summary": "1 parameters (1 required)"
        }"#,
    )
    .unwrap();

    // inconsistent document: listed name sits in both lists
    fs::write(
        storage.join("DeleteBucketCommand.json"),
        r#"{
            "service": "storage",
            "operation": "DeleteBucket",
            "parameters": {
                "Bucket": {
                    "name": "Bucket",
                    "type": "string",
                    "required": true,
                    "documentation": ""
                }
            },
            "requiredParameters": ["Bucket"],
            "optionalParameters": ["Bucket"]
        }"#,
    )
    .unwrap();

    // usable but suspicious: unusual type
    fs::write(
        queue.join("SendMessageCommand.json"),
        r#"{
            "service": "queue",
            "operation": "SendMessage",
            "parameters": {
                "Body": {
                    "name": "Body",
                    "type": "document",
                    "required": false,
                    "documentation": ""
                }
            },
            "requiredParameters": [],
            "optionalParameters": ["Body"]
        }"#,
    )
    .unwrap();

    // non-JSON files are not part of the corpus
    fs::write(corpus.path().join("README.md"), "# index").unwrap();

    let report = CorpusAuditor::new(corpus.path().to_path_buf())
        .audit()
        .unwrap();

    assert_eq!(report.total_documents(), 3);
    assert_eq!(report.clean_documents(), 2);
    assert_eq!(report.total_errors(), 1);
    assert_eq!(report.total_warnings(), 1);
    assert!(!report.is_clean());

    let summary = report.render_summary();
    assert!(summary.contains("DeleteBucketCommand.json"));
    assert!(summary.contains("SendMessageCommand.json"));
}

#[test]
fn test_audit_clean_corpus() {
    let corpus = tempfile::tempdir().unwrap();
    let storage = corpus.path().join("storage");
    fs::create_dir_all(&storage).unwrap();

    fs::write(
        storage.join("ListBucketsCommand.json"),
        r#"{
            "service": "storage",
            "operation": "ListBuckets",
            "parameters": {},
            "requiredParameters": [],
            "optionalParameters": []
        }"#,
    )
    .unwrap();

    let report = CorpusAuditor::new(corpus.path().to_path_buf())
        .audit()
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.total_documents(), 1);
    assert_eq!(report.total_warnings(), 0);
}

#[test]
fn test_audit_is_deterministic() {
    let corpus = tempfile::tempdir().unwrap();
    fs::create_dir_all(corpus.path().join("storage")).unwrap();
    fs::write(
        corpus.path().join("storage/BadCommand.json"),
        r#"{"service": "storage"}"#,
    )
    .unwrap();

    let auditor = CorpusAuditor::new(corpus.path().to_path_buf());
    let first = auditor.audit().unwrap();
    let second = auditor.audit().unwrap();

    assert_eq!(first.total_errors(), second.total_errors());
    assert_eq!(
        first.documents[0].report.errors,
        second.documents[0].report.errors
    );
}
