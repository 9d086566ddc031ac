//! Ingestion Module Tests
//!
//! Validates storing uploaded artifacts and recording them in the catalog.
//!
//! ## Test Scopes
//! - **Filenames**: Sanitization and deterministic collision resolution.
//! - **Payloads**: Buffers, streams and local file copies.
//! - **Atomicity**: Failures leave neither a stray file nor a stray record.
//! - **Handlers**: Upload form validation.

#[cfg(test)]
mod tests {
    use crate::catalog::index::rebuild;
    use crate::catalog::log::RecordLog;
    use crate::config::CatalogConfig;
    use crate::error::CatalogError;
    use crate::identity::UserIdentity;
    use crate::ingestion::handlers::{UploadForm, store_upload};
    use crate::ingestion::service::{
        FALLBACK_FILENAME, IngestionService, collision_name, discard_artifact, sanitize_filename,
        split_extension,
    };
    use crate::ingestion::types::{BookSubmission, Payload};
    use crate::library::Library;
    use axum::http::StatusCode;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    fn service(root: &Path) -> IngestionService {
        IngestionService::new(RecordLog::new(root.join("bookvals.txt")), root.join("books"))
    }

    fn dune() -> BookSubmission {
        BookSubmission::new("Dune", "Frank Herbert", "Science Fiction", "scifi, desert , spice")
    }

    // ============================================================
    // FILENAME TESTS
    // ============================================================

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\book.pdf"), "book.pdf");
        assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_sanitize_falls_back_for_unusable_names() {
        for name in ["", "..", ".", "dir/", "   "] {
            assert_eq!(sanitize_filename(name), FALLBACK_FILENAME, "{:?}", name);
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("book.txt"), ("book", ".txt"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".profile"), (".profile", ""));
    }

    #[test]
    fn test_collision_names_are_sequential() {
        assert_eq!(collision_name("book.txt", 0), "book.txt");
        assert_eq!(collision_name("book.txt", 1), "book_1.txt");
        assert_eq!(collision_name("book.txt", 2), "book_2.txt");
        assert_eq!(collision_name("notes", 3), "notes_3");
    }

    // ============================================================
    // INGEST TESTS
    // ============================================================

    #[test]
    fn test_ingest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let uploader = UserIdentity::member("paul");

        let stored = service
            .ingest(Payload::text("spice"), "dune.txt", dune(), &uploader)
            .unwrap();

        let entries = rebuild(&RecordLog::new(dir.path().join("bookvals.txt"))).unwrap();
        assert_eq!(entries.len(), 1);

        let e = &entries[0];
        assert!(!e.id.is_empty());
        assert_eq!(e.id, stored.id);
        assert_eq!(e.title.as_deref(), Some("Dune"));
        assert_eq!(e.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(e.genre.as_deref(), Some("Science Fiction"));
        assert_eq!(e.keywords, vec!["scifi", "desert", "spice"]);
        assert_eq!(e.uploader.as_deref(), Some("paul"));
        assert_eq!(e.file_path.as_deref(), Some("books/dune.txt"));

        let content = std::fs::read(dir.path().join("books/dune.txt")).unwrap();
        assert_eq!(content, b"spice");
    }

    #[test]
    fn test_ingest_timestamp_is_utc_iso8601() {
        let dir = tempfile::tempdir().unwrap();
        let e = service(dir.path())
            .ingest(Payload::Bytes(vec![1]), "a.bin", dune(), &UserIdentity::anonymous())
            .unwrap();

        let ts = e.timestamp.unwrap();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert_eq!(e.uploader.as_deref(), Some("anonymous"));
    }

    #[test]
    fn test_filename_collision() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let user = UserIdentity::anonymous();

        let first = service
            .ingest(Payload::text("one"), "book.txt", dune(), &user)
            .unwrap();
        let second = service
            .ingest(Payload::text("two"), "book.txt", dune(), &user)
            .unwrap();
        let third = service
            .ingest(Payload::text("three"), "../book.txt", dune(), &user)
            .unwrap();

        assert_eq!(first.filename.as_deref(), Some("book.txt"));
        assert_eq!(second.filename.as_deref(), Some("book_1.txt"));
        assert_eq!(third.filename.as_deref(), Some("book_2.txt"));
        assert_eq!(second.file_path.as_deref(), Some("books/book_1.txt"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("books/book.txt")).unwrap(),
            "one"
        );
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_ingest_from_reader() {
        let dir = tempfile::tempdir().unwrap();
        let e = service(dir.path())
            .ingest(
                Payload::reader(Cursor::new(b"streamed".to_vec())),
                "stream.txt",
                dune(),
                &UserIdentity::anonymous(),
            )
            .unwrap();

        assert_eq!(e.filename.as_deref(), Some("stream.txt"));
        assert_eq!(
            std::fs::read(dir.path().join("books/stream.txt")).unwrap(),
            b"streamed"
        );
    }

    #[test]
    fn test_ingest_copies_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.epub");
        std::fs::write(&source, b"epub bytes").unwrap();

        let e = service(dir.path())
            .ingest(
                Payload::Path(source),
                "novel.epub",
                dune(),
                &UserIdentity::anonymous(),
            )
            .unwrap();

        assert_eq!(e.filename.as_deref(), Some("novel.epub"));
        assert_eq!(
            std::fs::read(dir.path().join("books/novel.epub")).unwrap(),
            b"epub bytes"
        );
    }

    #[test]
    fn test_keywords_as_list() {
        let dir = tempfile::tempdir().unwrap();
        let submission = BookSubmission::new(
            "Hobbit",
            "Tolkien",
            "Fantasy",
            vec!["fantasy".to_string(), " dragons ".to_string()],
        );

        let e = service(dir.path())
            .ingest(Payload::text("x"), "hobbit.txt", submission, &UserIdentity::anonymous())
            .unwrap();

        assert_eq!(e.keywords, vec!["fantasy", "dragons"]);
    }

    // ============================================================
    // FAILURE TESTS
    // ============================================================

    #[test]
    fn test_missing_source_path_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).ingest(
            Payload::Path(dir.path().join("nope.pdf")),
            "nope.pdf",
            dune(),
            &UserIdentity::anonymous(),
        );

        assert!(matches!(result, Err(CatalogError::UnsupportedPayload(_))));
        assert!(!dir.path().join("bookvals.txt").exists());
        assert!(!dir.path().join("books/nope.pdf").exists());
    }

    #[test]
    fn test_directory_path_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).ingest(
            Payload::Path(dir.path().to_path_buf()),
            "dir",
            dune(),
            &UserIdentity::anonymous(),
        );

        assert!(matches!(result, Err(CatalogError::UnsupportedPayload(_))));
    }

    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("connection reset"))
        }
    }

    #[test]
    fn test_unreadable_stream_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).ingest(
            Payload::reader(FailingReader),
            "broken.txt",
            dune(),
            &UserIdentity::anonymous(),
        );

        assert!(matches!(result, Err(CatalogError::IngestionFailed { .. })));
        assert!(!dir.path().join("books/broken.txt").exists());
        assert!(!dir.path().join("bookvals.txt").exists());
    }

    #[test]
    fn test_uncreatable_storage_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the storage directory should be.
        std::fs::write(dir.path().join("books"), b"").unwrap();

        let result = service(dir.path()).ingest(
            Payload::text("x"),
            "a.txt",
            dune(),
            &UserIdentity::anonymous(),
        );

        assert!(matches!(result, Err(CatalogError::IngestionFailed { .. })));
        assert!(!dir.path().join("bookvals.txt").exists());
    }

    #[test]
    fn test_failed_append_removes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        // The log path is a directory, so appending fails.
        std::fs::create_dir(dir.path().join("bookvals.txt")).unwrap();

        let result = service(dir.path()).ingest(
            Payload::text("x"),
            "a.txt",
            dune(),
            &UserIdentity::anonymous(),
        );

        assert!(matches!(result, Err(CatalogError::IngestionFailed { .. })));
        assert!(!dir.path().join("books/a.txt").exists());
    }

    #[test]
    fn test_discard_artifact_reports_failed_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let stored = dir.path().join("a.txt");
        std::fs::write(&stored, b"x").unwrap();

        assert!(discard_artifact(&stored));
        assert!(!stored.exists());
        // Already gone counts as discarded.
        assert!(discard_artifact(&stored));

        // A directory cannot be removed as a file; the failure is logged, not raised.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        assert!(!discard_artifact(&blocked));
        assert!(blocked.exists());
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    fn library(root: &Path) -> Arc<Library> {
        let config = CatalogConfig::new("127.0.0.1:0".parse().unwrap(), root);
        Arc::new(Library::from_config(&config))
    }

    #[tokio::test]
    async fn test_upload_without_file_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let form = UploadForm {
            title: "Dune".to_string(),
            ..UploadForm::default()
        };

        let err = store_upload(library(dir.path()), form, UserIdentity::anonymous())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.error, "No file provided");
    }

    #[tokio::test]
    async fn test_upload_with_unnamed_file_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let library = library(dir.path());
        let form = UploadForm {
            file: Some((String::new(), b"spice".to_vec())),
            title: "Dune".to_string(),
            ..UploadForm::default()
        };

        let err = store_upload(library.clone(), form, UserIdentity::anonymous())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.error, "No file provided");
        assert!(library.catalog().unwrap().is_empty());
        assert!(!dir.path().join("books/upload").exists());
    }

    #[tokio::test]
    async fn test_upload_stores_entry() {
        let dir = tempfile::tempdir().unwrap();
        let library = library(dir.path());
        let form = UploadForm {
            file: Some(("dune.txt".to_string(), b"spice".to_vec())),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            keywords: "scifi,desert".to_string(),
        };

        let (status, body) = store_upload(library.clone(), form, UserIdentity::member("paul"))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.keywords, vec!["scifi", "desert"]);
        assert_eq!(body.uploader.as_deref(), Some("paul"));
        assert_eq!(library.catalog().unwrap().len(), 1);
    }
}
