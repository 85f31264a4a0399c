//! Export session writing to disk.

use std::time::Duration;

use menuboard::content::SiteContent;
use menuboard::export::ExportSession;

#[tokio::test]
async fn export_writes_named_pdf() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
    let mut data = SiteContent::bundled()
        .expect("bundled content parses")
        .menu_pdf_data();
    data.vendor_name = "Joe's Tacos & Co.".to_string();

    let session = ExportSession::with_delay(Duration::from_millis(5));
    let generated = chrono::Local::now().naive_local();
    let path = session
        .export(&data, generated, temp_dir.path())
        .await
        .expect("export succeeds");

    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("joe-s-tacos-co-menu.pdf"));
    let bytes = std::fs::read(&path).expect("read exported file");
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(!session.is_exporting());
}

#[tokio::test]
async fn flag_observers_see_both_edges() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
    let data = SiteContent::bundled()
        .expect("bundled content parses")
        .menu_pdf_data();
    let session = ExportSession::with_delay(Duration::from_millis(20));
    let mut rx = session.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let exporting = *rx.borrow_and_update();
            seen.push(exporting);
            if !exporting {
                break;
            }
        }
        seen
    });

    session
        .export(&data, chrono::Local::now().naive_local(), temp_dir.path())
        .await
        .expect("export succeeds");
    let seen = watcher.await.expect("watcher task");
    assert_eq!(seen.first(), Some(&true));
    assert_eq!(seen.last(), Some(&false));
}
