//! Menu export integration tests (document content, bytes, session).

#[path = "menu_export/document.rs"]
mod document;
#[path = "menu_export/session.rs"]
mod session;
