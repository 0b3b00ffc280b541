//! Document Library
//!
//! Search, category filter and sort over the document collection, plus the
//! bookkeeping for uploads and deletes.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::collection::Collection;
use crate::models::{BinaryRef, Document, DocumentCategory};

/// Sort keys offered by the library toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentSort {
    #[default]
    NameAsc,
    NameDesc,
    DateNew,
    DateOld,
}

impl DocumentSort {
    pub const ALL: [DocumentSort; 4] = [
        DocumentSort::NameAsc,
        DocumentSort::NameDesc,
        DocumentSort::DateNew,
        DocumentSort::DateOld,
    ];

    /// Value used by the `<select>`
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSort::NameAsc => "name_asc",
            DocumentSort::NameDesc => "name_desc",
            DocumentSort::DateNew => "date_new",
            DocumentSort::DateOld => "date_old",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentSort::NameAsc => "Nombre (A-Z)",
            DocumentSort::NameDesc => "Nombre (Z-A)",
            DocumentSort::DateNew => "Más recientes",
            DocumentSort::DateOld => "Más antiguos",
        }
    }

    /// Unknown values fall back to name ascending
    pub fn parse(value: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.as_str() == value).unwrap_or_default()
    }
}

/// Toolbar state; recomputed against the base collection on every change
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentQuery {
    pub search: String,
    /// None = all categories
    pub category: Option<DocumentCategory>,
    pub sort: DocumentSort,
}

fn by_name(a: &Document, b: &Document) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

fn by_name_desc(a: &Document, b: &Document) -> Ordering {
    by_name(b, a)
}

fn by_date(a: &Document, b: &Document) -> Ordering {
    a.date.cmp(&b.date).then_with(|| by_name(a, b))
}

fn by_date_desc(a: &Document, b: &Document) -> Ordering {
    by_date(b, a)
}

pub fn list_documents(documents: &Collection<Document>, query: &DocumentQuery) -> Vec<Document> {
    let needle = query.search.to_lowercase();
    let matches = |doc: &Document| {
        doc.name.to_lowercase().contains(&needle)
            && query.category.map_or(true, |category| doc.category == category)
    };
    let order: fn(&Document, &Document) -> Ordering = match query.sort {
        DocumentSort::NameAsc => by_name,
        DocumentSort::NameDesc => by_name_desc,
        DocumentSort::DateNew => by_date_desc,
        DocumentSort::DateOld => by_date,
    };
    documents.query(matches, Some(&order))
}

/// Releases revocable binary handles (object URLs)
pub trait ResourceReleaser {
    fn revoke(&self, href: &str);
}

impl<R: ResourceReleaser + ?Sized> ResourceReleaser for &R {
    fn revoke(&self, href: &str) {
        (**self).revoke(href)
    }
}

/// Delay before a temporary download URL is revoked
pub const DOWNLOAD_RELEASE_DELAY_MS: u32 = 1_000;

/// A handle whose release waits until `run`, once the browser has started
/// reading from it
pub struct DeferredRelease<R> {
    href: String,
    releaser: R,
}

impl<R: ResourceReleaser> DeferredRelease<R> {
    pub fn new(href: String, releaser: R) -> Self {
        Self { href, releaser }
    }

    pub fn run(self) {
        log::debug!("[LIBRARY] Releasing {}", self.href);
        self.releaser.revoke(&self.href);
    }
}

/// Remove a document and release the handle it owned
pub fn delete_document<R: ResourceReleaser>(
    documents: &mut Collection<Document>,
    id: u64,
    releaser: &R,
) -> Option<Document> {
    let removed = documents.remove(id)?;
    if let Some(binary) = removed.binary.as_ref().filter(|b| b.is_revocable()) {
        releaser.revoke(binary.href());
    }
    Some(removed)
}

/// "780 KB" style label, rounded to the nearest KiB
pub fn size_label(bytes: u64) -> String {
    format!("{} KB", (bytes + 512) / 1024)
}

/// Build the record for a freshly selected file
pub fn new_upload(id: u64, name: &str, size_bytes: u64, today: NaiveDate, object_url: Option<String>) -> Document {
    Document {
        id,
        name: name.to_string(),
        category: DocumentCategory::Formato,
        date: today,
        size: size_label(size_bytes),
        binary: object_url.map(BinaryRef::ObjectUrl),
    }
}

/// What "view" does for a document
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    OpenInTab(String),
    ShowDetails,
}

pub fn view_action(doc: &Document) -> ViewAction {
    match &doc.binary {
        Some(binary) if doc.is_pdf() => ViewAction::OpenInTab(binary.href().to_string()),
        _ => ViewAction::ShowDetails,
    }
}

/// What "download" does for a document
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadAction {
    Original { href: String, file_name: String },
    Summary { file_name: String, contents: String },
}

pub fn download_action(doc: &Document) -> DownloadAction {
    match &doc.binary {
        Some(binary) => DownloadAction::Original {
            href: binary.href().to_string(),
            file_name: doc.name.clone(),
        },
        None => DownloadAction::Summary {
            file_name: format!("{}_detalles.txt", file_stem(&doc.name)),
            contents: summary_text(doc),
        },
    }
}

fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

fn summary_text(doc: &Document) -> String {
    format!(
        "Detalles del Documento\n\nNombre: {}\nTipo: {}\nFecha de Subida: {}\nTamaño: {}\n",
        doc.name,
        doc.category.as_str(),
        doc.date.format("%Y-%m-%d"),
        doc.size
    )
}

fn seed(id: u64, name: &str, category: DocumentCategory, date: (i32, u32, u32), size: &str) -> Document {
    Document {
        id,
        name: name.to_string(),
        category,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        size: size.to_string(),
        binary: None,
    }
}

pub fn seed_documents() -> Vec<Document> {
    vec![
        seed(1, "Manual-Calidad-v3.pdf", DocumentCategory::Manual, (2024, 5, 20), "2.5 MB"),
        seed(2, "Instructivo-Troquelado-P3.docx", DocumentCategory::Instructivo, (2024, 5, 18), "780 KB"),
        seed(3, "Norma-ISO-9001.pdf", DocumentCategory::Norma, (2023, 1, 15), "1.2 MB"),
        seed(4, "Ficha-Tecnica-Perfil-A45.xlsx", DocumentCategory::Ficha, (2024, 4, 30), "150 KB"),
        seed(5, "Formato-Inspeccion-Despachos.pdf", DocumentCategory::Formato, (2024, 2, 10), "95 KB"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingReleaser {
        revoked: RefCell<Vec<String>>,
    }

    impl ResourceReleaser for RecordingReleaser {
        fn revoke(&self, href: &str) {
            self.revoked.borrow_mut().push(href.to_string());
        }
    }

    fn library() -> Collection<Document> {
        Collection::from_vec(seed_documents())
    }

    fn names(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_no_match_is_empty() {
        let query = DocumentQuery { search: "zzz-nothing".to_string(), ..Default::default() };
        assert!(list_documents(&library(), &query).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = DocumentQuery { search: "iso".to_string(), ..Default::default() };
        assert_eq!(names(&list_documents(&library(), &query)), vec!["Norma-ISO-9001.pdf"]);
    }

    #[test]
    fn test_category_filter() {
        let query = DocumentQuery { category: Some(DocumentCategory::Manual), ..Default::default() };
        let docs = list_documents(&library(), &query);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, 1);
    }

    #[test]
    fn test_name_desc_reverses_name_asc() {
        let mut docs = library();
        // Same name, different case and duplicate name with another id
        docs.push_back(new_upload(10, "manual-calidad-v3.pdf", 10, NaiveDate::default(), None)).unwrap();
        docs.push_back(new_upload(11, "Manual-Calidad-v3.pdf", 10, NaiveDate::default(), None)).unwrap();

        let asc = list_documents(&docs, &DocumentQuery::default());
        let mut desc = list_documents(&docs, &DocumentQuery { sort: DocumentSort::NameDesc, ..Default::default() });
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_date_sorts() {
        let newest = list_documents(&library(), &DocumentQuery { sort: DocumentSort::DateNew, ..Default::default() });
        assert_eq!(newest.first().map(|d| d.id), Some(1));
        assert_eq!(newest.last().map(|d| d.id), Some(3));

        let oldest = list_documents(&library(), &DocumentQuery { sort: DocumentSort::DateOld, ..Default::default() });
        assert_eq!(oldest.first().map(|d| d.id), Some(3));
    }

    #[test]
    fn test_query_leaves_base_order() {
        let docs = library();
        let _ = list_documents(&docs, &DocumentQuery { sort: DocumentSort::NameDesc, ..Default::default() });
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_upload_derivation() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let doc = new_upload(99, "Plano.pdf", 800_000, today, Some("blob:abc".to_string()));
        assert_eq!(doc.size, "781 KB");
        assert_eq!(doc.category, DocumentCategory::Formato);
        assert_eq!(doc.date, today);
        assert_eq!(view_action(&doc), ViewAction::OpenInTab("blob:abc".to_string()));
    }

    #[test]
    fn test_delete_revokes_handle_once() {
        let releaser = RecordingReleaser::default();
        let mut docs = library();
        docs.insert_front(new_upload(42, "a.png", 2048, NaiveDate::default(), Some("blob:a".to_string()))).unwrap();

        assert!(delete_document(&mut docs, 42, &releaser).is_some());
        assert!(delete_document(&mut docs, 42, &releaser).is_none());
        assert_eq!(*releaser.revoked.borrow(), vec!["blob:a".to_string()]);
        assert_eq!(docs.len(), 5);
    }

    #[test]
    fn test_deferred_release_waits_for_run() {
        let releaser = RecordingReleaser::default();
        let pending = DeferredRelease::new("blob:summary".to_string(), &releaser);
        assert!(releaser.revoked.borrow().is_empty());

        pending.run();
        assert_eq!(*releaser.revoked.borrow(), vec!["blob:summary".to_string()]);
    }

    #[test]
    fn test_delete_seed_revokes_nothing() {
        let releaser = RecordingReleaser::default();
        let mut docs = library();
        assert!(delete_document(&mut docs, 3, &releaser).is_some());
        assert!(releaser.revoked.borrow().is_empty());
    }

    #[test]
    fn test_seed_download_is_summary() {
        let docs = library();
        match download_action(docs.get(1).unwrap()) {
            DownloadAction::Summary { file_name, contents } => {
                assert_eq!(file_name, "Manual-Calidad-v3_detalles.txt");
                assert!(contents.contains("Tipo: Manual"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
