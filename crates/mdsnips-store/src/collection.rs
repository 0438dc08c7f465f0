//! The snippet document collection.
//!
//! A thin layer over a single Tantivy index that behaves like a document
//! collection: insert-one, find-one, find-many with text query/sort/skip/limit,
//! update-one and delete-one, all keyed by the `id` field. Every write commits
//! and reloads the reader before returning, so the next read sees it.
//!
//! All methods block. Async callers go through [`crate::IndexSnippetStore`].

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{AllQuery, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value};
use tantivy::{
    DocAddress, Index, IndexReader, IndexWriter, Order, ReloadPolicy, Searcher, TantivyDocument,
    Term,
};
use tracing::{debug, info, warn};

use mdsnips_core::models::search::SortBy;
use mdsnips_core::models::snippet::SnippetRecord;
use mdsnips_core::schema::{
    build_schema, decode_create_date, encode_create_date, field, TEXT_INDEX_FIELDS,
};

use crate::error::StoreError;

const WRITER_MEMORY_BUDGET: usize = 50_000_000;

#[derive(Debug, Clone, Copy)]
struct Fields {
    id: Field,
    title: Field,
    body: Field,
    update_key: Field,
    create_date: Field,
}

impl Fields {
    fn resolve(schema: &Schema) -> Result<Self, StoreError> {
        let lookup = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| StoreError::SchemaMismatch {
                    index: format!("field `{name}`"),
                })
        };
        Ok(Self {
            id: lookup(field::ID)?,
            title: lookup(field::TITLE)?,
            body: lookup(field::BODY)?,
            update_key: lookup(field::UPDATE_KEY)?,
            create_date: lookup(field::CREATE_DATE)?,
        })
    }
}

struct Inner {
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    fields: Fields,
}

/// Shared handle to the snippet collection. Cheap to clone; construct once
/// per process.
#[derive(Clone)]
pub struct Collection {
    inner: Arc<Inner>,
}

impl Collection {
    /// Open the collection stored in `dir`, creating it if the directory holds
    /// no index yet.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let directory = MmapDirectory::open(dir)?;
        let index = Index::open_or_create(directory, build_schema())?;
        info!("opened snippet collection at {:?}", dir);
        Self::from_index(index)
    }

    /// Open a throwaway collection held entirely in memory.
    pub fn open_in_ram() -> Result<Self, StoreError> {
        info!("opened in-memory snippet collection");
        Self::from_index(Index::create_in_ram(build_schema()))
    }

    fn from_index(index: Index) -> Result<Self, StoreError> {
        let fields = Fields::resolve(&index.schema())?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let writer = index.writer(WRITER_MEMORY_BUDGET)?;

        Ok(Self {
            inner: Arc::new(Inner {
                index,
                reader,
                writer: Mutex::new(writer),
                fields,
            }),
        })
    }

    /// Check that the compound text index over title + body and the ordered
    /// index over createDate are present. Safe to call any number of times.
    pub fn ensure_indexes(&self) -> Result<(), StoreError> {
        let schema = self.inner.index.schema();
        let fields = self.inner.fields;

        for (name, handle) in TEXT_INDEX_FIELDS.iter().zip([fields.title, fields.body]) {
            if !schema.get_field_entry(handle).is_indexed() {
                return Err(StoreError::SchemaMismatch {
                    index: format!("text index on `{name}`"),
                });
            }
        }

        let create_date = schema.get_field_entry(fields.create_date);
        if !(create_date.is_indexed() && create_date.is_fast()) {
            return Err(StoreError::SchemaMismatch {
                index: format!("ordered index on `{}`", field::CREATE_DATE),
            });
        }

        debug!("snippet collection indexes verified");
        Ok(())
    }

    /// Number of live documents as of the last commit.
    pub fn count(&self) -> u64 {
        self.inner.reader.searcher().num_docs()
    }

    /// Insert a new document. Fails with [`StoreError::Conflict`] if a
    /// document with the same id already exists.
    pub fn insert_one(&self, record: &SnippetRecord) -> Result<(), StoreError> {
        let mut writer = self.lock_writer()?;

        let searcher = self.inner.reader.searcher();
        if self.find_address(&searcher, &record.id)?.is_some() {
            return Err(StoreError::Conflict {
                id: record.id.clone(),
            });
        }

        self.write(&mut writer, |w| {
            w.add_document(self.to_document(record))?;
            Ok(())
        })
    }

    /// Find a single document by id.
    pub fn find_one(&self, id: &str) -> Result<Option<SnippetRecord>, StoreError> {
        let searcher = self.inner.reader.searcher();
        match self.find_address(&searcher, id)? {
            Some(address) => {
                let doc = searcher.doc::<TantivyDocument>(address)?;
                Ok(Some(self.from_document(&doc)?))
            }
            None => Ok(None),
        }
    }

    /// Read only the stored update key of a document.
    pub fn find_update_key(&self, id: &str) -> Result<Option<String>, StoreError> {
        let searcher = self.inner.reader.searcher();
        let Some(address) = self.find_address(&searcher, id)? else {
            return Ok(None);
        };
        let doc = searcher.doc::<TantivyDocument>(address)?;
        Ok(Some(self.text(&doc, self.inner.fields.update_key, field::UPDATE_KEY)?))
    }

    /// Every live document, in segment order.
    pub fn find_all(&self) -> Result<Vec<SnippetRecord>, StoreError> {
        let searcher = self.inner.reader.searcher();
        let mut records = Vec::new();

        for (segment_ord, segment_reader) in searcher.segment_readers().iter().enumerate() {
            for doc_id in segment_reader.doc_ids_alive() {
                let address = DocAddress::new(segment_ord as u32, doc_id);
                let doc = searcher.doc::<TantivyDocument>(address)?;
                records.push(self.from_document(&doc)?);
            }
        }

        Ok(records)
    }

    /// Text search over title + body, sorted by createDate, offset paginated.
    ///
    /// With no `text`, every document matches. The query is parsed leniently so
    /// arbitrary user input never fails to parse.
    pub fn find_many(
        &self,
        text: Option<&str>,
        sort_by: SortBy,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<SnippetRecord>, StoreError> {
        let searcher = self.inner.reader.searcher();

        // The collector sizes its heap from `skip + limit`, so both are
        // bounded by the live document count before it is built.
        let num_docs = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX);
        if limit == 0 || skip >= num_docs {
            return Ok(Vec::new());
        }
        let limit = limit.min(num_docs - skip);

        let query: Box<dyn Query> = match text {
            Some(text) => {
                let fields = self.inner.fields;
                let parser =
                    QueryParser::for_index(&self.inner.index, vec![fields.title, fields.body]);
                let (query, errors) = parser.parse_query_lenient(text);
                if !errors.is_empty() {
                    debug!(count = errors.len(), "ignored query syntax errors");
                }
                query
            }
            None => Box::new(AllQuery),
        };

        let order = if sort_by.is_descending() {
            Order::Desc
        } else {
            Order::Asc
        };
        let collector = TopDocs::with_limit(limit)
            .and_offset(skip)
            .order_by_fast_field::<i64>(field::CREATE_DATE, order);

        let top_docs = searcher.search(query.as_ref(), &collector)?;

        let mut records = Vec::with_capacity(top_docs.len());
        for (_create_date, address) in top_docs {
            let doc = searcher.doc::<TantivyDocument>(address)?;
            records.push(self.from_document(&doc)?);
        }
        Ok(records)
    }

    /// Replace title and body of an existing document, preserving id, update
    /// key and creation date. Returns `None` if no document has `id`.
    pub fn update_one(
        &self,
        id: &str,
        title: &str,
        body: &str,
    ) -> Result<Option<SnippetRecord>, StoreError> {
        let mut writer = self.lock_writer()?;

        let Some(mut record) = self.find_one(id)? else {
            return Ok(None);
        };
        record.title = title.to_string();
        record.body = body.to_string();

        // Tantivy has no in-place update: delete by id, then re-add.
        self.write(&mut writer, |w| {
            w.delete_term(self.id_term(id));
            w.add_document(self.to_document(&record))?;
            Ok(())
        })?;

        Ok(Some(record))
    }

    /// Remove a document whose stored update key equals `update_key`.
    /// Returns whether a document was removed.
    pub fn delete_one(&self, id: &str, update_key: &str) -> Result<bool, StoreError> {
        let mut writer = self.lock_writer()?;

        match self.find_update_key(id)? {
            Some(stored) if stored == update_key => {
                self.write(&mut writer, |w| {
                    w.delete_term(self.id_term(id));
                    Ok(())
                })?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, IndexWriter>, StoreError> {
        self.inner
            .writer
            .lock()
            .map_err(|_| StoreError::Task("index writer lock poisoned".to_string()))
    }

    /// Stage operations with `stage`, then commit. On any failure the staged
    /// operations are rolled back so a later commit cannot apply them.
    fn write<F>(&self, writer: &mut IndexWriter, stage: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut IndexWriter) -> Result<(), StoreError>,
    {
        let result = stage(&mut *writer).and_then(|()| self.commit(writer));
        if result.is_err() {
            if let Err(e) = writer.rollback() {
                warn!(error = %e, "index writer rollback failed");
            }
        }
        result
    }

    fn commit(&self, writer: &mut IndexWriter) -> Result<(), StoreError> {
        writer.commit()?;
        self.inner.reader.reload()?;
        Ok(())
    }

    fn id_term(&self, id: &str) -> Term {
        Term::from_field_text(self.inner.fields.id, id)
    }

    fn find_address(
        &self,
        searcher: &Searcher,
        id: &str,
    ) -> Result<Option<DocAddress>, StoreError> {
        let query = TermQuery::new(self.id_term(id), IndexRecordOption::Basic);
        let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
        Ok(top_docs.first().map(|(_score, address)| *address))
    }

    fn to_document(&self, record: &SnippetRecord) -> TantivyDocument {
        let fields = self.inner.fields;
        let mut doc = TantivyDocument::default();
        doc.add_text(fields.id, &record.id);
        doc.add_text(fields.title, &record.title);
        doc.add_text(fields.body, &record.body);
        doc.add_text(fields.update_key, &record.update_key);
        doc.add_i64(fields.create_date, encode_create_date(record.create_date));
        doc
    }

    fn from_document(&self, doc: &TantivyDocument) -> Result<SnippetRecord, StoreError> {
        let fields = self.inner.fields;
        let micros = doc
            .get_first(fields.create_date)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| StoreError::Corrupted(format!("missing {}", field::CREATE_DATE)))?;

        Ok(SnippetRecord {
            id: self.text(doc, fields.id, field::ID)?,
            title: self.text(doc, fields.title, field::TITLE)?,
            body: self.text(doc, fields.body, field::BODY)?,
            update_key: self.text(doc, fields.update_key, field::UPDATE_KEY)?,
            create_date: decode_create_date(micros)?,
        })
    }

    fn text(&self, doc: &TantivyDocument, handle: Field, name: &str) -> Result<String, StoreError> {
        doc.get_first(handle)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| StoreError::Corrupted(format!("missing {name}")))
    }
}
