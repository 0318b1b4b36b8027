use std::{fs, path::Path, sync::Arc};

use anyhow::{anyhow, Result as Fallible};
use parking_lot::RwLock;
use pde_core::{
    db::{Indexer, TipIndex, TipIndexQuery, TipIndexer},
    entities::{Id, Tip},
};
use tantivy::{
    collector::TopDocs,
    directory::MmapDirectory,
    query::{BooleanQuery, FuzzyTermQuery, Occur, Query, TermQuery},
    schema::*,
    tokenizer::{
        AsciiFoldingFilter, LowerCaser, RawTokenizer, RemoveLongFilter, SimpleTokenizer,
        TextAnalyzer, TokenStream,
    },
    DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Score, TantivyDocument, Term,
};

const OVERALL_INDEX_HEAP_SIZE_IN_BYTES: usize = 50_000_000;

const ID_TOKENIZER: &str = "raw";
const TAG_TOKENIZER: &str = "tag";
const TEXT_TOKENIZER: &str = "folded";

// Words that are longer are dropped by the text tokenizer
const MAX_TOKEN_LEN: usize = 40;

const MAX_TEXT_EDIT_DISTANCE: u8 = 2;
const MAX_TAG_EDIT_DISTANCE: u8 = 1;

struct TipFields {
    id: Field,
    community_id: Field,
    title: Field,
    description: Field,
    address: Field,
    tag: Field,
}

impl TipFields {
    fn text_fields(&self) -> [Field; 3] {
        [self.title, self.description, self.address]
    }

    fn tip_id(&self, doc: &TantivyDocument) -> Option<Id> {
        doc.get_first(self.id)
            .and_then(|v| v.as_str())
            .map(Id::from)
    }
}

pub(crate) struct TantivyTipIndex {
    fields: TipFields,
    index: Index,
    reader: IndexReader,
    writer: IndexWriter,
}

fn build_schema() -> (Schema, TipFields) {
    let id_options = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(ID_TOKENIZER)
                .set_index_option(IndexRecordOption::Basic),
        )
        .set_stored();
    let community_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(ID_TOKENIZER)
            .set_index_option(IndexRecordOption::Basic),
    );
    let tag_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TAG_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqs),
    );
    let text_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TEXT_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );
    let mut schema_builder = SchemaBuilder::default();
    let id = schema_builder.add_text_field("id", id_options);
    let community_id = schema_builder.add_text_field("community_id", community_options);
    let title = schema_builder.add_text_field("title", text_options.clone());
    let description = schema_builder.add_text_field("description", text_options.clone());
    let address = schema_builder.add_text_field("address", text_options);
    let tag = schema_builder.add_text_field("tag", tag_options);
    let schema = schema_builder.build();
    let fields = TipFields {
        id,
        community_id,
        title,
        description,
        address,
        tag,
    };
    (schema, fields)
}

fn register_tokenizers(index: &Index) {
    // Predefined tokenizers
    debug_assert!(index.tokenizers().get(ID_TOKENIZER).is_some());
    // Custom tokenizers
    index.tokenizers().register(
        TAG_TOKENIZER,
        TextAnalyzer::builder(RawTokenizer::default())
            .filter(LowerCaser)
            .build(),
    );
    // Accents are folded to match "panaderia" and "panadería"
    index.tokenizers().register(
        TEXT_TOKENIZER,
        TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .filter(AsciiFoldingFilter)
            .build(),
    );
}

/// Shorter words tolerate fewer typos.
fn edit_distance(term: &str, max_distance: u8) -> u8 {
    let len = term.chars().count();
    let distance = if len <= 2 {
        0
    } else if len <= 4 {
        1
    } else {
        2
    };
    distance.min(max_distance)
}

fn fuzzy_query(term: Term, distance: u8) -> Box<dyn Query> {
    if distance == 0 {
        Box::new(TermQuery::new(term, IndexRecordOption::Basic))
    } else {
        Box::new(FuzzyTermQuery::new(term, distance, true))
    }
}

impl TantivyTipIndex {
    pub(crate) fn create_in_ram() -> Fallible<Self> {
        let (schema, fields) = build_schema();
        log::warn!("Creating full-text search index in RAM");
        let index = Index::create_in_ram(schema);
        Self::create(index, fields)
    }

    pub(crate) fn open_or_create<P: AsRef<Path>>(path: P) -> Fallible<Self> {
        let (schema, fields) = build_schema();
        let path = path.as_ref();
        log::info!(
            "Opening full-text search index in directory: {}",
            path.display()
        );
        fs::create_dir_all(path)?;
        let index = Index::open_or_create(MmapDirectory::open(path)?, schema)?;
        Self::create(index, fields)
    }

    fn create(index: Index, fields: TipFields) -> Fallible<Self> {
        register_tokenizers(&index);
        let writer = index.writer(OVERALL_INDEX_HEAP_SIZE_IN_BYTES)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        Ok(Self {
            fields,
            index,
            reader,
            writer,
        })
    }

    fn analyze(&self, field: Field, text: &str) -> Fallible<Vec<String>> {
        let mut analyzer = self.index.tokenizer_for_field(field)?;
        let mut token_stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        while token_stream.advance() {
            terms.push(token_stream.token().text.clone());
        }
        Ok(terms)
    }

    fn text_query(&self, text: &str) -> Fallible<Option<BooleanQuery>> {
        let mut sub_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        // All text fields share the same tokenizer
        for term in self.analyze(self.fields.title, text)? {
            let distance = edit_distance(&term, MAX_TEXT_EDIT_DISTANCE);
            for field in self.fields.text_fields() {
                let term = Term::from_field_text(field, &term);
                sub_queries.push((Occur::Should, fuzzy_query(term, distance)));
            }
        }
        for word in text.split_whitespace() {
            let tag = word.to_lowercase();
            let distance = edit_distance(&tag, MAX_TAG_EDIT_DISTANCE);
            let term = Term::from_field_text(self.fields.tag, &tag);
            sub_queries.push((Occur::Should, fuzzy_query(term, distance)));
        }
        if sub_queries.is_empty() {
            return Ok(None);
        }
        Ok(Some(BooleanQuery::from(sub_queries)))
    }

    fn scope_query(&self, community_ids: &[Id]) -> BooleanQuery {
        let sub_queries = community_ids
            .iter()
            .map(|id| {
                let term = Term::from_field_text(self.fields.community_id, id.as_str());
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                (Occur::Should, query)
            })
            .collect::<Vec<_>>();
        BooleanQuery::from(sub_queries)
    }

    fn query_tip_ids(&self, query: &TipIndexQuery) -> Fallible<Vec<Id>> {
        let TipIndexQuery {
            text,
            community_ids,
        } = query;
        if community_ids.as_ref().map(Vec::is_empty).unwrap_or(false) {
            return Ok(vec![]);
        }
        let Some(text_query) = self.text_query(text)? else {
            return Ok(vec![]);
        };
        let mut sub_queries: Vec<(Occur, Box<dyn Query>)> =
            vec![(Occur::Must, Box::new(text_query) as Box<dyn Query>)];
        if let Some(community_ids) = community_ids {
            let scope_query: Box<dyn Query> = Box::new(self.scope_query(community_ids));
            sub_queries.push((Occur::Must, scope_query));
        }
        let query = BooleanQuery::from(sub_queries);
        let searcher = self.reader.searcher();
        let limit = usize::try_from(searcher.num_docs())?.max(1);
        let top_docs: Vec<(Score, DocAddress)> =
            searcher.search(&query, &TopDocs::with_limit(limit))?;
        top_docs
            .into_iter()
            .map(|(_score, doc_addr)| {
                let doc = searcher.doc::<TantivyDocument>(doc_addr)?;
                self.fields
                    .tip_id(&doc)
                    .ok_or_else(|| anyhow!("Missing tip id in document {doc_addr:?}"))
            })
            .collect()
    }

    fn add_or_update_tip(&self, tip: &Tip) -> Fallible<()> {
        let id_term = Term::from_field_text(self.fields.id, tip.id.as_str());
        self.writer.delete_term(id_term);
        let mut doc = TantivyDocument::default();
        doc.add_text(self.fields.id, tip.id.as_str());
        doc.add_text(self.fields.community_id, tip.community_id.as_str());
        doc.add_text(self.fields.title, &tip.title);
        doc.add_text(self.fields.description, &tip.description);
        if let Some(address) = tip.address() {
            doc.add_text(self.fields.address, address);
        }
        for tag in &tip.tags {
            doc.add_text(self.fields.tag, tag);
        }
        self.writer.add_document(doc)?;
        Ok(())
    }

    fn remove_by_id(&self, id: &Id) -> Fallible<()> {
        let id_term = Term::from_field_text(self.fields.id, id.as_str());
        self.writer.delete_term(id_term);
        Ok(())
    }

    fn remove_all(&self) -> Fallible<()> {
        self.writer.delete_all_documents()?;
        Ok(())
    }

    fn flush(&mut self) -> Fallible<()> {
        self.writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }
}

/// Thread-safe handle of the full-text search index for tips.
#[derive(Clone)]
pub struct SearchEngine(Arc<RwLock<TantivyTipIndex>>);

impl SearchEngine {
    pub fn init_in_ram() -> Fallible<SearchEngine> {
        let tip_index = TantivyTipIndex::create_in_ram()?;
        Ok(SearchEngine(Arc::new(RwLock::new(tip_index))))
    }

    /// Falls back to an index in RAM if no path is given.
    pub fn init_with_path<P: AsRef<Path>>(path: Option<P>) -> Fallible<SearchEngine> {
        let tip_index = match path {
            Some(path) => TantivyTipIndex::open_or_create(path)?,
            None => TantivyTipIndex::create_in_ram()?,
        };
        Ok(SearchEngine(Arc::new(RwLock::new(tip_index))))
    }
}

impl TipIndex for SearchEngine {
    fn query_tip_ids(&self, query: &TipIndexQuery) -> Fallible<Vec<Id>> {
        self.0.read().query_tip_ids(query)
    }
}

impl TipIndexer for SearchEngine {
    fn add_or_update_tip(&self, tip: &Tip) -> Fallible<()> {
        self.0.read().add_or_update_tip(tip)
    }

    fn remove_by_id(&self, id: &Id) -> Fallible<()> {
        self.0.read().remove_by_id(id)
    }

    fn remove_all(&self) -> Fallible<()> {
        self.0.read().remove_all()
    }
}

impl Indexer for SearchEngine {
    fn flush_index(&mut self) -> Fallible<()> {
        self.0.write().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pde_core::entities::GeoPoint;
    use pde_entities::builders::*;

    fn query(text: &str) -> TipIndexQuery {
        TipIndexQuery {
            text: text.into(),
            community_ids: None,
        }
    }

    fn sorted(mut ids: Vec<Id>) -> Vec<String> {
        ids.sort();
        ids.into_iter().map(Into::into).collect()
    }

    fn fixture() -> SearchEngine {
        let mut engine = SearchEngine::init_in_ram().unwrap();
        let tips = vec![
            Tip::build()
                .id("farmacia")
                .community("santiago")
                .title("Farmacia Ahumada 24 Horas")
                .pin(GeoPoint::from_lng_lat_deg(-70.65, -33.44), "Alameda 100")
                .finish(),
            Tip::build()
                .id("panaderia")
                .community("santiago")
                .title("Panadería La Espiga")
                .description("Marraquetas calientes")
                .tags(vec!["pan"])
                .text()
                .finish(),
            Tip::build()
                .id("feria")
                .community("valpo")
                .title("Feria de las pulgas")
                .tags(vec!["ropa"])
                .text()
                .finish(),
        ];
        for tip in &tips {
            engine.add_or_update_tip(tip).unwrap();
        }
        engine.flush_index().unwrap();
        engine
    }

    #[test]
    fn find_misspelled_title() {
        let engine = fixture();
        let ids = engine.query_tip_ids(&query("farmasia")).unwrap();
        assert_eq!(vec!["farmacia"], sorted(ids));
    }

    #[test]
    fn find_without_accents() {
        let engine = fixture();
        let ids = engine.query_tip_ids(&query("panaderia")).unwrap();
        assert_eq!(vec!["panaderia"], sorted(ids));
        let ids = engine.query_tip_ids(&query("MARRAQUETAS")).unwrap();
        assert_eq!(vec!["panaderia"], sorted(ids));
    }

    #[test]
    fn find_by_address_and_tag() {
        let engine = fixture();
        let ids = engine.query_tip_ids(&query("alameda")).unwrap();
        assert_eq!(vec!["farmacia"], sorted(ids));
        let ids = engine.query_tip_ids(&query("ropa")).unwrap();
        assert_eq!(vec!["feria"], sorted(ids));
    }

    #[test]
    fn match_any_word() {
        let engine = fixture();
        let ids = engine.query_tip_ids(&query("pulgas espiga")).unwrap();
        assert_eq!(vec!["feria", "panaderia"], sorted(ids));
    }

    #[test]
    fn restrict_to_communities() {
        let engine = fixture();
        let q = TipIndexQuery {
            text: "feria panaderia".into(),
            community_ids: Some(vec!["santiago".into()]),
        };
        assert_eq!(vec!["panaderia"], sorted(engine.query_tip_ids(&q).unwrap()));
        let q = TipIndexQuery {
            text: "feria".into(),
            community_ids: Some(vec![]),
        };
        assert!(engine.query_tip_ids(&q).unwrap().is_empty());
    }

    #[test]
    fn update_and_remove() {
        let mut engine = fixture();
        let renamed = Tip::build()
            .id("feria")
            .community("valpo")
            .title("Mercado persa")
            .text()
            .finish();
        engine.add_or_update_tip(&renamed).unwrap();
        engine.flush_index().unwrap();
        assert!(engine.query_tip_ids(&query("pulgas")).unwrap().is_empty());
        assert_eq!(
            vec!["feria"],
            sorted(engine.query_tip_ids(&query("persa")).unwrap())
        );
        engine.remove_by_id(&"feria".into()).unwrap();
        engine.flush_index().unwrap();
        assert!(engine.query_tip_ids(&query("persa")).unwrap().is_empty());
    }

    #[test]
    fn blank_text_matches_nothing() {
        let engine = fixture();
        assert!(engine.query_tip_ids(&query("  ")).unwrap().is_empty());
    }

    #[test]
    fn documents_without_tip_id_are_rejected() {
        let (_schema, fields) = build_schema();
        let mut doc = TantivyDocument::default();
        doc.add_text(fields.title, "Farmacia");
        assert!(fields.tip_id(&doc).is_none());
        doc.add_text(fields.id, "t");
        assert_eq!(Some(Id::from("t")), fields.tip_id(&doc));
    }
}
