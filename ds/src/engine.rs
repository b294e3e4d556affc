//! Search & retrieval engine
//!
//! Wraps a [`DocumentStore`] and a match index built once at construction.
//! Each document contributes two searchable fields: its content (primary)
//! and its id (secondary, lower weight).

use std::fmt;

use tracing::{debug, info};

use crate::fold::FoldedText;
use crate::fuzzy::{self, FuzzyMatch};
use crate::preview::{self, CharIndexed};
use crate::{DocError, DocumentStore, SearchConfig};

/// Sentinel returned by `list_documents` for an empty corpus
pub const NO_DOCUMENTS: &str = "No documents available.";

/// Score added (before normalising by query length) when a span starts mid-word
const BOUNDARY_PENALTY: f64 = 0.5;

/// Which searchable field a span was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Content,
    Name,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => write!(f, "content"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// A matched char range in one field of a document (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub field: Field,
    pub start: usize,
    pub end: usize,
    /// Edit distance between the query and the matched text
    pub distance: usize,
}

/// One ranked document in a search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub document_id: String,
    /// Combined weighted score in `[0, 1]`, lower is better
    pub score: f64,
    /// Content spans by position, then name spans by position
    pub spans: Vec<MatchSpan>,
}

/// Pre-folded fields of one document
#[derive(Debug)]
struct IndexedDocument {
    content: FoldedText,
    name: FoldedText,
}

/// Read-only query service over a fixed document set
#[derive(Debug)]
pub struct SearchEngine {
    store: DocumentStore,
    index: Vec<IndexedDocument>,
    config: SearchConfig,
}

impl SearchEngine {
    /// Validate the config and build the match index over every document
    pub fn new(store: DocumentStore, config: SearchConfig) -> Result<Self, DocError> {
        debug!(document_count = store.len(), "SearchEngine::new: called");
        config.validate()?;

        let index = store
            .documents()
            .iter()
            .map(|doc| IndexedDocument {
                content: FoldedText::new(&doc.content),
                name: FoldedText::new(&doc.id),
            })
            .collect();

        info!(document_count = store.len(), "Search index built");
        Ok(Self { store, index, config })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Every document id with a leading preview of its content
    pub fn list_documents(&self) -> String {
        debug!("SearchEngine::list_documents: called");
        if self.store.is_empty() {
            debug!("SearchEngine::list_documents: empty store");
            return NO_DOCUMENTS.to_string();
        }

        self.store
            .list_all()
            .map(|(id, content)| {
                format!(
                    "--- {} ---\n{}...",
                    id,
                    preview::document_preview(content, self.config.preview)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Full content of the document with exactly this id
    pub fn get_document(&self, id: &str) -> Result<&str, DocError> {
        debug!(%id, "SearchEngine::get_document: called");
        if id.is_empty() {
            return Err(DocError::InvalidArgument("name must not be empty".to_string()));
        }

        self.store.get(id).ok_or_else(|| {
            debug!(%id, "SearchEngine::get_document: not found");
            DocError::NotFound { id: id.to_string() }
        })
    }

    /// Ranked fuzzy matches for `query`, best first
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, DocError> {
        debug!(%query, "SearchEngine::search: called");
        let query = query.trim();
        if query.is_empty() {
            return Err(DocError::InvalidArgument("query must not be empty".to_string()));
        }

        let pattern = FoldedText::new(query);
        if pattern.is_empty() {
            return Err(DocError::InvalidArgument(format!(
                "query has no searchable characters: {:?}",
                query
            )));
        }

        let max_distance = self.config.max_distance(pattern.len());
        debug!(pattern_len = pattern.len(), %max_distance, "SearchEngine::search: matching");

        let mut ranked: Vec<(usize, SearchHit)> = Vec::new();
        for (position, (doc, indexed)) in self.store.documents().iter().zip(&self.index).enumerate() {
            let content_matches = fuzzy::find_matches(pattern.chars(), indexed.content.chars(), max_distance);
            let name_matches = fuzzy::find_matches(pattern.chars(), indexed.name.chars(), max_distance);
            if content_matches.is_empty() && name_matches.is_empty() {
                continue;
            }

            let content_score = field_score(
                &indexed.content,
                &content_matches,
                pattern.len(),
                self.config.content_weight,
            );
            let name_score = field_score(&indexed.name, &name_matches, pattern.len(), self.config.name_weight);
            let score = content_score.min(name_score);

            let spans = to_spans(Field::Content, &indexed.content, &content_matches)
                .chain(to_spans(Field::Name, &indexed.name, &name_matches))
                .collect();

            ranked.push((
                position,
                SearchHit {
                    document_id: doc.id.clone(),
                    score,
                    spans,
                },
            ));
        }

        ranked.sort_by(|(pos_a, a), (pos_b, b)| a.score.total_cmp(&b.score).then(pos_a.cmp(pos_b)));
        debug!(hit_count = ranked.len(), "SearchEngine::search: ranked");

        Ok(ranked.into_iter().map(|(_, hit)| hit).collect())
    }

    /// Formatted search response with highlighted previews
    pub fn search_documents(&self, query: &str) -> Result<String, DocError> {
        debug!(%query, "SearchEngine::search_documents: called");
        let hits = self.search(query)?;
        let query = query.trim();

        if hits.is_empty() {
            debug!("SearchEngine::search_documents: no matches");
            return Ok(format!("No matches found for \"{}\".", query));
        }

        let total: usize = hits.iter().map(|hit| hit.spans.len()).sum();
        let blocks: Vec<String> = hits.iter().map(|hit| self.format_hit(hit)).collect();

        Ok(format!(
            "Found {} {} for \"{}\":\n\n{}",
            total,
            if total == 1 { "match" } else { "matches" },
            query,
            blocks.join("\n\n")
        ))
    }

    fn format_hit(&self, hit: &SearchHit) -> String {
        let content = CharIndexed::new(self.store.get(&hit.document_id).unwrap_or_default());
        let name = CharIndexed::new(&hit.document_id);
        let context = self.config.context_chars;

        let mut lines = vec![format!("--- {} ---", hit.document_id)];
        for span in &hit.spans {
            match span.field {
                Field::Content => lines.push(content.highlight(span.start, span.end, context)),
                Field::Name => lines.push(format!("name: {}", name.highlight(span.start, span.end, context))),
            }
        }
        lines.join("\n")
    }
}

/// Weighted score of a field's best span, or 1.0 (worst) when it has none
fn field_score(text: &FoldedText, matches: &[FuzzyMatch], pattern_len: usize, weight: f64) -> f64 {
    let best = matches
        .iter()
        .map(|m| span_score(text, m, pattern_len))
        .min_by(f64::total_cmp);

    match best {
        Some(score) => 1.0 - weight * (1.0 - score),
        None => 1.0,
    }
}

fn span_score(text: &FoldedText, m: &FuzzyMatch, pattern_len: usize) -> f64 {
    let penalty = if text.is_word_start(m.start) { 0.0 } else { BOUNDARY_PENALTY };
    ((m.distance as f64 + penalty) / pattern_len as f64).min(1.0)
}

fn to_spans<'a>(field: Field, text: &'a FoldedText, matches: &'a [FuzzyMatch]) -> impl Iterator<Item = MatchSpan> + 'a {
    matches.iter().map(move |m| {
        let (start, end) = text.original_span(m.start, m.end);
        MatchSpan {
            field,
            start,
            end,
            distance: m.distance,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreviewMode;

    fn engine(docs: &[(&str, &str)]) -> SearchEngine {
        SearchEngine::new(DocumentStore::from_documents(docs.iter().copied()), SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let config = SearchConfig {
            threshold: -0.1,
            ..Default::default()
        };
        let result = SearchEngine::new(DocumentStore::default(), config);
        assert!(matches!(result, Err(DocError::Build(_))));
    }

    #[test]
    fn test_list_documents_format() {
        let engine = engine(&[("a.md", "Alpha"), ("b.md", "Beta")]);
        assert_eq!(engine.list_documents(), "--- a.md ---\nAlpha...\n\n--- b.md ---\nBeta...");
    }

    #[test]
    fn test_list_documents_truncates_preview() {
        let long = "x".repeat(500);
        let engine = engine(&[("long.md", &long)]);

        let listing = engine.list_documents();
        assert_eq!(listing, format!("--- long.md ---\n{}...", "x".repeat(200)));
    }

    #[test]
    fn test_list_documents_by_lines() {
        let config = SearchConfig {
            preview: PreviewMode::Lines(2),
            ..Default::default()
        };
        let store = DocumentStore::from_documents([("a.md", "one\ntwo\nthree")]);
        let engine = SearchEngine::new(store, config).unwrap();

        assert_eq!(engine.list_documents(), "--- a.md ---\none\ntwo...");
    }

    #[test]
    fn test_empty_corpus() {
        let engine = engine(&[]);

        assert_eq!(engine.list_documents(), NO_DOCUMENTS);
        assert_eq!(
            engine.search_documents("anything").unwrap(),
            "No matches found for \"anything\"."
        );
    }

    #[test]
    fn test_get_document_round_trip() {
        let content = "# Título\n\n  indented ✓\r\n";
        let engine = engine(&[("docs/intro.md", content)]);
        assert_eq!(engine.get_document("docs/intro.md").unwrap(), content);
    }

    #[test]
    fn test_get_document_not_found() {
        let engine = engine(&[("a.md", "text")]);

        let err = engine.get_document("nonexistent/path.md").unwrap_err();
        assert_eq!(
            err,
            DocError::NotFound {
                id: "nonexistent/path.md".to_string()
            }
        );
        assert!(err.to_string().contains("list_docs"));
    }

    #[test]
    fn test_get_document_empty_id() {
        let engine = engine(&[("a.md", "text")]);
        assert!(matches!(engine.get_document(""), Err(DocError::InvalidArgument(_))));
    }

    #[test]
    fn test_search_empty_query() {
        let engine = engine(&[("a.md", "text")]);
        assert!(matches!(engine.search(""), Err(DocError::InvalidArgument(_))));
        assert!(matches!(engine.search_documents("   "), Err(DocError::InvalidArgument(_))));
    }

    #[test]
    fn test_search_scenario_install() {
        let engine = engine(&[("a.md", "Install the CLI with npm"), ("b.md", "Uninstall procedure is manual")]);

        let hits = engine.search("install").unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.document_id.as_str()).collect();
        assert_eq!(ids, vec!["a.md", "b.md"]);
        assert!(hits[0].score <= hits[1].score);
    }

    #[test]
    fn test_search_ranks_word_start_above_mid_word() {
        // b.md comes first in store order but only has a mid-word hit
        let engine = engine(&[("b.md", "Uninstall procedure is manual"), ("a.md", "Install the CLI with npm")]);

        let hits = engine.search("install").unwrap();
        assert_eq!(hits[0].document_id, "a.md");
        assert!(hits[0].score < hits[1].score);
    }

    #[test]
    fn test_search_ties_keep_document_order() {
        let engine = engine(&[("z.md", "setup guide"), ("a.md", "setup guide")]);

        let hits = engine.search("setup").unwrap();
        assert_eq!(hits[0].document_id, "z.md");
        assert_eq!(hits[1].document_id, "a.md");
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn test_search_tolerates_misspelling() {
        let engine = engine(&[("guide.md", "Follow the installation steps below.")]);

        let hits = engine.search("instalation").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document_id, "guide.md");
        assert_eq!(hits[0].spans[0].distance, 1);
    }

    #[test]
    fn test_search_case_and_diacritic_insensitive() {
        let engine = engine(&[("fr.md", "La Crème Brûlée est prête")]);

        let hits = engine.search("CREME brulee").unwrap();
        assert_eq!(hits.len(), 1);
        let span = hits[0].spans[0];
        assert_eq!(span.field, Field::Content);
        assert_eq!((span.start, span.end, span.distance), (3, 15, 0));
    }

    #[test]
    fn test_search_matches_document_id() {
        let engine = engine(&[("guides/deployment.md", "How to ship it"), ("other.md", "nothing here")]);

        let hits = engine.search("deployment").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].spans[0].field, Field::Name);
        assert_eq!((hits[0].spans[0].start, hits[0].spans[0].end), (7, 17));
    }

    #[test]
    fn test_content_match_outranks_name_match() {
        let engine = engine(&[("deployment.md", "unrelated"), ("ops.md", "the deployment checklist")]);

        let hits = engine.search("deployment").unwrap();
        assert_eq!(hits[0].document_id, "ops.md");
        assert_eq!(hits[1].document_id, "deployment.md");
    }

    #[test]
    fn test_search_multiple_spans_per_document() {
        let engine = engine(&[("a.md", "cache here, cache there, cache everywhere")]);

        let hits = engine.search("cache").unwrap();
        assert_eq!(hits[0].spans.len(), 3);
        let starts: Vec<usize> = hits[0].spans.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 12, 25]);
    }

    #[test]
    fn test_search_documents_format() {
        let engine = engine(&[("a.md", "Install the CLI with npm"), ("b.md", "Uninstall procedure is manual")]);

        let text = engine.search_documents("install").unwrap();
        assert_eq!(
            text,
            "Found 2 matches for \"install\":\n\n\
             --- a.md ---\n[Install] the CLI with npm\n\n\
             --- b.md ---\nUn[install] procedure is manual"
        );
    }

    #[test]
    fn test_search_documents_singular_header() {
        let engine = engine(&[("a.md", "only one widget")]);
        let text = engine.search_documents("widget").unwrap();
        assert!(text.starts_with("Found 1 match for \"widget\":"));
    }

    #[test]
    fn test_search_documents_name_preview() {
        let engine = engine(&[("guides/deployment.md", "How to ship it")]);

        let text = engine.search_documents("deployment").unwrap();
        assert!(text.contains("name: guides/[deployment].md"));
    }

    #[test]
    fn test_search_documents_context_ellipsis() {
        let prefix = "a".repeat(100);
        let suffix = "b".repeat(100);
        let content = format!("{} needle {}", prefix, suffix);
        let engine = engine(&[("hay.md", &content)]);

        let text = engine.search_documents("needle").unwrap();
        let expected = format!("...{} [needle] {}...", "a".repeat(39), "b".repeat(39));
        assert!(text.contains(&expected), "got: {}", text);
    }

    #[test]
    fn test_search_no_matches() {
        let engine = engine(&[("a.md", "completely unrelated")]);
        assert_eq!(
            engine.search_documents("kubernetes").unwrap(),
            "No matches found for \"kubernetes\"."
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let engine = engine(&[
            ("one.md", "config config configuration"),
            ("two.md", "configure the server"),
            ("three.md", "conf files"),
        ]);

        let first = engine.search_documents("config").unwrap();
        for _ in 0..5 {
            assert_eq!(engine.search_documents("config").unwrap(), first);
        }
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }
}
