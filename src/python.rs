//! Python bindings for sentiword-rs using PyO3
//!
//! This module provides Python-compatible wrappers around the lexicon and scorer.

use std::sync::Arc;

use pyo3::exceptions::{PyIOError, PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::classifier::{classify as rust_classify, Classification};
use crate::error::LexiconError;
use crate::lexicon::{Lexicon, LexiconBuilder, MalformedPolicy};
use crate::scorer::{SentenceScore, SentenceScorer as RustSentenceScorer};

#[cfg(feature = "download")]
use crate::download;

fn to_py_err(err: LexiconError) -> PyErr {
    match err {
        LexiconError::Load(e) => PyIOError::new_err(e.to_string()),
        LexiconError::NotFound { .. } => PyKeyError::new_err(err.to_string()),
        LexiconError::Network(_) => PyRuntimeError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn policy(skip_malformed: bool) -> MalformedPolicy {
    if skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Abort
    }
}

fn classification_dict<'py>(
    py: Python<'py>,
    classification: &Classification,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("sentiment", classification.sentiment.as_str())?;
    dict.set_item("emotion", classification.emotion.map(|e| e.as_str()))?;
    dict.set_item("label", classification.label())?;
    Ok(dict)
}

fn score_dict<'py>(py: Python<'py>, score: &SentenceScore) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("positivity_percent", score.positivity_percent)?;
    dict.set_item("emotion_number", score.emotion_number)?;
    dict.set_item("token_count", score.token_count)?;
    dict.set_item("matched_tokens", score.matched_tokens)?;
    dict.set_item("activity_count", score.activity_count)?;
    dict.set_item("passivity_count", score.passivity_count)?;
    dict.set_item("classification", classification_dict(py, &score.classify())?)?;
    Ok(dict)
}

/// SentiWordNet lexicon
///
/// Example:
///     >>> from sentiword_rs import Lexicon
///     >>> lex = Lexicon.from_tsv("a\t00000001\t0.5\t0.25\tgood#1\tdesc")
///     >>> lex.lookup("good", "a")
///     0.25
#[pyclass(name = "Lexicon")]
pub struct PyLexicon {
    /// Shared lexicon reference - scorers built from it don't copy the table
    lexicon: Arc<Lexicon>,
}

#[pymethods]
impl PyLexicon {
    /// Build a lexicon from TSV content
    #[staticmethod]
    #[pyo3(signature = (tsv_content, skip_malformed=false))]
    fn from_tsv(tsv_content: &str, skip_malformed: bool) -> PyResult<Self> {
        let mut builder = LexiconBuilder::with_policy(policy(skip_malformed));
        builder.load_tsv(tsv_content).map_err(to_py_err)?;
        Ok(PyLexicon {
            lexicon: Arc::new(builder.build()),
        })
    }

    /// Build a lexicon from a SentiWordNet file
    #[staticmethod]
    #[pyo3(signature = (path, skip_malformed=false))]
    fn from_file(path: &str, skip_malformed: bool) -> PyResult<Self> {
        let mut builder = LexiconBuilder::with_policy(policy(skip_malformed));
        builder.load_file(path).map_err(to_py_err)?;
        Ok(PyLexicon {
            lexicon: Arc::new(builder.build()),
        })
    }

    /// Load the default SentiWordNet file, downloading it if needed
    ///
    /// Args:
    ///     base_path: Directory holding the lexicon (default: <data dir>/sentiword-rs/)
    #[cfg(feature = "download")]
    #[staticmethod]
    #[pyo3(signature = (base_path=None))]
    fn default(base_path: Option<&str>) -> PyResult<Self> {
        let base = base_path.map(std::path::Path::new);
        let path = download::ensure_lexicon(base).map_err(to_py_err)?;
        let lexicon = Lexicon::from_path(path).map_err(to_py_err)?;
        Ok(PyLexicon {
            lexicon: Arc::new(lexicon),
        })
    }

    /// Score of `term#pos`; raises KeyError when absent
    fn lookup(&self, term: &str, pos: &str) -> PyResult<f64> {
        self.lexicon.lookup(term, pos).map_err(to_py_err)
    }

    /// Score of `term#pos`, or None
    fn get(&self, term: &str, pos: &str) -> Option<f64> {
        self.lexicon.get(term, pos)
    }

    fn __contains__(&self, key: (String, String)) -> bool {
        self.lexicon.contains(&key.0, &key.1)
    }

    fn __len__(&self) -> usize {
        self.lexicon.len()
    }

    fn __repr__(&self) -> String {
        format!("Lexicon(entries={})", self.lexicon.len())
    }
}

/// Sentence scorer
///
/// Example:
///     >>> from sentiword_rs import Lexicon, SentenceScorer
///     >>> scorer = SentenceScorer(lex)            # looks up "a" then "n"
///     >>> scorer.score("good day")["classification"]["label"]
///     'surprised'
#[pyclass(name = "SentenceScorer")]
pub struct PySentenceScorer {
    scorer: RustSentenceScorer,
}

#[pymethods]
impl PySentenceScorer {
    #[new]
    #[pyo3(signature = (lexicon, pos_tags=None))]
    fn new(lexicon: PyRef<'_, PyLexicon>, pos_tags: Option<Vec<String>>) -> Self {
        let mut scorer = RustSentenceScorer::with_arc(Arc::clone(&lexicon.lexicon));
        if let Some(tags) = pos_tags {
            scorer = scorer.with_pos_tags(tags);
        }
        PySentenceScorer { scorer }
    }

    /// Score a sentence; raises ValueError for an empty sentence
    fn score<'py>(&self, py: Python<'py>, sentence: &str) -> PyResult<Bound<'py, PyDict>> {
        let score = self.scorer.score(sentence).map_err(to_py_err)?;
        score_dict(py, &score)
    }

    /// Average score of one lowercased token, or None
    fn token_score(&self, token: &str) -> Option<f64> {
        self.scorer.token_score(token)
    }

    #[getter]
    fn pos_tags(&self) -> Vec<String> {
        self.scorer.pos_tags().to_vec()
    }

    fn __repr__(&self) -> String {
        format!(
            "SentenceScorer(entries={}, pos_tags={:?})",
            self.scorer.lexicon().len(),
            self.scorer.pos_tags()
        )
    }
}

/// Classify a positivity percent and emotion number
///
/// Returns:
///     dict with "sentiment", "emotion" (or None) and "label"
#[pyfunction]
fn classify<'py>(
    py: Python<'py>,
    positivity_percent: f64,
    emotion_number: f64,
) -> PyResult<Bound<'py, PyDict>> {
    classification_dict(py, &rust_classify(positivity_percent, emotion_number))
}

/// Create the Python module
#[pymodule]
fn sentiword_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLexicon>()?;
    m.add_class::<PySentenceScorer>()?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
