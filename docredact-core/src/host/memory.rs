// docredact-core/src/host/memory.rs
//! An in-memory host document.
//!
//! Each batch works on a private copy of the document state; `commit`
//! publishes the copy back. A failed commit therefore leaves the document
//! exactly as it was before the batch opened.
//!
//! The document can be loaded from and saved to a JSON snapshot, and a
//! [`FaultPlan`] can make individual host calls fail.

use async_trait::async_trait;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{
    parse_api_version, version_at_least, ChangeTrackingMode, DocumentBatch, DocumentHost,
    ParagraphStyle, StyledParagraph,
};
use crate::errors::{DocRedactError, HostError};

/// One paragraph of a section header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderParagraph {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParagraphStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub primary_header: Vec<HeaderParagraph>,
}

impl Section {
    fn header_text(&self) -> String {
        self.primary_header
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Serializable state of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Body paragraphs in document order.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub change_tracking_mode: ChangeTrackingMode,
    /// Requirement sets the host supports, mapped to the highest supported version.
    #[serde(default)]
    pub requirement_sets: BTreeMap<String, String>,
}

/// Host calls that should fail, for exercising error paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub fail_paragraph_count: bool,
    /// Body paragraph indices whose text cannot be read.
    pub failing_reads: HashSet<usize>,
    /// Body paragraph indices that reject replacements.
    pub failing_writes: HashSet<usize>,
    pub fail_section_count: bool,
    pub fail_header_read: bool,
    pub fail_header_write: bool,
    pub fail_capability_probe: bool,
    pub fail_tracking_write: bool,
}

#[derive(Debug)]
pub struct MemoryDocument {
    state: Mutex<DocumentSnapshot>,
    faults: FaultPlan,
    mutations: AtomicUsize,
    commits: AtomicUsize,
}

impl MemoryDocument {
    pub fn new(snapshot: DocumentSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            faults: FaultPlan::default(),
            mutations: AtomicUsize::new(0),
            commits: AtomicUsize::new(0),
        }
    }

    /// A single-section document with an empty header and the given body paragraphs.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DocumentSnapshot {
            sections: vec![Section::default()],
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
            ..DocumentSnapshot::default()
        })
    }

    pub fn with_requirement_set(mut self, set: &str, version: &str) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.requirement_sets.insert(set.to_string(), version.to_string());
        }
        self
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DocRedactError> {
        let snapshot: DocumentSnapshot = serde_json::from_str(json)
            .map_err(|e| DocRedactError::SnapshotParse(e.to_string()))?;
        Ok(Self::new(snapshot))
    }

    pub fn to_json_pretty(&self) -> Result<String, DocRedactError> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| DocRedactError::SnapshotParse(e.to_string()))
    }

    pub fn snapshot(&self) -> Result<DocumentSnapshot, HostError> {
        Ok(self.lock()?.clone())
    }

    pub fn paragraphs(&self) -> Vec<String> {
        self.snapshot().map(|s| s.paragraphs).unwrap_or_default()
    }

    pub fn header_text(&self, section: usize) -> Option<String> {
        self.snapshot().ok()?.sections.get(section).map(Section::header_text)
    }

    pub fn change_tracking_mode(&self) -> ChangeTrackingMode {
        self.snapshot().map(|s| s.change_tracking_mode).unwrap_or_default()
    }

    /// Number of mutating calls issued against this document, including failed ones.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, DocumentSnapshot>, HostError> {
        self.state
            .lock()
            .map_err(|_| HostError::Read("document state lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentHost for MemoryDocument {
    async fn begin_batch<'a>(&'a self) -> Result<Box<dyn DocumentBatch + 'a>, HostError> {
        if self.faults.fail_begin {
            return Err(HostError::Read("the document is not available".to_string()));
        }
        let working = self.lock()?.clone();
        trace!("Opened batch over {} paragraphs", working.paragraphs.len());
        Ok(Box::new(MemoryBatch { document: self, working }))
    }

    fn is_set_supported(&self, set: &str, min_version: &str) -> Result<bool, HostError> {
        if self.faults.fail_capability_probe {
            return Err(HostError::Capability("requirement lookup unavailable".to_string()));
        }
        let required = parse_api_version(min_version)
            .ok_or_else(|| HostError::Capability(format!("invalid version '{}'", min_version)))?;
        let state = self.lock()?;
        let supported = state
            .requirement_sets
            .get(set)
            .and_then(|v| parse_api_version(v))
            .is_some_and(|available| version_at_least(&available, &required));
        Ok(supported)
    }
}

struct MemoryBatch<'a> {
    document: &'a MemoryDocument,
    working: DocumentSnapshot,
}

impl<'a> MemoryBatch<'a> {
    fn faults(&self) -> &FaultPlan {
        &self.document.faults
    }

    fn record_mutation(&self) {
        self.document.mutations.fetch_add(1, Ordering::SeqCst);
    }

    fn section_mut(&mut self, section: usize) -> Result<&mut Section, HostError> {
        self.working
            .sections
            .get_mut(section)
            .ok_or_else(|| HostError::Mutation(format!("section {} does not exist", section)))
    }
}

#[async_trait]
impl<'a> DocumentBatch for MemoryBatch<'a> {
    async fn section_count(&mut self) -> Result<usize, HostError> {
        if self.faults().fail_section_count {
            return Err(HostError::Read("sections could not be loaded".to_string()));
        }
        Ok(self.working.sections.len())
    }

    async fn primary_header_text(&mut self, section: usize) -> Result<String, HostError> {
        if self.faults().fail_header_read {
            return Err(HostError::Read("header text could not be loaded".to_string()));
        }
        self.working
            .sections
            .get(section)
            .map(Section::header_text)
            .ok_or_else(|| HostError::Read(format!("section {} does not exist", section)))
    }

    async fn clear_primary_header(&mut self, section: usize) -> Result<(), HostError> {
        self.record_mutation();
        if self.faults().fail_header_write {
            return Err(HostError::Mutation("header is locked".to_string()));
        }
        self.section_mut(section)?.primary_header.clear();
        Ok(())
    }

    async fn insert_header_paragraph(
        &mut self,
        section: usize,
        paragraph: &StyledParagraph,
    ) -> Result<(), HostError> {
        self.record_mutation();
        if self.faults().fail_header_write {
            return Err(HostError::Mutation("header is locked".to_string()));
        }
        self.section_mut(section)?.primary_header.insert(
            0,
            HeaderParagraph {
                text: paragraph.text.clone(),
                style: Some(paragraph.style.clone()),
            },
        );
        Ok(())
    }

    async fn paragraph_count(&mut self) -> Result<usize, HostError> {
        if self.faults().fail_paragraph_count {
            return Err(HostError::Read("paragraphs could not be loaded".to_string()));
        }
        Ok(self.working.paragraphs.len())
    }

    async fn paragraph_text(&mut self, index: usize) -> Result<String, HostError> {
        if self.faults().failing_reads.contains(&index) {
            return Err(HostError::Read(format!("paragraph {} could not be loaded", index)));
        }
        self.working
            .paragraphs
            .get(index)
            .cloned()
            .ok_or_else(|| HostError::Read(format!("paragraph {} does not exist", index)))
    }

    async fn replace_in_paragraph(
        &mut self,
        index: usize,
        find: &str,
        replacement: &str,
    ) -> Result<usize, HostError> {
        self.record_mutation();
        if self.faults().failing_writes.contains(&index) {
            return Err(HostError::Mutation(format!("paragraph {} is read-only", index)));
        }
        let paragraph = self
            .working
            .paragraphs
            .get_mut(index)
            .ok_or_else(|| HostError::Mutation(format!("paragraph {} does not exist", index)))?;
        let (replaced, count) = replace_all_ignore_ascii_case(paragraph, find, replacement);
        *paragraph = replaced;
        Ok(count)
    }

    async fn set_change_tracking_mode(&mut self, mode: ChangeTrackingMode) -> Result<(), HostError> {
        self.record_mutation();
        if self.faults().fail_tracking_write {
            return Err(HostError::Mutation("change tracking mode is locked".to_string()));
        }
        self.working.change_tracking_mode = mode;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), HostError> {
        if self.document.faults.fail_commit {
            return Err(HostError::Commit("the host rejected the batch".to_string()));
        }
        let MemoryBatch { document, working } = *self;
        *document.lock()? = working;
        document.commits.fetch_add(1, Ordering::SeqCst);
        debug!("Committed batch");
        Ok(())
    }
}

/// Replaces every non-overlapping, ASCII case-insensitive occurrence of
/// `find` in `text`, left to right. Returns the new text and the count.
fn replace_all_ignore_ascii_case(text: &str, find: &str, replacement: &str) -> (String, usize) {
    if find.is_empty() {
        return (text.to_string(), 0);
    }

    let haystack = text.as_bytes();
    let needle = find.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut last = 0;
    let mut i = 0;

    while i + needle.len() <= haystack.len() {
        let end = i + needle.len();
        if text.is_char_boundary(i)
            && text.is_char_boundary(end)
            && haystack[i..end].eq_ignore_ascii_case(needle)
        {
            out.push_str(&text[last..i]);
            out.push_str(replacement);
            count += 1;
            last = end;
            i = end;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[last..]);
    (out, count)
}
