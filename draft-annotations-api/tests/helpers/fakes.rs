//! In-memory stand-ins for the outbound dependencies

use async_trait::async_trait;
use draft_annotations_api::annotations::Annotations;
use draft_annotations_api::concept::Concept;
use draft_annotations_api::services::{
    AnnotationsRw, ConceptError, ConceptReadApi, RwError, StoredAnnotations, UppAnnotationsApi,
    UppError, UppResponse,
};
use draft_common::RequestContext;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// Concept read API answering from a fixed table
pub struct FakeConceptRead {
    concepts: HashMap<String, Concept>,
    failure: Option<String>,
    /// Every batch requested, in call order
    pub requests: Mutex<Vec<BTreeSet<String>>>,
}

impl FakeConceptRead {
    pub fn with_concepts(concepts: HashMap<String, Concept>) -> Self {
        Self {
            concepts,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_concepts(HashMap::new())
    }

    /// Every lookup fails with a 503 carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            concepts: HashMap::new(),
            failure: Some(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ConceptReadApi for FakeConceptRead {
    async fn get_concepts_by_ids(
        &self,
        ctx: &RequestContext,
        uuids: &BTreeSet<String>,
    ) -> Result<HashMap<String, Concept>, ConceptError> {
        self.requests.lock().unwrap().push(uuids.clone());
        if let Some(message) = &self.failure {
            return Err(ConceptError::ApiError(503, message.clone()));
        }

        let concepts = self.concepts.clone();
        let requested = uuids.clone();
        Ok(ctx
            .run(async move {
                concepts
                    .into_iter()
                    .filter(|(uuid, _)| requested.contains(uuid))
                    .collect::<HashMap<_, _>>()
            })
            .await?)
    }

    fn endpoint(&self) -> &str {
        "fake://concept-read"
    }

    async fn gtg(&self) -> Result<(), ConceptError> {
        match &self.failure {
            Some(message) => Err(ConceptError::ApiError(503, message.clone())),
            None => Ok(()),
        }
    }
}

/// UPP answering every request with the same status and body
pub struct FakeUpp {
    status: u16,
    body: Vec<u8>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeUpp {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UppAnnotationsApi for FakeUpp {
    async fn get(&self, _ctx: &RequestContext, content_uuid: &str) -> Result<UppResponse, UppError> {
        self.calls.lock().unwrap().push(content_uuid.to_string());
        Ok(UppResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }

    fn endpoint(&self) -> &str {
        "fake://upp/content/{uuid}/annotations"
    }

    async fn gtg(&self) -> Result<(), UppError> {
        if self.status >= 500 {
            return Err(UppError::GtgFailed(self.status, "unhealthy".to_string()));
        }
        Ok(())
    }
}

/// Annotations store keeping documents in memory, with hash preconditions
#[derive(Default)]
pub struct InMemoryRw {
    documents: Mutex<HashMap<String, StoredAnnotations>>,
    writes: Mutex<u64>,
    unavailable: bool,
}

impl InMemoryRw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the store were down
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Seed a stored document, returning its hash
    pub fn insert(&self, content_uuid: &str, annotations: Annotations) -> String {
        let hash = self.next_hash();
        self.documents.lock().unwrap().insert(
            content_uuid.to_string(),
            StoredAnnotations {
                annotations,
                hash: hash.clone(),
            },
        );
        hash
    }

    pub fn stored(&self, content_uuid: &str) -> Option<StoredAnnotations> {
        self.documents.lock().unwrap().get(content_uuid).cloned()
    }

    fn next_hash(&self) -> String {
        let mut writes = self.writes.lock().unwrap();
        *writes += 1;
        format!("hash-{}", writes)
    }
}

#[async_trait]
impl AnnotationsRw for InMemoryRw {
    async fn read(
        &self,
        _ctx: &RequestContext,
        content_uuid: &str,
    ) -> Result<Option<StoredAnnotations>, RwError> {
        if self.unavailable {
            return Err(RwError::NetworkError("connection refused".to_string()));
        }
        Ok(self.stored(content_uuid))
    }

    async fn write(
        &self,
        _ctx: &RequestContext,
        content_uuid: &str,
        annotations: &Annotations,
        previous_hash: Option<&str>,
    ) -> Result<String, RwError> {
        if self.unavailable {
            return Err(RwError::NetworkError("connection refused".to_string()));
        }

        if let (Some(existing), Some(previous)) = (self.stored(content_uuid), previous_hash) {
            if existing.hash != previous {
                return Err(RwError::Conflict(format!(
                    "expected {}, found {}",
                    previous, existing.hash
                )));
            }
        }

        Ok(self.insert(content_uuid, annotations.clone()))
    }

    fn endpoint(&self) -> &str {
        "fake://annotations-rw"
    }

    async fn gtg(&self) -> Result<(), RwError> {
        if self.unavailable {
            return Err(RwError::NetworkError("connection refused".to_string()));
        }
        Ok(())
    }
}
