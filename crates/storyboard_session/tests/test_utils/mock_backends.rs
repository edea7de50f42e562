//! Mock text and image backends.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use storyboard_core::{ImagePayload, ImageRequest, ShotlistDocument, ShotlistRequest};
use storyboard_error::{GenerationError, GenerationErrorKind};
use storyboard_interface::{ImageBackend, ShotlistBackend};
use storyboard_session::{SceneSession, SessionEvent, SessionObserver};

/// A single mock image response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return an image with these bytes
    Image(Vec<u8>),
    /// Fail with this error
    Error(GenerationErrorKind),
}

/// How the image mock answers.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return an image
    Success,
    /// Always fail
    Error(GenerationErrorKind),
    /// Answer calls in order; past the end, succeed
    Sequence(Vec<MockResponse>),
    /// Never answer
    Hang,
}

/// Image backend with scripted answers.
pub struct MockImageBackend {
    behavior: MockBehavior,
    call_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockImageBackend {
    /// Create a mock with custom behavior.
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            call_count: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always succeed.
    pub fn success() -> Arc<Self> {
        Self::new(MockBehavior::Success)
    }

    /// Always fail with `kind`.
    pub fn failing(kind: GenerationErrorKind) -> Arc<Self> {
        Self::new(MockBehavior::Error(kind))
    }

    /// Answer in order.
    pub fn sequence(responses: Vec<MockResponse>) -> Arc<Self> {
        Self::new(MockBehavior::Sequence(responses))
    }

    /// Number of generate_image calls.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Highest number of calls outstanding at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Composed prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn respond(&self, call: usize) -> Result<ImagePayload, GenerationError> {
        let response = match &self.behavior {
            MockBehavior::Success | MockBehavior::Hang => {
                MockResponse::Image(vec![0x89, b'P', b'N', b'G'])
            }
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::Sequence(responses) => responses
                .get(call)
                .cloned()
                .unwrap_or(MockResponse::Image(vec![1, 2, 3])),
        };
        match response {
            MockResponse::Image(bytes) => ImagePayload::new("image/png", bytes),
            MockResponse::Error(kind) => Err(GenerationError::new(kind)),
        }
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<ImagePayload, GenerationError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.composed_prompt());

        if matches!(self.behavior, MockBehavior::Hang) {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.respond(call)
    }

    fn provider_name(&self) -> &'static str {
        "mock-image"
    }
}

/// Shotlist backend returning a fixed document or error.
pub struct MockShotlistBackend {
    result: Result<ShotlistDocument, GenerationErrorKind>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<ShotlistRequest>>,
}

impl MockShotlistBackend {
    /// Always return `document`.
    pub fn success(document: ShotlistDocument) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(document),
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always fail with `kind`.
    pub fn failing(kind: GenerationErrorKind) -> Arc<Self> {
        Arc::new(Self {
            result: Err(kind),
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of generate_shotlist calls.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received.
    pub fn requests(&self) -> Vec<ShotlistRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShotlistBackend for MockShotlistBackend {
    async fn generate_shotlist(
        &self,
        request: &ShotlistRequest,
    ) -> Result<ShotlistDocument, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.result {
            Ok(document) => Ok(document.clone()),
            Err(kind) => Err(GenerationError::new(kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-shotlist"
    }
}

/// Records every applied event with the session progress at that moment.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(&'static str, f64)>>,
    generating_counts: Mutex<Vec<usize>>,
}

impl RecordingObserver {
    /// Create a shareable recorder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Event names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(n, _)| *n).collect()
    }

    /// Progress reported after each `BatchProgressed`.
    pub fn progress_values(&self) -> Vec<f64> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| *n == "BatchProgressed")
            .map(|(_, p)| *p)
            .collect()
    }

    /// Number of `Generating` shots seen after each event.
    pub fn generating_counts(&self) -> Vec<usize> {
        self.generating_counts.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn on_event(&self, event: &SessionEvent, session: &SceneSession) {
        self.events
            .lock()
            .unwrap()
            .push((event.name(), *session.progress()));
        let (_, generating, _, _) = session.status_counts();
        self.generating_counts.lock().unwrap().push(generating);
    }
}
