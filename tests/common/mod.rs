#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use shape_draw::text::{SuggestionCallback, SuggestionLookup, SuggestionProvider, SuggestionRequest};
use shape_draw::{Canvas, DrawSettings, Stage, SurfaceSize};

pub const WIDTH: f32 = 400.0;
pub const HEIGHT: f32 = 300.0;

/// Provider that records requests and answers only when told to
#[derive(Default)]
pub struct FakeProvider {
    pending: Mutex<Vec<(SuggestionRequest, SuggestionCallback)>>,
    requests: Mutex<Vec<SuggestionRequest>>,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<SuggestionRequest> {
        self.requests.lock().clone()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Answer the `index`-th pending request (in issue order)
    pub fn resolve(&self, index: usize, answer: Vec<&str>) {
        let (_, done) = self.pending.lock().remove(index);
        done(Ok(answer.into_iter().map(str::to_owned).collect()));
    }

    pub fn fail(&self, index: usize) {
        let (_, done) = self.pending.lock().remove(index);
        done(Err(shape_draw::SuggestionError::Malformed));
    }
}

impl SuggestionProvider for FakeProvider {
    fn suggest(&self, request: SuggestionRequest, done: SuggestionCallback) {
        self.requests.lock().push(request.clone());
        self.pending.lock().push((request, done));
    }
}

pub fn canvas_with(settings: DrawSettings) -> (Canvas<Stage>, Arc<FakeProvider>) {
    let provider = Arc::new(FakeProvider::default());
    let lookup = SuggestionLookup::new(provider.clone());
    let stage = Stage::new(SurfaceSize::new(WIDTH, HEIGHT)).unwrap();
    (Canvas::new(stage, settings, lookup), provider)
}

pub fn canvas() -> (Canvas<Stage>, Arc<FakeProvider>) {
    canvas_with(DrawSettings::default())
}
