//! Background inference plumbing for the controller.
//!
//! Inference is the one operation with non-trivial latency, so it runs on a
//! spawned thread and reports back over an mpsc channel drained from the
//! update loop. Every job carries the generation current at launch time; the
//! controller bumps the generation on clear and on each new trigger, so any
//! outcome tagged with an older generation is recognizably stale.

use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};
use std::thread;

use crate::classifier::{Classifier, ClassifierError, Prediction};
use crate::preprocess;
use crate::raster::GrayBitmap;

/// Result of one inference job, tagged with the generation that launched it.
#[derive(Debug)]
pub(crate) struct RecognitionOutcome {
    pub(crate) generation: u64,
    pub(crate) result: Result<Vec<Prediction>, ClassifierError>,
}

/// Channel endpoints and in-flight bookkeeping for inference jobs.
pub(crate) struct InferenceJobs {
    message_tx: Sender<RecognitionOutcome>,
    message_rx: Receiver<RecognitionOutcome>,
    generation: u64,
    in_flight: bool,
}

impl InferenceJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<RecognitionOutcome>();
        Self {
            message_tx,
            message_rx,
            generation: 0,
            in_flight: false,
        }
    }

    /// Generation that arriving outcomes must match to be presented.
    pub(super) fn current_generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Invalidate any outstanding job so its eventual outcome is discarded.
    ///
    /// The worker thread is not interrupted; it finishes and sends an outcome
    /// tagged with the old generation, which no longer matches.
    pub(super) fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    /// Snapshot the bitmap into a new inference job on a background thread.
    ///
    /// Preprocessing happens off the UI loop together with inference; the
    /// bitmap is moved into the worker, so nothing is shared mutably.
    pub(super) fn begin(&mut self, classifier: Arc<dyn Classifier>, bitmap: GrayBitmap) -> u64 {
        self.generation += 1;
        self.in_flight = true;
        let generation = self.generation;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let tensor = preprocess::normalize(&bitmap, classifier.input_shape());
            let result = classifier.predict(&tensor);
            let _ = tx.send(RecognitionOutcome { generation, result });
        });
        generation
    }

    /// Mark the current job finished once its outcome has been consumed.
    pub(super) fn finish(&mut self) {
        self.in_flight = false;
    }

    pub(super) fn try_recv(&self) -> Option<RecognitionOutcome> {
        self.message_rx.try_recv().ok()
    }
}
