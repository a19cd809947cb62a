use alloc::boxed::Box;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Callbacks a [`crate::ScratchSurface`] invokes as the user scratches. All default to doing nothing.
pub trait ScratchObserver {
    /// Estimated erased fraction in `[0, 1]`, reported after every completed stroke.
    fn on_progress(&mut self, _progress: f32) {}

    /// The surface was fully cleared, fired once per round.
    fn on_complete(&mut self) {}

    fn on_scratch_start(&mut self) {}

    fn on_scratch_end(&mut self) {}
}

impl ScratchObserver for () {}

/// One observer callback, as a value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScratchEvent {
    Progress(f32),
    Complete,
    ScratchStart,
    ScratchEnd,
}

impl ScratchEvent {
    /// Replays this event on another observer.
    pub fn dispatch(self, observer: &mut impl ScratchObserver) {
        use ScratchEvent::*;
        match self {
            Progress(progress) => observer.on_progress(progress),
            Complete => observer.on_complete(),
            ScratchStart => observer.on_scratch_start(),
            ScratchEnd => observer.on_scratch_end(),
        }
    }
}

/// Records every callback, so they can be handled after the surface is no longer borrowed.
impl ScratchObserver for Vec<ScratchEvent> {
    fn on_progress(&mut self, progress: f32) {
        self.push(ScratchEvent::Progress(progress));
    }

    fn on_complete(&mut self) {
        self.push(ScratchEvent::Complete);
    }

    fn on_scratch_start(&mut self) {
        self.push(ScratchEvent::ScratchStart);
    }

    fn on_scratch_end(&mut self) {
        self.push(ScratchEvent::ScratchEnd);
    }
}

/// Closure based observer, unset callbacks are no-ops.
#[derive(Default)]
pub struct Callbacks {
    progress: Option<Box<dyn FnMut(f32)>>,
    complete: Option<Box<dyn FnMut()>>,
    scratch_start: Option<Box<dyn FnMut()>>,
    scratch_end: Option<Box<dyn FnMut()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn with_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.complete = Some(Box::new(callback));
        self
    }

    pub fn with_scratch_start(mut self, callback: impl FnMut() + 'static) -> Self {
        self.scratch_start = Some(Box::new(callback));
        self
    }

    pub fn with_scratch_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.scratch_end = Some(Box::new(callback));
        self
    }
}

impl core::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field("progress", &self.progress.is_some())
            .field("complete", &self.complete.is_some())
            .field("scratch_start", &self.scratch_start.is_some())
            .field("scratch_end", &self.scratch_end.is_some())
            .finish()
    }
}

impl ScratchObserver for Callbacks {
    fn on_progress(&mut self, progress: f32) {
        if let Some(callback) = self.progress.as_mut() {
            callback(progress);
        }
    }

    fn on_complete(&mut self) {
        if let Some(callback) = self.complete.as_mut() {
            callback();
        }
    }

    fn on_scratch_start(&mut self) {
        if let Some(callback) = self.scratch_start.as_mut() {
            callback();
        }
    }

    fn on_scratch_end(&mut self) {
        if let Some(callback) = self.scratch_end.as_mut() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    #[test]
    fn callbacks_invoke_only_what_is_set() {
        let completed = Rc::new(Cell::new(0));
        let progress = Rc::new(RefCell::new(Vec::new()));

        let mut callbacks = Callbacks::new()
            .with_complete({
                let completed = completed.clone();
                move || completed.set(completed.get() + 1)
            })
            .with_progress({
                let progress = progress.clone();
                move |p| progress.borrow_mut().push(p)
            });

        callbacks.on_scratch_start();
        callbacks.on_progress(0.25);
        callbacks.on_scratch_end();
        callbacks.on_complete();

        assert_eq!(completed.get(), 1);
        assert_eq!(*progress.borrow(), vec![0.25]);
    }

    #[test]
    fn recorded_events_replay_in_order() {
        let mut recorded: Vec<ScratchEvent> = Vec::new();
        recorded.on_scratch_start();
        recorded.on_scratch_end();
        recorded.on_progress(0.5);

        let mut replayed: Vec<ScratchEvent> = Vec::new();
        for event in recorded.iter().copied() {
            event.dispatch(&mut replayed);
        }

        assert_eq!(
            replayed,
            vec![
                ScratchEvent::ScratchStart,
                ScratchEvent::ScratchEnd,
                ScratchEvent::Progress(0.5),
            ]
        );
    }
}
