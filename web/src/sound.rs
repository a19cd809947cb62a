use crate::config::SoundConfig;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Scratch and celebration sounds. Anything that fails to load or play is logged and skipped.
pub(crate) struct SoundManager {
    scratch: Option<HtmlAudioElement>,
    celebration: Option<HtmlAudioElement>,
    on_rejected: Closure<dyn FnMut(JsValue)>,
}

fn load(src: &str, volume: f64, looped: bool) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(audio) => {
            audio.set_volume(volume.clamp(0.0, 1.0));
            audio.set_loop(looped);
            Some(audio)
        }
        Err(err) => {
            log::warn!("failed to load sound {}: {:?}", src, err);
            None
        }
    }
}

impl SoundManager {
    pub(crate) fn new(config: &SoundConfig) -> Self {
        Self {
            scratch: load(&config.scratch, config.scratch_volume, true),
            celebration: load(&config.celebration, config.celebration_volume, false),
            // browsers reject play() until the user interacted with the page
            on_rejected: Closure::new(|err: JsValue| log::debug!("sound not played: {:?}", err)),
        }
    }

    fn play(&self, audio: &HtmlAudioElement) {
        match audio.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_rejected);
            }
            Err(err) => log::debug!("sound not played: {:?}", err),
        }
    }

    pub(crate) fn play_scratch(&self) {
        if let Some(audio) = self.scratch.as_ref().filter(|audio| audio.paused()) {
            self.play(audio);
        }
    }

    pub(crate) fn stop_scratch(&self) {
        if let Some(audio) = &self.scratch {
            if let Err(err) = audio.pause() {
                log::debug!("failed to stop scratch sound: {:?}", err);
            }
            audio.set_current_time(0.0);
        }
    }

    pub(crate) fn play_celebration(&self) {
        if let Some(audio) = &self.celebration {
            audio.set_current_time(0.0);
            self.play(audio);
        }
    }
}

impl std::fmt::Debug for SoundManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundManager")
            .field("scratch", &self.scratch.is_some())
            .field("celebration", &self.celebration.is_some())
            .finish()
    }
}
