use crate::canvas::CanvasTarget;
use crate::collection::Collection;
use crate::config::LotteryConfig;
use crate::input::{SharedSurface, StrokeListeners};
use crate::sound::SoundManager;
use crate::utils::*;
use kezuri_core as scratch;
use scratch::{ScratchError, ScratchEvent, ScratchSurface};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CARD_WIDTH: u32 = 300;
const CARD_HEIGHT: u32 = 200;

/// What the host has to do in response to a surface event.
#[derive(Copy, Clone, Debug, PartialEq)]
enum RoundEffect {
    None,
    StartScratchSound,
    StopScratchSound,
    Celebrate,
}

/// Host side state of one card.
#[derive(Clone, Debug, PartialEq)]
struct Round {
    blessing: String,
    progress: f32,
    revealed: bool,
}

impl Round {
    fn new(blessing: impl Into<String>) -> Self {
        Self {
            blessing: blessing.into(),
            progress: 0.0,
            revealed: false,
        }
    }

    fn apply(&mut self, event: ScratchEvent) -> RoundEffect {
        use ScratchEvent::*;
        match event {
            ScratchStart => RoundEffect::StartScratchSound,
            ScratchEnd => RoundEffect::StopScratchSound,
            Progress(progress) => {
                self.progress = progress.clamp(0.0, 1.0);
                RoundEffect::None
            }
            // the surface only completes once per round, guard anyway so nothing is collected twice
            Complete if self.revealed => RoundEffect::None,
            Complete => {
                self.revealed = true;
                self.progress = 1.0;
                RoundEffect::Celebrate
            }
        }
    }

    fn progress_label(&self) -> String {
        format!("{:.0}%", self.progress * 100.0)
    }
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct CardProps {
    /// Force the first card to show this blessing
    #[prop_or_default]
    pub blessing: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Scratch(Vec<ScratchEvent>),
    InitFailed(ScratchError),
    NewCard,
    RevealAll,
}

#[derive(Debug)]
pub(crate) struct CardView {
    config: LotteryConfig,
    round: Round,
    collection: Collection,
    sound: SoundManager,
    canvas: NodeRef,
    surface: Option<SharedSurface>,
    init_error: Option<ScratchError>,
    _listeners: Option<StrokeListeners>,
}

impl CardView {
    fn attach_surface(&mut self, ctx: &Context<Self>) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::error!("scratch canvas is not mounted");
            return;
        };

        let target = CanvasTarget(canvas.clone());
        match ScratchSurface::new(target, self.config.scratch.clone(), Vec::new()) {
            Ok(surface) => {
                let surface = Rc::new(RefCell::new(surface));
                let listeners = StrokeListeners::install(
                    &canvas,
                    surface.clone(),
                    ctx.link().callback(Msg::Scratch),
                );
                self.surface = Some(surface);
                self._listeners = Some(listeners);
                log::debug!("scratch card attached");
            }
            Err(err) => {
                log::error!("cannot create scratch card: {}", err);
                ctx.link().send_message(Msg::InitFailed(err));
            }
        }
    }

    /// Runs `action` on the surface and handles whatever it reported.
    fn with_surface(&mut self, action: impl FnOnce(&mut crate::input::CardSurface)) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        let events = {
            let Ok(mut surface) = surface.try_borrow_mut() else {
                log::warn!("surface busy");
                return false;
            };
            action(&mut surface);
            std::mem::take(surface.observer_mut())
        };
        self.handle_events(events);
        true
    }

    fn handle_events(&mut self, events: Vec<ScratchEvent>) -> bool {
        let mut updated = false;
        for event in events {
            log::trace!("surface event: {:?}", event);
            match self.round.apply(event) {
                RoundEffect::None => {}
                RoundEffect::StartScratchSound => self.sound.play_scratch(),
                RoundEffect::StopScratchSound => self.sound.stop_scratch(),
                RoundEffect::Celebrate => self.celebrate(),
            }
            updated |= matches!(event, ScratchEvent::Progress(_) | ScratchEvent::Complete);
        }
        updated
    }

    fn celebrate(&mut self) {
        log::debug!("revealed: {}", self.round.blessing);
        if self.collection.collect(&self.round.blessing) {
            self.collection.local_save();
        }
        self.sound.play_celebration();
    }

    fn new_card(&mut self) {
        self.round = Round::new(self.config.pick_blessing(None));
        self.sound.stop_scratch();
        self.with_surface(|surface| surface.reset());
    }
}

impl Component for CardView {
    type Message = Msg;
    type Properties = CardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = LotteryConfig::bundled();
        let round = Round::new(config.pick_blessing(ctx.props().blessing));
        let sound = SoundManager::new(&config.sound);
        Self {
            config,
            round,
            collection: LocalOrDefault::local_or_default(),
            sound,
            canvas: NodeRef::default(),
            surface: None,
            init_error: None,
            _listeners: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.attach_surface(ctx);
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Scratch(events) => self.handle_events(events),
            InitFailed(err) => {
                self.init_error = Some(err);
                true
            }
            NewCard => {
                self.new_card();
                true
            }
            RevealAll => {
                self.with_surface(|surface| {
                    surface.reveal();
                })
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_new_card = ctx.link().callback(|_: MouseEvent| NewCard);
        let cb_reveal = ctx.link().callback(|_: MouseEvent| RevealAll);
        let collected = format!(
            "已收集 {} / {}",
            self.collection.len(),
            self.config.blessings.len()
        );

        let card = if self.init_error.is_some() {
            html! {
                <p class="unsupported">{"此瀏覽器無法顯示刮刮卡"}</p>
            }
        } else {
            html! {
                <div class={classes!("card-container", self.round.revealed.then_some("revealed"))}>
                    <div class="blessing-text">{self.round.blessing.clone()}</div>
                    <canvas ref={self.canvas.clone()} width={CARD_WIDTH.to_string()} height={CARD_HEIGHT.to_string()}/>
                </div>
            }
        };

        html! {
            <div class="kezuri">
                <h1>{"馬年大吉刮刮樂"}</h1>
                {card}
                <nav>
                    <aside>{self.round.progress_label()}</aside>
                    <button onclick={cb_reveal} disabled={self.round.revealed}>{"全部刮開"}</button>
                    <button class="btn" onclick={cb_new_card}>{"再來一張"}</button>
                </nav>
                <footer>{collected}</footer>
            </div>
        }
    }
}
