use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::strip::{self, State};
use crate::gui::theme::ThemeColors;
use crate::gui::window::{self, DRAWING_AREA_CLASS, WINDOW_CLASS};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    /// Segment count forced on the command line, reapplied on reload.
    pub segments: Option<usize>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Tap(f64),
    Select(usize),
    Step(isize),
    Resize(f64, f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Select(i) => AppMsg::Select(i),
            AppEvent::Step(d) => AppMsg::Step(d),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Option<usize>, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Notchbar"),
            #[watch]
            set_visible: model.visible,
            add_css_class: WINDOW_CLASS,
            set_decorated: false,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: DRAWING_AREA_CLASS,

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, _| {
                        sender.input(AppMsg::Tap(x));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, segments, rx) = init;

        window::install_transparent_css();
        window::init_layer_shell(&root, config.height);

        let model = AppModel {
            state: Rc::new(RefCell::new(State::new(&config))),
            visible: true,
            segments,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = strip::draw(cr, &state_draw.borrow(), &colors, Instant::now()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // drive the surface clock off the frame clock
        let state_tick = model.state.clone();
        widgets.drawing_area.add_tick_callback(move |drawing_area, _| {
            if state_tick.borrow_mut().tick(Instant::now()) {
                drawing_area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.visible = true,
            AppMsg::Hide => self.visible = false,
            AppMsg::Tap(x) => {
                let index = self.state.borrow().segment_at(x);
                if let Some(index) = index {
                    self.state.borrow_mut().select(index);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Select(index) => {
                if !self.state.borrow_mut().select(index) {
                    log::debug!("Select {} started no transition", index);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Step(delta) => {
                self.state.borrow_mut().step(delta);
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                self.state.borrow_mut().resize(width, height);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) if new_config.tabs.is_empty() && self.segments.is_none() => {
                    log::warn!("Reloaded config has no tabs, keeping the current ones");
                }
                Ok(new_config) => {
                    let new_config = match self.segments {
                        Some(n) => new_config.with_segment_count(n),
                        None => new_config,
                    };
                    self.state.borrow_mut().apply_config(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
