use crate::gui::theme;
use crate::gui::view::CairoCanvas;
use gtk::prelude::*;
use gtk4 as gtk;
use lootreel::config;
use lootreel::events::AppEvent;
use lootreel::source::TextFileSource;
use lootreel::{CaseOpener, OpenResult};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppModel {
    pub opener: Rc<RefCell<CaseOpener>>,
    pub source: TextFileSource,
    pub items_watch: async_channel::Sender<PathBuf>,
    pub opening: bool,
    pub item_count: usize,
    pub item_markup: String,
    pub tier_markup: String,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Open,
    Finished(OpenResult),
    ItemsChanged,
    LoadItems(PathBuf),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Open => AppMsg::Open,
            AppEvent::ItemsChanged => AppMsg::ItemsChanged,
            AppEvent::LoadItems(path) => AppMsg::LoadItems(path),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        CaseOpener,
        TextFileSource,
        async_channel::Receiver<AppEvent>,
        async_channel::Sender<PathBuf>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Case Opener"),
            set_default_size: (1000, 800),
            add_css_class: "lootreel-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 16,
                set_margin_top: 15,
                set_margin_bottom: 15,

                gtk::Label {
                    set_label: "Case Opener",
                    add_css_class: "lootreel-title",
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: 900,
                    set_content_height: 250,
                    set_halign: gtk::Align::Center,
                    add_css_class: "lootreel-reel",
                },

                gtk::Label {
                    #[watch]
                    set_markup: &model.item_markup,
                    set_wrap: true,
                    set_max_width_chars: 60,
                    set_justify: gtk::Justification::Center,
                    add_css_class: "lootreel-item",
                },

                gtk::Label {
                    #[watch]
                    set_markup: &model.tier_markup,
                    add_css_class: "lootreel-tier",
                },

                gtk::Button {
                    #[watch]
                    set_label: if model.opening { "OPENING..." } else { "OPEN CASE" },
                    #[watch]
                    set_sensitive: !model.opening,
                    set_halign: gtk::Align::Center,
                    add_css_class: "lootreel-open",
                    connect_clicked => AppMsg::Open,
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.status,
                    add_css_class: "lootreel-status",
                },

                gtk::Label {
                    #[watch]
                    set_label: &format!("Items in collection: {}", model.item_count),
                    add_css_class: "lootreel-count",
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (opener, source, rx, items_watch) = init;

        theme::load_css();

        let model = AppModel {
            item_count: opener.item_count(),
            opener: Rc::new(RefCell::new(opener)),
            source,
            items_watch,
            opening: false,
            item_markup: String::new(),
            tier_markup: String::new(),
            status: String::new(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let opener_draw = model.opener.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            let mut canvas = CairoCanvas::new(cr);
            if let Err(e) = opener_draw.borrow().draw(&mut canvas) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Open => {
                let started = self.opener.borrow_mut().open(Instant::now());
                match started {
                    Ok(Some(_)) => {
                        self.opening = true;
                        self.item_markup.clear();
                        self.tier_markup.clear();
                        self.status.clear();
                        self.start_ticker(sender);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        self.status = format!("{} ({})", e, self.source.path().display());
                    }
                }
            }
            AppMsg::Finished(result) => {
                let table = self.opener.borrow().table();
                self.item_markup = theme::tier_markup(table, result.tier, &result.item);
                self.tier_markup =
                    theme::tier_markup(table, result.tier, &format!("Tier: {}", result.tier));
                self.status = "Time to solve it!".to_string();
                self.opening = false;
            }
            AppMsg::ItemsChanged => self.reload_items(),
            AppMsg::LoadItems(path) => self.switch_source(path),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.opener.borrow_mut().apply_settings(new_config.reel.clone());
                    let items_path = new_config.items_path();
                    if items_path != self.source.path() {
                        self.switch_source(items_path);
                    }
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Drives the opener from a frame timer until it reports completion.
    fn start_ticker(&self, sender: ComponentSender<Self>) {
        let opener = self.opener.clone();
        let area = self.drawing_area.clone();
        area.queue_draw();
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            let tick = opener.borrow_mut().tick(Instant::now());
            if tick.redraw {
                area.queue_draw();
            }
            if let Some(result) = tick.finished {
                sender.input(AppMsg::Finished(result));
            }
            if tick.keep_ticking {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }

    /// Points the app and the item watcher at a new file, then loads it.
    fn switch_source(&mut self, path: PathBuf) {
        if let Err(e) = self.items_watch.try_send(path.clone()) {
            log::error!("Failed to watch {}: {}", path.display(), e);
        }
        self.source = TextFileSource::new(path);
        self.reload_items();
    }

    fn reload_items(&mut self) {
        let reloaded = self.opener.borrow_mut().reload(&self.source);
        match reloaded {
            Ok(count) => {
                self.item_count = count;
                self.status = format!("Loaded {} items", count);
            }
            Err(e) => {
                log::error!("Failed to reload {}: {}", self.source.path().display(), e);
                self.status = e.to_string();
            }
        }
    }
}
