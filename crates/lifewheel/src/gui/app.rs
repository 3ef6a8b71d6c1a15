use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel;
use gdk4::Key;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wheelkit::{Point, Wheel, WheelEvent, WheelLayout, WheelWidget, WidgetOptions};

/// Frame cadence of the value animation.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppModel {
    pub state: Rc<RefCell<WheelWidget>>,
    /// The wheel as configured; replay animates back to it.
    baseline: Wheel,
    title_text: String,
    item_text: String,
    status_text: String,
    editing_title: bool,
    editing_item: bool,
    show_labels: bool,
    tick_source: Option<glib::SourceId>,
    drawing_area: gtk::DrawingArea,
    title_entry: gtk::Entry,
    item_entry: gtk::Entry,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerPressed(Point),
    PointerDragged(Point),
    PointerReleased(Point),
    TitleClicked,
    ItemLabelClicked,
    CommitTitle(String),
    CommitItem(String),
    CancelEdit,
    ResetValues,
    Replay,
    AnimationTick,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, WidgetOptions, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Life Wheel"),
            set_default_size: (720, 780),
            add_css_class: "lifewheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == Key::Escape {
                        sender.input(AppMsg::CancelEdit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 6,

                gtk::Overlay {
                    set_vexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        add_css_class: "lifewheel-drawing-area",

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |_, x, y| {
                                sender.input(AppMsg::PointerPressed(Point::new(x, y)));
                            },
                            connect_drag_update[sender] => move |gesture, dx, dy| {
                                if let Some((sx, sy)) = gesture.start_point() {
                                    sender.input(AppMsg::PointerDragged(Point::new(sx + dx, sy + dy)));
                                }
                            },
                            connect_drag_end[sender] => move |gesture, dx, dy| {
                                if let Some((sx, sy)) = gesture.start_point() {
                                    sender.input(AppMsg::PointerReleased(Point::new(sx + dx, sy + dy)));
                                }
                            },
                        }
                    },

                    add_overlay = &gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_valign: gtk::Align::Start,
                        set_halign: gtk::Align::Center,
                        set_margin_top: 12,

                        #[name = "title_label"]
                        gtk::Label {
                            add_css_class: "lifewheel-title",
                            #[watch]
                            set_label: &model.title_text,
                            #[watch]
                            set_visible: model.show_labels && !model.editing_title,

                            add_controller = gtk::GestureClick {
                                connect_released[sender] => move |_, _, _, _| {
                                    sender.input(AppMsg::TitleClicked);
                                }
                            }
                        },

                        #[name = "title_entry"]
                        gtk::Entry {
                            #[watch]
                            set_visible: model.editing_title,
                            connect_activate[sender] => move |entry| {
                                sender.input(AppMsg::CommitTitle(entry.text().to_string()));
                            },
                        },
                    },

                    add_overlay = &gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_valign: gtk::Align::End,
                        set_halign: gtk::Align::Center,
                        set_margin_bottom: 12,

                        #[name = "item_label"]
                        gtk::Label {
                            add_css_class: "lifewheel-item",
                            #[watch]
                            set_label: &model.item_text,
                            #[watch]
                            set_visible: model.show_labels
                                && !model.editing_item
                                && !model.item_text.is_empty(),

                            add_controller = gtk::GestureClick {
                                connect_released[sender] => move |_, _, _, _| {
                                    sender.input(AppMsg::ItemLabelClicked);
                                }
                            }
                        },

                        #[name = "item_entry"]
                        gtk::Entry {
                            #[watch]
                            set_visible: model.editing_item,
                            connect_activate[sender] => move |entry| {
                                sender.input(AppMsg::CommitItem(entry.text().to_string()));
                            },
                        },
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_margin_start: 12,
                    set_margin_end: 12,
                    set_margin_bottom: 12,

                    gtk::Button {
                        set_label: "Reset",
                        connect_clicked => AppMsg::ResetValues,
                    },

                    gtk::Button {
                        set_label: "Replay",
                        connect_clicked => AppMsg::Replay,
                    },

                    gtk::Label {
                        add_css_class: "lifewheel-status",
                        set_hexpand: true,
                        set_xalign: 1.0,
                        #[watch]
                        set_label: &model.status_text,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (initial, options, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(WheelWidget::new(&initial, options)));

        let model = AppModel {
            state: state.clone(),
            title_text: initial.title().to_string(),
            status_text: format!("average {:.1}", initial.average_value()),
            baseline: initial,
            item_text: String::new(),
            editing_title: false,
            editing_item: false,
            show_labels: options.show_labels,
            tick_source: None,
            drawing_area: gtk::DrawingArea::default(),
            title_entry: gtk::Entry::default(),
            item_entry: gtk::Entry::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.title_entry = widgets.title_entry.clone();
        model.item_entry = widgets.item_entry.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let layout = WheelLayout::from_bounds(f64::from(width), f64::from(height));
                let state = state_draw.borrow();
                if let Err(e) = wheel::draw(
                    cr,
                    state.wheel(),
                    &layout,
                    state.selected(),
                    state.show_labels(),
                    &colors,
                ) {
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
            AppMsg::PointerPressed(point) => {
                self.finish_pending_edits();
                self.stop_ticking();
                let layout = self.layout();
                let events = self.state.borrow_mut().pointer_pressed(point, &layout);
                self.apply_events(&events);
                self.drawing_area.queue_draw();
            }
            AppMsg::PointerDragged(point) => {
                let layout = self.layout();
                let events = self.state.borrow_mut().pointer_dragged(point, &layout);
                self.apply_events(&events);
                self.drawing_area.queue_draw();
            }
            AppMsg::PointerReleased(point) => {
                let layout = self.layout();
                let events = self.state.borrow_mut().pointer_released(point, &layout);
                self.apply_events(&events);
                self.drawing_area.queue_draw();
            }
            AppMsg::TitleClicked => {
                self.finish_pending_edits();
                let prefill = self.state.borrow_mut().begin_title_edit();
                if let Some(text) = prefill {
                    self.editing_title = true;
                    self.title_entry.set_text(&text);
                    self.title_entry.grab_focus();
                }
            }
            AppMsg::ItemLabelClicked => {
                self.finish_pending_edits();
                self.begin_item_edit();
            }
            AppMsg::CommitTitle(text) => {
                self.editing_title = false;
                let result = self.state.borrow_mut().commit_edit(&text);
                match result {
                    Ok(()) => {
                        self.title_text = self.state.borrow().wheel().title().to_string();
                        self.status_text.clear();
                    }
                    Err(e) => self.status_text = e.to_string(),
                }
            }
            AppMsg::CommitItem(text) => {
                self.editing_item = false;
                let result = self.state.borrow_mut().commit_edit(&text);
                match result {
                    Ok(()) => {
                        let state = self.state.borrow();
                        if let Some(item) =
                            state.last_clicked().and_then(|i| state.wheel().item(i))
                        {
                            self.item_text = item.name().to_string();
                        }
                        drop(state);
                        self.status_text.clear();
                        self.drawing_area.queue_draw();
                    }
                    Err(e) => self.status_text = e.to_string(),
                }
            }
            AppMsg::CancelEdit => {
                self.state.borrow_mut().cancel_edit();
                self.editing_title = false;
                self.editing_item = false;
            }
            AppMsg::ResetValues => {
                self.stop_ticking();
                self.state.borrow_mut().reset_values();
                self.update_average();
                self.drawing_area.queue_draw();
            }
            AppMsg::Replay => {
                let result = self
                    .state
                    .borrow_mut()
                    .animate_to(&self.baseline, Instant::now());
                match result {
                    Ok(events) => {
                        if !events.contains(&WheelEvent::AnimationFinished) {
                            self.start_ticking(&sender);
                        }
                    }
                    Err(e) => {
                        log::error!("Cannot replay the baseline wheel: {}", e);
                        self.status_text = e.to_string();
                    }
                }
            }
            AppMsg::AnimationTick => {
                let events = self.state.borrow_mut().tick(Instant::now());
                if events.contains(&WheelEvent::AnimationFinished) {
                    self.stop_ticking();
                    self.update_average();
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config().and_then(|c| c.build_wheel()) {
                Ok(wheel) => {
                    self.stop_ticking();
                    self.editing_title = false;
                    self.editing_item = false;
                    self.item_text.clear();
                    self.title_text = wheel.title().to_string();
                    self.state.borrow_mut().set_wheel(&wheel);
                    self.baseline = wheel;
                    self.update_average();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn layout(&self) -> WheelLayout {
        WheelLayout::from_bounds(
            f64::from(self.drawing_area.width()),
            f64::from(self.drawing_area.height()),
        )
    }

    fn apply_events(&mut self, events: &[WheelEvent]) {
        for event in events {
            match event {
                WheelEvent::ItemSelected(index) => {
                    let name = self
                        .state
                        .borrow()
                        .wheel()
                        .item(*index)
                        .map(|item| item.name().to_string());
                    if let Some(name) = name {
                        self.item_text = name;
                    }
                    self.begin_item_edit();
                }
                WheelEvent::ValueChanged { .. } => self.update_average(),
                WheelEvent::AnimationFinished => {}
            }
        }
    }

    /// Opens the inline editor for the last clicked item, when allowed.
    fn begin_item_edit(&mut self) {
        let prefill = self.state.borrow_mut().begin_item_edit();
        if let Some(text) = prefill {
            self.editing_item = true;
            self.item_entry.set_text(&text);
            self.item_entry.grab_focus();
        }
    }

    /// Commits whichever inline edit is open before another interaction
    /// takes over, keeping the entered text instead of dropping it.
    /// Rejected text is reported in the status line, same as on Enter.
    fn finish_pending_edits(&mut self) {
        if self.editing_title {
            let text = self.title_entry.text().to_string();
            self.editing_title = false;
            let result = self.state.borrow_mut().commit_edit(&text);
            match result {
                Ok(()) => self.title_text = self.state.borrow().wheel().title().to_string(),
                Err(e) => self.status_text = e.to_string(),
            }
        }
        if self.editing_item {
            let text = self.item_entry.text().to_string();
            self.editing_item = false;
            if let Err(e) = self.state.borrow_mut().commit_edit(&text) {
                self.status_text = e.to_string();
            }
        }
    }

    fn update_average(&mut self) {
        self.status_text = format!("average {:.1}", self.state.borrow().wheel().average_value());
    }

    fn start_ticking(&mut self, sender: &ComponentSender<Self>) {
        if self.tick_source.is_some() {
            return;
        }
        let sender = sender.clone();
        self.tick_source = Some(glib::timeout_add_local(TICK_INTERVAL, move || {
            sender.input(AppMsg::AnimationTick);
            glib::ControlFlow::Continue
        }));
    }

    fn stop_ticking(&mut self) {
        if let Some(source) = self.tick_source.take() {
            source.remove();
        }
    }
}
