use crate::config::{self, Config, ItemConfig};
use crate::events::{AppEvent, Command};
use crate::gesture::{GestureEvent, GestureSource, PressureRecognizer, Touch};
use crate::menu::surface::HandleAllocator;
use crate::menu::{
    Container, ContextualMenu, DataSource, LabelStyle, MenuDelegate, RecordingSurface, Title,
    View,
};
use orbit::{Insets, Point, Rect, Size};
use std::cell::Cell;
use std::rc::Rc;

struct ItemCount(usize);

impl DataSource for ItemCount {
    fn item_count(&self) -> usize {
        self.0
    }
}

/// Serves the items listed in the config file.
struct ConfiguredItems {
    items: Vec<ItemConfig>,
    handles: HandleAllocator,
    last_selected: Rc<Cell<Option<usize>>>,
}

impl ConfiguredItems {
    fn title_of(&self, index: usize) -> &str {
        self.items
            .get(index)
            .and_then(|item| item.title.as_deref())
            .unwrap_or("")
    }
}

impl MenuDelegate for ConfiguredItems {
    fn content_view(&mut self, index: usize) -> View {
        let side = self.items.get(index).map_or(0.0, |item| item.size);
        View::new(self.handles.next(), Size::square(side))
    }

    fn title(&mut self, index: usize) -> Option<Title> {
        self.items
            .get(index)
            .and_then(|item| item.title.clone())
            .map(Title::from)
    }

    fn did_activate(&mut self) {
        log::info!("menu shown with {} items", self.items.len());
    }

    fn did_dismiss(&mut self) {
        log::info!("menu dismissed");
    }

    fn did_select(&mut self, index: usize) {
        log::info!("selected item {} ({})", index, self.title_of(index));
        self.last_selected.set(Some(index));
    }

    fn did_highlight(&mut self, index: usize) {
        log::debug!("highlighted item {} ({})", index, self.title_of(index));
    }
}

/// Drives a headless menu from socket commands.
pub struct Host {
    menu: ContextualMenu<RecordingSurface>,
    handles: HandleAllocator,
    pressure: PressureRecognizer,
    last_selected: Rc<Cell<Option<usize>>>,
}

impl Host {
    pub fn new(config: &Config) -> Self {
        let handles = HandleAllocator::default();
        let menu = ContextualMenu::new(
            RecordingSurface::new(handles.clone()),
            config.layout,
            config.trigger,
        );
        let mut host = Self {
            menu,
            handles,
            pressure: PressureRecognizer::default(),
            last_selected: Rc::new(Cell::new(None)),
        };
        host.apply_config(config);
        host
    }

    pub fn menu(&self) -> &ContextualMenu<RecordingSurface> {
        &self.menu
    }

    /// Index of the most recently selected item.
    pub fn last_selected(&self) -> Option<usize> {
        self.last_selected.get()
    }

    pub fn apply_config(&mut self, config: &Config) {
        self.menu.set_layout_config(config.layout);
        self.menu.set_label_style(LabelStyle::from(&config.label));
        self.menu
            .set_data_source(Box::new(ItemCount(config.items.len())));
        self.menu.set_delegate(Box::new(ConfiguredItems {
            items: config.items.clone(),
            handles: self.handles.clone(),
            last_selected: self.last_selected.clone(),
        }));
        if self.menu.trigger() != config.trigger {
            self.menu.set_activation_trigger(config.trigger);
        }
        self.menu.reload();
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Command(command) => self.dispatch(command),
            AppEvent::ConfigReload => {
                log::info!("Config changed, reloading");
                let config = config::load_or_default();
                self.apply_config(&config);
            }
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        log::debug!("{:?}", command);
        match command {
            Command::Attach {
                width,
                height,
                top_inset,
            } => self.menu.attach(Container::new(
                Rect::new(0.0, 0.0, width, height),
                Insets::top(top_inset),
            )),
            Command::Detach => self.menu.detach(),
            Command::Press(point) => self
                .menu
                .handle_gesture(GestureSource::LongPress, GestureEvent::began(point)),
            Command::Drag(point) => self
                .menu
                .handle_gesture(GestureSource::LongPress, GestureEvent::moved(point)),
            Command::Release => self.menu.handle_gesture(
                GestureSource::LongPress,
                GestureEvent::ended(self.menu.origin()),
            ),
            Command::Cancel => self.menu.handle_gesture(
                GestureSource::LongPress,
                GestureEvent::cancelled(self.menu.origin()),
            ),
            Command::Force {
                phase,
                location,
                force,
                maximum_possible_force,
            } => {
                let touch = Touch {
                    location,
                    force,
                    maximum_possible_force,
                };
                if let Some(event) = self.pressure.recognize(phase, &[touch]) {
                    self.menu
                        .handle_gesture(GestureSource::PressureTouch, event);
                }
            }
            Command::Tap(point) => self
                .menu
                .handle_gesture(GestureSource::Tap, GestureEvent::ended(point)),
            Command::Item(index) => self.menu.select(index),
            Command::Scrim => self.menu.scrim_tapped(),
            Command::Trigger(trigger) => self.menu.set_activation_trigger(trigger),
        }
        self.complete_animations();
        log::debug!("menu is {}", self.menu.phase());
    }

    // nothing is drawn, so every animation is over as soon as it starts
    fn complete_animations(&mut self) {
        loop {
            let finished = self.menu.surface_mut().take_finished();
            if finished.is_empty() {
                break;
            }
            for id in finished {
                self.menu.animation_finished(id);
            }
        }
    }

    pub fn origin(&self) -> Point {
        self.menu.origin()
    }
}
