use std::sync::Arc;
use std::time::Duration;

use egui::RichText;
use news_core::view::{ArticleCard, DetailView, ImageFailures, ImageSource, ListView};
use news_core::{
    Article, BookmarkEvent, BookmarksController, FeedError, FileStore, FocusEvent, HomeController,
    LoadOutcome, Navigator, Route, ScreenPhase, Tab,
};
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

const SUMMARY_PREVIEW_CHARS: usize = 160;
const BOOKMARK_BUTTON_WIDTH: f32 = 40.0;

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub home: HomeController<FileStore>,
    pub saved: BookmarksController<FileStore>,
}

enum UiAction {
    Navigate(Route),
    Back,
    Toggle(Article),
    Remove(Article),
    OpenLink(String),
    ImageFailed(ImageSource),
}

pub struct NewsApp {
    runtime: Arc<Runtime>,
    home: HomeController<FileStore>,
    saved: BookmarksController<FileStore>,
    navigator: Navigator,
    feed_rx: mpsc::Receiver<LoadOutcome<FeedError>>,
    bookmark_events: broadcast::Receiver<BookmarkEvent>,
    images: ImageFailures,
    home_view: Option<ListView>,
    saved_view: Option<ListView>,
}

impl NewsApp {
    pub fn new(init: AppInit) -> Self {
        let (feed_tx, feed_rx) = mpsc::channel(1);
        let bookmark_events = init.home.bookmarks().subscribe();
        let mut app = Self {
            runtime: init.runtime,
            home: init.home,
            saved: init.saved,
            navigator: Navigator::new(),
            feed_rx,
            bookmark_events,
            images: ImageFailures::default(),
            home_view: None,
            saved_view: None,
        };
        app.mount_home(feed_tx);
        app.apply_focus(FocusEvent(Tab::Home));
        app
    }

    /// Fetches on the runtime so the spinner keeps rendering meanwhile.
    fn mount_home(&mut self, feed_tx: mpsc::Sender<LoadOutcome<FeedError>>) {
        self.home.begin_loading();
        let client = self.home.client().clone();
        self.runtime.spawn(async move {
            let outcome = client.fetch_feed().await;
            if feed_tx.send(outcome).await.is_err() {
                warn!("home screen closed before the feed arrived");
            }
        });
    }

    fn refresh_updates(&mut self) {
        while let Ok(outcome) = self.feed_rx.try_recv() {
            self.home.finish_loading(outcome);
            self.home_view = None;
        }
        loop {
            match self.bookmark_events.try_recv() {
                Ok(event) => {
                    debug!(?event, "bookmarks changed");
                    self.invalidate_views();
                }
                Err(TryRecvError::Lagged(_)) => self.invalidate_views(),
                Err(_) => break,
            }
        }
    }

    fn invalidate_views(&mut self) {
        self.home_view = None;
        self.saved_view = None;
    }

    fn apply_focus(&mut self, focus: FocusEvent) {
        let FocusEvent(tab) = focus;
        let reloaded = match tab {
            Tab::Home => self.runtime.block_on(self.home.on_focus()),
            Tab::Bookmarks => self.runtime.block_on(self.saved.on_focus()),
        };
        if let Err(err) = reloaded {
            debug!(error = %err, ?tab, "bookmarks reload fell back to empty");
        }
        self.invalidate_views();
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Navigate(route) => {
                if let Some(focus) = self.navigator.navigate(route) {
                    self.apply_focus(focus);
                }
            }
            UiAction::Back => {
                if let Some(focus) = self.navigator.back() {
                    self.apply_focus(focus);
                }
            }
            UiAction::Toggle(article) => {
                if let Err(err) = self.runtime.block_on(self.home.toggle_bookmark(&article)) {
                    debug!(error = %err, "bookmark kept in memory only");
                }
            }
            UiAction::Remove(article) => {
                if let Err(err) = self.runtime.block_on(self.saved.remove_bookmark(&article)) {
                    debug!(error = %err, "bookmark removal kept in memory only");
                }
            }
            UiAction::OpenLink(url) => {
                if let Err(err) = webbrowser::open(&url) {
                    warn!(error = %err, url = %url, "failed to open browser");
                }
            }
            UiAction::ImageFailed(source) => {
                if self.images.record_failure(&source) {
                    debug!(uri = %source.uri(), "image failed to load, using placeholder");
                    self.invalidate_views();
                }
            }
        }
    }

    fn list_view(&mut self, tab: Tab) -> ListView {
        let slot = match tab {
            Tab::Home => &mut self.home_view,
            Tab::Bookmarks => &mut self.saved_view,
        };
        let view = match slot.take() {
            Some(view) => view,
            None => match tab {
                Tab::Home => self.runtime.block_on(self.home.list_view(&self.images)),
                Tab::Bookmarks => self.runtime.block_on(self.saved.list_view(&self.images)),
            },
        };
        *slot = Some(view.clone());
        view
    }

    fn draw_tabs(&self, ctx: &egui::Context) -> Option<UiAction> {
        let mut action = None;
        let on_tab = !self.navigator.can_go_back();
        let tab = self.navigator.tab();
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(on_tab && tab == Tab::Home, "🏠 Home")
                    .clicked()
                {
                    action = Some(UiAction::Navigate(Route::Home));
                }
                if ui
                    .selectable_label(on_tab && tab == Tab::Bookmarks, "🔖 Bookmarks")
                    .clicked()
                {
                    action = Some(UiAction::Navigate(Route::Bookmarks));
                }
            });
        });
        action
    }
}

fn draw_list(
    ui: &mut egui::Ui,
    view: &ListView,
    tab: Tab,
    loading: bool,
    actions: &mut Vec<UiAction>,
) {
    if loading {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
        });
        return;
    }

    if let Some(header) = view.visible_header() {
        ui.heading(RichText::new(header).size(18.0));
        ui.separator();
    }

    if view.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label(RichText::new(view.empty.title).strong().size(16.0));
            ui.label(RichText::new(view.empty.subtitle).size(14.0));
            if let Some(label) = view.empty.action {
                ui.add_space(12.0);
                if ui.button(label).clicked() {
                    actions.push(UiAction::Navigate(Route::Home));
                }
            }
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for card in &view.cards {
                draw_card(ui, card, tab, actions);
            }
        });
}

/// Draws the image and reports a remote url whose load errored, so the next
/// frame resolves it to the placeholder.
fn draw_image(ui: &mut egui::Ui, source: &ImageSource, size: egui::Vec2, actions: &mut Vec<UiAction>) {
    if let ImageSource::Remote(uri) = source {
        if ui
            .ctx()
            .try_load_image(uri, egui::load::SizeHint::default())
            .is_err()
        {
            actions.push(UiAction::ImageFailed(source.clone()));
        }
    }
    ui.add(
        egui::Image::new(source.uri())
            .fit_to_exact_size(size)
            .rounding(6.0),
    );
}

fn draw_card(ui: &mut egui::Ui, card: &ArticleCard, tab: Tab, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        let body = ui.group(|ui| {
            ui.set_width((ui.available_width() - BOOKMARK_BUTTON_WIDTH).max(0.0));
            ui.horizontal(|ui| {
                draw_image(ui, &card.image, egui::vec2(80.0, 80.0), actions);
                ui.vertical(|ui| {
                    ui.add(
                        egui::Label::new(RichText::new(&card.article.title).strong().size(15.0))
                            .wrap(true),
                    );
                    ui.label(RichText::new(&card.meta).weak().size(12.0));
                    ui.add(egui::Label::new(preview(&card.article.summary)).wrap(true));
                });
            });
        });
        let body = body
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if body.clicked() {
            actions.push(UiAction::Navigate(card.detail_route()));
        }

        let icon = if card.bookmarked { "🔖" } else { "☆" };
        if ui.button(icon).on_hover_text("Bookmark").clicked() {
            let article = card.article.clone();
            actions.push(match tab {
                Tab::Home => UiAction::Toggle(article),
                Tab::Bookmarks => UiAction::Remove(article),
            });
        }
    });
    ui.add_space(4.0);
}

fn draw_detail(ui: &mut egui::Ui, detail: &DetailView, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        if ui.button("← Back").clicked() {
            actions.push(UiAction::Back);
        }
        ui.separator();
        ui.heading(RichText::new("Article Details").size(18.0));
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let width = ui.available_width();
            draw_image(ui, &detail.image, egui::vec2(width, 200.0), actions);
            ui.add_space(8.0);
            ui.add(egui::Label::new(RichText::new(&detail.title).strong().size(22.0)).wrap(true));
            ui.label(RichText::new(&detail.meta).weak().size(13.0));
            ui.add_space(10.0);
            ui.add(egui::Label::new(RichText::new(&detail.summary).size(15.0)).wrap(true));
            ui.add_space(12.0);
            if ui.link(detail.link_label).clicked() {
                actions.push(UiAction::OpenLink(detail.link.clone()));
            }
        });
}

fn preview(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
        return summary.to_owned();
    }
    let cut: String = summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}

impl eframe::App for NewsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_updates();

        let mut actions: Vec<UiAction> = self.draw_tabs(ctx).into_iter().collect();

        let route = self.navigator.current();
        let tab = self.navigator.tab();
        let loading = tab == Tab::Home && self.home.phase() != ScreenPhase::Ready;
        let list = match route {
            Route::Detail(_) => None,
            _ => Some(self.list_view(tab)),
        };
        let images = &self.images;

        egui::CentralPanel::default().show(ctx, |ui| match &route {
            Route::Detail(article) => {
                draw_detail(ui, &DetailView::new(article, images), &mut actions);
            }
            _ => {
                if let Some(view) = &list {
                    draw_list(ui, view, tab, loading, &mut actions);
                }
            }
        });

        if loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        for action in actions {
            self.apply(action);
        }
    }
}
