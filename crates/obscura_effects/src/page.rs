//! Portfolio page orchestration
//!
//! [`PortfolioPage`] owns the scheduler, the single input writer and every
//! effect on the page. The host forwards its events through
//! [`PortfolioPage::handle_event`] and calls [`PortfolioPage::frame`] once
//! per display frame; everything else is read back through accessors.
//!
//! ```ignore
//! let mut page = PortfolioPage::new(layout, EffectsConfig::standard())?;
//! page.handle_event(PageEvent::Loaded)?;
//! loop {
//!     for event in host.poll_events() {
//!         page.handle_event(event)?;
//!     }
//!     if let Some(y) = page.frame(host.now_ms())? {
//!         host.scroll_to(y);
//!     }
//!     host.paint(&page);
//! }
//! ```

use obscura_animation::AnimationScheduler;
use obscura_core::{InputSnapshot, InputTracker, Key, Point, Rect, Size};

use crate::config::EffectsConfig;
use crate::counter::Counter;
use crate::cursor::{CursorVisual, CustomCursor};
use crate::distortion::{DistortionFilter, HoverDistortion};
use crate::entrance::{GridItemVisual, GridReveal, HeroTitle, Loader, RevealSet};
use crate::error::{EffectError, Result};
use crate::form::{ContactForm, Field, SubmitOutcome};
use crate::lazy::{self, LazyImage};
use crate::lightbox::{GalleryImage, Lightbox};
use crate::navigation::NavigationMenu;
use crate::notification::{Notification, NotificationCenter};
use crate::scroll::{self, HeroContent, HeroParallax, ParallaxLayer, SmoothScroller};
use crate::tilt::{MagneticButton, TiltCard, TiltTransform};
use crate::visibility::{ObserverOptions, VisibilityObserver};

// ============================================================================
// Layout
// ============================================================================

/// A portfolio grid item
#[derive(Clone, Debug, Default)]
pub struct GridItemLayout {
    /// Bounds in document coordinates
    pub rect: Rect,
    pub image: GalleryImage,
}

/// A statistic with a `data-count` attribute
#[derive(Clone, Debug, Default)]
pub struct CounterLayout {
    pub rect: Rect,
    pub raw_count: String,
}

/// An image with a deferred `data-src`
#[derive(Clone, Debug, Default)]
pub struct LazyImageLayout {
    pub rect: Rect,
    pub pending_src: String,
}

/// A section reachable through an in-page link
#[derive(Clone, Debug, Default)]
pub struct AnchorLayout {
    /// Element id, without the leading `#`
    pub id: String,
    pub rect: Rect,
}

/// Everything the page needs to know about the document
///
/// All rects are in document coordinates (independent of scroll).
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    pub viewport: Size,
    pub document_height: f32,
    pub hero: Rect,
    pub title_words: usize,
    pub grid: Vec<GridItemLayout>,
    /// `[data-reveal]` elements
    pub reveals: Vec<Rect>,
    pub counters: Vec<CounterLayout>,
    pub lazy_images: Vec<LazyImageLayout>,
    /// Raw `data-parallax` value of each parallax layer
    pub parallax: Vec<Option<String>>,
    pub anchors: Vec<AnchorLayout>,
    pub submit_button: Option<Rect>,
    /// Links and buttons that enlarge the cursor
    pub interactive: Vec<Rect>,
}

// ============================================================================
// Events
// ============================================================================

/// Host events the page reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// The document and its images finished loading
    Loaded,
    /// Pointer moved, in viewport coordinates
    PointerMoved { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    /// Pointer left the window
    PointerLeftWindow,
    /// Pointer came back into the window
    PointerEnteredWindow,
    /// The page scrolled to `y`
    Scrolled { y: f32 },
    /// The window was resized
    Resized { width: f32, height: f32 },
    /// Content changed the total document height
    DocumentHeightChanged { height: f32 },
    /// A key was pressed anywhere on the page
    Key(Key),
    MenuToggleClicked,
    MenuLinkClicked,
    /// A portfolio grid item was clicked
    GridItemClicked(usize),
    LightboxCloseClicked,
    LightboxPrevClicked,
    LightboxNextClicked,
    /// Click on the lightbox outside the image
    LightboxBackdropClicked,
    /// Touch began on the lightbox, screen x
    TouchStart { x: f32 },
    /// Touch ended on the lightbox, screen x
    TouchEnd { x: f32 },
    /// An in-page link was followed; `href` includes the `#`
    AnchorClicked { href: String },
    FieldChanged { field: Field, value: String },
    FieldFocused(Field),
    FieldBlurred(Field),
    FormSubmitted,
    /// The host reports the pointer over an interactive element it knows
    /// about but the layout does not list
    InteractiveHover(bool),
}

// ============================================================================
// Page
// ============================================================================

/// The whole interactive portfolio page
pub struct PortfolioPage {
    config: EffectsConfig,
    scheduler: AnimationScheduler,
    input: InputTracker,
    layout: PageLayout,

    cursor: CustomCursor,
    tilts: Vec<TiltCard>,
    distortions: Vec<HoverDistortion>,
    magnetic: Option<MagneticButton>,
    host_hover: bool,

    loader: Loader,
    hero_title: HeroTitle,
    grid_reveal: GridReveal,
    reveals: RevealSet,
    counters: Vec<Counter>,
    lazy_images: Vec<LazyImage>,

    hero: HeroParallax,
    parallax: Vec<ParallaxLayer>,
    progress: f32,
    scroller: SmoothScroller,

    menu: NavigationMenu,
    lightbox: Lightbox,
    notifications: NotificationCenter,
    form: ContactForm,

    reveal_observer: VisibilityObserver<usize>,
    grid_observer: VisibilityObserver<usize>,
    counter_observer: VisibilityObserver<usize>,
    lazy_observer: VisibilityObserver<usize>,
}

fn observer(supported: bool, options: ObserverOptions) -> VisibilityObserver<usize> {
    if supported {
        VisibilityObserver::new(options)
    } else {
        VisibilityObserver::unsupported(options)
    }
}

impl PortfolioPage {
    pub fn new(layout: PageLayout, config: EffectsConfig) -> Result<Self> {
        config.validate()?;

        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let scale = config.duration_scale;
        let timing = &config.timing;
        let vis = &config.visibility;

        let tilts = layout
            .grid
            .iter()
            .map(|item| TiltCard::new(handle.clone(), item.rect, &config.tilt))
            .collect();
        let distortions = layout
            .grid
            .iter()
            .map(|_| HoverDistortion::new(handle.clone(), timing, scale))
            .collect();
        let magnetic = layout
            .submit_button
            .map(|rect| MagneticButton::new(handle.clone(), rect, &config.tilt));

        let mut counter_observer = observer(
            vis.observer_supported,
            ObserverOptions::threshold(vis.counter_threshold),
        );
        let mut counters = Vec::new();
        for item in &layout.counters {
            match Counter::parse(handle.clone(), &item.raw_count) {
                Ok(counter) => {
                    counter_observer.observe(counters.len(), item.rect);
                    counters.push(counter);
                }
                Err(err) => tracing::warn!(error = %err, "skipping counter"),
            }
        }

        let mut reveal_observer = observer(
            vis.observer_supported,
            ObserverOptions::threshold(vis.reveal_threshold),
        );
        for (index, rect) in layout.reveals.iter().enumerate() {
            reveal_observer.observe(index, *rect);
        }

        let mut grid_observer = observer(
            vis.observer_supported,
            ObserverOptions::threshold(vis.grid_threshold),
        );
        for (index, item) in layout.grid.iter().enumerate() {
            grid_observer.observe(index, item.rect);
        }

        let mut lazy_images: Vec<LazyImage> = layout
            .lazy_images
            .iter()
            .map(|item| LazyImage::new(item.pending_src.clone()))
            .collect();
        let mut lazy_observer = VisibilityObserver::new(
            ObserverOptions::threshold(vis.lazy_threshold).with_margin(0.0, vis.lazy_margin_y),
        );
        if vis.observer_supported {
            for (index, item) in layout.lazy_images.iter().enumerate() {
                lazy_observer.observe(index, item.rect);
            }
        } else {
            lazy::load_all(&mut lazy_images);
        }

        let notifications = NotificationCenter::new(handle.clone(), timing, scale);
        let form = ContactForm::new(handle.clone(), notifications.clone(), timing.submit_ms);
        let gallery = layout.grid.iter().map(|item| item.image.clone()).collect();

        let mut cursor = CustomCursor::new(handle.clone(), config.cursor.clone());
        cursor.start()?;

        let page = Self {
            scheduler: scheduler.clone(),
            input: InputTracker::new(layout.viewport, layout.document_height),
            cursor,
            tilts,
            distortions,
            magnetic,
            host_hover: false,
            loader: Loader::new(handle.clone(), timing.loader_ms),
            hero_title: HeroTitle::new(layout.title_words, timing.title_base_s, timing.title_step_s),
            grid_reveal: GridReveal::new(
                handle.clone(),
                layout.grid.len(),
                timing.grid_stagger_ms,
                timing.grid_reveal_ms * scale,
            ),
            reveals: RevealSet::new(layout.reveals.len()),
            counters,
            lazy_images,
            hero: HeroParallax::new(layout.hero.height(), config.scroll.hero_parallax),
            parallax: layout
                .parallax
                .iter()
                .map(|attr| {
                    ParallaxLayer::from_attr(attr.as_deref(), config.scroll.default_parallax_speed)
                })
                .collect(),
            progress: 0.0,
            scroller: SmoothScroller::new(handle, timing.smooth_scroll_ms * scale),
            menu: NavigationMenu::new(),
            lightbox: Lightbox::new(gallery, config.scroll.swipe_threshold),
            notifications,
            form,
            reveal_observer,
            grid_observer,
            counter_observer,
            lazy_observer,
            layout,
            config,
        };
        tracing::info!(
            grid_items = page.tilts.len(),
            counters = page.counters.len(),
            reduced_motion = page.config.reduced_motion,
            "portfolio page ready"
        );
        Ok(page)
    }

    /// Route one host event
    pub fn handle_event(&mut self, event: PageEvent) -> Result<()> {
        tracing::trace!(?event, "page event");
        match event {
            PageEvent::Loaded => self.loader.page_loaded()?,
            PageEvent::PointerMoved { x, y } => {
                self.input.pointer_moved(Point::new(x, y));
                self.cursor.pointer_moved()?;
                self.update_hover()?;
            }
            PageEvent::PointerDown => {
                self.input.pointer_pressed();
                self.cursor.pointer_down();
            }
            PageEvent::PointerUp => {
                self.input.pointer_released();
                self.cursor.pointer_up();
            }
            PageEvent::PointerLeftWindow => {
                self.input.pointer_left_window();
                self.cursor.window_left();
                self.update_hover()?;
            }
            PageEvent::PointerEnteredWindow => {
                self.input.pointer_entered_window();
                self.cursor.window_entered();
            }
            PageEvent::Scrolled { y } => {
                self.input.scrolled(y);
                if self.is_scroll_locked() {
                    tracing::debug!(y, "scroll recorded while locked");
                } else {
                    self.update_hover()?;
                }
            }
            PageEvent::Resized { width, height } => {
                self.input.resized(Size::new(width, height));
            }
            PageEvent::DocumentHeightChanged { height } => self.input.set_document_height(height),
            PageEvent::Key(key) => {
                self.menu.key_pressed(key);
                self.lightbox.key_pressed(key);
            }
            PageEvent::MenuToggleClicked => {
                self.menu.toggle();
            }
            PageEvent::MenuLinkClicked => self.menu.link_clicked(),
            PageEvent::GridItemClicked(index) => {
                let item = self
                    .layout
                    .grid
                    .get(index)
                    .ok_or(EffectError::MissingElement {
                        kind: "grid item",
                        index,
                    })?;
                self.lightbox.open(&item.image.src);
            }
            PageEvent::LightboxCloseClicked => self.lightbox.close(),
            PageEvent::LightboxPrevClicked => self.lightbox.prev(),
            PageEvent::LightboxNextClicked => self.lightbox.next(),
            PageEvent::LightboxBackdropClicked => self.lightbox.backdrop_clicked(),
            PageEvent::TouchStart { x } => self.lightbox.touch_started(x),
            PageEvent::TouchEnd { x } => self.lightbox.touch_ended(x),
            PageEvent::AnchorClicked { href } => self.follow_anchor(&href)?,
            PageEvent::FieldChanged { field, value } => self.form.set_value(field, value),
            PageEvent::FieldFocused(field) => self.form.focus(field),
            PageEvent::FieldBlurred(field) => self.form.blur(field),
            PageEvent::FormSubmitted => {
                let outcome = self.submit_form()?;
                tracing::debug!(?outcome, "form submitted");
            }
            PageEvent::InteractiveHover(hover) => {
                self.host_hover = hover;
                self.update_hover()?;
            }
        }
        Ok(())
    }

    /// Run one frame
    ///
    /// Returns the scroll offset the host should apply when a smooth scroll
    /// moved the page this frame.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<Option<f32>> {
        let snapshot = *self.input.begin_frame();
        self.scheduler.tick(timestamp_ms, &snapshot);

        let scrolled_to = self.scroller.take_request();
        if let Some(y) = scrolled_to {
            self.input.scrolled(y);
        }
        let input = *self.input.snapshot();

        if self.loader.is_hidden() && !self.hero_title.is_revealed() {
            self.hero_title.reveal();
        }

        if !self.is_scroll_locked() {
            self.progress = scroll::scroll_progress(&input);
            self.hero.update(input.scroll_y);
            for layer in &mut self.parallax {
                layer.update(input.scroll_y);
            }
        }

        self.check_visibility(&input)?;
        Ok(scrolled_to)
    }

    /// Submit the contact form directly
    pub fn submit_form(&mut self) -> Result<SubmitOutcome> {
        self.form.submit()
    }

    fn check_visibility(&mut self, input: &InputSnapshot) -> Result<()> {
        for index in self.reveal_observer.check(input) {
            self.reveals.mark_visible(index);
        }

        let batch = self.grid_observer.check(input);
        if !batch.is_empty() {
            self.grid_reveal.reveal(&batch)?;
        }

        let counter_ms = self.config.animated_ms(self.config.timing.counter_ms);
        for index in self.counter_observer.check(input) {
            if let Some(counter) = self.counters.get_mut(index) {
                counter.start(counter_ms)?;
            }
        }

        for index in self.lazy_observer.check(input) {
            if let Some(image) = self.lazy_images.get_mut(index) {
                image.load();
            }
        }
        Ok(())
    }

    fn update_hover(&mut self) -> Result<()> {
        let input = *self.input.snapshot();

        for (index, tilt) in self.tilts.iter_mut().enumerate() {
            let was_hovered = tilt.is_hovered();
            if input.pointer_inside {
                tilt.pointer_moved(&input)?;
            } else {
                tilt.pointer_left()?;
            }
            match (was_hovered, tilt.is_hovered()) {
                (false, true) => self.distortions[index].pointer_entered()?,
                (true, false) => self.distortions[index].pointer_left()?,
                _ => {}
            }
        }

        if let Some(button) = self.magnetic.as_mut() {
            if input.pointer_inside {
                button.pointer_moved(&input)?;
            } else {
                button.pointer_left()?;
            }
        }

        let over_listed = input.pointer_inside
            && self
                .layout
                .interactive
                .iter()
                .any(|rect| rect.offset(0.0, -input.scroll_y).contains(input.pointer));
        let hover = self.host_hover
            || over_listed
            || self.tilts.iter().any(TiltCard::is_hovered)
            || self.magnetic.as_ref().is_some_and(MagneticButton::is_hovered);
        self.cursor.set_hover(hover);
        Ok(())
    }

    fn follow_anchor(&mut self, href: &str) -> Result<()> {
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Ok(());
        };
        let Some(anchor) = self.layout.anchors.iter().find(|a| a.id == id) else {
            tracing::debug!(href, "anchor target not found");
            return Ok(());
        };

        let input = *self.input.snapshot();
        let element_top = anchor.rect.y() - input.scroll_y;
        if let Some(destination) = scroll::anchor_destination(
            href,
            element_top,
            input.scroll_y,
            self.config.scroll.header_offset,
        ) {
            self.scroller.scroll_to(&input, destination)?;
        }
        Ok(())
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Page scrolling is blocked while the loader, menu or lightbox is up
    pub fn is_scroll_locked(&self) -> bool {
        self.loader.locks_scroll() || self.menu.locks_scroll() || self.lightbox.locks_scroll()
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Transition speed overrides for the document root; empty unless
    /// reduced motion is on
    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        self.config
            .transition_speeds
            .map(|speeds| speeds.css_properties().to_vec())
            .unwrap_or_default()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn input(&self) -> &InputSnapshot {
        self.input.snapshot()
    }

    pub fn cursor(&self) -> CursorVisual {
        self.cursor.cursor()
    }

    pub fn cursor_follower(&self) -> CursorVisual {
        self.cursor.follower()
    }

    pub fn tilt(&self, index: usize) -> Option<TiltTransform> {
        self.tilts.get(index).map(TiltCard::transform)
    }

    pub fn tilt_css(&self, index: usize) -> Option<String> {
        self.tilts.get(index).map(TiltCard::css)
    }

    pub fn distortion(&self, index: usize) -> Option<DistortionFilter> {
        self.distortions.get(index).map(HoverDistortion::filter)
    }

    pub fn magnetic_css(&self) -> Option<String> {
        self.magnetic.as_ref().map(MagneticButton::css)
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn hero_title(&self) -> &HeroTitle {
        &self.hero_title
    }

    pub fn grid_visual(&self, index: usize) -> Option<GridItemVisual> {
        self.grid_reveal.visual(index)
    }

    pub fn reveals(&self) -> &RevealSet {
        &self.reveals
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn lazy_images(&self) -> &[LazyImage] {
        &self.lazy_images
    }

    /// Scroll progress bar width in percent
    pub fn scroll_progress(&self) -> f32 {
        self.progress
    }

    pub fn hero_content(&self) -> HeroContent {
        self.hero.content()
    }

    pub fn parallax_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.parallax.iter().map(|layer| layer.translate_y)
    }

    pub fn menu(&self) -> &NavigationMenu {
        &self.menu
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifications.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;

    fn layout() -> PageLayout {
        PageLayout {
            viewport: Size::new(1200.0, 800.0),
            document_height: 4000.0,
            hero: Rect::new(0.0, 0.0, 1200.0, 800.0),
            title_words: 3,
            grid: vec![
                GridItemLayout {
                    rect: Rect::new(0.0, 1000.0, 400.0, 300.0),
                    image: GalleryImage::new("a.jpg", "Dunes", "Landscape"),
                },
                GridItemLayout {
                    rect: Rect::new(400.0, 1000.0, 400.0, 300.0),
                    image: GalleryImage::new("b.jpg", "Market", "Street"),
                },
            ],
            reveals: vec![Rect::new(0.0, 900.0, 1200.0, 100.0)],
            counters: vec![
                CounterLayout {
                    rect: Rect::new(0.0, 2000.0, 200.0, 100.0),
                    raw_count: "150".into(),
                },
                CounterLayout {
                    rect: Rect::new(200.0, 2000.0, 200.0, 100.0),
                    raw_count: "many".into(),
                },
            ],
            lazy_images: vec![LazyImageLayout {
                rect: Rect::new(0.0, 3000.0, 400.0, 300.0),
                pending_src: "late.jpg".into(),
            }],
            parallax: vec![Some("0.2".into()), None],
            anchors: vec![AnchorLayout {
                id: "contact".into(),
                rect: Rect::new(0.0, 3100.0, 1200.0, 900.0),
            }],
            submit_button: Some(Rect::new(100.0, 3600.0, 200.0, 50.0)),
            interactive: vec![Rect::new(1100.0, 20.0, 60.0, 40.0)],
        }
    }

    fn loaded_page() -> PortfolioPage {
        let mut page = PortfolioPage::new(layout(), EffectsConfig::standard()).unwrap();
        page.handle_event(PageEvent::Loaded).unwrap();
        page.frame(0.0).unwrap();
        page.frame(2500.0).unwrap();
        page
    }

    #[test]
    fn test_loader_locks_scroll_until_hidden() {
        let mut page = PortfolioPage::new(layout(), EffectsConfig::standard()).unwrap();
        assert!(page.is_scroll_locked());
        page.handle_event(PageEvent::Loaded).unwrap();
        // the host offset is still recorded, scroll-linked effects wait
        page.handle_event(PageEvent::Scrolled { y: 500.0 }).unwrap();
        assert_eq!(page.input().scroll_y, 500.0);

        page.frame(0.0).unwrap();
        assert!(!page.hero_title().is_revealed());
        assert_eq!(page.scroll_progress(), 0.0);
        page.frame(2500.0).unwrap();
        assert!(!page.is_scroll_locked());
        assert!(page.hero_title().is_revealed());
        assert_eq!(page.hero_title().delays()[0], 2.5);
        assert!((page.scroll_progress() - 15.625).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_counter_is_skipped() {
        let page = PortfolioPage::new(layout(), EffectsConfig::standard()).unwrap();
        assert_eq!(page.counters().len(), 1);
        assert_eq!(page.counters()[0].target(), 150);
    }

    #[test]
    fn test_scroll_drives_linked_effects() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::Scrolled { y: 600.0 }).unwrap();
        page.frame(2600.0).unwrap();
        assert!(page.reveals().is_visible(0));
        let hero = page.hero_content();
        assert!((hero.translate_y - 180.0).abs() < 1e-3);
        assert!((hero.opacity - 0.25).abs() < 1e-6);

        page.handle_event(PageEvent::Scrolled { y: 1600.0 }).unwrap();
        page.frame(2700.0).unwrap();
        assert_eq!(page.scroll_progress(), 50.0);
        let offsets: Vec<f32> = page.parallax_offsets().collect();
        assert!((offsets[0] + 320.0).abs() < 1e-3);
        assert_eq!(offsets[1], -800.0);
        // past the hero: the last written value stays
        assert!((page.hero_content().opacity - 0.25).abs() < 1e-6);
        assert!(page.counters()[0].is_started());
        assert!(!page.lazy_images()[0].loaded);

        page.frame(2800.0).unwrap();
        page.frame(4800.0).unwrap();
        assert_eq!(page.counters()[0].value(), 150);
        assert_eq!(page.grid_visual(0), Some(GridItemVisual::SHOWN));
        assert_eq!(page.grid_visual(1), Some(GridItemVisual::SHOWN));
    }

    #[test]
    fn test_resize_changes_progress_range() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::DocumentHeightChanged { height: 2400.0 })
            .unwrap();
        page.handle_event(PageEvent::Resized {
            width: 1200.0,
            height: 400.0,
        })
        .unwrap();
        page.handle_event(PageEvent::Scrolled { y: 1000.0 }).unwrap();
        page.frame(2600.0).unwrap();
        assert_eq!(page.scroll_progress(), 50.0);
    }

    #[test]
    fn test_menu_and_lightbox_lock_scroll() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::MenuToggleClicked).unwrap();
        assert!(page.is_scroll_locked());
        page.handle_event(PageEvent::Key(Key::Escape)).unwrap();
        assert!(!page.is_scroll_locked());

        page.handle_event(PageEvent::GridItemClicked(1)).unwrap();
        assert!(page.is_scroll_locked());
        assert_eq!(page.lightbox().current().unwrap().title, "Market");
        page.handle_event(PageEvent::Key(Key::ArrowRight)).unwrap();
        assert_eq!(page.lightbox().current_index(), 0);
        page.handle_event(PageEvent::LightboxBackdropClicked).unwrap();
        assert!(!page.is_scroll_locked());

        let err = page.handle_event(PageEvent::GridItemClicked(7)).unwrap_err();
        assert!(matches!(err, EffectError::MissingElement { index: 7, .. }));
    }

    #[test]
    fn test_hovering_grid_item_tilts_and_colors() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::Scrolled { y: 600.0 }).unwrap();
        // grid item 0 now spans y 400..700 on screen
        page.handle_event(PageEvent::PointerMoved { x: 200.0, y: 550.0 }).unwrap();
        page.frame(2600.0).unwrap();

        assert_eq!(page.tilt(0).unwrap().scale, 1.02);
        assert_eq!(page.tilt(1).unwrap(), TiltTransform::REST);
        assert!(page.cursor().hover);

        page.frame(3200.0).unwrap();
        assert_eq!(page.distortion(0).unwrap().grayscale, 0.0);

        page.handle_event(PageEvent::PointerLeftWindow).unwrap();
        page.frame(3300.0).unwrap();
        assert_eq!(page.tilt(0).unwrap(), TiltTransform::REST);
        assert_eq!(page.cursor().opacity, 0.0);
        assert!(!page.cursor().hover);
    }

    #[test]
    fn test_anchor_click_scrolls_under_header() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::AnchorClicked { href: "#".into() })
            .unwrap();
        assert!(page.frame(2600.0).unwrap().is_none());

        page.handle_event(PageEvent::AnchorClicked {
            href: "#contact".into(),
        })
        .unwrap();
        page.frame(3000.0).unwrap();
        let last = page.frame(3600.0).unwrap();
        assert_eq!(last, Some(3000.0));
        assert_eq!(page.input().scroll_y, 3000.0);
    }

    #[test]
    fn test_form_submission_through_events() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::FormSubmitted).unwrap();
        assert_eq!(page.notification().unwrap().kind, NotificationKind::Error);

        for (field, value) in [
            (Field::Name, "Ada"),
            (Field::Email, "ada@example.com"),
            (Field::Message, "Prints, please"),
        ] {
            page.handle_event(PageEvent::FieldChanged {
                field,
                value: value.into(),
            })
            .unwrap();
        }
        assert_eq!(page.submit_form().unwrap(), SubmitOutcome::Sending);
        page.frame(2600.0).unwrap();
        page.frame(4100.0).unwrap();
        let shown = page.notification().unwrap();
        assert_eq!(shown.message, "Message sent successfully!");
        assert!(!page.form().is_sending());
    }

    #[test]
    fn test_reduced_motion_exposes_style_properties() {
        let page = PortfolioPage::new(layout(), EffectsConfig::standard()).unwrap();
        assert!(page.style_properties().is_empty());

        let page = PortfolioPage::new(layout(), EffectsConfig::reduced_motion()).unwrap();
        let props = page.style_properties();
        assert_eq!(props.len(), 3);
        assert_eq!(props[1], ("--transition-medium", "0.2s".to_string()));
    }

    #[test]
    fn test_bad_tilt_epsilon_fails_at_construction() {
        let mut config = EffectsConfig::standard();
        config.tilt.settle_epsilon = 0.0;
        let err = PortfolioPage::new(layout(), config).err().unwrap();
        assert!(matches!(err, EffectError::Config(_)));
    }

    #[test]
    fn test_unsupported_observation_falls_back() {
        let config = EffectsConfig::standard().with_observer_supported(false);
        let mut page = PortfolioPage::new(layout(), config).unwrap();
        assert_eq!(page.lazy_images()[0].src.as_deref(), Some("late.jpg"));
        assert!(!page.lazy_images()[0].loaded);

        page.frame(0.0).unwrap();
        assert!(page.reveals().is_visible(0));
        assert!(page.counters()[0].is_started());
    }
}
