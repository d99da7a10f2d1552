//! Headless Tour
//!
//! Drives a simulated portfolio page through a short visit with a fixed
//! 60 fps clock and logs what a renderer would paint:
//! - loader, then hero title delays
//! - pointer wandering over a grid item (tilt, distortion, cursor trail)
//! - scrolling past the stats, a smooth scroll to the contact section
//! - the lightbox and a contact form submission
//!
//! Optionally reads tuning from a TOML file given as the first argument.
//!
//! Run with: cargo run -p obscura_effects --example headless_tour [config.toml]

use anyhow::Context;
use obscura_effects::logging;
use obscura_effects::prelude::*;
use obscura_effects::{AnchorLayout, CounterLayout, GalleryImage, GridItemLayout, LazyImageLayout};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {path}"))?;
            EffectsConfig::from_toml_str(&text)?
        }
        None => EffectsConfig::standard(),
    };

    let mut tour = Tour {
        page: PortfolioPage::new(layout(), config)?,
        now_ms: 0.0,
    };

    tour.send(PageEvent::Loaded)?;
    tour.run_for(2600.0)?;
    tracing::info!(
        locked = tour.page.is_scroll_locked(),
        delays = ?tour.page.hero_title().delays(),
        "loader done"
    );

    tour.send(PageEvent::Scrolled { y: 700.0 })?;
    for step in 0..30 {
        let x = 100.0 + step as f32 * 10.0;
        tour.send(PageEvent::PointerMoved { x, y: 500.0 })?;
        tour.run_for(FRAME_MS * 2.0)?;
    }
    let cursor = tour.page.cursor();
    let follower = tour.page.cursor_follower();
    let tilt = tour.page.tilt_css(0).unwrap_or_default();
    tracing::info!(
        %tilt,
        filter = ?tour.page.distortion(0),
        cursor = ?(cursor.position.x, cursor.position.y),
        follower = ?(follower.position.x, follower.position.y),
        hover = cursor.hover,
        "hovering the first photograph"
    );

    tour.send(PageEvent::Scrolled { y: 1700.0 })?;
    tour.run_for(2200.0)?;
    let counts: Vec<String> = tour.page.counters().iter().map(|c| c.text()).collect();
    tracing::info!(progress = tour.page.scroll_progress(), ?counts, "stats counted");

    tour.send(PageEvent::AnchorClicked {
        href: "#contact".into(),
    })?;
    tour.run_for(700.0)?;
    tracing::info!(scroll_y = tour.page.input().scroll_y, "arrived at contact");

    tour.send(PageEvent::GridItemClicked(1))?;
    tour.send(PageEvent::Key(Key::ArrowRight))?;
    let showing = tour
        .page
        .lightbox()
        .current()
        .map(|img| img.title.clone())
        .unwrap_or_default();
    tracing::info!(%showing, "lightbox");
    tour.send(PageEvent::Key(Key::Escape))?;

    for (field, value) in [
        (Field::Name, "Ada"),
        (Field::Email, "ada@example.com"),
        (Field::Message, "Do you sell prints?"),
    ] {
        tour.send(PageEvent::FieldFocused(field))?;
        tour.send(PageEvent::FieldChanged {
            field,
            value: value.to_string(),
        })?;
        tour.send(PageEvent::FieldBlurred(field))?;
    }
    tour.send(PageEvent::FormSubmitted)?;
    tracing::info!(button = tour.page.form().button_text(), "submitting");
    tour.run_for(1600.0)?;
    if let Some(toast) = tour.page.notification() {
        tracing::info!(message = %toast.message, background = toast.kind.background(), "toast");
    }

    tour.run_for(4000.0)?;
    tracing::info!(
        frames = tour.page.scheduler().frame_count(),
        live = tour.page.scheduler().session_count(),
        "tour finished"
    );
    Ok(())
}

struct Tour {
    page: PortfolioPage,
    now_ms: f64,
}

impl Tour {
    fn send(&mut self, event: PageEvent) -> Result<()> {
        self.page.handle_event(event)
    }

    fn run_for(&mut self, ms: f64) -> Result<()> {
        let end = self.now_ms + ms;
        while self.now_ms < end {
            if let Some(y) = self.page.frame(self.now_ms)? {
                tracing::trace!(y, "host scroll");
            }
            self.now_ms += FRAME_MS;
        }
        Ok(())
    }
}

fn layout() -> PageLayout {
    let grid = [
        ("photos/dunes.jpg", "Dunes", "Landscape"),
        ("photos/market.jpg", "Night Market", "Street"),
        ("photos/sister.jpg", "Sister", "Portrait"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (src, title, category))| GridItemLayout {
        rect: Rect::new(i as f32 * 420.0, 1000.0, 400.0, 520.0),
        image: GalleryImage::new(*src, *title, *category),
    })
    .collect();

    PageLayout {
        viewport: Size::new(1280.0, 800.0),
        document_height: 5200.0,
        hero: Rect::new(0.0, 0.0, 1280.0, 800.0),
        title_words: 3,
        grid,
        reveals: vec![
            Rect::new(0.0, 860.0, 1280.0, 120.0),
            Rect::new(0.0, 2300.0, 1280.0, 400.0),
        ],
        counters: ["150+", "12", "48"]
            .iter()
            .enumerate()
            .map(|(i, raw)| CounterLayout {
                rect: Rect::new(i as f32 * 400.0, 1900.0, 300.0, 120.0),
                raw_count: raw.to_string(),
            })
            .collect(),
        lazy_images: vec![LazyImageLayout {
            rect: Rect::new(0.0, 2800.0, 600.0, 400.0),
            pending_src: "photos/studio.jpg".into(),
        }],
        parallax: vec![Some("0.2".into()), Some("slow".into())],
        anchors: vec![AnchorLayout {
            id: "contact".into(),
            rect: Rect::new(0.0, 4100.0, 1280.0, 1100.0),
        }],
        submit_button: Some(Rect::new(540.0, 4800.0, 200.0, 56.0)),
        interactive: vec![Rect::new(1180.0, 24.0, 60.0, 40.0)],
    }
}
