use std::time::Duration;

use sprite_quest::{
    Catalog, CatalogError, ConfigError, GameEvent, InputEvent, QuestConfig, QuestSession,
    QuestSnapshot,
};

/// Owns the quest session and the flat buffers JS reads after each tick.
///
/// The web crate keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`.
pub struct QuestRunner {
    catalog: Catalog,
    config: QuestConfig,
    session: QuestSession,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
    /// Quest events packed as `kind, a, b, c` floats.
    event_buffer: Vec<GameEvent>,
}

impl QuestRunner {
    pub fn new(catalog: Catalog, config: QuestConfig) -> Self {
        let session = QuestSession::new(catalog.clone(), config.clone());
        Self {
            sound_buffer: Vec::with_capacity(config.max_sounds),
            event_buffer: Vec::with_capacity(config.max_events),
            catalog,
            config,
            session,
        }
    }

    /// The compiled-in curriculum with default settings.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::builtin()?, QuestConfig::default()))
    }

    /// Replace the catalog and start a fresh session on it. On error the
    /// running session is left untouched.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), CatalogError> {
        let catalog = Catalog::from_json(json)?;
        log::info!(
            "catalog loaded: {} modules, {} levels",
            catalog.len(),
            catalog.level_count()
        );
        self.catalog = catalog;
        self.rebuild();
        Ok(())
    }

    /// Replace the configuration and start a fresh session with it.
    pub fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        self.config = QuestConfig::from_json(json)?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.session = QuestSession::new(self.catalog.clone(), self.config.clone());
        self.sound_buffer.clear();
        self.event_buffer.clear();
    }

    pub fn session(&self) -> &QuestSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuestSession {
        &mut self.session
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run one frame. `dt` is the browser frame delta in seconds.
    pub fn tick(&mut self, dt: f32) {
        let Ok(dt) = Duration::try_from_secs_f32(dt) else {
            log::warn!("tick ignored, bad frame delta {}", dt);
            return;
        };
        self.session.tick(dt);

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        let sounds = self.session.drain_sounds();
        if sounds.len() > self.config.max_sounds {
            log::warn!(
                "{} sounds this frame, keeping {}",
                sounds.len(),
                self.config.max_sounds
            );
        }
        for sound in sounds.into_iter().take(self.config.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.event_buffer.clear();
        let events = self.session.drain_events();
        if events.len() > self.config.max_events {
            log::warn!(
                "{} quest events this frame, keeping {}",
                events.len(),
                self.config.max_events
            );
        }
        self.event_buffer.extend(
            events
                .iter()
                .take(self.config.max_events)
                .map(|event| event.to_game_event()),
        );
    }

    pub fn snapshot(&self) -> QuestSnapshot {
        self.session.snapshot()
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.session.snapshot())
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn quest_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn quest_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn quest_events(&self) -> &[GameEvent] {
        &self.event_buffer
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
