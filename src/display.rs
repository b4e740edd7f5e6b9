//! Display parameters chosen in the menu: language pack and block glyph
//!
//! Passed to the renderer as a plain value; the engine never sees them.

/// Selectable block glyphs, each two columns wide
pub const BLOCK_STYLES: [&str; 8] = ["██", "▓▓", "▒▒", "░░", "##", "[]", "<>", "■■"];

/// UI strings for one language
#[derive(Debug)]
pub struct LangPack {
    pub start: &'static str,
    pub quit: &'static str,
    pub language: &'static str,
    pub style: &'static str,
    pub paused: &'static str,
    pub game_over: &'static str,
    pub score: &'static str,
    pub level: &'static str,
    pub lines: &'static str,
    pub next: &'static str,
    pub press_q: &'static str,
    pub press_p: &'static str,
    pub press_enter: &'static str,
    pub title: &'static str,
}

static EN: LangPack = LangPack {
    start: "Start Game",
    quit: "Quit",
    language: "Language",
    style: "Block Style",
    paused: "PAUSED",
    game_over: "GAME OVER",
    score: "Score",
    level: "Level",
    lines: "Lines",
    next: "Next",
    press_q: "Press Q to quit",
    press_p: "Press P to resume",
    press_enter: "Enter: menu",
    title: "Tertis - Terminal Tetris",
};

static TR: LangPack = LangPack {
    start: "Oyunu Başlat",
    quit: "Çıkış",
    language: "Dil",
    style: "Kutu Stili",
    paused: "DURDURULDU",
    game_over: "OYUN BİTTİ",
    score: "Puan",
    level: "Seviye",
    lines: "Satır",
    next: "Sıradaki",
    press_q: "Q: çıkış",
    press_p: "P: devam",
    press_enter: "Enter: menü",
    title: "Tertis - Terminal Tetris",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Turkish,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Turkish]
    }

    /// Short code stored in settings
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Turkish => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    pub fn pack(&self) -> &'static LangPack {
        match self {
            Language::English => &EN,
            Language::Turkish => &TR,
        }
    }
}

/// Everything the renderer needs besides the game itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub language: Language,
    pub block: &'static str,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            block: BLOCK_STYLES[0],
        }
    }
}

impl DisplayConfig {
    /// Build from stored codes, falling back to defaults for unknown values
    pub fn from_codes(language: &str, block_style: &str) -> Self {
        let language = Language::from_code(language).unwrap_or_else(|| {
            tracing::warn!("unknown language {:?}, using English", language);
            Language::default()
        });
        let block = BLOCK_STYLES
            .iter()
            .copied()
            .find(|style| *style == block_style)
            .unwrap_or_else(|| {
                tracing::warn!("unknown block style {:?}, using default", block_style);
                BLOCK_STYLES[0]
            });
        Self { language, block }
    }

    pub fn text(&self) -> &'static LangPack {
        self.language.pack()
    }
}
