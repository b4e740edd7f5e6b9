//! Pre-game menu: start, language, block style, quit

use crate::display::{BLOCK_STYLES, DisplayConfig, Language};
use crate::settings::Settings;

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub item_type: MenuItemType,
}

#[derive(Debug, Clone)]
pub enum MenuItemType {
    /// Simple button that triggers an action
    Button(MenuAction),
    /// Cycle through options
    Cycle {
        key: SettingKey,
        options: Vec<String>,
        current: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

/// Which setting a cycle item edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Language,
    BlockStyle,
}

impl Menu {
    pub fn new(settings: &Settings) -> Self {
        Self {
            selected: 0,
            items: Self::build_items(&settings.display_config()),
        }
    }

    fn build_items(display: &DisplayConfig) -> Vec<MenuItem> {
        let text = display.text();
        let languages: Vec<String> = Language::all()
            .iter()
            .map(|lang| lang.code().to_string())
            .collect();
        let current_language = Language::all()
            .iter()
            .position(|lang| *lang == display.language)
            .unwrap_or(0);
        let current_style = BLOCK_STYLES
            .iter()
            .position(|style| *style == display.block)
            .unwrap_or(0);

        vec![
            MenuItem {
                label: text.start.to_string(),
                item_type: MenuItemType::Button(MenuAction::StartGame),
            },
            MenuItem {
                label: text.language.to_string(),
                item_type: MenuItemType::Cycle {
                    key: SettingKey::Language,
                    options: languages,
                    current: current_language,
                },
            },
            MenuItem {
                label: text.style.to_string(),
                item_type: MenuItemType::Cycle {
                    key: SettingKey::BlockStyle,
                    options: BLOCK_STYLES.iter().map(|s| s.to_string()).collect(),
                    current: current_style,
                },
            },
            MenuItem {
                label: text.quit.to_string(),
                item_type: MenuItemType::Button(MenuAction::Quit),
            },
        ]
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    /// Cycle the selected option backwards
    pub fn adjust_left(&mut self, settings: &mut Settings) {
        self.adjust(settings, |current, len| (current + len - 1) % len);
    }

    /// Cycle the selected option forwards
    pub fn adjust_right(&mut self, settings: &mut Settings) {
        self.adjust(settings, |current, len| (current + 1) % len);
    }

    fn adjust(&mut self, settings: &mut Settings, step: impl Fn(usize, usize) -> usize) {
        let Some(item) = self.items.get_mut(self.selected) else {
            return;
        };
        let MenuItemType::Cycle {
            key,
            options,
            current,
        } = &mut item.item_type
        else {
            return;
        };
        if options.is_empty() {
            return;
        }
        *current = step(*current, options.len());
        let key = *key;
        apply_setting(settings, key, &options[*current]);

        // Labels follow the chosen language
        if key == SettingKey::Language {
            self.items = Self::build_items(&settings.display_config());
        }
    }

    /// Activate the current item: buttons return their action, cycles advance
    pub fn select(&mut self, settings: &mut Settings) -> Option<MenuAction> {
        let action = match &self.items.get(self.selected)?.item_type {
            MenuItemType::Button(action) => Some(*action),
            MenuItemType::Cycle { .. } => None,
        };
        if action.is_none() {
            self.adjust_right(settings);
        }
        action
    }
}

/// Apply a setting change to the Settings struct
fn apply_setting(settings: &mut Settings, key: SettingKey, value: &str) {
    tracing::debug!("menu set {:?} = {}", key, value);
    match key {
        SettingKey::Language => settings.display.language = value.to_string(),
        SettingKey::BlockStyle => settings.display.block_style = value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let settings = Settings::default();
        let mut menu = Menu::new(&settings);
        menu.move_up();
        assert_eq!(menu.selected, menu.items.len() - 1);
        menu.move_down();
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_start_and_quit_buttons() {
        let mut settings = Settings::default();
        let mut menu = Menu::new(&settings);
        assert_eq!(menu.select(&mut settings), Some(MenuAction::StartGame));
        menu.move_up();
        assert_eq!(menu.select(&mut settings), Some(MenuAction::Quit));
    }

    #[test]
    fn test_language_toggle_relabels_menu() {
        let mut settings = Settings::default();
        let mut menu = Menu::new(&settings);
        assert_eq!(menu.items[0].label, "Start Game");

        menu.move_down();
        assert_eq!(menu.select(&mut settings), None);
        assert_eq!(settings.display.language, "tr");
        assert_eq!(menu.items[0].label, "Oyunu Başlat");
        assert_eq!(menu.selected, 1);

        menu.adjust_left(&mut settings);
        assert_eq!(settings.display.language, "en");
        assert_eq!(menu.items[0].label, "Start Game");
    }

    #[test]
    fn test_block_style_cycles_through_all() {
        let mut settings = Settings::default();
        let mut menu = Menu::new(&settings);
        menu.selected = 2;
        for expected in BLOCK_STYLES.iter().skip(1) {
            menu.adjust_right(&mut settings);
            assert_eq!(settings.display.block_style, *expected);
        }
        menu.adjust_right(&mut settings);
        assert_eq!(settings.display.block_style, BLOCK_STYLES[0]);
        menu.adjust_left(&mut settings);
        assert_eq!(settings.display.block_style, BLOCK_STYLES[7]);
    }

    #[test]
    fn test_adjust_on_button_is_noop() {
        let mut settings = Settings::default();
        let mut menu = Menu::new(&settings);
        menu.adjust_right(&mut settings);
        assert_eq!(settings, Settings::default());
    }
}
