// src/messages.rs

//! Localized console strings.

use std::path::Path;

use crate::config::model::{LocaleSetting, MessagesSection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Zh,
}

impl Locale {
    /// Resolve a configured setting. `Auto` looks at `LC_ALL`, then `LANG`.
    pub fn resolve(setting: LocaleSetting, lc_all: Option<&str>, lang: Option<&str>) -> Self {
        match setting {
            LocaleSetting::En => Locale::En,
            LocaleSetting::Zh => Locale::Zh,
            LocaleSetting::Auto => {
                let tag = lc_all
                    .filter(|v| !v.trim().is_empty())
                    .or(lang)
                    .unwrap_or_default();
                if tag.trim().to_lowercase().starts_with("zh") {
                    Locale::Zh
                } else {
                    Locale::En
                }
            }
        }
    }
}

/// The four messages the launcher can print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub banner: String,
    /// Template; `{path}` is replaced with the configured interpreter.
    pub interpreter_not_found: String,
    pub child_failed: String,
    pub press_any_key: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                banner: "Starting IP monitoring tool...".to_string(),
                interpreter_not_found: "Error: Python interpreter not found at {path}".to_string(),
                child_failed: "The program exited with an error.".to_string(),
                press_any_key: "Press any key to continue . . .".to_string(),
            },
            Locale::Zh => Self {
                banner: "正在启动IP监控工具...".to_string(),
                interpreter_not_found: "错误: 未找到Python解释器 {path}".to_string(),
                child_failed: "程序运行出错。".to_string(),
                press_any_key: "请按任意键继续. . .".to_string(),
            },
        }
    }

    /// Apply `[messages]` overrides on top of the locale defaults.
    pub fn with_overrides(mut self, section: &MessagesSection) -> Self {
        if let Some(s) = &section.banner {
            self.banner = s.clone();
        }
        if let Some(s) = &section.interpreter_not_found {
            self.interpreter_not_found = s.clone();
        }
        if let Some(s) = &section.child_failed {
            self.child_failed = s.clone();
        }
        if let Some(s) = &section.press_any_key {
            self.press_any_key = s.clone();
        }
        self
    }

    pub fn interpreter_not_found(&self, path: &Path) -> String {
        self.interpreter_not_found
            .replace("{path}", &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_locale_follows_environment() {
        assert_eq!(
            Locale::resolve(LocaleSetting::Auto, None, Some("zh_CN.UTF-8")),
            Locale::Zh
        );
        assert_eq!(
            Locale::resolve(LocaleSetting::Auto, Some("en_US.UTF-8"), Some("zh_CN.UTF-8")),
            Locale::En
        );
        assert_eq!(
            Locale::resolve(LocaleSetting::Auto, Some(""), Some("zh_TW")),
            Locale::Zh
        );
        assert_eq!(Locale::resolve(LocaleSetting::Auto, None, None), Locale::En);
    }

    #[test]
    fn explicit_locale_ignores_environment() {
        assert_eq!(
            Locale::resolve(LocaleSetting::En, None, Some("zh_CN.UTF-8")),
            Locale::En
        );
        assert_eq!(Locale::resolve(LocaleSetting::Zh, None, None), Locale::Zh);
    }

    #[test]
    fn not_found_message_names_the_path() {
        let msgs = Messages::for_locale(Locale::En);
        let line = msgs.interpreter_not_found(Path::new("C:\\Python39\\python.exe"));
        assert!(line.contains("C:\\Python39\\python.exe"));
        assert!(!line.contains("{path}"));
    }

    #[test]
    fn overrides_replace_only_given_messages() {
        let section = MessagesSection {
            banner: Some("booting ipmon".to_string()),
            ..MessagesSection::default()
        };
        let msgs = Messages::for_locale(Locale::Zh).with_overrides(&section);
        assert_eq!(msgs.banner, "booting ipmon");
        assert_eq!(msgs.child_failed, Messages::for_locale(Locale::Zh).child_failed);
    }
}
