use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub connect_string: String,
    pub window: WindowStatus,
    pub pages: Vec<PageSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WindowStatus {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub is_maximized: bool,
}

/// One editor tab: its label, script text and editor pane size.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PageSettings {
    pub name: String,
    pub statement: String,
    pub editor_size_pct: u32,
}

impl AppSettings {
    pub fn new() -> Self {
        Self {
            connect_string: String::new(),
            window: WindowStatus::default(),
            pages: vec![
                PageSettings {
                    name: "Query 1".to_string(),
                    statement: "select * from dual;".to_string(),
                    editor_size_pct: 30,
                },
                PageSettings {
                    name: "Query 2".to_string(),
                    statement: "select sysdate from dual;".to_string(),
                    editor_size_pct: 30,
                },
            ],
        }
    }

    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("oracle_sql_browser");
            path.push("settings.json");
            path
        })
    }

    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::new(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(settings) = serde_json::from_str(&content) {
                    return settings;
                }
            }
        }
        Self::new()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        match Self::settings_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            match fs::create_dir_all(parent) {
                Ok(()) => {}
                Err(err) => {
                    eprintln!("Settings persistence error: {err}");
                    return Err(Box::new(err));
                }
            }
        }
        let content = match serde_json::to_string_pretty(self) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Settings persistence error: {err}");
                return Err(Box::new(err));
            }
        };
        match fs::write(path, content) {
            Ok(()) => {}
            Err(err) => {
                eprintln!("Settings persistence error: {err}");
                return Err(Box::new(err));
            }
        }
        Ok(())
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for WindowStatus {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            x: None,
            y: None,
            is_maximized: false,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            statement: String::new(),
            editor_size_pct: 30,
        }
    }
}
