use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_wake")]
    pub default_wake_time: String,
    #[serde(default = "default_workout_time")]
    pub default_workout_time: String,
    #[serde(default = "default_bed")]
    pub default_bed_time: String,
    #[serde(default = "default_workout_options")]
    pub workout_options: Vec<String>,
    /// Use the step target instead of "now" when `done` has no `--at`.
    #[serde(default)]
    pub default_to_target: bool,
    #[serde(default = "default_supplements")]
    pub supplements_text: String,
    #[serde(default = "default_model")]
    pub extract_model: String,
    #[serde(default = "default_api_key_env")]
    pub extract_api_key_env: String,
    #[serde(default = "default_endpoint")]
    pub extract_endpoint: String,
    #[serde(default = "default_timeout")]
    pub extract_timeout_secs: u64,
}

fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}
fn default_utc_offset() -> i32 {
    9
}
fn default_wake() -> String {
    "07:00".to_string()
}
fn default_workout_time() -> String {
    "18:00".to_string()
}
fn default_bed() -> String {
    "23:30".to_string()
}
fn default_workout_options() -> Vec<String> {
    vec![
        "none".to_string(),
        "Walking (5km)".to_string(),
        "Exercise bike (45min)".to_string(),
        "Sauna".to_string(),
        "Strength training".to_string(),
    ]
}
fn default_supplements() -> String {
    [
        "Morning: MCT oil 7g, carnitine x2, vitamin C x3, QP Kowa alpha x1, vitamin D x1",
        "Meals: Ebios x10, Bio-Three x2, Stress B x1",
        "Night: QP Kowa Healing x2, magnesium x2, theanine x1, vitamin C x2",
    ]
    .join("\n")
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_timeout() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            session_file: default_session_file(),
            utc_offset_hours: default_utc_offset(),
            default_wake_time: default_wake(),
            default_workout_time: default_workout_time(),
            default_bed_time: default_bed(),
            workout_options: default_workout_options(),
            default_to_target: false,
            supplements_text: default_supplements(),
            extract_model: default_model(),
            extract_api_key_env: default_api_key_env(),
            extract_endpoint: default_endpoint(),
            extract_timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("dayboard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".dayboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("dayboard.conf")
    }

    /// Return the full path of the SQLite workbook
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("dayboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the rest of the program cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(AppError::Config(format!(
                "utc_offset_hours out of range: {}",
                self.utc_offset_hours
            )));
        }
        for (name, value) in [
            ("default_wake_time", &self.default_wake_time),
            ("default_workout_time", &self.default_workout_time),
            ("default_bed_time", &self.default_bed_time),
        ] {
            if parse_time(value).is_none() {
                return Err(AppError::Config(format!("{name}: invalid time '{value}'")));
            }
        }
        Ok(())
    }

    pub fn offset(&self) -> FixedOffset {
        // validate() keeps the value in range, east_opt only fails past ±24h
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    pub fn wake_default(&self) -> NaiveTime {
        parse_time(&self.default_wake_time).unwrap_or(NaiveTime::MIN)
    }

    pub fn workout_default(&self) -> NaiveTime {
        parse_time(&self.default_workout_time).unwrap_or(NaiveTime::MIN)
    }

    pub fn bed_default(&self) -> NaiveTime {
        parse_time(&self.default_bed_time).unwrap_or(NaiveTime::MIN)
    }

    /// Initialize configuration and workbook files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Workbook:    {:?}", db_path);

        Ok(config)
    }
}
