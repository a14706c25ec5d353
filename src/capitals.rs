/*
 * src/capitals.rs
 * 首都データを管理するモジュール
 */

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::QuizError;

const TABLE_FILE_JSON: &str = "capitals.json"; // 差し替え用の外部テーブル

/// 組み込みテーブル用の1エントリ（静的文字列）
#[derive(Copy, Clone)]
struct BuiltinEntry {
    country: &'static str,
    title: &'static str,
    capital: &'static str,
    distractors: [&'static str; 3],
}

/// 国リスト（国名 → 出題文・首都・ハズレ3つ）
const CAPITALS_LIST: &'static [BuiltinEntry] = &[
    // 西ヨーロッパ
    BuiltinEntry { country: "France", title: "Capital of France?", capital: "Paris", distractors: ["Berlin", "Madrid", "Rome"] },
    BuiltinEntry { country: "Germany", title: "Capital of Germany?", capital: "Berlin", distractors: ["Vienna", "Bern", "Amsterdam"] },
    BuiltinEntry { country: "Italy", title: "Capital of Italy?", capital: "Rome", distractors: ["Milan", "Naples", "Venice"] },
    BuiltinEntry { country: "Spain", title: "Capital of Spain?", capital: "Madrid", distractors: ["Barcelona", "Lisbon", "Seville"] },
    BuiltinEntry { country: "Portugal", title: "Capital of Portugal?", capital: "Lisbon", distractors: ["Porto", "Madrid", "Rabat"] },
    BuiltinEntry { country: "Netherlands", title: "Capital of the Netherlands?", capital: "Amsterdam", distractors: ["Rotterdam", "The Hague", "Brussels"] },
    BuiltinEntry { country: "Belgium", title: "Capital of Belgium?", capital: "Brussels", distractors: ["Antwerp", "Luxembourg", "Amsterdam"] },
    BuiltinEntry { country: "Switzerland", title: "Capital of Switzerland?", capital: "Bern", distractors: ["Zurich", "Geneva", "Vienna"] },
    BuiltinEntry { country: "United Kingdom", title: "Capital of the United Kingdom?", capital: "London", distractors: ["Manchester", "Edinburgh", "Dublin"] },

    // 中央・東ヨーロッパ
    BuiltinEntry { country: "Austria", title: "Capital of Austria?", capital: "Vienna", distractors: ["Salzburg", "Prague", "Budapest"] },
    BuiltinEntry { country: "Czech Republic", title: "Capital of the Czech Republic?", capital: "Prague", distractors: ["Bratislava", "Warsaw", "Vienna"] },
    BuiltinEntry { country: "Poland", title: "Capital of Poland?", capital: "Warsaw", distractors: ["Krakow", "Gdansk", "Kyiv"] },
    BuiltinEntry { country: "Ukraine", title: "Capital of Ukraine?", capital: "Kyiv", distractors: ["Kharkiv", "Odesa", "Minsk"] },
    BuiltinEntry { country: "Greece", title: "Capital of Greece?", capital: "Athens", distractors: ["Thessaloniki", "Rome", "Istanbul"] },
    BuiltinEntry { country: "Turkey", title: "Capital of Turkey?", capital: "Ankara", distractors: ["Istanbul", "Izmir", "Athens"] },

    // 北ヨーロッパ
    BuiltinEntry { country: "Sweden", title: "Capital of Sweden?", capital: "Stockholm", distractors: ["Gothenburg", "Oslo", "Copenhagen"] },
    BuiltinEntry { country: "Norway", title: "Capital of Norway?", capital: "Oslo", distractors: ["Bergen", "Stockholm", "Helsinki"] },
    BuiltinEntry { country: "Finland", title: "Capital of Finland?", capital: "Helsinki", distractors: ["Oslo", "Tallinn", "Stockholm"] },
    BuiltinEntry { country: "Denmark", title: "Capital of Denmark?", capital: "Copenhagen", distractors: ["Aarhus", "Oslo", "Amsterdam"] },

    // アジア
    BuiltinEntry { country: "Japan", title: "Capital of Japan?", capital: "Tokyo", distractors: ["Osaka", "Kyoto", "Seoul"] },
];

/// 首都テーブルの1エントリ
///
/// `title` は画面にそのまま出す出題文。国名から機械的に作らず
/// データとして持つ（言語によって語形が変わるため）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalEntry {
    pub country: String,
    pub title: String,
    pub capital: String,
    /// ハズレの首都（ちょうど3つ）
    pub distractors: [String; 3],
}

impl From<&BuiltinEntry> for CapitalEntry {
    fn from(entry: &BuiltinEntry) -> Self {
        Self {
            country: entry.country.to_string(),
            title: entry.title.to_string(),
            capital: entry.capital.to_string(),
            distractors: entry.distractors.map(String::from),
        }
    }
}

/// 国名 → (出題文, 首都, ハズレ3つ) の読み取り専用テーブル
///
/// 起動時に一度だけ作られ、以降は変更しない。
#[derive(Debug, Clone)]
pub struct CapitalTable {
    entries: Vec<CapitalEntry>,
}

impl CapitalTable {
    pub fn new(entries: Vec<CapitalEntry>) -> Self {
        Self { entries }
    }

    /// 組み込みの国リストからテーブルを作る
    pub fn builtin() -> Self {
        Self::new(CAPITALS_LIST.iter().map(CapitalEntry::from).collect())
    }

    /// MARK:テーブルを読み込む (外部JSON優先、組み込みフォールバック)
    pub fn load() -> Self {
        // 1. 設定ディレクトリの capitals.json を試す
        if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "CAP_QUIZ") {
            if let Some(table) = Self::load_from(&proj_dirs.config_dir().join(TABLE_FILE_JSON)) {
                return table;
            }
        }

        // 2. カレントディレクトリの capitals.json を試す（デバッグ用）
        if let Some(table) = Self::load_from(Path::new(TABLE_FILE_JSON)) {
            return table;
        }

        // どちらも無ければ組み込みテーブル
        Self::builtin()
    }

    /// JSONファイルからテーブルを読む。読めなければ None
    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let file = File::open(path).ok()?;
        let entries: Vec<CapitalEntry> = serde_json::from_reader(BufReader::new(file)).ok()?;
        if entries.is_empty() {
            return None;
        }
        Some(Self::new(entries))
    }

    /// 登録されている国の数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 全ての国名
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.country.as_str())
    }

    fn entry(&self, country: &str) -> Result<&CapitalEntry, QuizError> {
        self.entries
            .iter()
            .find(|entry| entry.country == country)
            .ok_or_else(|| QuizError::UnknownCountry(country.to_string()))
    }

    /// 国名から首都を引く
    pub fn capital_of(&self, country: &str) -> Result<&str, QuizError> {
        Ok(self.entry(country)?.capital.as_str())
    }

    /// 国名からハズレの首都3つを引く
    pub fn distractors_of(&self, country: &str) -> Result<&[String; 3], QuizError> {
        Ok(&self.entry(country)?.distractors)
    }

    /// 国名から出題文を引く
    pub fn title_of(&self, country: &str) -> Result<&str, QuizError> {
        Ok(self.entry(country)?.title.as_str())
    }
}
