use crate::params::{Configuration, ParamValue};
use crate::space::{TextOption, TOKEN_LIST};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[strum(serialize = "english", serialize = "en")]
    English,
    #[strum(serialize = "spanish", serialize = "es")]
    Spanish,
}

impl Language {
    fn stopwords(&self) -> &'static [&'static str] {
        match self {
            Language::English => &[
                "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has",
                "have", "he", "her", "his", "i", "in", "is", "it", "its", "me", "my", "of", "on",
                "or", "our", "she", "so", "that", "the", "their", "them", "they", "this", "to",
                "was", "we", "were", "will", "with", "you", "your",
            ],
            Language::Spanish => &[
                "a", "al", "como", "con", "de", "del", "el", "en", "es", "esta", "la", "las",
                "le", "lo", "los", "me", "mi", "para", "pero", "por", "que", "se", "su", "sus",
                "te", "tu", "un", "una", "y", "ya", "yo",
            ],
        }
    }

    fn negators(&self) -> &'static [&'static str] {
        match self {
            Language::English => &["no", "not", "never", "nor", "don't", "dont", "cannot"],
            Language::Spanish => &["no", "nunca", "jamas", "ni", "tampoco"],
        }
    }

    fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Language::English => &["ingly", "edly", "ness", "ing", "ies", "ed", "ly", "es", "s"],
            Language::Spanish => &[
                "amente", "aciones", "acion", "mente", "ando", "iendo", "ados", "idos", "ado",
                "ido", "as", "os", "es", "a", "o",
            ],
        }
    }
}

const NUM_TOKEN: &str = "_num";
const USR_TOKEN: &str = "_usr";
const URL_TOKEN: &str = "_url";
const SW_TOKEN: &str = "_sw";
const SPACE: &str = "~";

/// Text normalization and tokenization driven by a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPipeline {
    pub lc: bool,
    pub strip_diac: bool,
    pub del_dup: bool,
    pub num_option: TextOption,
    pub usr_option: TextOption,
    pub url_option: TextOption,
    pub stopwords: TextOption,
    pub negation: bool,
    pub stemming: bool,
    pub token_list: Vec<i32>,
    pub lang: Option<Language>,
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self {
            lc: false,
            strip_diac: false,
            del_dup: false,
            num_option: TextOption::None,
            usr_option: TextOption::None,
            url_option: TextOption::None,
            stopwords: TextOption::None,
            negation: false,
            stemming: false,
            token_list: vec![-1],
            lang: None,
        }
    }
}

impl TextPipeline {
    /// Missing parameters keep the neutral defaults. Language options only
    /// take effect when a language is given.
    pub fn from_params(params: &Configuration, lang: Option<Language>) -> Self {
        let d = Self::default();
        Self {
            lc: params.bool_or("lc", d.lc),
            strip_diac: params.bool_or("strip_diac", d.strip_diac),
            del_dup: params.bool_or("del_dup1", d.del_dup),
            num_option: params.option_or("num_option", d.num_option),
            usr_option: params.option_or("usr_option", d.usr_option),
            url_option: params.option_or("url_option", d.url_option),
            stopwords: params.option_or("stopwords", d.stopwords),
            negation: params.bool_or("negation", d.negation),
            stemming: params.bool_or("stemming", d.stemming),
            token_list: params
                .get(TOKEN_LIST)
                .and_then(ParamValue::as_subset)
                .map(<[i32]>::to_vec)
                .unwrap_or(d.token_list),
            lang,
        }
    }

    /// Normalized words, after special-token handling.
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut text = if self.lc {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if self.strip_diac {
            text = text.chars().map(fold_diacritic).collect();
        }
        if self.del_dup {
            text = collapse_runs(&text);
        }

        let mut words = Vec::new();
        let mut negate_next = false;

        for raw in text.split_whitespace() {
            let word = match self.classify(raw) {
                Some(w) => w,
                None => continue,
            };

            let lowered = word.to_lowercase();
            let word = match self.lang {
                Some(lang) => {
                    let is_negator = self.negation && lang.negators().contains(&lowered.as_str());
                    let mut w = if !is_special(&word) && lang.stopwords().contains(&lowered.as_str())
                    {
                        match self.stopwords {
                            TextOption::Delete => {
                                negate_next = negate_next || is_negator;
                                continue;
                            }
                            TextOption::Group => SW_TOKEN.to_string(),
                            TextOption::None => word,
                        }
                    } else if self.stemming && !is_special(&word) {
                        stem(&word, lang)
                    } else {
                        word
                    };

                    if negate_next && !is_negator {
                        w = format!("no_{}", w);
                        negate_next = false;
                    }
                    if is_negator {
                        negate_next = true;
                    }
                    w
                }
                None => word,
            };

            words.push(word);
        }

        words
    }

    /// Word n-grams (negative entries) and character q-grams (positive
    /// entries) of `text`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let mut tokens = Vec::new();

        for &n in &self.token_list {
            if n < 0 {
                let size = n.unsigned_abs() as usize;
                if size == 1 {
                    tokens.extend(words.iter().cloned());
                } else {
                    tokens.extend(words.windows(size).map(|w| w.join(SPACE)));
                }
            } else if n > 0 {
                let q = n as usize;
                let joined = format!("{}{}{}", SPACE, words.join(SPACE), SPACE);
                let chars: Vec<char> = joined.chars().collect();
                tokens.extend(chars.windows(q).map(|w| w.iter().collect::<String>()));
            }
        }

        tokens
    }

    fn classify(&self, raw: &str) -> Option<String> {
        let lower = raw.to_ascii_lowercase();
        let (option, placeholder) = if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("www.")
        {
            (self.url_option, URL_TOKEN)
        } else if raw.len() > 1 && raw.starts_with('@') {
            (self.usr_option, USR_TOKEN)
        } else if is_number(raw) {
            (self.num_option, NUM_TOKEN)
        } else {
            let trimmed = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            return if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        };

        match option {
            TextOption::Delete => None,
            TextOption::Group => Some(placeholder.to_string()),
            TextOption::None => Some(raw.to_string()),
        }
    }
}

fn is_special(word: &str) -> bool {
    matches!(word, NUM_TOKEN | USR_TOKEN | URL_TOKEN | SW_TOKEN)
}

fn is_number(raw: &str) -> bool {
    let s = raw.trim_end_matches(|c: char| matches!(c, '.' | ',' | '%'));
    !s.is_empty() && s.replace(',', "").parse::<f64>().is_ok()
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if Some(c) != prev {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

fn stem(word: &str, lang: Language) -> String {
    for suffix in lang.suffixes() {
        if let Some(root) = word.strip_suffix(suffix) {
            if root.chars().count() >= 3 {
                return root.to_string();
            }
        }
    }
    word.to_string()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        _ => c,
    }
}
