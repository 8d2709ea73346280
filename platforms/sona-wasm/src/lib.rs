use wasm_bindgen::prelude::*;
use rkyv::{AlignedVec, Deserialize, Infallible};
use sona_protocol::{Dialect, Dictionary, Lexicon, Vocabulary};
use sona_parser::{tokenize, token::TokenKind, Parser, Sentence};
use serde::Serialize;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize)]
pub struct TokenDebug {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: String,
    pub class: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    pub fragment: Option<String>,
}

/// The structured response sent back to JavaScript
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub tokens: Vec<TokenDebug>,
    pub sentence: Option<Sentence>,
    pub rendered: Option<String>,
    pub error: Option<ErrorReport>,
    pub debug_info: String,
}

/// Text -> tokens + tree (or diagnostic). Independent of the JS boundary.
pub fn build_report(lexicon: &dyn Lexicon, dialect: Dialect, input: &str) -> AnalysisReport {
    // 1. Tokens with their dictionary classes
    let tokens = tokenize(input)
        .into_iter()
        .map(|t| {
            let kind = match t.kind {
                TokenKind::Word => "Word",
                TokenKind::Preposition => "Preposition",
                TokenKind::Punctuation(_) => "Punctuation",
                TokenKind::Quote(_) => "Quote",
            };
            let class = match t.kind {
                TokenKind::Word | TokenKind::Preposition => format!("{:?}", lexicon.classify(t.bare())),
                _ => String::from("None"),
            };
            TokenDebug {
                text: t.text.to_string(),
                start: t.span.start,
                end: t.span.end,
                kind: kind.to_string(),
                class,
            }
        })
        .collect();

    // 2. Grammar
    let parser = Parser::new(lexicon).with_dialect(dialect);
    let (sentence, error) = match parser.parse(input, input) {
        Ok(sentence) => (Some(sentence), None),
        Err(err) => (
            None,
            Some(ErrorReport {
                kind: format!("{:?}", err.kind()),
                message: err.to_string(),
                fragment: err.fragment().map(str::to_string),
            }),
        ),
    };

    AnalysisReport {
        tokens,
        rendered: sentence.as_ref().map(ToString::to_string),
        sentence,
        error,
        debug_info: format!("li pi valid: {}", dialect.li_pi_is_valid),
    }
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct SonaEngine {
    vocabulary: Vocabulary,
    words: usize,
    compounds: usize,
    dialect: Dialect,
}

#[wasm_bindgen]
impl SonaEngine {
    /// `data` is a lexicon compiled by `sona-cli compile` (loaded via fetch() in JS).
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<SonaEngine, JsValue> {
        // Archives must be aligned; bytes from JS carry no such guarantee
        let mut aligned = AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(&data);

        let archived = rkyv::check_archived_root::<Dictionary>(&aligned)
            .map_err(|e| JsValue::from_str(&format!("Invalid lexicon: {}", e)))?;
        let dict: Dictionary = archived
            .deserialize(&mut Infallible)
            .unwrap_or_else(|never| match never {});

        Ok(Self {
            vocabulary: Vocabulary::from(&dict),
            words: dict.entries.len(),
            compounds: dict.compounds.len(),
            dialect: Dialect::default(),
        })
    }

    /// Falls back on the built-in toki pona vocabulary.
    pub fn builtin() -> SonaEngine {
        let dict = Dictionary::builtin();
        Self {
            vocabulary: Vocabulary::from(&dict),
            words: dict.entries.len(),
            compounds: dict.compounds.len(),
            dialect: Dialect::default(),
        }
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.dialect = if strict { Dialect::strict() } else { Dialect::default() };
    }

    /// Text -> tokens -> tree -> JSON
    pub fn analyze(&self, input: &str) -> Result<JsValue, JsValue> {
        let mut report = build_report(&self.vocabulary, self.dialect, input);
        report.debug_info = format!("Words: {}, Compounds: {}, {}", self.words, self.compounds, report.debug_info);

        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }
}
