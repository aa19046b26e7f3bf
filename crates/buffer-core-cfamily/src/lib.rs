#![warn(missing_docs)]
//! `buffer-core-cfamily` - lexical highlighting for C-family languages.
//!
//! [`CFamilyTokenizer`] implements [`buffer_core::Highlighter`]. It recognizes, per line and in
//! priority order:
//!
//! 1. a preprocessor line (the line, ignoring leading whitespace, starts with the marker),
//! 2. a line comment, which ends scanning for the line,
//! 3. an opening or closing brace, which records an inferred indent depth,
//! 4. a block comment opener, which may carry the comment into the following lines,
//! 5. a keyword from the configured set, on word boundaries.
//!
//! Lines are tab-expanded before scanning, so every column in the produced
//! [`HighlightIndex`] is a screen column.
//!
//! The tokenizer remembers the lexical state at the start of every scanned line, so a rescan can
//! start from any line already covered by an earlier pass:
//!
//! ```rust
//! use buffer_core::{Document, Highlighter, Position};
//! use buffer_core_cfamily::CFamilyTokenizer;
//!
//! let mut document = Document::from_text("int a;\nint b;\nint c;");
//! let mut tokenizer = CFamilyTokenizer::c_family().unwrap();
//! tokenizer.generate_highlighting(&document);
//! document.take_dirty_from();
//!
//! document.insert_text(Position::new(0, 1), "/* ").unwrap();
//! assert!(tokenizer.refresh(&mut document));
//! assert_eq!(tokenizer.get_highlighting(2).len(), 1);
//! ```

use std::sync::Arc;

use buffer_core::{
    Document, Highlight, HighlightIndex, HighlightKind, Highlighter, ScreenPosition, TabExpansion,
};
use buffer_core_lang::LanguageConfig;
use log::{debug, trace};
use regex::Regex;

/// Lexical state at a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    /// Ordinary code.
    #[default]
    Normal,
    /// Inside an unterminated block comment.
    InBlockComment,
}

#[derive(Debug, Clone)]
struct Markers {
    line_comment: Option<Vec<char>>,
    block_comment: Option<(Vec<char>, Vec<char>)>,
    preprocessor: Option<String>,
    open_brace: char,
    close_brace: char,
    indent_step: usize,
}

impl Markers {
    fn from_config(config: &LanguageConfig) -> Self {
        Self {
            line_comment: config.comments.line_marker().map(|m| m.chars().collect()),
            block_comment: config
                .comments
                .block_markers()
                .map(|(start, end)| (start.chars().collect(), end.chars().collect())),
            preprocessor: config.preprocessor.clone().filter(|m| !m.is_empty()),
            open_brace: config.braces.open,
            close_brace: config.braces.close,
            indent_step: config.indent_step,
        }
    }
}

/// Incremental C-family highlighter for one document.
#[derive(Debug, Clone)]
pub struct CFamilyTokenizer {
    config: Arc<LanguageConfig>,
    markers: Markers,
    tab: TabExpansion,
    keyword_regex: Option<Regex>,
    index: HighlightIndex,
    line_states: Vec<LexState>,
    last_state: LexState,
}

impl CFamilyTokenizer {
    /// Build a tokenizer for `config` with the default tab expansion.
    ///
    /// Fails only if the keyword set does not compile into a regex.
    pub fn new(config: Arc<LanguageConfig>) -> Result<Self, regex::Error> {
        Self::with_tab(config, TabExpansion::default())
    }

    /// Build a tokenizer with a specific tab expansion. Must match the viewports' expansion so
    /// highlight columns line up with what is displayed.
    pub fn with_tab(config: Arc<LanguageConfig>, tab: TabExpansion) -> Result<Self, regex::Error> {
        let keyword_regex = keyword_regex(&config)?;
        Ok(Self {
            markers: Markers::from_config(&config),
            config,
            tab,
            keyword_regex,
            index: HighlightIndex::new(),
            line_states: Vec::new(),
            last_state: LexState::Normal,
        })
    }

    /// Tokenizer for [`LanguageConfig::c_family`].
    pub fn c_family() -> Result<Self, regex::Error> {
        Self::new(Arc::new(LanguageConfig::c_family()))
    }

    /// The language configuration.
    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// The tab expansion used before scanning.
    pub fn tab(&self) -> &TabExpansion {
        &self.tab
    }

    /// Replace the tab expansion. Recorded line states stay valid but every column changes, so
    /// callers should regenerate.
    pub fn set_tab(&mut self, tab: TabExpansion) {
        self.tab = tab;
    }

    /// Lexical state after the last scanned line of the most recent pass.
    pub fn last_pass_state(&self) -> LexState {
        self.last_state
    }

    /// Lexical state recorded at the start of `line`, if an earlier pass reached it.
    pub fn line_state(&self, line: usize) -> Option<LexState> {
        self.line_states.get(line).copied()
    }

    fn scan(&mut self, document: &Document, start: usize, end: usize) {
        let mut state = match self.line_states.get(start) {
            Some(state) if start > 0 => *state,
            _ => LexState::Normal,
        };
        self.line_states.truncate(start);
        self.line_states.push(state);

        let mut depth = self.index.depth_before(ScreenPosition::new(0, start));
        let before = self.index.len();
        for y in start..end {
            let Ok(raw) = document.line(y) else {
                break;
            };
            let expanded = self.tab.expand(raw);
            let entry = state;
            state = self.scan_line(y, &expanded, state, &mut depth);
            if entry != state {
                trace!("line {y}: {entry:?} -> {state:?}");
            }
            self.line_states.push(state);
        }
        self.last_state = state;
        debug!(
            "highlight pass over lines {}..{}: {} highlights added, ends {:?}",
            start,
            end,
            self.index.len().saturating_sub(before),
            state
        );
    }

    fn scan_line(&mut self, y: usize, line: &str, state: LexState, depth: &mut usize) -> LexState {
        let (offsets, chars): (Vec<usize>, Vec<char>) = line.char_indices().unzip();
        let len = chars.len();
        let mut x = 0;

        if state == LexState::InBlockComment {
            let Some((_, close)) = self.markers.block_comment.clone() else {
                return LexState::Normal;
            };
            match find_from(&chars, 0, &close) {
                Some(at) => {
                    x = at + close.len();
                    self.push(y, &chars, 0, x, HighlightKind::Comment);
                }
                None => {
                    if len > 0 {
                        self.push(y, &chars, 0, len, HighlightKind::Comment);
                    }
                    return LexState::InBlockComment;
                }
            }
        } else if let Some(marker) = &self.markers.preprocessor
            && line.trim_start().starts_with(marker.as_str())
        {
            self.push(y, &chars, 0, len, HighlightKind::Preprocessor);
            return LexState::Normal;
        }

        while x < len {
            if let Some(marker) = &self.markers.line_comment
                && starts_at(&chars, x, marker)
            {
                self.push(y, &chars, x, len, HighlightKind::Comment);
                break;
            }

            let ch = chars[x];
            if ch == self.markers.open_brace {
                let pos = ScreenPosition::new(x, y);
                let opened = self
                    .index
                    .brace_depth(pos)
                    .unwrap_or(*depth + self.markers.indent_step);
                self.index.set_brace_depth(pos, opened);
                *depth = opened;
                x += 1;
                continue;
            }
            if ch == self.markers.close_brace {
                let closed = depth.saturating_sub(self.markers.indent_step);
                self.index.set_brace_depth(ScreenPosition::new(x, y), closed);
                *depth = closed;
                x += 1;
                continue;
            }

            if let Some((open, close)) = &self.markers.block_comment
                && starts_at(&chars, x, open)
            {
                match find_from(&chars, x + open.len(), close) {
                    Some(at) => {
                        let end = at + close.len();
                        self.push(y, &chars, x, end, HighlightKind::Comment);
                        x = end;
                        continue;
                    }
                    None => {
                        self.push(y, &chars, x, len, HighlightKind::Comment);
                        return LexState::InBlockComment;
                    }
                }
            }

            if let Some(width) = self.keyword_at(&line[offsets[x]..], &chars, x) {
                self.push(y, &chars, x, x + width, HighlightKind::Keyword);
                x += width;
                continue;
            }
            x += 1;
        }
        LexState::Normal
    }

    /// Width in chars of a keyword at the start of `rest` (the line from char column `x` on),
    /// honoring word boundaries.
    fn keyword_at(&self, rest: &str, chars: &[char], x: usize) -> Option<usize> {
        let regex = self.keyword_regex.as_ref()?;
        if !is_word_char(chars[x]) || (x > 0 && is_word_char(chars[x - 1])) {
            return None;
        }
        let found = regex.find(rest)?;
        Some(found.as_str().chars().count())
    }

    fn push(&mut self, y: usize, chars: &[char], start: usize, end: usize, kind: HighlightKind) {
        let text: String = chars[start..end].iter().collect();
        self.index.push(Highlight::new(y, start, end, text, kind));
    }
}

impl Highlighter for CFamilyTokenizer {
    fn generate_highlighting(&mut self, document: &Document) {
        self.index.clear();
        self.line_states.clear();
        self.scan(document, 0, document.line_count());
    }

    fn update_highlighting(&mut self, document: &Document, to_line: usize) {
        let end = to_line.min(document.line_count());
        self.index.clear_lines(0..end);
        self.index.clear_from(document.line_count());
        self.scan(document, 0, end);
    }

    fn rehighlight_from(&mut self, document: &Document, line: usize) {
        let start = if line < self.line_states.len() {
            line
        } else {
            debug!("no lexical state recorded for line {line}, rescanning from line 0");
            0
        };
        self.index.clear_from(start);
        self.scan(document, start, document.line_count());
    }

    fn highlight_index(&self) -> &HighlightIndex {
        &self.index
    }
}

fn keyword_regex(config: &LanguageConfig) -> Result<Option<Regex>, regex::Error> {
    if config.keywords.is_empty() {
        return Ok(None);
    }
    let mut words: Vec<&str> = config.keywords.iter().map(String::as_str).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?:{alternation})\b")).map(Some)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn starts_at(chars: &[char], x: usize, marker: &[char]) -> bool {
    chars.get(x..x + marker.len()) == Some(marker)
}

fn find_from(chars: &[char], from: usize, marker: &[char]) -> Option<usize> {
    if marker.is_empty() || from > chars.len() {
        return None;
    }
    (from..=chars.len().saturating_sub(marker.len())).find(|&x| starts_at(chars, x, marker))
}
