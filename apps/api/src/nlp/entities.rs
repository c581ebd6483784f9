//! Rule-based named-entity recognizer.
//!
//! Works line by line. A candidate span is a run of name-like tokens
//! (capitalized, acronym or mixed-case), optionally joined by connectors such as
//! "of" or "&". Spans end at punctuation, at sentence boundaries and at any
//! ordinary lowercase word. Each span is then trimmed and labeled.
//! Known technology names are picked up in any casing, and a line holding
//! nothing but names is read as a list entry.

use crate::nlp::lexicon::{
    self, HONORIFICS, KNOWN_ORGS, MONTHS, NAME_CONNECTORS, ORG_SUFFIXES, PLACES,
    SECTION_HEADINGS, STOP_WORDS, WEEKDAYS,
};
use crate::nlp::{Entity, EntityLabel};

const MAX_ACRONYM_LEN: usize = 5;

struct Token<'a> {
    leading: &'a str,
    word: &'a str,
    trailing: &'a str,
}

impl<'a> Token<'a> {
    fn parse(raw: &'a str) -> Self {
        let Some(start) = raw.find(is_word_char) else {
            return Token {
                leading: "",
                word: "",
                trailing: raw,
            };
        };
        let end = raw
            .char_indices()
            .rev()
            .find(|(_, c)| is_word_char(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(raw.len());
        Token {
            leading: &raw[..start],
            word: &raw[start..end],
            trailing: &raw[end..],
        }
    }

    /// "Inc." and "Dr." keep their period without closing the sentence.
    fn is_abbreviation(&self) -> bool {
        self.trailing == "." && (lexicon::contains(HONORIFICS, self.word)
            || lexicon::contains(ORG_SUFFIXES, self.word))
    }

    fn ends_sentence(&self) -> bool {
        !self.is_abbreviation() && self.trailing.contains(['.', '!', '?'])
    }

    fn breaks_after(&self) -> bool {
        !self.trailing.is_empty() && !self.is_abbreviation()
    }
}

/// Returns every entity found in `text`, in document order. Duplicates are kept.
pub fn recognize(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    for line in text.lines() {
        recognize_line(line, &mut entities);
    }
    entities
}

fn recognize_line(line: &str, out: &mut Vec<Entity>) {
    let tokens: Vec<Token> = line.split_whitespace().map(Token::parse).collect();

    // "Rust", "Docker, Kubernetes", "Bank of America": a line made only of names
    // is a list entry, so its first word is not a sentence opener.
    let list_entry = tokens
        .iter()
        .filter(|t| !t.word.is_empty())
        .all(|t| {
            is_name_word(t.word)
                || lexicon::contains(NAME_CONNECTORS, t.word)
                || lexicon::tech_term(t.word).is_some()
        });

    let mut span: Vec<&str> = Vec::new();
    let mut span_at_start = false;
    let mut sentence_start = !list_entry;

    for (i, token) in tokens.iter().enumerate() {
        if !token.leading.is_empty() {
            flush(&mut span, span_at_start, out);
        }

        // Bullets, dashes and other punctuation-only tokens
        if token.word.is_empty() {
            flush(&mut span, span_at_start, out);
            if token.trailing.contains(['.', '!', '?']) {
                sentence_start = !list_entry;
            }
            continue;
        }

        if is_name_word(token.word) {
            if span.is_empty() {
                span_at_start = sentence_start;
            }
            span.push(token.word);
        } else if !span.is_empty()
            && token.trailing.is_empty()
            && lexicon::contains(NAME_CONNECTORS, token.word)
            && tokens
                .get(i + 1)
                .is_some_and(|next| next.leading.is_empty() && is_name_word(next.word))
        {
            span.push(token.word);
        } else {
            flush(&mut span, span_at_start, out);
            if let Some(term) = lexicon::tech_term(token.word) {
                out.push(Entity {
                    text: term.to_string(),
                    label: EntityLabel::Org,
                });
            }
        }

        if token.breaks_after() {
            flush(&mut span, span_at_start, out);
        }
        sentence_start = token.ends_sentence() && !list_entry;
    }
    flush(&mut span, span_at_start, out);
}

fn flush(span: &mut Vec<&str>, at_start: bool, out: &mut Vec<Entity>) {
    if let Some(entity) = classify(span, at_start) {
        out.push(entity);
    }
    span.clear();
}

fn classify(span: &[&str], at_sentence_start: bool) -> Option<Entity> {
    let mut words = span;
    let mut trimmed_front = false;

    while let Some((first, rest)) = words.split_first() {
        if lexicon::contains(STOP_WORDS, first) || lexicon::contains(NAME_CONNECTORS, first) {
            words = rest;
            trimmed_front = true;
        } else {
            break;
        }
    }
    while let Some((last, rest)) = words.split_last() {
        if lexicon::contains(NAME_CONNECTORS, last) {
            words = rest;
        } else {
            break;
        }
    }

    // Sentence-initial verbs ("Managed Kubernetes clusters")
    if at_sentence_start && !trimmed_front && words.len() > 1 && looks_like_verb(words[0]) {
        words = &words[1..];
        trimmed_front = true;
    }

    let (first, _) = words.split_first()?;
    let at_start = at_sentence_start && !trimmed_front;

    if words.len() == 1
        && (lexicon::contains(SECTION_HEADINGS, first) || at_start && !is_distinctive(first))
    {
        return None;
    }
    if words.iter().all(|w| is_shouting(w)) {
        return None;
    }

    Some(Entity {
        text: words.join(" "),
        label: label_for(words),
    })
}

fn label_for(words: &[&str]) -> EntityLabel {
    if lexicon::contains(HONORIFICS, words[0]) && words.len() > 1 {
        return EntityLabel::Person;
    }
    if words
        .iter()
        .all(|w| lexicon::contains(MONTHS, w) || lexicon::contains(WEEKDAYS, w))
    {
        return EntityLabel::Date;
    }
    if words.iter().all(|w| lexicon::contains(PLACES, w)) {
        return EntityLabel::Gpe;
    }
    EntityLabel::Org
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '&')
}

fn is_name_word(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase) || has_inner_upper(word)
}

/// Mixed case after the first character: "PostgreSQL", "iOS", "GitHub".
fn has_inner_upper(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase) && word.chars().any(char::is_lowercase)
}

/// Short all-caps tokens such as "AWS", "SQL" or "EC2".
fn is_acronym(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2
        && word.chars().count() <= MAX_ACRONYM_LEN
        && word.chars().all(|c| !c.is_lowercase())
}

/// Long all-caps words are section headers ("EXPERIENCE"), not names.
fn is_shouting(word: &str) -> bool {
    word.chars().count() > MAX_ACRONYM_LEN
        && word.chars().any(char::is_alphabetic)
        && word.chars().all(|c| !c.is_lowercase())
}

fn is_distinctive(word: &str) -> bool {
    is_acronym(word)
        || has_inner_upper(word)
        || word.contains(['+', '#'])
        || lexicon::contains(KNOWN_ORGS, word)
        || lexicon::tech_term(word).is_some()
}

fn looks_like_verb(word: &str) -> bool {
    let lower = word.to_lowercase();
    !is_distinctive(word) && (lower.ends_with("ed") || lower.ends_with("ing"))
}
