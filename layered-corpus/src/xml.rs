//! Reading and writing OPUS-style sentence XML.
//!
//! A corpus document is a sequence of sentence elements, each holding word
//! elements with their annotations as attributes:
//!
//! ```xml
//! <s id="4">
//!   <w id="w4.1" lem="she" pos="PP">She</w>
//!   <w id="w4.2" lem="have" pos="VHZ">has</w>
//! </s>
//! ```
//!
//! Word elements may be nested in other elements (chunks, phrases) within
//! the sentence. Element and attribute names come from [`CorpusAttrs`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use layered_constructions::{CorpusAttrs, Sentence, Token};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{CorpusError, CorpusResult};

/// Read all sentences of the document at `path`.
pub fn read_sentences(path: &Path, attrs: &CorpusAttrs) -> CorpusResult<Vec<Sentence>> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_sentences(&content, attrs, &path.display().to_string())
}

/// Parse all sentences of a document. `source` names the document in errors.
pub fn parse_sentences(
    content: &str,
    attrs: &CorpusAttrs,
    source: &str,
) -> CorpusResult<Vec<Sentence>> {
    let sentence_tag = attrs.sentence_tag.as_bytes();
    let word_tag = attrs.word_tag.as_bytes();

    let mut reader = Reader::from_str(content);
    let mut sentences = Vec::new();
    let mut current: Option<Sentence> = None;
    let mut word: Option<Token> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(
                source,
                format!("at position {}: {}", reader.buffer_position(), e),
            )
        })?;

        match event {
            Event::Start(e) if e.name().as_ref() == sentence_tag => {
                current = Some(sentence_from(&e, attrs, source)?);
            }
            Event::Start(e) if e.name().as_ref() == word_tag && current.is_some() => {
                word = Some(token_from(&e, source)?);
            }
            Event::Empty(e) if e.name().as_ref() == sentence_tag => {
                sentences.push(sentence_from(&e, attrs, source)?);
            }
            Event::Empty(e) if e.name().as_ref() == word_tag => {
                if let Some(sentence) = current.as_mut() {
                    sentence.tokens.push(token_from(&e, source)?);
                }
            }
            Event::Text(text) => {
                if let Some(word) = word.as_mut() {
                    let text = text.unescape().map_err(|e| xml_error(source, e))?;
                    word.text.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == word_tag => {
                if let (Some(sentence), Some(word)) = (current.as_mut(), word.take()) {
                    sentence.tokens.push(word);
                }
            }
            Event::End(e) if e.name().as_ref() == sentence_tag => {
                if let Some(sentence) = current.take() {
                    sentences.push(sentence);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sentences)
}

/// Serialize a sentence back to XML, with its words as the only children.
pub fn sentence_to_xml(sentence: &Sentence, attrs: &CorpusAttrs) -> CorpusResult<String> {
    let mut writer = Writer::new(Vec::new());

    let mut start = BytesStart::new(attrs.sentence_tag.as_str());
    start.push_attribute((attrs.sentence_id.as_str(), sentence.id.as_str()));
    for (name, value) in &sentence.attrs {
        start.push_attribute((name.as_str(), value.as_str()));
    }
    writer.write_event(Event::Start(start)).map_err(write_error)?;

    for token in &sentence.tokens {
        let mut word = BytesStart::new(attrs.word_tag.as_str());
        for (name, value) in &token.attrs {
            word.push_attribute((name.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(word)).map_err(write_error)?;
        writer
            .write_event(Event::Text(BytesText::new(&token.text)))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(attrs.word_tag.as_str())))
            .map_err(write_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(attrs.sentence_tag.as_str())))
        .map_err(write_error)?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn sentence_from(e: &BytesStart<'_>, attrs: &CorpusAttrs, source: &str) -> CorpusResult<Sentence> {
    let mut values = attributes(e, source)?;
    let mut sentence = Sentence::new(values.remove(&attrs.sentence_id).unwrap_or_default());
    sentence.attrs = values;
    Ok(sentence)
}

fn token_from(e: &BytesStart<'_>, source: &str) -> CorpusResult<Token> {
    Ok(Token {
        text: String::new(),
        attrs: attributes(e, source)?,
    })
}

fn attributes(e: &BytesStart<'_>, source: &str) -> CorpusResult<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| xml_error(source, e))?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| xml_error(source, e))?;
        values.insert(name, value.into_owned());
    }
    Ok(values)
}

pub(crate) fn xml_error(source: &str, e: impl fmt::Display) -> CorpusError {
    CorpusError::Xml {
        path: source.to_string(),
        message: e.to_string(),
    }
}

fn write_error(e: impl fmt::Display) -> CorpusError {
    CorpusError::Write {
        message: e.to_string(),
    }
}
