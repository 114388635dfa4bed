use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::CatalogError;

// @module: Qt Linguist .ts catalog parsing and writing

/// Translation state of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// A translation element with text and no `unfinished` marker
    Finished,
    /// Marked as needing (re)translation, or present but empty
    Unfinished,
    /// No translation element exists at all
    Absent,
}

/// One translatable string occurrence extracted from a catalog
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// Grouping identifier, the `<context><name>` the message belongs to
    pub context_name: String,

    /// Original text to translate; may be empty
    pub source_text: String,

    /// Optional human-authored hint from the `<comment>` element
    pub comment: Option<String>,

    /// Optional provenance string ("file:line"), advisory only
    pub location: Option<String>,

    /// Existing translated text, if any
    pub translation: Option<String>,

    /// Translation state derived from the `<translation>` element
    pub status: TranslationStatus,
}

impl TranslationUnit {
    /// Whether this unit belongs to the pending subsequence of a run
    pub fn needs_translation(&self) -> bool {
        matches!(self.status, TranslationStatus::Unfinished | TranslationStatus::Absent)
    }
}

/// One `<message>` element of a catalog
#[derive(Debug, Clone, Default)]
struct Message {
    source: String,
    comment: Option<String>,
    location_filename: Option<String>,
    location_line: Option<String>,
    translation: Option<String>,
    translation_present: bool,
    translation_type: Option<String>,
}

impl Message {
    fn status(&self) -> TranslationStatus {
        if !self.translation_present {
            return TranslationStatus::Absent;
        }
        if self.translation_type.as_deref() == Some("unfinished") {
            return TranslationStatus::Unfinished;
        }
        match &self.translation {
            Some(text) if !text.is_empty() => TranslationStatus::Finished,
            _ => TranslationStatus::Unfinished,
        }
    }

    fn location(&self) -> Option<String> {
        match (&self.location_filename, &self.location_line) {
            (Some(filename), Some(line)) => Some(format!("{}:{}", filename, line)),
            (Some(filename), None) => Some(filename.clone()),
            _ => None,
        }
    }
}

/// One `<context>` element of a catalog
#[derive(Debug, Clone, Default)]
struct TsContext {
    name: String,
    messages: Vec<Message>,
}

/// In-memory model of a Qt Linguist .ts catalog
///
/// The catalog preserves document order: contexts in file order, messages in
/// file order within each context. Unit positions handed out by `units()` are
/// stable for the lifetime of the catalog and are the positions
/// `apply_translations` expects back.
#[derive(Debug)]
pub struct TsCatalog {
    /// Path the catalog was parsed from
    pub source_file: PathBuf,

    /// `version` attribute of the `<TS>` root, if present
    version: Option<String>,

    /// `language` attribute of the `<TS>` root, if present
    language: Option<String>,

    contexts: Vec<TsContext>,
}

/// Element currently accumulating character data during parsing
#[derive(Debug, Clone, Copy, PartialEq)]
enum TextField {
    ContextName,
    Source,
    Comment,
    Translation,
}

impl TsCatalog {
    /// Parse a catalog from a file on disk
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse_str(&content, path.to_path_buf())
    }

    /// Parse a catalog from an XML string
    pub fn parse_str(content: &str, source_file: PathBuf) -> Result<Self, CatalogError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut catalog = TsCatalog {
            source_file,
            version: None,
            language: None,
            contexts: Vec::new(),
        };

        let mut current_context: Option<TsContext> = None;
        let mut current_message: Option<Message> = None;
        let mut current_field: Option<TextField> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"TS" => {
                        catalog.version = attribute_value(&e, b"version")?;
                        catalog.language = attribute_value(&e, b"language")?;
                    },
                    b"context" => {
                        current_context = Some(TsContext::default());
                    },
                    b"message" => {
                        current_message = Some(Message::default());
                    },
                    b"name" if current_message.is_none() => {
                        current_field = Some(TextField::ContextName);
                    },
                    b"source" => {
                        current_field = Some(TextField::Source);
                    },
                    b"comment" => {
                        current_field = Some(TextField::Comment);
                    },
                    b"translation" => {
                        if let Some(message) = current_message.as_mut() {
                            message.translation_present = true;
                            message.translation_type = attribute_value(&e, b"type")?;
                        }
                        current_field = Some(TextField::Translation);
                    },
                    b"location" => {
                        if let Some(message) = current_message.as_mut() {
                            message.location_filename = attribute_value(&e, b"filename")?;
                            message.location_line = attribute_value(&e, b"line")?;
                        }
                    },
                    other => {
                        debug!("Skipping unknown element: {}", String::from_utf8_lossy(other));
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"translation" => {
                        if let Some(message) = current_message.as_mut() {
                            message.translation_present = true;
                            message.translation_type = attribute_value(&e, b"type")?;
                        }
                    },
                    b"location" => {
                        if let Some(message) = current_message.as_mut() {
                            message.location_filename = attribute_value(&e, b"filename")?;
                            message.location_line = attribute_value(&e, b"line")?;
                        }
                    },
                    _ => {}
                },
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    match (current_field, current_message.as_mut(), current_context.as_mut()) {
                        (Some(TextField::ContextName), _, Some(context)) => {
                            context.name.push_str(&text);
                        },
                        (Some(TextField::Source), Some(message), _) => {
                            message.source.push_str(&text);
                        },
                        (Some(TextField::Comment), Some(message), _) => {
                            let comment = message.comment.get_or_insert_with(String::new);
                            comment.push_str(&text);
                        },
                        (Some(TextField::Translation), Some(message), _) => {
                            let translation = message.translation.get_or_insert_with(String::new);
                            translation.push_str(&text);
                        },
                        _ => {}
                    }
                },
                Event::End(e) => match e.name().as_ref() {
                    b"message" => {
                        if let (Some(message), Some(context)) = (current_message.take(), current_context.as_mut()) {
                            context.messages.push(message);
                        }
                        current_field = None;
                    },
                    b"context" => {
                        if let Some(context) = current_context.take() {
                            if context.name.is_empty() {
                                return Err(CatalogError::MissingElement("context name".to_string()));
                            }
                            catalog.contexts.push(context);
                        }
                    },
                    b"name" | b"source" | b"comment" | b"translation" => {
                        current_field = None;
                    },
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if catalog.contexts.is_empty() {
            warn!("Catalog contains no contexts: {:?}", catalog.source_file);
        }

        Ok(catalog)
    }

    /// Extract the full ordered sequence of translation units
    pub fn units(&self) -> Vec<TranslationUnit> {
        let mut units = Vec::with_capacity(self.total_units());
        for context in &self.contexts {
            for message in &context.messages {
                units.push(TranslationUnit {
                    context_name: context.name.clone(),
                    source_text: message.source.clone(),
                    comment: message.comment.clone(),
                    location: message.location(),
                    translation: message.translation.clone(),
                    status: message.status(),
                });
            }
        }
        units
    }

    /// Total number of messages across all contexts
    pub fn total_units(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Apply finished translations back into the catalog
    ///
    /// Keys are positions in the ordered unit sequence from `units()`. The
    /// target message gains a `<translation>` element when it had none, and
    /// any `type="unfinished"` marker is dropped.
    pub fn apply_translations(&mut self, translations: &BTreeMap<usize, String>) {
        let mut position = 0usize;
        for context in &mut self.contexts {
            for message in &mut context.messages {
                if let Some(text) = translations.get(&position) {
                    message.translation = Some(text.clone());
                    message.translation_present = true;
                    if message.translation_type.as_deref() == Some("unfinished") {
                        message.translation_type = None;
                    }
                }
                position += 1;
            }
        }

        if let Some(max) = translations.keys().next_back() {
            if *max >= position {
                warn!("Ignoring {} translation(s) beyond catalog bounds",
                      translations.keys().filter(|k| **k >= position).count());
            }
        }
    }

    /// Serialize the catalog to an XML string
    pub fn to_xml(&self) -> Result<String, CatalogError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::DocType(BytesText::new("TS")))?;

        let mut ts = BytesStart::new("TS");
        if let Some(version) = &self.version {
            ts.push_attribute(("version", version.as_str()));
        }
        if let Some(language) = &self.language {
            ts.push_attribute(("language", language.as_str()));
        }
        writer.write_event(Event::Start(ts))?;

        for context in &self.contexts {
            writer.write_event(Event::Start(BytesStart::new("context")))?;

            writer.write_event(Event::Start(BytesStart::new("name")))?;
            writer.write_event(Event::Text(BytesText::new(&context.name)))?;
            writer.write_event(Event::End(BytesEnd::new("name")))?;

            for message in &context.messages {
                writer.write_event(Event::Start(BytesStart::new("message")))?;

                if let Some(filename) = &message.location_filename {
                    let mut location = BytesStart::new("location");
                    location.push_attribute(("filename", filename.as_str()));
                    if let Some(line) = &message.location_line {
                        location.push_attribute(("line", line.as_str()));
                    }
                    writer.write_event(Event::Empty(location))?;
                }

                writer.write_event(Event::Start(BytesStart::new("source")))?;
                writer.write_event(Event::Text(BytesText::new(&message.source)))?;
                writer.write_event(Event::End(BytesEnd::new("source")))?;

                if let Some(comment) = &message.comment {
                    writer.write_event(Event::Start(BytesStart::new("comment")))?;
                    writer.write_event(Event::Text(BytesText::new(comment)))?;
                    writer.write_event(Event::End(BytesEnd::new("comment")))?;
                }

                if message.translation_present {
                    let mut translation = BytesStart::new("translation");
                    if let Some(translation_type) = &message.translation_type {
                        translation.push_attribute(("type", translation_type.as_str()));
                    }
                    match &message.translation {
                        Some(text) if !text.is_empty() => {
                            writer.write_event(Event::Start(translation))?;
                            writer.write_event(Event::Text(BytesText::new(text)))?;
                            writer.write_event(Event::End(BytesEnd::new("translation")))?;
                        },
                        _ => {
                            writer.write_event(Event::Empty(translation))?;
                        }
                    }
                }

                writer.write_event(Event::End(BytesEnd::new("message")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("context")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("TS")))?;

        let buffer = writer.into_inner();
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the catalog to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let xml = self.to_xml()?;
        fs::write(path, xml)?;
        debug!("Wrote catalog to {:?}", path);
        Ok(())
    }
}

/// Read an attribute value from a start tag, unescaping entities
fn attribute_value(element: &BytesStart, name: &[u8]) -> Result<Option<String>, CatalogError> {
    match element.try_get_attribute(name) {
        Ok(Some(attr)) => {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            Ok(Some(value.into_owned()))
        },
        Ok(None) => Ok(None),
        Err(e) => Err(CatalogError::Xml(quick_xml::Error::from(e))),
    }
}
