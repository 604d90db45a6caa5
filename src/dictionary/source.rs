//! XML word-list document
//!
//! The word list is an ordered sequence of `<Entry id="..">` elements, each with
//! an optional `<Timestamp>` and a `<Description>`. A description holds one or
//! more variations separated by `" / "`. Removing a word never deletes the
//! entry: the matching variation is tombstoned, stored on disk with a `"__"`
//! marker in front of its original text.

use crate::core::annotation_spans;
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between variations inside one description
pub const VARIATION_SEPARATOR: &str = " / ";

/// Prefix marking a tombstoned variation in the stored description
pub const REMOVED_MARKER: &str = "__";

const ENTRY: &str = "Entry";
const ID: &str = "id";
const TIMESTAMP: &str = "Timestamp";
const DESCRIPTION: &str = "Description";

/// Failure to load or save the word list
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read word list '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write word list '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("cannot serialize word list: {0}")]
    Serialize(String),
    #[error("word list has no root element")]
    MissingRoot,
    #[error("unexpected <{name}> element where an <Entry> was expected")]
    UnexpectedElement { name: String },
    #[error("entry #{position} has no id attribute")]
    MissingId { position: usize },
    #[error("entry #{position} has a non-numeric id '{value}'")]
    InvalidId { position: usize, value: String },
    #[error("entry {id} has no Description")]
    MissingDescription { id: u64 },
}

impl SourceError {
    fn serialize(err: impl Display) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Whether a variation still contributes to the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Active,
    Removed,
}

/// One slash-separated variation of a description, as written (diacritics,
/// annotations and all)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub text: String,
    pub status: EntryStatus,
}

impl Variation {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(REMOVED_MARKER) {
            Some(text) => Self {
                text: text.to_string(),
                status: EntryStatus::Removed,
            },
            None => Self {
                text: raw.to_string(),
                status: EntryStatus::Active,
            },
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }
}

/// Child elements of an entry, in the order they are written
#[derive(Debug, Clone, PartialEq, Eq)]
enum Child {
    Timestamp,
    Description,
    Other { name: String, text: String },
}

/// A single dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: u64,
    pub timestamp: Option<String>,
    pub variations: Vec<Variation>,
    children: Vec<Child>,
}

impl Entry {
    /// Build an entry from a raw stored description
    #[must_use]
    pub fn new(id: u64, timestamp: Option<String>, description: &str) -> Self {
        let variations = if description.is_empty() {
            Vec::new()
        } else {
            split_variations(description)
                .into_iter()
                .map(Variation::parse)
                .collect()
        };

        Self {
            id,
            timestamp,
            variations,
            children: vec![Child::Timestamp, Child::Description],
        }
    }

    /// The description as stored, tombstones carrying the removal marker
    #[must_use]
    pub fn description(&self) -> String {
        self.variations
            .iter()
            .map(|v| match v.status {
                EntryStatus::Active => v.text.clone(),
                EntryStatus::Removed => format!("{REMOVED_MARKER}{}", v.text),
            })
            .collect::<Vec<_>>()
            .join(VARIATION_SEPARATOR)
    }

    /// Raw text of every variation that has not been removed
    pub fn active_variations(&self) -> impl Iterator<Item = &str> {
        self.variations
            .iter()
            .filter(|v| v.is_active())
            .map(|v| v.text.as_str())
    }
}

/// Split a description on the variation separator
///
/// Separators inside a ` (...)` annotation do not split: `"abac (s. / pl.)"`
/// is a single variation.
fn split_variations(description: &str) -> Vec<&str> {
    let spans: Vec<_> = annotation_spans(description).collect();

    let mut parts = Vec::new();
    let mut start = 0;
    for (at, _) in description.match_indices(VARIATION_SEPARATOR) {
        if spans.iter().any(|span| span.contains(&at)) {
            continue;
        }
        parts.push(&description[start..at]);
        start = at + VARIATION_SEPARATOR.len();
    }
    parts.push(&description[start..]);
    parts
}

/// Entry under construction while reading
struct PartialEntry {
    position: usize,
    id: u64,
    timestamp: Option<String>,
    description: Option<String>,
    children: Vec<Child>,
}

impl PartialEntry {
    fn set_field(&mut self, name: String, text: String) {
        let child = if name == TIMESTAMP {
            self.timestamp = Some(text);
            Child::Timestamp
        } else if name == DESCRIPTION {
            self.description = Some(text);
            Child::Description
        } else {
            Child::Other { name, text }
        };

        if matches!(child, Child::Other { .. }) || !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    fn finish(mut self) -> Result<Entry, SourceError> {
        let description = self
            .description
            .ok_or(SourceError::MissingDescription { id: self.id })?;

        if !self.children.contains(&Child::Timestamp) {
            self.children.insert(0, Child::Timestamp);
        }

        let mut entry = Entry::new(self.id, self.timestamp, &description);
        entry.children = self.children;
        log::trace!("parsed entry {} at #{}", entry.id, self.position);
        Ok(entry)
    }
}

/// The whole word-list document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSource {
    root_name: String,
    root_attributes: Vec<(String, String)>,
    entries: Vec<Entry>,
}

impl WordSource {
    /// An empty document with the given root element name
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            root_attributes: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Read and parse a word list from disk
    ///
    /// # Errors
    /// Returns `SourceError` if the file cannot be read or is not a valid word list.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        log::info!("loading word list from {}", path.display());

        let xml = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&xml)
    }

    /// Parse a word list from XML text
    ///
    /// # Errors
    /// Returns `SourceError` on XML syntax errors, elements other than `Entry`
    /// under the root, or entries missing their `id` or `Description`.
    ///
    /// # Examples
    /// ```
    /// use fazan::dictionary::WordSource;
    ///
    /// let source = WordSource::parse(
    ///     r#"<Root><Entry id="1"><Description>casă / __case</Description></Entry></Root>"#,
    /// ).unwrap();
    /// let entry = &source.entries()[0];
    /// assert_eq!(entry.active_variations().collect::<Vec<_>>(), vec!["casă"]);
    /// ```
    pub fn parse(xml: &str) -> Result<Self, SourceError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut root: Option<(String, Vec<(String, String)>)> = None;
        let mut entries = Vec::new();
        let mut current: Option<PartialEntry> = None;
        let mut field: Option<String> = None;
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 => root = Some((element_name(&e), attributes(&e)?)),
                        2 => current = Some(start_entry(&e, entries.len())?),
                        3 => {
                            field = Some(element_name(&e));
                            text.clear();
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth {
                    0 => root = Some((element_name(&e), attributes(&e)?)),
                    1 => entries.push(start_entry(&e, entries.len())?.finish()?),
                    2 => {
                        if let Some(entry) = current.as_mut() {
                            entry.set_field(element_name(&e), String::new());
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if depth >= 3 {
                        text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if depth >= 3 {
                        text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::End(_) => {
                    match depth {
                        3 => {
                            if let (Some(entry), Some(name)) = (current.as_mut(), field.take()) {
                                entry.set_field(name, std::mem::take(&mut text));
                            }
                        }
                        2 => {
                            if let Some(entry) = current.take() {
                                entries.push(entry.finish()?);
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let (root_name, root_attributes) = root.ok_or(SourceError::MissingRoot)?;
        log::debug!("parsed {} entries under <{root_name}>", entries.len());

        Ok(Self {
            root_name,
            root_attributes,
            entries,
        })
    }

    /// All entries in document order
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Tombstone one variation of one entry
    ///
    /// Returns `false` if the position does not exist or was already removed.
    pub fn mark_removed(&mut self, entry: usize, variation: usize) -> bool {
        match self
            .entries
            .get_mut(entry)
            .and_then(|e| e.variations.get_mut(variation))
        {
            Some(v) if v.is_active() => {
                v.status = EntryStatus::Removed;
                true
            }
            _ => false,
        }
    }

    /// Identifier the next appended entry will receive
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().map_or(1, |id| id + 1)
    }

    /// Append a new entry for `word`, annotated with the agent that added it
    ///
    /// Returns the new entry's identifier.
    pub fn append(&mut self, word: &str, agent: &str, timestamp: i64) -> u64 {
        let id = self.next_id();
        let description = format!("{word} (added by {agent})");
        self.entries
            .push(Entry::new(id, Some(timestamp.to_string()), &description));
        id
    }

    /// Serialize the document, re-indented with two spaces per level
    ///
    /// # Errors
    /// Returns `SourceError::Serialize` if the XML writer fails.
    pub fn to_xml(&self) -> Result<String, SourceError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(SourceError::serialize)?;

        let mut root = BytesStart::new(self.root_name.as_str());
        for (key, value) in &self.root_attributes {
            root.push_attribute((key.as_str(), value.as_str()));
        }
        writer
            .write_event(Event::Start(root))
            .map_err(SourceError::serialize)?;

        for entry in &self.entries {
            let id = entry.id.to_string();
            let mut start = BytesStart::new(ENTRY);
            start.push_attribute((ID, id.as_str()));
            writer
                .write_event(Event::Start(start))
                .map_err(SourceError::serialize)?;

            for child in &entry.children {
                match child {
                    Child::Timestamp => {
                        if let Some(timestamp) = &entry.timestamp {
                            write_field(&mut writer, TIMESTAMP, timestamp)?;
                        }
                    }
                    Child::Description => {
                        write_field(&mut writer, DESCRIPTION, &entry.description())?;
                    }
                    Child::Other { name, text } => write_field(&mut writer, name, text)?,
                }
            }

            writer
                .write_event(Event::End(BytesEnd::new(ENTRY)))
                .map_err(SourceError::serialize)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.root_name.as_str())))
            .map_err(SourceError::serialize)?;

        String::from_utf8(writer.into_inner()).map_err(SourceError::serialize)
    }

    /// Write the document to disk
    ///
    /// # Errors
    /// Returns `SourceError` if serialization or the file write fails.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), SourceError> {
        let path = path.as_ref();
        let xml = self.to_xml()?;
        fs::write(path, xml).map_err(|source| SourceError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, SourceError> {
    e.attributes()
        .map(|attr| {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect()
}

fn start_entry(e: &BytesStart<'_>, position: usize) -> Result<PartialEntry, SourceError> {
    let name = element_name(e);
    if name != ENTRY {
        return Err(SourceError::UnexpectedElement { name });
    }

    let raw = e
        .try_get_attribute(ID)?
        .ok_or(SourceError::MissingId { position })?
        .unescape_value()?
        .into_owned();
    let id = raw.trim().parse().map_err(|_| SourceError::InvalidId {
        position,
        value: raw.clone(),
    })?;

    Ok(PartialEntry {
        position,
        id,
        timestamp: None,
        description: None,
        children: Vec::new(),
    })
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), SourceError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(SourceError::serialize)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(SourceError::serialize)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(SourceError::serialize)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Dex version="2">
  <Entry id="1">
    <Timestamp>1200000000</Timestamp>
    <Description>casă (s.f.)</Description>
  </Entry>
  <Entry id="2">
    <Timestamp>1200000001</Timestamp>
    <Description>apă / __ape</Description>
    <Source>dex98</Source>
  </Entry>
  <Entry id="7">
    <Description>Ion &amp; Maria</Description>
  </Entry>
</Dex>"#;

    #[test]
    fn parses_entries_in_order() {
        let source = WordSource::parse(SAMPLE).unwrap();
        let ids: Vec<u64> = source.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);
        assert_eq!(source.entries()[0].timestamp.as_deref(), Some("1200000000"));
        assert_eq!(source.entries()[2].timestamp, None);
    }

    #[test]
    fn parses_variations_and_tombstones() {
        let source = WordSource::parse(SAMPLE).unwrap();
        let entry = &source.entries()[1];

        assert_eq!(entry.variations.len(), 2);
        assert_eq!(entry.variations[1].text, "ape");
        assert_eq!(entry.variations[1].status, EntryStatus::Removed);
        assert_eq!(entry.active_variations().collect::<Vec<_>>(), vec!["apă"]);
        assert_eq!(entry.description(), "apă / __ape");
    }

    #[test]
    fn unescapes_description_text() {
        let source = WordSource::parse(SAMPLE).unwrap();
        assert_eq!(source.entries()[2].description(), "Ion & Maria");
    }

    #[test]
    fn missing_id_is_an_error() {
        let err = WordSource::parse("<Root><Entry><Description>casa</Description></Entry></Root>")
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingId { position: 0 }));
    }

    #[test]
    fn non_numeric_id_is_an_error() {
        let err = WordSource::parse(
            r#"<Root><Entry id="x1"><Description>casa</Description></Entry></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::InvalidId { position: 0, .. }));
    }

    #[test]
    fn missing_description_is_an_error() {
        let err = WordSource::parse(
            r#"<Root><Entry id="4"><Timestamp>1</Timestamp></Entry></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::MissingDescription { id: 4 }));
    }

    #[test]
    fn unexpected_element_is_an_error() {
        let err = WordSource::parse("<Root><Word>casa</Word></Root>").unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedElement { .. }));
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(
            WordSource::parse("").unwrap_err(),
            SourceError::MissingRoot
        ));
    }

    #[test]
    fn empty_root_has_no_entries() {
        let source = WordSource::parse("<Root/>").unwrap();
        assert!(source.entries().is_empty());
        assert_eq!(source.next_id(), 1);
    }

    #[test]
    fn empty_description_has_no_variations() {
        let source =
            WordSource::parse(r#"<Root><Entry id="1"><Description/></Entry></Root>"#).unwrap();
        assert!(source.entries()[0].variations.is_empty());
    }

    #[test]
    fn append_uses_next_sequential_id() {
        let mut source = WordSource::parse(SAMPLE).unwrap();
        let id = source.append("fazan", "tester", 1_700_000_000);

        assert_eq!(id, 8);
        let entry = source.entries().last().unwrap();
        assert_eq!(entry.description(), "fazan (added by tester)");
        assert_eq!(entry.timestamp.as_deref(), Some("1700000000"));
    }

    #[test]
    fn mark_removed_tombstones_once() {
        let mut source = WordSource::parse(SAMPLE).unwrap();
        assert!(source.mark_removed(0, 0));
        assert!(!source.mark_removed(0, 0));
        assert!(!source.mark_removed(9, 0));
        assert_eq!(source.entries()[0].description(), "__casă (s.f.)");
    }

    #[test]
    fn serialized_document_reparses_identically() {
        let mut source = WordSource::parse(SAMPLE).unwrap();
        source.mark_removed(1, 0);
        source.append("nou", "tester", 5);

        let xml = source.to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("\n  <Entry id=\"1\">"));
        assert!(xml.contains("<Description>__apă / __ape</Description>"));
        assert!(xml.contains("<Source>dex98</Source>"));
        assert!(xml.contains("Ion &amp; Maria"));

        assert_eq!(WordSource::parse(&xml).unwrap(), source);
    }

    #[test]
    fn write_then_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.xml");

        let source = WordSource::parse(SAMPLE).unwrap();
        source.write(&path).unwrap();

        assert_eq!(WordSource::read(&path).unwrap(), source);
    }

    #[test]
    fn annotation_separators_do_not_split_variations() {
        let entry = Entry::new(1, None, "abac (s. / pl.) / abace");

        let texts: Vec<&str> = entry.variations.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["abac (s. / pl.)", "abace"]);
        assert_eq!(entry.description(), "abac (s. / pl.) / abace");
    }

    #[test]
    fn tombstoned_annotated_variation_stays_whole() {
        let source = WordSource::parse(
            r#"<Root><Entry id="1"><Description>__abac (s. / pl.)</Description></Entry></Root>"#,
        )
        .unwrap();
        let entry = &source.entries()[0];

        assert_eq!(entry.variations.len(), 1);
        assert_eq!(entry.variations[0].status, EntryStatus::Removed);
        assert_eq!(entry.variations[0].text, "abac (s. / pl.)");
    }

    #[test]
    fn child_elements_keep_document_order() {
        let source = WordSource::parse(
            r#"<Root>
                 <Entry id="3"><Source>dex09</Source><Description>casa</Description><Timestamp>9</Timestamp></Entry>
                 <Entry id="4"><Note>n</Note><Description>sare</Description></Entry>
               </Root>"#,
        )
        .unwrap();
        let xml = source.to_xml().unwrap();

        let source_at = xml.find("<Source>").unwrap();
        let casa_at = xml.find("<Description>casa").unwrap();
        let stamp_at = xml.find("<Timestamp>9").unwrap();
        assert!(source_at < casa_at && casa_at < stamp_at);

        let note_at = xml.find("<Note>").unwrap();
        assert!(note_at < xml.find("<Description>sare").unwrap());

        assert_eq!(WordSource::parse(&xml).unwrap(), source);
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = WordSource::read("/definitely/not/here.xml").unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.xml"));
    }
}
