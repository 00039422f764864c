//! Assembly and serialization of the MyAnimeList import document.
//!
//! The document is kept as a header plus a record list. Records are sorted
//! in memory and the XML is written once at the end.

use super::counter::{category_total, exported_lists, total_entries};
use super::record::{map_entry, Field, OutputRecord};
use crate::api::MediaList;
use crate::error::{ExportError, Result};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use shared::{MediaType, TitleLanguage};
use tracing::debug;

/// Root element of the import format
pub const ROOT_ELEMENT: &str = "myanimelist";

/// Header element of the import format
pub const HEADER_ELEMENT: &str = "myinfo";

/// Request-level inputs of a document
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub user_name: String,
    pub user_id: u64,
    pub media_type: MediaType,
    pub language: TitleLanguage,
}

/// Aggregate counts written to `<myinfo>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListHeader {
    pub user_id: u64,
    pub user_name: String,
    pub media_type: MediaType,
    pub total: usize,
    /// Watching or Reading
    pub current: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub dropped: usize,
    pub planned: usize,
}

impl ListHeader {
    /// Count the lists of a collection
    pub fn from_lists(lists: &[MediaList], settings: &DocumentSettings) -> Self {
        let current_list = match settings.media_type {
            MediaType::Anime => "Watching",
            MediaType::Manga => "Reading",
        };

        Self {
            user_id: settings.user_id,
            user_name: settings.user_name.clone(),
            media_type: settings.media_type,
            total: total_entries(lists),
            current: category_total(lists, current_list),
            completed: category_total(lists, "Completed"),
            on_hold: category_total(lists, "Paused"),
            dropped: category_total(lists, "Dropped"),
            planned: category_total(lists, "Planning"),
        }
    }

    /// Header fields in schema order
    pub fn fields(&self) -> Vec<Field> {
        let (export_type, total, current, planned) = match self.media_type {
            MediaType::Anime => (
                "1",
                "user_total_anime",
                "user_total_watching",
                "user_total_plantowatch",
            ),
            MediaType::Manga => (
                "2",
                "user_total_manga",
                "user_total_reading",
                "user_total_plantoread",
            ),
        };

        vec![
            ("user_id", self.user_id.to_string()),
            ("user_name", self.user_name.clone()),
            ("user_export_type", export_type.to_string()),
            (total, self.total.to_string()),
            (current, self.current.to_string()),
            ("user_total_completed", self.completed.to_string()),
            ("user_total_onhold", self.on_hold.to_string()),
            ("user_total_dropped", self.dropped.to_string()),
            (planned, self.planned.to_string()),
        ]
    }
}

/// Header and sorted records of one export
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub header: ListHeader,
    pub records: Vec<OutputRecord>,
}

impl ExportDocument {
    /// Build the document for a user's lists.
    ///
    /// Favorites are skipped, every other list is mapped in order, `&` is
    /// spelled out as `and`, and the records end up sorted by (status, title).
    pub fn build(lists: &[MediaList], settings: &DocumentSettings) -> Self {
        let mut header = ListHeader::from_lists(lists, settings);
        header.user_name = spell_out_ampersands(&header.user_name);

        let mut records: Vec<OutputRecord> = exported_lists(lists)
            .flat_map(|list| {
                list.entries.iter().map(move |entry| {
                    map_entry(entry, &list.name, settings.language, settings.media_type)
                })
            })
            .collect();

        for record in &mut records {
            for text in record.text_fields_mut() {
                *text = spell_out_ampersands(text);
            }
        }

        // Stable, so duplicates keep their list order.
        records.sort_by(|a, b| (a.status(), a.title()).cmp(&(b.status(), b.title())));

        debug!(
            media_type = %settings.media_type,
            records = records.len(),
            "Built export document"
        );

        Self { header, records }
    }

    /// Serialize to UTF-8 XML bytes.
    ///
    /// Fails with [`ExportError::Format`] if any text cannot appear in XML 1.0.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        write(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

        write_element(&mut writer, HEADER_ELEMENT, &self.header.fields())?;
        for record in &self.records {
            write_element(&mut writer, record.element_name(), &record.fields())?;
        }

        write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// The import format has no use for entity-escaped ampersands.
fn spell_out_ampersands(text: &str) -> String {
    text.replace('&', "and")
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Format(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, fields: &[Field]) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;

    for (field, value) in fields {
        check_xml_chars(field, value)?;

        if value.is_empty() {
            write(writer, Event::Empty(BytesStart::new(*field)))?;
        } else {
            write(writer, Event::Start(BytesStart::new(*field)))?;
            write(
                writer,
                Event::Text(BytesText::from_escaped(partial_escape(value.as_str()))),
            )?;
            write(writer, Event::End(BytesEnd::new(*field)))?;
        }
    }

    write(writer, Event::End(BytesEnd::new(name)))
}

/// Reject characters outside the XML 1.0 `Char` production.
fn check_xml_chars(field: &str, value: &str) -> Result<()> {
    let invalid = value.chars().find(|&c| {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
    });

    match invalid {
        Some(c) => Err(ExportError::Format(format!(
            "<{}> contains character U+{:04X} which is not allowed in XML",
            field, c as u32
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::counter::FAVORITES;
    use crate::convert::tests::{anime_entry, list, manga_entry};
    use quick_xml::Reader;

    struct ParsedElement {
        name: String,
        fields: Vec<(String, String)>,
    }

    impl ParsedElement {
        fn get(&self, name: &str) -> &str {
            self.fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or_else(|| panic!("missing <{name}>"))
        }
    }

    /// Children of the root element with their text fields
    fn parse(xml: &[u8]) -> Vec<ParsedElement> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut elements = Vec::new();
        let mut depth = 0;
        let mut current: Option<ParsedElement> = None;
        let mut field: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    depth += 1;
                    match depth {
                        2 => {
                            current = Some(ParsedElement {
                                name,
                                fields: Vec::new(),
                            })
                        }
                        3 => field = Some(name),
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if let Some(element) = current.as_mut() {
                        element.fields.push((name, String::new()));
                    }
                }
                Event::Text(text) => {
                    if let (Some(element), Some(name)) = (current.as_mut(), field.take()) {
                        element
                            .fields
                            .push((name, text.unescape().unwrap().into_owned()));
                    }
                }
                Event::End(_) => {
                    depth -= 1;
                    if depth == 1 {
                        elements.extend(current.take());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        elements
    }

    fn settings(media_type: MediaType) -> DocumentSettings {
        DocumentSettings {
            user_name: "PROxZIMA".to_string(),
            user_id: 7,
            media_type,
            language: TitleLanguage::English,
        }
    }

    fn sample_lists() -> Vec<MediaList> {
        vec![
            list(
                "Watching",
                vec![anime_entry("Vinland Saga"), anime_entry("Akira")],
            ),
            list("Completed", vec![anime_entry("Monster"), anime_entry("Baccano!")]),
            list(FAVORITES, vec![anime_entry("Favourite Only")]),
            list("Planning", vec![anime_entry("Zetman")]),
            list("Rewatching", vec![anime_entry("Haibane Renmei")]),
        ]
    }

    #[test]
    fn test_header_counts() {
        let document = ExportDocument::build(&sample_lists(), &settings(MediaType::Anime));
        let header = &document.header;

        assert_eq!(header.total, 6);
        assert_eq!(header.current, 2);
        assert_eq!(header.completed, 2);
        assert_eq!(header.on_hold, 0);
        assert_eq!(header.planned, 1);
    }

    #[test]
    fn test_records_sorted_by_status_then_title() {
        let document = ExportDocument::build(&sample_lists(), &settings(MediaType::Anime));
        let keys: Vec<_> = document
            .records
            .iter()
            .map(|r| (r.status().to_string(), r.title().to_string()))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("".to_string(), "Haibane Renmei".to_string()),
                ("Completed".to_string(), "Baccano!".to_string()),
                ("Completed".to_string(), "Monster".to_string()),
                ("Plan to Watch".to_string(), "Zetman".to_string()),
                ("Watching".to_string(), "Akira".to_string()),
                ("Watching".to_string(), "Vinland Saga".to_string()),
            ]
        );

        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let lists = vec![list(
            "Completed",
            vec![anime_entry("beta"), anime_entry("Gamma"), anime_entry("Alpha")],
        )];
        let document = ExportDocument::build(&lists, &settings(MediaType::Anime));
        let titles: Vec<_> = document.records.iter().map(|r| r.title()).collect();

        assert_eq!(titles, vec!["Alpha", "Gamma", "beta"]);
    }

    #[test]
    fn test_xml_output() {
        let document = ExportDocument::build(&sample_lists(), &settings(MediaType::Anime));
        let xml = document.to_xml().unwrap();
        let text = String::from_utf8(xml.clone()).unwrap();

        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("<my_rated/>"));
        assert!(!text.contains("Favourite Only"));

        let elements = parse(&xml);
        assert_eq!(elements.len(), 7);
        assert_eq!(elements[0].name, "myinfo");
        assert_eq!(elements[0].get("user_id"), "7");
        assert_eq!(elements[0].get("user_name"), "PROxZIMA");
        assert_eq!(elements[0].get("user_export_type"), "1");
        assert_eq!(elements[0].get("user_total_anime"), "6");
        assert_eq!(elements[0].get("user_total_watching"), "2");

        let records = &elements[1..];
        assert!(records.iter().all(|r| r.name == "anime"));
        let keys: Vec<_> = records
            .iter()
            .map(|r| (r.get("my_status"), r.get("series_title")))
            .collect();
        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_manga_header_and_records() {
        let lists = vec![
            list("Reading", vec![manga_entry("Vagabond")]),
            list("Completed", vec![manga_entry("Pluto")]),
            list("Rereading", vec![manga_entry("Yotsuba&!")]),
        ];
        let document = ExportDocument::build(&lists, &settings(MediaType::Manga));
        let elements = parse(&document.to_xml().unwrap());

        assert_eq!(elements[0].get("user_export_type"), "2");
        assert_eq!(elements[0].get("user_total_manga"), "3");
        assert_eq!(elements[0].get("user_total_reading"), "1");
        assert_eq!(elements[0].get("user_total_plantoread"), "0");

        let titles: Vec<_> = elements[1..].iter().map(|r| r.get("manga_title")).collect();
        assert_eq!(titles, vec!["Pluto", "Yotsubaand!", "Vagabond"]);
        assert!(elements[1..].iter().all(|r| r.name == "manga"));
    }

    #[test]
    fn test_ampersands_spelled_out() {
        let mut entry = anime_entry("Tom & Jerry");
        entry.notes = Some("fun & games".to_string());
        let lists = vec![list("Completed", vec![entry])];

        let document = ExportDocument::build(&lists, &settings(MediaType::Anime));
        let text = String::from_utf8(document.to_xml().unwrap()).unwrap();

        assert!(text.contains("<series_title>Tom and Jerry</series_title>"));
        assert!(text.contains("<my_comments>fun and games</my_comments>"));
        assert!(!text.contains('&'));
    }

    #[test]
    fn test_record_count_matches_entries() {
        let lists = sample_lists();
        let expected: usize = lists
            .iter()
            .filter(|l| l.name != FAVORITES)
            .map(|l| l.entries.len())
            .sum();

        let document = ExportDocument::build(&lists, &settings(MediaType::Anime));
        assert_eq!(parse(&document.to_xml().unwrap()).len() - 1, expected);
    }

    #[test]
    fn test_angle_brackets_in_notes_are_escaped() {
        let mut entry = anime_entry("Steins;Gate");
        entry.notes = Some("<3 best".to_string());
        let lists = vec![list("Completed", vec![entry])];

        let xml = ExportDocument::build(&lists, &settings(MediaType::Anime))
            .to_xml()
            .unwrap();
        let elements = parse(&xml);

        assert_eq!(elements[1].get("my_comments"), "<3 best");
    }

    #[test]
    fn test_invalid_character_is_format_error() {
        let mut entry = anime_entry("Broken");
        entry.notes = Some("bell\u{7}".to_string());
        let lists = vec![list("Completed", vec![entry])];

        let result = ExportDocument::build(&lists, &settings(MediaType::Anime)).to_xml();
        assert!(matches!(result, Err(ExportError::Format(_))));
    }

    #[test]
    fn test_equal_keys_keep_list_order() {
        let mut first = anime_entry("Hunter x Hunter");
        first.media.id_mal = Some(136);
        let mut second = anime_entry("Hunter x Hunter");
        second.media.id_mal = Some(11061);
        let mut third = anime_entry("Hunter x Hunter");
        third.media.id_mal = Some(2);

        let lists = vec![
            list("Completed", vec![first, anime_entry("Angel Beats"), second]),
            list("Rewatching", vec![anime_entry("Zzz")]),
            list("Completed", vec![third]),
        ];
        let document = ExportDocument::build(&lists, &settings(MediaType::Anime));

        let ids: Vec<_> = document
            .records
            .iter()
            .filter(|r| r.title() == "Hunter x Hunter")
            .map(|r| match r {
                OutputRecord::Anime(record) => record.mal_id,
                OutputRecord::Manga(record) => record.mal_id,
            })
            .collect();

        assert_eq!(ids, vec![136, 11061, 2]);
    }

    #[test]
    fn test_ampersand_in_user_name() {
        let mut settings = settings(MediaType::Anime);
        settings.user_name = "Tom&Jerry".to_string();

        let document = ExportDocument::build(&sample_lists(), &settings);
        assert_eq!(document.header.user_name, "TomandJerry");

        let elements = parse(&document.to_xml().unwrap());
        assert_eq!(elements[0].get("user_name"), "TomandJerry");
    }
}

