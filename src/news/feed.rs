// src/news/feed.rs
//! Syndication document parsing. Only entry titles are kept, in document order.
use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
}

// RSS 1.0: items are siblings of the channel, directly under the root.
#[derive(Debug, Deserialize)]
struct Rdf {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
}

// Atom text constructs carry a `type` attribute we don't care about.
#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Rss,
    Rdf,
    Atom,
}

/// Look at the root element to decide how to read the document.
pub fn sniff_kind(xml: &str) -> Result<FeedKind> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().context("reading feed root")? {
            Event::Start(e) | Event::Empty(e) => {
                return match e.local_name().as_ref() {
                    b"rss" => Ok(FeedKind::Rss),
                    b"RDF" => Ok(FeedKind::Rdf),
                    b"feed" => Ok(FeedKind::Atom),
                    other => Err(anyhow!(
                        "unsupported feed root <{}>",
                        String::from_utf8_lossy(other)
                    )),
                };
            }
            Event::Eof => bail!("empty feed document"),
            _ => {}
        }
    }
}

/// Parse an RSS 2.0, RSS 1.0 or Atom document into entry titles.
/// A missing title becomes the empty string so positions are preserved.
pub fn parse_titles(xml: &str) -> Result<Vec<String>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let titles = match sniff_kind(&xml_clean)? {
        FeedKind::Rss => {
            let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;
            rss.channel
                .item
                .into_iter()
                .map(|it| clean_title(it.title.as_deref().unwrap_or_default()))
                .collect()
        }
        FeedKind::Rdf => {
            let rdf: Rdf = from_str(&xml_clean).context("parsing rdf xml")?;
            rdf.item
                .into_iter()
                .map(|it| clean_title(it.title.as_deref().unwrap_or_default()))
                .collect()
        }
        FeedKind::Atom => {
            let feed: AtomFeed = from_str(&xml_clean).context("parsing atom xml")?;
            feed.entry
                .into_iter()
                .map(|e| clean_title(e.title.as_ref().map(|t| t.value.as_str()).unwrap_or_default()))
                .collect()
        }
    };
    Ok(titles)
}

/// Decode leftover (often double-escaped) entities and collapse whitespace.
pub fn clean_title(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Rewrite HTML named entities (`&pound;`, `&nbsp;`, ...) that feeds leak into
/// XML, which only defines five of them. Known names are decoded and re-escaped;
/// unknown names and stray ampersands become `&amp;`.
fn scrub_html_entities_for_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        if tail.starts_with('#') {
            out.push('&');
            rest = tail;
            continue;
        }
        let name_len = tail
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(tail.len());
        let name = &tail[..name_len];
        if name.is_empty() || !tail[name_len..].starts_with(';') {
            out.push_str("&amp;");
            rest = tail;
            continue;
        }
        let entity = &rest[at..at + name_len + 2];
        if XML_ENTITIES.contains(&name) {
            out.push_str(entity);
        } else {
            let decoded = html_escape::decode_html_entities(entity);
            if decoded == entity {
                out.push_str("&amp;");
                out.push_str(&entity[1..]);
            } else {
                out.push_str(&html_escape::encode_text(&decoded));
            }
        }
        rest = &tail[name_len + 1..];
    }
    out.push_str(rest);
    out
}
