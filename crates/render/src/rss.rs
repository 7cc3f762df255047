//! RSS 2.0 feed rendering.
//!
//! The feed template is compiled on every call. It is tiny, rendered once per
//! run, and keeping it local means rendering is a pure function of its
//! arguments.

use crate::error::{ErrorKind, Result};
use crate::{Channel, Release};
use exn::ResultExt;
use serde::Serialize;
use time::UtcOffset;
use time::format_description::well_known::Rfc2822;
use upon::Engine;

const RSS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{{ hardware|xml }} Updates</title>
    <description>Feed of the {{ hardware|xml }} Software update releases</description>
    <link>{{ link|xml }}</link>
    {% for item in items %}
    <item>
      <title>{{ hardware|xml }} Update: {{ item.version|xml }}</title>
      <guid isPermaLink="false">{{ item.guid|xml }}</guid>
      <description>The {{ hardware|xml }} software update {{ item.version|xml }} was released on {{ item.date|xml }}</description>
      <pubDate>{{ item.pub_date|xml }}</pubDate>
      <link>{{ link|xml }}</link>
    </item>
    {% endfor %}
  </channel>
</rss>
"#;

#[derive(Serialize)]
struct Feed<'a> {
    hardware: &'static str,
    link: &'a str,
    items: Vec<Item<'a>>,
}

#[derive(Serialize)]
struct Item<'a> {
    version: &'a str,
    date: &'a str,
    guid: String,
    pub_date: String,
}
impl<'a> Item<'a> {
    fn new(release: &'a Release) -> Result<Self> {
        let pub_date = release
            .published_at()
            .to_offset(UtcOffset::UTC)
            .format(&Rfc2822)
            .or_raise(|| ErrorKind::Template)?;
        Ok(Self {
            version: release.version(),
            date: release.date(),
            guid: release.guid(),
            pub_date,
        })
    }
}

/// Renders the complete feed document into memory.
pub(crate) fn rss(releases: &[Release], channel: &Channel) -> Result<String> {
    rss_from_template(RSS_TEMPLATE, releases, channel)
}

fn rss_from_template(template: &str, releases: &[Release], channel: &Channel) -> Result<String> {
    let mut engine = Engine::new();
    addons::configure(&mut engine);
    let template = engine.compile(template).or_raise(|| ErrorKind::Template)?;
    let feed = Feed {
        hardware: channel.hardware.label(),
        link: &channel.link,
        items: releases.iter().map(Item::new).collect::<Result<Vec<_>>>()?,
    };
    template.render(&engine, &feed).to_string().or_raise(|| ErrorKind::Template)
}

/// Custom [`upon`] extensions for XML output.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Escapes the five XML special characters.
    pub(crate) fn escape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                c => out.push(c),
            }
        }
        out
    }

    /// Custom formatter that makes strings safe to embed in XML text and
    /// attribute values.
    fn xml_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", escape(s))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `xml` formatter on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("xml", xml_formatter);
    }
}
