//! Plain-text report rendering
//!
//! A report is a header followed by numbered sections. Each section is a
//! heading line and zero or more body lines:
//!
//! ```text
//! == Employee report ==
//! generated: 2026-01-01T00:00:00Z
//!
//! 1) Sort by salary (descending):
//! 10 - Jack - Lead - 7500
//! ...
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use crate::aggregator::Summary;
use crate::observability::{Event, Logger};
use crate::operators::{Exclusion, Page, Partition};
use crate::record::Record;

const RULE: &str = "--------------------------------------------------";

/// Writes report sections to `W` and logs progress to `L`
pub struct ReportWriter<W: Write, L: Write = io::Stderr> {
    out: W,
    logger: Logger<L>,
    title: String,
    sections: usize,
}

impl<W: Write, L: Write> ReportWriter<W, L> {
    pub fn new(out: W, logger: Logger<L>) -> Self {
        Self {
            out,
            logger,
            title: String::new(),
            sections: 0,
        }
    }

    /// Writes the header stamped with the current time
    pub fn begin(&mut self, title: &str) -> io::Result<()> {
        self.begin_at(title, Utc::now())
    }

    /// Writes the header stamped with `at`
    pub fn begin_at(&mut self, title: &str, at: DateTime<Utc>) -> io::Result<()> {
        self.title = title.to_string();
        self.sections = 0;
        let stamp = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        writeln!(self.out, "== {} ==", title)?;
        writeln!(self.out, "generated: {}", stamp)?;
        self.logger
            .event(Event::ReportStart, &[("title", title), ("generated", stamp.as_str())]);
        Ok(())
    }

    /// Starts a numbered section
    pub fn section(&mut self, heading: &str) -> io::Result<()> {
        self.sections += 1;
        writeln!(self.out)?;
        writeln!(self.out, "{}) {}:", self.sections, heading)?;
        let number = self.sections.to_string();
        self.logger.event(
            Event::SectionRendered,
            &[("section", number.as_str()), ("heading", heading)],
        );
        Ok(())
    }

    /// One line per record, in order
    pub fn records<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            writeln!(self.out, "{}", record)?;
        }
        Ok(())
    }

    /// A single record, or `none`
    pub fn record_or_none(&mut self, record: Option<&Record>) -> io::Result<()> {
        match record {
            Some(r) => writeln!(self.out, "{}", r),
            None => writeln!(self.out, "none"),
        }
    }

    /// A single value line
    pub fn value(&mut self, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", value)
    }

    /// A single value line, or `none`
    pub fn value_or_none<T: Display>(&mut self, value: Option<T>) -> io::Result<()> {
        match value {
            Some(v) => writeln!(self.out, "{}", v),
            None => writeln!(self.out, "none"),
        }
    }

    /// Values as one bracketed, comma-separated line
    pub fn list<T, I>(&mut self, items: I) -> io::Result<()>
    where
        T: Display,
        I: IntoIterator<Item = T>,
    {
        writeln!(self.out, "{}", bracketed(items))
    }

    /// `key -> value` lines in map order
    pub fn map<K: Display, V: Display>(&mut self, map: &IndexMap<K, V>) -> io::Result<()> {
        self.map_with(map, |v| v.to_string())
    }

    /// `key -> rendered value` lines in map order
    pub fn map_with<K, V, R>(&mut self, map: &IndexMap<K, V>, render: R) -> io::Result<()>
    where
        K: Display,
        R: Fn(&V) -> String,
    {
        for (key, value) in map {
            writeln!(self.out, "{} -> {}", key, render(value))?;
        }
        Ok(())
    }

    /// `key -> [record, ...]` lines in map order
    pub fn groups<K: Display>(&mut self, groups: &IndexMap<K, Vec<&Record>>) -> io::Result<()> {
        self.map_with(groups, |members| bracketed(members.iter()))
    }

    /// Page position line followed by the page's records
    pub fn page(&mut self, page: &Page<&Record>) -> io::Result<()> {
        writeln!(
            self.out,
            "page {} of {} ({} of {} items)",
            page.page,
            page.total_pages,
            page.items.len(),
            page.total_items
        )?;
        self.records(page.iter().copied())
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out, "{}", summary_line(summary))
    }

    /// `false -> [...]` then `true -> [...]`
    pub fn partition(&mut self, split: &Partition<'_>) -> io::Result<()> {
        writeln!(self.out, "false -> {}", bracketed(split.rest.iter()))?;
        writeln!(self.out, "true -> {}", bracketed(split.matching.iter()))
    }

    /// Lists records left out of the section and logs them
    pub fn exclusions(&mut self, excluded: &[Exclusion]) -> io::Result<()> {
        if excluded.is_empty() {
            return Ok(());
        }
        for ex in excluded {
            writeln!(self.out, "excluded: {} ({})", ex.id, ex.reason)?;
        }
        let ids = excluded
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let count = excluded.len().to_string();
        self.logger.event(
            Event::RecordsExcluded,
            &[("count", count.as_str()), ("ids", ids.as_str())],
        );
        Ok(())
    }

    /// Notes an identifier collision in the output and the log
    pub fn conflict(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.out, "conflict on identifier {}", id)?;
        self.logger.event(Event::ConflictRejected, &[("id", id)]);
        Ok(())
    }

    /// Number of sections written so far
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Writes the closing rule and returns the sinks
    pub fn finish(mut self) -> io::Result<(W, Logger<L>)> {
        writeln!(self.out, "{}", RULE)?;
        self.out.flush()?;
        let sections = self.sections.to_string();
        self.logger.event(
            Event::ReportComplete,
            &[("title", self.title.as_str()), ("sections", sections.as_str())],
        );
        Ok((self.out, self.logger))
    }
}

pub(crate) fn summary_line(summary: &Summary) -> String {
    format!(
        "count={} sum={} min={} max={} average={:.2}",
        summary.count, summary.sum, summary.min, summary.max, summary.average
    )
}

pub(crate) fn bracketed<T, I>(items: I) -> String
where
    T: Display,
    I: IntoIterator<Item = T>,
{
    let parts: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
