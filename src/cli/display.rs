//! Terminal display utilities for the zotsearch CLI.
//!
//! Plain ANSI 16-color output with a badge per entity type. Respects
//! `NO_COLOR` and falls back to plain text when stdout is not a TTY, so
//! piped output stays machine-friendly.

use std::collections::BTreeMap;

use zotsearch::{EntityType, Index, SearchHit};

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
}

use colors::*;

/// Whether to emit ANSI escapes at all.
fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn paint(text: &str, code: &str) -> String {
    if use_color() {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Fixed-width colored badge for an entity type.
fn type_badge(entity_type: EntityType) -> String {
    match entity_type {
        EntityType::GeCategory => paint("GE        ", MAGENTA),
        EntityType::Department => paint("DEPARTMENT", BLUE),
        EntityType::Course => paint("COURSE    ", GREEN),
        EntityType::Instructor => paint("INSTRUCTOR", YELLOW),
    }
}

/// Print ranked hits as a table.
pub fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("{}", paint("no results", DIM));
        return;
    }
    for hit in hits {
        let detail = match hit.entity.entity_type {
            EntityType::Course => {
                let dept = hit.entity.department().unwrap_or("?");
                let number = hit.entity.number().unwrap_or("?");
                format!("{} {}  {}", dept, number, paint(&hit.entity.name, DIM))
            }
            _ => hit.entity.name.clone(),
        };
        println!(
            "  {}  {}  {}",
            type_badge(hit.entity.entity_type),
            paint(&format!("{:<16}", hit.id), BOLD),
            detail
        );
    }
}

/// Print entity/keyword/alias counts for an index artifact.
pub fn print_summary(index: &Index) {
    let mut counts: BTreeMap<EntityType, usize> = BTreeMap::new();
    for entity in index.objects.values() {
        *counts.entry(entity.entity_type).or_default() += 1;
    }
    println!("{}", paint("index summary", BOLD));
    for (entity_type, count) in &counts {
        println!("  {}  {count}", type_badge(*entity_type));
    }
    println!("  objects   {}", index.objects.len());
    println!("  keywords  {}", index.keywords.len());
    println!("  aliases   {}", index.aliases.len());
}
