// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the skipset CLI.
//!
//! The inspector draws a few boxed sections and a chunk table. Styling uses
//! the basic ANSI attributes and the eight standard colors, which the
//! terminal maps onto its own palette, so the same codes read on dark and
//! light backgrounds. Styling is off when `NO_COLOR` is set or stdout is not
//! a terminal.

use std::sync::OnceLock;

use skipset::ContainerKind;

/// Inner width of a box, between the two vertical borders.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";

// ═══════════════════════════════════════════════════════════════════════════
// STYLES
// ═══════════════════════════════════════════════════════════════════════════

/// What a piece of text is, mapped to an SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Box borders.
    Frame,
    /// Section labels and the title.
    Heading,
    /// Counts worth noticing, and members.
    Emphasis,
    /// Fingerprints.
    Hash,
    /// Column headers and secondary notes.
    Dim,
    Array,
    Bitmap,
}

impl Style {
    fn sgr(self) -> &'static str {
        match self {
            Style::Frame => "\x1b[90m",
            Style::Heading => "\x1b[1;36m",
            Style::Emphasis => "\x1b[1;32m",
            Style::Hash => "\x1b[33m",
            Style::Dim => "\x1b[2m",
            Style::Array => "\x1b[32m",
            Style::Bitmap => "\x1b[34m",
        }
    }
}

static COLORS: OnceLock<bool> = OnceLock::new();

/// Whether stdout gets escape sequences.
pub fn use_colors() -> bool {
    *COLORS.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

fn styled(enabled: bool, style: Style, text: &str) -> String {
    if enabled {
        format!("{}{}{}", style.sgr(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Wrap `text` in `style` when colors are on.
pub fn paint(style: Style, text: &str) -> String {
    styled(use_colors(), style, text)
}

/// Printed width of `s`, skipping escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // CSI runs up to its final byte
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

fn frame(text: &str) -> String {
    paint(Style::Frame, text)
}

/// `│ content            │`
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", frame("│"), content, " ".repeat(pad), frame("│"));
}

/// `┌─ LABEL ────────────┐`
pub fn section_top(label: &str) {
    let label = format!("─ {} ", paint(Style::Heading, label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label));
    println!(
        "{}{}{}",
        frame("┌"),
        label,
        frame(&format!("{}┐", "─".repeat(rest)))
    );
}

/// `└────────────────────┘`
pub fn section_bot() {
    println!("{}", frame(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// `╔════ TEXT ════╗`
pub fn title(text: &str) {
    let fill = BOX_WIDTH.saturating_sub(text.chars().count() + 2);
    let left = fill / 2;
    println!(
        "{} {} {}",
        frame(&format!("╔{}", "═".repeat(left))),
        paint(Style::Heading, text),
        frame(&format!("{}╗", "═".repeat(fill - left)))
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// `[ARRAY]` or `[BITMAP]`.
pub fn kind_badge(kind: ContainerKind) -> String {
    match kind {
        ContainerKind::Array => paint(Style::Array, "[ARRAY]"),
        ContainerKind::Bitmap => paint(Style::Bitmap, "[BITMAP]"),
    }
}

pub fn membership_label(member: bool) -> String {
    if member {
        paint(Style::Emphasis, "member")
    } else {
        paint(Style::Dim, "absent")
    }
}

/// Right-align to `width` printed columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", " ".repeat(pad), s)
}

/// Left-align to `width` printed columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Byte count in B, KB or MB.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let n = bytes as f64;
    if n >= KB * KB {
        format!("{:.1} MB", n / (KB * KB))
    } else if n >= KB {
        format!("{:.1} KB", n / KB)
    } else {
        format!("{} B", bytes)
    }
}
