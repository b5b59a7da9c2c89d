//! Markdown-to-HTML reformatting of generated notes.
//!
//! The transform is an ordered list of pure stages. Order matters: blank lines
//! become `<br><br>` before the line-oriented stages run, and the spacing
//! stages expect headings and lists to be tagged already.
//!
//! Only markdown syntax is rewritten. Tags the model already emitted pass
//! through, and running the transform over its own output changes nothing.
//! Markdown markers may be indented; the final trim would otherwise expose
//! them to a second pass.

use regex::Regex;
use std::sync::OnceLock;

static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
static LIST_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCK_CLOSE_REGEX: OnceLock<Regex> = OnceLock::new();
static BREAK_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static LIST_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn line_break_regex() -> &'static Regex {
    LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"\n|<br>").expect("Line break regex is valid"))
}

fn list_run_regex() -> &'static Regex {
    LIST_RUN_REGEX
        .get_or_init(|| Regex::new(r"(?:<li>.*?</li>\n?)+").expect("List run regex is valid"))
}

fn bold_regex() -> &'static Regex {
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Bold regex is valid"))
}

fn block_close_regex() -> &'static Regex {
    BLOCK_CLOSE_REGEX
        .get_or_init(|| Regex::new(r"</(?:h[123]|ul)>").expect("Block close regex is valid"))
}

fn break_run_regex() -> &'static Regex {
    BREAK_RUN_REGEX.get_or_init(|| Regex::new(r"(?:<br>){3,}").expect("Break run regex is valid"))
}

fn list_tag_regex() -> &'static Regex {
    LIST_TAG_REGEX.get_or_init(|| {
        Regex::new(r"<(/?)(?:ul|ol)(?:\s[^>]*)?>").expect("List tag regex is valid")
    })
}

/// A single named text-to-text step of the reformatter.
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Stages in the order [`reformat`] applies them.
pub const STAGES: [Stage; 8] = [
    Stage {
        name: "paragraph_breaks",
        apply: paragraph_breaks,
    },
    Stage {
        name: "headings",
        apply: headings,
    },
    Stage {
        name: "list_items",
        apply: list_items,
    },
    Stage {
        name: "list_blocks",
        apply: list_blocks,
    },
    Stage {
        name: "bold",
        apply: bold,
    },
    Stage {
        name: "block_spacing",
        apply: block_spacing,
    },
    Stage {
        name: "collapse_breaks",
        apply: collapse_breaks,
    },
    Stage {
        name: "trim",
        apply: trim,
    },
];

/// Convert generated notes text into embeddable HTML.
///
/// Total over all inputs: the empty string maps to the empty string, and the
/// output never contains more than two consecutive `<br>` markers.
pub fn reformat(text: &str) -> String {
    STAGES
        .iter()
        .fold(text.to_string(), |acc, stage| (stage.apply)(&acc))
}

pub fn paragraph_breaks(text: &str) -> String {
    text.replace("\n\n", "<br><br>")
}

/// `# `, `## ` and `### ` lines become `<h1>`..`<h3>`.
pub fn headings(text: &str) -> String {
    const LEVELS: [(&str, &str); 3] = [("# ", "h1"), ("## ", "h2"), ("### ", "h3")];

    map_lines(text, |line| {
        let (indent, body) = split_indent(line);
        LEVELS.iter().find_map(|&(marker, tag)| {
            body.strip_prefix(marker)
                .map(|rest| format!("{indent}<{tag}>{rest}</{tag}>"))
        })
    })
}

/// `* ` and `- ` lines become `<li>` items.
pub fn list_items(text: &str) -> String {
    map_lines(text, |line| {
        let (indent, body) = split_indent(line);
        body.strip_prefix("* ")
            .or_else(|| body.strip_prefix("- "))
            .map(|rest| format!("{indent}<li>{rest}</li>"))
    })
}

/// Wrap each run of newline-separated `<li>` items in a single `<ul>`.
///
/// Runs already inside an open `<ul>` or `<ol>` are left as they are.
pub fn list_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for run in list_run_regex().find_iter(text) {
        out.push_str(&text[last..run.start()]);
        let items = run.as_str();

        if inside_list(&text[..run.start()]) {
            out.push_str(items);
        } else {
            out.push_str("<ul>");
            out.push_str(&items.replace('\n', ""));
            out.push_str("</ul>");
            if items.ends_with('\n') {
                out.push('\n');
            }
        }
        last = run.end();
    }

    out.push_str(&text[last..]);
    out
}

pub fn bold(text: &str) -> String {
    bold_regex()
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

/// Follow every heading and list closer with a `<br>` unless one is already there.
pub fn block_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for close in block_close_regex().find_iter(text) {
        out.push_str(&text[last..close.end()]);
        if !text[close.end()..].starts_with("<br>") {
            out.push_str("<br>");
        }
        last = close.end();
    }

    out.push_str(&text[last..]);
    out
}

pub fn collapse_breaks(text: &str) -> String {
    break_run_regex()
        .replace_all(text, "<br><br>")
        .into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Rewrite each logical line, where lines end at a newline or a `<br>`.
///
/// `rewrite` returns `None` to keep a line unchanged. A trailing `\r` is kept
/// outside the rewritten text.
fn map_lines<F>(text: &str, rewrite: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut start = 0;

    for sep in line_break_regex().find_iter(text) {
        push_line(&mut out, &text[start..sep.start()], &rewrite);
        out.push_str(sep.as_str());
        start = sep.end();
    }
    push_line(&mut out, &text[start..], &rewrite);

    out
}

fn push_line<F>(out: &mut String, line: &str, rewrite: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let (body, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };

    match rewrite(body) {
        Some(rewritten) => out.push_str(&rewritten),
        None => out.push_str(body),
    }
    out.push_str(cr);
}

/// Leading whitespace of a line and the rest of it.
fn split_indent(line: &str) -> (&str, &str) {
    let body = line.trim_start();
    (&line[..line.len() - body.len()], body)
}

/// True when `preceding` leaves a `<ul>` or `<ol>` open.
fn inside_list(preceding: &str) -> bool {
    let depth = list_tag_regex()
        .captures_iter(preceding)
        .fold(0usize, |depth, caps| {
            if caps[1].is_empty() {
                depth + 1
            } else {
                depth.saturating_sub(1)
            }
        });
    depth > 0
}
