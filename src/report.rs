//! Human-readable rendering of a dictionary.
//!
//! Only the public read surface is used: `len`, `stats` and `buckets`.

use crate::dict::Dictionary;
use core::fmt;

const KEY_WIDTH: usize = 13;
const VAL_WIDTH: usize = 48;
const IDX_WIDTH: usize = 6;
const BOX_WIDTH: usize = 60;

/// Displayable report over an optional dictionary.
pub struct Report<'a, S> {
    dict: Option<&'a Dictionary<S>>,
}

impl<'a, S> Report<'a, S> {
    pub fn new(dict: Option<&'a Dictionary<S>>) -> Self {
        Self { dict }
    }
}

/// Shorten `s` to `width - 4` chars plus `...` when it does not fit.
fn truncate(s: &str, width: usize) -> String {
    let keep = width.saturating_sub(4);
    if s.chars().count() > keep {
        let mut out: String = s.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

fn rule(f: &mut fmt::Formatter<'_>, left: char, mid: char, right: char) -> fmt::Result {
    let line = |n: usize| "─".repeat(n);
    writeln!(
        f,
        "{left}{}{mid}{}{mid}{}{right}",
        line(IDX_WIDTH + 2),
        line(KEY_WIDTH + 2),
        line(VAL_WIDTH + 2)
    )
}

impl<S> fmt::Display for Report<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(dict) = self.dict else {
            return writeln!(f, "Dictionary is NULL");
        };

        let bar = "─".repeat(BOX_WIDTH);
        writeln!(f, "┌{bar}┐")?;
        writeln!(f, "│ {:<w$} │", "Dictionary Statistics", w = BOX_WIDTH - 2)?;
        writeln!(f, "├{bar}┤")?;
        writeln!(f, "│ Total entries: {:>43} │", dict.len())?;
        if let Some(stats) = dict.stats() {
            writeln!(f, "│ Collisions:    {:>43} │", stats.collisions)?;
            writeln!(f, "│ Memory used:   {:>43} │", stats.alloced_bytes)?;
        }
        writeln!(f, "└{bar}┘")?;
        writeln!(f)?;

        if dict.is_empty() {
            return writeln!(f, "Dictionary is empty");
        }

        rule(f, '┌', '┬', '┐')?;
        writeln!(
            f,
            "│ {:<iw$} │ {:<kw$} │ {:<vw$} │",
            "Bucket",
            "Key",
            "Value",
            iw = IDX_WIDTH,
            kw = KEY_WIDTH,
            vw = VAL_WIDTH
        )?;
        rule(f, '├', '┼', '┤')?;
        for (index, chain) in dict.buckets() {
            for (key, value) in chain {
                writeln!(
                    f,
                    "│ {:<iw$} │ {:<kw$} │ {:<vw$} │",
                    index,
                    truncate(key, KEY_WIDTH),
                    truncate(value, VAL_WIDTH),
                    iw = IDX_WIDTH,
                    kw = KEY_WIDTH,
                    vw = VAL_WIDTH
                )?;
            }
        }
        rule(f, '└', '┴', '┘')
    }
}

/// Render the report for `dict` into a string.
pub fn render<S>(dict: Option<&Dictionary<S>>) -> String {
    Report::new(dict).to_string()
}

/// Print the report for `dict` to standard output.
pub fn print<S>(dict: Option<&Dictionary<S>>) {
    print!("{}", Report::new(dict));
}
