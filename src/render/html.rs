use crate::align::{Holder, LineChange};
use crate::error::Result;
use crate::render::Generator;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Render spaces as `&nbsp;` so indentation survives.
    pub escape_spaces: bool,
    pub table_class: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            escape_spaces: true,
            table_class: "diff-table file-diff-split".to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Context,
    Deletion,
    Addition,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Context => "context",
            Mode::Deletion => "deletion",
            Mode::Addition => "addition",
        }
    }
}

fn escape(text: &str, spaces: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            ' ' if spaces => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Writes a split diff table in the GitHub style. Changed characters are
/// wrapped in `<span class="x x-first x-last">`.
pub struct HtmlGenerator<W = String> {
    out: W,
    options: HtmlOptions,
}

impl HtmlGenerator<String> {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlGenerator::with_writer(String::new(), options)
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for HtmlGenerator<String> {
    fn default() -> Self {
        HtmlGenerator::new(HtmlOptions::default())
    }
}

impl<W: Write> HtmlGenerator<W> {
    pub fn with_writer(out: W, options: HtmlOptions) -> Self {
        HtmlGenerator { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn escape(&self, text: &str) -> String {
        escape(text, self.options.escape_spaces)
    }

    fn unchanged_side(&mut self, side: char, no: Option<usize>, holder: &Holder) -> Result<()> {
        match no {
            Some(no) => {
                let code = self.escape(&holder.text());
                self.side(side, no, Mode::Context, &code)
            }
            None => self.empty_side(),
        }
    }

    fn changed_side(
        &mut self,
        side: char,
        no: Option<usize>,
        holder: &Holder,
        mode: Mode,
    ) -> Result<()> {
        let Some(no) = no else {
            return self.empty_side();
        };
        let mut code = String::new();
        for elem in holder.elements() {
            let piece = self.escape(elem.text());
            if elem.is_changed() && !piece.is_empty() {
                write!(code, "<span class=\"x x-first x-last\">{}</span>", piece)?;
            } else {
                code.push_str(&piece);
            }
        }
        self.side(side, no, mode, &code)
    }

    fn side(&mut self, side: char, no: usize, mode: Mode, code: &str) -> Result<()> {
        let mode = mode.as_str();
        writeln!(
            self.out,
            "      <td id=\"{side}{no}\" class=\"blob-num blob-num-{mode} base js-linkable-line-number\" data-line-number=\"{no}\"></td>"
        )?;
        writeln!(
            self.out,
            "      <td class=\"blob-code blob-code-{mode} base\">{code}</td>"
        )?;
        Ok(())
    }

    fn empty_side(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "      <td class=\"blob-num blob-num-empty head empty-cell\"></td>"
        )?;
        writeln!(
            self.out,
            "      <td class=\"blob-code blob-code-empty head empty-cell\"></td>"
        )?;
        Ok(())
    }
}

impl<W: Write> Generator for HtmlGenerator<W> {
    fn begin_result(&mut self) -> Result<()> {
        writeln!(self.out, "<div class=\"container\">")?;
        writeln!(self.out, "<div class=\"file\">")?;
        writeln!(self.out, "<div class=\"data highlight blob-wrapper\">")?;
        let class = escape(&self.options.table_class, false);
        writeln!(self.out, "  <table class=\"{}\">", class)?;
        writeln!(self.out, "  <tbody>")?;
        Ok(())
    }

    fn end_result(&mut self) -> Result<()> {
        writeln!(self.out, "  </tbody>")?;
        writeln!(self.out, "  </table>")?;
        writeln!(self.out, "</div>")?;
        writeln!(self.out, "</div>")?;
        writeln!(self.out, "</div>")?;
        Ok(())
    }

    fn begin_row(&mut self, _change: &LineChange) -> Result<()> {
        writeln!(self.out, "    <tr>")?;
        Ok(())
    }

    fn end_row(&mut self, _change: &LineChange) -> Result<()> {
        writeln!(self.out, "    </tr>")?;
        Ok(())
    }

    fn visit_row(&mut self, change: &LineChange) -> Result<()> {
        if change.changed {
            self.changed_side('L', change.left_no, &change.left, Mode::Deletion)?;
            self.changed_side('R', change.right_no, &change.right, Mode::Addition)
        } else {
            self.unchanged_side('L', change.left_no, &change.left)?;
            self.unchanged_side('R', change.right_no, &change.right)
        }
    }
}
