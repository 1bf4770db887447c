use std::io::{self, Write};

use super::palette::{ColorMode, Palette};
use crate::layout::Row;
use crate::width::{Align, display_width, escape_controls, pad_to_width};

/// Column headers, in rendering order.
pub const HEADERS: [&str; 4] = ["Label", "Pos", "Size", "Stack Data"];

const ALIGNMENTS: [Align; 4] = [Align::Left, Align::Left, Align::Right, Align::Left];

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RendererSettings {
    pub palette: Palette,
    pub color: ColorMode,
}

impl RendererSettings {
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}

/// Box-bordered table writer for layout rows.
pub struct TableRenderer {
    settings: RendererSettings,
    styled: bool,
}

impl TableRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        let styled = settings.color.enabled();
        Self { settings, styled }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Write the table for `rows`, in the order given, followed by a newline.
    pub fn render(&self, writer: &mut impl Write, rows: &[Row]) -> io::Result<()> {
        let cells: Vec<[String; 4]> = rows.iter().map(|row| self.cells(row)).collect();

        let mut widths = HEADERS.map(display_width);
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(display_width(cell));
            }
        }

        let border = border_line(&widths, '-');
        writeln!(writer, "{border}")?;
        writeln!(writer, "{}", content_line(&HEADERS.map(String::from), &widths))?;
        writeln!(writer, "{}", border_line(&widths, '='))?;
        for line in &cells {
            writeln!(writer, "{}", content_line(line, &widths))?;
        }
        writeln!(writer, "{border}")?;
        writer.flush()
    }

    pub fn render_to_string(&self, rows: &[Row]) -> String {
        let mut output = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut output, rows);
        String::from_utf8_lossy(&output).into_owned()
    }

    fn cells(&self, row: &Row) -> [String; 4] {
        let data = row.bytes_text();
        let data = if self.styled {
            self.settings.palette.paint(row.section_index, &data)
        } else {
            data
        };
        [
            escape_controls(&row.label_text()),
            row.position_text(),
            row.size_text(),
            data,
        ]
    }
}

fn border_line(widths: &[usize; 4], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line
}

fn content_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::from("|");
    for ((cell, width), align) in cells.iter().zip(widths).zip(ALIGNMENTS) {
        line.push(' ');
        line.push_str(&pad_to_width(cell, *width, align));
        line.push_str(" |");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Section, layout};
    use std::num::NonZeroUsize;

    fn plain() -> TableRenderer {
        TableRenderer::new(RendererSettings::default().with_color(ColorMode::Never))
    }

    fn sample_rows() -> Vec<Row> {
        let bytes: Vec<u8> = (1..=15).collect();
        let sections = vec![Section::new("Section 1", 8), Section::new("Section 2", 7)];
        layout(&bytes, &sections, NonZeroUsize::new(8).unwrap())
    }

    #[test]
    fn renders_bordered_table() {
        let rendered = plain().render_to_string(&sample_rows());
        let expected = "\
+-----------+------+------+-------------------------+
| Label     | Pos  | Size | Stack Data              |
+===========+======+======+=========================+
| Section 1 | +0x0 |    8 | 01 02 03 04 05 06 07 08 |
| Section 2 | +0x8 |    7 | 09 0a 0b 0c 0d 0e 0f 00 |
+-----------+------+------+-------------------------+
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn continuation_rows_render_blank_cells() {
        let sections = vec![Section::new("buffer", 8)];
        let rows = layout(&[0x41; 8], &sections, NonZeroUsize::new(4).unwrap());
        let rendered = plain().render_to_string(&rows);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[3], "| buffer | +0x0 |    8 | 41 41 41 41 |");
        assert_eq!(lines[4], "|        |      |      | 41 41 41 41 |");
    }

    #[test]
    fn styled_output_keeps_alignment() {
        let styled = TableRenderer::new(RendererSettings::default().with_color(ColorMode::Always));
        assert!(styled.is_styled());
        let rendered = styled.render_to_string(&sample_rows());
        let widths: Vec<_> = rendered.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(rendered.contains('\x1b'));
    }

    #[test]
    fn control_characters_in_labels_stay_on_one_line() {
        let sections = vec![Section::new("ret\naddr", 4), Section::new("a\tb", 4)];
        let rows = layout(&[0x41; 8], &sections, NonZeroUsize::new(4).unwrap());
        let rendered = plain().render_to_string(&rows);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "| ret\\naddr | +0x0 |    4 | 41 41 41 41 |");
        assert_eq!(lines[4], "| a\\tb      | +0x4 |    4 | 41 41 41 41 |");
        assert!(lines.iter().all(|line| display_width(line) == display_width(lines[0])));
    }

    #[test]
    fn empty_rows_render_header_only() {
        let rendered = plain().render_to_string(&[]);
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("| Label | Pos | Size | Stack Data |"));
    }
}
