use std::num::NonZeroUsize;

/// Number of colors the section palette cycles through.
pub const PALETTE_LEN: usize = 5;

/// A labeled, contiguous region of the stack with a declared size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: Option<String>,
    pub size: usize,
}

impl Section {
    /// Build a section; an empty label is treated as no label.
    pub fn new(label: impl Into<String>, size: usize) -> Self {
        let label = label.into();
        Self {
            label: (!label.is_empty()).then_some(label),
            size,
        }
    }

    pub fn unlabeled(size: usize) -> Self {
        Self { label: None, size }
    }

    /// Number of rows this section occupies at `width` bytes per row.
    pub fn row_count(&self, width: NonZeroUsize) -> usize {
        self.size.div_ceil(width.get())
    }

    /// Row-aligned number of bytes the section spans in the rendered table.
    pub fn padded_stride(&self, width: NonZeroUsize) -> usize {
        self.row_count(width).saturating_mul(width.get())
    }
}

/// Pair labels with sizes positionally, ignoring entries without a partner.
pub fn sections_from_lists(labels: &[String], sizes: &[usize]) -> Vec<Section> {
    labels
        .iter()
        .zip(sizes)
        .map(|(label, size)| Section::new(label.clone(), *size))
        .collect()
}

/// One fixed-width line of the rendered stack.
///
/// The first row of a section carries `position` and `size` (and the label
/// when the section has one). Continuation rows leave all three as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: Option<String>,
    pub position: Option<usize>,
    pub size: Option<usize>,
    /// Absolute byte offset of this row, set on every row.
    pub offset: usize,
    pub section_index: usize,
    /// `section_index mod PALETTE_LEN`; identical for every row of a section.
    pub color_key: usize,
    pub bytes: Vec<u8>,
}

impl Row {
    pub fn is_lead(&self) -> bool {
        self.position.is_some()
    }

    pub fn label_text(&self) -> String {
        self.label.clone().unwrap_or_default()
    }

    pub fn position_text(&self) -> String {
        self.position.map(format_position).unwrap_or_default()
    }

    pub fn size_text(&self) -> String {
        self.size.map(|size| size.to_string()).unwrap_or_default()
    }

    pub fn bytes_text(&self) -> String {
        format_bytes(&self.bytes)
    }
}

/// Two lowercase hex digits per byte, separated by single spaces.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `+0x` followed by the unpadded lowercase hex offset.
pub fn format_position(position: usize) -> String {
    format!("+0x{position:x}")
}

/// Partition `bytes` into rows of `width` bytes following `sections` in order.
///
/// Every row advances the offset by a full `width`, so each section starts at
/// the padded stride of the previous one. Missing data is zero-filled and data
/// past the last row is never rendered.
pub fn layout(bytes: &[u8], sections: &[Section], width: NonZeroUsize) -> Vec<Row> {
    rows(bytes, sections, width).collect()
}

/// Lazy form of [`layout`], yielding rows one at a time.
pub fn rows<'a>(bytes: &'a [u8], sections: &'a [Section], width: NonZeroUsize) -> Rows<'a> {
    Rows {
        bytes,
        sections,
        width,
        section_index: 0,
        row_index: 0,
        pos: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Rows<'a> {
    bytes: &'a [u8],
    sections: &'a [Section],
    width: NonZeroUsize,
    section_index: usize,
    row_index: usize,
    pos: usize,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let step = self.width.get();
        loop {
            let section = self.sections.get(self.section_index)?;
            if self.row_index >= section.row_count(self.width) {
                self.section_index += 1;
                self.row_index = 0;
                continue;
            }

            let start = self.pos.min(self.bytes.len());
            let end = self.pos.saturating_add(step).min(self.bytes.len());
            let mut slice = self.bytes[start..end].to_vec();
            slice.resize(step, 0);

            let lead = self.row_index == 0;
            let row = Row {
                label: if lead { section.label.clone() } else { None },
                position: lead.then_some(self.pos),
                size: lead.then_some(section.size),
                offset: self.pos,
                section_index: self.section_index,
                color_key: self.section_index % PALETTE_LEN,
                bytes: slice,
            };

            self.row_index += 1;
            self.pos = self.pos.saturating_add(step);
            return Some(row);
        }
    }
}

/// Row and byte totals for a section list, saturating at `usize::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutExtent {
    pub rows: usize,
    /// Sum of declared section sizes.
    pub declared_len: usize,
    /// Sum of padded strides; the number of byte cells rendered.
    pub padded_len: usize,
}

impl LayoutExtent {
    pub fn measure(sections: &[Section], width: NonZeroUsize) -> Self {
        sections.iter().fold(
            Self {
                rows: 0,
                declared_len: 0,
                padded_len: 0,
            },
            |acc, section| Self {
                rows: acc.rows.saturating_add(section.row_count(width)),
                declared_len: acc.declared_len.saturating_add(section.size),
                padded_len: acc.padded_len.saturating_add(section.padded_stride(width)),
            },
        )
    }
}

/// Rows plus a summary of how the byte data lined up with the sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLayout {
    pub rows: Vec<Row>,
    pub width: NonZeroUsize,
    /// Sum of declared section sizes.
    pub declared_len: usize,
    /// Sum of padded strides; the number of byte cells rendered.
    pub padded_len: usize,
    /// Rendered cells with no backing input byte.
    pub zero_filled: usize,
    /// Input bytes beyond the last rendered row.
    pub dropped: usize,
}

impl StackLayout {
    /// Materialises every row, so callers bound the declared sizes first.
    pub fn build(bytes: &[u8], sections: &[Section], width: NonZeroUsize) -> Self {
        let extent = LayoutExtent::measure(sections, width);
        let backed = bytes.len().min(extent.padded_len);

        Self {
            rows: layout(bytes, sections, width),
            width,
            declared_len: extent.declared_len,
            padded_len: extent.padded_len,
            zero_filled: extent.padded_len - backed,
            dropped: bytes.len() - backed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sample_sections() -> Vec<Section> {
        vec![Section::new("Section 1", 8), Section::new("Section 2", 7)]
    }

    #[test]
    fn end_to_end_two_sections() {
        let bytes: Vec<u8> = (1..=15).collect();
        let rows = layout(&bytes, &sample_sections(), width(8));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label.as_deref(), Some("Section 1"));
        assert_eq!(rows[0].position, Some(0));
        assert_eq!(rows[0].size, Some(8));
        assert_eq!(rows[0].bytes_text(), "01 02 03 04 05 06 07 08");
        assert_eq!(rows[1].label.as_deref(), Some("Section 2"));
        assert_eq!(rows[1].position, Some(8));
        assert_eq!(rows[1].size, Some(7));
        assert_eq!(rows[1].bytes_text(), "09 0a 0b 0c 0d 0e 0f 00");
    }

    #[test]
    fn row_count_is_sum_of_ceilings() {
        let sections = vec![
            Section::new("a", 1),
            Section::new("b", 4),
            Section::new("c", 5),
            Section::new("d", 13),
        ];
        let rows = layout(&[], &sections, width(4));
        assert_eq!(rows.len(), 1 + 1 + 2 + 4);
    }

    #[test]
    fn continuation_rows_carry_no_metadata() {
        let sections = vec![Section::new("buffer", 10), Section::new("ret", 4)];
        let rows = layout(&[0x41; 14], &sections, width(4));

        let leads: Vec<_> = rows.iter().filter(|r| r.is_lead()).collect();
        assert_eq!(leads.len(), 2);
        for row in rows.iter().filter(|r| !r.is_lead()) {
            assert_eq!(row.label, None);
            assert_eq!(row.size, None);
            assert_eq!(row.label_text(), "");
            assert_eq!(row.position_text(), "");
            assert_eq!(row.size_text(), "");
        }
        assert_eq!(rows[0].section_index, rows[2].section_index);
        assert_eq!(rows[0].color_key, rows[2].color_key);
    }

    #[test]
    fn next_section_starts_at_padded_stride() {
        let sections = vec![Section::new("a", 5), Section::new("b", 3), Section::new("c", 2)];
        let rows = layout(&[], &sections, width(4));
        let lead_positions: Vec<_> = rows.iter().filter_map(|r| r.position).collect();
        assert_eq!(lead_positions, vec![0, 8, 12]);
        assert_eq!(lead_positions[1], sections[0].padded_stride(width(4)));
    }

    #[test]
    fn offsets_advance_by_width_every_row() {
        let sections = vec![Section::new("a", 3), Section::new("b", 9)];
        let rows = layout(&[1, 2, 3], &sections, width(4));
        let offsets: Vec<_> = rows.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 4, 8, 12]);
        assert!(rows.iter().all(|r| r.bytes.len() == 4));
    }

    #[test]
    fn short_data_is_zero_filled() {
        let stack = StackLayout::build(&[0xaa, 0xbb], &[Section::new("x", 6)], width(4));
        assert_eq!(stack.rows[0].bytes, vec![0xaa, 0xbb, 0, 0]);
        assert_eq!(stack.rows[1].bytes, vec![0, 0, 0, 0]);
        assert_eq!(stack.zero_filled, 6);
        assert_eq!(stack.dropped, 0);
    }

    #[test]
    fn excess_data_is_dropped() {
        let bytes: Vec<u8> = (1..=12).collect();
        let stack = StackLayout::build(&bytes, &[Section::new("x", 8)], width(4));
        assert_eq!(stack.rows.len(), 2);
        assert!(stack.rows.iter().all(|r| r.bytes.iter().all(|b| *b <= 8)));
        assert_eq!(stack.declared_len, 8);
        assert_eq!(stack.padded_len, 8);
        assert_eq!(stack.dropped, 4);
        assert_eq!(stack.zero_filled, 0);
    }

    #[test]
    fn color_key_cycles_by_section() {
        let sections: Vec<_> = (0..7).map(|i| Section::new(format!("s{i}"), 4)).collect();
        let rows = layout(&[], &sections, width(4));
        let keys: Vec<_> = rows.iter().map(|r| r.color_key).collect();
        assert_eq!(keys, vec![0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn empty_label_and_zero_size() {
        let sections = vec![Section::new("", 4), Section::unlabeled(0), Section::new("z", 4)];
        let rows = layout(&[], &sections, width(4));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[0].position_text(), "+0x0");
        assert_eq!(rows[1].section_index, 2);
        assert_eq!(rows[1].position_text(), "+0x4");
    }

    #[test]
    fn zip_ignores_unpaired_entries() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let sections = sections_from_lists(&labels, &[4, 8]);
        assert_eq!(sections, vec![Section::new("a", 4), Section::new("b", 8)]);
    }

    #[test]
    fn extent_saturates_for_huge_sections() {
        let sections = vec![Section::new("a", usize::MAX), Section::new("b", usize::MAX)];
        let extent = LayoutExtent::measure(&sections, width(4));
        assert_eq!(extent.declared_len, usize::MAX);
        assert_eq!(extent.padded_len, usize::MAX);
        assert_eq!(extent.rows, usize::MAX.div_ceil(4).saturating_mul(2));
        assert_eq!(sections[0].padded_stride(width(4)), usize::MAX);
    }

    #[test]
    fn huge_sections_yield_rows_lazily() {
        let sections = vec![Section::new("a", usize::MAX), Section::new("b", usize::MAX)];
        let first: Vec<_> = rows(&[7, 8], &sections, width(4)).take(3).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].bytes, vec![7, 8, 0, 0]);
        assert_eq!(first[0].size, Some(usize::MAX));
        assert!(!first[1].is_lead());
        assert_eq!(first[2].offset, 8);
    }

    #[test]
    fn lazy_rows_match_layout() {
        let bytes: Vec<u8> = (1..=15).collect();
        let eager = layout(&bytes, &sample_sections(), width(4));
        let lazy: Vec<_> = rows(&bytes, &sample_sections(), width(4)).collect();
        assert_eq!(eager, lazy);
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(format_bytes(&[0x0, 0xa, 0xff]), "00 0a ff");
        assert_eq!(format_position(0), "+0x0");
        assert_eq!(format_position(0x1c), "+0x1c");
    }
}
