use mixview_dom::{Element, TagKind};

/// A cursor over the cells of one generated table row.
///
/// Cells are written strictly left to right; the cursor never moves back.
#[derive(Debug)]
pub struct TableDataResource<'r> {
    cells: Vec<&'r mut Element>,
    index: usize,
}

impl<'r> TableDataResource<'r> {
    /// Collects the `<td>`/`<th>` children of `row`.
    pub fn new(row: &'r mut Element) -> Self {
        let cells = row
            .child_elements_mut()
            .filter(|cell| matches!(cell.kind(), TagKind::Td | TagKind::Th))
            .collect();
        Self { cells, index: 0 }
    }

    /// Returns the next cell and advances the cursor.
    ///
    /// # Panics
    ///
    /// Panics when every cell of the row has already been taken.
    pub fn next_cell(&mut self) -> &mut Element {
        let count = self.cells.len();
        let index = self.index;
        assert!(
            index < count,
            "table row has {count} cells, cannot advance to cell #{}",
            index + 1
        );
        self.index += 1;
        &mut *self.cells[index]
    }

    /// Writes `value` as the text of the next cell.
    pub fn write(&mut self, value: impl Into<String>) -> &mut Self {
        self.next_cell().replace_inner_text(value);
        self
    }

    /// Skips the next cell, leaving the prototype's content in place.
    pub fn skip(&mut self) -> &mut Self {
        self.next_cell();
        self
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn has_next(&self) -> bool {
        self.index < self.cells.len()
    }
}
