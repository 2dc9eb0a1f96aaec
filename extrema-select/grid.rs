/// Square-cell partition of an image, each cell holding a list of items.
///
/// Cell storage survives [`ImageGrid::initialize`] so repeated calls reuse
/// the allocations.
#[derive(Debug, Clone)]
pub struct ImageGrid<T> {
    cells: Vec<Vec<T>>,
    cell_length: usize,
    rows: usize,
    cols: usize,
}

impl<T> Default for ImageGrid<T> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            cell_length: 1,
            rows: 0,
            cols: 0,
        }
    }
}

impl<T> ImageGrid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes the grid to cover `width x height` with cells of `cell_length`
    /// pixels and empties every cell. Edge cells may be partial.
    pub fn initialize(&mut self, cell_length: usize, width: usize, height: usize) {
        let cell_length = cell_length.max(1);
        self.cell_length = cell_length;
        self.cols = width.div_ceil(cell_length);
        self.rows = height.div_ceil(cell_length);

        let total = self.rows * self.cols;
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        if self.cells.len() < total {
            self.cells.resize_with(total, Vec::new);
        } else {
            self.cells.truncate(total);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_length(&self) -> usize {
        self.cell_length
    }

    /// Index of the cell containing pixel `(x, y)`
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        (y / self.cell_length) * self.cols + x / self.cell_length
    }

    /// Cell containing pixel `(x, y)`. Panics outside the covered area.
    pub fn cell_at_pixel_mut(&mut self, x: usize, y: usize) -> &mut Vec<T> {
        let idx = self.cell_index(x, y);
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> &[Vec<T>] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.cells
    }
}
