/// Linear pixel indices for one kernel placement.
///
/// Returns exactly `kw * kh` entries in row-major order from the window's
/// top-left cell: entry `i` covers the cell at relative offset
/// `(i % kw - kw/2, i / kw - kh/2)` from `(x, y)`. In-bounds cells map to
/// `Some(row * width + col)`, cells outside `[0, width) x [0, height)` to
/// `None`. Rows or columns that fall entirely outside still contribute one
/// entry per cell, never a shorter list.
///
/// Entry `i` pairs with entry `i` of a row-major weight matrix: both sides
/// follow the same top-left to bottom-right order, keeping each weight on
/// its relative offset.
///
/// Panics if `kw` or `kh` is even; `convolve` rejects such kernels with an
/// error before any window is mapped.
pub fn window_indices(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    kw: usize,
    kh: usize,
) -> Vec<Option<usize>> {
    let mut out = vec![None; kw * kh];
    window_indices_into(width, height, x, y, kw, kh, &mut out);
    out
}

pub(crate) fn window_indices_into(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    kw: usize,
    kh: usize,
    out: &mut [Option<usize>],
) {
    assert!(!kw.is_multiple_of(2) && !kh.is_multiple_of(2), "kernel dimensions must be odd");
    debug_assert_eq!(out.len(), kw * kh);

    let rx = (kw / 2) as isize;
    let ry = (kh / 2) as isize;
    let mut i = 0;

    for dy in -ry..=ry {
        let row = y as isize + dy;
        let row_ok = row >= 0 && row < height as isize;
        for dx in -rx..=rx {
            let col = x as isize + dx;
            out[i] = if row_ok && col >= 0 && col < width as isize {
                Some(row as usize * width as usize + col as usize)
            } else {
                None
            };
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::window_indices;

    #[test]
    fn corner_window_keeps_full_length() {
        let cells = window_indices(3, 3, 0, 0, 3, 3);

        // Top row and left column of the window hang outside; the 2x2
        // quadrant toward the interior remains.
        let expected = vec![
            None, None, None, // row above the image
            None, Some(0), Some(1), // center row
            None, Some(3), Some(4), // row below the center
        ];
        assert_eq!(cells, expected);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 4);
    }

    #[test]
    fn interior_window_is_fully_present() {
        let cells = window_indices(3, 3, 1, 1, 3, 3);
        let expected: Vec<Option<usize>> = (0..9).map(Some).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn oversized_kernel_still_yields_every_cell() {
        let cells = window_indices(1, 1, 0, 0, 5, 5);

        assert_eq!(cells.len(), 25);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 1);
        assert_eq!(cells[12], Some(0));
    }

    #[test]
    fn asymmetric_window_shape() {
        // 1x3 kernel on a 4x1 image: only horizontal neighbors matter.
        let cells = window_indices(4, 1, 3, 0, 3, 1);
        assert_eq!(cells, vec![Some(2), Some(3), None]);
    }

    #[test]
    #[should_panic(expected = "kernel dimensions must be odd")]
    fn even_kernel_dimensions_panic() {
        let _ = window_indices(4, 4, 0, 0, 2, 3);
    }
}
