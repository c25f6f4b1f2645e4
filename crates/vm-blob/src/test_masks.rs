use vm_core::Image;

/// Builds a binary mask from rows of text: `#` is foreground (255), any
/// other character is background.
pub(crate) fn parse_mask(rows: &[&str]) -> Image<u8> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());

    let mut data = Vec::with_capacity(width * height);
    for row in rows {
        assert_eq!(row.len(), width, "ragged mask row {row:?}");
        data.extend(row.bytes().map(|b| if b == b'#' { 255u8 } else { 0 }));
    }

    Image::from_vec(width, height, data).expect("consistent mask dimensions")
}

/// Filled `w x h` rectangle at `(x, y)` in a `width x height` mask.
pub(crate) fn rect_mask(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) -> Image<u8> {
    let mut data = vec![0u8; width * height];
    for yy in y..y + h {
        for xx in x..x + w {
            data[yy * width + xx] = 1;
        }
    }
    Image::from_vec(width, height, data).expect("consistent mask dimensions")
}
