use crate::{Error, Image, ImageView, Pixel};

/// Binary foreground/background grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    cells: Image<bool>,
}

impl Mask {
    /// Thresholds luma: a pixel is foreground iff `luma <= threshold`.
    pub fn from_luma(src: &ImageView<'_, u8>, threshold: u8) -> Self {
        let cells = Image::from_fn(src.width(), src.height(), |x, y| {
            src.row(y)[x] <= threshold
        });
        Self { cells }
    }

    pub fn from_image(cells: Image<bool>) -> Self {
        Self { cells }
    }

    /// Parses rows of `#` (foreground) and any other byte (background).
    /// Every row must be as long as the first.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if let Some(r) = rows.iter().find(|r| r.len() != width) {
            return Err(Error::SizeMismatch {
                expected: width,
                actual: r.len(),
            });
        }
        let cells = Image::from_fn(width, height, |x, y| rows[y].as_bytes()[x] == b'#');
        Ok(Self { cells })
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.cells.get(x, y).copied().unwrap_or(false)
    }

    /// Row-major cell slice, `width * height` long.
    pub fn cells(&self) -> &[bool] {
        self.cells.data()
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.data().iter().filter(|&&v| v).count()
    }

    /// Foreground pixels in row-major scan order.
    pub fn iter_foreground(&self) -> impl Iterator<Item = Pixel> + '_ {
        let width = self.width().max(1);
        self.cells
            .data()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| Pixel::new(i % width, i / width))
    }
}

#[cfg(test)]
mod tests {
    use super::Mask;
    use crate::{Error, Image, ImageView, Pixel};

    #[test]
    fn threshold_is_inclusive() {
        let luma = Image::from_vec(4, 1, vec![0u8, 127, 128, 129]).expect("valid image");
        let mask = Mask::from_luma(&luma.as_view(), 128);

        assert_eq!(mask.cells(), &[true, true, true, false]);
        assert_eq!(mask.foreground_count(), 3);
    }

    #[test]
    fn threshold_over_padded_view() {
        let data = vec![0u8, 255, 7, 255, 0, 7];
        let view = ImageView::from_slice(2, 2, 3, &data).expect("valid view");
        let mask = Mask::from_luma(&view, 10);
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.cells(), &[true, false, false, true]);
    }

    #[test]
    fn ascii_and_scan_order() {
        let mask = Mask::from_ascii(&["#..", ".##"]).expect("rectangular mask");
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert!(mask.is_foreground(0, 0));
        assert!(!mask.is_foreground(1, 0));
        assert!(!mask.is_foreground(9, 9));

        let fg: Vec<Pixel> = mask.iter_foreground().collect();
        assert_eq!(fg, vec![Pixel::new(0, 0), Pixel::new(1, 1), Pixel::new(2, 1)]);
    }

    #[test]
    fn ragged_ascii_is_rejected() {
        let err = Mask::from_ascii(&["##", "#", "##"]).expect_err("ragged rows");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_mask() {
        let mask = Mask::from_ascii(&[]).expect("rectangular mask");
        assert_eq!(mask.width(), 0);
        assert_eq!(mask.iter_foreground().count(), 0);
    }
}
