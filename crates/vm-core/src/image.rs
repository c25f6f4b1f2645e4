use crate::Error;

/// Owned, contiguous row-major image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A `0 x 0` image. Does not allocate.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        let idx = self.index_of(x, y)?;
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        let idx = self.index_of(x, y)?;
        self.data.get_mut(idx)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Applies `f` to every pixel, keeping the geometry.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Frees the pixel storage and collapses the image to `0 x 0`.
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.data = Vec::new();
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

impl<T: Clone> Image<T> {
    /// Allocates a `width x height` image filled with `value`.
    ///
    /// Allocation failure is reported as [`Error::OutOfMemory`] instead of
    /// aborting the process.
    pub fn try_new_fill(width: usize, height: usize, value: T) -> Result<Self, Error> {
        let len = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { elements: len })?;
        data.resize(len, value);

        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Borrowed image view with element stride.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.stride + x;
        self.data.get(idx)
    }

    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.stride).ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;

        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            data: tail,
        })
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn view_indexing_with_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.get(2, 0), Some(&3));
        assert_eq!(view.get(0, 1), Some(&4));
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);
        assert_eq!(view.get(0, 2), None);
    }

    #[test]
    fn view_rejects_short_buffer_and_bad_stride() {
        let data = vec![0u8; 5];
        assert_eq!(
            ImageView::from_slice(3, 2, 3, &data).unwrap_err(),
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
        assert_eq!(
            ImageView::from_slice(3, 1, 2, &data).unwrap_err(),
            Error::InvalidStride
        );
    }

    #[test]
    fn subview_keeps_parent_stride() {
        let data = vec![
            10u8, 11, 12, 13, 99, // row 0
            20, 21, 22, 23, 98, // row 1
            30, 31, 32, 33, 97, // row 2
        ];
        let parent = ImageView::from_slice(4, 3, 5, &data).expect("valid parent");
        let sub = parent.subview(1, 1, 3, 2).expect("valid subview");

        assert_eq!(sub.width(), 3);
        assert_eq!(sub.height(), 2);
        assert_eq!(sub.get(0, 0), Some(&21));
        assert_eq!(sub.get(2, 0), Some(&23));
        assert_eq!(sub.get(0, 1), Some(&31));
        assert_eq!(sub.get(2, 1), Some(&33));
        assert_eq!(sub.get(3, 0), None);
        assert!(parent.subview(2, 0, 3, 1).is_err());
    }

    #[test]
    fn owned_image_get_set_and_map() {
        let mut img = Image::try_new_fill(3, 2, 0i16).expect("small allocation");
        *img.get_mut(2, 1).expect("in bounds") = 7;

        assert_eq!(img.get(2, 1), Some(&7));
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.data(), &[0, 0, 0, 0, 0, 7]);

        let doubled = img.map(|&v| i32::from(v) * 2);
        assert_eq!(doubled.width(), 3);
        assert_eq!(doubled.data()[5], 14);
    }

    #[test]
    fn from_vec_checks_length_and_clear_releases() {
        assert!(Image::from_vec(2, 2, vec![0u8; 3]).is_err());

        let mut img = Image::from_vec(2, 2, vec![1u8; 4]).expect("valid image");
        img.clear();
        assert_eq!((img.width(), img.height()), (0, 0));
        assert!(img.is_empty());
        assert_eq!(Image::<u8>::empty().as_view().get(0, 0), None);
    }
}
