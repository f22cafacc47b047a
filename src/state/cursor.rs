/// Index of the product currently shown in the carousel.
///
/// Moves wrap around both ends of the view. On an empty view the cursor
/// stays at zero and never points at a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    #[cfg(test)]
    pub fn at(index: usize) -> Self {
        Cursor { index }
    }

    pub fn index(self) -> usize {
        self.index
    }

    /// Move forward one product, wrapping to the start
    pub fn next(self, len: usize) -> Self {
        if len == 0 {
            return Cursor::default();
        }
        Cursor {
            index: (self.index + 1) % len,
        }
    }

    /// Move back one product, wrapping to the end
    pub fn previous(self, len: usize) -> Self {
        if len == 0 {
            return Cursor::default();
        }
        Cursor {
            index: (self.index % len + len - 1) % len,
        }
    }

    /// The index if it points into a view of length `len`
    pub fn position(self, len: usize) -> Option<usize> {
        (self.index < len).then_some(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_start() {
        assert_eq!(Cursor::at(2).next(3), Cursor::at(0));
        assert_eq!(Cursor::at(0).next(3), Cursor::at(1));
    }

    #[test]
    fn test_previous_wraps_to_end() {
        assert_eq!(Cursor::at(0).previous(3), Cursor::at(2));
        assert_eq!(Cursor::at(2).previous(3), Cursor::at(1));
    }

    #[test]
    fn test_single_item_view_stays_put() {
        assert_eq!(Cursor::at(0).next(1), Cursor::at(0));
        assert_eq!(Cursor::at(0).previous(1), Cursor::at(0));
    }

    #[test]
    fn test_empty_view_is_guarded() {
        assert_eq!(Cursor::at(0).next(0), Cursor::at(0));
        assert_eq!(Cursor::at(0).previous(0), Cursor::at(0));
        assert_eq!(Cursor::at(0).position(0), None);
    }

    #[test]
    fn test_stale_index_is_brought_back_in_range() {
        assert_eq!(Cursor::at(7).previous(3), Cursor::at(0));
        assert_eq!(Cursor::at(7).position(3), None);
    }
}
