//! Boolean mask with the same row-major layout as `TempGrid`.
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoolGrid {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<bool>,
}

impl BoolGrid {
    /// Construct an all-false mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    /// Number of set pixels.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True when no pixel is set.
    pub fn all_false(&self) -> bool {
        self.data.iter().all(|&v| !v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_true_and_all_false() {
        let mut m = BoolGrid::new(4, 3);
        assert!(m.all_false());
        m.set(1, 2, true);
        m.set(3, 0, true);
        assert_eq!(m.count_true(), 2);
        assert!(!m.all_false());
    }
}
